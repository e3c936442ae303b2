use crate::model::field::FieldValue;

/// Field values of one decoded model instance, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelRecord {
    values: Vec<(String, FieldValue)>,
}

impl ModelRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        ModelRecord::default()
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Sets a field, replacing a previous value.
    pub fn set(&mut self, name: &str, value: FieldValue) {
        match self.values.iter_mut().find(|(field, _)| field == name) {
            Some((_, existing)) => *existing = value,
            None => self.values.push((name.to_string(), value)),
        }
    }

    /// Builder form of [`ModelRecord::set`].
    #[must_use]
    pub fn with(mut self, name: &str, value: FieldValue) -> Self {
        self.set(name, value);
        self
    }

    /// Removes a field.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let position = self.values.iter().position(|(field, _)| field == name)?;
        Some(self.values.remove(position).1)
    }

    /// Iterates over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut record = ModelRecord::new()
            .with("a", FieldValue::U8(1))
            .with("b", FieldValue::Bool(true));
        record.set("a", FieldValue::U8(2));

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("a"), Some(&FieldValue::U8(2)));
        assert_eq!(record.iter().map(|(name, _)| name).collect::<Vec<_>>(), ["a", "b"]);

        assert_eq!(record.remove("b"), Some(FieldValue::Bool(true)));
        assert_eq!(record.remove("b"), None);
        assert!(record.get("b").is_none());
    }
}
