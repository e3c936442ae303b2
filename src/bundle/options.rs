/// Options controlling how entries are stored when a bundle is saved.
///
/// # Examples
///
/// ```rust
/// use bundlescope::BundlerOptions;
///
/// let options = BundlerOptions::default().with_compression_threshold(0.5);
/// assert!(options.use_compression);
/// assert!(!options.force_compression);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BundlerOptions {
    /// Compress entries (bundle version 6 and later only)
    pub use_compression: bool,
    /// Keep the compressed form only if it is smaller than `size * threshold`
    pub compression_threshold: f32,
    /// Keep the compressed form regardless of its size
    pub force_compression: bool,
}

impl Default for BundlerOptions {
    fn default() -> Self {
        BundlerOptions {
            use_compression: true,
            compression_threshold: 0.75,
            force_compression: false,
        }
    }
}

impl BundlerOptions {
    /// Enables or disables compression.
    #[must_use]
    pub fn with_compression(mut self, use_compression: bool) -> Self {
        self.use_compression = use_compression;
        self
    }

    /// Sets the compression threshold.
    #[must_use]
    pub fn with_compression_threshold(mut self, compression_threshold: f32) -> Self {
        self.compression_threshold = compression_threshold;
        self
    }

    /// Forces compressed storage for every compressible entry.
    #[must_use]
    pub fn with_force_compression(mut self, force_compression: bool) -> Self {
        self.force_compression = force_compression;
        self
    }

    /// Returns `true` if a compressed form of `compressed_size` bytes should be kept for an
    /// entry of `original_size` bytes.
    #[must_use]
    pub fn accepts_compressed(&self, compressed_size: u64, original_size: u64) -> bool {
        self.force_compression
            || (compressed_size as f64) < original_size as f64 * f64::from(self.compression_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = BundlerOptions::default();
        assert!(options.use_compression);
        assert_eq!(options.compression_threshold, 0.75);
        assert!(!options.force_compression);
    }

    #[test]
    fn threshold() {
        let options = BundlerOptions::default();
        assert!(options.accepts_compressed(74, 100));
        assert!(!options.accepts_compressed(75, 100));
        assert!(!options.accepts_compressed(120, 100));
        assert!(!options.accepts_compressed(0, 0));

        let forced = options.with_force_compression(true);
        assert!(forced.accepts_compressed(120, 100));

        let disabled = options.with_compression(false).with_compression_threshold(1.0);
        assert!(!disabled.use_compression);
        assert!(disabled.accepts_compressed(99, 100));
    }
}
