use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds {
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The variants follow the failure modes of binary access: data that ends before an exact
/// read is satisfied, operations on a released reader or writer, invalid arguments, data that
/// violates the bundle format, and I/O failures of the underlying byte source or sink.
///
/// # Error Categories
///
/// ## Data Access Errors
/// - [`Error::EndOfData`] - An exact read could not be satisfied
/// - [`Error::OutOfBounds`] - A slice access would have exceeded its buffer
/// - [`Error::Disposed`] - The reader or writer was already released
///
/// ## Argument Errors
/// - [`Error::InvalidArgument`] - Malformed sizes, offsets, or ranges
/// - [`Error::InvalidPattern`] - A signature pattern could not be parsed
///
/// ## Format Errors
/// - [`Error::Malformed`] - The bundle or encoded data is corrupted
/// - [`Error::Empty`] - Empty input provided
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem or stream I/O errors
/// - [`Error::GoblinErr`] - Host binary header parsing errors from the goblin crate
///
/// # Examples
///
/// ```rust,no_run
/// use bundlescope::{Error, SingleFileBundle};
///
/// match SingleFileBundle::from_file("app.exe") {
///     Ok(Some(bundle)) => println!("{} entries", bundle.manifest().entries().len()),
///     Ok(None) => println!("not a single-file bundle"),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed bundle: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An exact read could not be satisfied because the data ended early.
    ///
    /// Partial reads never produce this error, they return fewer bytes instead.
    #[error("Unexpected end of data")]
    EndOfData,

    /// An out of bound access was attempted.
    ///
    /// # Fields
    ///
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Out of Bound read would have occurred! - {file}:{line}")]
    OutOfBounds {
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The reader or writer has already been disposed.
    #[error("Cannot access a disposed object")]
    Disposed,

    /// The data is damaged and could not be parsed.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An argument was outside of its valid range.
    #[error("Invalid argument - {0}")]
    InvalidArgument(String),

    /// A byte signature pattern could not be parsed.
    #[error("Invalid signature pattern - {0}")]
    InvalidPattern(String),

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors of the underlying byte source or sink, propagated unchanged.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Error from the goblin crate while inspecting a host binary header.
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}

impl From<Error> for std::io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::FileError(inner) => inner,
            Error::EndOfData => std::io::Error::from(std::io::ErrorKind::UnexpectedEof),
            other => std::io::Error::other(other),
        }
    }
}
