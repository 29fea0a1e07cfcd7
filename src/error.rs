//! The codec's error type.
//!
//! Decoding failures are plain human-readable strings (see the catalog of
//! constants at the bottom of this module): `Display` renders exactly the
//! catalog message so callers can match on it, while `Debug` prepends a
//! traceback of the fields and indices visited on the way down, in the
//! style of:
//!
//!   Error(.embedded.items[2]): Unexpected end of bytes

use std::fmt;

/// A decoding or schema error.
#[derive(Clone)]
pub struct Error {
    message: String,
    traceback: Vec<Level>,
}

#[derive(Clone)]
enum Level {
    Field(String),
    Index(usize),
}

impl Error {
    /// Construct a new error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            traceback: Vec::new(),
        }
    }

    /// Record that this error occurred while processing a named field.
    #[cold]
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.traceback.push(Level::Field(name.into()));
        self
    }

    /// Record that this error occurred while processing a sequence index.
    #[cold]
    pub fn with_index(mut self, index: usize) -> Self {
        self.traceback.push(Level::Index(index));
        self
    }

    /// The plain message, without any traceback.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Error(")?;
        for level in self.traceback.iter().rev() {
            match level {
                Level::Field(name) => {
                    f.write_str(".")?;
                    f.write_str(name)?;
                }
                Level::Index(index) => {
                    write!(f, "[{index}]")?;
                }
            }
        }
        write!(f, "): {}", self.message)
    }
}

impl std::error::Error for Error {}

/// A decoding result.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) const NO_BYTES_TO_DECODE: &str = "No bytes to decode";
pub(crate) const UNEXPECTED_END_OF_BYTES: &str = "Unexpected end of bytes";
pub(crate) const UNEXPECTED_END_OF_CHUNK: &str = "Unexpected end of chunk";
pub(crate) const KEY_INVALID_FIELD_NUMBER: &str = "Failed decoding key: invalid field number";
pub(crate) const KEY_UNKNOWN_WIRE_TYPE: &str = "Failed decoding key: unknown wire type";
pub(crate) const GROUP_WIRE_TYPES_UNSUPPORTED: &str = "group wire types are not supported";
pub(crate) const FAILED_TO_DECODE_EITHER: &str = "Failed to decode either.";
pub(crate) const ERROR_DECODING_TUPLE: &str = "Error while decoding tuple.";
pub(crate) const UNABLE_TO_DECODE_FLOAT: &str = "Unable to decode Float";
pub(crate) const UNABLE_TO_DECODE_DOUBLE: &str = "Unable to decode Double";
pub(crate) const INVALID_UTF8: &str = "Invalid UTF-8 string";

pub(crate) fn schema_missing_field_number(n: u64) -> String {
    format!("Schema doesn't contain field number {n}.")
}

pub(crate) fn missing_field_number(n: u32) -> String {
    format!("Missing field number {n}.")
}
