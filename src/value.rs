//! The dynamic value domain the codec encodes from and decodes into.
//!
//! The schema-derivation macro that would bridge a concrete Rust type to
//! and from `Value` is out of scope for this crate (see spec §1); user
//! types plug in through [`crate::Schema::transform`] instead, the same
//! way the reference design uses `Transform` as the lens for
//! user-defined types.

/// A value of any shape the schema model can describe.
///
/// This is the generalized "tagged-variant value type spanning every
/// primitive plus `Record`, `Seq`, `Left`/`Right`, `Some`/`None`, and
/// `EnumCase`" called for by the spec's design notes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Unit,
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),
    Bytes(bytes::Bytes),
    /// A homogeneous ordered collection (the `Sequence` schema's chunk).
    List(Vec<Value>),
    /// An ordered named-field product (`GenericRecord`, `Product`, `Tuple`).
    Record(Vec<(String, Value)>),
    Option(Option<Box<Value>>),
    Left(Box<Value>),
    Right(Box<Value>),
    /// The single present case of a sum (`Enumeration` or `Sum`).
    EnumCase(String, Box<Value>),
}

impl Value {
    pub fn as_record(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn record_field(&self, name: &str) -> Option<&Value> {
        self.as_record()?
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}
