//! Decoding: turning a byte buffer back into a [`crate::Value`] given
//! the [`crate::Schema`] that describes its shape.

pub(crate) mod compound;
pub(crate) mod scalar;

use std::sync::Arc;

use crate::error::{self, Error, Result};
use crate::schema::Schema;
use crate::value::Value;

/// Decode `bytes` as a value of `schema`'s shape.
pub(crate) fn decode(schema: &Arc<Schema>, bytes: &[u8]) -> Result<Value> {
    if bytes.is_empty() {
        return Err(Error::new(error::NO_BYTES_TO_DECODE));
    }
    compound::decode_value(schema, bytes)
}
