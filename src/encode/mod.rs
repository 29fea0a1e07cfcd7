//! Encoding: turning a [`crate::Value`] into bytes given the
//! [`crate::Schema`] that describes its shape. Encoding never fails
//! (spec §4.3): values that don't fit their schema silently contribute
//! nothing to the output.

pub(crate) mod compound;
pub(crate) mod scalar;

use std::sync::Arc;

use crate::schema::Schema;
use crate::value::Value;

pub(crate) fn encode(schema: &Arc<Schema>, value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    compound::encode_value(schema, value, &mut out);
    out
}
