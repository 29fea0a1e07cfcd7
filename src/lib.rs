//! A schema-driven Protocol Buffers codec: given a runtime [`Schema`]
//! value describing a type's shape, [`encode`] and [`decode`] convert
//! between that shape and the Protobuf wire format without any
//! compile-time code generation.
//!
//! The schema a caller builds from [`Schema`]'s constructors is an
//! ordinary value, not a derived trait impl — the same way the
//! reference design this crate grew out of treats a message's shape as
//! data. Bridging a concrete application type to and from the dynamic
//! [`Value`] domain this codec operates over is left to
//! [`Schema::transform`].

mod decode;
mod encode;
mod error;
mod schema;
mod standard;
mod value;
mod wire;

use std::sync::Arc;

pub use error::{Error, Result};
pub use schema::{Case, Field, Lens, Schema, StandardType};
pub use standard::{Duration, MonthDay, Period, TemporalFormat, YearMonth};
pub use value::Value;

/// Encode `value` according to `schema`.
///
/// Encoding never fails: a value that doesn't match the shape `schema`
/// describes contributes nothing to the output for the mismatched
/// parts, rather than raising an error (spec §4.3). Validate values
/// against their schema ahead of time if that matters to the caller.
#[tracing::instrument(level = "trace", skip_all)]
pub fn encode(schema: &Arc<Schema>, value: &Value) -> Vec<u8> {
    let bytes = encode::encode(schema, value);
    tracing::trace!(len = bytes.len(), "encoded value");
    bytes
}

/// Decode `bytes` according to `schema`.
#[tracing::instrument(level = "trace", skip_all)]
pub fn decode(schema: &Arc<Schema>, bytes: &[u8]) -> Result<Value> {
    let result = decode::decode(schema, bytes);
    if let Err(err) = &result {
        tracing::debug!(error = %err, "decode failed");
    }
    result
}
