//! Encoders for the compound schema shapes — the mirror of
//! `decode::compound`. The encoder never fails (spec §4.3): a value
//! that doesn't fit its schema silently encodes to nothing rather than
//! raising an error, the same way a missing optional field does.

use std::sync::Arc;

use crate::schema::{Case, Field, Schema, StandardType};
use crate::value::Value;
use crate::wire::{self, WireType};

use crate::decode::scalar::wire_type_of;

use super::scalar::encode_scalar;

pub(crate) fn encode_value(schema: &Arc<Schema>, value: &Value, out: &mut Vec<u8>) {
    let schema = schema.force();
    tracing::trace!(shape = schema_shape(&schema), "dispatching encode");
    match schema.as_ref() {
        Schema::Primitive(_) | Schema::Sequence { .. } | Schema::Optional { .. } => {
            encode_field(&schema, value, 1, out)
        }
        Schema::Tuple { left, right } => {
            if let Value::Record(fields) = value {
                if let Some((_, l)) = fields.first() {
                    encode_field(left, l, 1, out);
                }
                if let Some((_, r)) = fields.get(1) {
                    encode_field(right, r, 2, out);
                }
            }
        }
        Schema::EitherSchema { left, right } => match value {
            Value::Left(v) => encode_field(left, v, 1, out),
            Value::Right(v) => encode_field(right, v, 2, out),
            _ => {}
        },
        Schema::Transform { inner, g, .. } => {
            if let Ok(transformed) = g(value.clone()) {
                encode_value(inner, &transformed, out)
            }
        }
        Schema::GenericRecord { fields } => {
            if let Value::Record(entries) = value {
                encode_fields(fields, entries, out)
            }
        }
        Schema::Product { fields, extract, .. } => {
            if let Ok(values) = extract(value) {
                for (index, (field, v)) in fields.iter().zip(values.iter()).enumerate() {
                    encode_field(&field.schema, v, index as u32 + 1, out);
                }
            }
        }
        Schema::Enumeration { cases } | Schema::Sum { cases } => encode_sum(cases, value, out),
        Schema::Fail(_) => {}
        Schema::CaseObject(_) => {}
        Schema::Lazy(_) => unreachable!("force() resolves Lazy before dispatch"),
    }
}

/// A short, stable label for trace logs — not exhaustive over every
/// payload shape, just enough to tell dispatch branches apart.
fn schema_shape(schema: &Schema) -> &'static str {
    match schema {
        Schema::Primitive(_) => "primitive",
        Schema::Sequence { .. } => "sequence",
        Schema::Tuple { .. } => "tuple",
        Schema::Optional { .. } => "optional",
        Schema::EitherSchema { .. } => "either",
        Schema::Transform { .. } => "transform",
        Schema::GenericRecord { .. } => "generic_record",
        Schema::Product { .. } => "product",
        Schema::Sum { .. } | Schema::Enumeration { .. } => "sum",
        Schema::Fail(_) => "fail",
        Schema::CaseObject(_) => "case_object",
        Schema::Lazy(_) => "lazy",
    }
}

fn encode_fields(fields: &[Field], entries: &[(String, Value)], out: &mut Vec<u8>) {
    for (index, field) in fields.iter().enumerate() {
        let Some((_, value)) = entries.iter().find(|(name, _)| *name == field.name) else {
            continue;
        };
        encode_field(&field.schema, value, index as u32 + 1, out);
    }
}

/// Each case's payload is enveloped via `encode_value` (giving a
/// primitive case its own implicit position-1 field inside the frame)
/// rather than inlined at the case's tag — see `decode_sum`.
fn encode_sum(cases: &[Case], value: &Value, out: &mut Vec<u8>) {
    for (index, case) in cases.iter().enumerate() {
        if let Some(payload) = (case.deconstruct)(value) {
            let mut buf = Vec::new();
            encode_value(&case.schema, &payload, &mut buf);
            write_length_delimited(index as u32 + 1, &buf, out);
            return;
        }
    }
}

/// Write zero or more (tag, payload) pairs for `value` under
/// `field_number` inside a parent message.
fn encode_field(schema: &Arc<Schema>, value: &Value, field_number: u32, out: &mut Vec<u8>) {
    let schema = schema.force();
    match schema.as_ref() {
        Schema::Primitive(t) => encode_scalar_field(t, value, field_number, out),
        Schema::Sequence { element } => encode_sequence_field(element, value, field_number, out),
        Schema::Optional { inner } => {
            if let Value::Option(Some(inner_value)) = value {
                let mut payload = Vec::new();
                encode_field(inner, inner_value, 1, &mut payload);
                write_length_delimited(field_number, &payload, out);
            }
        }
        Schema::Transform { inner, g, .. } => {
            if let Ok(transformed) = g(value.clone()) {
                encode_field(inner, &transformed, field_number, out)
            }
        }
        _ => {
            let mut payload = Vec::new();
            encode_value(&schema, value, &mut payload);
            write_length_delimited(field_number, &payload, out);
        }
    }
}

fn encode_scalar_field(t: &StandardType, value: &Value, field_number: u32, out: &mut Vec<u8>) {
    if matches!(t, StandardType::Unit) {
        return;
    }
    match wire_type_of(t) {
        WireType::LengthDelimited => {
            let mut payload = Vec::new();
            encode_scalar(t, value, &mut payload);
            write_length_delimited(field_number, &payload, out);
        }
        wire_type => {
            wire::encode_tag(field_number, wire_type, out);
            encode_scalar(t, value, out);
        }
    }
}

/// A list field is always one occurrence: a length-delimited frame at
/// its own field number, carrying either a packed run of scalars or
/// (for anything that can't be packed) a concatenation of its elements
/// each tagged with a synthetic positional field number — the same
/// framing a `Product`'s fields use inside their own message.
fn encode_sequence_field(element: &Arc<Schema>, value: &Value, field_number: u32, out: &mut Vec<u8>) {
    let Value::List(items) = value else { return };
    if items.is_empty() {
        return;
    }
    let mut payload = Vec::new();
    if element.can_be_packed() {
        if let Schema::Primitive(t) = element.force().as_ref() {
            for item in items {
                encode_scalar(t, item, &mut payload);
            }
        }
    } else {
        for (index, item) in items.iter().enumerate() {
            encode_field(element, item, index as u32 + 1, &mut payload);
        }
    }
    write_length_delimited(field_number, &payload, out);
}

fn write_length_delimited(field_number: u32, payload: &[u8], out: &mut Vec<u8>) {
    wire::encode_tag(field_number, WireType::LengthDelimited, out);
    wire::encode_varint(payload.len() as u64, out);
    out.extend_from_slice(payload);
}
