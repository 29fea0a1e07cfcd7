//! Decoders for the compound schema shapes (spec §4.4): records,
//! products, sums, sequences, and the small connective schemas
//! (`Tuple`, `Optional`, `Either`, `Transform`).
//!
//! Every entry point here decodes a buffer that is exactly one value's
//! own encoding — the top-level buffer passed to [`crate::decode`], or
//! the inner slice of a length-delimited field once its frame length
//! has been stripped. There is no separate "submessage" entry point:
//! recursion into a nested field re-enters [`decode_value`] on that
//! field's slice.

use std::sync::Arc;

use crate::error::{self, Error, Result};
use crate::schema::{Case, Field, Schema, StandardType};
use crate::value::Value;
use crate::wire::{self, RawField, WireType};

use super::scalar::{decode_scalar, wire_type_of};

pub(crate) fn decode_value(schema: &Arc<Schema>, bytes: &[u8]) -> Result<Value> {
    let schema = schema.force();
    tracing::trace!(shape = schema_shape(&schema), len = bytes.len(), "dispatching decode");
    match schema.as_ref() {
        Schema::Primitive(_) | Schema::Sequence { .. } | Schema::Optional { .. } => {
            decode_implicit_field(&schema, bytes)
        }
        Schema::Tuple { left, right } => decode_tuple(left, right, bytes),
        Schema::EitherSchema { left, right } => decode_either(left, right, bytes),
        Schema::Transform { inner, f, .. } => {
            let decoded = decode_value(inner, bytes)?;
            f(decoded).map_err(Error::new)
        }
        Schema::GenericRecord { fields } => {
            let values = decode_fields(fields, bytes, UnknownField::Fail, Duplicates::FirstWins)?;
            Ok(Value::Record(
                fields
                    .iter()
                    .zip(values)
                    .map(|(field, value)| (field.name.clone(), value))
                    .collect(),
            ))
        }
        Schema::Product {
            fields, construct, ..
        } => {
            let values = decode_fields(fields, bytes, UnknownField::Skip, Duplicates::LastWins)?;
            construct(values).map_err(Error::new)
        }
        Schema::Enumeration { cases } | Schema::Sum { cases } => decode_sum(cases, bytes),
        Schema::Fail(message) => Err(Error::new(message.clone())),
        Schema::CaseObject(value) => Ok(value.clone()),
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
        Schema::Sum { .. } => "sum",
        Schema::Enumeration { .. } => "enumeration",
        Schema::Fail(_) => "fail",
        Schema::CaseObject(_) => "case_object",
        Schema::Lazy(_) => "lazy",
    }
}

/// A bare scalar, sequence, or optional sitting at the root has no
/// enclosing message to carry its tag, so it's decoded as if it were
/// the sole field (number 1) of an implicit one-field record — the
/// mirror of `encode_value`'s `encode_field(&schema, value, 1, out)`
/// for these same three shapes.
fn decode_implicit_field(schema: &Arc<Schema>, bytes: &[u8]) -> Result<Value> {
    decode_single_field_envelope(schema, bytes)
}

/// Decode a buffer shaped like a one-field record at position 1 holding
/// a value of `schema`. Used both for the root's implicit envelope and
/// for the inner envelope a present `Optional`/`Sum` occurrence carries
/// (spec's `value`-at-position-1 rule for these schemas).
fn decode_single_field_envelope(schema: &Arc<Schema>, bytes: &[u8]) -> Result<Value> {
    let mut result = None;
    let mut rest = bytes;
    while !rest.is_empty() {
        let (tail, field_number, raw) = wire::decode_field(rest)?;
        if field_number == 1 {
            result = Some(decode_field_occurrence(schema, raw)?);
        }
        rest = tail;
    }
    match result {
        Some(value) => Ok(value),
        None => default_for_missing(schema, 1, "value"),
    }
}

fn default_for_primitive(t: &StandardType) -> Value {
    match t {
        StandardType::Unit => Value::Unit,
        StandardType::Bool => Value::Bool(false),
        StandardType::Short | StandardType::Int | StandardType::Year | StandardType::ZoneOffset | StandardType::Month => {
            Value::I32(0)
        }
        StandardType::Long => Value::I64(0),
        StandardType::Float => Value::F32(0.0),
        StandardType::Double => Value::F64(0.0),
        StandardType::Char => Value::Char('\0'),
        StandardType::Binary => Value::Bytes(bytes::Bytes::new()),
        _ => Value::String(String::new()),
    }
}

/// A tuple's two slots are always required: unlike `GenericRecord`'s or
/// `Product`'s fields, an absent slot never falls back to its own
/// schema's default (spec §4.4/§7 — an absent `left`/`right` occurrence
/// is always `"Error while decoding tuple."`, even when the slot's
/// schema is itself a `Sequence`/`Optional` that would otherwise default
/// for a missing occurrence).
fn decode_tuple(left: &Arc<Schema>, right: &Arc<Schema>, bytes: &[u8]) -> Result<Value> {
    let mut first = None;
    let mut second = None;
    let mut rest = bytes;
    while !rest.is_empty() {
        let (tail, field_number, raw) = wire::decode_field(rest)?;
        rest = tail;
        match field_number {
            1 => first = Some(decode_field_occurrence(left, raw)?),
            2 => second = Some(decode_field_occurrence(right, raw)?),
            _ => {}
        }
    }
    match (first, second) {
        (Some(first), Some(second)) => Ok(Value::Record(vec![
            ("first".to_owned(), first),
            ("second".to_owned(), second),
        ])),
        _ => Err(Error::new(error::ERROR_DECODING_TUPLE)),
    }
}

enum UnknownField {
    Fail,
    Skip,
}

/// How a second occurrence of the same field number is handled.
/// `GenericRecord` keeps its first occurrence and silently drops later
/// ones (spec §4.4); `Product` has no such rule and just stores
/// whatever occurrence decoded most recently, matching the static
/// product's unconditional per-slot assignment.
#[derive(Clone, Copy)]
enum Duplicates {
    FirstWins,
    LastWins,
}

/// Decode every occurrence in `bytes` into positional field slots, then
/// fill in defaults for anything left unset. Field numbers are 1-based
/// positions into `fields`.
fn decode_fields(fields: &[Field], bytes: &[u8], on_unknown: UnknownField, duplicates: Duplicates) -> Result<Vec<Value>> {
    let mut slots: Vec<Option<Value>> = vec![None; fields.len()];
    let mut rest = bytes;
    while !rest.is_empty() {
        let (tail, field_number, raw) = wire::decode_field(rest)?;
        rest = tail;
        let index = field_number as usize;
        if index == 0 || index > fields.len() {
            match on_unknown {
                UnknownField::Fail => return Err(Error::new(error::schema_missing_field_number(field_number as u64))),
                UnknownField::Skip => continue,
            }
        }
        let slot = &mut slots[index - 1];
        if slot.is_some() && matches!(duplicates, Duplicates::FirstWins) {
            continue;
        }
        let field = &fields[index - 1];
        *slot = Some(decode_field_occurrence(&field.schema, raw)?);
    }
    slots
        .into_iter()
        .zip(fields)
        .enumerate()
        .map(|(index, (slot, field))| match slot {
            Some(value) => Ok(value),
            None => default_for_missing(&field.schema, index as u32 + 1, &field.name),
        })
        .collect()
}

fn default_for_missing(schema: &Arc<Schema>, field_number: u32, name: &str) -> Result<Value> {
    match schema.force().as_ref() {
        Schema::Sequence { .. } => Ok(Value::List(Vec::new())),
        Schema::Optional { .. } => Ok(Value::Option(None)),
        Schema::Primitive(t) => Ok(default_for_primitive(t)),
        _ => Err(Error::new(error::missing_field_number(field_number)).with_field(name)),
    }
}

/// Decode one occurrence's payload according to `schema`'s shape: a
/// scalar decodes directly, a nested message/sequence/etc. recurses
/// through [`decode_value`] on the length-delimited payload.
fn decode_field_occurrence(schema: &Arc<Schema>, raw: RawField<'_>) -> Result<Value> {
    let schema = schema.force();
    match schema.as_ref() {
        Schema::Primitive(t) => decode_scalar(t, raw),
        Schema::Sequence { element } => decode_list_payload(element, expect_bytes(raw)?).map(Value::List),
        Schema::Optional { inner } => {
            decode_single_field_envelope(inner, expect_bytes(raw)?).map(|v| Value::Option(Some(Box::new(v))))
        }
        Schema::Transform { inner, f, .. } => {
            let decoded = decode_field_occurrence(inner, raw)?;
            f(decoded).map_err(Error::new)
        }
        _ => decode_value(&schema, expect_bytes(raw)?),
    }
}

fn expect_bytes(raw: RawField<'_>) -> Result<&[u8]> {
    match raw {
        RawField::Bytes(b) => Ok(b),
        _ => Err(Error::new(error::KEY_UNKNOWN_WIRE_TYPE)),
    }
}

/// Decode a packed run of scalar elements out of a single length-
/// delimited occurrence (spec §4.3's packed representation).
fn decode_packed(element: &Arc<Schema>, mut bytes: &[u8]) -> Result<Vec<Value>> {
    let t = match element.force().as_ref() {
        Schema::Primitive(t) => t.clone(),
        _ => return Err(Error::new("Packed sequences require a primitive element.")),
    };
    let mut items = Vec::new();
    while !bytes.is_empty() {
        let raw = match wire_type_of(&t) {
            WireType::VarInt => {
                let (rest, value) = wire::decode_varint(bytes)?;
                bytes = rest;
                RawField::Varint(value)
            }
            WireType::Bit32 => {
                let (rest, value) = wire::decode_fixed32(bytes, error::UNEXPECTED_END_OF_CHUNK)?;
                bytes = rest;
                RawField::Fixed32(value)
            }
            WireType::Bit64 => {
                let (rest, value) = wire::decode_fixed64(bytes, error::UNEXPECTED_END_OF_CHUNK)?;
                bytes = rest;
                RawField::Fixed64(value)
            }
            _ => return Err(Error::new("Packed sequences require a fixed-width element.")),
        };
        items.push(decode_scalar(&t, raw)?);
    }
    Ok(items)
}

/// Decode a sequence field's payload: a packed run of scalars for a
/// packable element, or — for everything else — a concatenation of
/// occurrences tagged with synthetic positional field numbers (1, 2,
/// 3, ... in element order), the same shape a `Product`'s fields take
/// inside their own frame.
fn decode_list_payload(element: &Arc<Schema>, bytes: &[u8]) -> Result<Vec<Value>> {
    if element.can_be_packed() {
        return decode_packed(element, bytes);
    }
    let mut items = Vec::new();
    let mut rest = bytes;
    while !rest.is_empty() {
        let (tail, _field_number, raw) = wire::decode_field(rest)?;
        items.push(decode_field_occurrence(element, raw)?);
        rest = tail;
    }
    Ok(items)
}

fn decode_either(left: &Arc<Schema>, right: &Arc<Schema>, bytes: &[u8]) -> Result<Value> {
    let mut rest = bytes;
    let mut result = None;
    while !rest.is_empty() {
        let (tail, field_number, raw) = wire::decode_field(rest)?;
        rest = tail;
        result = Some(match field_number {
            1 => Value::Left(Box::new(decode_field_occurrence(left, raw)?)),
            2 => Value::Right(Box::new(decode_field_occurrence(right, raw)?)),
            _ => return Err(Error::new(error::FAILED_TO_DECODE_EITHER)),
        });
    }
    result.ok_or_else(|| Error::new(error::FAILED_TO_DECODE_EITHER))
}

/// Decode a oneof-shaped sum: the last field number present wins, and
/// any field number outside the declared cases is an error (spec §4.4).
///
/// Each case's payload is itself enveloped the way a standalone value
/// of its schema would be (its own positional field(s) live inside this
/// occurrence's length-delimited frame) rather than inlined directly at
/// the case's field number — confirmed by the `oneOf` wire vector,
/// where an `IntValue(482)` case decodes as a nested submessage
/// (`{1: 482}`), not a bare varint at the case's own tag.
fn decode_sum(cases: &[Case], bytes: &[u8]) -> Result<Value> {
    let mut rest = bytes;
    let mut result = None;
    while !rest.is_empty() {
        let (tail, field_number, raw) = wire::decode_field(rest)?;
        rest = tail;
        let index = field_number as usize;
        if index == 0 || index > cases.len() {
            return Err(Error::new(error::schema_missing_field_number(field_number as u64)));
        }
        let case = &cases[index - 1];
        let payload = decode_value(&case.schema, expect_bytes(raw)?)?;
        result = Some(Value::EnumCase(case.name.clone(), Box::new(payload)));
    }
    result.ok_or_else(|| Error::new("No case present for sum."))
}
