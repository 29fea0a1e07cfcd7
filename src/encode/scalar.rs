//! Encoders for the leaf [`StandardType`]s — the mirror of
//! `decode::scalar`.

use crate::schema::StandardType;
use crate::value::Value;
use crate::wire;

/// Encode the payload of a single field occurrence (no key/tag — the
/// caller writes that). Returns nothing written for `Unit`.
pub(crate) fn encode_scalar(t: &StandardType, value: &Value, out: &mut Vec<u8>) {
    match (t, value) {
        (StandardType::Unit, _) => {}
        (StandardType::Bool, Value::Bool(b)) => wire::encode_varint(*b as u64, out),
        (StandardType::Short, Value::I32(n)) | (StandardType::Int, Value::I32(n)) => {
            wire::encode_varint(*n as i64 as u64, out)
        }
        (StandardType::Long, Value::I64(n)) => wire::encode_varint(*n as u64, out),
        (StandardType::Float, Value::F32(n)) => wire::encode_fixed32(n.to_bits(), out),
        (StandardType::Double, Value::F64(n)) => wire::encode_fixed64(n.to_bits(), out),
        (StandardType::String, Value::String(s)) => out.extend_from_slice(s.as_bytes()),
        (StandardType::Binary, Value::Bytes(b)) => out.extend_from_slice(b),
        (StandardType::Char, Value::Char(c)) => {
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes())
        }
        (StandardType::Year, Value::I32(n)) | (StandardType::Month, Value::I32(n)) => {
            wire::encode_varint(*n as i64 as u64, out)
        }
        (StandardType::ZoneOffset, Value::I32(n)) => wire::encode_varint(*n as i64 as u64, out),
        (StandardType::DayOfWeek, Value::String(s)) => {
            if let Some(n) = weekday_number(s) {
                wire::encode_varint(n, out)
            }
        }
        (StandardType::MonthDay, Value::Record(fields)) => {
            encode_field_pair(fields, "month", 1, out);
            encode_field_pair(fields, "day", 2, out);
        }
        (StandardType::YearMonth, Value::Record(fields)) => {
            encode_field_pair(fields, "year", 1, out);
            encode_field_pair(fields, "month", 2, out);
        }
        (StandardType::Period, Value::Record(fields)) => {
            encode_field_pair(fields, "years", 1, out);
            encode_field_pair(fields, "months", 2, out);
            encode_field_pair(fields, "days", 3, out);
        }
        (StandardType::Duration, Value::Record(fields)) => {
            encode_i64_field(fields, "seconds", 1, out);
            encode_field_pair(fields, "nanos", 2, out);
        }
        (StandardType::ZoneId, Value::String(s)) => out.extend_from_slice(s.as_bytes()),
        (
            StandardType::Instant(_)
            | StandardType::LocalDate(_)
            | StandardType::LocalTime(_)
            | StandardType::LocalDateTime(_)
            | StandardType::OffsetTime(_)
            | StandardType::OffsetDateTime(_)
            | StandardType::ZonedDateTime(_),
            Value::String(s),
        ) => out.extend_from_slice(s.as_bytes()),
        // A value that doesn't match its declared standard type encodes
        // to nothing: the encoder never fails (spec §4.3).
        _ => {}
    }
}

/// Inverse of `decode::scalar::weekday_name`: the ISO-8601 day-of-week
/// ordinal (1 = Monday .. 7 = Sunday) `time::Weekday::number_from_monday`
/// assigns to the name.
fn weekday_number(name: &str) -> Option<u64> {
    let day = match name {
        "Monday" => time::Weekday::Monday,
        "Tuesday" => time::Weekday::Tuesday,
        "Wednesday" => time::Weekday::Wednesday,
        "Thursday" => time::Weekday::Thursday,
        "Friday" => time::Weekday::Friday,
        "Saturday" => time::Weekday::Saturday,
        "Sunday" => time::Weekday::Sunday,
        _ => return None,
    };
    Some(day.number_from_monday() as u64)
}

fn encode_field_pair(fields: &[(String, Value)], name: &str, field_number: u32, out: &mut Vec<u8>) {
    let Some((_, value)) = fields.iter().find(|(n, _)| n == name) else {
        return;
    };
    let Value::I32(n) = value else { return };
    if *n == 0 {
        return;
    }
    wire::encode_tag(field_number, wire::WireType::VarInt, out);
    wire::encode_varint(*n as i64 as u64, out);
}

fn encode_i64_field(fields: &[(String, Value)], name: &str, field_number: u32, out: &mut Vec<u8>) {
    let Some((_, value)) = fields.iter().find(|(n, _)| n == name) else {
        return;
    };
    let Value::I64(n) = value else { return };
    if *n == 0 {
        return;
    }
    wire::encode_tag(field_number, wire::WireType::VarInt, out);
    wire::encode_varint(*n as u64, out);
}
