//! Decoders for the leaf [`StandardType`]s (spec §4.5/§4.6): the scalar
//! primitives plus the calendar and temporal adapters built on `time`.

use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, Weekday};

use crate::error::{self, Error, Result};
use crate::schema::StandardType;
use crate::standard::{Duration, MonthDay, Period, TemporalFormat, YearMonth};
use crate::value::Value;
use crate::wire::{self, RawField, WireType};

/// Decode the payload of a single field occurrence for a scalar
/// `StandardType`, given its already wire-parsed shape.
pub(crate) fn decode_scalar(t: &StandardType, raw: RawField<'_>) -> Result<Value> {
    match t {
        StandardType::Unit => Ok(Value::Unit),
        StandardType::Bool => as_varint(raw).map(|n| Value::Bool(n != 0)),
        StandardType::Short | StandardType::Int => as_varint(raw).map(|n| Value::I32(n as i32)),
        StandardType::Long => as_varint(raw).map(|n| Value::I64(n as i64)),
        StandardType::Float => match raw {
            RawField::Fixed32(bits) => Ok(Value::F32(f32::from_bits(bits))),
            _ => Err(Error::new(error::UNABLE_TO_DECODE_FLOAT)),
        },
        StandardType::Double => match raw {
            RawField::Fixed64(bits) => Ok(Value::F64(f64::from_bits(bits))),
            _ => Err(Error::new(error::UNABLE_TO_DECODE_DOUBLE)),
        },
        StandardType::String => as_bytes(raw).and_then(decode_utf8).map(Value::String),
        StandardType::Binary => {
            as_bytes(raw).map(|b| Value::Bytes(bytes::Bytes::copy_from_slice(b)))
        }
        StandardType::Char => {
            let s = decode_utf8(as_bytes(raw)?)?;
            let c = s
                .chars()
                .next()
                .filter(|_| s.chars().count() == 1)
                .ok_or_else(|| Error::new(error::INVALID_UTF8))?;
            Ok(Value::Char(c))
        }
        StandardType::DayOfWeek => as_varint(raw).map(|n| Value::String(weekday_name(n))),
        StandardType::Month => as_varint(raw).map(|n| Value::I32(n as i32)),
        StandardType::Year => as_varint(raw).map(|n| Value::I32(n as i32)),
        StandardType::ZoneOffset => as_varint(raw).map(|n| Value::I32(n as i32)),
        StandardType::MonthDay => decode_message_pair(as_bytes(raw)?).map(|(month, day)| {
            record_from(MonthDay {
                month: month as i32,
                day: day as i32,
            })
        }),
        StandardType::YearMonth => decode_message_pair(as_bytes(raw)?).map(|(year, month)| {
            record_from(YearMonth {
                year: year as i32,
                month: month as i32,
            })
        }),
        StandardType::Period => decode_period(as_bytes(raw)?),
        StandardType::Duration => decode_duration(as_bytes(raw)?),
        StandardType::ZoneId => as_bytes(raw).and_then(decode_utf8).map(Value::String),
        StandardType::Instant(fmt) => decode_temporal_instant(as_bytes(raw)?, fmt),
        StandardType::LocalDate(fmt) => decode_temporal_string(as_bytes(raw)?, fmt, |s, fmt| {
            Date::parse(s, &fmt.description).map(|_| ())
        }),
        StandardType::LocalTime(fmt) => decode_temporal_string(as_bytes(raw)?, fmt, |s, fmt| {
            Time::parse(s, &fmt.description).map(|_| ())
        }),
        StandardType::LocalDateTime(fmt) => {
            decode_temporal_string(as_bytes(raw)?, fmt, |s, fmt| {
                PrimitiveDateTime::parse(s, &fmt.description).map(|_| ())
            })
        }
        StandardType::OffsetTime(fmt) | StandardType::OffsetDateTime(fmt) => {
            decode_temporal_string(as_bytes(raw)?, fmt, |s, fmt| {
                OffsetDateTime::parse(s, &fmt.description).map(|_| ())
            })
        }
        StandardType::ZonedDateTime(fmt) => decode_temporal_string(as_bytes(raw)?, fmt, |s, fmt| {
            OffsetDateTime::parse(s, &fmt.description).map(|_| ())
        }),
    }
}

fn as_varint(raw: RawField<'_>) -> Result<u64> {
    match raw {
        RawField::Varint(v) => Ok(v),
        _ => Err(Error::new(error::KEY_UNKNOWN_WIRE_TYPE)),
    }
}

fn as_bytes(raw: RawField<'_>) -> Result<&[u8]> {
    match raw {
        RawField::Bytes(b) => Ok(b),
        _ => Err(Error::new(error::KEY_UNKNOWN_WIRE_TYPE)),
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| Error::new(error::INVALID_UTF8))
}

/// `MonthDay`/`YearMonth` are wire-encoded as a two-field submessage;
/// decode both varint fields out of the nested buffer directly rather
/// than routing back through the generic message decoder.
fn decode_message_pair(bytes: &[u8]) -> Result<(u64, u64)> {
    let mut first = 0u64;
    let mut second = 0u64;
    let mut rest = bytes;
    while !rest.is_empty() {
        let (after_key, key) = wire::decode_key(rest)?;
        let (after_value, value) = wire::decode_varint(after_key)?;
        match key.field_number {
            1 => first = value,
            2 => second = value,
            _ => {}
        }
        rest = after_value;
    }
    Ok((first, second))
}

/// `Duration` is wire-encoded as the same `{seconds: long, nanos: int}`
/// two-field submessage as the other composite temporal adapters,
/// rather than a bare varint — a duration's sub-second component would
/// otherwise be silently unrepresentable.
fn decode_duration(bytes: &[u8]) -> Result<Value> {
    let mut duration = Duration::default();
    let mut rest = bytes;
    while !rest.is_empty() {
        let (after_key, key) = wire::decode_key(rest)?;
        let (after_value, value) = wire::decode_varint(after_key)?;
        match key.field_number {
            1 => duration.seconds = value as i64,
            2 => duration.nanos = value as i32,
            _ => {}
        }
        rest = after_value;
    }
    Ok(record_from(duration))
}

fn decode_period(bytes: &[u8]) -> Result<Value> {
    let mut period = Period::default();
    let mut rest = bytes;
    while !rest.is_empty() {
        let (after_key, key) = wire::decode_key(rest)?;
        let (after_value, value) = wire::decode_varint(after_key)?;
        match key.field_number {
            1 => period.years = value as i32,
            2 => period.months = value as i32,
            3 => period.days = value as i32,
            _ => {}
        }
        rest = after_value;
    }
    Ok(record_from(period))
}

fn decode_temporal_string(
    bytes: &[u8],
    fmt: &TemporalFormat,
    validate: impl Fn(&str, &TemporalFormat) -> std::result::Result<(), time::error::Parse>,
) -> Result<Value> {
    let s = decode_utf8(bytes)?;
    validate(&s, fmt).map_err(|_| Error::new(format!("Unable to parse temporal value: {s}")))?;
    Ok(Value::String(s))
}

fn decode_temporal_instant(bytes: &[u8], fmt: &TemporalFormat) -> Result<Value> {
    let s = decode_utf8(bytes)?;
    OffsetDateTime::parse(&s, &fmt.description)
        .map_err(|_| Error::new(format!("Unable to parse temporal value: {s}")))?;
    Ok(Value::String(s))
}

/// `n` is the ISO-8601 day-of-week ordinal (1 = Monday .. 7 = Sunday),
/// matching `time::Weekday::number_from_monday`.
fn weekday_name(n: u64) -> String {
    let day = match n {
        1 => Weekday::Monday,
        2 => Weekday::Tuesday,
        3 => Weekday::Wednesday,
        4 => Weekday::Thursday,
        5 => Weekday::Friday,
        6 => Weekday::Saturday,
        _ => Weekday::Sunday,
    };
    day.to_string()
}

fn record_from(value: impl IntoFields) -> Value {
    Value::Record(value.into_fields())
}

trait IntoFields {
    fn into_fields(self) -> Vec<(String, Value)>;
}

impl IntoFields for MonthDay {
    fn into_fields(self) -> Vec<(String, Value)> {
        vec![
            ("month".to_owned(), Value::I32(self.month)),
            ("day".to_owned(), Value::I32(self.day)),
        ]
    }
}

impl IntoFields for YearMonth {
    fn into_fields(self) -> Vec<(String, Value)> {
        vec![
            ("year".to_owned(), Value::I32(self.year)),
            ("month".to_owned(), Value::I32(self.month)),
        ]
    }
}

impl IntoFields for Period {
    fn into_fields(self) -> Vec<(String, Value)> {
        vec![
            ("years".to_owned(), Value::I32(self.years)),
            ("months".to_owned(), Value::I32(self.months)),
            ("days".to_owned(), Value::I32(self.days)),
        ]
    }
}

impl IntoFields for Duration {
    fn into_fields(self) -> Vec<(String, Value)> {
        vec![
            ("seconds".to_owned(), Value::I64(self.seconds)),
            ("nanos".to_owned(), Value::I32(self.nanos)),
        ]
    }
}

/// The wire type a `StandardType` occupies when a field of this type is
/// present in a parent message.
pub(crate) fn wire_type_of(t: &StandardType) -> WireType {
    match t {
        StandardType::Float => WireType::Bit32,
        StandardType::Double => WireType::Bit64,
        StandardType::String
        | StandardType::Binary
        | StandardType::Char
        | StandardType::ZoneId
        | StandardType::MonthDay
        | StandardType::YearMonth
        | StandardType::Period
        | StandardType::Duration
        | StandardType::Instant(_)
        | StandardType::LocalDate(_)
        | StandardType::LocalTime(_)
        | StandardType::LocalDateTime(_)
        | StandardType::OffsetTime(_)
        | StandardType::OffsetDateTime(_)
        | StandardType::ZonedDateTime(_) => WireType::LengthDelimited,
        _ => WireType::VarInt,
    }
}
