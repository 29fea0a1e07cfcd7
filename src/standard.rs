//! Shared definitions for the standard-type adapters (spec §4.5/§4.6):
//! the small calendar value shapes `time` doesn't model directly, and the
//! caller-supplied formatter carried inside a string-formatted temporal
//! `StandardType`.

use time::format_description::OwnedFormatItem;

/// A year-month-day-free calendar pair, wire-encoded as `{month, day}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthDay {
    pub month: i32,
    pub day: i32,
}

/// Wire-encoded as `{year, month}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YearMonth {
    pub year: i32,
    pub month: i32,
}

/// Wire-encoded as `{years, months, days}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Period {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

/// Wire-encoded as `{seconds, nanos}`, the same shape `prost_types`'s
/// well-known `Duration` message uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    pub seconds: i64,
    pub nanos: i32,
}

/// A caller-supplied formatter for a string-encoded temporal type,
/// stored inside the `StandardType` descriptor the way spec §4.5
/// describes ("string formatted by a caller-supplied formatter carried
/// inside the standard-type descriptor").
pub struct TemporalFormat {
    pub description: OwnedFormatItem,
}

impl TemporalFormat {
    pub fn new(description: OwnedFormatItem) -> Self {
        Self { description }
    }

    /// The standard ISO-8601-ish default used when no formatter is given.
    pub fn iso() -> Self {
        Self::new(
            time::format_description::parse_owned::<2>(
                "[year]-[month]-[day]T[hour]:[minute]:[second]",
            )
            .expect("static format description"),
        )
    }
}
