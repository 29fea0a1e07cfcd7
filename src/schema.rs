//! The schema model (spec §3): a recursive algebraic description of a
//! data type, built once and shared read-only across every encode/decode
//! call. Schemas carry no mutable state; `Arc` makes cheap sharing across
//! threads and across the recursive schema tree explicit.

use std::sync::Arc;

use crate::value::Value;

/// A field inside a [`Schema::Product`], in declaration order.
#[derive(Clone)]
pub struct Field {
    pub name: String,
    pub schema: Arc<Schema>,
}

/// A named case inside a [`Schema::Sum`] or [`Schema::Enumeration`].
#[derive(Clone)]
pub struct Case {
    pub name: String,
    pub schema: Arc<Schema>,
    /// Probes whether `value` belongs to this case, returning the
    /// case's own payload if so. Spec invariant (IV): exactly one probe
    /// returns `Some` for any value typable by the enclosing sum.
    pub deconstruct: Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>,
}

/// A scalar leaf type, with format information for the temporal types
/// that are wire-encoded as formatted strings (spec §4.5/§4.6).
#[derive(Clone)]
pub enum StandardType {
    Unit,
    Bool,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Binary,
    Char,
    DayOfWeek,
    Month,
    Year,
    ZoneOffset,
    MonthDay,
    YearMonth,
    Period,
    Duration,
    ZoneId,
    /// A string-formatted calendar type, driven by a caller-supplied
    /// `time` format description program.
    Instant(Arc<crate::standard::TemporalFormat>),
    LocalDate(Arc<crate::standard::TemporalFormat>),
    LocalTime(Arc<crate::standard::TemporalFormat>),
    LocalDateTime(Arc<crate::standard::TemporalFormat>),
    OffsetTime(Arc<crate::standard::TemporalFormat>),
    OffsetDateTime(Arc<crate::standard::TemporalFormat>),
    ZonedDateTime(Arc<crate::standard::TemporalFormat>),
}

/// A fallible value transform, `Value -> Result<Value, String>`.
pub type Lens = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// The schema algebra (spec §3).
#[derive(Clone)]
pub enum Schema {
    Primitive(StandardType),
    Sequence {
        element: Arc<Schema>,
    },
    Tuple {
        left: Arc<Schema>,
        right: Arc<Schema>,
    },
    Optional {
        inner: Arc<Schema>,
    },
    EitherSchema {
        left: Arc<Schema>,
        right: Arc<Schema>,
    },
    /// `Transform(inner, f, g)`: `f` runs on decode, `g` runs on encode.
    Transform {
        inner: Arc<Schema>,
        f: Lens,
        g: Lens,
    },
    /// A named-field product whose field list is itself runtime data.
    GenericRecord {
        fields: Vec<Field>,
    },
    /// A runtime-dynamic sum: the value carries exactly one present case.
    Enumeration {
        cases: Vec<Case>,
    },
    /// The generalized `CaseClassN`: an ordered, statically-known field
    /// list plus a `Vec<Value> -> Value` constructor and its inverse.
    /// Per spec's Design Notes, this subsumes the reference's 22
    /// hand-written arity-specific product schemas.
    Product {
        fields: Vec<Field>,
        construct: Arc<dyn Fn(Vec<Value>) -> Result<Value, String> + Send + Sync>,
        extract: Arc<dyn Fn(&Value) -> Result<Vec<Value>, String> + Send + Sync>,
    },
    /// The generalized `EnumN`: a statically-known case list, each probed
    /// by `Case::deconstruct`. Subsumes the reference's arity-specific
    /// sum schemas the same way `Product` subsumes `CaseClassN`.
    Sum {
        cases: Vec<Case>,
    },
    /// Always fails to decode with `message`; encodes to nothing.
    Fail(String),
    /// A zero-field product singleton.
    CaseObject(Value),
    /// Defers construction of a recursive schema until first use, so a
    /// sum or product's sub-schema may reference the parent schema
    /// through an indirection (spec's Design Notes on recursive schemas).
    Lazy(Arc<dyn Fn() -> Arc<Schema> + Send + Sync>),
}

impl Schema {
    pub fn primitive(t: StandardType) -> Arc<Schema> {
        Arc::new(Schema::Primitive(t))
    }

    pub fn sequence(element: Arc<Schema>) -> Arc<Schema> {
        Arc::new(Schema::Sequence { element })
    }

    pub fn tuple(left: Arc<Schema>, right: Arc<Schema>) -> Arc<Schema> {
        Arc::new(Schema::Tuple { left, right })
    }

    pub fn optional(inner: Arc<Schema>) -> Arc<Schema> {
        Arc::new(Schema::Optional { inner })
    }

    pub fn either(left: Arc<Schema>, right: Arc<Schema>) -> Arc<Schema> {
        Arc::new(Schema::EitherSchema { left, right })
    }

    pub fn transform(
        inner: Arc<Schema>,
        f: impl Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
        g: impl Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Arc<Schema> {
        Arc::new(Schema::Transform {
            inner,
            f: Arc::new(f),
            g: Arc::new(g),
        })
    }

    pub fn record(fields: Vec<Field>) -> Arc<Schema> {
        Arc::new(Schema::GenericRecord { fields })
    }

    pub fn enumeration(cases: Vec<Case>) -> Arc<Schema> {
        Arc::new(Schema::Enumeration { cases })
    }

    pub fn product(
        fields: Vec<Field>,
        construct: impl Fn(Vec<Value>) -> Result<Value, String> + Send + Sync + 'static,
        extract: impl Fn(&Value) -> Result<Vec<Value>, String> + Send + Sync + 'static,
    ) -> Arc<Schema> {
        Arc::new(Schema::Product {
            fields,
            construct: Arc::new(construct),
            extract: Arc::new(extract),
        })
    }

    pub fn sum(cases: Vec<Case>) -> Arc<Schema> {
        Arc::new(Schema::Sum { cases })
    }

    pub fn fail(message: impl Into<String>) -> Arc<Schema> {
        Arc::new(Schema::Fail(message.into()))
    }

    pub fn case_object(instance: Value) -> Arc<Schema> {
        Arc::new(Schema::CaseObject(instance))
    }

    pub fn lazy(f: impl Fn() -> Arc<Schema> + Send + Sync + 'static) -> Arc<Schema> {
        Arc::new(Schema::Lazy(Arc::new(f)))
    }

    /// Resolve indirections introduced by [`Schema::lazy`]. A no-op for
    /// every other variant.
    pub(crate) fn force(self: &Arc<Schema>) -> Arc<Schema> {
        match self.as_ref() {
            Schema::Lazy(f) => f().force(),
            _ => self.clone(),
        }
    }

    /// Packability table (spec §4.3): whether a sequence of this element
    /// schema may use the packed, tagless wire representation.
    ///
    /// `char` is forced to `false` here even though the reference
    /// implementation's table says `true`: chars are wire-encoded as
    /// length-delimited UTF-8 strings (§4.5), and a packed frame of
    /// length-delimited elements without intervening tags would be
    /// undecodable. See spec §9's Open Questions.
    pub fn can_be_packed(&self) -> bool {
        match self {
            Schema::Primitive(t) => matches!(
                t,
                StandardType::Bool
                    | StandardType::Short
                    | StandardType::Int
                    | StandardType::Long
                    | StandardType::Float
                    | StandardType::Double
                    | StandardType::DayOfWeek
                    | StandardType::Month
                    | StandardType::Year
                    | StandardType::ZoneOffset
                    | StandardType::Duration
            ),
            Schema::Sequence { element } => element.can_be_packed(),
            Schema::Transform { inner, .. } => inner.can_be_packed(),
            Schema::Lazy(f) => f().can_be_packed(),
            _ => false,
        }
    }
}
