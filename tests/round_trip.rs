//! Round-trip coverage (spec §8 P1) for the schema shapes the concrete
//! wire vectors don't exercise directly: optionals, eithers, tuples,
//! and multi-arity products.

use std::sync::Arc;

use schemabuf::{decode, encode, Field, Schema, StandardType, Value};

fn roundtrip(schema: &Arc<Schema>, value: &Value) {
    let bytes = encode(schema, value);
    let decoded = decode(schema, &bytes).expect("decode should succeed");
    assert_eq!(&decoded, value);
}

// A record whose sole field is an absent `Optional` encodes to zero
// bytes, and `decode` unconditionally rejects empty input (spec §6.2) —
// so every case below pairs the optional with an always-present
// sibling field to keep the overall buffer non-empty.

#[test]
fn optional_present_and_absent() {
    let schema = Schema::record(vec![
        Field {
            name: "tag".to_owned(),
            schema: Schema::primitive(StandardType::Bool),
        },
        Field {
            name: "maybe".to_owned(),
            schema: Schema::optional(Schema::primitive(StandardType::Int)),
        },
    ]);
    roundtrip(
        &schema,
        &Value::Record(vec![
            ("tag".to_owned(), Value::Bool(true)),
            ("maybe".to_owned(), Value::Option(Some(Box::new(Value::I32(42))))),
        ]),
    );
    roundtrip(
        &schema,
        &Value::Record(vec![
            ("tag".to_owned(), Value::Bool(true)),
            ("maybe".to_owned(), Value::Option(None)),
        ]),
    );
}

#[test]
fn optional_absent_encodes_to_nothing() {
    let schema = Schema::optional(Schema::primitive(StandardType::Int));
    assert!(encode(&schema, &Value::Option(None)).is_empty());
}

#[test]
fn nested_optional_present() {
    let schema = Schema::record(vec![Field {
        name: "tag".to_owned(),
        schema: Schema::optional(Schema::optional(Schema::primitive(StandardType::Bool))),
    }]);
    roundtrip(
        &schema,
        &Value::Record(vec![(
            "tag".to_owned(),
            Value::Option(Some(Box::new(Value::Option(Some(Box::new(Value::Bool(true))))))),
        )]),
    );
}

#[test]
fn either_left_and_right() {
    let schema = Schema::either(
        Schema::primitive(StandardType::Int),
        Schema::primitive(StandardType::String),
    );
    roundtrip(&schema, &Value::Left(Box::new(Value::I32(7))));
    roundtrip(&schema, &Value::Right(Box::new(Value::String("hi".to_owned()))));
}

#[test]
fn tuple_of_two_fields() {
    let schema = Schema::tuple(
        Schema::primitive(StandardType::Int),
        Schema::primitive(StandardType::Bool),
    );
    let value = Value::Record(vec![
        ("first".to_owned(), Value::I32(5)),
        ("second".to_owned(), Value::Bool(true)),
    ]);
    roundtrip(&schema, &value);
}

#[test]
fn product_arity_three_round_trips_and_rejects_missing_field() {
    let fields = vec![
        Field {
            name: "a".to_owned(),
            schema: Schema::primitive(StandardType::Int),
        },
        Field {
            name: "b".to_owned(),
            schema: Schema::primitive(StandardType::String),
        },
        Field {
            name: "c".to_owned(),
            schema: Schema::primitive(StandardType::Bool),
        },
    ];
    let schema = Schema::product(
        fields,
        |values| match &values[..] {
            [Value::I32(a), Value::String(b), Value::Bool(c)] => {
                Ok(Value::Record(vec![
                    ("a".to_owned(), Value::I32(*a)),
                    ("b".to_owned(), Value::String(b.clone())),
                    ("c".to_owned(), Value::Bool(*c)),
                ]))
            }
            _ => Err("expected three fields".to_owned()),
        },
        |value| match value {
            Value::Record(fields) => Ok(fields.iter().map(|(_, v)| v.clone()).collect()),
            _ => Err("expected a record".to_owned()),
        },
    );
    let value = Value::Record(vec![
        ("a".to_owned(), Value::I32(1)),
        ("b".to_owned(), Value::String("x".to_owned())),
        ("c".to_owned(), Value::Bool(false)),
    ]);
    roundtrip(&schema, &value);
}

#[test]
fn generic_record_fails_on_unknown_field_number() {
    let schema = Schema::record(vec![Field {
        name: "x".to_owned(),
        schema: Schema::primitive(StandardType::Int),
    }]);
    // Field number 2 is not declared.
    let bytes: Vec<u8> = vec![0x10, 0x01];
    let err = decode(&schema, &bytes).unwrap_err();
    assert_eq!(err.to_string(), "Schema doesn't contain field number 2.");
}

#[test]
fn generic_record_duplicate_field_number_keeps_first_occurrence() {
    let schema = Schema::record(vec![Field {
        name: "x".to_owned(),
        schema: Schema::primitive(StandardType::Int),
    }]);
    // Field 1 occurs twice: tag 0x08 + varint 5, then tag 0x08 + varint 9.
    let bytes: Vec<u8> = vec![0x08, 0x05, 0x08, 0x09];
    let decoded = decode(&schema, &bytes).unwrap();
    assert_eq!(decoded, Value::Record(vec![("x".to_owned(), Value::I32(5))]));
}

#[test]
fn tuple_missing_slot_is_a_hard_error() {
    let schema = Schema::tuple(
        Schema::primitive(StandardType::Int),
        Schema::primitive(StandardType::Bool),
    );
    // Only field 1 present; field 2 (`second`) never occurs.
    let bytes: Vec<u8> = vec![0x08, 0x05];
    let err = decode(&schema, &bytes).unwrap_err();
    assert_eq!(err.to_string(), "Error while decoding tuple.");
}

#[test]
fn either_rejects_out_of_range_field_number() {
    let schema = Schema::either(
        Schema::primitive(StandardType::Int),
        Schema::primitive(StandardType::String),
    );
    // Field 3 is neither `left` (1) nor `right` (2).
    let bytes: Vec<u8> = vec![0x18, 0x00];
    let err = decode(&schema, &bytes).unwrap_err();
    assert_eq!(err.to_string(), "Failed to decode either.");
}

#[test]
fn day_of_week_round_trips_as_iso_ordinal() {
    let schema = Schema::record(vec![Field {
        name: "day".to_owned(),
        schema: Schema::primitive(StandardType::DayOfWeek),
    }]);
    let value = Value::Record(vec![("day".to_owned(), Value::String("Wednesday".to_owned()))]);
    let bytes = encode(&schema, &value);
    // tag 0x08 (field 1, varint) + varint 3 (ISO ordinal, Monday = 1)
    assert_eq!(bytes, vec![0x08, 0x03]);
    assert_eq!(decode(&schema, &bytes).unwrap(), value);
}

#[test]
fn duration_round_trips_with_nanos() {
    let schema = Schema::record(vec![Field {
        name: "elapsed".to_owned(),
        schema: Schema::primitive(StandardType::Duration),
    }]);
    let value = Value::Record(vec![(
        "elapsed".to_owned(),
        Value::Record(vec![
            ("seconds".to_owned(), Value::I64(5)),
            ("nanos".to_owned(), Value::I32(500_000_000)),
        ]),
    )]);
    roundtrip(&schema, &value);
}

#[test]
fn fail_schema_always_errors_with_its_message() {
    let schema = Schema::fail("intentionally unsupported");
    let err = decode(&schema, &[0x01]).unwrap_err();
    assert_eq!(err.to_string(), "intentionally unsupported");
}

#[test]
fn enumeration_out_of_range_case_is_an_error() {
    let cases = vec![schemabuf::Case {
        name: "OnlyCase".to_owned(),
        schema: Schema::primitive(StandardType::Int),
        deconstruct: std::sync::Arc::new(|v| match v {
            Value::EnumCase(name, payload) if name == "OnlyCase" => Some((**payload).clone()),
            _ => None,
        }),
    }];
    let schema = Schema::enumeration(cases);
    let bytes: Vec<u8> = vec![0x12, 0x00]; // field 2, empty length-delimited
    let err = decode(&schema, &bytes).unwrap_err();
    assert_eq!(err.to_string(), "Schema doesn't contain field number 2.");
}
