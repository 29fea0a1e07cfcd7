//! Concrete wire-format vectors, decoded and round-tripped through
//! [`schemabuf::encode`]/[`schemabuf::decode`]. Each vector here is a
//! literal example a reviewer can check by hand against the hex bytes
//! in the comment.

use std::sync::Arc;

use schemabuf::{decode, encode, Case, Field, Schema, StandardType, Value};

fn int_record(field_name: &str) -> Arc<Schema> {
    Schema::record(vec![Field {
        name: field_name.to_owned(),
        schema: Schema::primitive(StandardType::Int),
    }])
}

#[test]
fn record_with_int_150() {
    // tag 0x08 (field 1, varint) + varint 150 = 0x96 0x01
    let bytes = hex("089601");
    let schema = int_record("value");
    let expected = Value::Record(vec![("value".to_owned(), Value::I32(150))]);
    assert_eq!(decode(&schema, &bytes).unwrap(), expected);
    assert_eq!(encode(&schema, &expected), bytes);
}

#[test]
fn record_with_string_testing() {
    // tag 0x0A (field 1, length-delimited) + len 7 + "testing"
    let bytes = hex("0A0774657374696E67");
    let schema = Schema::record(vec![Field {
        name: "value".to_owned(),
        schema: Schema::primitive(StandardType::String),
    }]);
    let expected = Value::Record(vec![("value".to_owned(), Value::String("testing".to_owned()))]);
    assert_eq!(decode(&schema, &bytes).unwrap(), expected);
    assert_eq!(encode(&schema, &expected), bytes);
}

#[test]
fn record_with_float_0_001() {
    let bytes = hex("0D6F12833A");
    let schema = Schema::record(vec![Field {
        name: "value".to_owned(),
        schema: Schema::primitive(StandardType::Float),
    }]);
    let decoded = decode(&schema, &bytes).unwrap();
    let Value::Record(fields) = &decoded else {
        panic!("expected record");
    };
    let Value::F32(n) = fields[0].1 else {
        panic!("expected float field");
    };
    assert!((n - 0.001).abs() < 1e-6);
    assert_eq!(encode(&schema, &decoded), bytes);
}

#[test]
fn record_with_double_0_001() {
    let bytes = hex("09FCA9F1D24D62503F");
    let schema = Schema::record(vec![Field {
        name: "value".to_owned(),
        schema: Schema::primitive(StandardType::Double),
    }]);
    let decoded = decode(&schema, &bytes).unwrap();
    let Value::Record(fields) = &decoded else {
        panic!("expected record");
    };
    let Value::F64(n) = fields[0].1 else {
        panic!("expected double field");
    };
    assert!((n - 0.001).abs() < 1e-12);
    assert_eq!(encode(&schema, &decoded), bytes);
}

#[test]
fn embedded_record() {
    // outer tag 0x0A, len 3, inner record { value: Int = 150 }
    let bytes = hex("0A03089601");
    let inner = int_record("value");
    let schema = Schema::record(vec![Field {
        name: "embedded".to_owned(),
        schema: inner,
    }]);
    let expected = Value::Record(vec![(
        "embedded".to_owned(),
        Value::Record(vec![("value".to_owned(), Value::I32(150))]),
    )]);
    assert_eq!(decode(&schema, &bytes).unwrap(), expected);
    assert_eq!(encode(&schema, &expected), bytes);
}

#[test]
fn packed_int_list() {
    // tag 0x0A, len 6, packed varints 3, 270, 86942
    let bytes = hex("0A06038E029EA705");
    let schema = Schema::record(vec![Field {
        name: "packed".to_owned(),
        schema: Schema::sequence(Schema::primitive(StandardType::Int)),
    }]);
    let expected = Value::Record(vec![(
        "packed".to_owned(),
        Value::List(vec![Value::I32(3), Value::I32(270), Value::I32(86942)]),
    )]);
    assert_eq!(decode(&schema, &bytes).unwrap(), expected);
    assert_eq!(encode(&schema, &expected), bytes);
}

#[test]
fn unpacked_string_list() {
    // tag 0x0A, len 15, then three length-delimited elements tagged
    // 1, 2, 3 inside that one frame ("foo", "bar", "baz").
    let bytes = hex("0A0F0A03666F6F12036261721A0362617A");
    let schema = Schema::record(vec![Field {
        name: "items".to_owned(),
        schema: Schema::sequence(Schema::primitive(StandardType::String)),
    }]);
    let expected = Value::Record(vec![(
        "items".to_owned(),
        Value::List(vec![
            Value::String("foo".to_owned()),
            Value::String("bar".to_owned()),
            Value::String("baz".to_owned()),
        ]),
    )]);
    assert_eq!(decode(&schema, &bytes).unwrap(), expected);
    assert_eq!(encode(&schema, &expected), bytes);
}

#[test]
fn two_field_record() {
    let bytes = hex("0A03466F6F107B");
    let schema = Schema::record(vec![
        Field {
            name: "name".to_owned(),
            schema: Schema::primitive(StandardType::String),
        },
        Field {
            name: "value".to_owned(),
            schema: Schema::primitive(StandardType::Int),
        },
    ]);
    let expected = Value::Record(vec![
        ("name".to_owned(), Value::String("Foo".to_owned())),
        ("value".to_owned(), Value::I32(123)),
    ]);
    assert_eq!(decode(&schema, &bytes).unwrap(), expected);
    assert_eq!(encode(&schema, &expected), bytes);
}

#[test]
fn one_of_int_case() {
    // Record{oneOf = IntValue(482)}, OneOf = StringValue|IntValue|BooleanValue
    let bytes = hex("0A05120308E203");
    let sum = Schema::sum(vec![
        Case {
            name: "StringValue".to_owned(),
            schema: Schema::primitive(StandardType::String),
            deconstruct: Arc::new(|v| match v {
                Value::EnumCase(name, payload) if name == "StringValue" => Some((**payload).clone()),
                _ => None,
            }),
        },
        Case {
            name: "IntValue".to_owned(),
            schema: Schema::primitive(StandardType::Int),
            deconstruct: Arc::new(|v| match v {
                Value::EnumCase(name, payload) if name == "IntValue" => Some((**payload).clone()),
                _ => None,
            }),
        },
        Case {
            name: "BooleanValue".to_owned(),
            schema: Schema::primitive(StandardType::Bool),
            deconstruct: Arc::new(|v| match v {
                Value::EnumCase(name, payload) if name == "BooleanValue" => Some((**payload).clone()),
                _ => None,
            }),
        },
    ]);
    let schema = Schema::record(vec![Field {
        name: "oneOf".to_owned(),
        schema: sum,
    }]);
    let expected = Value::Record(vec![(
        "oneOf".to_owned(),
        Value::EnumCase("IntValue".to_owned(), Box::new(Value::I32(482))),
    )]);
    assert_eq!(decode(&schema, &bytes).unwrap(), expected);
    assert_eq!(encode(&schema, &expected), bytes);
}

#[test]
fn rejects_unknown_wire_type() {
    let schema = int_record("value");
    let err = decode(&schema, &hex("0F")).unwrap_err();
    assert_eq!(err.to_string(), "Failed decoding key: unknown wire type");
}

#[test]
fn rejects_field_number_zero() {
    let schema = int_record("value");
    let err = decode(&schema, &hex("00")).unwrap_err();
    assert_eq!(err.to_string(), "Failed decoding key: invalid field number");
}

#[test]
fn rejects_truncated_length_delimited() {
    let schema = int_record("value");
    let err = decode(&schema, &hex("0A0346")).unwrap_err();
    assert_eq!(err.to_string(), "Unexpected end of bytes");
}

#[test]
fn rejects_truncated_varint() {
    let schema = int_record("value");
    let err = decode(&schema, &hex("10FF")).unwrap_err();
    assert_eq!(err.to_string(), "Unexpected end of chunk");
}

fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}
