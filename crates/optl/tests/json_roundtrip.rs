//! JSON round trips over every supported kind.

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use optl::{Optional, OptionalError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Dto {
    field1: Optional<String>,
    field2: Optional<i32>,
}

fn assert_roundtrip<T>(value: T)
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    let original = Optional::of(value);
    let bytes = original.marshal_json().unwrap();

    let mut decoded = Optional::<T>::empty();
    decoded.unmarshal_json(&bytes).unwrap();
    assert_eq!(decoded, original);

    let via_serde: Optional<T> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(via_serde, original);
}

fn assert_empty_roundtrip<T>()
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    let bytes = Optional::<T>::empty().marshal_json().unwrap();
    assert_eq!(bytes, b"null");

    let mut decoded = Optional::<T>::empty();
    decoded.unmarshal_json(&bytes).unwrap();
    assert_eq!(decoded, Optional::empty());
}

#[rstest]
#[case::greeting("Hello optional")]
#[case::blank("")]
#[case::unicode("héllo wörld ✓")]
#[case::looks_like_null("null")]
fn string_roundtrip(#[case] text: &str) {
    assert_roundtrip(text.to_string());
}

#[rstest]
#[case::one(1)]
#[case::negative(-42)]
#[case::max(i64::MAX)]
#[case::min(i64::MIN)]
fn i64_roundtrip(#[case] value: i64) {
    assert_roundtrip(value);
}

#[test]
fn narrow_integers_roundtrip() {
    assert_roundtrip(1_i8);
    assert_roundtrip(i8::MIN);
    assert_roundtrip(1_i16);
    assert_roundtrip(i16::MAX);
    assert_roundtrip(1_i32);
    assert_roundtrip(i32::MIN);
}

#[test]
fn floats_roundtrip() {
    assert_roundtrip(1.5_f32);
    assert_roundtrip(1.5_f64);
    assert_roundtrip(-1234.5_f64);
}

#[rstest]
#[case(true)]
#[case(false)]
fn bool_roundtrip(#[case] value: bool) {
    assert_roundtrip(value);
}

#[test]
fn datetime_roundtrip() {
    assert_roundtrip(Utc::now());
    assert_roundtrip(DateTime::parse_from_rfc3339("2023-11-14T08:30:00-05:00").unwrap());
}

#[derive(Debug, Serialize)]
struct Measurement {
    label: String,
    reading: f64,
}

#[rstest]
#[case::nan(f64::NAN)]
#[case::positive_infinity(f64::INFINITY)]
#[case::negative_infinity(f64::NEG_INFINITY)]
fn non_finite_float_fails_to_marshal(#[case] v: f64) {
    let err = Optional::of(v).marshal_json().unwrap_err();
    assert!(matches!(err, OptionalError::Conversion(_)));

    let nested = Optional::of(Measurement {
        label: "sensor-a".into(),
        reading: v,
    });
    assert!(nested.marshal_json().is_err());
}

#[test]
fn bytes_roundtrip() {
    assert_roundtrip(vec![1_u8, 2, 3]);
    assert_roundtrip(Vec::<u8>::new());
}

#[test]
fn struct_with_nested_optionals_roundtrip() {
    assert_roundtrip(Dto {
        field1: Optional::of("Text ...".to_string()),
        field2: Optional::of(1),
    });
}

#[test]
fn empty_roundtrip_for_every_kind() {
    assert_empty_roundtrip::<String>();
    assert_empty_roundtrip::<i8>();
    assert_empty_roundtrip::<i16>();
    assert_empty_roundtrip::<i32>();
    assert_empty_roundtrip::<i64>();
    assert_empty_roundtrip::<f32>();
    assert_empty_roundtrip::<f64>();
    assert_empty_roundtrip::<bool>();
    assert_empty_roundtrip::<DateTime<Utc>>();
    assert_empty_roundtrip::<Vec<u8>>();
    assert_empty_roundtrip::<Dto>();
}

#[test]
fn dto_with_empty_field_roundtrip() {
    let dto = Dto {
        field1: Optional::of("text".to_string()),
        field2: Optional::empty(),
    };

    let json = serde_json::to_string(&Optional::of(dto)).unwrap();
    assert_eq!(json, r#"{"field1":"text","field2":null}"#);

    let mut decoded = Optional::<Dto>::empty();
    decoded.unmarshal_json(json.as_bytes()).unwrap();

    let decoded = decoded.get();
    assert_eq!(decoded.field1, Optional::of("text".to_string()));
    assert!(decoded.field2.is_empty());
}

#[test]
fn missing_field_is_empty() {
    let dto: Dto = serde_json::from_str(r#"{"field1":"only"}"#).unwrap();
    assert_eq!(dto.field1, Optional::of("only".to_string()));
    assert_eq!(dto.field2, Optional::empty());
}

#[test]
fn skip_serializing_empty_fields() {
    #[derive(Serialize)]
    struct Patch {
        #[serde(skip_serializing_if = "Optional::is_empty")]
        name: Optional<String>,
        #[serde(skip_serializing_if = "Optional::is_empty")]
        limit: Optional<i64>,
    }

    let patch = Patch {
        name: Optional::of("renamed".to_string()),
        limit: Optional::empty(),
    };
    assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"name":"renamed"}"#);
}

#[rstest]
#[case::wrong_type(br#""not a number""#.as_slice())]
#[case::truncated(b"12,".as_slice())]
#[case::out_of_range(b"70000".as_slice())]
fn unmarshal_failure_leaves_receiver_empty(#[case] input: &[u8]) {
    let mut op = Optional::of(7_i16);
    assert!(op.unmarshal_json(input).is_err());
    assert!(op.is_empty());
}
