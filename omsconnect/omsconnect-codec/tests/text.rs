use chrono::{DateTime, Utc};
use omsconnect_codec::{
    ParseError, ValueBox,
    text::{MAX_NESTING_DEPTH, parse, print, try_parse_collection},
};
use omsconnect_core::{Schema, SchemaBuilder, Value, logical};

fn instant(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).expect("valid instant")
}

#[test]
fn scalars_take_narrowest_schema() {
    let cases = [
        ("7", Schema::int8(), Value::Int8(7)),
        ("-300", Schema::int16(), Value::Int16(-300)),
        ("70000", Schema::int32(), Value::Int32(70000)),
        ("5000000000", Schema::int64(), Value::Int64(5_000_000_000)),
        ("4.5", Schema::float64(), Value::Float64(4.5)),
        ("1.0", Schema::int8(), Value::Int8(1)),
        ("true", Schema::boolean(), Value::Bool(true)),
    ];
    for (text, schema, value) in cases {
        let parsed = parse(text);
        assert_eq!(parsed.schema(), Some(&schema), "schema of {text}");
        assert_eq!(parsed.value(), &value, "value of {text}");
    }
}

#[test]
fn top_level_null_is_a_string() {
    let parsed = parse("null");
    assert_eq!(parsed.schema(), Some(&Schema::string()));
    assert_eq!(parsed.value(), &Value::string("null"));

    let nested = parse("[null]");
    assert_eq!(nested.value(), &Value::List(vec![Value::Null]));
}

#[test]
fn out_of_range_exponent_is_a_string() {
    let text = "1.5e-9223372036854775807";
    let parsed = parse(text);
    assert_eq!(parsed.schema(), Some(&Schema::string()));
    assert_eq!(parsed.value(), &Value::string(text));
}

#[test]
fn top_level_string_is_kept_verbatim() {
    let parsed = parse("  hello, world ");
    assert_eq!(parsed.schema(), Some(&Schema::string()));
    assert_eq!(parsed.value(), &Value::string("  hello, world "));

    assert_eq!(parse("").value(), &Value::string(""));
}

#[test]
fn map_with_string_keys() {
    let parsed = parse(r#"{"a":15}"#);
    assert_eq!(
        parsed.schema(),
        Some(&SchemaBuilder::map(Schema::string(), Schema::int8()).build())
    );
    assert_eq!(
        parsed.value().map_get(&Value::string("a")),
        Some(&Value::Int8(15))
    );
    assert_eq!(parsed.to_string(), r#"{"a":15}"#);
}

#[test]
fn mixed_array_stays_untyped() {
    let parsed = parse(r#"[1, 2, 3, "four"]"#);
    assert_eq!(parsed.schema(), None);
    assert_eq!(
        parsed.value(),
        &Value::List(vec![
            Value::Int8(1),
            Value::Int8(2),
            Value::Int8(3),
            Value::string("four"),
        ])
    );
}

#[test]
fn numeric_elements_widen_to_common_schema() {
    let parsed = parse("[1, 2, 300000, 4.5]");
    assert_eq!(
        parsed.schema(),
        Some(&SchemaBuilder::array(Schema::float64()).build())
    );
    assert_eq!(print(parsed.value()), "[1.0,2.0,300000.0,4.5]");
}

#[test]
fn nulls_make_elements_optional() {
    let parsed = parse("[1, null, 2]");
    assert_eq!(
        parsed.schema(),
        Some(&SchemaBuilder::array(Schema::optional_int8()).build())
    );
    assert_eq!(parsed.to_string(), "[1,null,2]");
}

#[test]
fn map_with_only_null_values_keeps_entry_types() {
    let parsed = parse("{1:null,300:null}");
    assert_eq!(parsed.schema(), None);
    assert_eq!(
        parsed.value(),
        &Value::Map(vec![
            (Value::Int8(1), Value::Null),
            (Value::Int16(300), Value::Null),
        ])
    );
}

#[test]
fn empty_collections_are_untyped() {
    assert_eq!(parse("[]").schema(), None);
    assert_eq!(parse("[]").value(), &Value::List(Vec::new()));
    assert_eq!(parse("{}").value(), &Value::Map(Vec::new()));
}

#[test]
fn malformed_collections_fall_back_to_string() {
    for text in ["[1,2", "{a:}", "[1,,2]", "[1] trailing", "[[1,2, 3]"] {
        let parsed = parse(text);
        assert_eq!(parsed.schema(), Some(&Schema::string()), "{text}");
        assert_eq!(parsed.value(), &Value::string(text));
    }
}

#[test]
fn nesting_is_bounded() {
    let nested = |depth: usize| format!("{}{}", "[".repeat(depth), "]".repeat(depth));

    let deepest = parse(&nested(MAX_NESTING_DEPTH));
    assert_eq!(deepest.schema(), None);
    assert!(matches!(deepest.value(), Value::List(_)));

    let too_deep = nested(MAX_NESTING_DEPTH + 1);
    assert_eq!(parse(&too_deep).value(), &Value::string(too_deep.as_str()));
    assert!(matches!(
        try_parse_collection(&too_deep),
        Err(ParseError::MalformedArray { position, .. }) if position == MAX_NESTING_DEPTH
    ));

    let unbalanced = "{a:".repeat(100_000);
    assert_eq!(parse(&unbalanced).schema(), Some(&Schema::string()));
    let unbalanced = "[".repeat(100_000);
    assert_eq!(parse(&unbalanced).value(), &Value::string(unbalanced.as_str()));
}

#[test]
fn quoted_strings_keep_whitespace_and_escapes() {
    let parsed = parse(r#"[" a b ", "say \"hi\"", "c:\\d"]"#);
    assert_eq!(
        parsed.value(),
        &Value::List(vec![
            Value::string(" a b "),
            Value::string(r#"say "hi""#),
            Value::string(r"c:\d"),
        ])
    );
    assert_eq!(parsed.to_string(), r#"[" a b ","say \"hi\"","c:\\d"]"#);
}

#[test]
fn bare_tokens_inside_collections_are_strings() {
    let parsed = parse("{k: v, other: 2}");
    assert_eq!(parsed.schema(), None);
    assert_eq!(
        parsed.value().map_get(&Value::string("k")),
        Some(&Value::string("v"))
    );
}

#[test]
fn duplicate_keys_replace_in_place() {
    let parsed = parse(r#"{"a":1,"b":2,"a":3}"#);
    assert_eq!(
        parsed.value(),
        &Value::Map(vec![
            (Value::string("a"), Value::Int8(3)),
            (Value::string("b"), Value::Int8(2)),
        ])
    );
}

#[test]
fn temporal_literals() {
    let date = parse("2024-01-31");
    assert_eq!(date.schema(), Some(&logical::date::schema()));
    assert_eq!(date.value(), &Value::DateTime(instant(1_706_659_200_000)));
    assert_eq!(date.to_string(), "2024-01-31");

    let time = parse("12:30:00.000Z");
    assert_eq!(time.schema(), Some(&logical::time::schema()));
    assert_eq!(time.value(), &Value::DateTime(instant(45_000_000)));

    let stamp = parse("2024-01-31T12:30:00.250Z");
    assert_eq!(stamp.schema(), Some(&logical::timestamp::schema()));
    assert_eq!(stamp.to_string(), "2024-01-31T12:30:00.250Z");
}

#[test]
fn temporal_literals_inside_collections() {
    let parsed = parse("[2024-01-31T12:30:00.000Z, 2024-02-01T00:00:00.001Z]");
    assert_eq!(
        parsed.schema(),
        Some(&SchemaBuilder::array(logical::timestamp::schema()).build())
    );

    let parsed = parse("{start: 12:30:00.000Z}");
    assert_eq!(
        parsed.value().map_get(&Value::string("start")),
        Some(&Value::DateTime(instant(45_000_000)))
    );
}

#[test]
fn printing_parsed_text_is_stable() {
    let inputs = [
        "[1, 2, 300000, 4.5]",
        r#"{"k":"quoted \"text\"", "n": null}"#,
        "[[1,2],[3,4]]",
        "{a: [1, 2], b: {c: true}}",
        "[2024-01-31, 2024-02-01]",
        "[1.5, 2]",
        "just text",
        "-12",
    ];
    for text in inputs {
        let once = print(parse(text).value());
        let twice = print(parse(&once).value());
        assert_eq!(twice, once, "{text}");
    }
}

#[test]
fn strict_collection_errors() {
    assert!(matches!(
        try_parse_collection("[1,,2]"),
        Err(ParseError::MalformedArray { position: 3, .. })
    ));
    assert!(matches!(
        try_parse_collection("[1,2,]"),
        Err(ParseError::MalformedArray { .. })
    ));
    assert!(matches!(
        try_parse_collection(r#"{"a" 1}"#),
        Err(ParseError::MalformedMap { .. })
    ));
    assert!(matches!(
        try_parse_collection("{null: 1}"),
        Err(ParseError::MalformedMap { .. })
    ));
    assert!(matches!(
        try_parse_collection(r#"["abc]"#),
        Err(ParseError::UnterminatedString { position: 1 })
    ));
    assert_eq!(
        try_parse_collection("[1] x"),
        Err(ParseError::TrailingInput { position: 3 })
    );
    assert_eq!(
        try_parse_collection("abc"),
        Err(ParseError::UnexpectedToken {
            token: "abc".to_string(),
            position: 0,
        })
    );
    assert_eq!(try_parse_collection("  "), Err(ParseError::UnexpectedEnd));
}

#[test]
fn strict_and_lenient_agree_on_valid_input() {
    let text = "{x: [1, 2]}";
    assert_eq!(try_parse_collection(text), Ok(ValueBox::parse(text)));
}
