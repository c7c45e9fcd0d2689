use omsconnect_codec::ValueBox;
use omsconnect_core::{Schema, SchemaBuilder, SchemaRef, Value, ValidationError};

fn point_schema() -> SchemaRef {
    SchemaBuilder::new_struct()
        .field("x", Schema::int32())
        .and_then(|b| b.field("y", Schema::optional_int32()))
        .map(|b| b.build())
        .expect("valid schema")
}

#[test]
fn new_box_starts_empty_for_its_kind() {
    let list = ValueBox::new(SchemaBuilder::array(Schema::int32()).build());
    assert_eq!(list.value(), &Value::List(Vec::new()));

    let map = ValueBox::new(SchemaBuilder::map(Schema::string(), Schema::int8()).build());
    assert_eq!(map.value(), &Value::Map(Vec::new()));

    let point = ValueBox::new(point_schema());
    assert!(matches!(point.value(), Value::Struct(_)));

    assert!(ValueBox::new(Schema::string()).value().is_null());
}

#[test]
fn put_appends_to_arrays() -> Result<(), ValidationError> {
    let mut list = ValueBox::new(SchemaBuilder::array(Schema::int32()).build());
    list.put(1i32)?.put(2i32)?.extend([3i32, 4])?;
    assert_eq!(list.to_string(), "[1,2,3,4]");

    let err = list.put("five").unwrap_err();
    assert!(matches!(
        err,
        ValidationError::InvalidElement {
            role: "array element",
            ..
        }
    ));
    assert_eq!(list.to_string(), "[1,2,3,4]");
    Ok(())
}

#[test]
fn extend_is_all_or_nothing() {
    let mut list = ValueBox::new(SchemaBuilder::array(Schema::int8()).build());
    let err = list
        .extend([Value::Int8(1), Value::string("x")])
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidElement { .. }));
    assert_eq!(list.value(), &Value::List(Vec::new()));
}

#[test]
fn put_replaces_scalars() -> Result<(), ValidationError> {
    let mut number = ValueBox::new(Schema::int32());
    number.put(5i32)?.put(6i32)?;
    assert_eq!(number.value(), &Value::Int32(6));

    assert!(matches!(
        number.put(7i64),
        Err(ValidationError::TypeMismatch { .. })
    ));
    assert!(matches!(
        number.put(Value::Null),
        Err(ValidationError::RequiredFieldMissing { .. })
    ));

    let mut anything = ValueBox::untyped(1i8);
    anything.put("now a string")?;
    assert_eq!(anything.value(), &Value::string("now a string"));
    Ok(())
}

#[test]
fn map_entries_replace_by_key() -> Result<(), ValidationError> {
    let mut map = ValueBox::new(SchemaBuilder::map(Schema::string(), Schema::int8()).build());
    map.put_entry("a", 1i8)?
        .put_entry("b", 2i8)?
        .put_entry("a", 3i8)?;
    assert_eq!(map.to_string(), r#"{"a":3,"b":2}"#);

    assert_eq!(map.put_entry(Value::Null, 4i8).unwrap_err(), ValidationError::NullKey);
    assert!(matches!(
        map.put_entry("c", "not a number"),
        Err(ValidationError::InvalidElement {
            role: "map value",
            ..
        })
    ));
    assert!(matches!(
        map.put_entries([("d", Value::Int8(4)), ("e", Value::Bool(true))]),
        Err(ValidationError::InvalidElement { .. })
    ));
    assert_eq!(map.to_string(), r#"{"a":3,"b":2}"#);
    Ok(())
}

#[test]
fn map_entries_on_non_map_schema_are_rejected() {
    let mut number = ValueBox::new(Schema::int8());
    assert!(matches!(
        number.put_entry("k", 1i8),
        Err(ValidationError::TypeMismatch { .. })
    ));
}

#[test]
fn struct_fields_through_the_box() -> Result<(), ValidationError> {
    let schema = point_schema();
    let mut point = ValueBox::new(schema.clone());
    point.put_field("x", 3i32)?;
    let y = schema.field("y").cloned().expect("field y");
    point.put_struct_field(&y, 4i32)?;
    assert_eq!(point.to_string(), r#"{"x":3,"y":4}"#);
    point.validate()?;

    let err = point.put_field("z", 1i32).unwrap_err();
    assert_eq!(err, ValidationError::UnknownField { name: "z".to_string() });

    let mut list = ValueBox::new(SchemaBuilder::array(Schema::int8()).build());
    assert!(matches!(
        list.put_field("x", 1i32),
        Err(ValidationError::NotAStruct { .. })
    ));
    Ok(())
}

#[test]
fn validation_reports_missing_required_field() {
    let point = ValueBox::new(point_schema());
    assert!(matches!(
        point.validate(),
        Err(ValidationError::RequiredFieldMissing { field: Some(ref name) }) if name == "x"
    ));
}

#[test]
fn with_value_validates_up_front() {
    assert!(ValueBox::with_value(Schema::string(), "ok").is_ok());
    assert!(ValueBox::with_value(Schema::string(), 1i8).is_err());
    assert!(ValueBox::with_value(Schema::optional_string(), Value::Null).is_ok());
}

#[test]
fn inferred_schema_of_box_contents() -> Result<(), ValidationError> {
    let mut list = ValueBox::untyped(Value::List(Vec::new()));
    list.extend([1i8, 2])?;
    assert_eq!(
        list.infer_schema(),
        Some(SchemaBuilder::array(Schema::int8()).build())
    );
    Ok(())
}
