use omsconnect_core::{
    Schema, SchemaBuilder, SchemaRef, Struct, Value, ValidationError, logical,
};

fn person_schema() -> SchemaRef {
    SchemaBuilder::new_struct()
        .name("person")
        .and_then(|b| b.field("name", Schema::string()))
        .and_then(|b| b.field("age", Schema::optional_int8()))
        .and_then(|b| {
            b.field(
                "score",
                SchemaBuilder::int32()
                    .default_value(Value::Int32(10))?
                    .build(),
            )
        })
        .and_then(|b| {
            b.field(
                "tags",
                SchemaBuilder::array(Schema::string()).optional().build(),
            )
        })
        .map(|b| b.build())
        .expect("valid schema")
}

#[test]
fn put_then_get_returns_value() -> Result<(), ValidationError> {
    let mut person = Struct::new(person_schema())?;
    person.put("name", "alice")?.put("age", 31i8)?;

    assert_eq!(person.get("name")?, &Value::string("alice"));
    assert_eq!(person.get_int8("age")?, Some(31));
    assert_eq!(person.get_string("name")?, Some("alice"));
    Ok(())
}

#[test]
fn rejected_put_leaves_struct_unchanged() -> Result<(), ValidationError> {
    let mut person = Struct::new(person_schema())?;
    person.put("name", "bob")?;
    let before = person.clone();

    let err = person.put("name", 5i32).unwrap_err();
    assert!(matches!(err, ValidationError::TypeMismatch { .. }));
    assert_eq!(person, before);

    let err = person.put("name", Value::Null).unwrap_err();
    assert!(matches!(err, ValidationError::RequiredFieldMissing { .. }));
    assert_eq!(person, before);
    Ok(())
}

#[test]
fn unknown_field_is_rejected() -> Result<(), ValidationError> {
    let mut person = Struct::new(person_schema())?;
    let err = person.put("email", "a@b").unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnknownField {
            name: "email".to_string()
        }
    );

    let foreign = SchemaBuilder::new_struct()
        .field("name", Schema::optional_string())
        .expect("valid schema")
        .build();
    let foreign_field = foreign.field("name").cloned().expect("field");
    assert!(person.put_field(&foreign_field, "x").is_err());
    Ok(())
}

#[test]
fn defaults_are_substituted_on_read() -> Result<(), ValidationError> {
    let person = Struct::new(person_schema())?;
    assert_eq!(person.get("score")?, &Value::Int32(10));
    assert_eq!(person.get_without_default("score")?, &Value::Null);
    assert_eq!(person.get_int32("score")?, Some(10));
    Ok(())
}

#[test]
fn typed_getter_checks_physical_kind() -> Result<(), ValidationError> {
    let mut person = Struct::new(person_schema())?;
    person.put("name", "carol")?;
    let err = person.get_int32("name").unwrap_err();
    assert!(matches!(
        err,
        ValidationError::TypeMismatch {
            expected: "int32",
            found: "string",
            ..
        }
    ));
    Ok(())
}

#[test]
fn validate_reports_missing_required_field() -> Result<(), ValidationError> {
    let mut person = Struct::new(person_schema())?;
    let err = person.validate().unwrap_err();
    assert_eq!(
        err,
        ValidationError::RequiredFieldMissing {
            field: Some("name".to_string())
        }
    );

    // `age` and `tags` are optional, `score` has a default.
    person.put("name", "dave")?;
    person.validate()
}

#[test]
fn nested_struct_requires_matching_schema() -> Result<(), Box<dyn std::error::Error>> {
    let inner = SchemaBuilder::new_struct().field("v", Schema::int8())?.build();
    let outer = SchemaBuilder::new_struct().field("inner", inner.clone())?.build();

    let mut value = Struct::new(inner)?;
    value.put("v", 1i8)?;
    let mut record = Struct::new(outer.clone())?;
    record.put("inner", value)?;
    assert_eq!(record.get_struct("inner")?.map(|s| s.values().len()), Some(1));

    let other = SchemaBuilder::new_struct().field("w", Schema::int8())?.build();
    let err = record.put("inner", Struct::new(other)?).unwrap_err();
    assert!(matches!(err, ValidationError::StructSchemaMismatch { .. }));
    Ok(())
}

#[test]
fn array_elements_are_validated() -> Result<(), ValidationError> {
    let mut person = Struct::new(person_schema())?;
    person.put("tags", vec![Value::string("a"), Value::string("b")])?;
    assert_eq!(person.get_array("tags")?.map(<[_]>::len), Some(2));

    let err = person
        .put("tags", vec![Value::string("a"), Value::Int8(1)])
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::InvalidElement {
            role: "array element",
            ..
        }
    ));
    Ok(())
}

#[test]
fn struct_requires_struct_schema() {
    let err = Struct::new(Schema::int8()).unwrap_err();
    assert!(matches!(err, ValidationError::NotAStruct { .. }));
}

#[test]
fn logical_fields_hold_logical_values() -> Result<(), Box<dyn std::error::Error>> {
    let schema = SchemaBuilder::new_struct()
        .field("price", logical::decimal::schema(2))?
        .field("day", logical::date::schema())?
        .build();
    let mut record = Struct::new(schema)?;

    record.put("price", "12.50".parse::<omsconnect_core::Decimal>()?)?;
    assert!(record.put("day", 3i32).is_err());

    let day = logical::date::decode(&logical::date::schema(), 3)?;
    record.put("day", day)?;
    assert_eq!(record.get_datetime("day")?, Some(day));
    assert_eq!(
        record.get_decimal("price")?.map(|d| d.to_string()),
        Some("12.50".to_string())
    );
    Ok(())
}
