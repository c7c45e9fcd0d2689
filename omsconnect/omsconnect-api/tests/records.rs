use chrono::{DateTime, Utc};
use omsconnect_api::{
    ConnectError, ConnectRecord, Headers, KeyValue, RecordOffset, RecordPartition,
    RecordPosition, SinkRecord, SourceRecord,
};
use omsconnect_codec::ValueBox;
use omsconnect_core::{DataError, Decimal, Schema, SchemaBuilder, Struct, Value, ValidationError};

fn order_struct() -> Struct {
    let schema = SchemaBuilder::new_struct()
        .name("order")
        .and_then(|b| b.field("id", Schema::int64()))
        .and_then(|b| b.field("note", Schema::optional_string()))
        .map(|b| b.build())
        .expect("valid schema");
    let mut order = Struct::new(schema).expect("struct schema");
    order.put("id", 42i64).expect("valid id");
    order
}

fn order_box() -> ValueBox {
    let order = order_struct();
    ValueBox::with_value(order.schema().clone(), order).expect("valid order")
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[test]
fn record_holds_validated_payload() -> Result<(), ConnectError> {
    let record = ConnectRecord::new("orders", order_box())?
        .with_key(ValueBox::parse("42"))?
        .with_timestamp(1_700_000_000_000);

    assert_eq!(record.topic(), "orders");
    assert_eq!(record.timestamp(), Some(1_700_000_000_000));
    assert_eq!(record.key().map(|k| k.value()), Some(&Value::Int8(42)));
    assert_eq!(record.data().to_string(), r#"{"id":42,"note":null}"#);
    Ok(())
}

/// A box whose value was replaced without checks is caught when the record
/// is built.
#[test]
fn invalid_payload_is_rejected() {
    let mut data = ValueBox::new(Schema::int32());
    data.set_value("not a number");

    let err = ConnectRecord::new("orders", data).unwrap_err();
    assert!(matches!(
        err,
        ConnectError::InvalidData(DataError::Validation(ValidationError::TypeMismatch { .. }))
    ));
    assert_eq!(err.code(), "InvalidData");
    assert!(!err.is_retriable());
}

#[test]
fn struct_missing_required_field_is_rejected() {
    let order = Struct::new(order_struct().schema().clone()).expect("struct schema");
    let mut data = ValueBox::new(order.schema().clone());
    data.set_value(order);

    assert!(ConnectRecord::new("orders", data).is_err());
}

#[test]
fn extensions_merge_and_read_back() -> Result<(), ConnectError> {
    let mut record = ConnectRecord::new("orders", ValueBox::parse("1"))?
        .with_extensions([("region", "eu")].into_iter().collect());
    record.add_extension("retries", "3");
    record.add_extensions(&[("region", "us")].into_iter().collect::<KeyValue>());

    assert_eq!(record.extension("region"), Some("us"));
    assert_eq!(record.extensions().get_int("retries")?, Some(3));
    assert_eq!(record.extension("absent"), None);
    Ok(())
}

#[test]
fn source_record_keeps_position_when_retargeted() -> Result<(), ConnectError> {
    let partition: RecordPartition = [("file", "orders.csv")].into_iter().collect();
    let mut offset = RecordOffset::new();
    offset.put("line", 17i64);
    let position = RecordPosition::new(partition, offset);

    let mut original = SourceRecord::new(
        position.clone(),
        ConnectRecord::new("raw", ValueBox::parse("[1, 2]"))?,
    );
    original.record_mut().headers_mut().add_string("origin", "csv")?;

    let moved = original.new_record("clean", Some(5), None, ValueBox::parse("[3]"))?;
    assert_eq!(moved.position(), &position);
    assert_eq!(moved.record().topic(), "clean");
    assert_eq!(moved.record().timestamp(), Some(5));
    assert_eq!(moved.record().headers().len(), 1);
    assert_eq!(position.to_string(), r#"{"file":"orders.csv"}@{"line":17}"#);
    Ok(())
}

#[test]
fn sink_record_keeps_queue_coordinates() -> Result<(), ConnectError> {
    let record = SinkRecord::new(
        "broker-a",
        3,
        1024,
        ConnectRecord::new("orders", order_box())?,
    );
    let copy = record.new_record("audit", None, Some(ValueBox::parse("k")), order_box())?;

    assert_eq!(copy.broker_name(), "broker-a");
    assert_eq!(copy.queue_id(), 3);
    assert_eq!(copy.queue_offset(), 1024);
    assert_eq!(copy.record().key().map(|k| k.to_string()), Some("k".to_string()));
    assert_eq!(copy.into_record().data(), record.record().data());
    Ok(())
}

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

#[test]
fn typed_headers() -> Result<(), ConnectError> {
    let midnight = DateTime::<Utc>::from_timestamp_millis(86_400_000).expect("instant");
    let mut headers = Headers::new();
    headers
        .add_string("header1", "headerValue1")?
        .add_bool("flag", true)?
        .add_i64("count", 9)?
        .add_decimal("price", Decimal::new(1999, 2))?
        .add_date("day", midnight)?
        .add_struct("order", order_struct())?;

    assert_eq!(headers.len(), 6);
    let found = headers.find("header1").expect("header1");
    assert_eq!(found.value(), &Value::string("headerValue1"));
    assert_eq!(found.schema(), Some(&Schema::string()));
    assert_eq!(
        headers.find("price").map(|h| h.data().to_string()),
        Some("19.99".to_string())
    );
    Ok(())
}

#[test]
fn date_header_must_be_midnight() {
    let noon = DateTime::<Utc>::from_timestamp_millis(43_200_000).expect("instant");
    let err = Headers::new().add_date("day", noon).unwrap_err();
    assert_eq!(err.code(), "InvalidData");
}

#[test]
fn header_list_checks_its_schema() {
    let schema = SchemaBuilder::array(Schema::int8()).build();
    let mut headers = Headers::new();
    assert!(
        headers
            .add_list("ids", vec![Value::Int8(1), Value::Int8(2)], schema.clone())
            .is_ok()
    );
    assert!(
        headers
            .add_list("ids", vec![Value::string("x")], schema)
            .is_err()
    );
    assert_eq!(headers.len(), 1);
}

#[test]
fn rename_remove_and_duplicate() -> Result<(), ConnectError> {
    let mut headers = Headers::new();
    headers.add_string("header1", "v1")?.add_i8("header1", 2)?;

    if let Some(header) = headers.find_mut("header1") {
        header.rename("header2");
    }
    assert_eq!(headers.find("header2").map(|h| h.key()), Some("header2"));
    assert_eq!(
        headers.to_map().get("header1").map(|h| h.value()),
        Some(&Value::Int8(2))
    );

    let copy = headers.duplicate();
    headers.remove("header1");
    assert_eq!(headers.len(), 1);
    assert_eq!(copy.len(), 2);

    headers.clear();
    assert!(headers.is_empty());
    Ok(())
}

#[test]
fn error_codes() {
    let poll = ConnectError::SourcePoll {
        message: "broken pipe".to_string(),
    };
    assert_eq!(poll.code(), "SourceConnectorPollError");

    let put = ConnectError::SinkPut {
        message: "disk full".to_string(),
        put_index: Some(3),
    };
    assert_eq!(put.code(), "SinkConnectorPutError");

    let retry = ConnectError::Retriable {
        message: "busy".to_string(),
        put_index: None,
    };
    assert!(retry.is_retriable());
    assert!(
        ConnectError::Timeout {
            message: "poll".to_string()
        }
        .is_retriable()
    );
    assert_eq!(ConnectError::internal("boom").code(), "InternalError");
}
