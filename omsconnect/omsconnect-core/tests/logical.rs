use chrono::{DateTime, TimeZone, Utc};
use omsconnect_core::{ConversionError, Decimal, Schema, logical};

fn at(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).expect("valid instant")
}

// ---------------------------------------------------------------------------
// Date
// ---------------------------------------------------------------------------

#[test]
fn date_encodes_days_since_epoch() -> Result<(), ConversionError> {
    let schema = logical::date::schema();
    let day = Utc.with_ymd_and_hms(1970, 1, 11, 0, 0, 0).unwrap();
    assert_eq!(logical::date::encode(&schema, &day)?, 10);
    assert_eq!(logical::date::decode(&schema, 10)?, day);

    let before_epoch = Utc.with_ymd_and_hms(1969, 12, 31, 0, 0, 0).unwrap();
    assert_eq!(logical::date::encode(&schema, &before_epoch)?, -1);
    Ok(())
}

#[test]
fn date_rejects_time_of_day() {
    let schema = logical::date::schema();
    let afternoon = Utc.with_ymd_and_hms(2020, 5, 1, 13, 0, 0).unwrap();
    let err = logical::date::encode(&schema, &afternoon).unwrap_err();
    assert_eq!(
        err,
        ConversionError::NonZeroTimeComponent {
            millis_of_day: 13 * 3_600_000
        }
    );
}

#[test]
fn codec_checks_logical_name() {
    let err = logical::date::encode(&Schema::int32(), &at(0)).unwrap_err();
    assert!(matches!(
        err,
        ConversionError::LogicalTypeMismatch {
            expected: "Date",
            found: None
        }
    ));
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

#[test]
fn time_boundaries() -> Result<(), ConversionError> {
    let schema = logical::time::schema();
    let day = logical::MILLIS_PER_DAY;

    assert_eq!(logical::time::encode(&schema, &at(0))?, 0);
    assert_eq!(logical::time::encode(&schema, &at(day - 1))?, 86_399_999);
    // Upper bound is inclusive.
    assert_eq!(logical::time::encode(&schema, &at(day))?, 86_400_000);

    assert!(matches!(
        logical::time::encode(&schema, &at(day + 1)),
        Err(ConversionError::OutOfRange { logical: "Time", .. })
    ));
    assert!(matches!(
        logical::time::encode(&schema, &at(-1)),
        Err(ConversionError::OutOfRange { .. })
    ));
    assert!(logical::time::decode(&schema, 86_400_001).is_err());
    assert_eq!(logical::time::decode(&schema, 1_500)?, at(1_500));
    Ok(())
}

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

#[test]
fn timestamp_is_plain_millis() -> Result<(), ConversionError> {
    let schema = logical::timestamp::schema();
    let instant = at(1_600_000_000_123);
    assert_eq!(
        logical::timestamp::encode(&schema, &instant)?,
        1_600_000_000_123
    );
    assert_eq!(logical::timestamp::decode(&schema, -5)?, at(-5));
    Ok(())
}

// ---------------------------------------------------------------------------
// Decimal
// ---------------------------------------------------------------------------

#[test]
fn decimal_round_trips_through_bytes() -> Result<(), ConversionError> {
    for (text, scale) in [("123.45", 2), ("-0.001", 3), ("0", 0), ("-98765432109876543210", 0)] {
        let value: Decimal = text.parse()?;
        let schema = logical::decimal::schema(scale);
        let bytes = logical::decimal::encode(&schema, &value)?;
        assert_eq!(logical::decimal::decode(&schema, &bytes)?, value);
    }
    Ok(())
}

#[test]
fn decimal_scale_must_match() -> Result<(), ConversionError> {
    let value: Decimal = "1.5".parse()?;
    let err = logical::decimal::encode(&logical::decimal::schema(2), &value).unwrap_err();
    assert_eq!(
        err,
        ConversionError::ScaleMismatch {
            expected: 2,
            actual: 1
        }
    );
    Ok(())
}

#[test]
fn decimal_schema_needs_scale_parameter() {
    let schema = logical::decimal::builder(2)
        .parameter(logical::decimal::SCALE_FIELD, "two")
        .build();
    let err = logical::decimal::decode(&schema, &[1]).unwrap_err();
    assert_eq!(
        err,
        ConversionError::MissingOrInvalidScale {
            found: Some("two".to_string())
        }
    );
}

#[test]
fn decimal_text_forms() -> Result<(), ConversionError> {
    let d: Decimal = "1.50".parse()?;
    assert_eq!((d.unscaled(), d.scale()), (150, 2));
    assert_eq!(d.to_string(), "1.50");

    let d: Decimal = "2.5e3".parse()?;
    assert_eq!((d.unscaled(), d.scale()), (25, -2));
    assert_eq!(d.to_string(), "2.5E+3");
    assert_eq!(d.to_i16_exact(), Some(2500));
    assert_eq!(d.to_i8_exact(), None);

    let d: Decimal = "-.25".parse()?;
    assert_eq!(d.to_f64(), -0.25);
    assert_eq!(d.to_i64_exact(), None);
    assert_eq!(d.trunc_i64(), 0);

    assert!("1.2.3".parse::<Decimal>().is_err());
    assert!("abc".parse::<Decimal>().is_err());
    assert!("+".parse::<Decimal>().is_err());
    Ok(())
}
