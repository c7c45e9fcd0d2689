use omsconnect_core::{Schema, SchemaBuilder, SchemaRef, Value};

/// Narrowest schema describing `value` on its own.
///
/// Scalars map one-to-one to their primitive schema and a struct reports its
/// own schema. Lists and maps need every non-null element (and, for maps,
/// every key and every value independently) to infer the same schema; they
/// report `None` when empty, when nothing but nulls are present, or when the
/// elements disagree. Nulls make the element schema optional. Logical
/// values and null have no inferable schema.
pub fn infer_schema(value: &Value) -> Option<SchemaRef> {
    match value {
        Value::Null | Value::Decimal(_) | Value::DateTime(_) => None,
        Value::Struct(s) => Some(s.schema().clone()),
        Value::List(items) => {
            let element = agree(items.iter())?;
            Some(SchemaBuilder::array(element).build())
        }
        Value::Map(entries) => {
            let key = agree(entries.iter().map(|(k, _)| k))?;
            let value = agree(entries.iter().map(|(_, v)| v))?;
            Some(SchemaBuilder::map(key, value).build())
        }
        other => other.kind().and_then(|kind| Schema::primitive(kind, false)),
    }
}

fn agree<'a>(values: impl Iterator<Item = &'a Value>) -> Option<SchemaRef> {
    let mut known: Option<SchemaRef> = None;
    let mut saw_null = false;
    for value in values {
        if value.is_null() {
            saw_null = true;
            continue;
        }
        let schema = infer_schema(value)?;
        match &known {
            None => known = Some(schema),
            Some(previous) if *previous == schema => {}
            Some(_) => return None,
        }
    }
    let schema = known?;
    if saw_null {
        Some(SchemaBuilder::from(schema.as_ref()).optional().build())
    } else {
        Some(schema)
    }
}
