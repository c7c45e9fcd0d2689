use std::fmt::{Result, Write as _};

use super::{Schema, SchemaBody};

/// Format a schema as an indented tree:
/// primitive schemas are rendered in one line, composite schemas are
/// pretty-printed. Nested schemas follow the same rule.
pub fn format_schema(schema: &Schema) -> std::result::Result<String, std::fmt::Error> {
    let mut out = String::new();
    if schema.kind().is_primitive() {
        writeln!(out, "{}", inline(schema))?;
    } else {
        format_composite(schema, 0, &mut out)?;
    }
    Ok(out)
}

fn inline(schema: &Schema) -> String {
    let mut text = format!(
        "{{ type: {}, optional: {}",
        schema.kind().type_name(),
        schema.is_optional()
    );
    if let Some(name) = schema.name() {
        text.push_str(&format!(", name: {name}"));
    }
    for (key, value) in schema.parameters() {
        text.push_str(&format!(", {key}: {value}"));
    }
    text.push_str(" }");
    text
}

fn format_composite(schema: &Schema, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}type: {}", schema.kind().type_name())?;
    writeln!(out, "{pad}optional: {}", schema.is_optional())?;
    if let Some(name) = schema.name() {
        writeln!(out, "{pad}name: {name}")?;
    }

    match schema.body() {
        SchemaBody::Struct { fields, .. } => {
            writeln!(out, "{pad}fields:")?;
            for field in fields {
                format_labeled(&field.name, &field.schema, indent + 4, out)?;
            }
        }
        SchemaBody::Array { element } => format_labeled("item", element, indent, out)?,
        SchemaBody::Map { key, value } => {
            format_labeled("key", key, indent, out)?;
            format_labeled("value", value, indent, out)?;
        }
        SchemaBody::Primitive => {}
    }

    Ok(())
}

fn format_labeled(label: &str, schema: &Schema, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    if schema.kind().is_primitive() {
        writeln!(out, "{pad}{label}: {}", inline(schema))?;
    } else {
        writeln!(out, "{pad}{label}:")?;
        format_composite(schema, indent + 4, out)?;
    }
    Ok(())
}
