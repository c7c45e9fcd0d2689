//! Recursive-descent reader for the text notation.
//!
//! Values inside collections are parsed in "embedded" mode, where quoted
//! strings and `null` are recognized. At the top level `null` is a string. A bracketed span that fails to parse
//! as a collection is rewound and read again as a scalar; at the top level
//! that makes the whole input a string.

use omsconnect_core::{
    ConversionError, Decimal, Schema, SchemaBuilder, SchemaRef, Value, logical,
};
use tracing::debug;

use super::{
    lex::{Lexer, unescape},
    temporal,
    widen::Widening,
};
use crate::{ParseError, ValueBox, convert::convert_to, value_box::insert_entry};

type Parsed = (Option<SchemaRef>, Value);

/// Collections nested deeper than this are rejected as malformed.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Read `text` into a value box with an inferred schema.
///
/// Never fails: anything that is not a literal, a number, a temporal value
/// or a well-formed collection becomes a string holding `text` verbatim.
pub fn parse(text: &str) -> ValueBox {
    if text.is_empty() {
        return ValueBox::from_parts(Some(Schema::string()), Value::string(""));
    }
    let trimmed = text.trim();
    match trimmed {
        "true" => return ValueBox::from_parts(Some(Schema::boolean()), Value::Bool(true)),
        "false" => return ValueBox::from_parts(Some(Schema::boolean()), Value::Bool(false)),
        _ => {}
    }

    if trimmed.starts_with(['[', '{']) {
        match try_parse_collection(text) {
            Ok(parsed) => return parsed,
            Err(error) => debug!(%error, "collection literal rejected, keeping input as string"),
        }
    }

    let (schema, value) = number(trimmed)
        .or_else(|| {
            temporal::parse_exact(trimmed)
                .map(|(schema, instant)| (Some(schema), Value::DateTime(instant)))
        })
        .unwrap_or_else(|| (Some(Schema::string()), Value::string(text)));
    ValueBox::from_parts(schema, value)
}

/// Strictly read `text` as an array or map literal.
///
/// Unlike [`parse`] there is no string fallback; trailing input other than
/// whitespace is an error.
pub fn try_parse_collection(text: &str) -> Result<ValueBox, ParseError> {
    let mut parser = Parser {
        lex: Lexer::new(text),
        depth: 0,
    };
    let (schema, value) = match parser.lex.peek() {
        Some(token) if token.text == "[" || token.text == "{" => {
            parser.collection(token.text, token.start)?
        }
        Some(token) => {
            return Err(ParseError::UnexpectedToken {
                token: token.text.to_string(),
                position: token.start,
            });
        }
        None => return Err(ParseError::UnexpectedEnd),
    };
    if !parser.lex.is_exhausted() {
        return Err(ParseError::TrailingInput {
            position: parser.lex.position(),
        });
    }
    Ok(ValueBox::from_parts(schema, value))
}

/// Narrowest numeric reading of a digit- or sign-led token.
fn number(token: &str) -> Option<Parsed> {
    if !token.starts_with(|c: char| c.is_ascii_digit() || c == '+' || c == '-') {
        return None;
    }
    let decimal = match token.parse::<Decimal>() {
        Ok(decimal) => decimal,
        Err(ConversionError::DecimalOverflow { .. }) => {
            let v: f64 = token.parse().ok()?;
            return v
                .is_finite()
                .then(|| (Some(Schema::float64()), Value::Float64(v)));
        }
        Err(_) => return None,
    };

    if let Some(v) = decimal.to_i8_exact() {
        return Some((Some(Schema::int8()), Value::Int8(v)));
    }
    if let Some(v) = decimal.to_i16_exact() {
        return Some((Some(Schema::int16()), Value::Int16(v)));
    }
    if let Some(v) = decimal.to_i32_exact() {
        return Some((Some(Schema::int32()), Value::Int32(v)));
    }
    if let Some(v) = decimal.to_i64_exact() {
        return Some((Some(Schema::int64()), Value::Int64(v)));
    }
    let v = decimal.to_f64();
    if v.is_finite() {
        return Some((Some(Schema::float64()), Value::Float64(v)));
    }
    Some((
        Some(logical::decimal::schema(decimal.scale())),
        Value::Decimal(decimal),
    ))
}

/// Coerce collected elements to their common schema, if there is one.
fn align(items: Vec<Parsed>, target: Option<&Schema>) -> Result<Vec<Value>, ParseError> {
    let Some(target) = target else {
        return Ok(items.into_iter().map(|(_, v)| v).collect());
    };
    items
        .into_iter()
        .map(|(schema, value)| {
            if value.is_null() {
                Ok(value)
            } else {
                Ok(convert_to(schema.as_deref(), target, &value)?)
            }
        })
        .collect()
}

struct Parser<'a> {
    lex: Lexer<'a>,
    depth: usize,
}

impl Parser<'_> {
    /// Array or map starting at the `open` bracket, bounded by nesting depth.
    fn collection(&mut self, open: &str, position: usize) -> Result<Parsed, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            let detail = format!("nesting deeper than {MAX_NESTING_DEPTH} levels");
            return Err(if open == "[" {
                ParseError::MalformedArray { position, detail }
            } else {
                ParseError::MalformedMap { position, detail }
            });
        }
        self.depth += 1;
        let parsed = if open == "[" { self.array() } else { self.map() };
        self.depth -= 1;
        parsed
    }

    fn embedded(&mut self) -> Result<Parsed, ParseError> {
        let token = self.lex.peek().ok_or(ParseError::UnexpectedEnd)?;

        match token.text {
            "null" => {
                self.lex.next_token();
                return Ok((None, Value::Null));
            }
            "\"" => {
                self.lex.next_token();
                let body = self
                    .lex
                    .quoted_body()
                    .ok_or(ParseError::UnterminatedString {
                        position: token.start,
                    })?;
                return Ok((Some(Schema::string()), Value::string(body)));
            }
            "true" | "false" => {
                self.lex.next_token();
                return Ok((Some(Schema::boolean()), Value::Bool(token.text == "true")));
            }
            _ => {}
        }

        let mut failure = None;
        if token.text == "[" || token.text == "{" {
            match self.collection(token.text, token.start) {
                Ok(parsed) => return Ok(parsed),
                Err(error) => {
                    debug!(position = token.start, %error, "collection parse failed, rewinding");
                    self.lex.rewind(token.start);
                    failure = Some(error);
                }
            }
        }

        if let Some((len, schema, instant)) = temporal::probe(&self.lex.src()[token.start..]) {
            self.lex.rewind(token.start + len);
            return Ok((Some(schema), Value::DateTime(instant)));
        }

        self.lex.next_token();
        if token.is_delimiter() {
            return Err(failure.unwrap_or_else(|| ParseError::UnexpectedToken {
                token: token.text.to_string(),
                position: token.start,
            }));
        }
        Ok(number(token.text)
            .unwrap_or_else(|| (Some(Schema::string()), Value::string(unescape(token.text)))))
    }

    fn array(&mut self) -> Result<Parsed, ParseError> {
        let malformed = |position: usize, detail: &str| ParseError::MalformedArray {
            position,
            detail: detail.to_string(),
        };
        self.lex.next_token();
        if self.lex.can_consume("]") {
            return Ok((None, Value::List(Vec::new())));
        }

        let mut items = Vec::new();
        let mut widening = Widening::default();
        loop {
            match self.lex.peek() {
                None => return Err(malformed(self.lex.src().len(), "missing terminating ']'")),
                Some(t) if t.text == "," => return Err(malformed(t.start, "empty array element")),
                Some(t) if t.text == "]" => {
                    return Err(malformed(t.start, "missing element after ','"));
                }
                Some(_) => {}
            }
            let (schema, value) = self.embedded()?;
            widening.observe(schema.as_ref(), value.is_null());
            items.push((schema, value));

            if self.lex.can_consume(",") {
                continue;
            }
            if self.lex.can_consume("]") {
                break;
            }
            return Err(match self.lex.peek() {
                None => malformed(self.lex.src().len(), "missing terminating ']'"),
                Some(t) => malformed(t.start, "expected ',' or ']'"),
            });
        }

        let element = widening.finish();
        let values = align(items, element.as_deref())?;
        let schema = element.map(|e| SchemaBuilder::array(e).build());
        Ok((schema, Value::List(values)))
    }

    fn map(&mut self) -> Result<Parsed, ParseError> {
        let malformed = |position: usize, detail: &str| ParseError::MalformedMap {
            position,
            detail: detail.to_string(),
        };
        self.lex.next_token();
        if self.lex.can_consume("}") {
            return Ok((None, Value::Map(Vec::new())));
        }

        let mut keys = Vec::new();
        let mut values = Vec::new();
        let mut key_widening = Widening::default();
        let mut value_widening = Widening::default();
        loop {
            let start = match self.lex.peek() {
                None => return Err(malformed(self.lex.src().len(), "missing terminating '}'")),
                Some(t) if t.text == "," => {
                    return Err(malformed(t.start, "map entry has no key or value"));
                }
                Some(t) if t.text == "}" => {
                    return Err(malformed(t.start, "missing entry after ','"));
                }
                Some(t) => t.start,
            };
            let (key_schema, key) = self.embedded()?;
            if key.is_null() {
                return Err(malformed(start, "map entry may not have a null key"));
            }
            if !self.lex.can_consume(":") {
                return Err(malformed(self.lex.position(), "map entry is missing ':'"));
            }
            let (value_schema, value) = self.embedded()?;

            key_widening.observe(key_schema.as_ref(), false);
            value_widening.observe(value_schema.as_ref(), value.is_null());
            keys.push((key_schema, key));
            values.push((value_schema, value));

            if self.lex.can_consume(",") {
                continue;
            }
            if self.lex.can_consume("}") {
                break;
            }
            return Err(match self.lex.peek() {
                None => malformed(self.lex.src().len(), "missing terminating '}'"),
                Some(t) => malformed(t.start, "expected ',' or '}'"),
            });
        }

        let typed = !key_widening.is_degraded() && !value_widening.is_degraded();
        let (key_schema, value_schema) = match (key_widening.finish(), value_widening.finish()) {
            (Some(key), Some(value)) if typed => (Some(key), Some(value)),
            _ => (None, None),
        };
        let keys = align(keys, key_schema.as_deref())?;
        let values = align(values, value_schema.as_deref())?;

        let mut entries = Vec::with_capacity(keys.len());
        for (key, value) in keys.into_iter().zip(values) {
            insert_entry(&mut entries, key, value);
        }
        let schema = key_schema
            .zip(value_schema)
            .map(|(key, value)| SchemaBuilder::map(key, value).build());
        Ok((schema, Value::Map(entries)))
    }
}
