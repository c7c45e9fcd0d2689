use std::fmt::{Display, Formatter, Result, Write};

use base64::{Engine, engine::general_purpose::STANDARD};
use omsconnect_core::Value;

use super::temporal;

/// Display adapter printing a value in the text notation.
///
/// Top-level strings and bytes print bare; `embedded` quotes them, as done
/// for every element inside a collection or struct.
pub struct Text<'a> {
    value: &'a Value,
    embedded: bool,
}

impl<'a> Text<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            value,
            embedded: false,
        }
    }

    pub fn embedded(value: &'a Value) -> Self {
        Self {
            value,
            embedded: true,
        }
    }
}

impl Display for Text<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_value(f, self.value, self.embedded)
    }
}

fn write_value(out: &mut impl Write, value: &Value, embedded: bool) -> Result {
    match value {
        Value::Null => out.write_str("null"),
        Value::Bool(v) => write!(out, "{v}"),
        Value::Int8(v) => write!(out, "{v}"),
        Value::Int16(v) => write!(out, "{v}"),
        Value::Int32(v) => write!(out, "{v}"),
        Value::Int64(v) => write!(out, "{v}"),
        Value::Float32(v) => out.write_str(&float_text(
            v.is_nan(),
            v.is_infinite(),
            v.is_sign_negative(),
            f64::from(v.abs()),
            format!("{v}"),
            format!("{v:e}"),
        )),
        Value::Float64(v) => out.write_str(&float_text(
            v.is_nan(),
            v.is_infinite(),
            v.is_sign_negative(),
            v.abs(),
            format!("{v}"),
            format!("{v:e}"),
        )),
        Value::Decimal(v) => write!(out, "{v}"),
        Value::String(s) => {
            if embedded {
                write!(out, "\"{}\"", escape(s))
            } else {
                out.write_str(s)
            }
        }
        Value::Bytes(b) => {
            let encoded = STANDARD.encode(b);
            if embedded {
                write!(out, "\"{encoded}\"")
            } else {
                out.write_str(&encoded)
            }
        }
        Value::List(items) => {
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_value(out, item, true)?;
            }
            out.write_char(']')
        }
        Value::Map(entries) => {
            out.write_char('{')?;
            for (i, (k, v)) in entries.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_value(out, k, true)?;
                out.write_char(':')?;
                write_value(out, v, true)?;
            }
            out.write_char('}')
        }
        Value::Struct(s) => {
            out.write_char('{')?;
            for (i, field) in s.schema().fields().unwrap_or_default().iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write!(out, "\"{}\":", escape(&field.name))?;
                write_value(out, s.get(&field.name).unwrap_or(&Value::Null), true)?;
            }
            out.write_char('}')
        }
        Value::DateTime(instant) => out.write_str(&temporal::format(instant)),
    }
}

pub(crate) fn escape(s: &str) -> String {
    s.replace('\\', r"\\").replace('"', "\\\"")
}

/// Floating point text: integral values keep a trailing `.0`, very large or
/// very small magnitudes use `E` notation.
fn float_text(
    nan: bool,
    infinite: bool,
    negative: bool,
    magnitude: f64,
    plain: String,
    scientific: String,
) -> String {
    if nan {
        return "NaN".to_string();
    }
    if infinite {
        return if negative { "-Infinity" } else { "Infinity" }.to_string();
    }
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return with_fraction(plain);
    }
    match scientific.split_once('e') {
        Some((mantissa, exponent)) => {
            format!("{}E{exponent}", with_fraction(mantissa.to_string()))
        }
        None => with_fraction(plain),
    }
}

fn with_fraction(text: String) -> String {
    if text.contains('.') {
        text
    } else {
        text + ".0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_print_with_fraction() {
        assert_eq!(Text::new(&Value::Float64(300000.0)).to_string(), "300000.0");
        assert_eq!(Text::new(&Value::Float64(4.5)).to_string(), "4.5");
        assert_eq!(Text::new(&Value::Float64(1e7)).to_string(), "1.0E7");
        assert_eq!(Text::new(&Value::Float64(-2.5e-5)).to_string(), "-2.5E-5");
        assert_eq!(Text::new(&Value::Float32(0.5)).to_string(), "0.5");
        assert_eq!(Text::new(&Value::Float64(-0.0)).to_string(), "-0.0");
        assert_eq!(Text::new(&Value::Float64(f64::NAN)).to_string(), "NaN");
        assert_eq!(
            Text::new(&Value::Float64(f64::NEG_INFINITY)).to_string(),
            "-Infinity"
        );
    }

    #[test]
    fn escape_quotes_and_backslashes() {
        assert_eq!(escape(r#"a"b\c"#), r#"a\"b\\c"#);
    }
}
