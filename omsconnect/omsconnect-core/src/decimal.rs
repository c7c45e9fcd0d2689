//! Fixed-point decimal with an `i128` unscaled value.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use nom::{
    IResult,
    branch::alt,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{all_consuming, map, opt},
    sequence::{pair, preceded, tuple},
};

use crate::error::ConversionError;

/// Decimal number `unscaled * 10^-scale`.
///
/// Equality is representation-sensitive: `1.0` and `1.00` differ because
/// their scales differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    unscaled: i128,
    scale: i32,
}

impl Decimal {
    pub fn new(unscaled: i128, scale: i32) -> Self {
        Self { unscaled, scale }
    }

    pub fn unscaled(&self) -> i128 {
        self.unscaled
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// Parse from the shortest decimal representation of `value`.
    pub fn from_f64(value: f64) -> Result<Self, ConversionError> {
        if !value.is_finite() {
            return Err(ConversionError::InvalidNumber {
                text: value.to_string(),
            });
        }
        format!("{value:e}").parse()
    }

    /// Remove trailing zeros from the unscaled value, lowering the scale.
    pub fn strip_trailing_zeros(&self) -> Self {
        if self.unscaled == 0 {
            return Self::new(0, 0);
        }
        let mut unscaled = self.unscaled;
        let mut scale = self.scale;
        while unscaled % 10 == 0 && scale > i32::MIN {
            unscaled /= 10;
            scale -= 1;
        }
        Self::new(unscaled, scale)
    }

    /// Integer value, only if no fractional digits are lost and it fits.
    pub fn to_i128_exact(&self) -> Option<i128> {
        let stripped = self.strip_trailing_zeros();
        if stripped.scale > 0 {
            return None;
        }
        let factor = pow10(stripped.scale.unsigned_abs())?;
        stripped.unscaled.checked_mul(factor)
    }

    pub fn to_i64_exact(&self) -> Option<i64> {
        self.to_i128_exact().and_then(|v| i64::try_from(v).ok())
    }

    pub fn to_i32_exact(&self) -> Option<i32> {
        self.to_i128_exact().and_then(|v| i32::try_from(v).ok())
    }

    pub fn to_i16_exact(&self) -> Option<i16> {
        self.to_i128_exact().and_then(|v| i16::try_from(v).ok())
    }

    pub fn to_i8_exact(&self) -> Option<i8> {
        self.to_i128_exact().and_then(|v| i8::try_from(v).ok())
    }

    /// Integer part truncated toward zero, keeping the low 64 bits.
    pub fn trunc_i64(&self) -> i64 {
        let integer = if self.scale >= 0 {
            match pow10(self.scale.unsigned_abs()) {
                Some(factor) => self.unscaled / factor,
                None => 0,
            }
        } else {
            let mut value = self.unscaled;
            for _ in 0..self.scale.unsigned_abs().min(128) {
                value = value.wrapping_mul(10);
            }
            value
        };
        integer as i64
    }

    pub fn to_f64(&self) -> f64 {
        let negated = -(self.scale as i64);
        format!("{}e{negated}", self.unscaled)
            .parse()
            .unwrap_or(f64::NAN)
    }

    /// Minimal two's-complement big-endian bytes of the unscaled value.
    pub fn unscaled_bytes(&self) -> Vec<u8> {
        let bytes = self.unscaled.to_be_bytes();
        let negative = self.unscaled < 0;
        let fill = if negative { 0xff } else { 0x00 };
        let mut start = 0;
        while start < bytes.len() - 1 {
            let next_sign = bytes[start + 1] & 0x80 != 0;
            if bytes[start] == fill && next_sign == negative {
                start += 1;
            } else {
                break;
            }
        }
        bytes[start..].to_vec()
    }

    /// Rebuild from two's-complement big-endian bytes and a scale.
    pub fn from_unscaled_bytes(bytes: &[u8], scale: i32) -> Result<Self, ConversionError> {
        if bytes.is_empty() {
            return Err(ConversionError::DecimalOverflow {
                detail: "empty unscaled byte sequence".to_string(),
            });
        }
        if bytes.len() > 16 {
            return Err(ConversionError::DecimalOverflow {
                detail: format!("{} bytes exceed 128-bit unscaled value", bytes.len()),
            });
        }
        let fill = if bytes[0] & 0x80 != 0 { 0xff } else { 0x00 };
        let mut buf = [fill; 16];
        buf[16 - bytes.len()..].copy_from_slice(bytes);
        Ok(Self::new(i128::from_be_bytes(buf), scale))
    }
}

fn pow10(exp: u32) -> Option<i128> {
    10i128.checked_pow(exp)
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::new(value as i128, 0)
    }
}

type Literal<'a> = (Option<char>, (&'a str, &'a str), Option<(Option<char>, &'a str)>);

fn literal(input: &str) -> IResult<&str, Literal<'_>> {
    let mantissa = alt((
        pair(digit1, map(opt(preceded(char('.'), digit0)), Option::unwrap_or_default)),
        map(preceded(char('.'), digit1), |frac| ("", frac)),
    ));
    let exponent = preceded(one_of("eE"), pair(opt(one_of("+-")), digit1));
    all_consuming(tuple((opt(one_of("+-")), mantissa, opt(exponent))))(input)
}

impl FromStr for Decimal {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConversionError::InvalidNumber {
            text: s.to_string(),
        };
        let (_, (sign, (int, frac), exponent)) = literal(s).map_err(|_| invalid())?;

        let digits = format!("{int}{frac}");
        let magnitude: i128 = digits.parse().map_err(|_| ConversionError::DecimalOverflow {
            detail: format!("{s:?} exceeds 128-bit unscaled value"),
        })?;
        let unscaled = if sign == Some('-') { -magnitude } else { magnitude };

        let exp = match exponent {
            Some((exp_sign, exp_digits)) => {
                let value: i64 = exp_digits.parse().map_err(|_| invalid())?;
                if exp_sign == Some('-') { -value } else { value }
            }
            None => 0,
        };
        let scale = (frac.len() as i64)
            .checked_sub(exp)
            .and_then(|scale| i32::try_from(scale).ok())
            .ok_or_else(invalid)?;
        Ok(Self::new(unscaled, scale))
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let coeff = self.unscaled.unsigned_abs().to_string();
        let sign = if self.unscaled < 0 { "-" } else { "" };
        if self.scale == 0 {
            return write!(f, "{sign}{coeff}");
        }

        let scale = self.scale as i64;
        let adjusted = -scale + (coeff.len() as i64 - 1);
        if scale > 0 && adjusted >= -6 {
            let len = coeff.len() as i64;
            if len > scale {
                let (int, frac) = coeff.split_at((len - scale) as usize);
                write!(f, "{sign}{int}.{frac}")
            } else {
                let zeros = "0".repeat((scale - len) as usize);
                write!(f, "{sign}0.{zeros}{coeff}")
            }
        } else {
            let (head, tail) = coeff.split_at(1);
            write!(f, "{sign}{head}")?;
            if !tail.is_empty() {
                write!(f, ".{tail}")?;
            }
            if adjusted != 0 {
                let plus = if adjusted > 0 { "+" } else { "" };
                write!(f, "E{plus}{adjusted}")?;
            }
            Ok(())
        }
    }
}
