//! Numeric value codec.
//!
//! Integers are packed little-endian into a declared number of bytes, reals
//! are packed as IEEE-754 binary32/binary64 little-endian. Encoding is
//! modular at the width boundary: byte `i` is `floor(n / 256^i) mod 256`.

use std::fmt;

use crate::error::CodecError;

/// Largest integer width a widget may declare. Widths up to this are packed
/// with native `u128` arithmetic.
pub const MAX_INTEGER_WIDTH: usize = 16;

/// IEEE-754 width of a real tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RealWidth {
    /// binary32, 4 bytes.
    Single,
    /// binary64, 8 bytes.
    Double,
}

impl RealWidth {
    pub fn from_byte_width(byte_width: usize) -> Result<Self, CodecError> {
        match byte_width {
            4 => Ok(Self::Single),
            8 => Ok(Self::Double),
            other => Err(CodecError::UnsupportedWidth(other)),
        }
    }

    #[must_use]
    pub fn byte_width(self) -> usize {
        match self {
            Self::Single => 4,
            Self::Double => 8,
        }
    }

    fn exponent_bits(self) -> usize {
        match self {
            Self::Single => 8,
            Self::Double => 11,
        }
    }

    fn mantissa_bits(self) -> usize {
        match self {
            Self::Single => 23,
            Self::Double => 52,
        }
    }
}

/// Encode decimal integer text into `byte_width` little-endian bytes.
///
/// Any non-negative whole number is accepted, however large; the result is
/// `n mod 256^byte_width`.
pub fn encode_integer(text: &str, byte_width: usize) -> Result<Vec<u8>, CodecError> {
    if byte_width == 0 {
        return Err(CodecError::UnsupportedWidth(0));
    }
    let digits = parse_digits(text)?;
    if byte_width <= MAX_INTEGER_WIDTH {
        // 256^w divides 2^128, so wrapping arithmetic keeps every byte we emit.
        let value = digits.iter().fold(0u128, |acc, &digit| {
            acc.wrapping_mul(10).wrapping_add(u128::from(digit))
        });
        let mut bytes = value.to_le_bytes().to_vec();
        bytes.truncate(byte_width);
        return Ok(bytes);
    }
    let mut quotient = digits;
    let mut bytes = Vec::with_capacity(byte_width);
    while bytes.len() < byte_width && !quotient.is_empty() {
        bytes.push(div_rem_256(&mut quotient));
    }
    bytes.resize(byte_width, 0);
    Ok(bytes)
}

/// Encode decimal real text as IEEE-754 little-endian bytes (width 4 or 8).
pub fn encode_real(text: &str, byte_width: usize) -> Result<Vec<u8>, CodecError> {
    let width = RealWidth::from_byte_width(byte_width)?;
    let value = parse_real(text)?;
    match width {
        RealWidth::Single => {
            #[allow(clippy::cast_possible_truncation)]
            let narrow = value as f32;
            if !narrow.is_finite() {
                return Err(CodecError::InvalidInput(text.trim().into()));
            }
            Ok(narrow.to_le_bytes().to_vec())
        }
        RealWidth::Double => Ok(value.to_le_bytes().to_vec()),
    }
}

/// Reassemble little-endian integer bytes (at most [`MAX_INTEGER_WIDTH`]).
pub fn decode_integer(bytes: &[u8]) -> Result<u128, CodecError> {
    if bytes.is_empty() || bytes.len() > MAX_INTEGER_WIDTH {
        return Err(CodecError::UnsupportedWidth(bytes.len()));
    }
    let mut buf = [0u8; MAX_INTEGER_WIDTH];
    buf[..bytes.len()].copy_from_slice(bytes);
    Ok(u128::from_le_bytes(buf))
}

/// Reinterpret 4 or 8 little-endian bytes as an IEEE-754 value.
pub fn decode_real(bytes: &[u8]) -> Result<f64, CodecError> {
    match RealWidth::from_byte_width(bytes.len())? {
        RealWidth::Single => {
            let raw: [u8; 4] = bytes
                .try_into()
                .map_err(|_| CodecError::UnsupportedWidth(bytes.len()))?;
            Ok(f64::from(f32::from_le_bytes(raw)))
        }
        RealWidth::Double => {
            let raw: [u8; 8] = bytes
                .try_into()
                .map_err(|_| CodecError::UnsupportedWidth(bytes.len()))?;
            Ok(f64::from_le_bytes(raw))
        }
    }
}

/// Decimal digit values of unsigned integer text, most significant first,
/// leading zeros removed.
fn parse_digits(text: &str) -> Result<Vec<u8>, CodecError> {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::InvalidInput(trimmed.into()));
    }
    Ok(unsigned
        .bytes()
        .map(|b| b - b'0')
        .skip_while(|digit| *digit == 0)
        .collect())
}

/// Divide a decimal digit string by 256 in place and return the remainder.
fn div_rem_256(digits: &mut Vec<u8>) -> u8 {
    let mut remainder = 0u32;
    let mut quotient = Vec::with_capacity(digits.len());
    for &digit in digits.iter() {
        remainder = remainder * 10 + u32::from(digit);
        #[allow(clippy::cast_possible_truncation)]
        let next = (remainder / 256) as u8;
        if next != 0 || !quotient.is_empty() {
            quotient.push(next);
        }
        remainder %= 256;
    }
    *digits = quotient;
    #[allow(clippy::cast_possible_truncation)]
    let byte = remainder as u8;
    byte
}

fn parse_real(text: &str) -> Result<f64, CodecError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CodecError::InvalidInput(trimmed.into())),
    }
}

/// Sign, exponent and mantissa fields of an encoded real.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealBits {
    pub width: RealWidth,
    pub value: f64,
    pub sign: u8,
    pub exponent: u16,
    pub mantissa: u64,
}

impl RealBits {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let width = RealWidth::from_byte_width(bytes.len())?;
        let value = decode_real(bytes)?;
        let mut buf = [0u8; 8];
        buf[..bytes.len()].copy_from_slice(bytes);
        let raw = u64::from_le_bytes(buf);
        let mantissa_bits = width.mantissa_bits();
        let exponent_mask = (1u64 << width.exponent_bits()) - 1;
        let sign_shift = mantissa_bits + width.exponent_bits();
        #[allow(clippy::cast_possible_truncation)]
        let bits = Self {
            width,
            value,
            sign: ((raw >> sign_shift) & 1) as u8,
            exponent: ((raw >> mantissa_bits) & exponent_mask) as u16,
            mantissa: raw & ((1u64 << mantissa_bits) - 1),
        };
        Ok(bits)
    }
}

impl fmt::Display for RealBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:0ew$b} {:0mw$b}",
            self.sign,
            self.exponent,
            self.mantissa,
            ew = self.width.exponent_bits(),
            mw = self.width.mantissa_bits(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_bytes_are_little_endian() {
        assert_eq!(encode_integer("16909060", 4).unwrap(), vec![4, 3, 2, 1]);
        assert_eq!(encode_integer("1", 2).unwrap(), vec![1, 0]);
    }

    #[test]
    fn integer_truncates_modulo_width() {
        assert_eq!(encode_integer("256", 1).unwrap(), vec![0]);
        assert_eq!(encode_integer("65537", 2).unwrap(), vec![1, 0]);
    }

    #[test]
    fn integer_high_bytes_do_not_wrap_at_32_bits() {
        // 2^40 + 5
        let bytes = encode_integer("1099511627781", 8).unwrap();
        assert_eq!(bytes, vec![5, 0, 0, 0, 0, 1, 0, 0]);
        let bytes = encode_integer("18446744073709551615", 8).unwrap();
        assert_eq!(bytes, vec![255; 8]);
    }

    #[test]
    fn integer_wider_than_u128_is_zero_padded() {
        let bytes = encode_integer("258", 20).unwrap();
        assert_eq!(bytes.len(), 20);
        assert_eq!(&bytes[..2], &[2, 1]);
        assert!(bytes[2..].iter().all(|b| *b == 0));
    }

    #[test]
    fn integer_rejects_negative_fractional_and_garbage() {
        for text in ["-1", "1.5", "", "  ", "+", "++1", "abc", "12abc", "0x10", "1_000"] {
            assert!(
                matches!(encode_integer(text, 4), Err(CodecError::InvalidInput(_))),
                "{text:?} should be rejected"
            );
        }
        assert_eq!(
            encode_integer("1", 0),
            Err(CodecError::UnsupportedWidth(0))
        );
    }

    #[test]
    fn integer_beyond_128_bits_wraps_modulo_width() {
        // 2^128 + 258
        let text = "340282366920938463463374607431768211714";
        assert_eq!(encode_integer(text, 1).unwrap(), vec![2]);
        assert_eq!(encode_integer(text, 2).unwrap(), vec![2, 1]);
        let mut wide = vec![0u8; 20];
        wide[0] = 2;
        wide[1] = 1;
        wide[16] = 1;
        assert_eq!(encode_integer(text, 20).unwrap(), wide);
        // 2^128
        assert_eq!(
            encode_integer("340282366920938463463374607431768211456", 1).unwrap(),
            vec![0]
        );
    }

    #[test]
    fn integer_wide_widths_agree_with_native_bytes() {
        let n = u128::MAX - 12_345;
        let bytes = encode_integer(&n.to_string(), 24).unwrap();
        assert_eq!(&bytes[..16], &n.to_le_bytes());
        assert!(bytes[16..].iter().all(|b| *b == 0));
        assert_eq!(encode_integer("0000", 18).unwrap(), vec![0; 18]);
    }

    #[test]
    fn integer_accepts_whitespace_and_plus_sign() {
        assert_eq!(encode_integer(" +7 ", 1).unwrap(), vec![7]);
    }

    #[test]
    fn real_single_and_double() {
        assert_eq!(encode_real("1.5", 4).unwrap(), vec![0, 0, 192, 63]);
        assert_eq!(
            encode_real("1.5", 8).unwrap(),
            vec![0, 0, 0, 0, 0, 0, 248, 63]
        );
        assert_eq!(encode_real("-2", 4).unwrap(), vec![0, 0, 0, 192]);
    }

    #[test]
    fn real_rejects_bad_text_and_width() {
        assert!(matches!(
            encode_real("abc", 4),
            Err(CodecError::InvalidInput(_))
        ));
        for text in ["NaN", "inf", "-infinity", "1e39"] {
            assert!(
                matches!(encode_real(text, 4), Err(CodecError::InvalidInput(_))),
                "{text:?} should be rejected"
            );
        }
        assert_eq!(encode_real("1.0", 2), Err(CodecError::UnsupportedWidth(2)));
        assert_eq!(encode_real("1.0", 16), Err(CodecError::UnsupportedWidth(16)));
    }

    #[test]
    fn real_round_trips_within_tolerance() {
        for text in ["0", "1.5", "-273.15", "3.14159265358979", "1e-7", "65504.25"] {
            let expected: f64 = text.parse().unwrap();
            let single = decode_real(&encode_real(text, 4).unwrap()).unwrap();
            assert!((single - expected).abs() <= expected.abs() * 1e-6 + f64::EPSILON);
            let double = decode_real(&encode_real(text, 8).unwrap()).unwrap();
            assert_eq!(double, expected);
        }
    }

    #[test]
    fn integer_reassembles_modulo_width() {
        let samples: [u128; 6] = [0, 1, 255, 256, 4_294_967_296, 123_456_789_012_345];
        for n in samples {
            for width in [1usize, 2, 4, 8] {
                let bytes = encode_integer(&n.to_string(), width).unwrap();
                assert_eq!(bytes.len(), width);
                let modulus = 1u128 << (8 * width);
                assert_eq!(decode_integer(&bytes).unwrap(), n % modulus);
            }
        }
    }

    #[test]
    fn decode_rejects_unsupported_lengths() {
        assert_eq!(decode_integer(&[]), Err(CodecError::UnsupportedWidth(0)));
        assert_eq!(decode_real(&[0; 3]), Err(CodecError::UnsupportedWidth(3)));
    }

    #[test]
    fn real_bits_split_fields() {
        let bits = RealBits::from_bytes(&encode_real("-1.5", 4).unwrap()).unwrap();
        assert_eq!(bits.sign, 1);
        assert_eq!(bits.exponent, 127);
        assert_eq!(bits.mantissa, 1 << 22);
        assert_eq!(
            bits.to_string(),
            "1 01111111 10000000000000000000000"
        );

        let bits = RealBits::from_bytes(&encode_real("1.5", 8).unwrap()).unwrap();
        assert_eq!(bits.sign, 0);
        assert_eq!(bits.exponent, 1023);
        assert_eq!(bits.mantissa, 1 << 51);
    }
}
