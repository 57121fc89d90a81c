//! This module contains the implementation of the base-N integer codec. It
//! converts integers of every width, including arbitrary-precision integers,
//! to and from digit strings in bases 2..=64.

use crate::error::{Error, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};

/// The canonical digit alphabet: the decimal digits, the lower-case letters,
/// and printable ASCII symbol characters, 64 symbols in total. The letter L
/// is the single upper-case exception, because the lower-case letter is
/// easily confused with the digit one and doubles as a numeric-literal
/// suffix. Period, comma, underscore and double-quote are excluded since
/// they serve as group separators and string delimiters.
const DIGITS: &[u8; 64] =
    b"0123456789abcdefghijkLmnopqrstuvwxyz!#$%&'()*+-/:;<=>?@[\\]^`{|}~";

/// The smallest supported base.
pub const MIN_BASE: u32 = 2;
/// The largest supported base.
pub const MAX_BASE: u32 = 64;

/// Controls the case of letter digits in encoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterCase {
    /// Letters appear exactly as they do in the canonical alphabet.
    Canonical,
    /// Force all letters to lower-case.
    Lower,
    /// Force all letters to upper-case.
    Upper,
}

fn check_base(base: u32) -> Result<()> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(Error::BaseOutOfRange(base));
    }
    Ok(())
}

/// Returns the digits that are valid for `base`, in canonical order.
pub fn valid_digits(base: u32) -> String {
    DIGITS[..base as usize].iter().map(|&b| b as char).collect()
}

/// Returns the numeric value of the digit `c`, or None if the character is
/// not part of the alphabet. Letter lookup is case-insensitive.
fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'a'..='z' => Some(10 + c as u32 - 'a' as u32),
        'A'..='Z' => Some(10 + c as u32 - 'A' as u32),
        _ => DIGITS[36..]
            .iter()
            .position(|&d| d as char == c)
            .map(|p| 36 + p as u32),
    }
}

fn digit_char(value: u32, case: LetterCase) -> char {
    let c = DIGITS[value as usize] as char;
    match case {
        LetterCase::Canonical => c,
        LetterCase::Lower => c.to_ascii_lowercase(),
        LetterCase::Upper => c.to_ascii_uppercase(),
    }
}

/// Encode `value` as a string of digits in `base`. The digit portion is
/// left-padded with zeros to `min_width` characters; a leading minus sign
/// does not count towards the width. `case` selects the letter case of the
/// output digits.
pub fn encode<T: Into<BigInt>>(
    value: T,
    base: u32,
    min_width: usize,
    case: LetterCase,
) -> Result<String> {
    check_base(base)?;
    if min_width == 0 {
        return Err(Error::WidthOutOfRange);
    }

    let value: BigInt = value.into();
    let negative = value.sign() == Sign::Minus;
    // The magnitude is reduced digit by digit. Working on the unsigned
    // magnitude makes the most negative value of each signed width safe,
    // because the arbitrary-precision intermediate can't overflow.
    let mut magnitude: BigUint = value.magnitude().clone();
    let big_base = BigUint::from(base);

    let mut digits: Vec<char> = Vec::new();
    if magnitude.is_zero() {
        digits.push('0');
    }
    while !magnitude.is_zero() {
        let rem = (&magnitude % &big_base).to_u32().unwrap();
        magnitude /= &big_base;
        digits.push(digit_char(rem, case));
    }

    // The digits were produced least-significant first.
    while digits.len() < min_width {
        digits.push('0');
    }
    // The minus character doubles as the digit with value 46. A leading
    // '-' digit of a non-negative number would decode as a sign, so guard
    // it with a zero digit, which decoding permits and ignores.
    if !negative && *digits.last().unwrap() == '-' {
        digits.push('0');
    }
    if negative {
        digits.push('-');
    }
    digits.reverse();
    Ok(String::from_iter(digits))
}

/// Decode a digit string in `base` into an arbitrary-precision integer.
/// Whitespace and underscores are treated as digit-group separators and are
/// ignored wherever they appear. A single leading minus sign is accepted.
pub fn decode_bigint(s: &str, base: u32) -> Result<BigInt> {
    check_base(base)?;

    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();
    if cleaned.is_empty() {
        return Err(Error::EmptyInput);
    }

    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    if digits.is_empty() {
        return Err(Error::EmptyInput);
    }

    let big_base = BigUint::from(base);
    let mut value = BigUint::zero();
    for c in digits.chars() {
        let d = digit_value(c)
            .filter(|d| *d < base)
            .ok_or_else(|| Error::InvalidDigit {
                digit: c,
                base,
                valid: valid_digits(base),
            })?;
        value = value * &big_base + d;
    }

    let sign = if negative { Sign::Minus } else { Sign::Plus };
    Ok(BigInt::from_biguint(sign, value))
}

/// The integer types that a digit string can be decoded into.
pub trait FromRadix: Sized {
    /// Narrow the decoded arbitrary-precision value into Self, reporting an
    /// overflow when the value is outside of the representable range.
    fn from_bigint(value: &BigInt) -> Result<Self>;
}

macro_rules! impl_from_radix {
    ($($t:ty => $conv:ident),* $(,)?) => {
        $(impl FromRadix for $t {
            fn from_bigint(value: &BigInt) -> Result<Self> {
                value.$conv().ok_or_else(|| Error::Overflow {
                    value: value.to_string(),
                    target: stringify!($t),
                })
            }
        })*
    };
}

impl_from_radix!(
    i8 => to_i8,
    i16 => to_i16,
    i32 => to_i32,
    i64 => to_i64,
    i128 => to_i128,
    u8 => to_u8,
    u16 => to_u16,
    u32 => to_u32,
    u64 => to_u64,
    u128 => to_u128,
);

impl FromRadix for BigInt {
    fn from_bigint(value: &BigInt) -> Result<Self> {
        Ok(value.clone())
    }
}

/// Decode a digit string in `base` into the integer type `T`.
pub fn decode<T: FromRadix>(s: &str, base: u32) -> Result<T> {
    let value = decode_bigint(s, base)?;
    T::from_bigint(&value)
}

#[test]
fn test_encode_simple() {
    use LetterCase::Canonical;
    assert_eq!(encode(0, 2, 1, Canonical).unwrap(), "0");
    assert_eq!(encode(0, 10, 3, Canonical).unwrap(), "000");
    assert_eq!(encode(255, 16, 1, Canonical).unwrap(), "ff");
    assert_eq!(encode(255, 16, 4, Canonical).unwrap(), "00ff");
    assert_eq!(encode(255u8, 2, 1, Canonical).unwrap(), "11111111");
    assert_eq!(encode(1995, 10, 1, Canonical).unwrap(), "1995");
    assert_eq!(encode(-5, 10, 4, Canonical).unwrap(), "-0005");
    assert_eq!(encode(35, 36, 1, Canonical).unwrap(), "z");
}

#[test]
fn test_encode_letter_case() {
    assert_eq!(encode(255, 16, 1, LetterCase::Upper).unwrap(), "FF");
    assert_eq!(encode(255, 16, 1, LetterCase::Lower).unwrap(), "ff");
    // The letter L is upper-case in the canonical alphabet.
    assert_eq!(encode(21, 36, 1, LetterCase::Canonical).unwrap(), "L");
    assert_eq!(encode(21, 36, 1, LetterCase::Lower).unwrap(), "l");
    assert_eq!(encode(21, 36, 1, LetterCase::Upper).unwrap(), "L");
}

#[test]
fn test_encode_symbol_digits() {
    use LetterCase::Canonical;
    // The symbol characters start right after the letters.
    assert_eq!(encode(36, 64, 1, Canonical).unwrap(), "!");
    assert_eq!(encode(63, 64, 1, Canonical).unwrap(), "~");
    assert_eq!(encode(64, 64, 1, Canonical).unwrap(), "10");
    // Case selection has no effect on symbol digits.
    assert_eq!(encode(63, 64, 1, LetterCase::Upper).unwrap(), "~");
}

#[test]
fn test_minus_digit_disambiguation() {
    use LetterCase::Canonical;
    // The digit with value 46 is the minus character. A non-negative
    // number whose leading digit is 46 gets a guarding zero, so that the
    // digit is not mistaken for a sign when decoding.
    assert_eq!(encode(46, 64, 1, Canonical).unwrap(), "0-");
    assert_eq!(decode::<u32>("0-", 64).unwrap(), 46);
    assert_eq!(encode(46 * 64 + 5, 64, 1, Canonical).unwrap(), "0-5");
    assert_eq!(decode::<u32>("0-5", 64).unwrap(), 46 * 64 + 5);

    // For negative numbers the leading '-' digit sits behind the sign.
    assert_eq!(encode(-46, 64, 1, Canonical).unwrap(), "--");
    assert_eq!(decode::<i32>("--", 64).unwrap(), -46);

    // A '-' in the middle of the string is always a digit.
    assert_eq!(decode::<u32>("1-", 64).unwrap(), 64 + 46);

    // Round-trip a block of values whose leading digit is 46.
    for v in (46 * 64)..(47 * 64) {
        let s = encode(v, 64, 1, Canonical).unwrap();
        assert_eq!(decode::<u32>(&s, 64).unwrap(), v);
    }
}

#[test]
fn test_encode_most_negative() {
    use LetterCase::Canonical;
    // The most negative value of a signed width must not overflow during
    // the sign-magnitude split.
    assert_eq!(encode(i8::MIN, 10, 1, Canonical).unwrap(), "-128");
    assert_eq!(
        encode(i64::MIN, 10, 1, Canonical).unwrap(),
        "-9223372036854775808"
    );
    assert_eq!(
        encode(i128::MIN, 16, 1, Canonical).unwrap(),
        "-80000000000000000000000000000000"
    );
}

#[test]
fn test_encode_errors() {
    use LetterCase::Canonical;
    assert_eq!(encode(123, 1, 1, Canonical), Err(Error::BaseOutOfRange(1)));
    assert_eq!(encode(123, 65, 1, Canonical), Err(Error::BaseOutOfRange(65)));
    assert_eq!(encode(123, 10, 0, Canonical), Err(Error::WidthOutOfRange));
}

#[test]
fn test_decode_simple() {
    assert_eq!(decode::<u8>("0", 2).unwrap(), 0);
    assert_eq!(decode::<u8>("ff", 16).unwrap(), 255);
    assert_eq!(decode::<u8>("FF", 16).unwrap(), 255);
    assert_eq!(decode::<i32>("-1995", 10).unwrap(), -1995);
    assert_eq!(decode::<i64>("7fffffffffffffff", 16).unwrap(), i64::MAX);
    assert_eq!(decode::<i64>("-8000000000000000", 16).unwrap(), i64::MIN);
    // Leading zeros are permitted and ignored.
    assert_eq!(decode::<u32>("000123", 10).unwrap(), 123);
    // Letter lookup is case-insensitive, including the letter L.
    assert_eq!(decode::<u32>("l", 36).unwrap(), 21);
    assert_eq!(decode::<u32>("L", 36).unwrap(), 21);
}

#[test]
fn test_decode_group_separators() {
    assert_eq!(decode::<u32>(" 1 000 000 ", 10).unwrap(), 1_000_000);
    assert_eq!(decode::<u32>("1_000_000", 10).unwrap(), 1_000_000);
    assert_eq!(decode::<u32>("1\u{a0}000\u{2009}000", 10).unwrap(), 1_000_000);
    assert_eq!(decode::<u16>("\tff\n", 16).unwrap(), 255);
}

#[test]
fn test_decode_errors() {
    assert_eq!(decode::<u8>("", 10), Err(Error::EmptyInput));
    assert_eq!(decode::<u8>("   ", 10), Err(Error::EmptyInput));
    assert_eq!(decode::<u8>("-", 10), Err(Error::EmptyInput));
    assert_eq!(decode::<u8>("12", 65), Err(Error::BaseOutOfRange(65)));

    // A digit that is not valid for the base names the valid digit set.
    assert_eq!(
        decode::<u32>("12g", 16),
        Err(Error::InvalidDigit {
            digit: 'g',
            base: 16,
            valid: "0123456789abcdef".to_string(),
        })
    );
    // The group separators are not digits.
    assert!(decode::<u32>("1.5", 10).is_err());
    assert!(decode::<u32>("1,5", 10).is_err());

    // Decoding a value that's too wide for the target reports the value.
    assert_eq!(
        decode::<i8>("99999999999999999999999999999", 10),
        Err(Error::Overflow {
            value: "99999999999999999999999999999".to_string(),
            target: "i8",
        })
    );
    assert_eq!(
        decode::<u8>("-1", 10),
        Err(Error::Overflow {
            value: "-1".to_string(),
            target: "u8",
        })
    );
}

#[test]
fn test_roundtrip_boundary_values() {
    use LetterCase::Canonical;
    for base in MIN_BASE..=MAX_BASE {
        for v in [0i128, 1, -1, i128::MIN, i128::MAX] {
            let s = encode(v, base, 1, Canonical).unwrap();
            assert_eq!(decode::<i128>(&s, base).unwrap(), v, "base {}", base);
        }
        for v in [0u8, 1, u8::MAX] {
            let s = encode(v, base, 1, Canonical).unwrap();
            assert_eq!(decode::<u8>(&s, base).unwrap(), v, "base {}", base);
        }
        for v in [i16::MIN, i16::MAX] {
            let s = encode(v, base, 1, Canonical).unwrap();
            assert_eq!(decode::<i16>(&s, base).unwrap(), v, "base {}", base);
        }
        for v in [u64::MAX, u64::MAX - 1] {
            let s = encode(v, base, 1, Canonical).unwrap();
            assert_eq!(decode::<u64>(&s, base).unwrap(), v, "base {}", base);
        }
    }
}

#[test]
fn test_roundtrip_random() {
    use crate::utils::XorShift;
    use LetterCase::{Lower, Upper};

    let mut rng = XorShift::new();
    for base in MIN_BASE..=MAX_BASE {
        for _ in 0..20 {
            let v = rng.get64();
            let s = encode(v, base, 1, Lower).unwrap();
            assert_eq!(decode::<u64>(&s, base).unwrap(), v);

            let v = rng.get64() as i64;
            let s = encode(v, base, 1, Upper).unwrap();
            assert_eq!(decode::<i64>(&s, base).unwrap(), v);

            let v = ((rng.get64() as u128) << 64) | rng.get64() as u128;
            let s = encode(v, base, 7, Lower).unwrap();
            assert_eq!(decode::<u128>(&s, base).unwrap(), v);
        }
    }
}

#[test]
fn test_roundtrip_bigint() {
    use LetterCase::Canonical;
    // A 500-bit number.
    let big: BigInt = (BigInt::from(1) << 500usize) - 1;
    for base in [2, 10, 16, 36, 64] {
        let s = encode(big.clone(), base, 1, Canonical).unwrap();
        assert_eq!(decode::<BigInt>(&s, base).unwrap(), big);
        let s = encode(-big.clone(), base, 1, Canonical).unwrap();
        assert_eq!(decode::<BigInt>(&s, base).unwrap(), -big.clone());
    }
}

#[test]
fn test_valid_digit_sets() {
    assert_eq!(valid_digits(2), "01");
    assert_eq!(valid_digits(16), "0123456789abcdef");
    assert_eq!(valid_digits(36), "0123456789abcdefghijkLmnopqrstuvwxyz");
    assert_eq!(valid_digits(64).len(), 64);
}
