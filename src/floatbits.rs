//! This module contains the implementation of the IEEE-754 bit decomposer
//! and composer. It exposes the sign, biased exponent and fraction fields of
//! half, single and double precision values, generically over the format.

use crate::error::{Error, Result};
use crate::utils::mask;
use half::f16;

/// Describes a binary interchange format, following IEEE 754-2019
/// Table 3.5 — Binary interchange format parameters. The field widths are
/// compile-time constants of the implementing type, so no runtime type
/// inspection is needed to pick them.
pub trait FloatFormat: Copy {
    /// The total number of bits in the format.
    const TOTAL_BITS: u32;
    /// The number of bits in the biased exponent field.
    const EXPONENT_BITS: u32;
    /// The number of bits in the fraction field.
    const FRACTION_BITS: u32;
    /// The exponent bias.
    /// https://en.wikipedia.org/wiki/IEEE_754#Basic_and_interchange_formats
    const BIAS: i32;

    /// Returns the underlying bit pattern, widened to 64 bits.
    fn to_raw(self) -> u64;
    /// Reinterprets the low `TOTAL_BITS` bits of `bits` as a value.
    fn from_raw(bits: u64) -> Self;
}

impl FloatFormat for f16 {
    const TOTAL_BITS: u32 = 16;
    const EXPONENT_BITS: u32 = 5;
    const FRACTION_BITS: u32 = 10;
    const BIAS: i32 = 15;

    fn to_raw(self) -> u64 {
        self.to_bits() as u64
    }
    fn from_raw(bits: u64) -> Self {
        f16::from_bits(bits as u16)
    }
}

impl FloatFormat for f32 {
    const TOTAL_BITS: u32 = 32;
    const EXPONENT_BITS: u32 = 8;
    const FRACTION_BITS: u32 = 23;
    const BIAS: i32 = 127;

    fn to_raw(self) -> u64 {
        self.to_bits() as u64
    }
    fn from_raw(bits: u64) -> Self {
        f32::from_bits(bits as u32)
    }
}

impl FloatFormat for f64 {
    const TOTAL_BITS: u32 = 64;
    const EXPONENT_BITS: u32 = 11;
    const FRACTION_BITS: u32 = 52;
    const BIAS: i32 = 1023;

    fn to_raw(self) -> u64 {
        self.to_bits()
    }
    fn from_raw(bits: u64) -> Self {
        f64::from_bits(bits)
    }
}

/// The three bit fields of a floating point value: the sign bit, the biased
/// exponent and the fraction, each as an unsigned field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatParts {
    pub sign: bool,
    pub exponent: u64,
    pub fraction: u64,
}

/// Split `x` into its sign, biased exponent and fraction fields. This is a
/// total function: every bit pattern is valid, including NaN, the
/// infinities, subnormals and the signed zeros.
pub fn disassemble<F: FloatFormat>(x: F) -> FloatParts {
    let bits = x.to_raw();
    // Shift each field down first, then mask with a mask sized from the
    // field width.
    let sign = (bits >> (F::EXPONENT_BITS + F::FRACTION_BITS)) & 1 == 1;
    let exponent = (bits >> F::FRACTION_BITS) & mask(F::EXPONENT_BITS);
    let fraction = bits & mask(F::FRACTION_BITS);
    FloatParts {
        sign,
        exponent,
        fraction,
    }
}

/// Reconstruct a value from its sign, biased exponent and fraction fields.
/// Fails when a field does not fit in its allotted width. For every `x`,
/// `assemble(disassemble(x))` reproduces the exact bit pattern of `x`.
pub fn assemble<F: FloatFormat>(
    sign: bool,
    exponent: u64,
    fraction: u64,
) -> Result<F> {
    if exponent > mask(F::EXPONENT_BITS) {
        return Err(Error::FieldOverflow {
            field: "exponent",
            value: exponent as u128,
            bits: F::EXPONENT_BITS,
        });
    }
    if fraction > mask(F::FRACTION_BITS) {
        return Err(Error::FieldOverflow {
            field: "fraction",
            value: fraction as u128,
            bits: F::FRACTION_BITS,
        });
    }

    let mut bits = sign as u64;
    bits <<= F::EXPONENT_BITS;
    bits |= exponent;
    bits <<= F::FRACTION_BITS;
    bits |= fraction;
    Ok(F::from_raw(bits))
}

/// Returns the minimum exponent of a normal value, `1 - bias`.
pub fn min_exponent<F: FloatFormat>() -> i32 {
    1 - F::BIAS
}

/// Returns the maximum exponent of a normal value, which equals the bias.
pub fn max_exponent<F: FloatFormat>() -> i32 {
    F::BIAS
}

/// The smallest positive normal value: exponent field one, fraction zero.
pub fn min_positive_normal<F: FloatFormat>() -> F {
    F::from_raw(1u64 << F::FRACTION_BITS)
}

/// The largest positive normal value: exponent field all-ones minus one,
/// fraction all-ones.
pub fn max_positive_normal<F: FloatFormat>() -> F {
    let exponent = mask(F::EXPONENT_BITS) - 1;
    F::from_raw((exponent << F::FRACTION_BITS) | mask(F::FRACTION_BITS))
}

/// The smallest positive subnormal value: exponent field zero, fraction one.
pub fn min_positive_subnormal<F: FloatFormat>() -> F {
    F::from_raw(1)
}

/// The largest positive subnormal value: exponent field zero, fraction
/// all-ones.
pub fn max_positive_subnormal<F: FloatFormat>() -> F {
    F::from_raw(mask(F::FRACTION_BITS))
}

#[cfg(test)]
fn special_f64_values() -> [f64; 16] {
    [
        0.0,
        -0.0,
        1.0,
        -1.0,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NAN,
        -f64::NAN,
        f64::MIN,
        f64::MAX,
        f64::MIN_POSITIVE,
        f64::EPSILON,
        f64::from_bits(1),           // Smallest subnormal.
        f64::from_bits(0xf_ffff_ffff_ffff), // Largest subnormal.
        std::f64::consts::PI,
        355. / 113.,
    ]
}

#[test]
fn test_disassemble_fields() {
    // 1.0 is all-zeros except a biased exponent equal to the bias.
    let p = disassemble(1.0f64);
    assert!(!p.sign);
    assert_eq!(p.exponent, 1023);
    assert_eq!(p.fraction, 0);

    let p = disassemble(-2.0f32);
    assert!(p.sign);
    assert_eq!(p.exponent, 128);
    assert_eq!(p.fraction, 0);

    // -0.0 is the sign bit alone.
    let p = disassemble(-0.0f64);
    assert!(p.sign);
    assert_eq!(p.exponent, 0);
    assert_eq!(p.fraction, 0);

    // Infinity has an all-ones exponent and a zero fraction.
    let p = disassemble(f32::INFINITY);
    assert!(!p.sign);
    assert_eq!(p.exponent, 255);
    assert_eq!(p.fraction, 0);

    // NaN has an all-ones exponent and a nonzero fraction.
    let p = disassemble(f64::NAN);
    assert_eq!(p.exponent, 2047);
    assert_ne!(p.fraction, 0);

    // Subnormals have a zero exponent field.
    let p = disassemble(f64::from_bits(1));
    assert!(!p.sign);
    assert_eq!(p.exponent, 0);
    assert_eq!(p.fraction, 1);

    let p = disassemble(f16::from_bits(0x3c00)); // 1.0 in half precision.
    assert!(!p.sign);
    assert_eq!(p.exponent, 15);
    assert_eq!(p.fraction, 0);
}

#[test]
fn test_assemble_errors() {
    // One past the width of each field.
    assert_eq!(
        assemble::<f32>(false, 256, 0),
        Err(Error::FieldOverflow {
            field: "exponent",
            value: 256,
            bits: 8,
        })
    );
    assert_eq!(
        assemble::<f64>(false, 0, 1 << 52),
        Err(Error::FieldOverflow {
            field: "fraction",
            value: 1 << 52,
            bits: 52,
        })
    );
    assert!(assemble::<f16>(true, 32, 0).is_err());
    assert!(assemble::<f16>(true, 31, 1023).is_ok());
}

#[test]
fn test_roundtrip_special_values() {
    for v in special_f64_values() {
        let p = disassemble(v);
        let back: f64 = assemble(p.sign, p.exponent, p.fraction).unwrap();
        assert_eq!(v.to_bits(), back.to_bits());

        let v = v as f32;
        let p = disassemble(v);
        let back: f32 = assemble(p.sign, p.exponent, p.fraction).unwrap();
        assert_eq!(v.to_bits(), back.to_bits());
    }
}

#[test]
fn test_roundtrip_all_f16() {
    // Half precision is small enough to sweep every bit pattern.
    for bits in 0..=u16::MAX {
        let v = f16::from_bits(bits);
        let p = disassemble(v);
        let back: f16 = assemble(p.sign, p.exponent, p.fraction).unwrap();
        assert_eq!(bits, back.to_bits());
    }
}

#[test]
fn test_roundtrip_random_patterns() {
    use crate::utils::XorShift;

    let mut rng = XorShift::new();
    for _ in 0..500 {
        let bits = rng.get64();

        let v = f64::from_bits(bits);
        let p = disassemble(v);
        let back: f64 = assemble(p.sign, p.exponent, p.fraction).unwrap();
        assert_eq!(bits, back.to_bits());

        let v = f32::from_bits(bits as u32);
        let p = disassemble(v);
        let back: f32 = assemble(p.sign, p.exponent, p.fraction).unwrap();
        assert_eq!(bits as u32, back.to_bits());
    }
}

#[test]
fn test_derived_queries() {
    assert_eq!(min_exponent::<f32>(), -126);
    assert_eq!(max_exponent::<f32>(), 127);
    assert_eq!(min_exponent::<f64>(), -1022);
    assert_eq!(max_exponent::<f64>(), 1023);
    assert_eq!(min_exponent::<f16>(), -14);
    assert_eq!(max_exponent::<f16>(), 15);

    assert_eq!(min_positive_normal::<f32>(), f32::MIN_POSITIVE);
    assert_eq!(max_positive_normal::<f32>(), f32::MAX);
    assert_eq!(min_positive_normal::<f64>(), f64::MIN_POSITIVE);
    assert_eq!(max_positive_normal::<f64>(), f64::MAX);

    assert_eq!(min_positive_subnormal::<f64>().to_bits(), 1);
    assert_eq!(max_positive_subnormal::<f32>().to_bits(), 0x007f_ffff);
    // The largest subnormal is one ulp below the smallest normal.
    assert_eq!(
        max_positive_subnormal::<f64>().to_bits() + 1,
        min_positive_normal::<f64>().to_bits()
    );
    assert_eq!(max_positive_normal::<f16>(), f16::MAX);
}
