//! This module contains the bit codec and the transcendental math functions
//! for the 128-bit fixed-point decimal type. The layout of
//! [`rust_decimal::Decimal`] is one sign bit, an 8-bit scale factor capped
//! at 28, and a 96-bit unsigned integer mantissa; the type has no native
//! logarithm or hyperbolic functions, so they are built here on top of its
//! exponential and square-root primitives.

use crate::error::{Error, Result};
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};

/// The largest supported scale factor (number of decimal fraction digits).
pub const MAX_SCALE: u32 = 28;

const MANTISSA_MASK: u128 = (1u128 << 96) - 1;

/// The three fields of a decimal value: the sign, the scale factor and the
/// 96-bit unsigned mantissa. The represented value is
/// `(-1)^sign * mantissa / 10^scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalParts {
    pub negative: bool,
    pub scale: u32,
    pub mantissa: u128,
}

/// Split a decimal into its sign, scale and mantissa fields. Total over
/// every value, including the negative zero.
pub fn disassemble(d: Decimal) -> DecimalParts {
    DecimalParts {
        negative: d.is_sign_negative(),
        scale: d.scale(),
        mantissa: d.mantissa().unsigned_abs(),
    }
}

/// Reconstruct a decimal from its fields. Fails when the scale is above
/// [`MAX_SCALE`] or the mantissa does not fit in 96 bits. For every `d`,
/// `assemble(disassemble(d))` reproduces `d` exactly.
pub fn assemble(parts: DecimalParts) -> Result<Decimal> {
    if parts.scale > MAX_SCALE {
        return Err(Error::ScaleOutOfRange(parts.scale));
    }
    if parts.mantissa > MANTISSA_MASK {
        return Err(Error::FieldOverflow {
            field: "mantissa",
            value: parts.mantissa,
            bits: 96,
        });
    }
    let lo = parts.mantissa as u32;
    let mid = (parts.mantissa >> 32) as u32;
    let hi = (parts.mantissa >> 64) as u32;
    Ok(Decimal::from_parts(lo, mid, hi, parts.negative, parts.scale))
}

/// ln(2) to the full precision of the type.
fn ln_2() -> Decimal {
    Decimal::from_i128_with_scale(6931471805599453094172321215, 28)
}

/// ln(10) to the full precision of the type.
fn ln_10() -> Decimal {
    Decimal::from_i128_with_scale(23025850929940456840179914547, 28)
}

fn exp_tolerance() -> Decimal {
    Decimal::new(1, 28)
}

fn exp_checked(x: Decimal, ctx: &'static str) -> Result<Decimal> {
    x.checked_exp_with_tolerance(exp_tolerance())
        .ok_or(Error::DecimalOverflow(ctx))
}

/// Multiply or divide `d` by 10^shift. The power is split in two halves
/// because 10^shift itself is not representable when the shift nears the
/// maximum exponent of the type.
fn shift_pow10(d: Decimal, shift: i32) -> Result<Decimal> {
    let a = shift / 2;
    let b = shift - a;
    let pa = Decimal::TEN.powi(i64::from(a.unsigned_abs()));
    let pb = Decimal::TEN.powi(i64::from(b.unsigned_abs()));
    let shifted = if shift >= 0 {
        d.checked_div(pa).and_then(|v| v.checked_div(pb))
    } else {
        d.checked_mul(pa).and_then(|v| v.checked_mul(pb))
    };
    shifted.ok_or(Error::DecimalOverflow("ln"))
}

/// Natural logarithm. Fails for zero (the type has no infinity to return)
/// and for negative arguments (the result would be complex-valued).
pub fn ln(d: Decimal) -> Result<Decimal> {
    if d.is_zero() {
        return Err(Error::LogOfZero);
    }
    if d.is_sign_negative() {
        return Err(Error::LogOfNegative);
    }
    if d == Decimal::ONE {
        return Ok(Decimal::ZERO);
    }
    if d == Decimal::TWO {
        return Ok(ln_2());
    }
    if d == Decimal::TEN {
        return Ok(ln_10());
    }
    if d == Decimal::E {
        return Ok(Decimal::ONE);
    }

    // Estimate the decimal scale of the argument. Only the approximate
    // magnitude matters because the series below accepts the whole
    // [0.1, 1) range, so a low-precision log10 is good enough.
    let approx = d.to_f64().ok_or(Error::DecimalOverflow("ln"))?;
    let mut scale = approx.log10().floor() as i32 + 1;
    let mut y = shift_pow10(d, scale)?;

    // The f64 estimate can be off by one near exact powers of ten.
    let tenth = Decimal::new(1, 1);
    while y >= Decimal::ONE {
        y /= Decimal::TEN;
        scale += 1;
    }
    while y < tenth {
        y *= Decimal::TEN;
        scale -= 1;
    }

    // Mercator series for ln(1+x) with x = y - 1 in [-0.9, 0), summed
    // until a term rounds to zero at the precision of the type.
    let x = y - Decimal::ONE;
    let mut sum = Decimal::ZERO;
    let mut pow = Decimal::ONE;
    let mut k = 1u32;
    loop {
        pow *= x;
        let term = pow / Decimal::from(k);
        if term.is_zero() || k > 1500 {
            break;
        }
        if k % 2 == 1 {
            sum += term;
        } else {
            sum -= term;
        }
        k += 1;
    }

    // Undo the scaling: ln(d) = ln(y) + scale * ln(10).
    Ok(sum + Decimal::from(scale) * ln_10())
}

/// Logarithm of `d` in an arbitrary `base`. The base-1 logarithm is
/// undefined for every argument; `log(1, b)` is zero for every other base,
/// including zero, mirroring the 0^0 = 1 convention.
pub fn log(d: Decimal, base: Decimal) -> Result<Decimal> {
    if base == Decimal::ONE {
        return Err(Error::LogBaseOne);
    }
    if d == Decimal::ONE {
        return Ok(Decimal::ZERO);
    }
    Ok(ln(d)? / ln(base)?)
}

/// Base-2 logarithm.
pub fn log2(d: Decimal) -> Result<Decimal> {
    Ok(ln(d)? / ln_2())
}

/// Base-10 logarithm.
pub fn log10(d: Decimal) -> Result<Decimal> {
    Ok(ln(d)? / ln_10())
}

/// Hyperbolic sine, (e^x - e^-x) / 2.
pub fn sinh(x: Decimal) -> Result<Decimal> {
    let ex = exp_checked(x, "sinh")?;
    let enx = exp_checked(-x, "sinh")?;
    Ok((ex - enx) / Decimal::TWO)
}

/// Hyperbolic cosine, (e^x + e^-x) / 2.
pub fn cosh(x: Decimal) -> Result<Decimal> {
    let ex = exp_checked(x, "cosh")?;
    let enx = exp_checked(-x, "cosh")?;
    ex.checked_add(enx)
        .map(|s| s / Decimal::TWO)
        .ok_or(Error::DecimalOverflow("cosh"))
}

/// Hyperbolic tangent, (e^2x - 1) / (e^2x + 1). When e^2x leaves the
/// representable range the result saturates to +-1, which tanh has already
/// reached at this precision.
pub fn tanh(x: Decimal) -> Result<Decimal> {
    let saturated = if x.is_sign_negative() {
        -Decimal::ONE
    } else {
        Decimal::ONE
    };
    let two_x = match x.checked_mul(Decimal::TWO) {
        Some(v) => v,
        None => return Ok(saturated),
    };
    match two_x
        .checked_exp_with_tolerance(exp_tolerance())
        .and_then(|e| e.checked_add(Decimal::ONE).map(|d| (e - Decimal::ONE) / d))
    {
        Some(t) => Ok(t),
        None => Ok(saturated),
    }
}

/// Inverse hyperbolic sine, ln(x + sqrt(x^2 + 1)).
pub fn asinh(x: Decimal) -> Result<Decimal> {
    // asinh is odd. Evaluating the identity on the magnitude avoids the
    // cancellation in x + sqrt(x^2 + 1) for negative arguments.
    let m = x.abs();
    let sq = m
        .checked_mul(m)
        .and_then(|v| v.checked_add(Decimal::ONE))
        .ok_or(Error::DecimalOverflow("asinh"))?;
    let root = sq.sqrt().ok_or(Error::DecimalOverflow("asinh"))?;
    let r = ln(m + root)?;
    Ok(if x.is_sign_negative() { -r } else { r })
}

/// Inverse hyperbolic cosine, ln(x + sqrt(x^2 - 1)), defined for x >= 1.
pub fn acosh(x: Decimal) -> Result<Decimal> {
    if x < Decimal::ONE {
        return Err(Error::OutOfRange("acosh is defined for x >= 1"));
    }
    let sq = x
        .checked_mul(x)
        .map(|v| v - Decimal::ONE)
        .ok_or(Error::DecimalOverflow("acosh"))?;
    let root = sq.sqrt().ok_or(Error::DecimalOverflow("acosh"))?;
    ln(x + root)
}

/// Inverse hyperbolic tangent, ln((1 + x) / (1 - x)) / 2, defined for
/// |x| < 1.
pub fn atanh(x: Decimal) -> Result<Decimal> {
    if x.abs() >= Decimal::ONE {
        return Err(Error::OutOfRange("atanh is defined for |x| < 1"));
    }
    let ratio = (Decimal::ONE + x) / (Decimal::ONE - x);
    Ok(ln(ratio)? / Decimal::TWO)
}

#[cfg(test)]
fn assert_close(a: Decimal, b: Decimal, eps: Decimal) {
    assert!((a - b).abs() <= eps, "{} != {} (eps {})", a, b, eps);
}

#[test]
fn test_parts_roundtrip_boundary() {
    for d in [
        Decimal::ZERO,
        Decimal::MIN,
        Decimal::MAX,
        Decimal::ONE,
        Decimal::new(-15, 4),
        Decimal::from_i128_with_scale(1, 28),
    ] {
        let p = disassemble(d);
        assert_eq!(assemble(p).unwrap(), d);
    }

    let p = disassemble(Decimal::MAX);
    assert!(!p.negative);
    assert_eq!(p.scale, 0);
    assert_eq!(p.mantissa, MANTISSA_MASK);

    let p = disassemble(Decimal::MIN);
    assert!(p.negative);
    assert_eq!(p.mantissa, MANTISSA_MASK);
}

#[test]
fn test_parts_roundtrip_negative_zero() {
    let p = DecimalParts {
        negative: true,
        scale: 5,
        mantissa: 0,
    };
    let d = assemble(p).unwrap();
    // The negative zero keeps its sign and scale through the round-trip.
    assert_eq!(disassemble(d), p);
    assert_eq!(d, Decimal::ZERO);
}

#[test]
fn test_parts_roundtrip_random() {
    use crate::utils::XorShift;

    let mut rng = XorShift::new();
    for i in 0..500 {
        let mantissa =
            (((rng.get64() as u128) << 64) | rng.get64() as u128) & MANTISSA_MASK;
        let parts = DecimalParts {
            negative: i % 2 == 0,
            scale: (rng.get64() % 29) as u32,
            mantissa,
        };
        let d = assemble(parts).unwrap();
        assert_eq!(disassemble(d), parts);
    }
}

#[test]
fn test_assemble_errors() {
    let p = DecimalParts {
        negative: false,
        scale: 29,
        mantissa: 0,
    };
    assert_eq!(assemble(p), Err(Error::ScaleOutOfRange(29)));

    let p = DecimalParts {
        negative: false,
        scale: 0,
        mantissa: 1u128 << 96,
    };
    assert_eq!(
        assemble(p),
        Err(Error::FieldOverflow {
            field: "mantissa",
            value: 1u128 << 96,
            bits: 96,
        })
    );
}

#[test]
fn test_ln_fast_paths() {
    assert_eq!(ln(Decimal::ONE).unwrap(), Decimal::ZERO);
    assert_eq!(ln(Decimal::TWO).unwrap(), ln_2());
    assert_eq!(ln(Decimal::TEN).unwrap(), ln_10());
    assert_eq!(ln(Decimal::E).unwrap(), Decimal::ONE);
}

#[test]
fn test_ln_reference_values() {
    // ln(4) must agree with 2*ln(2) well beyond f64 precision.
    let eps = Decimal::new(1, 24);
    assert_close(ln(Decimal::from(4)).unwrap(), ln_2() * Decimal::TWO, eps);
    // ln(100) = 2*ln(10).
    assert_close(ln(Decimal::from(100)).unwrap(), ln_10() * Decimal::TWO, eps);
    // ln(20) = ln(2) + ln(10).
    assert_close(ln(Decimal::from(20)).unwrap(), ln_2() + ln_10(), eps);
}

#[test]
fn test_ln_against_f64() {
    for v in [
        Decimal::new(5, 1),     // 0.5
        Decimal::new(15, 1),    // 1.5
        Decimal::from(3),
        Decimal::new(123456, 3), // 123.456
        Decimal::new(1, 4),      // 0.0001
        Decimal::from_i128_with_scale(1, 28), // Min positive value.
        Decimal::from(10_000_000_000_000_000_000u64),
        Decimal::MAX,
    ] {
        let expected = v.to_f64().unwrap().ln();
        let got = ln(v).unwrap().to_f64().unwrap();
        assert!(
            (got - expected).abs() <= 1e-10 * expected.abs().max(1.0),
            "ln({}) = {} != {}",
            v,
            got,
            expected
        );
    }
}

#[test]
fn test_ln_errors() {
    assert_eq!(ln(Decimal::ZERO), Err(Error::LogOfZero));
    assert_eq!(ln(Decimal::from(-1)), Err(Error::LogOfNegative));
    assert_eq!(ln(Decimal::MIN), Err(Error::LogOfNegative));
}

#[test]
fn test_log_bases() {
    let eps = Decimal::new(1, 20);
    assert_close(
        log(Decimal::from(8), Decimal::TWO).unwrap(),
        Decimal::from(3),
        eps,
    );
    assert_close(log2(Decimal::from(1024)).unwrap(), Decimal::from(10), eps);
    assert_close(log10(Decimal::from(1000)).unwrap(), Decimal::from(3), eps);

    // The base-1 logarithm is an error, log(1, b) is zero by convention.
    assert_eq!(
        log(Decimal::from(5), Decimal::ONE),
        Err(Error::LogBaseOne)
    );
    assert_eq!(
        log(Decimal::ONE, Decimal::ONE),
        Err(Error::LogBaseOne)
    );
    assert_eq!(log(Decimal::ONE, Decimal::ZERO).unwrap(), Decimal::ZERO);
    assert_eq!(log(Decimal::ONE, Decimal::from(7)).unwrap(), Decimal::ZERO);
}

#[test]
fn test_hyperbolic_zero() {
    assert_eq!(sinh(Decimal::ZERO).unwrap(), Decimal::ZERO);
    assert_eq!(cosh(Decimal::ZERO).unwrap(), Decimal::ONE);
    assert_eq!(tanh(Decimal::ZERO).unwrap(), Decimal::ZERO);
    assert_eq!(asinh(Decimal::ZERO).unwrap(), Decimal::ZERO);
    assert_eq!(acosh(Decimal::ONE).unwrap(), Decimal::ZERO);
    assert_eq!(atanh(Decimal::ZERO).unwrap(), Decimal::ZERO);
}

#[test]
fn test_hyperbolic_against_f64() {
    for v in [-3.0f64, -1.0, -0.5, 0.25, 0.5, 1.0, 2.0, 3.0] {
        let d = Decimal::try_from(v).unwrap();
        let s = sinh(d).unwrap().to_f64().unwrap();
        let c = cosh(d).unwrap().to_f64().unwrap();
        let t = tanh(d).unwrap().to_f64().unwrap();
        assert!((s - v.sinh()).abs() <= 1e-9, "sinh({})", v);
        assert!((c - v.cosh()).abs() <= 1e-9, "cosh({})", v);
        assert!((t - v.tanh()).abs() <= 1e-9, "tanh({})", v);
    }
}

#[test]
fn test_hyperbolic_identity() {
    // cosh^2 - sinh^2 = 1.
    let eps = Decimal::new(1, 20);
    for v in [-2i64, -1, 1, 2, 3] {
        let d = Decimal::from(v);
        let s = sinh(d).unwrap();
        let c = cosh(d).unwrap();
        assert_close(c * c - s * s, Decimal::ONE, eps);
    }
}

#[test]
fn test_hyperbolic_inverses() {
    let eps = Decimal::new(1, 15);
    let x = Decimal::new(15, 1); // 1.5
    assert_close(asinh(sinh(x).unwrap()).unwrap(), x, eps);
    assert_close(acosh(cosh(x).unwrap()).unwrap(), x, eps);

    let x = Decimal::new(5, 1); // 0.5
    assert_close(atanh(tanh(x).unwrap()).unwrap(), x, eps);
    assert_close(asinh(sinh(-x).unwrap()).unwrap(), -x, eps);
}

#[test]
fn test_hyperbolic_saturation_and_errors() {
    // Far from zero tanh is indistinguishable from +-1 at this precision,
    // while e^2x is far outside of the representable range.
    assert_eq!(tanh(Decimal::from(50)).unwrap(), Decimal::ONE);
    assert_eq!(tanh(Decimal::from(-50)).unwrap(), -Decimal::ONE);

    assert_eq!(
        sinh(Decimal::from(100)),
        Err(Error::DecimalOverflow("sinh"))
    );
    assert_eq!(
        acosh(Decimal::new(5, 1)),
        Err(Error::OutOfRange("acosh is defined for x >= 1"))
    );
    assert_eq!(
        atanh(Decimal::ONE),
        Err(Error::OutOfRange("atanh is defined for |x| < 1"))
    );
    assert_eq!(
        atanh(Decimal::from(-2)),
        Err(Error::OutOfRange("atanh is defined for |x| < 1"))
    );
}
