//! This module contains small integer helpers: greatest common divisor,
//! least common multiple and the factorial. None of them memoize their
//! results; Euclid's algorithm is fast enough without a cache, and a cache
//! shared between callers would grow without bound.

use num_bigint::BigUint;
use num_traits::One;

/// Returns the greatest common divisor of `a` and `b` with Euclid's
/// algorithm. `gcd(0, 0)` is zero.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Returns the least common multiple of `a` and `b`, or None when the
/// result does not fit in 64 bits. `lcm(0, n)` is zero.
pub fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Returns `n!` as an arbitrary-precision integer.
pub fn factorial(n: u32) -> BigUint {
    let mut acc = BigUint::one();
    for i in 2..=n {
        acc *= u64::from(i);
    }
    acc
}

#[test]
fn test_gcd() {
    assert_eq!(gcd(0, 0), 0);
    assert_eq!(gcd(0, 9), 9);
    assert_eq!(gcd(9, 0), 9);
    assert_eq!(gcd(1, 1995), 1);
    assert_eq!(gcd(1995, 1995), 1995);
    assert_eq!(gcd(12, 18), 6);
    assert_eq!(gcd(17, 13), 1);
    assert_eq!(gcd(u64::MAX, u64::MAX), u64::MAX);
    assert_eq!(gcd(1 << 40, 1 << 20), 1 << 20);
}

#[test]
fn test_lcm() {
    assert_eq!(lcm(0, 0), Some(0));
    assert_eq!(lcm(0, 5), Some(0));
    assert_eq!(lcm(4, 6), Some(12));
    assert_eq!(lcm(7, 13), Some(91));
    assert_eq!(lcm(u64::MAX, u64::MAX), Some(u64::MAX));
    // 2^63 and 2^63+1 are coprime, so their lcm does not fit.
    assert_eq!(lcm(1 << 63, (1 << 63) + 1), None);
}

#[test]
fn test_lcm_gcd_product_law() {
    use crate::utils::XorShift;

    // lcm(a, b) * gcd(a, b) == a * b for positive a, b.
    let mut rng = XorShift::new();
    for _ in 0..1000 {
        let a = rng.get64() % (1 << 30) + 1;
        let b = rng.get64() % (1 << 30) + 1;
        let g = gcd(a, b);
        let l = lcm(a, b).unwrap();
        assert_eq!(l as u128 * g as u128, a as u128 * b as u128);
        // The gcd divides both inputs, the lcm is divided by both.
        assert_eq!(a % g, 0);
        assert_eq!(b % g, 0);
        assert_eq!(l % a, 0);
        assert_eq!(l % b, 0);
    }
}

#[test]
fn test_factorial() {
    assert_eq!(factorial(0), BigUint::from(1u32));
    assert_eq!(factorial(1), BigUint::from(1u32));
    assert_eq!(factorial(5), BigUint::from(120u32));
    assert_eq!(factorial(20), BigUint::from(2_432_902_008_176_640_000u64));
    assert_eq!(
        factorial(40).to_string(),
        "815915283247897734345611269596115894272000000000"
    );
}
