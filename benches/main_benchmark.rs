use num_bigint::BigInt;
use numx::arith::{factorial, gcd};
use numx::calendar::easter_sunday;
use numx::decimal::ln;
use numx::floatbits::{assemble, disassemble};
use numx::radix::{decode, encode, LetterCase};
use rust_decimal::Decimal;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn test_encode_base64() {
    let big = (BigInt::from(1) << 1000usize) - 1;
    black_box(encode(big, 64, 1, LetterCase::Canonical).unwrap());
}

fn test_decode_base16() {
    for _ in 0..100 {
        let v: u128 = decode("ffffffffffffffffffffffffffffffff", 16).unwrap();
        black_box(v);
    }
}

fn test_float_roundtrip() {
    for i in 0..1000u64 {
        let p = disassemble((i as f64).sqrt());
        let v: f64 = assemble(p.sign, p.exponent, p.fraction).unwrap();
        black_box(v);
    }
}

fn test_decimal_ln() {
    black_box(ln(Decimal::new(123456789, 4)).unwrap());
    black_box(ln(Decimal::MAX).unwrap());
}

fn test_gcd() {
    for a in 1..100u64 {
        for b in 1..100u64 {
            black_box(gcd(a * 7919, b * 104729));
        }
    }
}

fn test_factorial() {
    black_box(factorial(500));
}

fn test_easter() {
    for year in 1583..2583 {
        black_box(easter_sunday(year).unwrap());
    }
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("test_encode_base64", |b| b.iter(test_encode_base64));
    c.bench_function("test_decode_base16", |b| b.iter(test_decode_base16));
    c.bench_function("test_float_roundtrip", |b| b.iter(test_float_roundtrip));
    c.bench_function("test_decimal_ln", |b| b.iter(test_decimal_ln));
    c.bench_function("test_gcd", |b| b.iter(test_gcd));
    c.bench_function("test_factorial", |b| b.iter(test_factorial));
    c.bench_function("test_easter", |b| b.iter(test_easter));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
