use half::f16;
use num_bigint::BigInt;
use proptest::prelude::*;

use numx::decimal::{self, DecimalParts};
use numx::floatbits::{assemble, disassemble};
use numx::radix::{decode, encode, LetterCase};

// Property 1: encode/decode round-trips for every base and letter case.
proptest! {
    #[test]
    fn prop_radix_roundtrip_i128(v in any::<i128>(), base in 2u32..=64) {
        let s = encode(v, base, 1, LetterCase::Canonical).unwrap();
        let back: i128 = decode(&s, base).unwrap();
        prop_assert_eq!(v, back);
    }

    #[test]
    fn prop_radix_roundtrip_u64_cases(
        v in any::<u64>(),
        base in 2u32..=64,
        upper in any::<bool>(),
    ) {
        let case = if upper { LetterCase::Upper } else { LetterCase::Lower };
        let s = encode(v, base, 1, case).unwrap();
        let back: u64 = decode(&s, base).unwrap();
        prop_assert_eq!(v, back);
    }

    #[test]
    fn prop_radix_roundtrip_bigint(words in prop::collection::vec(any::<u32>(), 1..16), base in 2u32..=64) {
        let mut v = BigInt::from(0);
        for w in &words {
            v = (v << 32usize) + *w;
        }
        let s = encode(v.clone(), base, 1, LetterCase::Canonical).unwrap();
        let back: BigInt = decode(&s, base).unwrap();
        prop_assert_eq!(v, back);
    }

    #[test]
    fn prop_radix_min_width_padding(v in any::<i32>(), width in 1usize..40) {
        let s = encode(v, 10, width, LetterCase::Canonical).unwrap();
        let digits = s.strip_prefix('-').unwrap_or(&s);
        prop_assert!(digits.len() >= width);
        let back: i32 = decode(&s, 10).unwrap();
        prop_assert_eq!(v, back);
    }
}

// Property 2: assemble(disassemble(x)) reproduces the exact bit pattern,
// for every bit pattern of every precision.
proptest! {
    #[test]
    fn prop_float_roundtrip_f64(bits in any::<u64>()) {
        let p = disassemble(f64::from_bits(bits));
        let back: f64 = assemble(p.sign, p.exponent, p.fraction).unwrap();
        prop_assert_eq!(bits, back.to_bits());
    }

    #[test]
    fn prop_float_roundtrip_f32(bits in any::<u32>()) {
        let p = disassemble(f32::from_bits(bits));
        let back: f32 = assemble(p.sign, p.exponent, p.fraction).unwrap();
        prop_assert_eq!(bits, back.to_bits());
    }

    #[test]
    fn prop_float_roundtrip_f16(bits in any::<u16>()) {
        let p = disassemble(f16::from_bits(bits));
        let back: f16 = assemble(p.sign, p.exponent, p.fraction).unwrap();
        prop_assert_eq!(bits, back.to_bits());
    }
}

// Property 3: the decimal parts codec is exact for every valid field value.
proptest! {
    #[test]
    fn prop_decimal_parts_roundtrip(
        mantissa in 0u128..(1u128 << 96),
        scale in 0u32..=28,
        negative in any::<bool>(),
    ) {
        let parts = DecimalParts { negative, scale, mantissa };
        let d = decimal::assemble(parts).unwrap();
        prop_assert_eq!(decimal::disassemble(d), parts);
    }
}
