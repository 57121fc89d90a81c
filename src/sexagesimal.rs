//! This module contains the implementation of the sexagesimal (base-60)
//! decomposition of decimal values, and the rendering of the triples in the
//! common notations for angles, time and the historical literature.

/// The notations that [`format`] can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Degree, prime and double-prime symbols: `29° 31′ 48″`.
    Degrees,
    /// Colon-separated: `29:31:48`.
    Colon,
    /// Textual hour/minute/second units: `29h 31m 48s`.
    TimeUnits,
    /// Neugebauer semicolon/comma notation: `29;31,48`.
    Neugebauer,
}

/// A sexagesimal triple. All three components share the sign of the
/// decomposed value (or are zero).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sexagesimal {
    pub units: i64,
    pub minutes: i64,
    pub seconds: f64,
}

/// Decompose `n` into whole units, minutes and seconds, with
/// `n = units + minutes/60 + seconds/3600`.
pub fn decompose(n: f64) -> Sexagesimal {
    let units = n.trunc();
    let frac = n - units;
    let minutes = (frac * 60.0).trunc();
    let seconds = frac * 3600.0 - minutes * 60.0;
    Sexagesimal {
        units: units as i64,
        minutes: minutes as i64,
        seconds,
    }
}

/// Render `n` in the requested notation. The seconds component is printed
/// with `precision` decimal places. Negative values render as the
/// decomposition of the magnitude behind a leading minus sign.
pub fn format(n: f64, notation: Notation, precision: usize) -> String {
    if n < 0.0 {
        return std::format!("-{}", format(-n, notation, precision));
    }
    let s = decompose(n);
    match notation {
        Notation::Degrees => std::format!(
            "{}° {}′ {:.*}″",
            s.units,
            s.minutes,
            precision,
            s.seconds
        ),
        Notation::Colon => {
            // Keep the seconds column aligned: two integer digits, plus
            // the decimal point and fraction when requested.
            let width = if precision > 0 { precision + 3 } else { 2 };
            std::format!(
                "{}:{:02}:{:0width$.precision$}",
                s.units,
                s.minutes,
                s.seconds,
            )
        }
        Notation::TimeUnits => std::format!(
            "{}h {}m {:.*}s",
            s.units,
            s.minutes,
            precision,
            s.seconds
        ),
        Notation::Neugebauer => std::format!(
            "{};{},{:.*}",
            s.units,
            s.minutes,
            precision,
            s.seconds
        ),
    }
}

#[test]
fn test_decompose_zero() {
    let s = decompose(0.0);
    assert_eq!(s.units, 0);
    assert_eq!(s.minutes, 0);
    assert_eq!(s.seconds, 0.0);
}

#[test]
fn test_decompose_literal() {
    // 29.53 degrees is 29 degrees, 31 minutes and 48 seconds, the synodic
    // month value of the Neugebauer example 29;31,50,8,20.
    let s = decompose(29.53);
    assert_eq!(s.units, 29);
    assert_eq!(s.minutes, 31);
    assert_eq!(s.seconds.round(), 48.0);

    let s = decompose(0.5);
    assert_eq!(s.units, 0);
    assert_eq!(s.minutes, 30);
    assert_eq!(s.seconds.round(), 0.0);

    let s = decompose(1.2525);
    assert_eq!(s.units, 1);
    assert_eq!(s.minutes, 15);
    assert_eq!(s.seconds.round(), 9.0);
}

#[test]
fn test_decompose_sign() {
    let s = decompose(-29.53);
    assert_eq!(s.units, -29);
    assert_eq!(s.minutes, -31);
    assert_eq!(s.seconds.round(), -48.0);

    // The components are zero or share the sign of the input.
    let s = decompose(-0.25);
    assert_eq!(s.units, 0);
    assert_eq!(s.minutes, -15);
    assert_eq!(s.seconds, 0.0);

    let s = decompose(-2.0);
    assert_eq!(s.units, -2);
    assert_eq!(s.minutes, 0);
    assert_eq!(s.seconds, 0.0);
}

#[test]
fn test_decompose_reconstruction() {
    use crate::utils::XorShift;

    let mut rng = XorShift::new();
    for _ in 0..200 {
        // Values in roughly [-512, 512).
        let n = ((rng.get64() % (1 << 20)) as f64) / 1024.0 - 512.0;
        let s = decompose(n);
        let back = s.units as f64 + s.minutes as f64 / 60.0 + s.seconds / 3600.0;
        assert!((n - back).abs() < 1e-9, "{} != {}", n, back);
    }
}

#[test]
fn test_format_notations() {
    assert_eq!(format(29.53, Notation::Degrees, 0), "29° 31′ 48″");
    assert_eq!(format(29.53, Notation::Colon, 0), "29:31:48");
    assert_eq!(format(29.53, Notation::TimeUnits, 0), "29h 31m 48s");
    assert_eq!(format(29.53, Notation::Neugebauer, 0), "29;31,48");
}

#[test]
fn test_format_precision_and_sign() {
    assert_eq!(format(-29.53, Notation::Neugebauer, 0), "-29;31,48");
    assert_eq!(format(0.0, Notation::Colon, 0), "0:00:00");
    assert_eq!(format(1.5, Notation::Colon, 2), "1:30:00.00");
    assert_eq!(format(10.25, Notation::Degrees, 1), "10° 15′ 0.0″");
    assert_eq!(format(-0.5, Notation::TimeUnits, 0), "-0h 30m 0s");
}
