//! This module contains calendar arithmetic: the Gregorian leap-year rule,
//! Julian day number conversion and the Easter computus.

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate};

/// The Julian day number of 0001-01-01 in the proleptic Gregorian calendar
/// is 1721426, so day one of the common era maps to this offset plus one.
const JDN_OFFSET: i64 = 1_721_425;

/// Returns true when `year` is a Gregorian leap year: divisible by four,
/// except century years that are not divisible by four hundred.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the Julian day number of `date`, the count of days since the
/// beginning of the Julian period (-4713-11-24 Gregorian).
pub fn julian_day_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) + JDN_OFFSET
}

/// Returns the date with the Julian day number `jdn`. Fails when the day
/// number is outside of the representable date range.
pub fn from_julian_day_number(jdn: i64) -> Result<NaiveDate> {
    let days = jdn - JDN_OFFSET;
    i32::try_from(days)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or(Error::OutOfRange(
            "julian day number outside of the supported date range",
        ))
}

/// Returns the date of Easter Sunday in `year`, computed with the anonymous
/// Gregorian computus (the Meeus/Jones/Butcher algorithm). The Gregorian
/// rule is applied to every representable year; the Gregorian calendar was
/// adopted in 1583.
pub fn easter_sunday(year: i32) -> Result<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32).ok_or(
        Error::OutOfRange("year outside of the supported date range"),
    )
}

#[test]
fn test_leap_years() {
    assert!(is_leap_year(2024));
    assert!(is_leap_year(2000));
    assert!(is_leap_year(1600));
    assert!(is_leap_year(4));
    assert!(!is_leap_year(1900));
    assert!(!is_leap_year(2100));
    assert!(!is_leap_year(2023));
    assert!(!is_leap_year(1));
}

#[test]
fn test_julian_day_number() {
    let d = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    assert_eq!(julian_day_number(d), 2_440_588);

    let d = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    assert_eq!(julian_day_number(d), 2_451_545);

    let d = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
    assert_eq!(julian_day_number(d), 1_721_426);

    // Consecutive days have consecutive day numbers.
    let d = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
    assert_eq!(julian_day_number(d), 2_451_544);
}

#[test]
fn test_julian_day_roundtrip() {
    use crate::utils::XorShift;

    let mut rng = XorShift::new();
    for _ in 0..500 {
        // Day numbers within roughly [0, 5.8M), about years -4713 to 11000.
        let jdn = (rng.get64() % 5_800_000) as i64;
        let date = from_julian_day_number(jdn).unwrap();
        assert_eq!(julian_day_number(date), jdn);
    }

    assert_eq!(
        from_julian_day_number(i64::MAX),
        Err(Error::OutOfRange(
            "julian day number outside of the supported date range"
        ))
    );
}

#[test]
fn test_easter_dates() {
    fn check(year: i32, month: u32, day: u32) {
        let expected = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        assert_eq!(easter_sunday(year).unwrap(), expected, "year {}", year);
    }
    check(2024, 3, 31);
    check(2025, 4, 20);
    check(2008, 3, 23);
    check(2000, 4, 23);
    check(1818, 3, 22); // The earliest possible date.
    check(1943, 4, 25); // The latest possible date.
    check(1583, 4, 10);
}

#[test]
fn test_easter_is_always_a_sunday_in_season() {
    use chrono::Weekday;

    for year in 1583..2500 {
        let date = easter_sunday(year).unwrap();
        assert_eq!(date.weekday(), Weekday::Sun, "year {}", year);
        // Easter falls between March 22 and April 25.
        let lo = NaiveDate::from_ymd_opt(year, 3, 22).unwrap();
        let hi = NaiveDate::from_ymd_opt(year, 4, 25).unwrap();
        assert!(date >= lo && date <= hi, "year {}", year);
    }
}
