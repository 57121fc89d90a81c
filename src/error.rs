//! This module contains the error type that is shared by all of the codecs
//! and math routines in the crate.

use thiserror::Error;

/// The errors that the conversion and math routines can report. Every
/// operation in this crate is a pure function, so errors are always raised
/// synchronously at the point of detection and nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested numeric base is not in the supported 2..=64 range.
    #[error("base {0} is out of range, supported bases are 2..=64")]
    BaseOutOfRange(u32),

    /// A width parameter must be at least one.
    #[error("minimum width must be at least 1")]
    WidthOutOfRange,

    /// The digit string was empty, or contained only whitespace and
    /// group separators.
    #[error("the digit string is empty")]
    EmptyInput,

    /// A character in the digit string is not a valid digit for the base.
    #[error("invalid digit {digit:?} for base {base}, valid digits are \"{valid}\"")]
    InvalidDigit {
        digit: char,
        base: u32,
        valid: String,
    },

    /// The decoded value does not fit in the requested integer width.
    #[error("decoded value {value} does not fit in {target}")]
    Overflow { value: String, target: &'static str },

    /// A bit-field value does not fit in its allotted width.
    #[error("{field} value {value} does not fit in {bits} bits")]
    FieldOverflow {
        field: &'static str,
        value: u128,
        bits: u32,
    },

    /// The decimal scale factor is above the maximum of 28.
    #[error("scale {0} is above the maximum decimal scale of 28")]
    ScaleOutOfRange(u32),

    /// The logarithm of zero is not representable (the decimal type has no
    /// infinity).
    #[error("the logarithm of zero is undefined")]
    LogOfZero,

    /// Logarithms of negative numbers are complex-valued.
    #[error("the logarithm of a negative number is undefined")]
    LogOfNegative,

    /// The base-1 logarithm is undefined for every argument.
    #[error("the logarithm in base 1 is undefined")]
    LogBaseOne,

    /// An intermediate decimal computation left the representable range.
    #[error("decimal overflow while evaluating {0}")]
    DecimalOverflow(&'static str),

    /// An argument is outside the domain of the function.
    #[error("argument out of range: {0}")]
    OutOfRange(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
