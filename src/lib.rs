//! A toolbox of small numeric utilities: a base-N integer codec for bases
//! 2..=64, bit-level decomposition of IEEE-754 and fixed-point decimal
//! values, decimal logarithms and hyperbolic functions, sexagesimal
//! formatting, and calendar arithmetic. Every operation is a pure,
//! synchronous function; errors are reported through [`Result`].

pub mod arith;
pub mod calendar;
pub mod decimal;
mod error;
pub mod floatbits;
pub mod radix;
pub mod sexagesimal;
mod utils;

pub use self::error::{Error, Result};
