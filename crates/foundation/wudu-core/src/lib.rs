//! # wudu Core
//!
//! Five-level tone notation (五度标记法) primitives.
//!
//! ```text
//!             55
//!          54    45
//!       53    44    35
//!    52    43    34    25
//! 51    42    33    24    15     falling ← u → rising
//!    41    32    23    14
//!       31    22    13
//!          21    12
//!             11
//! ```
//!
//! A tonal value such as `"213"` is parsed into pitch samples and mapped
//! onto the rotated grid. Colors for tone categories come from a fixed
//! eight-entry palette.

pub mod color;
pub mod tonal;
pub mod transform;

pub use color::{ColorResolver, COLOR_NAMES, PALETTE, TONAL_NAMES};
pub use tonal::{tonal_to_coord, TonalValue};
pub use transform::{transform, Coord, SQRT_2};

/// Result type for wudu-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wudu-core
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid tonal value {value:?}: expected 2 or 3 digits, got {len}")]
    InvalidLength { value: String, len: usize },

    #[error("Invalid tonal value {value:?}: {ch:?} is not a digit")]
    InvalidDigit { value: String, ch: char },

    #[error("Invalid tonal value {value:?}: pitch level {digit} outside 1..=5")]
    DigitOutOfRange { value: String, digit: u8 },

    #[error("Invalid color specification: {0:?}")]
    InvalidColor(String),
}
