//! Tonal values: two or three pitch samples on the five-level scale.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::transform::{transform, Coord, SQRT_2};
use crate::{Error, Result};

/// A parsed tonal value such as `"55"` or `"213"`.
///
/// Levels run from 1 (lowest) to 5 (highest). Two samples give a
/// start/end contour; three add a turning point in the middle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TonalValue {
    text: String,
    levels: Vec<u8>,
}

impl TonalValue {
    /// Parse and validate a tonal value string
    pub fn parse(value: &str) -> Result<Self> {
        let len = value.chars().count();
        if len != 2 && len != 3 {
            return Err(Error::InvalidLength {
                value: value.to_string(),
                len,
            });
        }

        let mut levels = Vec::with_capacity(len);
        for ch in value.chars() {
            let digit = ch.to_digit(10).ok_or_else(|| Error::InvalidDigit {
                value: value.to_string(),
                ch,
            })? as u8;
            if !(1..=5).contains(&digit) {
                return Err(Error::DigitOutOfRange {
                    value: value.to_string(),
                    digit,
                });
            }
            levels.push(digit);
        }

        Ok(Self {
            text: value.to_string(),
            levels,
        })
    }

    /// The value as written
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Pitch samples in time order
    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    pub fn start(&self) -> u8 {
        self.levels[0]
    }

    pub fn end(&self) -> u8 {
        self.levels[self.levels.len() - 1]
    }

    /// Turning point, present only for three-sample values
    pub fn middle(&self) -> Option<u8> {
        (self.levels.len() == 3).then(|| self.levels[1])
    }

    /// Position of this value in plotting space.
    ///
    /// Three-sample values weight the middle twice when computing the
    /// height: `height = (start + end + 2 * middle) / 4`. This agrees with
    /// the two-sample case whenever the middle is the mean of the ends.
    pub fn coord(&self) -> Coord {
        let start = self.start() as f64;
        let end = self.end() as f64;
        match self.middle() {
            None => transform(start, end),
            Some(middle) => {
                let height = 0.25 * (start + end + 2.0 * middle as f64);
                let increase = end - start;
                Coord::new(increase / SQRT_2, height * SQRT_2)
            }
        }
    }
}

impl FromStr for TonalValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TonalValue {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<TonalValue> for String {
    fn from(value: TonalValue) -> Self {
        value.text
    }
}

impl fmt::Display for TonalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Parse `value` and return its plotting-space coordinate
pub fn tonal_to_coord(value: &str) -> Result<Coord> {
    Ok(TonalValue::parse(value)?.coord())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Coord, b: Coord) -> bool {
        (a.u - b.u).abs() < 1e-12 && (a.v - b.v).abs() < 1e-12
    }

    #[test]
    fn test_two_digit_matches_transform() {
        for a in 1..=5u8 {
            for b in 1..=5u8 {
                let value = format!("{}{}", a, b);
                let coord = tonal_to_coord(&value).unwrap();
                assert!(close(coord, transform(a as f64, b as f64)), "{}", value);
            }
        }
    }

    #[test]
    fn test_three_digit_with_mean_middle_matches_transform() {
        for a in 1..=5u8 {
            for c in 1..=5u8 {
                if (a + c) % 2 != 0 {
                    continue;
                }
                let b = (a + c) / 2;
                let value = format!("{}{}{}", a, b, c);
                let coord = tonal_to_coord(&value).unwrap();
                assert!(close(coord, transform(a as f64, c as f64)), "{}", value);
            }
        }
    }

    #[test]
    fn test_three_digit_dip() {
        // 213: height = (2 + 3 + 2) / 4
        let coord = tonal_to_coord("213").unwrap();
        assert!(close(coord, Coord::new(1.0 / SQRT_2, 1.75 * SQRT_2)));
    }

    #[test]
    fn test_invalid_length() {
        for value in ["", "5", "1234"] {
            match tonal_to_coord(value) {
                Err(Error::InvalidLength { len, .. }) => assert_eq!(len, value.len()),
                other => panic!("{:?} gave {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_invalid_digits() {
        assert!(matches!(
            TonalValue::parse("5a"),
            Err(Error::InvalidDigit { ch: 'a', .. })
        ));
        assert!(matches!(
            TonalValue::parse("60"),
            Err(Error::DigitOutOfRange { digit: 6, .. })
        ));
        assert!(matches!(
            TonalValue::parse("10"),
            Err(Error::DigitOutOfRange { digit: 0, .. })
        ));
    }

    #[test]
    fn test_accessors() {
        let value: TonalValue = "552".parse().unwrap();
        assert_eq!(value.start(), 5);
        assert_eq!(value.middle(), Some(5));
        assert_eq!(value.end(), 2);
        assert_eq!(value.to_string(), "552");

        let flat = TonalValue::parse("33").unwrap();
        assert_eq!(flat.middle(), None);
        assert_eq!(flat.levels(), &[3, 3]);
    }

    #[test]
    fn test_serde_rejects_bad_values() {
        let ok: TonalValue = serde_json::from_str("\"45\"").unwrap();
        assert_eq!(ok.as_str(), "45");
        assert!(serde_json::from_str::<TonalValue>("\"4\"").is_err());
    }
}
