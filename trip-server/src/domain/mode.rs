//! Travel mode type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A supported travel mode.
///
/// The set is closed: anything else is rejected at parse time with
/// [`DomainError::UnsupportedMode`], so code that receives a `TravelMode`
/// never has to handle an unknown mode.
///
/// # Examples
///
/// ```
/// use trip_server::domain::TravelMode;
///
/// let mode = TravelMode::parse("train").unwrap();
/// assert_eq!(mode, TravelMode::Train);
/// assert_eq!(mode.as_str(), "Train");
///
/// assert!(TravelMode::parse("Boat").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TravelMode {
    Flight,
    Train,
    Car,
    Bus,
}

impl TravelMode {
    /// Every supported mode, in display order.
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Flight,
        TravelMode::Train,
        TravelMode::Car,
        TravelMode::Bus,
    ];

    /// Parse a mode name.
    ///
    /// Matching ignores case and surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        TravelMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainError::UnsupportedMode(trimmed.to_string()))
    }

    /// Returns the canonical name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Flight => "Flight",
            TravelMode::Train => "Train",
            TravelMode::Car => "Car",
            TravelMode::Bus => "Bus",
        }
    }

    /// Relative comfort used when recommending routes (higher is better).
    pub fn comfort_rank(&self) -> u8 {
        match self {
            TravelMode::Flight => 4,
            TravelMode::Train => 3,
            TravelMode::Car => 2,
            TravelMode::Bus => 1,
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TravelMode::parse(s)
    }
}

/// A value for every travel mode.
///
/// Used for the per-mode reference tables, so a lookup can never miss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerMode<T> {
    pub flight: T,
    pub train: T,
    pub car: T,
    pub bus: T,
}

impl<T> PerMode<T> {
    /// Get the value for a mode.
    pub fn get(&self, mode: TravelMode) -> &T {
        match mode {
            TravelMode::Flight => &self.flight,
            TravelMode::Train => &self.train,
            TravelMode::Car => &self.car,
            TravelMode::Bus => &self.bus,
        }
    }

    /// Iterate over `(mode, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (TravelMode, &T)> {
        TravelMode::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}
