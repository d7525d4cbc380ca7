//! Validated trip requests.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DomainError, Location, TravelMode};

/// Largest party the calculator accepts.
pub const MAX_TRAVELERS: i64 = 100;

/// Longest hotel stay the calculator accepts.
pub const MAX_HOTEL_NIGHTS: i64 = 365;

/// Hotel standard, which scales the per-night accommodation factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotelClass {
    Budget,
    #[default]
    Standard,
    Luxury,
}

impl HotelClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            HotelClass::Budget => "budget",
            HotelClass::Standard => "standard",
            HotelClass::Luxury => "luxury",
        }
    }
}

impl fmt::Display for HotelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Travel dates for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TripDates {
    pub outbound: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl TripDates {
    /// Create trip dates. The return date may not precede the outbound date.
    pub fn new(outbound: NaiveDate, return_date: Option<NaiveDate>) -> Result<Self, DomainError> {
        if let Some(ret) = return_date {
            if ret < outbound {
                return Err(DomainError::InvalidDate(format!(
                    "return date {ret} is before outbound date {outbound}"
                )));
            }
        }
        Ok(Self {
            outbound,
            return_date,
        })
    }

    /// Parse ISO-8601 (`YYYY-MM-DD`) date strings.
    pub fn parse(outbound: &str, return_date: Option<&str>) -> Result<Self, DomainError> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map_err(|e| DomainError::InvalidDate(format!("{s:?}: {e}")))
        };
        let outbound = parse(outbound)?;
        let return_date = return_date
            .filter(|s| !s.trim().is_empty())
            .map(parse)
            .transpose()?;
        Self::new(outbound, return_date)
    }

    /// Number of days between outbound and return, if a return date is set.
    pub fn duration_days(&self) -> Option<i64> {
        self.return_date
            .map(|ret| ret.signed_duration_since(self.outbound).num_days())
    }
}

/// A validated trip description.
///
/// Construction enforces every input rule, so calculators receiving a
/// `TripRequest` can trust it: at least one traveler (and at most
/// [`MAX_TRAVELERS`]), hotel nights within `0..=MAX_HOTEL_NIGHTS`, and at
/// least one travel mode or one hotel night.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    origin: Location,
    destination: Location,
    modes: BTreeSet<TravelMode>,
    travelers: u32,
    hotel_nights: u32,
    hotel_class: HotelClass,
    dates: Option<TripDates>,
}

impl TripRequest {
    /// Create a trip request, validating counts.
    pub fn new(
        origin: Location,
        destination: Location,
        modes: impl IntoIterator<Item = TravelMode>,
        travelers: i64,
        hotel_nights: i64,
    ) -> Result<Self, DomainError> {
        if travelers < 1 {
            return Err(DomainError::quantity("travelers", "must be at least 1"));
        }
        if travelers > MAX_TRAVELERS {
            return Err(DomainError::quantity(
                "travelers",
                format!("exceeds limit of {MAX_TRAVELERS}"),
            ));
        }
        if hotel_nights < 0 {
            return Err(DomainError::quantity("hotel nights", "cannot be negative"));
        }
        if hotel_nights > MAX_HOTEL_NIGHTS {
            return Err(DomainError::quantity(
                "hotel nights",
                format!("exceeds limit of {MAX_HOTEL_NIGHTS}"),
            ));
        }

        let modes: BTreeSet<TravelMode> = modes.into_iter().collect();
        if modes.is_empty() && hotel_nights == 0 {
            return Err(DomainError::quantity(
                "travel modes",
                "select at least one travel mode or one hotel night",
            ));
        }

        Ok(Self {
            origin,
            destination,
            modes,
            // Both bounds checked above
            travelers: travelers as u32,
            hotel_nights: hotel_nights as u32,
            hotel_class: HotelClass::default(),
            dates: None,
        })
    }

    /// Set the hotel class.
    pub fn with_hotel_class(mut self, hotel_class: HotelClass) -> Self {
        self.hotel_class = hotel_class;
        self
    }

    /// Set the travel dates.
    pub fn with_dates(mut self, dates: TripDates) -> Self {
        self.dates = Some(dates);
        self
    }

    /// Same trip with a different party size.
    pub fn with_travelers(&self, travelers: i64) -> Result<Self, DomainError> {
        let mut trip = Self::new(
            self.origin.clone(),
            self.destination.clone(),
            self.modes.iter().copied(),
            travelers,
            i64::from(self.hotel_nights),
        )?;
        trip.hotel_class = self.hotel_class;
        trip.dates = self.dates;
        Ok(trip)
    }

    pub fn origin(&self) -> &Location {
        &self.origin
    }

    pub fn destination(&self) -> &Location {
        &self.destination
    }

    /// Selected modes, in display order.
    pub fn modes(&self) -> impl Iterator<Item = TravelMode> + '_ {
        self.modes.iter().copied()
    }

    pub fn has_mode(&self, mode: TravelMode) -> bool {
        self.modes.contains(&mode)
    }

    /// The mode used as the reference for savings: the first selected mode.
    pub fn baseline_mode(&self) -> Option<TravelMode> {
        self.modes.first().copied()
    }

    pub fn travelers(&self) -> u32 {
        self.travelers
    }

    pub fn hotel_nights(&self) -> u32 {
        self.hotel_nights
    }

    pub fn hotel_class(&self) -> HotelClass {
        self.hotel_class
    }

    pub fn dates(&self) -> Option<&TripDates> {
        self.dates.as_ref()
    }
}
