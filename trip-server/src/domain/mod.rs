//! Domain types for the trip emissions calculator.
//!
//! This module contains the core domain model types: travel modes,
//! locations, validated trip requests and the emission results computed
//! from them. Types enforce their invariants at construction time, so code
//! that receives them can trust their validity.

mod alternative;
mod emissions;
mod error;
mod location;
mod mode;
mod trip;

pub use alternative::AlternativeOption;
pub use emissions::{Breakdown, EmissionEstimate, TripEmissions};
pub use error::DomainError;
pub use location::{Location, PlaceQuery};
pub use mode::{PerMode, TravelMode};
pub use trip::{HotelClass, MAX_HOTEL_NIGHTS, MAX_TRAVELERS, TripDates, TripRequest};
