//! Web layer for the trip emissions calculator.
//!
//! Provides HTTP endpoints for city lookup, trip calculation and route
//! alternatives, plus the HTML frontend.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
