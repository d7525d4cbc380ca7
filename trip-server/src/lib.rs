//! Trip emissions calculator server.
//!
//! A web application that answers: "How much CO2e will this trip emit,
//! and which way of making it emits less?"

pub mod config;
pub mod domain;
pub mod estimate;
pub mod places;
pub mod planner;
pub mod session;
pub mod web;
