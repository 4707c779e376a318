//! Arrival-time sign server.
//!
//! Predicts the next trains at a subway station from historical departure
//! data and drives two-row LED style signs that rotate their second line.

pub mod config;
pub mod dataset;
pub mod display;
pub mod domain;
pub mod predict;
pub mod web;
