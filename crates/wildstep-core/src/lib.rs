//! Wildstep Core - Trail geofencing and recommendation engine
//!
//! This crate contains the domain models, geometry, recommendation logic and
//! port definitions for the Wildstep trail system. Storage adapters live in
//! `wildstep-store`; the presentation layer consumes everything here through
//! plain function calls.

pub mod catalog;
pub mod config;
pub mod corridor;
pub mod error;
pub mod models;
pub mod ports;
pub mod recommend;
pub mod upload;
pub mod viewport;

pub use error::{Result, WildstepError};
