#![forbid(unsafe_code)]

//! Core domain model and optics calculations for the Synsim binocular
//! defocus simulator.
//!
//! This crate provides:
//! - Domain types (eye parameters, per-distance results, dominant eye)
//! - The fixed viewing-distance catalog
//! - The optics engine (rest-defocus calculation)
//! - The binocular session model with monovision derivation
//! - Session persistence and app configuration

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod engine;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{demand, standard_distances, ViewingDistance};
pub use config::Config;
pub use engine::{calculate_results, rest_defocus};
pub use session::{ConfigField, ConfigStore, Session, SessionConfig};
pub use store::{load_session, JsonStore};
