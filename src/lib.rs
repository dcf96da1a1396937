//! FarmCart Core - farm marketplace backend
//!
//! This crate provides the REST API for the FarmCart marketplace: catalog,
//! cart, orders, reviews and site content stored in Firestore, with
//! accounts managed by Firebase Authentication.

pub mod api;
pub mod config;
pub mod credentials;
pub mod domain;
pub mod error;
pub mod identity;
pub mod jwt;
pub mod middleware;
pub mod policy;
pub mod server;
pub mod service;
pub mod state;
pub mod store;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
