//! # API Shared
//!
//! Shared definitions for the ODS gateway HTTP API.
//!
//! Contains:
//! - REST response types with OpenAPI schemas (`dto` module)
//! - API-key validation (`auth` module)
//! - liveness/readiness responses (`health` module)

pub mod auth;
pub mod dto;
pub mod health;

pub use auth::{ApiKeys, AuthError};
pub use dto::*;
pub use health::HealthService;
