//! # API Shared
//!
//! Shared definitions for the notetaker web layer.
//!
//! Contains:
//! - Request and response wire types (`wire` module), with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Analysis results themselves are the core record types, serialised as-is.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
