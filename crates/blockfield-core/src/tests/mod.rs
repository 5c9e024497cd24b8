//! Scenario, property and determinism tests for the collision core.
//!
//! - `helpers.rs`: Scene setup and factory functions
//! - `integration.rs`: End-to-end walks into known obstacle layouts
//! - `properties.rs`: Resolver contract checked over random overlaps
//! - `determinism.rs`: Same seed and input script give identical scenes

mod helpers;
mod properties;

// Re-export for convenience
pub use helpers::*;
