//! # Blockfield Core
//!
//! Collision core for a controllable box moving through a field of static
//! axis-aligned blocks.
//!
//! The one invariant everything here serves: after a tick, the moving
//! entity's box does not overlap any obstacle it was pushed out of (to
//! within the resolver's step).
//!
//! ## Architecture
//!
//! - **Registry**: Owns the static obstacles and answers overlap queries
//! - **Resolver**: Picks the contact side and depth for one entity/obstacle pair
//! - **Controller**: Applies input, finds overlaps, resolves them in order
//! - **Simulation**: Owns all of the above for one scene
//!
//! Rendering, windowing and input devices live outside this crate. A host
//! loop feeds [`controller::InputState`] into [`simulation::Simulation::tick`]
//! and draws from [`simulation::Simulation::snapshot`].
//!
//! ## Usage
//!
//! ```
//! use blockfield_core::{InputState, SceneConfig, Simulation};
//!
//! let mut sim = Simulation::new(&SceneConfig::default())?;
//! let report = sim.tick(InputState::FORWARD | InputState::LEFT)?;
//! for record in &report.contacts {
//!     println!("pushed out of {} via {}", record.obstacle, record.contact.side);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export the geometry crate for box queries
pub use blockfield_geom;

pub mod config;
pub mod controller;
pub mod entity;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod simulation;

pub use config::{ResolverConfig, ResolverStrategy, SceneConfig};
pub use controller::{InputSource, InputState, MotionController, ScriptedInput, TickReport};
pub use entity::{Boxed, MovingEntity, Obstacle, ObstacleId};
pub use error::{ConfigError, ResolveError, ScriptError};
pub use registry::ObstacleRegistry;
pub use resolver::{
    AnalyticResolver, Contact, ContactResolver, ContactSide, ProbeResolver, YProbe,
};
pub use simulation::{SceneSnapshot, Simulation};

#[cfg(test)]
mod tests;
