//! Simulation state for one scene.
//!
//! `Simulation` owns everything a scene needs and is passed explicitly: by
//! `&mut` to [`Simulation::tick`], by `&` to whatever draws it. There is no
//! global state.
//!
//! # Tick
//!
//! Each tick delegates to [`MotionController::tick`]: apply input, flag
//! overlaps, resolve them one obstacle at a time. The tick counter only
//! advances when the tick completes; a failed tick leaves the scene as it was.
//!
//! # Example
//!
//! ```
//! use blockfield_core::config::SceneConfig;
//! use blockfield_core::controller::InputState;
//! use blockfield_core::simulation::Simulation;
//!
//! let mut sim = Simulation::new(&SceneConfig::default()).unwrap();
//!
//! for _ in 0..10 {
//!     sim.tick(InputState::FORWARD).unwrap();
//! }
//!
//! assert_eq!(sim.tick_count(), 10);
//! assert_eq!(sim.obstacles().len(), 51);
//! ```

use std::fmt;

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::SceneConfig;
use crate::controller::{InputSource, InputState, MotionController, TickReport};
use crate::entity::{Boxed, MovingEntity, Obstacle, ObstacleId};
use crate::error::{ConfigError, ResolveError};
use crate::registry::ObstacleRegistry;
use crate::resolver::ContactResolver;

/// A scene: obstacles, the moving entity, and the rules that move it.
pub struct Simulation {
    registry: ObstacleRegistry,
    entity: MovingEntity,
    controller: MotionController,
    resolver: Box<dyn ContactResolver>,
    /// Number of completed ticks.
    tick: u64,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("registry", &format!("[{} obstacles]", self.registry.len()))
            .field("entity", &self.entity)
            .field("controller", &self.controller)
            .field("resolver", &self.resolver.name())
            .field("tick", &self.tick)
            .finish()
    }
}

impl Simulation {
    /// Builds a scene from `config`, populating obstacles from its seed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config fails validation.
    pub fn new(config: &SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let registry = ObstacleRegistry::populate(
            config.obstacle_count,
            config.bounds_x,
            config.bounds_z,
            config.obstacle_half_extents,
            &mut rng,
        );
        let entity = MovingEntity::new(config.entity_start, config.entity_half_extents);

        info!(
            seed = config.seed,
            obstacles = registry.len(),
            resolver = ?config.resolver.strategy,
            "scene created"
        );

        Ok(Self::from_parts(
            registry,
            entity,
            MotionController::with_speed(config.speed),
            config.resolver.build(),
        ))
    }

    /// Builds a scene from already constructed parts.
    #[must_use]
    pub fn from_parts(
        registry: ObstacleRegistry,
        entity: MovingEntity,
        controller: MotionController,
        resolver: Box<dyn ContactResolver>,
    ) -> Self {
        Self {
            registry,
            entity,
            controller,
            resolver,
            tick: 0,
        }
    }

    /// Advances the scene by one tick.
    ///
    /// A failed tick is rolled back: the entity position and the overlap
    /// flags are restored, so retrying does not apply the input twice.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error; the tick counter is not advanced.
    pub fn tick(&mut self, input: InputState) -> Result<TickReport, ResolveError> {
        let entity = self.entity.clone();
        let flagged: Vec<ObstacleId> = self
            .registry
            .iter()
            .filter(|obstacle| obstacle.is_overlapping())
            .map(Obstacle::id)
            .collect();

        match self.controller.tick(
            self.tick,
            &mut self.entity,
            input,
            &mut self.registry,
            self.resolver.as_ref(),
        ) {
            Ok(report) => {
                self.tick += 1;
                Ok(report)
            }
            Err(err) => {
                warn!(tick = self.tick, %err, "tick failed, rolled back");
                self.entity = entity;
                self.registry.mark_overlapping(&flagged);
                Err(err)
            }
        }
    }

    /// Runs `ticks` ticks, pulling one input per tick from `input`.
    ///
    /// # Errors
    ///
    /// Stops at the first resolver error.
    pub fn run<I: InputSource + ?Sized>(
        &mut self,
        ticks: u64,
        input: &mut I,
    ) -> Result<RunSummary, ResolveError> {
        let mut summary = RunSummary::default();
        for _ in 0..ticks {
            let report = self.tick(input.current_frame_input())?;
            summary.ticks += 1;
            summary.contacts += report.contacts.len();
            if !report.flagged.is_empty() {
                summary.ticks_with_overlap += 1;
            }
            if !report.residual.is_empty() {
                summary.ticks_with_residual += 1;
            }
        }
        Ok(summary)
    }

    /// Number of completed ticks.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }

    /// The moving entity.
    #[must_use]
    pub fn entity(&self) -> &MovingEntity {
        &self.entity
    }

    /// Current entity position.
    #[must_use]
    pub fn entity_position(&self) -> Vec3 {
        self.entity.position()
    }

    /// All obstacles in registry order.
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        self.registry.as_slice()
    }

    /// The obstacle registry.
    #[must_use]
    pub fn registry(&self) -> &ObstacleRegistry {
        &self.registry
    }

    /// The active resolver.
    #[must_use]
    pub fn resolver(&self) -> &dyn ContactResolver {
        self.resolver.as_ref()
    }

    /// Everything a renderer needs to draw the current frame.
    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            tick: self.tick,
            entity: BoxSnapshot {
                position: self.entity.position(),
                half_extents: self.entity.half_extents(),
            },
            obstacles: self
                .registry
                .iter()
                .map(|obstacle| ObstacleSnapshot {
                    id: obstacle.id(),
                    position: obstacle.position(),
                    half_extents: obstacle.half_extents(),
                    overlapping: obstacle.is_overlapping(),
                })
                .collect(),
        }
    }
}

/// Totals over a [`Simulation::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Ticks completed
    pub ticks: u64,
    /// Contacts resolved
    pub contacts: usize,
    /// Ticks in which at least one obstacle was overlapped before correction
    pub ticks_with_overlap: u64,
    /// Ticks that ended with an overlap still present
    pub ticks_with_residual: u64,
}

/// Position and size of a box, as drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSnapshot {
    /// Center
    pub position: Vec3,
    /// Half-extents
    pub half_extents: Vec3,
}

/// One obstacle, as drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSnapshot {
    /// Obstacle id
    pub id: ObstacleId,
    /// Center
    pub position: Vec3,
    /// Half-extents
    pub half_extents: Vec3,
    /// Overlapped at the start of the last tick
    pub overlapping: bool,
}

/// Read-only view of a scene for drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Completed ticks
    pub tick: u64,
    /// The moving entity
    pub entity: BoxSnapshot,
    /// Obstacles in registry order
    pub obstacles: Vec<ObstacleSnapshot>,
}
