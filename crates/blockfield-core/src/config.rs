//! Scene configuration.
//!
//! [`SceneConfig`] carries every constructor-time parameter of a scene. The
//! core never reads files or the environment; callers build a config in code
//! or deserialize one (every field has a default, so partial documents work).
//!
//! ```
//! use blockfield_core::config::{ResolverStrategy, SceneConfig};
//!
//! let config: SceneConfig = serde_json::from_str(
//!     r#"{ "seed": 9, "obstacle_count": 10, "resolver": { "strategy": "analytic" } }"#,
//! ).unwrap();
//!
//! assert_eq!(config.obstacle_count, 10);
//! assert_eq!(config.resolver.strategy, ResolverStrategy::Analytic);
//! assert!(config.validate().is_ok());
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::controller::DEFAULT_SPEED;
use crate::error::ConfigError;
use crate::resolver::{
    AnalyticResolver, ContactResolver, ProbeResolver, YProbe, DEFAULT_MAX_PROBE_STEPS,
    DEFAULT_SKIN, STEP,
};

/// Which resolver implementation a scene uses.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverStrategy {
    /// Probe-and-step
    #[default]
    Probe,
    /// Closed-form overlap extents
    Analytic,
}

/// Resolver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Implementation to use
    pub strategy: ResolverStrategy,
    /// Probe step length
    pub step: f32,
    /// Probe steps per side before giving up
    pub max_probe_steps: u32,
    /// Direction of the `-Y` probe
    pub y_probe: YProbe,
    /// Gap left by the analytic resolver
    pub skin: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strategy: ResolverStrategy::Probe,
            step: STEP,
            max_probe_steps: DEFAULT_MAX_PROBE_STEPS,
            y_probe: YProbe::Corrected,
            skin: DEFAULT_SKIN,
        }
    }
}

impl ResolverConfig {
    /// Checks the settings of the selected strategy.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.strategy {
            ResolverStrategy::Probe => {
                if !(self.step.is_finite() && self.step > 0.0) {
                    return Err(ConfigError::InvalidStep(self.step));
                }
                if self.max_probe_steps == 0 {
                    return Err(ConfigError::InvalidProbeCap);
                }
            }
            ResolverStrategy::Analytic => {
                if !(self.skin.is_finite() && self.skin > 0.0) {
                    return Err(ConfigError::InvalidSkin(self.skin));
                }
            }
        }
        Ok(())
    }

    /// Builds the configured resolver.
    #[must_use]
    pub fn build(&self) -> Box<dyn ContactResolver> {
        match self.strategy {
            ResolverStrategy::Probe => Box::new(
                ProbeResolver::new()
                    .with_step(self.step)
                    .with_max_steps(self.max_probe_steps)
                    .with_y_probe(self.y_probe),
            ),
            ResolverStrategy::Analytic => Box::new(AnalyticResolver::new().with_skin(self.skin)),
        }
    }
}

/// Everything needed to build a scene.
///
/// The default reproduces the reference scene: 51 unit blocks scattered over
/// a 25 x 25 field and a unit-cube player starting at (12, 0, 5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for obstacle placement
    pub seed: u64,
    /// Number of obstacles
    pub obstacle_count: usize,
    /// Largest obstacle X coordinate
    pub bounds_x: u32,
    /// Largest obstacle Z coordinate
    pub bounds_z: u32,
    /// Half-extents of every obstacle
    pub obstacle_half_extents: Vec3,
    /// Entity start position
    pub entity_start: Vec3,
    /// Entity half-extents
    pub entity_half_extents: Vec3,
    /// Distance moved per tick along each held axis
    pub speed: f32,
    /// Resolver settings
    pub resolver: ResolverConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            obstacle_count: 51,
            bounds_x: 25,
            bounds_z: 25,
            obstacle_half_extents: Vec3::splat(0.5),
            entity_start: Vec3::new(12.0, 0.0, 5.0),
            entity_half_extents: Vec3::splat(0.5),
            speed: DEFAULT_SPEED,
            resolver: ResolverConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Checks that the config describes a usable scene.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_extents("obstacle", self.obstacle_half_extents)?;
        check_extents("entity", self.entity_half_extents)?;
        if !self.entity_start.is_finite() {
            return Err(ConfigError::InvalidStart(self.entity_start.to_array()));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        self.resolver.validate()
    }
}

fn check_extents(what: &'static str, half_extents: Vec3) -> Result<(), ConfigError> {
    if half_extents.is_finite() && half_extents.cmpge(Vec3::ZERO).all() {
        Ok(())
    } else {
        Err(ConfigError::InvalidHalfExtents {
            what,
            value: half_extents.to_array(),
        })
    }
}
