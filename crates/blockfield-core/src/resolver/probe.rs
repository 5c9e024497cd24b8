//! Probe-and-step resolver.
//!
//! For each side, a copy of the entity is walked outward in fixed steps
//! until its box stops overlapping the obstacle. The number of steps times
//! the step length is that side's depth. Nothing about the real entity
//! changes while probing.
//!
//! # Cost
//!
//! Six walks of `depth / step` overlap tests per contact. Fine for a few
//! unit cubes; use [`AnalyticResolver`](super::AnalyticResolver) when depths
//! or obstacle counts grow.
//!
//! # The -Y probe
//!
//! Legacy scenes probed `-Y` by walking toward `+Y`, then applied the
//! correction toward `-Y`. [`YProbe::Mirrored`]
//! keeps that behavior for replaying old scenes. [`YProbe::Corrected`] walks
//! toward `-Y` and is the default.

use blockfield_geom::{Aabb, Cuboid};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{ContactResolver, ContactSide};
use crate::error::ResolveError;

/// Default probe step length.
pub const STEP: f32 = 0.025;

/// Default cap on steps per side before the probe is treated as stuck.
pub const DEFAULT_MAX_PROBE_STEPS: u32 = 100_000;

/// Direction the `-Y` probe walks in.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YProbe {
    /// Walk toward +Y, as the legacy scene did. `-Y` then always ties with
    /// `+Y` and loses the tie-break.
    Mirrored,
    /// Walk toward -Y.
    #[default]
    Corrected,
}

/// Resolver that measures depth by stepping a probe copy outward.
///
/// # Example
///
/// ```
/// use blockfield_core::resolver::{ContactResolver, ContactSide, ProbeResolver, STEP};
/// use blockfield_geom::{box_of, Cuboid};
/// use glam::Vec3;
///
/// let resolver = ProbeResolver::new();
/// assert!((resolver.step() - STEP).abs() < f32::EPSILON);
///
/// let block = box_of(Vec3::new(12.0, 0.0, 6.0), Vec3::splat(0.5));
/// let player = Cuboid::unit(Vec3::new(12.0, 0.0, 5.5));
///
/// let depth = resolver.side_depth(&player, &block, ContactSide::NegZ).unwrap();
/// assert!((depth - 0.525).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResolver {
    step: f32,
    max_steps: u32,
    y_probe: YProbe,
}

impl ProbeResolver {
    /// Creates a probe resolver with the default step, cap and corrected `-Y`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: STEP,
            max_steps: DEFAULT_MAX_PROBE_STEPS,
            y_probe: YProbe::Corrected,
        }
    }

    /// Sets the step length. Must be finite and positive.
    #[must_use]
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Sets the per-side step cap.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Sets the `-Y` probe direction.
    #[must_use]
    pub fn with_y_probe(mut self, y_probe: YProbe) -> Self {
        self.y_probe = y_probe;
        self
    }

    /// Returns the step length.
    #[must_use]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Returns the per-side step cap.
    #[must_use]
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Returns the `-Y` probe mode.
    #[must_use]
    pub fn y_probe(&self) -> YProbe {
        self.y_probe
    }

    /// Unit vector the probe walks along for `side`.
    #[must_use]
    pub fn probe_direction(&self, side: ContactSide) -> Vec3 {
        match (side, self.y_probe) {
            (ContactSide::NegY, YProbe::Mirrored) => Vec3::Y,
            _ => side.normal(),
        }
    }
}

impl Default for ProbeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactResolver for ProbeResolver {
    fn name(&self) -> &'static str {
        "probe"
    }

    fn side_depth(
        &self,
        mover: &Cuboid,
        obstacle: &Aabb,
        side: ContactSide,
    ) -> Result<f32, ResolveError> {
        let direction = self.probe_direction(side);
        for n in 1..=self.max_steps {
            // Depth from the step count, not a running sum, so the probe and
            // the committed correction compute the same center.
            #[allow(clippy::cast_precision_loss)]
            let depth = n as f32 * self.step;
            let probe = mover.translated(direction * depth);
            if !probe.bounds().overlaps(obstacle) {
                return Ok(depth);
            }
        }
        Err(ResolveError::ProbeLimitExceeded {
            side,
            steps: self.max_steps,
        })
    }
}
