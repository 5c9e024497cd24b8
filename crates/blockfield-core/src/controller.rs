//! Motion controller for the moving entity.
//!
//! One call to [`MotionController::tick`] is one simulation step:
//!
//! 1. Apply directional input to the entity position
//! 2. Collect every obstacle the entity's box now overlaps
//! 3. Flag exactly those obstacles as overlapping (for drawing)
//! 4. Resolve each still-overlapping obstacle in registry order, committing
//!    each correction before the next obstacle is examined
//!
//! Corrections are sequential, not simultaneous. An obstacle pushed clear
//! by an earlier correction in the same tick is skipped rather than handed
//! to the resolver, and a later correction can push the entity back into
//! an obstacle resolved earlier. Such leftovers are reported in
//! [`TickReport::residual`] and logged.
//!
//! # Input
//!
//! [`InputState`] is the set of held directions. [`InputSource`] is where a
//! frame's input comes from; [`ScriptedInput`] replays a fixed script.

use std::str::FromStr;

use bitflags::bitflags;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::entity::{Boxed, MovingEntity, ObstacleId};
use crate::error::{ResolveError, ScriptError};
use crate::registry::ObstacleRegistry;
use crate::resolver::{Contact, ContactResolver};

/// Default distance moved per tick along each held axis.
pub const DEFAULT_SPEED: f32 = 0.05;

bitflags! {
    /// Directions held during one frame.
    ///
    /// Forward/back move along Z, left/right along X. Opposite directions
    /// cancel; perpendicular ones combine into diagonal movement.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct InputState: u8 {
        /// Move toward +Z
        const FORWARD = 1 << 0;
        /// Move toward -Z
        const BACK = 1 << 1;
        /// Move toward +X
        const LEFT = 1 << 2;
        /// Move toward -X
        const RIGHT = 1 << 3;
    }
}

impl FromStr for InputState {
    type Err = ScriptError;

    /// Parses `+`-joined key names: `forward`, `back`, `left`, `right` (or
    /// `w`, `s`, `a`, `d`), and `none` for no input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut input = Self::empty();
        for key in s.split('+').map(str::trim) {
            input |= match key.to_ascii_lowercase().as_str() {
                "forward" | "w" => Self::FORWARD,
                "back" | "s" => Self::BACK,
                "left" | "a" => Self::LEFT,
                "right" | "d" => Self::RIGHT,
                "none" | "" => Self::empty(),
                _ => return Err(ScriptError::UnknownKey(key.to_owned())),
            };
        }
        Ok(input)
    }
}

/// Supplies the input for each frame.
pub trait InputSource {
    /// Input held during the frame about to be simulated.
    fn current_frame_input(&mut self) -> InputState;
}

/// A constant input is held forever.
impl InputSource for InputState {
    fn current_frame_input(&mut self) -> InputState {
        *self
    }
}

/// Replays `(input, ticks)` segments, then reports no input.
///
/// The text form is a comma-separated list of `keys[*count]` segments:
///
/// ```
/// use blockfield_core::controller::{InputSource, InputState, ScriptedInput};
///
/// let mut script: ScriptedInput = "forward*2, forward+left".parse().unwrap();
/// assert_eq!(script.current_frame_input(), InputState::FORWARD);
/// assert_eq!(script.current_frame_input(), InputState::FORWARD);
/// assert_eq!(script.current_frame_input(), InputState::FORWARD | InputState::LEFT);
/// assert_eq!(script.current_frame_input(), InputState::empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedInput {
    segments: Vec<(InputState, u32)>,
    segment: usize,
    used: u32,
}

impl ScriptedInput {
    /// Creates a script from `(input, ticks)` segments.
    #[must_use]
    pub fn new(segments: Vec<(InputState, u32)>) -> Self {
        Self {
            segments,
            segment: 0,
            used: 0,
        }
    }

    /// Total number of scripted ticks.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.segments.iter().map(|(_, n)| u64::from(*n)).sum()
    }

    /// True if the script has no ticks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InputSource for ScriptedInput {
    fn current_frame_input(&mut self) -> InputState {
        while let Some(&(input, ticks)) = self.segments.get(self.segment) {
            if self.used < ticks {
                self.used += 1;
                return input;
            }
            self.segment += 1;
            self.used = 0;
        }
        InputState::empty()
    }
}

impl FromStr for ScriptedInput {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        for segment in s.split(',').map(str::trim).filter(|seg| !seg.is_empty()) {
            let (keys, count) = match segment.split_once('*') {
                Some((keys, count)) => {
                    let count = count.trim();
                    let ticks = count
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| ScriptError::InvalidCount(count.to_owned()))?;
                    (keys, ticks)
                }
                None => (segment, 1),
            };
            segments.push((keys.parse()?, count));
        }
        Ok(Self::new(segments))
    }
}

/// One resolved contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Obstacle the entity was pushed out of
    pub obstacle: ObstacleId,
    /// Side, depth and displacement
    pub contact: Contact,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick number, starting at 0
    pub tick: u64,
    /// Obstacles overlapped after moving, before any correction
    pub flagged: Vec<ObstacleId>,
    /// Contacts resolved, in the order they were applied
    pub contacts: Vec<ContactRecord>,
    /// Obstacles still overlapped after all corrections
    pub residual: Vec<ObstacleId>,
}

/// Moves the entity from input and resolves the resulting overlaps.
///
/// # Example
///
/// ```
/// use blockfield_core::controller::{InputState, MotionController};
/// use blockfield_core::entity::{Boxed, MovingEntity};
/// use blockfield_core::registry::ObstacleRegistry;
/// use blockfield_core::resolver::ProbeResolver;
/// use glam::Vec3;
///
/// let controller = MotionController::new();
/// let mut registry = ObstacleRegistry::new();
/// let mut player = MovingEntity::unit(Vec3::new(12.0, 0.0, 5.0));
///
/// let report = controller
///     .tick(0, &mut player, InputState::LEFT, &mut registry, &ProbeResolver::new())
///     .unwrap();
///
/// assert!(report.contacts.is_empty());
/// assert!((player.position().x - 12.05).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionController {
    speed: f32,
}

impl MotionController {
    /// Creates a controller with [`DEFAULT_SPEED`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            speed: DEFAULT_SPEED,
        }
    }

    /// Creates a controller with a custom per-tick speed.
    #[must_use]
    pub fn with_speed(speed: f32) -> Self {
        Self { speed }
    }

    /// Returns the per-tick speed.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Position after one tick of `input`, ignoring obstacles.
    ///
    /// Each held direction is applied as its own adjustment.
    #[must_use]
    pub fn apply_input(&self, mut position: Vec3, input: InputState) -> Vec3 {
        if input.contains(InputState::FORWARD) {
            position.z += self.speed;
        }
        if input.contains(InputState::BACK) {
            position.z -= self.speed;
        }
        if input.contains(InputState::LEFT) {
            position.x += self.speed;
        }
        if input.contains(InputState::RIGHT) {
            position.x -= self.speed;
        }
        position
    }

    /// Runs one tick.
    ///
    /// # Arguments
    ///
    /// * `tick` - Tick number recorded in the report
    /// * `entity` - The entity to move
    /// * `input` - Directions held this frame
    /// * `registry` - Obstacles; only their overlap flags are written
    /// * `resolver` - Strategy used for each contact
    ///
    /// # Errors
    ///
    /// Propagates any [`ResolveError`]. The entity keeps every correction
    /// applied before the failing one.
    pub fn tick(
        &self,
        tick: u64,
        entity: &mut MovingEntity,
        input: InputState,
        registry: &mut ObstacleRegistry,
        resolver: &dyn ContactResolver,
    ) -> Result<TickReport, ResolveError> {
        entity.set_position(self.apply_input(entity.position(), input));

        let flagged = registry.overlapping_ids(&entity.bounds());
        registry.mark_overlapping(&flagged);

        let mut contacts = Vec::with_capacity(flagged.len());
        for &id in &flagged {
            let Some(obstacle) = registry.get(id) else {
                continue;
            };
            if !entity.bounds().overlaps(&obstacle.bounds()) {
                trace!(tick, obstacle = %id, "already cleared by an earlier correction");
                continue;
            }
            let contact = resolver.resolve_collision(entity, obstacle)?;
            debug!(
                tick,
                obstacle = %id,
                side = %contact.side,
                depth = contact.depth,
                resolver = resolver.name(),
                "resolved contact"
            );
            contacts.push(ContactRecord {
                obstacle: id,
                contact,
            });
        }

        let residual = if contacts.is_empty() {
            Vec::new()
        } else {
            registry.overlapping_ids(&entity.bounds())
        };
        if !residual.is_empty() {
            warn!(tick, ?residual, "overlap left after sequential corrections");
        }

        trace!(
            tick,
            position = %entity.position(),
            flagged = flagged.len(),
            contacts = contacts.len(),
            "tick complete"
        );

        Ok(TickReport {
            tick,
            flagged,
            contacts,
            residual,
        })
    }
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new()
    }
}
