//! Scene objects: static obstacles and the moving entity.
//!
//! Both kinds are boxes that differ only in mobility:
//! - [`ObstacleId`]: Stable identifier assigned by the registry
//! - [`Boxed`]: Shared capability (position, half-extents, bounding box)
//! - [`Obstacle`]: Immutable-position block with an observational overlap flag
//! - [`MovingEntity`]: The controlled actor, whose box follows its position
//!
//! # Example
//!
//! ```
//! use blockfield_core::entity::{Boxed, MovingEntity};
//! use glam::Vec3;
//!
//! let mut player = MovingEntity::unit(Vec3::new(12.0, 0.0, 5.0));
//! player.translate(Vec3::new(0.0, 0.0, 0.5));
//!
//! assert_eq!(player.position(), Vec3::new(12.0, 0.0, 5.5));
//! assert_eq!(player.bounds().max.z, 6.0);
//! ```

use std::fmt;

use blockfield_geom::{Aabb, Cuboid};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Unique identifier for an obstacle.
///
/// Ids are assigned in insertion order, so ordering by id is the same as
/// registry iteration order.
///
/// ```
/// use blockfield_core::entity::ObstacleId;
///
/// let id1 = ObstacleId::new(1);
/// let id2 = ObstacleId::new(2);
///
/// assert!(id1 < id2);
/// assert_eq!(id1.as_u64(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObstacleId(u64);

impl ObstacleId {
    /// Creates a new `ObstacleId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObstacleId({})", self.0)
    }
}

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ObstacleId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Anything in the scene that occupies an axis-aligned box.
pub trait Boxed {
    /// Center and half-extents.
    fn shape(&self) -> &Cuboid;

    /// Center position.
    fn position(&self) -> Vec3 {
        self.shape().center
    }

    /// Half-extents along each axis.
    fn half_extents(&self) -> Vec3 {
        self.shape().half_extents
    }

    /// Bounding box derived from the current position.
    fn bounds(&self) -> Aabb {
        self.shape().bounds()
    }
}

/// A static block.
///
/// The position never changes after creation, so the bounding box is
/// computed once. `overlapping` is purely observational: the controller
/// sets it for drawing and nothing reads it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    id: ObstacleId,
    shape: Cuboid,
    bounds: Aabb,
    overlapping: bool,
}

impl Obstacle {
    /// Creates an obstacle. Only the registry hands out ids.
    pub(crate) fn new(id: ObstacleId, position: Vec3, half_extents: Vec3) -> Self {
        let shape = Cuboid::new(position, half_extents);
        Self {
            id,
            shape,
            bounds: shape.bounds(),
            overlapping: false,
        }
    }

    /// Returns the obstacle's id.
    #[must_use]
    pub const fn id(&self) -> ObstacleId {
        self.id
    }

    /// True if the entity overlapped this obstacle at the start of the last tick.
    #[must_use]
    pub const fn is_overlapping(&self) -> bool {
        self.overlapping
    }

    pub(crate) fn set_overlapping(&mut self, overlapping: bool) {
        self.overlapping = overlapping;
    }
}

impl Boxed for Obstacle {
    fn shape(&self) -> &Cuboid {
        &self.shape
    }

    fn bounds(&self) -> Aabb {
        self.bounds
    }
}

/// The controlled actor.
///
/// Every position change goes through [`MovingEntity::set_position`] or
/// [`MovingEntity::translate`], which refresh the cached box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingEntity {
    shape: Cuboid,
    bounds: Aabb,
}

impl MovingEntity {
    /// Creates an entity at `position` with the given half-extents.
    #[must_use]
    pub fn new(position: Vec3, half_extents: Vec3) -> Self {
        let shape = Cuboid::new(position, half_extents);
        Self {
            shape,
            bounds: shape.bounds(),
        }
    }

    /// Creates a unit cube entity.
    #[must_use]
    pub fn unit(position: Vec3) -> Self {
        let shape = Cuboid::unit(position);
        Self {
            shape,
            bounds: shape.bounds(),
        }
    }

    /// Moves the entity to `position`.
    pub fn set_position(&mut self, position: Vec3) {
        self.shape.center = position;
        self.refresh_bounds();
    }

    /// Moves the entity by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.shape = self.shape.translated(offset);
        self.refresh_bounds();
    }

    fn refresh_bounds(&mut self) {
        self.bounds = self.shape.bounds();
    }
}

impl Boxed for MovingEntity {
    fn shape(&self) -> &Cuboid {
        &self.shape
    }

    fn bounds(&self) -> Aabb {
        self.bounds
    }
}
