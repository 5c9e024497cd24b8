//! # Blockfield Geom
//!
//! Axis-aligned box primitives used by the blockfield collision core.
//!
//! Everything in the scene is a box: the controlled entity and every static
//! obstacle. This crate provides the two bounding-volume queries the core is
//! built on:
//!
//! - **Box of**: derive an [`Aabb`] from a center position and half-extents
//! - **Overlap**: report whether two boxes intersect
//!
//! Overlap is inclusive on every axis, so boxes that share a face count as
//! overlapping. Callers that need strict separation must push past contact.
//!
//! ## Quick Start
//!
//! ```
//! use blockfield_geom::{boxes_overlap, box_of, Cuboid};
//! use glam::Vec3;
//!
//! let block = box_of(Vec3::new(12.0, 0.0, 6.0), Vec3::splat(0.5));
//! let player = Cuboid::unit(Vec3::new(12.0, 0.0, 5.25));
//!
//! assert!(boxes_overlap(&player.bounds(), &block));
//! assert!(!boxes_overlap(&player.translated(Vec3::new(0.0, 0.0, -0.3)).bounds(), &block));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Half-extent of the unit cube used for both blocks and the player.
pub const UNIT_HALF_EXTENT: f32 = 0.5;

/// Axis-aligned bounding box.
///
/// Invariant for a valid box: `min <= max` componentwise. Zero-size boxes are
/// valid. Constructors do not enforce the invariant; use [`Aabb::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from min/max corners.
    #[must_use]
    pub const fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a box from a center point and half-extents.
    #[must_use]
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get the center of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size of the box.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Get the half-extents of the box.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// True when `min <= max` on every axis and no coordinate is NaN.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    /// Check if a point is inside the box (faces included).
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Check whether two boxes intersect.
    ///
    /// Touching faces count as an intersection. Any NaN coordinate makes the
    /// test fail.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
            && self.max.z >= other.min.z
            && self.min.z <= other.max.z
    }

    /// Overlap extent on each axis, clamped at zero.
    ///
    /// Non-zero on all three axes only when the boxes strictly interpenetrate.
    #[must_use]
    pub fn overlap_extent(&self, other: &Self) -> Vec3 {
        (self.max.min(other.max) - self.min.max(other.min)).max(Vec3::ZERO)
    }

    /// Return this box moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::from_center(Vec3::ZERO, Vec3::splat(UNIT_HALF_EXTENT))
    }
}

/// A box described by its center and half-extents.
///
/// Both scene objects store their shape this way; the [`Aabb`] is derived on
/// demand so it always agrees with the current center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cuboid {
    /// Center position
    pub center: Vec3,
    /// Half-extents along each axis
    pub half_extents: Vec3,
}

impl Cuboid {
    /// Create a cuboid.
    #[must_use]
    pub const fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Create a unit cube centered at `center`.
    #[must_use]
    pub fn unit(center: Vec3) -> Self {
        Self::new(center, Vec3::splat(UNIT_HALF_EXTENT))
    }

    /// Derive the bounding box.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.center, self.half_extents)
    }

    /// Return a copy with the center moved by `offset`.
    ///
    /// Uses the same arithmetic as moving the center in place, so a probe
    /// built with this method lands on exactly the committed position.
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            center: self.center + offset,
            half_extents: self.half_extents,
        }
    }
}

impl Default for Cuboid {
    fn default() -> Self {
        Self::unit(Vec3::ZERO)
    }
}

/// Box of an object at `position` with the given half-extents.
#[must_use]
pub fn box_of(position: Vec3, half_extents: Vec3) -> Aabb {
    Aabb::from_center(position, half_extents)
}

/// Report whether two boxes overlap. See [`Aabb::overlaps`].
#[must_use]
pub fn boxes_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}
