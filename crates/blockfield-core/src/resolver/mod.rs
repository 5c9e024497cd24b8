//! Collision resolution between the moving entity and a single obstacle.
//!
//! Given an entity box that overlaps an obstacle box, a resolver decides
//! which face of the obstacle the entity came through and how far it must
//! move back out along that face's normal.
//!
//! # Contract
//!
//! The contract is shared by every strategy and lives in the provided
//! [`ContactResolver::resolve`] method:
//! 1. Refuse pairs that do not overlap ([`ResolveError::NotOverlapping`])
//! 2. Ask the strategy for a depth on each of the six [`ContactSide`]s
//! 3. Pick the shallowest side; ties go to the first side in
//!    [`ContactSide::ALL`] order (`+Z, -Z, +X, -X, +Y, -Y`)
//! 4. Report the displacement `normal * depth`
//!
//! Strategies only implement [`ContactResolver::side_depth`].
//!
//! # Available Resolvers
//!
//! - [`ProbeResolver`]: Walks a copy of the entity outward in fixed steps
//! - [`AnalyticResolver`]: Reads the overlap extent straight from the boxes

mod analytic;
mod probe;

pub use analytic::{AnalyticResolver, DEFAULT_SKIN};
pub use probe::{ProbeResolver, YProbe, DEFAULT_MAX_PROBE_STEPS, STEP};

use std::fmt;

use blockfield_geom::{Aabb, Cuboid};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::entity::{Boxed, MovingEntity, Obstacle};
use crate::error::ResolveError;

/// Face of the obstacle the entity is pushed out through.
///
/// The variant order is the tie-break order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactSide {
    /// Push toward +Z
    PosZ,
    /// Push toward -Z
    NegZ,
    /// Push toward +X
    PosX,
    /// Push toward -X
    NegX,
    /// Push toward +Y
    PosY,
    /// Push toward -Y
    NegY,
}

impl ContactSide {
    /// All sides in tie-break order.
    pub const ALL: [Self; 6] = [
        Self::PosZ,
        Self::NegZ,
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
    ];

    /// Position of this side in [`ContactSide::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::PosZ => 0,
            Self::NegZ => 1,
            Self::PosX => 2,
            Self::NegX => 3,
            Self::PosY => 4,
            Self::NegY => 5,
        }
    }

    /// Unit vector the correction is applied along.
    #[must_use]
    pub const fn normal(self) -> Vec3 {
        match self {
            Self::PosZ => Vec3::Z,
            Self::NegZ => Vec3::NEG_Z,
            Self::PosX => Vec3::X,
            Self::NegX => Vec3::NEG_X,
            Self::PosY => Vec3::Y,
            Self::NegY => Vec3::NEG_Y,
        }
    }
}

impl fmt::Display for ContactSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PosZ => write!(f, "+Z"),
            Self::NegZ => write!(f, "-Z"),
            Self::PosX => write!(f, "+X"),
            Self::NegX => write!(f, "-X"),
            Self::PosY => write!(f, "+Y"),
            Self::NegY => write!(f, "-Y"),
        }
    }
}

/// Result of resolving one contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Chosen side
    pub side: ContactSide,
    /// Depth along the chosen side
    pub depth: f32,
    /// Correction to add to the entity position
    pub displacement: Vec3,
    /// Candidate depth for every side, indexed by [`ContactSide::index`]
    pub depths: [f32; 6],
}

impl Contact {
    /// Candidate depth for `side`.
    #[must_use]
    pub fn depth_for(&self, side: ContactSide) -> f32 {
        self.depths[side.index()]
    }
}

/// Picks the shallowest side; the first minimum in enumeration order wins.
#[must_use]
pub fn shallowest_side(depths: &[f32; 6]) -> ContactSide {
    let mut best = ContactSide::ALL[0];
    for side in ContactSide::ALL {
        if depths[side.index()] < depths[best.index()] {
            best = side;
        }
    }
    best
}

/// Strategy for measuring how deep the entity sits behind each face.
///
/// Implementations are stateless with respect to the scene: they read the
/// boxes they are given and never keep anything between calls.
///
/// # Example
///
/// ```
/// use blockfield_core::resolver::{ContactResolver, ContactSide, ProbeResolver};
/// use blockfield_geom::{box_of, Cuboid};
/// use glam::Vec3;
///
/// let obstacle = box_of(Vec3::ZERO, Vec3::splat(0.5));
/// let mover = Cuboid::unit(Vec3::new(0.0, 0.0, 0.8));
///
/// let contact = ProbeResolver::new().resolve(&mover, &obstacle).unwrap();
/// assert_eq!(contact.side, ContactSide::PosZ);
/// assert!(!mover.translated(contact.displacement).bounds().overlaps(&obstacle));
/// ```
pub trait ContactResolver: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Distance the mover must travel along `side` to stop overlapping.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ProbeLimitExceeded`] or
    /// [`ResolveError::SeparationFailed`] if the strategy gives up.
    fn side_depth(
        &self,
        mover: &Cuboid,
        obstacle: &Aabb,
        side: ContactSide,
    ) -> Result<f32, ResolveError>;

    /// Chooses the contact side and correction for an overlapping pair.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NotOverlapping`] if the boxes do not overlap
    /// - Any error from [`ContactResolver::side_depth`]
    fn resolve(&self, mover: &Cuboid, obstacle: &Aabb) -> Result<Contact, ResolveError> {
        if !mover.bounds().overlaps(obstacle) {
            return Err(ResolveError::NotOverlapping);
        }

        let mut depths = [0.0; 6];
        for side in ContactSide::ALL {
            depths[side.index()] = self.side_depth(mover, obstacle, side)?;
        }

        let side = shallowest_side(&depths);
        let depth = depths[side.index()];
        Ok(Contact {
            side,
            depth,
            displacement: side.normal() * depth,
            depths,
        })
    }

    /// Resolves `entity` against `obstacle` and moves the entity.
    ///
    /// On error the entity is left where it was.
    ///
    /// # Errors
    ///
    /// See [`ContactResolver::resolve`].
    fn resolve_collision(
        &self,
        entity: &mut MovingEntity,
        obstacle: &Obstacle,
    ) -> Result<Contact, ResolveError> {
        let contact = self.resolve(entity.shape(), &obstacle.bounds())?;
        entity.translate(contact.displacement);
        Ok(contact)
    }
}
