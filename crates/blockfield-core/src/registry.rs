//! Obstacle registry for the collision scene.
//!
//! The registry owns the fixed set of static obstacles. It provides:
//! - Population with integer-snapped random positions (seeded, reproducible)
//! - Insertion-ordered storage with stable [`ObstacleId`]s
//! - Overlap queries against an arbitrary [`Aabb`]
//! - The observational per-obstacle overlap flag used for drawing
//!
//! # Determinism
//!
//! Obstacles live in a `Vec` in insertion order and ids are assigned
//! monotonically from zero, so iteration and query results are always in
//! insertion order. Population draws from a caller-supplied RNG; seeding a
//! `ChaCha8Rng` with the same seed reproduces the same field.
//!
//! # Example
//!
//! ```
//! use blockfield_core::registry::ObstacleRegistry;
//! use blockfield_geom::box_of;
//! use glam::Vec3;
//!
//! let registry = ObstacleRegistry::from_positions(
//!     [Vec3::new(0.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0)],
//!     Vec3::splat(0.5),
//! );
//!
//! let hits = registry.overlapping_ids(&box_of(Vec3::new(0.6, 0.0, 0.0), Vec3::splat(0.5)));
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].as_u64(), 0);
//! ```

use blockfield_geom::Aabb;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entity::{Boxed, Obstacle, ObstacleId};

/// Static obstacle storage.
///
/// Read-only after population apart from the overlap flags, which no
/// collision query consults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleRegistry {
    /// Obstacles in insertion order; `obstacles[i].id() == i`.
    obstacles: Vec<Obstacle>,
}

impl ObstacleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
        }
    }

    /// Creates a registry of `count` obstacles at random integer positions.
    ///
    /// Positions are drawn uniformly from `0..=bounds_x` × `{0}` × `0..=bounds_z`.
    /// Obstacles may overlap each other.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of obstacles to create
    /// * `bounds_x` - Largest X coordinate
    /// * `bounds_z` - Largest Z coordinate
    /// * `half_extents` - Half-extents shared by every obstacle
    /// * `rng` - Source of randomness
    #[allow(clippy::cast_precision_loss)]
    pub fn populate<R: Rng + ?Sized>(
        count: usize,
        bounds_x: u32,
        bounds_z: u32,
        half_extents: Vec3,
        rng: &mut R,
    ) -> Self {
        let mut registry = Self {
            obstacles: Vec::with_capacity(count),
        };
        for _ in 0..count {
            let x = rng.gen_range(0..=bounds_x) as f32;
            let z = rng.gen_range(0..=bounds_z) as f32;
            registry.insert(Vec3::new(x, 0.0, z), half_extents);
        }
        info!(
            count,
            bounds_x, bounds_z, "populated obstacle registry"
        );
        registry
    }

    /// Creates a registry with one obstacle per position, in order.
    #[must_use]
    pub fn from_positions(positions: impl IntoIterator<Item = Vec3>, half_extents: Vec3) -> Self {
        let mut registry = Self::new();
        for position in positions {
            registry.insert(position, half_extents);
        }
        registry
    }

    /// Adds an obstacle and returns its id.
    pub fn insert(&mut self, position: Vec3, half_extents: Vec3) -> ObstacleId {
        let id = ObstacleId::new(self.obstacles.len() as u64);
        self.obstacles.push(Obstacle::new(id, position, half_extents));
        id
    }

    /// Returns an obstacle by id.
    #[must_use]
    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        usize::try_from(id.as_u64())
            .ok()
            .and_then(|index| self.obstacles.get(index))
    }

    /// Iterates obstacles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles.iter()
    }

    /// Returns all obstacles as a slice, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Returns the number of obstacles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Returns true if the registry holds no obstacles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Returns every obstacle whose box intersects `bounds`, in insertion order.
    #[must_use]
    pub fn overlapping(&self, bounds: &Aabb) -> Vec<&Obstacle> {
        self.obstacles
            .iter()
            .filter(|obstacle| obstacle.bounds().overlaps(bounds))
            .collect()
    }

    /// Like [`ObstacleRegistry::overlapping`], returning ids only.
    #[must_use]
    pub fn overlapping_ids(&self, bounds: &Aabb) -> Vec<ObstacleId> {
        self.obstacles
            .iter()
            .filter(|obstacle| obstacle.bounds().overlaps(bounds))
            .map(Obstacle::id)
            .collect()
    }

    /// Sets the overlap flag on the listed obstacles and clears it on the rest.
    ///
    /// `ids` must be sorted, which `overlapping_ids` guarantees.
    pub fn mark_overlapping(&mut self, ids: &[ObstacleId]) {
        debug_assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        for obstacle in &mut self.obstacles {
            let hit = ids.binary_search(&obstacle.id()).is_ok();
            obstacle.set_overlapping(hit);
        }
    }

    /// Number of obstacles currently flagged as overlapping.
    #[must_use]
    pub fn overlapping_count(&self) -> usize {
        self.obstacles.iter().filter(|o| o.is_overlapping()).count()
    }
}
