//! Test helper functions for setting up scenes.

use glam::Vec3;

use crate::config::{ResolverStrategy, SceneConfig};
use crate::controller::MotionController;
use crate::entity::{Boxed, MovingEntity};
use crate::registry::ObstacleRegistry;
use crate::resolver::{AnalyticResolver, ContactResolver, ProbeResolver, YProbe};
use crate::simulation::Simulation;

// =============================================================================
// Scene Setup
// =============================================================================

/// Half-extents of the reference unit cube.
pub fn unit() -> Vec3 {
    Vec3::splat(0.5)
}

/// The reference approach: player at (12, 0, 5), one block at (12, 0, 6).
pub fn approach_scene(resolver: Box<dyn ContactResolver>) -> Simulation {
    Simulation::from_parts(
        ObstacleRegistry::from_positions([Vec3::new(12.0, 0.0, 6.0)], unit()),
        MovingEntity::unit(Vec3::new(12.0, 0.0, 5.0)),
        MotionController::new(),
        resolver,
    )
}

/// A scene with blocks at `positions` and the player at `start`.
pub fn scene_with_blocks(
    start: Vec3,
    positions: &[Vec3],
    speed: f32,
    resolver: Box<dyn ContactResolver>,
) -> Simulation {
    Simulation::from_parts(
        ObstacleRegistry::from_positions(positions.iter().copied(), unit()),
        MovingEntity::unit(start),
        MotionController::with_speed(speed),
        resolver,
    )
}

/// Default scene config with the given seed and strategy.
pub fn seeded_config(seed: u64, strategy: ResolverStrategy) -> SceneConfig {
    let mut config = SceneConfig {
        seed,
        ..SceneConfig::default()
    };
    config.resolver.strategy = strategy;
    config
}

// =============================================================================
// Resolver Factories
// =============================================================================

/// Every resolver configuration the contract must hold for.
pub fn all_resolvers() -> Vec<Box<dyn ContactResolver>> {
    vec![
        Box::new(ProbeResolver::new()),
        Box::new(ProbeResolver::new().with_y_probe(YProbe::Mirrored)),
        Box::new(AnalyticResolver::new()),
    ]
}

// =============================================================================
// Assertions
// =============================================================================

/// Ids of obstacles the entity currently overlaps.
pub fn overlapped_ids(sim: &Simulation) -> Vec<u64> {
    sim.registry()
        .overlapping_ids(&sim.entity().bounds())
        .into_iter()
        .map(|id| id.as_u64())
        .collect()
}

/// Panics if the entity overlaps any obstacle.
pub fn assert_clear(sim: &Simulation) {
    let ids = overlapped_ids(sim);
    assert!(
        ids.is_empty(),
        "entity at {} still overlaps {:?} after tick {}",
        sim.entity_position(),
        ids,
        sim.tick_count()
    );
}
