//! Resolver contract checked over random overlapping pairs.
//!
//! Pairs are generated both around the origin and far from it, where a
//! single ULP approaches the step and skin sizes.

use glam::Vec3;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use blockfield_geom::{box_of, Aabb, Cuboid};

use crate::error::ResolveError;
use crate::resolver::{Contact, ContactResolver, ContactSide};

use super::helpers::all_resolvers;

/// A mover overlapping an obstacle centered at `base`, any sizes.
fn overlapping_pair(base: Vec3) -> impl Strategy<Value = (Cuboid, Aabb)> {
    (
        (0.1f32..2.0, 0.1f32..2.0, 0.1f32..2.0),
        (0.1f32..2.0, 0.1f32..2.0, 0.1f32..2.0),
        (-0.99f32..0.99, -0.99f32..0.99, -0.99f32..0.99),
    )
        .prop_map(move |(mover, obstacle, offset)| {
            let mover = Vec3::new(mover.0, mover.1, mover.2);
            let obstacle = Vec3::new(obstacle.0, obstacle.1, obstacle.2);
            let reach = mover + obstacle;
            let center = base + Vec3::new(offset.0, offset.1, offset.2) * reach;
            (Cuboid::new(center, mover), box_of(base, obstacle))
        })
}

/// The same, with the obstacle anywhere in a 1e5 cube.
fn far_pair() -> impl Strategy<Value = (Cuboid, Aabb)> {
    (0.0f32..1.0e5, 0.0f32..1.0e5, 0.0f32..1.0e5)
        .prop_flat_map(|(x, y, z)| overlapping_pair(Vec3::new(x, y, z)))
}

/// Resolves the pair. A probe that runs out of steps is the only allowed
/// failure; it yields `None`.
fn resolve_allowing_cap(
    resolver: &dyn ContactResolver,
    mover: &Cuboid,
    obstacle: &Aabb,
) -> Result<Option<Contact>, TestCaseError> {
    match resolver.resolve(mover, obstacle) {
        Ok(contact) => Ok(Some(contact)),
        Err(ResolveError::ProbeLimitExceeded { .. }) if resolver.name() == "probe" => Ok(None),
        Err(err) => Err(TestCaseError::fail(format!(
            "{} failed on {:?} vs {:?}: {err}",
            resolver.name(),
            mover.bounds(),
            obstacle
        ))),
    }
}

/// Correction clears, picks the first minimum, and is not repeatable on the result.
fn check_contract(mover: &Cuboid, obstacle: &Aabb) -> Result<(), TestCaseError> {
    for resolver in all_resolvers() {
        let Some(contact) = resolve_allowing_cap(resolver.as_ref(), mover, obstacle)? else {
            continue;
        };

        let moved = mover.translated(contact.displacement);
        prop_assert!(
            !moved.bounds().overlaps(obstacle),
            "{} left {:?} overlapping {:?}",
            resolver.name(),
            moved.bounds(),
            obstacle
        );

        for depth in contact.depths {
            prop_assert!(contact.depth <= depth);
        }
        let first = ContactSide::ALL
            .into_iter()
            .find(|side| contact.depth_for(*side) == contact.depth);
        prop_assert_eq!(first, Some(contact.side));
        prop_assert_eq!(contact.displacement, contact.side.normal() * contact.depth);

        prop_assert_eq!(
            resolver.resolve(&moved, obstacle),
            Err(ResolveError::NotOverlapping)
        );
    }
    Ok(())
}

proptest! {
    #[test]
    fn contract_holds_near_origin((mover, obstacle) in overlapping_pair(Vec3::ZERO)) {
        prop_assume!(mover.bounds().overlaps(&obstacle));
        check_contract(&mover, &obstacle)?;
    }

    #[test]
    fn contract_holds_far_from_origin((mover, obstacle) in far_pair()) {
        prop_assume!(mover.bounds().overlaps(&obstacle));
        check_contract(&mover, &obstacle)?;
    }

    #[test]
    fn resolve_is_repeatable((mover, obstacle) in far_pair()) {
        prop_assume!(mover.bounds().overlaps(&obstacle));

        for resolver in all_resolvers() {
            let first = resolver.resolve(&mover, &obstacle);
            let second = resolver.resolve(&mover, &obstacle);
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn separated_pair_is_rejected(gap in 0.001f32..5.0, axis in 0usize..3) {
        let obstacle = box_of(Vec3::ZERO, Vec3::splat(0.5));
        let mut center = Vec3::ZERO;
        center[axis] = 1.0 + gap;
        let mover = Cuboid::unit(center);

        for resolver in all_resolvers() {
            prop_assert_eq!(
                resolver.resolve(&mover, &obstacle),
                Err(ResolveError::NotOverlapping)
            );
        }
    }
}
