//! Closed-form resolver.
//!
//! The depth for a side is how far the entity's trailing face sits past the
//! obstacle's face on that side, read directly from the box corners. A small
//! positive skin is added because boxes that merely touch still count as
//! overlapping.
//!
//! Far from the origin one ULP can exceed the skin, and the corrected
//! center rounds back onto the obstacle face. Each depth is therefore
//! checked by translating the mover, and widened until it clears.

use blockfield_geom::{Aabb, Cuboid};

use super::{ContactResolver, ContactSide};
use crate::error::ResolveError;

/// Default gap left between the boxes after a correction.
pub const DEFAULT_SKIN: f32 = 1.0e-4;

/// Times a depth is widened before giving up.
const MAX_WIDENINGS: u32 = 64;

/// Resolver that computes per-side penetration from box extents.
///
/// Same side selection and tie-break as [`ProbeResolver`](super::ProbeResolver),
/// without the per-step overlap tests.
///
/// # Example
///
/// ```
/// use blockfield_core::resolver::{AnalyticResolver, ContactResolver, ContactSide};
/// use blockfield_geom::{box_of, Cuboid};
/// use glam::Vec3;
///
/// let resolver = AnalyticResolver::new();
/// let block = box_of(Vec3::ZERO, Vec3::splat(0.5));
/// let player = Cuboid::unit(Vec3::new(0.75, 0.0, 0.0));
///
/// let depth = resolver.side_depth(&player, &block, ContactSide::PosX).unwrap();
/// assert!((depth - 0.25).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticResolver {
    skin: f32,
}

impl AnalyticResolver {
    /// Creates an analytic resolver with [`DEFAULT_SKIN`].
    #[must_use]
    pub fn new() -> Self {
        Self { skin: DEFAULT_SKIN }
    }

    /// Sets the skin. Must be finite and positive.
    #[must_use]
    pub fn with_skin(mut self, skin: f32) -> Self {
        self.skin = skin;
        self
    }

    /// Returns the skin.
    #[must_use]
    pub fn skin(&self) -> f32 {
        self.skin
    }
}

impl Default for AnalyticResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactResolver for AnalyticResolver {
    fn name(&self) -> &'static str {
        "analytic"
    }

    fn side_depth(
        &self,
        mover: &Cuboid,
        obstacle: &Aabb,
        side: ContactSide,
    ) -> Result<f32, ResolveError> {
        let bounds = mover.bounds();
        let penetration = match side {
            ContactSide::PosZ => obstacle.max.z - bounds.min.z,
            ContactSide::NegZ => bounds.max.z - obstacle.min.z,
            ContactSide::PosX => obstacle.max.x - bounds.min.x,
            ContactSide::NegX => bounds.max.x - obstacle.min.x,
            ContactSide::PosY => obstacle.max.y - bounds.min.y,
            ContactSide::NegY => bounds.max.y - obstacle.min.y,
        };

        let offset = side.normal();
        let mut depth = penetration.max(0.0) + self.skin;
        let mut widen = self.skin.max(f32::EPSILON);
        for _ in 0..MAX_WIDENINGS {
            // Same arithmetic as the committed correction.
            if !mover.translated(offset * depth).bounds().overlaps(obstacle) {
                return Ok(depth);
            }
            depth += widen;
            widen *= 2.0;
        }
        Err(ResolveError::SeparationFailed { side, depth })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ProbeResolver;
    use blockfield_geom::box_of;
    use glam::Vec3;

    #[test]
    fn depths_match_box_extents() {
        let resolver = AnalyticResolver::new().with_skin(0.001);
        let block = box_of(Vec3::ZERO, Vec3::splat(0.5));
        let mover = Cuboid::unit(Vec3::new(0.25, -0.5, 0.0));

        let depth = |side| resolver.side_depth(&mover, &block, side).unwrap();
        assert!((depth(ContactSide::PosX) - 0.751).abs() < 1e-5);
        assert!((depth(ContactSide::NegX) - 1.251).abs() < 1e-5);
        assert!((depth(ContactSide::PosY) - 1.501).abs() < 1e-5);
        assert!((depth(ContactSide::NegY) - 0.501).abs() < 1e-5);
        assert!((depth(ContactSide::PosZ) - 1.001).abs() < 1e-5);
    }

    #[test]
    fn separated_side_costs_only_skin() {
        let resolver = AnalyticResolver::new();
        let block = box_of(Vec3::ZERO, Vec3::splat(0.5));
        let mover = Cuboid::unit(Vec3::new(0.0, 0.0, 5.0));
        let depth = resolver
            .side_depth(&mover, &block, ContactSide::PosZ)
            .unwrap();
        assert_eq!(depth, DEFAULT_SKIN);
    }

    #[test]
    fn far_from_origin_still_separates() {
        let resolver = AnalyticResolver::new();
        for base in [1.0e3_f32, 1.0e4, 1.0e5, 4.0e5] {
            let block = box_of(Vec3::new(base, 0.0, base + 1.0), Vec3::splat(0.5));
            for k in 1..20_u8 {
                let z = base + f32::from(k) * 0.05;
                let mover = Cuboid::unit(Vec3::new(base, 0.0, z));
                if !mover.bounds().overlaps(&block) {
                    continue;
                }
                let contact = resolver.resolve(&mover, &block).unwrap();
                let moved = mover.translated(contact.displacement);
                assert!(
                    !moved.bounds().overlaps(&block),
                    "base {base} z {z}: {} depth {} still overlaps",
                    contact.side,
                    contact.depth
                );
            }
        }
    }

    #[test]
    fn zero_skin_still_clears_touching_faces() {
        // Penetration is zero, so only the widening separates the boxes.
        let resolver = AnalyticResolver::new().with_skin(0.0);
        let block = box_of(Vec3::ZERO, Vec3::splat(0.5));
        let mover = Cuboid::unit(Vec3::new(0.0, 0.0, 1.0));
        let depth = resolver
            .side_depth(&mover, &block, ContactSide::PosZ)
            .unwrap();
        assert!(depth > 0.0);
        assert!(!mover
            .translated(ContactSide::PosZ.normal() * depth)
            .bounds()
            .overlaps(&block));
    }

    #[test]
    fn astronomical_coordinates_report_failed_separation() {
        let resolver = AnalyticResolver::new();
        let block = box_of(Vec3::splat(1.0e30), Vec3::splat(0.5));
        let mover = Cuboid::unit(Vec3::splat(1.0e30));
        assert!(matches!(
            resolver.side_depth(&mover, &block, ContactSide::PosZ),
            Err(ResolveError::SeparationFailed {
                side: ContactSide::PosZ,
                ..
            })
        ));
        assert!(resolver.resolve(&mover, &block).is_err());
    }

    #[test]
    fn agrees_with_probe_within_one_step() {
        let block = box_of(Vec3::new(12.0, 0.0, 6.0), Vec3::splat(0.5));
        let probe = ProbeResolver::new();
        let analytic = AnalyticResolver::new();

        for z in [5.1_f32, 5.3, 5.55, 5.7] {
            let mover = Cuboid::unit(Vec3::new(12.2, 0.0, z));
            let a = analytic.resolve(&mover, &block).unwrap();
            let p = probe.resolve(&mover, &block).unwrap();
            assert_eq!(a.side, p.side, "z = {z}");
            assert!((a.depth - p.depth).abs() <= probe.step() + 1e-4, "z = {z}");
        }
    }
}
