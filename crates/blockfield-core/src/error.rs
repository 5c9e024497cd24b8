//! Error types for the collision core.
//!
//! The core performs no I/O, so every error here is a broken contract:
//! a resolver called on a pair that does not overlap, a probe that never
//! clears, or a scene configuration that cannot produce a valid world.
//! [`ScriptError`] covers the text form of scripted input.

use thiserror::Error;

use crate::resolver::ContactSide;

/// Failure to resolve a single entity/obstacle contact.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// The resolver was invoked on a pair whose boxes do not overlap.
    #[error("resolver invoked on a non-overlapping pair")]
    NotOverlapping,

    /// A probe walked `steps` steps toward `side` without clearing the obstacle.
    #[error("probe toward {side} did not clear the obstacle within {steps} steps")]
    ProbeLimitExceeded {
        /// Side being probed when the cap was hit
        side: ContactSide,
        /// Number of steps taken
        steps: u32,
    },

    /// A computed correction toward `side` still left the boxes touching,
    /// even after widening it. Happens when coordinates are so large that
    /// the skin is lost to rounding.
    #[error("correction toward {side} did not separate the boxes (last depth {depth})")]
    SeparationFailed {
        /// Side being corrected toward
        side: ContactSide,
        /// Largest depth tried
        depth: f32,
    },
}

/// Invalid scene or resolver configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Probe step must be finite and positive.
    #[error("probe step must be finite and positive, got {0}")]
    InvalidStep(f32),

    /// Probe cap must allow at least one step.
    #[error("max_probe_steps must be at least 1")]
    InvalidProbeCap,

    /// Analytic skin must be finite and positive.
    #[error("analytic skin must be finite and positive, got {0}")]
    InvalidSkin(f32),

    /// Speed must be finite and non-negative.
    #[error("speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f32),

    /// Half-extents must be finite and non-negative on every axis.
    #[error("{what} half-extents must be finite and non-negative, got {value:?}")]
    InvalidHalfExtents {
        /// Which object the extents belong to
        what: &'static str,
        /// Offending value
        value: [f32; 3],
    },

    /// Entity start position must be finite.
    #[error("entity start position must be finite, got {0:?}")]
    InvalidStart([f32; 3]),
}

/// Malformed input script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// A key name that is not one of the four directions.
    #[error("unknown input key {0:?}")]
    UnknownKey(String),

    /// A repeat count that is not a positive integer.
    #[error("invalid repeat count {0:?}")]
    InvalidCount(String),
}
