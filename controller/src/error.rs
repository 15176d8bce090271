//! Configuration errors.
//!
//! Per-frame operations never fail: "not grounded", "no hit" and "not ready to fire"
//! are ordinary outcomes. Only a bad configuration is rejected, up front.

use thiserror::Error;

/// Reasons a [`crate::ControllerConfig`] is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A value that must be strictly positive and finite was not.
    #[error("`{field}` must be a positive, finite number (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    /// A magazine must hold at least one round.
    #[error("`weapon.max_ammo` must be at least 1")]
    EmptyMagazine,

    /// The running field of view must not be narrower than the walking one.
    #[error("`camera.run_fov_deg` ({run}) is smaller than `camera.walk_fov_deg` ({walk})")]
    FovInverted { walk: f32, run: f32 },

    /// The pitch limit must stay inside (0, 90) degrees.
    #[error("`camera.pitch_limit_deg` must be in (0, 90) (got {0})")]
    PitchLimit(f32),
}
