//! Per-player controller settings.
//!
//! Every field falls back to the matching value in [`crate::constants`], so a partial
//! JSON document (or none at all) yields a usable configuration.

use serde::Deserialize;

use crate::{constants::*, error::ConfigError, physics::CapsuleSpec};

/// Movement and body settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub move_speed_mps: f32,
    pub run_speed_mps: f32,
    pub jump_velocity_mps: f32,
    /// Standing height; the capsule cylinder half-height is half of this.
    pub player_height_m: f32,
    pub player_radius_m: f32,
    pub ground_probe_margin_m: f32,
    /// Probe hits at or beyond this fraction are not ground.
    pub grounded_max_fraction: f32,
    /// Largest gap under a standing player that is closed by snapping down.
    pub ground_snap_distance_m: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed_mps: MOVE_SPEED_MPS,
            run_speed_mps: RUN_SPEED_MPS,
            jump_velocity_mps: JUMP_VELOCITY_MPS,
            player_height_m: PLAYER_HEIGHT_M,
            player_radius_m: PLAYER_RADIUS_M,
            ground_probe_margin_m: GROUND_PROBE_MARGIN_M,
            grounded_max_fraction: GROUNDED_MAX_FRACTION,
            ground_snap_distance_m: GROUND_SNAP_DISTANCE_M,
        }
    }
}

impl MovementConfig {
    /// Collision capsule for the player body.
    #[inline]
    pub fn capsule(&self) -> CapsuleSpec {
        CapsuleSpec {
            radius: self.player_radius_m,
            half_height: self.player_height_m * 0.5,
        }
    }

    /// Downward distance covered by the ground probe.
    #[inline]
    pub fn ground_probe_distance(&self) -> f32 {
        self.player_height_m * 0.5 + self.ground_probe_margin_m
    }
}

/// Look and field-of-view settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub mouse_sensitivity_deg: f32,
    pub pitch_limit_deg: f32,
    pub initial_yaw_deg: f32,
    pub walk_fov_deg: f32,
    pub run_fov_deg: f32,
    pub fov_smoothing_rate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity_deg: MOUSE_SENSITIVITY_DEG,
            pitch_limit_deg: PITCH_LIMIT_DEG,
            initial_yaw_deg: INITIAL_YAW_DEG,
            walk_fov_deg: WALK_FOV_DEG,
            run_fov_deg: RUN_FOV_DEG,
            fov_smoothing_rate: FOV_SMOOTHING_RATE,
        }
    }
}

/// Magazine, cadence and range of the hit-scan weapon.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub max_ammo: u32,
    /// Seconds between shots.
    pub fire_interval_s: f32,
    pub reload_time_s: f32,
    pub max_range_m: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            max_ammo: MAX_AMMO,
            fire_interval_s: FIRE_INTERVAL_S,
            reload_time_s: RELOAD_TIME_S,
            max_range_m: MAX_SHOOT_DISTANCE_M,
        }
    }
}

impl WeaponConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_ammo == 0 {
            return Err(ConfigError::EmptyMagazine);
        }
        positive("weapon.fire_interval_s", self.fire_interval_s)?;
        positive("weapon.reload_time_s", self.reload_time_s)?;
        positive("weapon.max_range_m", self.max_range_m)
    }
}

/// Full controller configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub movement: MovementConfig,
    pub camera: CameraConfig,
    pub weapon: WeaponConfig,
}

impl ControllerConfig {
    /// Reject values that would make the controller misbehave (NaN speeds, empty
    /// magazines, a zero-length probe, ...).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        positive("movement.move_speed_mps", m.move_speed_mps)?;
        positive("movement.run_speed_mps", m.run_speed_mps)?;
        positive("movement.jump_velocity_mps", m.jump_velocity_mps)?;
        positive("movement.player_height_m", m.player_height_m)?;
        positive("movement.player_radius_m", m.player_radius_m)?;
        positive("movement.ground_probe_margin_m", m.ground_probe_margin_m)?;
        positive("movement.grounded_max_fraction", m.grounded_max_fraction)?;
        positive("movement.ground_snap_distance_m", m.ground_snap_distance_m)?;

        let c = &self.camera;
        positive("camera.mouse_sensitivity_deg", c.mouse_sensitivity_deg)?;
        positive("camera.walk_fov_deg", c.walk_fov_deg)?;
        positive("camera.run_fov_deg", c.run_fov_deg)?;
        positive("camera.fov_smoothing_rate", c.fov_smoothing_rate)?;
        if !(c.pitch_limit_deg > 0.0 && c.pitch_limit_deg < 90.0) {
            return Err(ConfigError::PitchLimit(c.pitch_limit_deg));
        }
        if c.run_fov_deg < c.walk_fov_deg {
            return Err(ConfigError::FovInverted {
                walk: c.walk_fov_deg,
                run: c.run_fov_deg,
            });
        }

        self.weapon.validate()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
