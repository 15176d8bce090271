//! Default tuning values for the player controller and its weapon.
//!
//! Distances are in meters, time in seconds, angles in degrees.
//! [`crate::ControllerConfig::default`] is built from these; override them per player
//! through the config rather than editing the constants.

/// Gravity magnitude in meters per second squared (positive value).
/// The physics world integrates it as a downward acceleration.
pub const GRAVITY_MPS2: f32 = 9.81;

/// Base walking speed on the horizontal plane.
pub const MOVE_SPEED_MPS: f32 = 2.5;

/// Speed used while the run modifier and the forward key are both held.
pub const RUN_SPEED_MPS: f32 = 5.0;

/// Vertical velocity applied on the frame a grounded jump starts.
pub const JUMP_VELOCITY_MPS: f32 = 5.0;

/// Player capsule: total standing height used for the ground probe.
///
/// The collision capsule uses half of this as its cylinder half-height, so the
/// body is `PLAYER_HEIGHT_M + 2 * PLAYER_RADIUS_M` tall end to end.
pub const PLAYER_HEIGHT_M: f32 = 1.8;

/// Player capsule radius.
pub const PLAYER_RADIUS_M: f32 = 0.3;

/// Extra distance the downward ground probe travels past half the player height.
pub const GROUND_PROBE_MARGIN_M: f32 = 0.05;

/// A probe hit counts as ground only below this fraction of the probe distance.
///
/// With the default probe (0.95 m) this is roughly one centimeter: the surface has
/// to be essentially touching. A hit at the far end of the probe is not ground.
pub const GROUNDED_MAX_FRACTION: f32 = 0.01;

/// Max downward distance a resting player is pulled back onto the ground (meters).
///
/// Only applies while the player was standing the frame before; stepping off a
/// drop taller than this makes the player airborne.
pub const GROUND_SNAP_DISTANCE_M: f32 = 0.10;

/// Degrees of rotation per pixel of cursor travel.
pub const MOUSE_SENSITIVITY_DEG: f32 = 0.1;

/// Pitch limit (both directions). Keeps the basis away from the world-up pole.
pub const PITCH_LIMIT_DEG: f32 = 89.0;

/// Initial yaw; -90 degrees faces down -Z.
pub const INITIAL_YAW_DEG: f32 = -90.0;

/// Field of view while walking or standing.
pub const WALK_FOV_DEG: f32 = 80.0;

/// Field of view target while running.
pub const RUN_FOV_DEG: f32 = 90.0;

/// Exponential smoothing rate for the field of view (per second).
pub const FOV_SMOOTHING_RATE: f32 = 8.0;

/// Rounds per magazine.
pub const MAX_AMMO: u32 = 30;

/// Minimum time between two shots.
pub const FIRE_INTERVAL_S: f32 = 0.2;

/// Time from reload start until the magazine is full again.
pub const RELOAD_TIME_S: f32 = 3.0;

/// Hit-scan range. Rays that find nothing end here.
pub const MAX_SHOOT_DISTANCE_M: f32 = 100_000.0;
