//! Frame pacing.
//!
//! The loop targets a fixed rate but measures real elapsed time, so a slow frame (or a
//! stall in a debugger) produces a long dt. That dt is clamped before it reaches the
//! controller or the physics step to avoid large jumps after stalls.

use std::time::Duration;

/// Target frame rate (Hz).
pub const FRAME_HZ: f32 = 60.0;

/// Max dt (seconds) handed to the controller and the physics step.
pub const MAX_FRAME_DT_S: f32 = 0.10;

/// Wall-clock budget of one frame at [`FRAME_HZ`].
pub fn frame_budget() -> Duration {
    Duration::from_secs_f32(1.0 / FRAME_HZ)
}

/// Clamp a measured frame time into `[0, MAX_FRAME_DT_S]`.
pub fn clamp_frame_dt(real_dt: f32) -> f32 {
    if real_dt.is_nan() {
        return 0.0;
    }
    real_dt.clamp(0.0, MAX_FRAME_DT_S)
}
