//! Per-second frame report.

use fps_controller::{HitKind, ShotReport};

/// Counts frames and shots and closes a report window once per second of frame time.
#[derive(Debug, Default)]
pub struct FrameStats {
    frames: u32,
    window_s: f32,
    window_shots: u32,
    total_shots: u32,
    total_target_hits: u32,
}

/// One closed report window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub fps: f32,
    pub shots: u32,
}

impl FrameStats {
    pub fn record_shot(&mut self, shot: &ShotReport) {
        self.window_shots += 1;
        self.total_shots += 1;
        if shot.kind == HitKind::Target {
            self.total_target_hits += 1;
        }
    }

    /// Count a frame of length `dt`. Returns a report when a full second has elapsed.
    pub fn record_frame(&mut self, dt: f32) -> Option<FrameReport> {
        self.frames += 1;
        self.window_s += dt;
        if self.window_s < 1.0 {
            return None;
        }

        let report = FrameReport {
            fps: self.frames as f32 / self.window_s,
            shots: self.window_shots,
        };
        self.frames = 0;
        self.window_s = 0.0;
        self.window_shots = 0;
        Some(report)
    }

    pub fn total_shots(&self) -> u32 {
        self.total_shots
    }

    pub fn total_target_hits(&self) -> u32 {
        self.total_target_hits
    }
}
