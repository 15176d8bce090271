//! First-person camera: yaw/pitch orientation and the derived view basis.
//!
//! Angles are stored in degrees. Pitch is clamped to `±pitch_limit` so the forward
//! vector never reaches the world-up pole (where `front × up` degenerates); yaw is
//! unbounded and wraps through the trigonometry.

use nalgebra as na;

use crate::{
    config::CameraConfig,
    physics::{Point3, Vec3},
};

#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Point3,
    yaw_deg: f32,
    pitch_deg: f32,
    pitch_limit_deg: f32,
    sensitivity_deg: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    planar_front: Vec3,
    /// Last cursor sample; `None` until a baseline has been taken.
    last_cursor: Option<(f64, f64)>,
}

impl Camera {
    pub fn new(position: Point3, config: &CameraConfig) -> Self {
        let mut camera = Self {
            position,
            yaw_deg: config.initial_yaw_deg,
            pitch_deg: 0.0,
            pitch_limit_deg: config.pitch_limit_deg,
            sensitivity_deg: config.mouse_sensitivity_deg,
            front: -Vec3::z(),
            right: Vec3::x(),
            up: Vec3::y(),
            planar_front: -Vec3::z(),
            last_cursor: None,
        };
        camera.update_basis();
        camera
    }

    pub fn yaw(&self) -> f32 {
        self.yaw_deg
    }

    pub fn pitch(&self) -> f32 {
        self.pitch_deg
    }

    /// Unit view direction.
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit vector to the right of the view direction. Always horizontal.
    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Forward restricted to the XZ plane, normalized. Used for walking.
    pub fn planar_front(&self) -> Vec3 {
        self.planar_front
    }

    /// Set the orientation directly (pitch is clamped).
    pub fn set_rotation(&mut self, yaw_deg: f32, pitch_deg: f32) {
        self.yaw_deg = yaw_deg;
        self.pitch_deg = pitch_deg.clamp(-self.pitch_limit_deg, self.pitch_limit_deg);
        self.update_basis();
    }

    /// Apply a raw cursor sample.
    ///
    /// The first sample after [`Camera::reset_cursor_baseline`] (or construction) only
    /// records the baseline. Moving the cursor down (growing `y`) pitches down.
    pub fn process_cursor(&mut self, x: f64, y: f64) {
        let Some((last_x, last_y)) = self.last_cursor.replace((x, y)) else {
            return;
        };

        let dx = ((x - last_x) as f32) * self.sensitivity_deg;
        let dy = ((y - last_y) as f32) * self.sensitivity_deg;
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }

        self.set_rotation(self.yaw_deg + dx, self.pitch_deg - dy);
    }

    /// Forget the last cursor sample so the next one becomes a fresh baseline.
    pub fn reset_cursor_baseline(&mut self) {
        self.last_cursor = None;
    }

    /// Right-handed look-at from `position` along `front`.
    pub fn view_matrix(&self) -> na::Matrix4<f32> {
        na::Matrix4::look_at_rh(&self.position, &(self.position + self.front), &self.up)
    }

    fn update_basis(&mut self) {
        let (yaw, pitch) = (self.yaw_deg.to_radians(), self.pitch_deg.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(&Vec3::y()).normalize();
        self.up = self.right.cross(&self.front).normalize();
        // Pitch stays inside ±90°, so the horizontal part never vanishes.
        self.planar_front = Vec3::new(yaw.cos(), 0.0, yaw.sin()).normalize();
    }
}
