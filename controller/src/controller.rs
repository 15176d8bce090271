//! First-person motion controller.
//!
//! Translates one frame of input into a velocity for a dynamic capsule body, decides
//! ground contact with a downward probe, drives the camera and the weapon.
//!
//! Frame contract
//! - Call [`MotionController::update`] once per frame, before stepping the world. The
//!   controller reads the state the previous step settled on and writes a velocity the
//!   next step integrates (one frame of lag between command and position is expected).
//! - The body is authoritative; the controller's position is a per-frame copy.
//! - Exactly one controller writes a given body's velocity.

use nalgebra as na;

use crate::{
    camera::Camera,
    config::ControllerConfig,
    ground::{GroundProbe, GroundState, probe_ground, snap_to_ground},
    input::{InputAction, InputState},
    physics::{BodyHandle, BodyInterface, Point3, Vec3},
    weapon::{ShotReport, WeaponState},
};

pub struct MotionController {
    config: ControllerConfig,
    body: BodyHandle,
    position: Point3,
    camera: Camera,
    weapon: WeaponState,
    ground_state: GroundState,
    /// Jump key state last frame; a jump needs a fresh press.
    jump_held: bool,
    fov_deg: f32,
    cursor_captured: bool,
}

impl MotionController {
    /// Create the player body at `start` and a controller driving it.
    ///
    /// The config is assumed valid (see [`ControllerConfig::validate`]).
    pub fn spawn<W: BodyInterface + ?Sized>(
        world: &mut W,
        start: Point3,
        config: ControllerConfig,
    ) -> Self {
        let body = world.create_player_body(config.movement.capsule(), start);
        log::debug!("spawned player body {:?} at {:?}", body, start);

        Self {
            body,
            position: start,
            camera: Camera::new(start, &config.camera),
            weapon: WeaponState::new(config.weapon, body),
            ground_state: GroundState::Airborne,
            jump_held: false,
            fov_deg: config.camera.walk_fov_deg,
            cursor_captured: true,
            config,
        }
    }

    /// Release the player body. The controller is consumed with it.
    pub fn despawn<W: BodyInterface + ?Sized>(self, world: &mut W) {
        log::debug!("despawning player body {:?}", self.body);
        world.remove_body(self.body);
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Body position as of the last update.
    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn weapon(&self) -> &WeaponState {
        &self.weapon
    }

    pub fn weapon_mut(&mut self) -> &mut WeaponState {
        &mut self.weapon
    }

    pub fn ground_state(&self) -> GroundState {
        self.ground_state
    }

    /// Smoothed field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov_deg
    }

    pub fn view_matrix(&self) -> na::Matrix4<f32> {
        self.camera.view_matrix()
    }

    /// Probe for ground under the body right now.
    pub fn is_grounded<W: BodyInterface + ?Sized>(&self, world: &W) -> bool {
        self.ground_probe(world).grounded
    }

    /// Downward sweep under the body right now, with its raw fraction and gap.
    pub fn ground_probe<W: BodyInterface + ?Sized>(&self, world: &W) -> GroundProbe {
        probe_ground(world, self.body, &self.config.movement)
    }

    pub fn cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Stop applying cursor motion (e.g. the cursor was freed to use a menu).
    pub fn release_cursor(&mut self) {
        self.cursor_captured = false;
    }

    /// Resume mouselook. The next cursor sample only sets a new baseline.
    pub fn capture_cursor(&mut self) {
        self.cursor_captured = true;
        self.camera.reset_cursor_baseline();
    }

    /// Apply a raw cursor position to yaw/pitch. Ignored while the cursor is released.
    pub fn process_mouse(&mut self, x: f64, y: f64) {
        if !self.cursor_captured {
            return;
        }
        self.camera.process_cursor(x, y);
    }

    /// Run one frame. Non-positive or non-finite `dt` does nothing.
    ///
    /// Returns the shot fired this frame, if any.
    pub fn update<W: BodyInterface + ?Sized>(
        &mut self,
        world: &mut W,
        input: &InputState,
        dt: f32,
    ) -> Option<ShotReport> {
        if !(dt.is_finite() && dt > 0.0) {
            return None;
        }
        let movement = self.config.movement;

        // 1) Planar intent from the camera basis.
        let mut wish = Vec3::zeros();
        if input.is_down(InputAction::MoveForward) {
            wish += self.camera.planar_front();
        }
        if input.is_down(InputAction::MoveBackward) {
            wish -= self.camera.planar_front();
        }
        if input.is_down(InputAction::StrafeLeft) {
            wish -= self.camera.right();
        }
        if input.is_down(InputAction::StrafeRight) {
            wish += self.camera.right();
        }

        let running =
            input.is_down(InputAction::Run) && input.is_down(InputAction::MoveForward);
        let speed = if running {
            movement.run_speed_mps
        } else {
            movement.move_speed_mps
        };
        // Unit length before scaling so diagonals are not faster.
        let horizontal = wish
            .try_normalize(1.0e-6)
            .map_or_else(Vec3::zeros, |dir| dir * speed);

        // 2) Jump edge.
        let jump_down = input.is_down(InputAction::Jump);
        let jump_pressed = jump_down && !self.jump_held;
        self.jump_held = jump_down;

        // 3) Ground state and vertical velocity.
        let current = world.linear_velocity(self.body);
        let probe = self.ground_probe(world);
        // A player who was standing stays on the ground across small lifts from the
        // solver; only a real drop or a jump leaves it.
        let grounded = probe.grounded
            || (self.ground_state == GroundState::GroundedAtRest
                && snap_to_ground(world, self.body, &probe, &movement));
        let state = match (grounded, jump_pressed) {
            (true, true) => GroundState::GroundedJumping,
            (true, false) => GroundState::GroundedAtRest,
            (false, _) => GroundState::Airborne,
        };
        let vertical = match state {
            GroundState::GroundedAtRest => 0.0,
            GroundState::GroundedJumping => movement.jump_velocity_mps,
            GroundState::Airborne => current.y,
        };

        match (self.ground_state.is_grounded(), state) {
            (false, GroundState::GroundedAtRest | GroundState::GroundedJumping) => {
                log::debug!("landed at {:?}", world.position(self.body));
            }
            (_, GroundState::GroundedJumping) => log::debug!("jump"),
            _ => {}
        }
        self.ground_state = state;

        world.set_gravity_factor(self.body, state.gravity_factor());
        world.set_linear_velocity(self.body, Vec3::new(horizontal.x, vertical, horizontal.z));

        // 4) Field of view eases toward the running/walking target.
        let camera_cfg = &self.config.camera;
        let target_fov = if running {
            camera_cfg.run_fov_deg
        } else {
            camera_cfg.walk_fov_deg
        };
        let blend = (camera_cfg.fov_smoothing_rate * dt).min(1.0);
        self.fov_deg += (target_fov - self.fov_deg) * blend;

        // 5) Camera follows the body; the weapon shoots along the view.
        self.position = world.position(self.body);
        self.camera.position = self.position;

        if input.is_down(InputAction::Fire) {
            self.weapon.request_fire();
        }
        if input.is_down(InputAction::Reload) {
            self.weapon.reload();
        }
        self.weapon
            .update(&*world, self.camera.position, self.camera.front(), dt)
    }
}
