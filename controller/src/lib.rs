pub mod camera;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod ground;
pub mod input;
pub mod physics;
pub mod weapon;

#[cfg(test)]
mod test_support;

pub use camera::Camera;
pub use config::{CameraConfig, ControllerConfig, MovementConfig, WeaponConfig};
pub use controller::MotionController;
pub use error::ConfigError;
pub use ground::{GroundProbe, GroundState, probe_ground};
pub use input::{ActionBit, ActionSet, InputAction, InputState};
pub use physics::{
    Activation, BodyHandle, BodyInterface, CapsuleSpec, PhysicsWorld, Point3, RayHit,
    StaticBodyDef, StaticShape, Vec3,
};
pub use weapon::{HitKind, ReloadState, ShotReport, WeaponState};
