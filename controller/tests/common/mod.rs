#![allow(dead_code)]

use fps_controller::{
    ControllerConfig, MotionController, PhysicsWorld, Point3, StaticBodyDef,
    constants::GRAVITY_MPS2,
};
use rapier3d::prelude::vector;

pub const FLOOR_ID: u32 = 1;
pub const TARGET_ID: u32 = 2;
pub const DT: f32 = 1.0 / 60.0;

/// Capsule center height when the capsule stands on the floor.
pub const STANDING_Y: f32 = 1.2;

/// 100 x 100 m floor with its top face at y = 0 and a 2 x 2 m target box whose
/// front face sits 9.5 m down -Z from the origin.
pub fn range_world() -> PhysicsWorld {
    PhysicsWorld::build(
        vec![
            StaticBodyDef::cuboid(FLOOR_ID, vector![0.0, -0.5, 0.0], vector![50.0, 0.5, 50.0]),
            StaticBodyDef::cuboid(
                TARGET_ID,
                vector![0.0, STANDING_Y, -10.0],
                vector![1.0, 1.0, 0.5],
            ),
        ],
        vector![0.0, -GRAVITY_MPS2, 0.0],
    )
}

pub fn spawn_at(world: &mut PhysicsWorld, y: f32) -> MotionController {
    MotionController::spawn(world, Point3::new(0.0, y, 0.0), ControllerConfig::default())
}
