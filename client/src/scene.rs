//! Static test range the client runs in.

use fps_controller::{
    PhysicsWorld, Point3, StaticBodyDef, StaticShape, Vec3, constants::GRAVITY_MPS2,
};
use nalgebra::UnitQuaternion;

const FLOOR_ID: u32 = 1;
pub const TARGET_ID: u32 = 2;
const CRATE_ID: u32 = 3;
const PILLAR_ID: u32 = 4;
const BALL_ID: u32 = 5;

/// Start position: capsule standing just above the floor.
pub fn spawn_point() -> Point3 {
    Point3::new(0.0, 1.25, 0.0)
}

/// Floor plane at y = 0, a wide target wall down -Z, and a few props off to the side.
pub fn build() -> PhysicsWorld {
    let defs = vec![
        StaticBodyDef::new(FLOOR_ID, Vec3::zeros(), StaticShape::Plane { offset: 0.0 }),
        StaticBodyDef::cuboid(
            TARGET_ID,
            Vec3::new(0.0, 1.5, -40.0),
            Vec3::new(5.0, 3.0, 0.5),
        ),
        StaticBodyDef::cuboid(CRATE_ID, Vec3::new(-6.0, 0.5, -8.0), Vec3::new(0.5, 0.5, 0.5))
            .rotated(UnitQuaternion::from_euler_angles(0.0, 0.6, 0.0)),
        StaticBodyDef::new(
            PILLAR_ID,
            Vec3::new(8.0, 2.0, -12.0),
            StaticShape::Capsule {
                radius: 0.4,
                half_height: 1.6,
            },
        ),
        StaticBodyDef::new(
            BALL_ID,
            Vec3::new(4.0, 0.75, -20.0),
            StaticShape::Ball { radius: 0.75 },
        ),
    ];

    PhysicsWorld::build(defs, Vec3::new(0.0, -GRAVITY_MPS2, 0.0))
}
