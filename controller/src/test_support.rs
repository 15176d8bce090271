//! Scripted stand-in for the physics world.
//!
//! Bodies are plain records; ray and shape casts return whatever the test scripted.
//! Nothing integrates, so velocities and positions only change when written.

use std::cell::Cell;

use crate::physics::{
    Activation, BodyHandle, BodyInterface, CapsuleSpec, Point3, RayHit, RigidBodyHandle, Vec3,
};

pub fn handle(index: u32) -> BodyHandle {
    RigidBodyHandle::from_raw_parts(index, 0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptedBody {
    pub capsule: CapsuleSpec,
    pub position: Point3,
    pub velocity: Vec3,
    pub gravity_factor: f32,
    pub removed: bool,
}

#[derive(Default)]
pub struct ScriptedWorld {
    pub bodies: Vec<ScriptedBody>,
    /// Result of every ray cast.
    pub ray_hit: Option<RayHit>,
    /// Result of every shape cast.
    pub shape_toi: Option<f32>,
    pub last_ray: Cell<Option<(Point3, Vec3)>>,
    pub last_ray_ignore: Cell<Option<BodyHandle>>,
    pub last_shape_cast: Cell<Option<(Point3, Vec3)>>,
}

impl ScriptedWorld {
    pub fn body(&self, body: BodyHandle) -> &ScriptedBody {
        &self.bodies[body.into_raw_parts().0 as usize]
    }

    pub fn body_mut(&mut self, body: BodyHandle) -> &mut ScriptedBody {
        &mut self.bodies[body.into_raw_parts().0 as usize]
    }
}

impl BodyInterface for ScriptedWorld {
    fn create_player_body(&mut self, capsule: CapsuleSpec, position: Point3) -> BodyHandle {
        self.bodies.push(ScriptedBody {
            capsule,
            position,
            velocity: Vec3::zeros(),
            gravity_factor: 1.0,
            removed: false,
        });
        handle(self.bodies.len() as u32 - 1)
    }

    fn remove_body(&mut self, body: BodyHandle) {
        self.body_mut(body).removed = true;
    }

    fn linear_velocity(&self, body: BodyHandle) -> Vec3 {
        self.body(body).velocity
    }

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
        self.body_mut(body).velocity = velocity;
    }

    fn position(&self, body: BodyHandle) -> Point3 {
        self.body(body).position
    }

    fn set_position(&mut self, body: BodyHandle, position: Point3, _activation: Activation) {
        self.body_mut(body).position = position;
    }

    fn set_gravity_factor(&mut self, body: BodyHandle, factor: f32) {
        self.body_mut(body).gravity_factor = factor;
    }

    fn cast_ray(&self, origin: Point3, translation: Vec3, ignore: BodyHandle) -> Option<RayHit> {
        self.last_ray.set(Some((origin, translation)));
        self.last_ray_ignore.set(Some(ignore));
        self.ray_hit
    }

    fn cast_shape(
        &self,
        _capsule: CapsuleSpec,
        position: Point3,
        translation: Vec3,
        _ignore: BodyHandle,
    ) -> Option<f32> {
        self.last_shape_cast.set(Some((position, translation)));
        self.shape_toi
    }
}
