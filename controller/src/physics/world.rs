//! rapier3d-backed physics world.
//!
//! Owns every rapier structure needed to both simulate (dynamic player capsules fall,
//! land and get pushed out of geometry) and answer scene queries (ray casts for
//! hit-scan, capsule casts for the ground probe).
//!
//! Design notes
//! - Static geometry is inserted once by [`PhysicsWorld::build`], sorted by `id`, as fixed
//!   bodies. The broad/narrow phases are primed right away so queries work before the
//!   first `step`.
//! - Bodies added afterwards become visible to queries after the next `step`.
//! - A query world is borrowed per query (`BroadPhaseBvh::as_query_pipeline`) with a
//!   filter that skips the caller's own body and all sensors.

use std::collections::BTreeMap;

use rapier3d::{
    na::Isometry3,
    parry::{query::ShapeCastOptions, shape::Capsule},
    prelude::*,
};

use super::{
    Activation, BodyHandle, BodyInterface, CapsuleSpec, Point3, RayHit, Vec3,
    shapes::StaticBodyDef,
};
use crate::constants::GRAVITY_MPS2;

pub struct PhysicsWorld {
    pub gravity: Vector<f32>,
    pub integration_parameters: IntegrationParameters,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    islands: IslandManager,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    pipeline: PhysicsPipeline,
    statics: BTreeMap<u32, BodyHandle>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(vector![0.0, -GRAVITY_MPS2, 0.0])
    }
}

impl PhysicsWorld {
    /// Empty world with the given gravity vector.
    pub fn new(gravity: Vector<f32>) -> Self {
        Self {
            gravity,
            integration_parameters: IntegrationParameters::default(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            islands: IslandManager::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            pipeline: PhysicsPipeline::new(),
            statics: BTreeMap::new(),
        }
    }

    /// Build a world from static collider definitions.
    ///
    /// Determinism
    /// - The input is sorted by `id` before insertion.
    /// - NaN/invalid poses should be filtered by the caller.
    pub fn build(mut defs: Vec<StaticBodyDef>, gravity: Vector<f32>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut world = Self::new(gravity);
        for def in &defs {
            let rb_handle = world
                .bodies
                .insert(RigidBodyBuilder::fixed().pose(def.pose()).build());
            world
                .colliders
                .insert_with_parent(def.collider(), rb_handle, &mut world.bodies);
            if world.statics.insert(def.id, rb_handle).is_some() {
                log::warn!("duplicate world static id {}; the last definition wins lookups", def.id);
            }
        }

        // Collision detection only (no dynamics): fills the broad-phase BVH and the
        // narrow-phase contact graph so scene queries can run before the first step.
        let mut collision_pipeline = CollisionPipeline::new();
        collision_pipeline.step(
            0.0,
            &mut world.broad_phase,
            &mut world.narrow_phase,
            &mut world.bodies,
            &mut world.colliders,
            &(),
            &(),
        );

        log::debug!("built physics world with {} statics", world.statics.len());
        world
    }

    /// Body created for the static with the given `id`, if any.
    pub fn static_body(&self, id: u32) -> Option<BodyHandle> {
        self.statics.get(&id).copied()
    }

    /// Advance the simulation by `dt` seconds. Non-positive or non-finite `dt` is ignored.
    pub fn step(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        self.integration_parameters.dt = dt;

        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Borrowed query view restricted by `filter`.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    /// Filter used by every controller query: skip `ignore` and all sensors.
    fn excluding(ignore: BodyHandle) -> QueryFilter<'static> {
        QueryFilter::default()
            .exclude_sensors()
            .exclude_rigid_body(ignore)
    }

    fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        let body = self.bodies.get(handle);
        if body.is_none() {
            log::error!("unknown body handle {:?}", handle);
        }
        body
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        let body = self.bodies.get_mut(handle);
        if body.is_none() {
            log::error!("unknown body handle {:?}", handle);
        }
        body
    }
}

impl BodyInterface for PhysicsWorld {
    fn create_player_body(&mut self, capsule: CapsuleSpec, position: Point3) -> BodyHandle {
        // Rotations locked so the capsule never tips over; no sleeping so velocity
        // writes always apply. CCD stays off: it lifts a capsule that slides while
        // resting on a floor, and player speeds stay far below the capsule radius per step.
        let rb = RigidBodyBuilder::dynamic()
            .translation(position.coords)
            .lock_rotations()
            .can_sleep(false)
            .build();
        let handle = self.bodies.insert(rb);

        // Zero friction: the controller owns horizontal velocity.
        let collider = ColliderBuilder::capsule_y(capsule.half_height, capsule.radius)
            .friction(0.0)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        handle
    }

    fn remove_body(&mut self, body: BodyHandle) {
        let removed = self.bodies.remove(
            body,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        if removed.is_none() {
            log::error!("tried to remove unknown body handle {:?}", body);
        }
    }

    fn linear_velocity(&self, body: BodyHandle) -> Vec3 {
        self.body(body).map(|rb| *rb.linvel()).unwrap_or_else(Vec3::zeros)
    }

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
        if let Some(rb) = self.body_mut(body) {
            rb.set_linvel(velocity, true);
        }
    }

    fn position(&self, body: BodyHandle) -> Point3 {
        self.body(body)
            .map(|rb| Point3::from(*rb.translation()))
            .unwrap_or_else(Point3::origin)
    }

    fn set_position(&mut self, body: BodyHandle, position: Point3, activation: Activation) {
        if let Some(rb) = self.body_mut(body) {
            rb.set_translation(position.coords, activation.wakes());
        }
    }

    fn set_gravity_factor(&mut self, body: BodyHandle, factor: f32) {
        if let Some(rb) = self.body_mut(body) {
            rb.set_gravity_scale(factor, true);
        }
    }

    fn cast_ray(&self, origin: Point3, translation: Vec3, ignore: BodyHandle) -> Option<RayHit> {
        // With the full translation as the ray direction, time of impact is the
        // fraction of the cast.
        let ray = Ray::new(origin, translation);
        let (collider, toi) = self
            .query_pipeline(Self::excluding(ignore))
            .cast_ray(&ray, 1.0, true)?;

        Some(RayHit {
            body: self.colliders.get(collider).and_then(|c| c.parent()),
            fraction: toi,
        })
    }

    fn cast_shape(
        &self,
        capsule: CapsuleSpec,
        position: Point3,
        translation: Vec3,
        ignore: BodyHandle,
    ) -> Option<f32> {
        let shape = Capsule::new_y(capsule.half_height, capsule.radius);
        let shape_pos = Isometry3::translation(position.x, position.y, position.z);

        let query = self.query_pipeline(Self::excluding(ignore));

        // The sweep is unreliable when it starts inside a collider (a resting capsule
        // sinks a fraction of a millimeter into the floor), so overlap is tested first.
        if query.intersect_shape(shape_pos, &shape).next().is_some() {
            return Some(0.0);
        }

        let mut options = ShapeCastOptions::with_max_time_of_impact(1.0);
        options.stop_at_penetration = true;

        query
            .cast_shape(&shape_pos, &translation, &shape, options)
            .map(|(_, hit)| hit.time_of_impact)
    }
}
