/*!
Physics boundary used by the controller and the weapon.

The controller never reaches into the simulation directly. It talks to a
[`BodyInterface`]: a narrow contract covering velocity/position access on one body,
a gravity multiplier, a ray cast and a capsule shape cast. [`PhysicsWorld`] is the
rapier3d implementation; tests substitute scripted fakes.

- shapes: static collider definitions and their rapier colliders
- world:  the rapier3d-backed simulation (stepping + queries)

Conventions
- Units are meters and seconds, +Y is up.
- Cast results are fractions in [0, 1] of the requested translation.
- The body a query should ignore (the caller's own capsule) is passed with every query.
*/

pub mod shapes;
pub mod world;

use nalgebra as na;
pub use rapier3d::prelude::RigidBodyHandle;

pub use shapes::{StaticBodyDef, StaticShape};
pub use world::PhysicsWorld;

/// Common math aliases.
pub type Vec3 = na::Vector3<f32>;
pub type Point3 = na::Point3<f32>;

/// Opaque handle to a body owned by the physics world.
pub type BodyHandle = RigidBodyHandle;

/// Whether a position change should wake the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Activate,
    DontActivate,
}

impl Activation {
    #[inline]
    pub fn wakes(self) -> bool {
        matches!(self, Activation::Activate)
    }
}

/// Y-aligned capsule used for the player body and its ground probe.
///
/// `half_height` is the half-length of the cylinder section, so the capsule spans
/// `2 * half_height + 2 * radius` end to end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleSpec {
    pub radius: f32,
    pub half_height: f32,
}

/// First intersection along a ray cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Body owning the collider that was hit. `None` for parentless colliders.
    pub body: Option<BodyHandle>,
    /// Fraction (0..1) of the cast translation where the hit occurred.
    pub fraction: f32,
}

/// What the controller needs from the rigid-body simulation.
///
/// Handles must refer to live bodies; passing a removed handle is a caller bug.
/// Implementations should not panic on it, but the result is unspecified.
pub trait BodyInterface {
    /// Create the dynamic player capsule at `position` and return its handle.
    fn create_player_body(&mut self, capsule: CapsuleSpec, position: Point3) -> BodyHandle;

    /// Remove a body (and its colliders) from the simulation.
    fn remove_body(&mut self, body: BodyHandle);

    fn linear_velocity(&self, body: BodyHandle) -> Vec3;

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec3);

    fn position(&self, body: BodyHandle) -> Point3;

    fn set_position(&mut self, body: BodyHandle, position: Point3, activation: Activation);

    /// Scale applied to world gravity for this body (0 = weightless, 1 = normal).
    fn set_gravity_factor(&mut self, body: BodyHandle, factor: f32);

    /// Cast a ray from `origin` along `translation` (direction * length), skipping `ignore`.
    fn cast_ray(&self, origin: Point3, translation: Vec3, ignore: BodyHandle) -> Option<RayHit>;

    /// Sweep `capsule` from `position` along `translation`, skipping `ignore`.
    ///
    /// Returns the earliest time-of-impact fraction. Shapes already overlapping at the
    /// start report exactly `0.0`. Otherwise the fraction may come in early by a few
    /// millimeters of travel (the sweep converges to a tolerance, not to exact contact).
    fn cast_shape(
        &self,
        capsule: CapsuleSpec,
        position: Point3,
        translation: Vec3,
        ignore: BodyHandle,
    ) -> Option<f32>;
}
