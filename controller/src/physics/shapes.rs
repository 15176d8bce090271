//! Static level geometry: floors, walls, props and shooting targets.

use rapier3d::{
    na::{Translation3, UnitQuaternion},
    prelude::*,
};

/// Shape of a static body, in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StaticShape {
    /// Half-space whose surface faces the body's local +Y, raised by `offset` along it.
    Plane { offset: f32 },
    Cuboid { half_extents: Vector<f32> },
    Ball { radius: f32 },
    /// Capsule along the body's local Y axis.
    Capsule { radius: f32, half_height: f32 },
}

/// One immutable body of the level.
///
/// `id` orders insertion into the world and names the body for later lookups
/// (see [`super::PhysicsWorld::static_body`]).
#[derive(Clone, Debug, PartialEq)]
pub struct StaticBodyDef {
    pub id: u32,
    pub translation: Vector<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub shape: StaticShape,
}

impl StaticBodyDef {
    /// Unrotated body centered at `translation`.
    pub fn new(id: u32, translation: Vector<f32>, shape: StaticShape) -> Self {
        Self {
            id,
            translation,
            rotation: UnitQuaternion::identity(),
            shape,
        }
    }

    /// Axis-aligned box centered at `center`.
    pub fn cuboid(id: u32, center: Vector<f32>, half_extents: Vector<f32>) -> Self {
        Self::new(id, center, StaticShape::Cuboid { half_extents })
    }

    pub fn rotated(mut self, rotation: UnitQuaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Pose of the fixed body carrying the collider.
    pub fn pose(&self) -> Isometry<f32> {
        Isometry::from_parts(Translation3::from(self.translation), self.rotation)
    }

    /// Collider in the body's local frame. The body carries the pose, so only the
    /// plane needs a local offset.
    pub fn collider(&self) -> Collider {
        let builder = match self.shape {
            StaticShape::Plane { offset } => {
                ColliderBuilder::halfspace(Vector::y_axis()).translation(Vector::y() * offset)
            }
            StaticShape::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            StaticShape::Ball { radius } => ColliderBuilder::ball(radius),
            StaticShape::Capsule {
                radius,
                half_height,
            } => ColliderBuilder::capsule_y(half_height, radius),
        };
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_keeps_its_half_extents() {
        let def = StaticBodyDef::cuboid(1, vector![0.0, -0.5, 0.0], vector![10.0, 0.5, 10.0]);
        let collider = def.collider();
        let cuboid = collider.shape().as_cuboid().expect("cuboid shape");
        assert_eq!(cuboid.half_extents, vector![10.0, 0.5, 10.0]);
    }

    #[test]
    fn plane_is_a_halfspace_raised_along_local_up() {
        let def = StaticBodyDef::new(2, Vector::zeros(), StaticShape::Plane { offset: 1.5 });
        let collider = def.collider();
        assert!(collider.shape().as_halfspace().is_some());
        assert!((collider.translation().y - 1.5).abs() < 1.0e-6);
    }

    #[test]
    fn pose_combines_translation_and_rotation() {
        let rotation = UnitQuaternion::from_euler_angles(0.0, std::f32::consts::FRAC_PI_2, 0.0);
        let def = StaticBodyDef::new(3, vector![1.0, 2.0, 3.0], StaticShape::Ball { radius: 0.5 })
            .rotated(rotation);

        let pose = def.pose();
        assert_eq!(pose.translation.vector, vector![1.0, 2.0, 3.0]);
        // A quarter turn about +Y takes +X to -Z.
        let x = pose.rotation * Vector::x();
        assert!((x - vector![0.0, 0.0, -1.0]).norm() < 1.0e-6);
    }
}
