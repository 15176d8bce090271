use crate::{
    config::MovementConfig,
    physics::{Activation, BodyHandle, BodyInterface, Vec3},
};

/// Grounded/gravity state of the controlled body for one frame.
///
/// - `Airborne`: no support under the body; gravity acts normally.
/// - `GroundedAtRest`: supported and not jumping; vertical velocity is pinned to zero and
///   gravity is suspended so the capsule does not slowly sink into the floor.
/// - `GroundedJumping`: supported and the jump started this frame; gravity restored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GroundState {
    #[default]
    Airborne,
    GroundedAtRest,
    GroundedJumping,
}

impl GroundState {
    /// Gravity multiplier applied to the body in this state.
    #[inline]
    pub fn gravity_factor(self) -> f32 {
        match self {
            GroundState::GroundedAtRest => 0.0,
            GroundState::Airborne | GroundState::GroundedJumping => 1.0,
        }
    }

    #[inline]
    pub fn is_grounded(self) -> bool {
        !matches!(self, GroundState::Airborne)
    }
}

/// Result of a downward capsule probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundProbe {
    /// Time-of-impact fraction of the probe, if anything was hit.
    pub fraction: Option<f32>,
    /// Distance the capsule could drop before touching, if anything was hit.
    pub gap_m: Option<f32>,
    /// Whether the hit is close enough to count as standing on it.
    pub grounded: bool,
}

/// Sweep the player's capsule straight down from its current position.
///
/// - The probe travels `half height + margin` and ignores the player's own body.
/// - Only a hit below `grounded_max_fraction` counts as ground; a hit near the end of the
///   probe means the floor is close but not touching.
/// - This is a single per-frame sample: it can miss for a frame at a ledge.
pub fn probe_ground<W: BodyInterface + ?Sized>(
    world: &W,
    body: BodyHandle,
    movement: &MovementConfig,
) -> GroundProbe {
    let position = world.position(body);
    let distance = movement.ground_probe_distance();
    let translation = Vec3::new(0.0, -distance, 0.0);

    let fraction = world.cast_shape(movement.capsule(), position, translation, body);
    let grounded = fraction.is_some_and(|f| f < movement.grounded_max_fraction);

    GroundProbe {
        fraction,
        gap_m: fraction.map(|f| f * distance),
        grounded,
    }
}

/// Pull a standing body back down onto the ground under it.
///
/// The solver can lift a resting capsule a little while it pushes it out of the floor.
/// If the probe found ground within `ground_snap_distance_m`, the body is moved down by
/// the gap and `true` is returned. Velocity is left alone.
pub fn snap_to_ground<W: BodyInterface + ?Sized>(
    world: &mut W,
    body: BodyHandle,
    probe: &GroundProbe,
    movement: &MovementConfig,
) -> bool {
    let Some(gap) = probe.gap_m else {
        return false;
    };
    if gap > movement.ground_snap_distance_m {
        return false;
    }

    let position = world.position(body);
    world.set_position(body, position - Vec3::y() * gap, Activation::Activate);
    log::trace!("snapped {:?} down {gap:.4} m", body);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{physics::Point3, test_support::ScriptedWorld};

    fn probe_with(toi: Option<f32>) -> (GroundProbe, ScriptedWorld) {
        let mut world = ScriptedWorld::default();
        let movement = MovementConfig::default();
        let body = world.create_player_body(movement.capsule(), Point3::new(0.0, 3.0, 0.0));
        world.shape_toi = toi;
        (probe_ground(&world, body, &movement), world)
    }

    #[test]
    fn touching_hit_is_ground() {
        let (probe, world) = probe_with(Some(0.0));
        assert!(probe.grounded);
        assert_eq!(probe.gap_m, Some(0.0));

        let (origin, translation) = world.last_shape_cast.get().expect("probe cast");
        assert_eq!(origin, Point3::new(0.0, 3.0, 0.0));
        assert!((translation.y + 0.95).abs() < 1.0e-6);
        assert_eq!(translation.x, 0.0);
        assert_eq!(translation.z, 0.0);
    }

    #[test]
    fn far_hit_and_no_hit_are_not_ground() {
        assert!(!probe_with(Some(1.0)).0.grounded);
        assert!(!probe_with(Some(0.5)).0.grounded);
        assert!(!probe_with(None).0.grounded);

        let (probe, _) = probe_with(Some(0.5));
        assert_eq!(probe.fraction, Some(0.5));
        assert!((probe.gap_m.unwrap() - 0.475).abs() < 1.0e-6);
    }

    #[test]
    fn small_gap_is_closed_by_snapping() {
        let (probe, mut world) = probe_with(Some(0.04));
        let body = crate::test_support::handle(0);
        assert!(!probe.grounded);

        assert!(snap_to_ground(&mut world, body, &probe, &MovementConfig::default()));
        let y = world.body(body).position.y;
        assert!((y - (3.0 - 0.04 * 0.95)).abs() < 1.0e-5);
    }

    #[test]
    fn large_gap_and_no_ground_are_left_alone() {
        for toi in [Some(0.5), None] {
            let (probe, mut world) = probe_with(toi);
            let body = crate::test_support::handle(0);
            assert!(!snap_to_ground(&mut world, body, &probe, &MovementConfig::default()));
            assert_eq!(world.body(body).position, Point3::new(0.0, 3.0, 0.0));
        }
    }

    #[test]
    fn gravity_is_suspended_only_at_rest() {
        assert_eq!(GroundState::GroundedAtRest.gravity_factor(), 0.0);
        assert_eq!(GroundState::GroundedJumping.gravity_factor(), 1.0);
        assert_eq!(GroundState::Airborne.gravity_factor(), 1.0);
        assert!(!GroundState::Airborne.is_grounded());
    }
}
