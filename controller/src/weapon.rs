//! Hit-scan weapon: magazine, fire cadence, reload timer and shot resolution.
//!
//! Timing model
//! - `update(dt)` is called once per frame with the frame's elapsed time.
//! - While reloading, only the reload timer advances; no shot can happen, and the frame
//!   that completes the reload does not fire either.
//! - Otherwise the shot timer advances (saturating at the fire interval) and a pending
//!   fire request fires if the interval has elapsed and the magazine is not empty.
//! - The fire request is a one-frame latch: every update takes it, whether or not a shot
//!   happens. Requests made during cooldown or reload are dropped, not queued.
//! - Emptying the magazine starts a reload immediately.

use crate::{
    config::WeaponConfig,
    physics::{BodyHandle, BodyInterface, Point3, Vec3},
};

/// Reload state of the magazine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReloadState {
    Ready,
    /// Reloading; `elapsed` runs from 0 up to the configured reload time.
    Reloading { elapsed: f32 },
}

/// What a shot's ray touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitKind {
    /// The designated target body.
    Target,
    /// Any other body.
    Other,
    /// Nothing within range.
    Miss,
}

/// Resolution of a single shot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotReport {
    pub origin: Point3,
    /// Normalized shot direction.
    pub direction: Vec3,
    /// First intersection, or the far end of the ray on a miss.
    pub hit_point: Point3,
    /// Fraction of the maximum range at which the ray hit, if it hit.
    pub fraction: Option<f32>,
    pub body: Option<BodyHandle>,
    pub kind: HitKind,
}

#[derive(Clone, Debug)]
pub struct WeaponState {
    config: WeaponConfig,
    /// Shooter's own body, excluded from shot rays.
    ignore_body: BodyHandle,
    target: Option<BodyHandle>,
    current_ammo: u32,
    reload: ReloadState,
    time_since_last_shot: f32,
    wants_to_fire: bool,
    last_hit_point: Option<Point3>,
}

impl WeaponState {
    /// Full magazine, not reloading, shot timer at zero.
    pub fn new(config: WeaponConfig, ignore_body: BodyHandle) -> Self {
        Self {
            config,
            ignore_body,
            target: None,
            current_ammo: config.max_ammo,
            reload: ReloadState::Ready,
            time_since_last_shot: 0.0,
            wants_to_fire: false,
            last_hit_point: None,
        }
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    pub fn current_ammo(&self) -> u32 {
        self.current_ammo
    }

    pub fn max_ammo(&self) -> u32 {
        self.config.max_ammo
    }

    pub fn reload_state(&self) -> ReloadState {
        self.reload
    }

    pub fn is_reloading(&self) -> bool {
        matches!(self.reload, ReloadState::Reloading { .. })
    }

    /// Seconds spent in the current reload (0 when not reloading).
    pub fn reload_timer(&self) -> f32 {
        match self.reload {
            ReloadState::Ready => 0.0,
            ReloadState::Reloading { elapsed } => elapsed,
        }
    }

    pub fn time_since_last_shot(&self) -> f32 {
        self.time_since_last_shot
    }

    pub fn wants_to_fire(&self) -> bool {
        self.wants_to_fire
    }

    /// World point of the most recent shot (far endpoint on a miss).
    pub fn last_hit_point(&self) -> Option<Point3> {
        self.last_hit_point
    }

    pub fn target(&self) -> Option<BodyHandle> {
        self.target
    }

    /// Body whose hits are reported as [`HitKind::Target`].
    pub fn set_target(&mut self, target: Option<BodyHandle>) {
        self.target = target;
    }

    /// Latch a fire request for the next update. Calling it again before that
    /// update has no further effect.
    pub fn request_fire(&mut self) {
        self.wants_to_fire = true;
    }

    /// Start a manual reload. No-op while reloading or with a full magazine.
    pub fn reload(&mut self) {
        if self.is_reloading() || self.current_ammo >= self.config.max_ammo {
            return;
        }
        log::debug!(
            "reloading ({}/{})",
            self.current_ammo,
            self.config.max_ammo
        );
        self.reload = ReloadState::Reloading { elapsed: 0.0 };
    }

    /// Advance timers by `dt` and fire if a request is pending and allowed.
    ///
    /// Non-positive or non-finite `dt` leaves the weapon untouched.
    pub fn update<W: BodyInterface + ?Sized>(
        &mut self,
        world: &W,
        origin: Point3,
        direction: Vec3,
        dt: f32,
    ) -> Option<ShotReport> {
        if !(dt.is_finite() && dt > 0.0) {
            return None;
        }

        let wants_to_fire = std::mem::take(&mut self.wants_to_fire);

        if let ReloadState::Reloading { elapsed } = self.reload {
            let elapsed = elapsed + dt;
            if elapsed >= self.config.reload_time_s {
                self.current_ammo = self.config.max_ammo;
                self.reload = ReloadState::Ready;
                log::debug!("reload complete ({} rounds)", self.current_ammo);
            } else {
                self.reload = ReloadState::Reloading { elapsed };
            }
            return None;
        }

        let interval = self.config.fire_interval_s;
        self.time_since_last_shot = (self.time_since_last_shot + dt).min(interval);

        if !wants_to_fire || self.time_since_last_shot < interval || self.current_ammo == 0 {
            return None;
        }

        let report = self.fire(world, origin, direction)?;
        self.time_since_last_shot = 0.0;
        self.current_ammo -= 1;

        if self.current_ammo == 0 {
            self.reload();
        }

        Some(report)
    }

    /// Resolve one hit-scan shot from `origin` along `direction`.
    ///
    /// Does not touch ammo or timers. Returns `None` only for a zero-length (or
    /// non-finite) direction, which cannot be aimed.
    pub fn fire<W: BodyInterface + ?Sized>(
        &mut self,
        world: &W,
        origin: Point3,
        direction: Vec3,
    ) -> Option<ShotReport> {
        let Some(direction) = direction.try_normalize(f32::EPSILON) else {
            log::warn!("ignoring shot with degenerate direction {:?}", direction);
            return None;
        };

        let range = self.config.max_range_m;
        let hit = world.cast_ray(origin, direction * range, self.ignore_body);

        // A miss ends the ray at its far endpoint.
        let fraction = hit.map_or(1.0, |h| h.fraction);
        let hit_point = origin + direction * (fraction * range);

        let body = hit.and_then(|h| h.body);
        let kind = match hit {
            None => HitKind::Miss,
            Some(_) if body.is_some() && body == self.target => HitKind::Target,
            Some(_) => HitKind::Other,
        };

        match kind {
            HitKind::Target => log::debug!("hit target {:?} at {:?}", body, hit_point),
            HitKind::Other => log::debug!("hit {:?} at {:?}", body, hit_point),
            HitKind::Miss => log::debug!("shot hit nothing"),
        }

        self.last_hit_point = Some(hit_point);

        Some(ShotReport {
            origin,
            direction,
            hit_point,
            fraction: hit.map(|h| h.fraction),
            body,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        physics::RayHit,
        test_support::{ScriptedWorld, handle},
    };

    const EPS: f32 = 1.0e-6;

    fn weapon() -> (WeaponState, ScriptedWorld) {
        let world = ScriptedWorld::default();
        (WeaponState::new(WeaponConfig::default(), handle(0)), world)
    }

    fn tick(gun: &mut WeaponState, world: &ScriptedWorld, dt: f32) -> Option<ShotReport> {
        gun.update(world, Point3::origin(), -Vec3::z(), dt)
    }

    #[test]
    fn no_shot_before_the_fire_interval_has_elapsed() {
        let (mut gun, world) = weapon();
        for _ in 0..9 {
            gun.request_fire();
            assert!(tick(&mut gun, &world, 0.02).is_none());
        }
        assert_eq!(gun.current_ammo(), 30);
        assert!(!gun.wants_to_fire());
    }

    #[test]
    fn zero_and_negative_dt_are_no_ops() {
        let (mut gun, world) = weapon();
        gun.request_fire();
        assert!(tick(&mut gun, &world, 0.0).is_none());
        assert!(tick(&mut gun, &world, -5.0).is_none());
        assert!(tick(&mut gun, &world, f32::NAN).is_none());
        assert_eq!(gun.time_since_last_shot(), 0.0);
        assert_eq!(gun.current_ammo(), 30);
        // Latch still pending for the next real frame.
        assert!(gun.wants_to_fire());
    }

    #[test]
    fn request_fire_is_idempotent_within_a_frame() {
        let (mut gun, world) = weapon();
        gun.request_fire();
        gun.request_fire();
        gun.request_fire();
        assert!(tick(&mut gun, &world, 0.2).is_some());
        assert_eq!(gun.current_ammo(), 29);

        // The latch is gone: the next ready frame does not fire on its own.
        assert!(tick(&mut gun, &world, 0.2).is_none());
        assert_eq!(gun.current_ammo(), 29);
    }

    #[test]
    fn request_during_cooldown_is_dropped_not_queued() {
        let (mut gun, world) = weapon();
        gun.request_fire();
        assert!(tick(&mut gun, &world, 0.2).is_some());

        gun.request_fire();
        assert!(tick(&mut gun, &world, 0.1).is_none());
        assert!(!gun.wants_to_fire());

        // Cooldown has elapsed now, but nothing was queued.
        assert!(tick(&mut gun, &world, 0.1).is_none());
        assert_eq!(gun.current_ammo(), 29);
    }

    #[test]
    fn shot_timer_saturates_at_the_interval() {
        let (mut gun, world) = weapon();
        tick(&mut gun, &world, 10.0);
        assert!((gun.time_since_last_shot() - 0.2).abs() < EPS);
    }

    #[test]
    fn full_magazine_then_reload_scenario() {
        let (mut gun, world) = weapon();

        for shot in 0..30 {
            gun.request_fire();
            assert!(tick(&mut gun, &world, 0.2).is_some(), "shot {shot} should fire");
        }
        assert_eq!(gun.current_ammo(), 0);
        assert!(gun.is_reloading());
        assert_eq!(gun.reload_timer(), 0.0);

        // 0.25 * 12 = 3.0 exactly in binary floating point.
        for _ in 0..11 {
            gun.request_fire();
            assert!(tick(&mut gun, &world, 0.25).is_none());
            assert!(gun.is_reloading());
            assert_eq!(gun.current_ammo(), 0);
        }
        assert!((gun.reload_timer() - 2.75).abs() < EPS);

        assert!(tick(&mut gun, &world, 0.25).is_none());
        assert!(!gun.is_reloading());
        assert_eq!(gun.current_ammo(), 30);
        assert_eq!(gun.reload_timer(), 0.0);
    }

    #[test]
    fn request_made_during_reload_never_fires() {
        let (mut gun, world) = weapon();
        gun.current_ammo = 1;
        gun.request_fire();
        assert!(tick(&mut gun, &world, 0.2).is_some());
        assert!(gun.is_reloading());

        // Latch set before the frame that completes the reload.
        gun.request_fire();
        assert!(tick(&mut gun, &world, 3.0).is_none());
        assert!(!gun.is_reloading());
        assert!(!gun.wants_to_fire());

        // Next frame: shot timer is ready, but the request was dropped.
        assert!(tick(&mut gun, &world, 0.2).is_none());
        assert_eq!(gun.current_ammo(), 30);
    }

    #[test]
    fn manual_reload_rules() {
        let (mut gun, world) = weapon();
        gun.reload();
        assert!(!gun.is_reloading(), "full magazine does not reload");

        gun.request_fire();
        tick(&mut gun, &world, 0.2);
        gun.reload();
        assert!(gun.is_reloading());

        tick(&mut gun, &world, 1.0);
        gun.reload();
        assert!((gun.reload_timer() - 1.0).abs() < EPS, "reload does not restart");
    }

    #[test]
    fn ammo_stays_in_range_under_random_cadence() {
        let (mut gun, world) = weapon();
        let mut seed: u32 = 0x9E37_79B9;
        for _ in 0..5_000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed & 1 == 0 {
                gun.request_fire();
            }
            if seed % 97 == 0 {
                gun.reload();
            }
            let dt = (seed % 300) as f32 / 1000.0;
            tick(&mut gun, &world, dt);
            assert!(gun.current_ammo() <= gun.max_ammo());
            if gun.current_ammo() == 0 {
                assert!(gun.is_reloading());
            }
        }
    }

    #[test]
    fn miss_ends_at_the_far_endpoint() {
        let (mut gun, world) = weapon();
        let origin = Point3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 3.0, 4.0);

        let report = gun.fire(&world, origin, direction).expect("aimed shot");
        let expected = origin + direction.normalize() * gun.config().max_range_m;

        assert_eq!(report.kind, HitKind::Miss);
        assert_eq!(report.fraction, None);
        assert_eq!(report.hit_point, expected);
        assert_eq!(gun.last_hit_point(), Some(expected));
    }

    #[test]
    fn hits_are_classified_against_the_target() {
        let (mut gun, mut world) = weapon();
        gun.set_target(Some(handle(7)));

        world.ray_hit = Some(RayHit {
            body: Some(handle(7)),
            fraction: 0.25,
        });
        let report = gun
            .fire(&world, Point3::origin(), Vec3::new(0.0, 0.0, -2.0))
            .expect("aimed shot");
        assert_eq!(report.kind, HitKind::Target);
        assert_eq!(report.fraction, Some(0.25));
        let expected = Point3::new(0.0, 0.0, -0.25 * gun.config().max_range_m);
        assert!((report.hit_point - expected).norm() < 1.0e-2);

        world.ray_hit = Some(RayHit {
            body: Some(handle(8)),
            fraction: 0.5,
        });
        let report = gun.fire(&world, Point3::origin(), -Vec3::z()).expect("aimed shot");
        assert_eq!(report.kind, HitKind::Other);

        // The shooter's own body is what the ray is told to skip.
        assert_eq!(world.last_ray_ignore.get(), Some(handle(0)));
        let (_, translation) = world.last_ray.get().expect("ray cast");
        assert!((translation.norm() - gun.config().max_range_m).abs() < 1.0);
    }

    #[test]
    fn degenerate_direction_consumes_nothing() {
        let (mut gun, world) = weapon();
        gun.request_fire();
        assert!(gun.update(&world, Point3::origin(), Vec3::zeros(), 0.2).is_none());
        assert_eq!(gun.current_ammo(), 30);
        assert_eq!(gun.last_hit_point(), None);
    }
}
