//! Headless frame loop driving one first-person controller through a scripted session.
//!
//! Usage: `fps_client [config.json]`. Set `RUST_LOG=debug` to see every shot, jump,
//! landing and reload.

mod clock;
mod config;
mod frame_stats;
mod scene;
mod script;

use std::{path::PathBuf, process::ExitCode, thread, time::Instant};

use fps_controller::{MotionController, PhysicsWorld};

use crate::{
    config::ClientError,
    frame_stats::{FrameReport, FrameStats},
    script::{CursorEvent, ScriptPlayer, TIMELINE},
};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ClientError> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = config::load(config_path.as_deref())?;

    let mut world = scene::build();
    let mut player = MotionController::spawn(&mut world, scene::spawn_point(), config);
    player
        .weapon_mut()
        .set_target(world.static_body(scene::TARGET_ID));
    match player.weapon().target() {
        Some(target) => log::info!("target wall is {target:?}"),
        None => log::warn!("scene has no target wall; every hit counts as a plain hit"),
    }

    let mut script = ScriptPlayer::new(TIMELINE);
    let mut stats = FrameStats::default();

    let budget = clock::frame_budget();
    let mut last = Instant::now();
    thread::sleep(budget);

    while !script.is_finished() {
        let frame_start = Instant::now();
        let dt = clock::clamp_frame_dt(frame_start.duration_since(last).as_secs_f32());
        last = frame_start;

        let Some(frame) = script.advance(dt) else {
            break;
        };
        if frame.entered {
            log::info!("-- {}", frame.label);
        }

        match frame.cursor_event {
            Some(CursorEvent::Release) => player.release_cursor(),
            Some(CursorEvent::Capture) => player.capture_cursor(),
            None => {}
        }
        player.process_mouse(frame.cursor.0, frame.cursor.1);

        if let Some(shot) = player.update(&mut world, &frame.held, dt) {
            stats.record_shot(&shot);
        }
        world.step(dt);

        if let Some(report) = stats.record_frame(dt) {
            log_frame(&player, &world, report);
        }

        let spent = frame_start.elapsed();
        if spent < budget {
            thread::sleep(budget - spent);
        }
    }

    log::info!(
        "session over: {} shots, {} on target",
        stats.total_shots(),
        stats.total_target_hits()
    );
    player.despawn(&mut world);
    Ok(())
}

fn log_frame(player: &MotionController, world: &PhysicsWorld, report: FrameReport) {
    let position = player.position();
    let weapon = player.weapon();
    let ground_hit = player
        .ground_probe(world)
        .fraction
        .map_or_else(|| "none".to_owned(), |f| format!("{f:.3}"));
    log::info!(
        "{:5.1} fps | pos ({:6.2}, {:5.2}, {:6.2}) | yaw {:6.1} pitch {:5.1} | fov {:4.1} | \
         ammo {:2}/{}{} | last shot {:4.2}s ago | shots {} | {:?} (ground hit {})",
        report.fps,
        position.x,
        position.y,
        position.z,
        player.camera().yaw(),
        player.camera().pitch(),
        player.fov(),
        weapon.current_ammo(),
        weapon.max_ammo(),
        if weapon.is_reloading() { " (reloading)" } else { "" },
        weapon.time_since_last_shot(),
        report.shots,
        player.ground_state(),
        ground_hit,
    );
}
