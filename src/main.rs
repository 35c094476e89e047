//! Headless runner
//!
//! `polygon-survivors [settings.json]` plays one scripted run at 60 fps of
//! simulated wall clock and logs the outcome. Set `RUST_LOG=debug` to see
//! per-frame step counts.

use glam::Vec2;

use polygon_survivors::Settings;
use polygon_survivors::game::{GamePhase, Session};
use polygon_survivors::platform::{
    Action, FrameClock, HeadlessImages, InputSnapshot, InstantClock, NullAudio, NullTarget,
    RecordingTarget, ScriptedInput,
};
use polygon_survivors::sim::{FixedStepDriver, Simulation};

/// Seconds per scripted movement leg
const LEG: f32 = 1.5;

/// Press confirm, then strafe in a square while firing at the corners
fn script(settings: &Settings, duration: f32) -> ScriptedInput {
    let arena = Vec2::new(settings.arena.width, settings.arena.height);
    let legs = [
        (Action::MoveLeft, Vec2::new(0.0, 0.0)),
        (Action::MoveDown, Vec2::new(0.0, arena.y)),
        (Action::MoveRight, arena),
        (Action::MoveUp, Vec2::new(arena.x, 0.0)),
    ];

    let mut script = ScriptedInput::new().then_at(0.0, InputSnapshot::new().with(Action::Confirm));
    let mut t = 0.1;
    let mut leg = 0;
    while t < duration {
        let (direction, aim) = legs[leg % legs.len()];
        let snapshot = InputSnapshot::new()
            .with(direction)
            .with(Action::Fire)
            .aiming_at(aim);
        script = script.then_at(t, snapshot);
        t += LEG;
        leg += 1;
    }
    script
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Polygon Survivors (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let max_time = settings.gameplay.time_limit + 5.0;
    let script = script(&settings, max_time);
    let mut session = Session::new(settings.clone(), &mut HeadlessImages::new(), NullAudio::new());
    let mut driver = FixedStepDriver::new(settings.timestep);
    let mut clock = InstantClock::new(1.0 / 60.0);

    let mut elapsed = 0.0;
    let mut frames = 0u64;
    let mut steps = 0u64;
    while elapsed < max_time {
        let frame_time = clock.frame_time();
        session.set_input(script.at(elapsed));
        let report = driver.frame(&mut session, frame_time, &mut NullTarget);
        log::debug!("frame {}: {} steps", frames, report.steps);
        // Headless audio: every one-shot finishes within a frame
        session.audio_mut().backend_mut().finish_one_shots();

        elapsed += frame_time;
        frames += 1;
        steps += u64::from(report.steps);
        if session.phase() == GamePhase::Result {
            break;
        }
    }

    let mut hud = RecordingTarget::default();
    session.render(&mut hud);
    for line in &hud.texts {
        log::info!("HUD: {}", line);
    }
    match session.outcome() {
        Some(outcome) => log::info!(
            "{} after {} frames / {} steps, {} waves, score {}",
            outcome.banner(),
            frames,
            steps,
            session.waves(),
            session.score()
        ),
        None => log::info!("Run did not finish within {:.0}s", max_time),
    }
}
