//! The fixed-timestep loop: update, render, then sleep out the rest of the
//! period. Overruns accumulate as "excess" and are paid back with bounded
//! update-only catch-up steps, so the simulation rate holds even when
//! rendering falls behind.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{error, info, warn};
use rand::Rng;

use crate::audio::AudioSink;
use crate::clock::Clock;
use crate::input::InputSource;
use crate::scene::Renderer;
use crate::scoreboard::{NamePrompt, ScoreError, Scoreboard};
use crate::session::{Session, State};
use crate::stats::{LoopStats, LoopSummary};

/// Most update-only catch-up steps run in one loop iteration.
pub const MAX_FRAME_SKIPS: u32 = 5;
/// After this many frames with no sleep, yield the processor once.
pub const NO_DELAYS_PER_YIELD: u32 = 16;

/// The player-facing console: input snapshots plus the modal name prompt.
/// One object serves both because they share the keyboard.
pub trait Console: InputSource + NamePrompt {}

impl<T: InputSource + NamePrompt> Console for T {}

/// The collaborators the loop drives. Narrow trait objects so tests can
/// substitute recording fakes for the terminal, audio and keyboard.
pub struct Ports<'a> {
    pub console: &'a mut dyn Console,
    pub renderer: &'a mut dyn Renderer,
    pub audio: &'a mut dyn AudioSink,
}

/// Run the loop until `running` is cleared — by the quit key or by whoever
/// else holds the flag. Returns the final statistics for the exit summary.
#[allow(clippy::too_many_arguments)]
pub fn run(
    session: &mut Session,
    scores: &mut Scoreboard,
    ports: &mut Ports<'_>,
    clock: &dyn Clock,
    rng: &mut impl Rng,
    period: u64,
    running: &AtomicBool,
) -> LoopSummary {
    let mut stats = LoopStats::new(period, clock.now());
    let mut before = clock.now();
    let mut oversleep: i64 = 0;
    let mut excess: i64 = 0;
    let mut no_delays: u32 = 0;
    let mut render_failed = false;
    let mut prev_state = session.state;
    let mut notice: Option<String> = None;

    info!("game loop started, period {period} ns");

    while running.load(Ordering::Relaxed) {
        step(session, scores, ports, clock, rng, running, &mut prev_state, &mut notice);

        let mut scene = session.scene();
        scene.hud.fps = stats.average_fps();
        scene.hud.ups = stats.average_ups();
        scene.notice = notice.clone();
        if session.state == State::GameOver {
            scene.hiscores = scores.entries().to_vec();
        }
        match ports.renderer.render(&scene) {
            Ok(()) => render_failed = false,
            Err(err) => {
                // Skip the frame and retry next time; log only on the first
                // failure of a streak.
                if !render_failed {
                    warn!("render failed, skipping frame: {err}");
                    render_failed = true;
                }
            }
        }

        let after = clock.now();
        let elapsed = after.saturating_sub(before) as i64;
        let sleep_time = period as i64 - elapsed - oversleep;

        if sleep_time > 0 {
            clock.sleep(sleep_time as u64);
            oversleep = clock.now().saturating_sub(after) as i64 - sleep_time;
        } else {
            // The frame overran; remember by how much so catch-up updates
            // can pay it back.
            excess -= sleep_time;
            oversleep = 0;
            no_delays += 1;
            if no_delays >= NO_DELAYS_PER_YIELD {
                clock.yield_now();
                no_delays = 0;
            }
        }

        before = clock.now();

        // Update without rendering until the excess is consumed, bounded so
        // a long stall cannot freeze the loop in catch-up.
        let mut skips: u32 = 0;
        while excess > period as i64 && skips < MAX_FRAME_SKIPS {
            excess -= period as i64;
            step(session, scores, ports, clock, rng, running, &mut prev_state, &mut notice);
            skips += 1;
        }
        stats.add_skips(skips as u64);

        stats.record_frame(clock.now());
    }

    let summary = stats.summary(clock.now());
    info!("game loop stopped: {summary:?}");
    summary
}

/// One simulation step: sample input, advance the session, forward cues,
/// and persist the score when the session has just ended.
#[allow(clippy::too_many_arguments)]
fn step(
    session: &mut Session,
    scores: &mut Scoreboard,
    ports: &mut Ports<'_>,
    clock: &dyn Clock,
    rng: &mut impl Rng,
    running: &AtomicBool,
    prev_state: &mut State,
    notice: &mut Option<String>,
) {
    let input = ports.console.poll();
    if input.quit_requested {
        running.store(false, Ordering::Relaxed);
    }

    let now_ms = clock.now() / 1_000_000;
    session.apply_input(&input, now_ms, rng);
    for cue in session.tick(&input, now_ms, rng) {
        ports.audio.play(cue);
    }

    if session.state == State::GameOver && *prev_state != State::GameOver {
        *notice = record_high_score(session, scores, ports.console);
    }
    *prev_state = session.state;
}

/// On entering game over: if the score makes the table, prompt for a name
/// (re-prompting while the name is too long) and save. A failed save is
/// logged and returned as a notice for the status line; gameplay continues
/// either way.
fn record_high_score(
    session: &Session,
    scores: &mut Scoreboard,
    console: &mut dyn Console,
) -> Option<String> {
    if !scores.eligible(session.score) {
        return None;
    }
    while let Some(name) = console.read_name() {
        match scores.add(&name, session.score) {
            Err(ScoreError::NameTooLong) => continue,
            Err(err) => {
                error!("could not record high score: {err}");
                return Some("could not record high score".to_string());
            }
            Ok(()) => {
                if let Err(err) = scores.save() {
                    error!("could not save high scores to {:?}: {err}", scores.path());
                    return Some("could not save high scores".to_string());
                }
                return None;
            }
        }
    }
    None
}
