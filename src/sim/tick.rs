//! Per-frame simulation step
//!
//! Called once per rendered frame with the latest tilt sample and the frame
//! clock. There is no internal timer: elapsed time comes from consecutive
//! timestamps.

use super::collision::{CollisionReport, resolve_collisions};
use super::event::{ScoreEvent, ScoreSink};
use super::state::SimState;

/// What happened during one `update`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Elapsed seconds applied to the balls (`None` on the first frame)
    pub dt: Option<f32>,
    /// Ball scored this frame, if any
    pub scored: Option<ScoreEvent>,
    pub collisions: CollisionReport,
}

/// Advance the session by one frame.
///
/// 1. Integrate every ball under tilt `(ax, ay)` (skipped on the first call,
///    which only records the clock baseline). Right after each ball moves its
///    screen position is tested against the hole; the first ball inside is removed, scored and
///    published, and the scan stops. At most one ball scores per frame.
/// 2. Resolve ball overlaps and clamp to the surface.
/// 3. Remember `timestamp_ms` for the next frame.
///
/// A timestamp earlier than the previous one counts as zero elapsed time.
pub fn update<S: ScoreSink + ?Sized>(
    state: &mut SimState,
    ax: f32,
    ay: f32,
    timestamp_ms: u64,
    sink: &mut S,
) -> FrameReport {
    let mut report = FrameReport::default();

    if let Some(last) = state.last_timestamp {
        let dt = timestamp_ms.saturating_sub(last) as f32 / 1000.0;
        report.dt = Some(dt);
        report.scored = integrate_and_score(state, ax, ay, dt, sink);
    }

    report.collisions = resolve_collisions(
        &mut state.particles,
        state.ball_diameter,
        state.bounds,
        &mut state.rng,
    );
    if report.collisions.contacts > 0 {
        log::debug!(
            "Resolved {} contacts in {} passes (settled: {})",
            report.collisions.contacts,
            report.collisions.iterations,
            report.collisions.settled
        );
    }

    state.last_timestamp = Some(timestamp_ms);
    report
}

fn integrate_and_score<S: ScoreSink + ?Sized>(
    state: &mut SimState,
    ax: f32,
    ay: f32,
    dt: f32,
    sink: &mut S,
) -> Option<ScoreEvent> {
    for i in 0..state.particles.len() {
        state.particles[i].integrate(ax, ay, dt);

        let screen = state.viewport.to_screen(state.particles[i].pos);
        if state.target.contains(screen) {
            state.particles.remove(i);
            state.score += 1;

            let event = ScoreEvent { score: state.score };
            log::info!("Ball scored ({} left)", state.particles.len());
            if let Err(e) = sink.publish_score(&event) {
                log::warn!("Score event not delivered: {}", e);
            }
            return Some(event);
        }
    }
    None
}
