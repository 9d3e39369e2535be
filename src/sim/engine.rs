//! Simulation engine: session state wired to its score sink

use super::event::ScoreSink;
use super::state::{SimConfig, SimState};
use super::target::TargetRegion;
use super::tick::{FrameReport, update};
use crate::messaging::SampleCell;

/// A herding session that publishes its scores to `S`
#[derive(Debug)]
pub struct Simulation<S: ScoreSink> {
    state: SimState,
    sink: S,
}

impl<S: ScoreSink> Simulation<S> {
    pub fn new(config: &SimConfig, sink: S) -> Self {
        Self::from_state(SimState::new(config), sink)
    }

    pub fn from_state(state: SimState, sink: S) -> Self {
        Self { state, sink }
    }

    /// Advance one frame under tilt `(ax, ay)` at `timestamp_ms`
    pub fn update(&mut self, ax: f32, ay: f32, timestamp_ms: u64) -> FrameReport {
        update(&mut self.state, ax, ay, timestamp_ms, &mut self.sink)
    }

    /// Advance one frame using the latest sample delivered into `cell`
    pub fn update_from(&mut self, cell: &SampleCell, timestamp_ms: u64) -> FrameReport {
        let sample = cell.load();
        self.update(sample.x, sample.y, timestamp_ms)
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn active_count(&self) -> usize {
        self.state.active_count()
    }

    pub fn target(&self) -> &TargetRegion {
        &self.state.target
    }

    /// Hole position/size, for drag and grow actions
    pub fn target_mut(&mut self) -> &mut TargetRegion {
        &mut self.state.target
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// End the session, handing back the sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::AccelSample;
    use crate::sim::{Particle, ScoreEvent};
    use glam::Vec2;

    #[test]
    fn test_update_from_cell_reads_pair() {
        let config = SimConfig {
            target_radius: 1.0,
            surface_width: 100.0,
            surface_height: 100.0,
            pixels_per_unit: 1.0,
            ..Default::default()
        };
        let state = SimState::with_particles(&config, vec![Particle::at(Vec2::new(10.0, 10.0))]);
        let mut sim = Simulation::from_state(state, Vec::<ScoreEvent>::new());
        let cell = SampleCell::default();

        cell.store(AccelSample::new(5.0, -5.0));
        sim.update_from(&cell, 0);
        sim.update_from(&cell, 1_000);

        let p = sim.state().particles()[0];
        assert!((p.vel.x - (-1.0)).abs() < 1e-6);
        assert!((p.vel.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_grow_target_then_score() {
        let config = SimConfig {
            target_radius: 0.5,
            surface_width: 100.0,
            surface_height: 100.0,
            pixels_per_unit: 1.0,
            ..Default::default()
        };
        let state = SimState::with_particles(&config, vec![Particle::at(Vec2::new(0.0, 0.55))]);
        let mut sim = Simulation::from_state(state, Vec::<ScoreEvent>::new());

        sim.update(0.0, 0.0, 0);
        sim.update(0.0, 0.0, 16);
        assert_eq!(sim.score(), 0);

        sim.target_mut().grow();
        assert_eq!(sim.target().radius, 10.5);
        sim.update(0.0, 0.0, 32);
        assert_eq!(sim.score(), 1);
        assert_eq!(sim.into_sink(), vec![ScoreEvent { score: 1 }]);
    }
}
