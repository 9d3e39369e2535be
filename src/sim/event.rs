//! Outcome events and the sink the simulation emits them to

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// A ball dropped into the hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    /// Total score after this ball
    pub score: u32,
}

impl ScoreEvent {
    /// Wire text published for this event
    pub fn payload(&self) -> String {
        format!("Scored, {}", self.score)
    }
}

/// Receiver of score events.
///
/// Emission is best-effort: the simulation logs a failed publish and keeps
/// the score it already committed.
pub trait ScoreSink {
    fn publish_score(&mut self, event: &ScoreEvent) -> Result<(), GatewayError>;
}

/// Collects events in memory
impl ScoreSink for Vec<ScoreEvent> {
    fn publish_score(&mut self, event: &ScoreEvent) -> Result<(), GatewayError> {
        self.push(*event);
        Ok(())
    }
}

impl<S: ScoreSink + ?Sized> ScoreSink for &mut S {
    fn publish_score(&mut self, event: &ScoreEvent) -> Result<(), GatewayError> {
        (**self).publish_score(event)
    }
}
