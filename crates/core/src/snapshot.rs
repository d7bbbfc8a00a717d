//! Read-only status surface for presentation layers.

use serde::Serialize;

use crate::types::{Axis, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub phase: Phase,
    /// Placed layers above the base.
    pub score: u32,
    /// Every layer in the stack, base and moving layer included.
    pub layers: u32,
    /// Fragments currently simulated.
    pub fragments: u32,
    pub camera_y: f32,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::NotStarted,
            score: 0,
            layers: 0,
            fragments: 0,
            camera_y: 0.0,
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameOverReason {
    /// The drop did not overlap the layer below.
    Miss,
    /// The moving layer slid past any possible overlap.
    Drift,
}

/// Status transitions, consumed by the host once each.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    Started,
    Placed {
        score: u32,
        axis: Axis,
        overlap: f32,
        overhang: f32,
    },
    GameOver {
        score: u32,
        reason: GameOverReason,
    },
}
