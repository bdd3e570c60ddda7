//! Run lifecycle vocabulary.

use serde::{Deserialize, Serialize};

/// Caller's answer to a per-parcel failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorDecision {
    /// Skip this parcel and keep going
    Continue,
    /// Skip this and every later failing parcel without asking again
    ContinueAll,
    /// End the run without saving
    Stop,
}

/// Orchestrator state machine.
///
/// `Idle → Running → {Completed, Cancelled, Failed}`; the three terminal
/// states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunState::Completed | RunState::Cancelled | RunState::Failed
        )
    }

    /// Whether the state machine allows moving to `next`.
    pub fn can_transition_to(&self, next: RunState) -> bool {
        matches!(
            (self, next),
            (RunState::Idle, RunState::Running)
                | (RunState::Running, RunState::Completed)
                | (RunState::Running, RunState::Cancelled)
                | (RunState::Running, RunState::Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Completed => "completed",
            RunState::Cancelled => "cancelled",
            RunState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
