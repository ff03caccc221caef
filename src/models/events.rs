use serde::Serialize;

use crate::workout::{StreakUpdate, WorkoutSnapshot};

use super::AnalysisResult;

/// Text/score/correctness pushed to the presentation layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub is_correct: bool,
    pub feedback: String,
    pub score: i64,
}

impl Feedback {
    /// Transient or failure states: never correct, no score.
    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            is_correct: false,
            feedback: text.into(),
            score: 0,
        }
    }
}

impl From<&AnalysisResult> for Feedback {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            is_correct: result.is_correct,
            feedback: result.feedback.clone(),
            score: result.score,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DeviceState {
    Opening,
    Live,
    Failed,
    Released,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub state: DeviceState,
    pub status: Option<String>,
    pub error: Option<String>,
}

impl DeviceStatus {
    pub fn new(state: DeviceState) -> Self {
        Self {
            state,
            status: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum CoachEvent {
    DeviceStatus(DeviceStatus),
    Feedback(Feedback),
    FeedbackCleared,
    WorkoutState(WorkoutSnapshot),
    StreakUpdated(StreakUpdate),
}
