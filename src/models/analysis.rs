use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

pub const MAX_SCORE: u8 = 100;

/// A named body landmark, positioned relative to the frame (0..1 on both axes).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Joint {
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl Joint {
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            score: None,
        }
    }
}

/// One cycle's verdict from the analyzer. Replaced wholesale every cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_correct: bool,
    pub feedback: String,
    pub score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keypoints: Option<Vec<Joint>>,
}

impl AnalysisResult {
    /// Reject results the presentation layer cannot display as-is.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(0..=i64::from(MAX_SCORE)).contains(&self.score) {
            return Err(AnalysisError::Schema(format!(
                "score {} outside 0..={MAX_SCORE}",
                self.score
            )));
        }
        if self.feedback.trim().is_empty() {
            return Err(AnalysisError::Schema("feedback text is empty".into()));
        }
        Ok(())
    }
}
