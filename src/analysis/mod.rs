//! Seam to the external pose-analysis service.

pub mod payload;

use std::{fmt, future::Future, str::FromStr};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::{errors::AnalysisError, models::AnalysisResult};

pub use payload::{encode_jpeg, FramePayload};

/// How harshly the analyzer should grade. Only the analyzer interprets it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Low,
    #[default]
    Medium,
    High,
}

impl Strictness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strictness::Low => "low",
            Strictness::Medium => "medium",
            Strictness::High => "high",
        }
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strictness {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Strictness::Low),
            "medium" => Ok(Strictness::Medium),
            "high" => Ok(Strictness::High),
            other => Err(anyhow!("unknown strictness '{other}' (expected low, medium or high)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image: FramePayload,
    pub activity_name: String,
    pub instructions: Vec<String>,
    pub strictness: Strictness,
}

/// The remote model that grades a snapshot. Implementations own transport,
/// prompting and response parsing.
pub trait PoseAnalyzer: Send + Sync + 'static {
    fn analyze(
        &self,
        request: AnalysisRequest,
    ) -> impl Future<Output = Result<AnalysisResult, AnalysisError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictness_parses_known_levels() {
        assert_eq!("HIGH".parse::<Strictness>().unwrap(), Strictness::High);
        assert_eq!(" low ".parse::<Strictness>().unwrap(), Strictness::Low);
        assert!("extreme".parse::<Strictness>().is_err());
        assert_eq!(Strictness::default().to_string(), "medium");
    }
}
