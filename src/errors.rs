use thiserror::Error;

/// Failures while acquiring or driving the capture device.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no camera available")]
    NotFound,
    #[error("camera is in use by another application")]
    Busy,
    #[error("camera failure: {0}")]
    Other(String),
}

/// Failures inside one analysis cycle. None of these end the session.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("captured frame is empty")]
    EmptyPayload,
    #[error("frame encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("analyzer returned an empty response")]
    EmptyResponse,
    #[error("analyzer response is malformed: {0}")]
    Malformed(String),
    #[error("analyzer response violates schema: {0}")]
    Schema(String),
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Malformed(err.to_string())
    }
}

/// A controller was built without one of its collaborators.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("session controller requires a {0}")]
    MissingCollaborator(&'static str),
}
