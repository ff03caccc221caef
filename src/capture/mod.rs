pub mod still;

use std::future::Future;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DeviceError;

pub use still::StillFrameDevice;

pub type StreamId = Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum FacingMode {
    #[default]
    User,
    Environment,
}

/// What the controller asks the device for. The device grants whatever it can.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureConstraints {
    pub facing_mode: FacingMode,
    pub ideal_width: u32,
    pub ideal_height: u32,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            facing_mode: FacingMode::User,
            ideal_width: 640,
            ideal_height: 480,
        }
    }
}

/// Native resolution reported once the stream has metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
}

/// A camera that can hand out exclusive streams.
pub trait CaptureDevice: Send + Sync + 'static {
    type Stream: FrameSource;

    fn open(
        &self,
        constraints: &CaptureConstraints,
    ) -> impl Future<Output = Result<Self::Stream, DeviceError>> + Send;
}

/// A live stream. Holding one means holding the device; `stop` releases it.
pub trait FrameSource: Send + 'static {
    fn id(&self) -> StreamId;

    /// Resolves once the native resolution is known.
    fn metadata(&mut self) -> impl Future<Output = Result<VideoMetadata, DeviceError>> + Send;

    fn play(&mut self) -> Result<(), DeviceError>;

    fn pause(&mut self);

    /// Current frame, unmirrored. `None` once stopped or before any frame arrived.
    fn grab_frame(&mut self) -> Option<RgbaImage>;

    /// Stops every underlying track. Idempotent.
    fn stop(&mut self);
}
