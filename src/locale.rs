use serde::{Deserialize, Serialize};

use crate::errors::DeviceError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "th")]
    Thai,
    #[serde(rename = "en")]
    English,
}

/// User-facing strings published through the feedback sink.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub opening_camera: &'static str,
    pub camera_failed: &'static str,
    pub permission_hint: &'static str,
    pub no_camera_hint: &'static str,
    pub camera_busy_hint: &'static str,
    pub analyzing: &'static str,
    pub analysis_failed: &'static str,
}

const THAI: Messages = Messages {
    opening_camera: "กำลังเปิดกล้อง...",
    camera_failed: "ไม่สามารถเปิดกล้องได้",
    permission_hint: "กรุณาตรวจสอบว่าคุณได้อนุญาตให้ใช้งานกล้องในเบราว์เซอร์แล้ว",
    no_camera_hint: "ไม่พบกล้องบนอุปกรณ์นี้",
    camera_busy_hint: "กล้องกำลังถูกใช้งานโดยแอปอื่น",
    analyzing: "กำลังวิเคราะห์ท่าทาง...",
    analysis_failed: "ไม่สามารถวิเคราะห์ได้ ลองใหม่อีกครั้ง",
};

const ENGLISH: Messages = Messages {
    opening_camera: "Opening camera...",
    camera_failed: "Unable to open the camera",
    permission_hint: "Please check that camera access is allowed",
    no_camera_hint: "No camera was found on this device",
    camera_busy_hint: "The camera is being used by another application",
    analyzing: "Analyzing your pose...",
    analysis_failed: "Could not analyze the pose, trying again",
};

impl Locale {
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::Thai => &THAI,
            Locale::English => &ENGLISH,
        }
    }
}

impl Messages {
    /// Detail line shown under the "camera failed" status.
    pub fn device_error_hint(&self, err: &DeviceError) -> &'static str {
        match err {
            DeviceError::NotFound => self.no_camera_hint,
            DeviceError::Busy => self.camera_busy_hint,
            DeviceError::PermissionDenied | DeviceError::Other(_) => self.permission_hint,
        }
    }
}
