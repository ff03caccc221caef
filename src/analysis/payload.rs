use image::{codecs::jpeg::JpegEncoder, DynamicImage, RgbaImage};

use crate::errors::AnalysisError;

pub const JPEG_MIME: &str = "image/jpeg";

/// Compressed snapshot handed to the analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePayload {
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl FramePayload {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// JPEG-encodes a frame. Zero-sized frames fail before reaching the encoder.
pub fn encode_jpeg(frame: &RgbaImage, quality: u8) -> Result<FramePayload, AnalysisError> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(AnalysisError::EmptyPayload);
    }

    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgba8(frame.clone()).into_rgb8();
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)?;

    if bytes.is_empty() {
        return Err(AnalysisError::EmptyPayload);
    }
    Ok(FramePayload {
        mime_type: JPEG_MIME,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_jpeg_with_soi_marker() {
        let frame = RgbaImage::from_pixel(8, 6, image::Rgba([200, 10, 10, 255]));
        let payload = encode_jpeg(&frame, 80).unwrap();
        assert_eq!(payload.mime_type, JPEG_MIME);
        assert_eq!(&payload.bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn empty_frame_fails_fast() {
        let frame = RgbaImage::new(0, 0);
        assert!(matches!(encode_jpeg(&frame, 80), Err(AnalysisError::EmptyPayload)));
    }
}
