use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Render target for the pose overlay. Coordinates are in pixels.
pub trait DrawingSurface {
    fn dimensions(&self) -> (u32, u32);

    /// Wipes everything previously drawn on the overlay.
    fn clear_overlay(&mut self);

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgba<u8>, width: f32);

    fn fill_marker(&mut self, center: (f32, f32), radius: f32, color: Rgba<u8>);
}

/// Two RGBA layers sized to the camera's native resolution: the last captured
/// (mirrored) frame underneath, the skeleton overlay on top.
pub struct Canvas {
    video: RgbaImage,
    overlay: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            video: RgbaImage::new(width, height),
            overlay: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.video.width()
    }

    pub fn height(&self) -> u32 {
        self.video.height()
    }

    /// Resizing discards both layers, like resizing an HTML canvas does.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.dimensions() == (width, height) {
            return;
        }
        *self = Self::new(width, height);
    }

    /// Mirrors `frame` horizontally into the video layer, resizing the canvas
    /// to the frame first.
    pub fn present_mirrored(&mut self, frame: &RgbaImage) {
        self.resize(frame.width(), frame.height());
        self.video = imageops::flip_horizontal(frame);
    }

    pub fn video(&self) -> &RgbaImage {
        &self.video
    }

    pub fn overlay(&self) -> &RgbaImage {
        &self.overlay
    }

    pub fn clear(&mut self) {
        self.video.pixels_mut().for_each(|p| *p = TRANSPARENT);
        self.clear_overlay();
    }

    /// Overlay drawn over the video layer, for presenters that want one image.
    pub fn composite(&self) -> RgbaImage {
        let mut out = self.video.clone();
        imageops::overlay(&mut out, &self.overlay, 0, 0);
        out
    }
}

impl DrawingSurface for Canvas {
    fn dimensions(&self) -> (u32, u32) {
        self.video.dimensions()
    }

    fn clear_overlay(&mut self) {
        self.overlay.pixels_mut().for_each(|p| *p = TRANSPARENT);
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgba<u8>, width: f32) {
        // imageproc lines are one pixel wide; thicken by offsetting on both axes.
        let width = width.round().max(1.0) as i32;
        let half = width / 2;
        for offset in -half..(width - half) {
            let o = offset as f32;
            draw_line_segment_mut(&mut self.overlay, (from.0 + o, from.1), (to.0 + o, to.1), color);
            draw_line_segment_mut(&mut self.overlay, (from.0, from.1 + o), (to.0, to.1 + o), color);
        }
    }

    fn fill_marker(&mut self, center: (f32, f32), radius: f32, color: Rgba<u8>) {
        draw_filled_circle_mut(
            &mut self.overlay,
            (center.0.round() as i32, center.1.round() as i32),
            radius.round() as i32,
            color,
        );
    }
}
