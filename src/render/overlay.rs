use std::collections::HashMap;

use image::Rgba;

use crate::models::Joint;

use super::{
    canvas::DrawingSurface,
    skeleton::{is_known_joint, POSE_CONNECTIONS},
};

const ENABLE_LOGS: bool = true;

use crate::log_debug;

pub const AQUA: Rgba<u8> = Rgba([0, 255, 255, 255]);
pub const YELLOW: Rgba<u8> = Rgba([255, 255, 0, 255]);

#[derive(Debug, Clone, Copy)]
pub struct OverlayStyle {
    pub correct_color: Rgba<u8>,
    pub incorrect_color: Rgba<u8>,
    pub line_width: f32,
    pub marker_radius: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            correct_color: AQUA,
            incorrect_color: YELLOW,
            line_width: 4.0,
            marker_radius: 5.0,
        }
    }
}

/// Draws a skeleton from detected joints. Every call is a full wipe and redraw.
#[derive(Debug, Clone)]
pub struct PoseOverlay {
    adjacency: &'static [(&'static str, &'static str)],
    style: OverlayStyle,
}

impl Default for PoseOverlay {
    fn default() -> Self {
        Self::new(&POSE_CONNECTIONS, OverlayStyle::default())
    }
}

impl PoseOverlay {
    pub fn new(adjacency: &'static [(&'static str, &'static str)], style: OverlayStyle) -> Self {
        Self { adjacency, style }
    }

    pub fn render<S: DrawingSurface + ?Sized>(&self, surface: &mut S, joints: &[Joint], is_correct: bool) {
        surface.clear_overlay();

        let (width, height) = surface.dimensions();
        let (width, height) = (width as f32, height as f32);
        let color = if is_correct {
            self.style.correct_color
        } else {
            self.style.incorrect_color
        };

        // Later duplicates overwrite earlier ones.
        let lookup: HashMap<&str, &Joint> = joints.iter().map(|j| (j.name.as_str(), j)).collect();
        let to_pixels = |joint: &Joint| (joint.x * width, joint.y * height);

        for (a, b) in self.adjacency {
            if let (Some(from), Some(to)) = (lookup.get(a).copied(), lookup.get(b).copied()) {
                surface.draw_line(to_pixels(from), to_pixels(to), color, self.style.line_width);
            }
        }

        for joint in joints {
            // Only the winning entry of a duplicated name gets a marker.
            let winner = lookup.get(joint.name.as_str()).copied();
            if !winner.is_some_and(|w| std::ptr::eq(w, joint)) {
                continue;
            }
            if !is_known_joint(&joint.name) {
                log_debug!("drawing joint with unrecognized name '{}'", joint.name);
            }
            surface.fill_marker(to_pixels(joint), self.style.marker_radius, color);
        }
    }
}
