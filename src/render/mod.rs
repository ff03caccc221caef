pub mod canvas;
pub mod overlay;
pub mod skeleton;

pub use canvas::{Canvas, DrawingSurface};
pub use overlay::{OverlayStyle, PoseOverlay};
pub use skeleton::{JOINT_NAMES, POSE_CONNECTIONS};
