pub mod analysis;
pub mod events;

pub use analysis::{AnalysisResult, Joint};
pub use events::{CoachEvent, DeviceState, DeviceStatus, Feedback};
