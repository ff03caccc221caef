mod controller;
mod state;
pub mod streak;

pub use controller::WorkoutController;
pub use state::{format_clock, WorkoutSnapshot, WorkoutState, WorkoutStatus};
pub use streak::{StreakRecord, StreakStore, StreakUpdate};
