mod controller;
mod cycle;
mod state;

pub use controller::{SessionController, SessionControllerBuilder};
pub use state::{SessionSnapshot, SessionStatus};
