pub mod analysis;
pub mod capture;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod locale;
pub mod models;
pub mod render;
pub mod sink;
pub mod trainer;
pub mod utils;
pub mod workout;

use std::path::Path;

use anyhow::Context;
use chrono::Utc;

pub use analysis::{AnalysisRequest, PoseAnalyzer, Strictness};
pub use capture::{CaptureConstraints, CaptureDevice, FacingMode, FrameSource};
pub use catalog::Activity;
pub use config::AppConfig;
pub use errors::{AnalysisError, DeviceError, SetupError};
pub use locale::Locale;
pub use models::{AnalysisResult, CoachEvent, Feedback, Joint};
pub use sink::{ChannelSink, FeedbackSink};
pub use trainer::{SessionController, SessionSnapshot, SessionStatus};
pub use workout::{StreakStore, StreakUpdate, WorkoutController, WorkoutSnapshot};

const ENABLE_LOGS: bool = true;

pub const CONFIG_FILE: &str = "config.json";
pub const STREAK_FILE: &str = "streak.json";

/// Wires a ready-to-use workout controller from the files under `data_dir`.
///
/// `config.json` is read (with env overrides) and the streak file defaults to
/// `streak.json` next to it. The directory is created when missing.
pub fn setup<D, A, F>(
    data_dir: impl AsRef<Path>,
    device: D,
    analyzer: A,
    sink: F,
) -> anyhow::Result<WorkoutController<D, A, F>>
where
    D: CaptureDevice,
    A: PoseAnalyzer,
    F: FeedbackSink,
{
    utils::init_logging();
    log_info!("FitQuest starting up...");

    let data_dir = data_dir.as_ref();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    let config = AppConfig::load(data_dir.join(CONFIG_FILE))?.with_env_overrides();
    let streak_path = config
        .streak_path
        .clone()
        .unwrap_or_else(|| data_dir.join(STREAK_FILE));
    let streak = StreakStore::open(Some(streak_path), Utc::now().date_naive())?;

    let trainer = SessionController::builder()
        .device(device)
        .analyzer(analyzer)
        .sink(sink)
        .config(config)
        .build()?;

    Ok(WorkoutController::new(trainer, streak))
}
