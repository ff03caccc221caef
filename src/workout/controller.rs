use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use tokio::{sync::Mutex, task::JoinHandle, time};

use crate::{
    analysis::PoseAnalyzer,
    capture::CaptureDevice,
    catalog::{self, Activity},
    models::CoachEvent,
    sink::FeedbackSink,
    trainer::SessionController,
};

use super::{
    state::{WorkoutSnapshot, WorkoutState, WorkoutStatus},
    streak::{StreakRecord, StreakStore, StreakUpdate},
};

const ENABLE_LOGS: bool = true;

use crate::log_info;

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Runs the per-exercise countdown on top of a `SessionController` and keeps
/// the daily streak.
pub struct WorkoutController<D: CaptureDevice, A, F> {
    state: Arc<Mutex<WorkoutState>>,
    trainer: SessionController<D, A, F>,
    streak: Arc<StreakStore>,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    /// Trainer restart triggered by the ticker when a countdown runs out.
    rotation: Arc<Mutex<Option<JoinHandle<()>>>>,
    tick_interval: Duration,
    today: fn() -> NaiveDate,
}

impl<D: CaptureDevice, A, F> Clone for WorkoutController<D, A, F> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            trainer: self.trainer.clone(),
            streak: Arc::clone(&self.streak),
            ticker: Arc::clone(&self.ticker),
            rotation: Arc::clone(&self.rotation),
            tick_interval: self.tick_interval,
            today: self.today,
        }
    }
}

impl<D, A, F> WorkoutController<D, A, F>
where
    D: CaptureDevice,
    A: PoseAnalyzer,
    F: FeedbackSink,
{
    pub fn new(trainer: SessionController<D, A, F>, streak: StreakStore) -> Self {
        let exercise_secs = trainer.config().exercise_secs;
        Self {
            state: Arc::new(Mutex::new(WorkoutState::new(exercise_secs))),
            trainer,
            streak: Arc::new(streak),
            ticker: Arc::new(Mutex::new(None)),
            rotation: Arc::new(Mutex::new(None)),
            tick_interval: Duration::from_secs(1),
            today: utc_today,
        }
    }

    /// Overrides the calendar used for streak bookkeeping.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn trainer(&self) -> &SessionController<D, A, F> {
        &self.trainer
    }

    pub fn streak(&self) -> StreakRecord {
        self.streak.current()
    }

    pub async fn get_snapshot(&self) -> WorkoutSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn start_workout(&self, activity: Activity) -> Result<WorkoutSnapshot> {
        {
            let mut state = self.state.lock().await;
            if state.is_active() {
                return Err(anyhow!("workout already active"));
            }
            state.begin(activity.clone(), Utc::now());
        }
        log_info!("workout started with {}", activity.name);

        self.trainer.start(activity).await;
        self.spawn_ticker().await;
        Ok(self.emit_state_changed().await)
    }

    pub async fn start_random_workout(&self) -> Result<WorkoutSnapshot> {
        let activity = catalog::random(&mut rand::thread_rng());
        self.start_workout(activity).await
    }

    pub async fn pause_workout(&self) -> Result<WorkoutSnapshot> {
        if !self.state.lock().await.pause() {
            return Ok(self.get_snapshot().await);
        }

        self.cancel_ticker().await;
        self.settle_rotation().await;
        self.trainer.pause().await;
        log_info!("workout paused");
        Ok(self.emit_state_changed().await)
    }

    pub async fn resume_workout(&self) -> Result<WorkoutSnapshot> {
        if !self.state.lock().await.resume() {
            return Ok(self.get_snapshot().await);
        }

        self.trainer.resume().await;
        self.spawn_ticker().await;
        log_info!("workout resumed");
        Ok(self.emit_state_changed().await)
    }

    /// Skips ahead in the catalog; also resumes a paused workout.
    pub async fn next_exercise(&self) -> Result<WorkoutSnapshot> {
        let next = {
            let mut state = self.state.lock().await;
            if !state.is_active() {
                return Err(anyhow!("no active workout"));
            }
            let next = catalog::next_after(state.activity_id());
            state.advance(next.clone());
            next
        };
        log_info!("skipping to {}", next.name);

        self.cancel_ticker().await;
        self.settle_rotation().await;
        self.trainer.start(next).await;
        self.spawn_ticker().await;
        Ok(self.emit_state_changed().await)
    }

    /// Ends the workout and counts it towards the streak.
    pub async fn stop_workout(&self) -> Result<StreakUpdate> {
        {
            let mut state = self.state.lock().await;
            if !state.is_active() {
                return Err(anyhow!("no active workout to stop"));
            }
            state.reset();
        }

        self.cancel_ticker().await;
        self.settle_rotation().await;
        self.trainer.stop().await;

        let update = self.streak.record_workout((self.today)())?;
        self.emit_state_changed().await;
        self.trainer.emit(CoachEvent::StreakUpdated(update.clone()));
        log_info!("workout finished, streak {}", update.streak);
        Ok(update)
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.abort();
        }

        let state = self.state.clone();
        let trainer = self.trainer.clone();
        let rotation = self.rotation.clone();
        let tick_interval = self.tick_interval;

        let handle = tokio::spawn(async move {
            let mut interval =
                time::interval_at(time::Instant::now() + tick_interval, tick_interval);
            loop {
                interval.tick().await;

                let snapshot = {
                    let mut guard = state.lock().await;
                    if guard.status != WorkoutStatus::Running {
                        break;
                    }
                    if guard.tick() {
                        let next = catalog::next_after(guard.activity_id());
                        guard.advance(next.clone());
                        log_info!("time is up, moving on to {}", next.name);

                        // Registered while the state lock is held, so a stop that
                        // resets the state afterwards always finds it to wait on.
                        let mut rotation_guard = rotation.lock().await;
                        let previous = rotation_guard.take();
                        let state = state.clone();
                        let trainer = trainer.clone();
                        *rotation_guard = Some(tokio::spawn(async move {
                            if let Some(previous) = previous {
                                let _ = previous.await;
                            }
                            let still_current = {
                                let guard = state.lock().await;
                                guard.is_active() && guard.activity_id() == Some(next.id.as_str())
                            };
                            if still_current {
                                trainer.start(next).await;
                            }
                        }));
                    }
                    guard.snapshot()
                };

                trainer.emit(CoachEvent::WorkoutState(snapshot));
            }
        });

        *ticker_guard = Some(handle);
    }

    async fn cancel_ticker(&self) {
        let handle = self.ticker.lock().await.take();
        if let Some(handle) = handle {
            handle.abort();
            let _ = handle.await;
        }
    }

    /// Waits for a ticker-triggered trainer restart to finish so it cannot
    /// land after the caller's own trainer call.
    async fn settle_rotation(&self) {
        let pending = self.rotation.lock().await.take();
        if let Some(handle) = pending {
            let _ = handle.await;
        }
    }

    async fn emit_state_changed(&self) -> WorkoutSnapshot {
        let snapshot = self.state.lock().await.snapshot();
        self.trainer.emit(CoachEvent::WorkoutState(snapshot.clone()));
        snapshot
    }
}
