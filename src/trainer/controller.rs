use std::{future::Future, pin::Pin, sync::Arc};

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    analysis::{PoseAnalyzer, Strictness},
    capture::{CaptureDevice, FrameSource},
    catalog::Activity,
    config::AppConfig,
    errors::{DeviceError, SetupError},
    models::{CoachEvent, DeviceState, DeviceStatus},
    render::{Canvas, PoseOverlay},
    sink::FeedbackSink,
};

use super::{
    cycle::scheduled_cycle,
    state::{PendingCycle, SessionSnapshot, SessionState},
};

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

pub(crate) struct Shared<D: CaptureDevice, A, F> {
    pub device: D,
    pub analyzer: A,
    pub sink: F,
    pub overlay: PoseOverlay,
    pub config: AppConfig,
    pub state: Mutex<SessionState<D::Stream>>,
}

impl<D, A, F> Shared<D, A, F>
where
    D: CaptureDevice,
    A: PoseAnalyzer,
    F: FeedbackSink,
{
    /// Tears the session down: pending cycle, stream, canvas, feedback.
    fn release(&self, state: &mut SessionState<D::Stream>) {
        if let Some(stream) = state.reset() {
            log_info!("released camera stream {}", stream.id());
            self.sink
                .emit(CoachEvent::DeviceStatus(DeviceStatus::new(DeviceState::Released)));
        }
        self.sink.emit(CoachEvent::FeedbackCleared);
    }

    fn report_device_error(&self, state: &mut SessionState<D::Stream>, err: &DeviceError) {
        log_error!("camera unavailable: {err}");
        self.release(state);

        let messages = self.config.locale.messages();
        self.sink.emit(CoachEvent::DeviceStatus(DeviceStatus {
            state: DeviceState::Failed,
            status: Some(messages.camera_failed.to_string()),
            error: Some(messages.device_error_hint(err).to_string()),
        }));
    }
}

/// Replaces whatever cycle is pending with a fresh one after the configured delay.
pub(crate) fn schedule_next<D, A, F>(
    shared: &Arc<Shared<D, A, F>>,
    state: &mut SessionState<D::Stream>,
) where
    D: CaptureDevice,
    A: PoseAnalyzer,
    F: FeedbackSink,
{
    state.cancel_pending();

    let id = state.next_cycle_id;
    state.next_cycle_id = state.next_cycle_id.wrapping_add(1);
    let token = CancellationToken::new();
    state.pending = Some(PendingCycle {
        id,
        token: token.clone(),
    });

    let delay = shared.config.analysis_interval();
    let task: Pin<Box<dyn Future<Output = ()> + Send>> =
        Box::pin(scheduled_cycle(Arc::clone(shared), id, token, delay));
    tokio::spawn(task);
}

pub struct SessionControllerBuilder<D, A, F> {
    device: Option<D>,
    analyzer: Option<A>,
    sink: Option<F>,
    config: AppConfig,
    overlay: PoseOverlay,
}

impl<D, A, F> Default for SessionControllerBuilder<D, A, F> {
    fn default() -> Self {
        Self {
            device: None,
            analyzer: None,
            sink: None,
            config: AppConfig::default(),
            overlay: PoseOverlay::default(),
        }
    }
}

impl<D, A, F> SessionControllerBuilder<D, A, F>
where
    D: CaptureDevice,
    A: PoseAnalyzer,
    F: FeedbackSink,
{
    pub fn device(mut self, device: D) -> Self {
        self.device = Some(device);
        self
    }

    pub fn analyzer(mut self, analyzer: A) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn sink(mut self, sink: F) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn overlay(mut self, overlay: PoseOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    /// Refuses to build a half-wired controller.
    pub fn build(self) -> Result<SessionController<D, A, F>, SetupError> {
        let device = self
            .device
            .ok_or(SetupError::MissingCollaborator("capture device"))?;
        let analyzer = self
            .analyzer
            .ok_or(SetupError::MissingCollaborator("pose analyzer"))?;
        let sink = self
            .sink
            .ok_or(SetupError::MissingCollaborator("feedback sink"))?;

        let state = SessionState::new(self.config.strictness);
        Ok(SessionController {
            shared: Arc::new(Shared {
                device,
                analyzer,
                sink,
                overlay: self.overlay,
                config: self.config,
                state: Mutex::new(state),
            }),
        })
    }
}

/// Owns one camera stream at a time and drives the capture, analyze and
/// render cycle for the current activity.
pub struct SessionController<D: CaptureDevice, A, F> {
    shared: Arc<Shared<D, A, F>>,
}

impl<D: CaptureDevice, A, F> Clone for SessionController<D, A, F> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<D, A, F> SessionController<D, A, F>
where
    D: CaptureDevice,
    A: PoseAnalyzer,
    F: FeedbackSink,
{
    pub fn builder() -> SessionControllerBuilder<D, A, F> {
        SessionControllerBuilder::default()
    }

    pub fn config(&self) -> &AppConfig {
        &self.shared.config
    }

    /// Starts coaching `activity`, replacing any running session. Camera
    /// failures are reported through the sink, never returned.
    pub async fn start(&self, activity: Activity) {
        let shared = &self.shared;
        let messages = shared.config.locale.messages();
        let mut state = shared.state.lock().await;

        shared.release(&mut state);

        let session_id = Uuid::new_v4();
        state.session_id = Some(session_id);
        state.activity = Some(activity.clone());
        state.paused = false;

        shared.sink.emit(CoachEvent::DeviceStatus(DeviceStatus {
            state: DeviceState::Opening,
            status: Some(messages.opening_camera.to_string()),
            error: None,
        }));
        log_info!("starting session {session_id} for {}", activity.name);

        let mut stream = match shared.device.open(&shared.config.capture).await {
            Ok(stream) => stream,
            Err(err) => {
                shared.report_device_error(&mut state, &err);
                return;
            }
        };

        if let Err(err) = stream.play() {
            stream.stop();
            shared.report_device_error(&mut state, &err);
            return;
        }

        let metadata = match stream.metadata().await {
            Ok(metadata) => metadata,
            Err(err) => {
                stream.stop();
                shared.report_device_error(&mut state, &err);
                return;
            }
        };

        state.canvas.resize(metadata.width, metadata.height);
        log_info!(
            "camera stream {} live at {}x{}",
            stream.id(),
            metadata.width,
            metadata.height
        );
        state.stream = Some(stream);

        shared.sink.emit(CoachEvent::DeviceStatus(DeviceStatus::new(DeviceState::Live)));
        schedule_next(shared, &mut state);
    }

    /// Releases the camera and clears all output. Harmless when idle.
    pub async fn stop(&self) {
        let mut state = self.shared.state.lock().await;
        if !state.is_active() {
            return;
        }
        log_info!("stopping session {:?}", state.session_id);
        self.shared.release(&mut state);
    }

    /// Freezes playback and cancels the scheduled cycle; keeps the camera.
    pub async fn pause(&self) {
        let mut state = self.shared.state.lock().await;
        if state.paused || !state.is_active() {
            return;
        }

        state.paused = true;
        if let Some(stream) = state.stream.as_mut() {
            stream.pause();
        }
        state.cancel_pending();
        log_info!("session {:?} paused", state.session_id);
    }

    pub async fn resume(&self) {
        let mut state = self.shared.state.lock().await;
        if !state.paused || !state.is_active() {
            return;
        }

        state.paused = false;
        if let Some(stream) = state.stream.as_mut() {
            if let Err(err) = stream.play() {
                log_warn!("camera did not resume playback: {err}");
            }
        }
        log_info!("session {:?} resumed", state.session_id);
        schedule_next(&self.shared, &mut state);
    }

    /// Applies from the next analysis request on.
    pub async fn set_strictness(&self, strictness: Strictness) {
        self.shared.state.lock().await.strictness = strictness;
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.shared.state.lock().await.snapshot()
    }

    /// Read access to the rendering surface; the lock is held for the call.
    pub async fn with_canvas<R>(&self, f: impl FnOnce(&Canvas) -> R) -> R {
        let state = self.shared.state.lock().await;
        f(&state.canvas)
    }

    /// Lets owners such as the workout manager publish through the same sink.
    pub fn emit(&self, event: CoachEvent) {
        self.shared.sink.emit(event);
    }
}
