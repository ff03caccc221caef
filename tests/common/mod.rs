#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use fitquest_lib::{
    capture::StillFrameDevice, models::Joint, AnalysisError, AnalysisRequest, AnalysisResult,
    AppConfig, ChannelSink, CoachEvent, Locale, PoseAnalyzer, SessionController,
};
use tokio::sync::mpsc::UnboundedReceiver;

pub const FRAME_W: u32 = 64;
pub const FRAME_H: u32 = 48;

/// Hands out queued outcomes, then keeps repeating `fallback`.
#[derive(Clone)]
pub struct ScriptedAnalyzer {
    queue: Arc<Mutex<VecDeque<Result<AnalysisResult, AnalysisError>>>>,
    fallback: Arc<dyn Fn() -> Result<AnalysisResult, AnalysisError> + Send + Sync>,
    latency: Duration,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<AnalysisRequest>>>,
}

impl ScriptedAnalyzer {
    pub fn always_failing() -> Self {
        Self::with_fallback(|| Err(AnalysisError::EmptyResponse))
    }

    pub fn always(result: AnalysisResult) -> Self {
        Self::with_fallback(move || Ok(result.clone()))
    }

    pub fn with_fallback(
        fallback: impl Fn() -> Result<AnalysisResult, AnalysisError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Arc::new(fallback),
            latency: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn push(&self, outcome: Result<AnalysisResult, AnalysisError>) {
        self.queue.lock().unwrap().push_back(outcome);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PoseAnalyzer for ScriptedAnalyzer {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let queued = self.queue.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| (self.fallback)())
    }
}

pub fn squat_result() -> AnalysisResult {
    AnalysisResult {
        is_correct: true,
        feedback: "Great depth".into(),
        score: 92,
        keypoints: Some(vec![
            Joint::new("left_hip", 0.25, 0.5),
            Joint::new("left_knee", 0.25, 0.75),
        ]),
    }
}

pub fn english_config() -> AppConfig {
    AppConfig {
        locale: Locale::English,
        ..AppConfig::default()
    }
}

pub struct Harness {
    pub controller: SessionController<StillFrameDevice, ScriptedAnalyzer, ChannelSink>,
    pub device: StillFrameDevice,
    pub analyzer: ScriptedAnalyzer,
    pub events: UnboundedReceiver<CoachEvent>,
}

impl Harness {
    pub fn new(analyzer: ScriptedAnalyzer) -> Self {
        Self::with_config(analyzer, english_config())
    }

    pub fn with_config(analyzer: ScriptedAnalyzer, config: AppConfig) -> Self {
        Self::with_device(StillFrameDevice::solid(FRAME_W, FRAME_H), analyzer, config)
    }

    pub fn with_device(
        device: StillFrameDevice,
        analyzer: ScriptedAnalyzer,
        config: AppConfig,
    ) -> Self {
        let (sink, events) = ChannelSink::new();
        let controller = SessionController::builder()
            .device(device.clone())
            .analyzer(analyzer.clone())
            .sink(sink)
            .config(config)
            .build()
            .expect("all collaborators supplied");
        Self {
            controller,
            device,
            analyzer,
            events,
        }
    }

    /// Everything emitted so far.
    pub fn drain(&mut self) -> Vec<CoachEvent> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            out.push(event);
        }
        out
    }
}

pub fn feedback_texts(events: &[CoachEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            CoachEvent::Feedback(feedback) => Some(feedback.feedback.clone()),
            _ => None,
        })
        .collect()
}
