use serde::Serialize;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    analysis::Strictness,
    capture::{FrameSource, StreamId},
    catalog::Activity,
    render::Canvas,
};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    Idle,
    Running,
    Paused,
}

/// Read-only view of the controller, for presenters and tests.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub session_id: Option<Uuid>,
    pub activity_id: Option<String>,
    pub stream_id: Option<StreamId>,
    pub cycle_pending: bool,
    pub cycles_completed: u64,
    pub strictness: Strictness,
}

/// The sleeping half of a scheduled analysis. Once the sleep ends the cycle
/// removes itself from `SessionState::pending` and can no longer be cancelled.
pub(crate) struct PendingCycle {
    pub id: u64,
    pub token: CancellationToken,
}

pub(crate) struct SessionState<S> {
    /// Changes on every `start`; results from an older session are dropped.
    pub session_id: Option<Uuid>,
    pub activity: Option<Activity>,
    pub stream: Option<S>,
    pub paused: bool,
    pub pending: Option<PendingCycle>,
    pub next_cycle_id: u64,
    pub cycles_completed: u64,
    pub strictness: Strictness,
    pub canvas: Canvas,
}

impl<S: FrameSource> SessionState<S> {
    pub fn new(strictness: Strictness) -> Self {
        Self {
            session_id: None,
            activity: None,
            stream: None,
            paused: false,
            pending: None,
            next_cycle_id: 0,
            cycles_completed: 0,
            strictness,
            canvas: Canvas::new(0, 0),
        }
    }

    pub fn is_active(&self) -> bool {
        self.session_id.is_some()
    }

    /// Cancels the scheduled cycle, if any. Returns whether one was pending.
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Back to the pre-session state. Returns the stream so the caller can
    /// report its release.
    pub fn reset(&mut self) -> Option<S> {
        self.cancel_pending();
        let stream = self.stream.take().map(|mut stream| {
            stream.stop();
            stream
        });
        self.session_id = None;
        self.activity = None;
        self.paused = false;
        self.canvas.clear();
        stream
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let status = match (self.is_active(), self.paused) {
            (false, _) => SessionStatus::Idle,
            (true, false) => SessionStatus::Running,
            (true, true) => SessionStatus::Paused,
        };

        SessionSnapshot {
            status,
            session_id: self.session_id,
            activity_id: self.activity.as_ref().map(|a| a.id.clone()),
            stream_id: self.stream.as_ref().map(|stream| stream.id()),
            cycle_pending: self.pending.is_some(),
            cycles_completed: self.cycles_completed,
            strictness: self.strictness,
        }
    }
}
