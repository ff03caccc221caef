use std::{sync::Arc, time::Instant};

use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::{
    analysis::{encode_jpeg, AnalysisRequest, PoseAnalyzer},
    capture::{CaptureDevice, FrameSource},
    errors::AnalysisError,
    models::{AnalysisResult, CoachEvent, Feedback},
    sink::FeedbackSink,
};

use super::controller::{schedule_next, Shared};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

/// Body of a scheduled callback: wait out the delay unless cancelled, then run
/// one analysis cycle.
pub(super) async fn scheduled_cycle<D, A, F>(
    shared: Arc<Shared<D, A, F>>,
    id: u64,
    token: CancellationToken,
    delay: Duration,
) where
    D: CaptureDevice,
    A: PoseAnalyzer,
    F: FeedbackSink,
{
    tokio::select! {
        _ = token.cancelled() => return,
        _ = tokio::time::sleep(delay) => {}
    }
    run_cycle(&shared, id, &token).await;
}

async fn run_cycle<D, A, F>(shared: &Arc<Shared<D, A, F>>, id: u64, token: &CancellationToken)
where
    D: CaptureDevice,
    A: PoseAnalyzer,
    F: FeedbackSink,
{
    let started = Instant::now();
    let messages = shared.config.locale.messages();

    let (session_id, activity, strictness, prepared) = {
        let mut guard = shared.state.lock().await;
        let state = &mut *guard;

        // Cancelled between the end of the sleep and acquiring the lock.
        if token.is_cancelled() || state.pending.as_ref().map(|p| p.id) != Some(id) {
            return;
        }
        state.pending = None;

        if state.paused {
            return;
        }
        let (Some(session_id), Some(activity)) = (state.session_id, state.activity.clone()) else {
            return;
        };
        let Some(stream) = state.stream.as_mut() else {
            return;
        };

        let prepared = match stream.grab_frame() {
            Some(frame) => {
                state.canvas.present_mirrored(&frame);
                encode_jpeg(state.canvas.video(), shared.config.jpeg_quality)
            }
            None => Err(AnalysisError::EmptyPayload),
        };
        // Published under the lock so a concurrent stop clears it afterwards.
        if prepared.is_ok() {
            shared
                .sink
                .emit(CoachEvent::Feedback(Feedback::notice(messages.analyzing)));
        }
        (session_id, activity, state.strictness, prepared)
    };

    let outcome: Result<AnalysisResult, AnalysisError> = match prepared {
        Ok(image) => {
            log_debug!("submitting {} byte snapshot for {}", image.len(), activity.name);
            let request = AnalysisRequest {
                image,
                activity_name: activity.name.clone(),
                instructions: activity.instructions.clone(),
                strictness,
            };
            match shared.analyzer.analyze(request).await {
                Ok(result) => result.validate().map(|()| result),
                Err(err) => Err(err),
            }
        }
        Err(err) => Err(err),
    };

    let mut guard = shared.state.lock().await;
    let state = &mut *guard;

    // Stopped or restarted while the analyzer was busy.
    if state.session_id != Some(session_id) {
        log_debug!("discarding analysis for ended session {session_id}");
        return;
    }
    state.cycles_completed += 1;

    match outcome {
        Ok(result) => {
            log_info!(
                "analysis for {}: correct={} score={} in {}ms",
                activity.name,
                result.is_correct,
                result.score,
                started.elapsed().as_millis()
            );
            shared.sink.emit(CoachEvent::Feedback(Feedback::from(&result)));
            if let Some(keypoints) = result.keypoints.as_deref() {
                shared
                    .overlay
                    .render(&mut state.canvas, keypoints, result.is_correct);
            }
        }
        Err(err) => {
            log_warn!("analysis failed for {}: {err}", activity.name);
            shared
                .sink
                .emit(CoachEvent::Feedback(Feedback::notice(messages.analysis_failed)));
        }
    }

    if !state.paused {
        schedule_next(shared, state);
    }
}
