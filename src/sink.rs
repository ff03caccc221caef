use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::models::CoachEvent;

/// Presentation layer that receives everything the coach wants shown.
/// Write-only from the core's point of view.
pub trait FeedbackSink: Send + Sync + 'static {
    fn emit(&self, event: CoachEvent);
}

/// Forwards events into an unbounded channel; the receiving half belongs to the UI.
#[derive(Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<CoachEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, UnboundedReceiver<CoachEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl FeedbackSink for ChannelSink {
    fn emit(&self, event: CoachEvent) {
        // A closed receiver means nobody is watching anymore.
        let _ = self.tx.send(event);
    }
}
