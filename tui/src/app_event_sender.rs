use std::sync::mpsc::Sender;

use crate::app_event::AppEvent;

#[derive(Clone, Debug)]
pub(crate) struct AppEventSender {
    // High‑priority events (input, redraw, exit) are routed here.
    high_tx: Sender<AppEvent>,
    // Network results and ticks.
    bulk_tx: Sender<AppEvent>,
}

impl AppEventSender {
    /// Create a sender that splits events by priority across two channels.
    pub(crate) fn new_dual(high_tx: Sender<AppEvent>, bulk_tx: Sender<AppEvent>) -> Self {
        Self { high_tx, bulk_tx }
    }

    /// Route both high-priority and bulk events to the same sender. Used by
    /// tests that only need to observe what was sent.
    #[cfg(test)]
    pub(crate) fn new(app_event_tx: Sender<AppEvent>) -> Self {
        Self {
            high_tx: app_event_tx.clone(),
            bulk_tx: app_event_tx,
        }
    }

    /// Send an event to the app event channel. If it fails, we swallow the
    /// error and log it.
    pub(crate) fn send(&self, event: AppEvent) {
        let is_high = matches!(
            event,
            AppEvent::KeyEvent(_)
                | AppEvent::Paste(_)
                | AppEvent::RequestRedraw
                | AppEvent::ExitRequest
        );

        let tx = if is_high {
            &self.high_tx
        } else {
            &self.bulk_tx
        };
        if let Err(e) = tx.send(event) {
            tracing::error!("failed to send event: {e}");
        }
    }
}
