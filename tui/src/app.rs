use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use anyhow::Context;
use catalog_client::CatalogApi;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::catalog::CatalogManager;
use crate::key_hint;
use crate::shell::render_shell;
use crate::tui::{self, Tui};

/// How long to wait on bulk events before checking input again.
const BULK_POLL: Duration = Duration::from_millis(16);

pub(crate) struct App {
    catalog: CatalogManager,
    app_event_tx: AppEventSender,
    high_rx: Receiver<AppEvent>,
    bulk_rx: Receiver<AppEvent>,
    needs_redraw: bool,
    input_stop: Arc<AtomicBool>,
}

impl App {
    pub(crate) fn new(api: Arc<dyn CatalogApi>, currency: impl Into<String>) -> Self {
        let (high_tx, high_rx) = mpsc::channel();
        let (bulk_tx, bulk_rx) = mpsc::channel();
        let app_event_tx = AppEventSender::new_dual(high_tx, bulk_tx);
        let catalog = CatalogManager::new(api, app_event_tx.clone(), currency);
        Self {
            catalog,
            app_event_tx,
            high_rx,
            bulk_rx,
            needs_redraw: true,
            input_stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Drive the UI until the user quits. Must be called inside a tokio
    /// runtime context.
    pub(crate) fn run(&mut self, terminal: &mut Tui) -> anyhow::Result<()> {
        tui::spawn_input_thread(self.app_event_tx.clone(), Arc::clone(&self.input_stop))
            .context("failed to spawn input thread")?;
        self.catalog.load_products();

        let result = self.event_loop(terminal);

        self.input_stop.store(true, Ordering::Relaxed);
        self.catalog.shutdown();
        result
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> anyhow::Result<()> {
        loop {
            if self.needs_redraw {
                terminal
                    .draw(|frame| render_shell(&self.catalog, frame.area(), frame.buffer_mut()))
                    .context("failed to draw frame")?;
                self.needs_redraw = false;
            }

            let Some(event) = self.next_event() else {
                tracing::warn!("app event channels closed");
                return Ok(());
            };
            if !self.handle_event(event) {
                return Ok(());
            }
        }
    }

    /// Input and redraw requests are drained before network results.
    fn next_event(&self) -> Option<AppEvent> {
        loop {
            match self.high_rx.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Disconnected) => return None,
                Err(TryRecvError::Empty) => {}
            }
            match self.bulk_rx.recv_timeout(BULK_POLL) {
                Ok(event) => return Some(event),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    /// Returns false when the app should exit.
    fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::KeyEvent(key_event) => {
                if key_hint::INTERRUPT.is_press(key_event) {
                    tracing::info!("interrupted");
                    return false;
                }
                self.catalog.handle_key_event(key_event);
                self.needs_redraw = true;
            }
            AppEvent::Paste(text) => {
                self.catalog.handle_paste(text);
                self.needs_redraw = true;
            }
            AppEvent::RequestRedraw => self.needs_redraw = true,
            AppEvent::Tick => {
                if self.catalog.on_tick() {
                    self.needs_redraw = true;
                }
            }
            AppEvent::ExitRequest => {
                tracing::info!("exit requested");
                return false;
            }
            AppEvent::Catalog(response) => {
                self.catalog.on_response(response);
                self.needs_redraw = true;
            }
        }
        true
    }
}
