//! Terminal setup, teardown, and the input thread.

use std::io::{self, Stdout, stdout};
use std::panic;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;

pub(crate) type Tui = Terminal<CrosstermBackend<Stdout>>;

/// How long the input thread waits for a terminal event before emitting a tick.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Enter raw mode and the alternate screen. The panic hook restores the
/// terminal before the default hook prints, so the message stays readable.
pub(crate) fn init() -> io::Result<Tui> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
    set_panic_hook();
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;
    Ok(terminal)
}

pub(crate) fn restore() -> io::Result<()> {
    execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
    disable_raw_mode()
}

fn set_panic_hook() {
    let hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore();
        hook(info);
    }));
}

/// Forward crossterm events to the app until `stop` is set or the terminal
/// stops delivering input.
pub(crate) fn spawn_input_thread(
    app_event_tx: AppEventSender,
    stop: Arc<AtomicBool>,
) -> io::Result<()> {
    thread::Builder::new()
        .name("catalog-input".to_string())
        .spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let polled = event::poll(TICK_INTERVAL)
                    .and_then(|ready| if ready { event::read().map(Some) } else { Ok(None) });
                if !forward_input(&app_event_tx, polled) {
                    break;
                }
            }
        })?;
    Ok(())
}

/// Turn one poll result into an app event. `Ok(None)` means the poll timed
/// out. On an input error the app is asked to exit, since no further keys can
/// reach it; returns false in that case.
fn forward_input(app_event_tx: &AppEventSender, polled: io::Result<Option<Event>>) -> bool {
    match polled {
        Ok(Some(Event::Key(key_event))) => app_event_tx.send(AppEvent::KeyEvent(key_event)),
        Ok(Some(Event::Paste(text))) => app_event_tx.send(AppEvent::Paste(text)),
        Ok(Some(Event::Resize(_, _))) => app_event_tx.send(AppEvent::RequestRedraw),
        Ok(Some(_)) => {}
        Ok(None) => app_event_tx.send(AppEvent::Tick),
        Err(err) => {
            tracing::error!("terminal input failed, exiting: {err}");
            app_event_tx.send(AppEvent::ExitRequest);
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::mpsc;

    #[test]
    fn input_error_requests_exit() {
        let (tx, rx) = mpsc::channel();
        let sender = AppEventSender::new(tx);

        assert!(!forward_input(&sender, Err(io::Error::other("tty gone"))));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::ExitRequest)));
    }

    #[test]
    fn idle_poll_ticks_and_keys_pass_through() {
        let (tx, rx) = mpsc::channel();
        let sender = AppEventSender::new(tx);
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);

        assert!(forward_input(&sender, Ok(None)));
        assert!(forward_input(&sender, Ok(Some(Event::Key(key)))));
        assert!(forward_input(&sender, Ok(Some(Event::Resize(80, 24)))));

        assert!(matches!(rx.try_recv(), Ok(AppEvent::Tick)));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::KeyEvent(k)) if k == key));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::RequestRedraw)));
    }
}
