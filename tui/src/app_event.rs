use crossterm::event::KeyEvent;

use crate::catalog::CatalogResponse;

#[derive(Debug)]
pub(crate) enum AppEvent {
    KeyEvent(KeyEvent),

    /// Text pasted from the terminal clipboard.
    Paste(String),

    /// Request a redraw of the next frame (resize, external state change).
    RequestRedraw,

    /// Idle tick from the input thread; drives the loading spinner.
    Tick,

    /// Request to exit the application gracefully.
    ExitRequest,

    /// A catalog request finished. The catalog manager decides whether the
    /// result is still current before applying it.
    Catalog(CatalogResponse),
}
