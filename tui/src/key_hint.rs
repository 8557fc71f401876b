//! Key bindings for the catalog screens and their footer hint rendering.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};

const CTRL_PREFIX: &str = "ctrl + ";
const SHIFT_PREFIX: &str = "shift + ";

/// A keyboard binding with key and modifiers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct KeyBinding {
    key: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyBinding {
    pub(crate) const fn new(key: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { key, modifiers }
    }

    /// Check if this binding matches the given key event (press or repeat).
    pub(crate) fn is_press(&self, event: KeyEvent) -> bool {
        self.key == event.code
            && self.modifiers == event.modifiers
            && (event.kind == KeyEventKind::Press || event.kind == KeyEventKind::Repeat)
    }
}

/// Create a plain key binding (no modifiers).
pub(crate) const fn plain(key: KeyCode) -> KeyBinding {
    KeyBinding::new(key, KeyModifiers::NONE)
}

/// Create a Ctrl+key binding.
pub(crate) const fn ctrl(key: KeyCode) -> KeyBinding {
    KeyBinding::new(key, KeyModifiers::CONTROL)
}

/// Create a Shift+key binding.
pub(crate) const fn shift(key: KeyCode) -> KeyBinding {
    KeyBinding::new(key, KeyModifiers::SHIFT)
}

// Grid
pub(crate) const ADD: KeyBinding = plain(KeyCode::Char('a'));
pub(crate) const EDIT: KeyBinding = plain(KeyCode::Char('e'));
pub(crate) const DELETE: KeyBinding = plain(KeyCode::Char('d'));
pub(crate) const REFRESH: KeyBinding = plain(KeyCode::Char('r'));
pub(crate) const QUIT: KeyBinding = plain(KeyCode::Char('q'));
pub(crate) const INTERRUPT: KeyBinding = ctrl(KeyCode::Char('c'));

// Form
pub(crate) const SUBMIT: KeyBinding = plain(KeyCode::Enter);
pub(crate) const CANCEL: KeyBinding = plain(KeyCode::Esc);
pub(crate) const NEXT_FIELD: KeyBinding = plain(KeyCode::Tab);
pub(crate) const PREV_FIELD: KeyBinding = shift(KeyCode::BackTab);

// Confirmation
pub(crate) const CONFIRM: KeyBinding = plain(KeyCode::Char('y'));
pub(crate) const DECLINE: KeyBinding = plain(KeyCode::Char('n'));

fn modifiers_to_string(modifiers: KeyModifiers) -> String {
    let mut result = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        result.push_str(CTRL_PREFIX);
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        result.push_str(SHIFT_PREFIX);
    }
    result
}

impl From<KeyBinding> for Span<'static> {
    fn from(binding: KeyBinding) -> Self {
        (&binding).into()
    }
}

impl From<&KeyBinding> for Span<'static> {
    fn from(binding: &KeyBinding) -> Self {
        let KeyBinding { key, modifiers } = binding;
        let modifiers = modifiers_to_string(*modifiers);
        let key = match key {
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Tab | KeyCode::BackTab => "tab".to_string(),
            KeyCode::Backspace => "backspace".to_string(),
            KeyCode::Delete => "delete".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            _ => format!("{key}").to_ascii_lowercase(),
        };
        Span::styled(format!("{modifiers}{key}"), key_hint_style())
    }
}

fn key_hint_style() -> Style {
    Style::default().bold()
}

/// Render `(binding, action)` pairs as a single footer line.
pub(crate) fn hint_line(hints: &[(KeyBinding, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (idx, (binding, action)) in hints.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(binding.into());
        spans.push(Span::raw(format!(" {action}")).dim());
    }
    Line::from(spans)
}

/// Check if modifiers include Ctrl or Alt (but not AltGr).
pub(crate) fn has_ctrl_or_alt(mods: KeyModifiers) -> bool {
    (mods.contains(KeyModifiers::CONTROL) || mods.contains(KeyModifiers::ALT)) && !is_altgr(mods)
}

/// Check if modifiers represent AltGr (Windows-specific: Ctrl+Alt).
#[cfg(windows)]
#[inline]
pub(crate) fn is_altgr(mods: KeyModifiers) -> bool {
    mods.contains(KeyModifiers::ALT) && mods.contains(KeyModifiers::CONTROL)
}

#[cfg(not(windows))]
#[inline]
pub(crate) fn is_altgr(_mods: KeyModifiers) -> bool {
    false
}
