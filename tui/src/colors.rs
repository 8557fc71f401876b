//! Palette shared by the shell and the catalog views.

use ratatui::style::Color;

pub(crate) fn header_bg() -> Color {
    Color::Rgb(33, 37, 41)
}

pub(crate) fn text() -> Color {
    Color::White
}

pub(crate) fn text_dim() -> Color {
    Color::Gray
}

pub(crate) fn border() -> Color {
    Color::DarkGray
}

pub(crate) fn primary() -> Color {
    Color::Blue
}

pub(crate) fn error() -> Color {
    Color::Red
}

pub(crate) fn info() -> Color {
    Color::Cyan
}

/// Price badge background.
pub(crate) fn price_badge() -> Color {
    Color::Green
}

/// Stock badge background when the product has stock.
pub(crate) fn in_stock() -> Color {
    info()
}

/// Stock badge background when stock is zero.
pub(crate) fn out_of_stock() -> Color {
    error()
}

pub(crate) fn badge_text() -> Color {
    Color::Black
}
