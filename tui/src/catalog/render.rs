//! Drawing for the catalog body: state views, card grid, and overlays.

use catalog_client::Product;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap};

use super::{CatalogManager, CatalogMode, DraftField};
use crate::colors;
use crate::key_hint::{self, KeyBinding};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const MIN_CARD_WIDTH: u16 = 30;
const MAX_COLUMNS: usize = 4;
pub(crate) const CARD_HEIGHT: u16 = 9;

pub(crate) const LOADING_TEXT: &str = "Loading products from the catalog backend...";
pub(crate) const EMPTY_TITLE: &str = "No products found";
pub(crate) const EMPTY_HINT: &str = "Add your first product to get started!";
pub(crate) const NO_DESCRIPTION: &str = "No description available";
pub(crate) const DELETE_PROMPT: &str = "Are you sure you want to delete this product?";

/// Number of card columns that fit in `width`.
pub(crate) fn columns_for_width(width: u16) -> usize {
    usize::from(width / MIN_CARD_WIDTH).clamp(1, MAX_COLUMNS)
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl CatalogManager {
    /// Footer hints for whatever surface currently has focus.
    pub(crate) fn footer_hints(&self) -> Vec<(KeyBinding, &'static str)> {
        match self.mode() {
            CatalogMode::ConfirmDelete => {
                vec![(key_hint::CONFIRM, "delete"), (key_hint::DECLINE, "cancel")]
            }
            CatalogMode::Form => vec![
                (key_hint::NEXT_FIELD, "next field"),
                (key_hint::PREV_FIELD, "previous field"),
                (key_hint::SUBMIT, "save"),
                (key_hint::CANCEL, "cancel"),
            ],
            CatalogMode::Grid => {
                let mut hints = vec![(key_hint::ADD, "add product")];
                if !self.store.is_empty() {
                    hints.push((key_hint::EDIT, "edit"));
                    hints.push((key_hint::DELETE, "delete"));
                }
                hints.push((key_hint::REFRESH, "refresh"));
                if self.error().is_some() {
                    hints.push((key_hint::CANCEL, "dismiss error"));
                }
                hints.push((key_hint::QUIT, "quit"));
                hints
            }
        }
    }

    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer) {
        let mut body = area;
        if let Some(message) = self.error() {
            let [banner, rest] =
                Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
            render_error_banner(message, banner, buf);
            body = rest;
        }

        if self.is_loading() {
            self.render_loading(body, buf);
        } else if self.store.is_empty() {
            render_empty_state(body, buf);
        } else {
            self.render_grid(body, buf);
        }

        match self.mode() {
            CatalogMode::Form => self.render_form(area, buf),
            CatalogMode::ConfirmDelete => {
                let name = self
                    .pending_delete
                    .as_ref()
                    .and_then(|id| self.store.get(id))
                    .map(|product| product.name.as_str());
                render_confirm(name, area, buf);
            }
            CatalogMode::Grid => {}
        }
    }

    fn render_loading(&self, area: Rect, buf: &mut Buffer) {
        let frame = SPINNER[self.spinner_frame % SPINNER.len()];
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        Paragraph::new(Line::from(vec![
            Span::styled(frame, Style::default().fg(colors::primary())),
            Span::raw(" "),
            Span::styled(LOADING_TEXT, Style::default().fg(colors::text_dim())),
        ]))
        .alignment(Alignment::Center)
        .render(middle, buf);
    }

    fn render_grid(&self, area: Rect, buf: &mut Buffer) {
        let columns = columns_for_width(area.width);
        self.columns.set(columns);

        let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
        let selected_row = self.selected / columns;
        let first_row = selected_row.saturating_sub(visible_rows - 1);

        let card_width = area.width / columns as u16;
        for (index, product) in self.products().enumerate() {
            let row = index / columns;
            if row < first_row || row >= first_row + visible_rows {
                continue;
            }
            let col = (index % columns) as u16;
            let y = area.y + (row - first_row) as u16 * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
            if height < 3 {
                continue;
            }
            let card = Rect {
                x: area.x + col * card_width,
                y,
                width: card_width,
                height,
            };
            self.render_card(product, index == self.selected, card, buf);
        }
    }

    fn render_card(&self, product: &Product, selected: bool, area: Rect, buf: &mut Buffer) {
        let border_style = if selected {
            Style::default().fg(colors::primary())
        } else {
            Style::default().fg(colors::border())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style)
            .title(Span::styled(
                format!(" {} ", product.name),
                Style::default().fg(colors::text()).bold(),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        let [image_area, description_area, _, badges_area, _, actions_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let image = match product.image.as_deref() {
            Some(url) => Line::from(vec![Span::raw("▣ "), Span::raw(url.to_string())]),
            None => Line::from("▢ no image"),
        };
        Paragraph::new(image.fg(colors::text_dim())).render(image_area, buf);

        let description = match product.description.as_deref() {
            Some(text) => Paragraph::new(text.to_string()).fg(colors::text()),
            None => Paragraph::new(NO_DESCRIPTION).fg(colors::text_dim()).italic(),
        };
        description
            .wrap(Wrap { trim: true })
            .render(description_area, buf);

        let stock_bg = if product.in_stock() {
            colors::in_stock()
        } else {
            colors::out_of_stock()
        };
        let badge = Style::default().fg(colors::badge_text()).add_modifier(Modifier::BOLD);
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {}{} ", self.currency, product.price),
                badge.bg(colors::price_badge()),
            ),
            Span::raw("  "),
            Span::styled(format!(" Stock: {} ", product.stock), badge.bg(stock_bg)),
        ]))
        .render(badges_area, buf);

        let actions = key_hint::hint_line(&[(key_hint::EDIT, "Edit"), (key_hint::DELETE, "Delete")]);
        if selected {
            Paragraph::new(actions).render(actions_area, buf);
        } else {
            Paragraph::new(actions)
                .style(Style::default().fg(colors::border()))
                .render(actions_area, buf);
        }
    }

    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        // Border, two lines per field, blank, error, blank, actions.
        let height = 2 + DraftField::ALL.len() as u16 * 2 + 4;
        let modal = centered_rect(60, height, area);
        Clear.render(modal, buf);

        let title = if self.editing.is_some() {
            " Edit Product "
        } else {
            " Add New Product "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(colors::primary()))
            .title(Span::styled(title, Style::default().bold()));
        let inner = block.inner(modal);
        block.render(modal, buf);

        let mut lines: Vec<Line> = Vec::new();
        for field in DraftField::ALL {
            let focused = field == self.focus;
            let label_style = if focused {
                Style::default().fg(colors::primary()).bold()
            } else {
                Style::default().fg(colors::text_dim())
            };
            lines.push(Line::from(Span::styled(field.label(), label_style)));

            let value = self.draft.field(field);
            let mut spans = vec![Span::raw(if focused { "> " } else { "  " })];
            if value.is_empty() {
                if let Some(placeholder) = field.placeholder() {
                    spans.push(Span::styled(placeholder, Style::default().fg(colors::border())));
                }
            } else {
                spans.push(Span::raw(value.to_string()));
            }
            if focused {
                spans.push(Span::styled(" ", Style::default().reversed()));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        match self.form_error.as_deref().or(self.error()) {
            Some(message) => lines.push(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(colors::error()),
            ))),
            None => lines.push(Line::from("")),
        }
        lines.push(Line::from(""));

        let submit = if self.is_submitting() {
            "Saving..."
        } else if self.editing.is_some() {
            "Update Product"
        } else {
            "Create Product"
        };
        lines.push(key_hint::hint_line(&[
            (key_hint::SUBMIT, submit),
            (key_hint::CANCEL, "Cancel"),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }
}

fn render_error_banner(message: &str, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::error()));
    Paragraph::new(Line::from(vec![
        Span::styled(message.to_string(), Style::default().fg(colors::error())),
        Span::raw("  "),
        Span::from(key_hint::CANCEL),
        Span::raw(" dismiss").dim(),
    ]))
    .block(block)
    .render(area, buf);
}

fn render_empty_state(area: Rect, buf: &mut Buffer) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Fill(1),
    ])
    .areas(area);
    Paragraph::new(vec![
        Line::from(Span::styled(EMPTY_TITLE, Style::default().fg(colors::text()).bold())),
        Line::from(""),
        Line::from(Span::styled(EMPTY_HINT, Style::default().fg(colors::text_dim()))),
        Line::from(""),
        key_hint::hint_line(&[(key_hint::ADD, "Add Product")]),
    ])
    .alignment(Alignment::Center)
    .render(middle, buf);
}

fn render_confirm(name: Option<&str>, area: Rect, buf: &mut Buffer) {
    let dialog = centered_rect(DELETE_PROMPT.len() as u16 + 6, 7, area);
    Clear.render(dialog, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(colors::error()))
        .title(Span::styled(" Delete Product ", Style::default().bold()));
    Paragraph::new(vec![
        Line::from(DELETE_PROMPT),
        Line::from(Span::styled(name.unwrap_or_default().to_string(), Style::default().bold())),
        Line::from(""),
        key_hint::hint_line(&[(key_hint::CONFIRM, "Delete"), (key_hint::DECLINE, "Cancel")]),
    ])
    .alignment(Alignment::Center)
    .block(block)
    .render(dialog, buf);
}
