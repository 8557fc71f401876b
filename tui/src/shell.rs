//! Page scaffold around the catalog: brand header, hero text, footer hints.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::CatalogManager;
use crate::colors;
use crate::key_hint;

pub(crate) const BRAND: &str = "Product Management";
pub(crate) const NAV_ITEMS: [&str; 2] = ["Home", "Products"];
pub(crate) const HERO_TITLE: &str = "Welcome to Perlisyhl's Shop";
pub(crate) const HERO_TAGLINE: &str = "Beauty is the price we have to pay for brands";

pub(crate) fn render_shell(catalog: &CatalogManager, area: Rect, buf: &mut Buffer) {
    let [header, hero, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(header, buf);
    render_hero(hero, buf);
    catalog.render(body, buf);
    Paragraph::new(key_hint::hint_line(&catalog.footer_hints())).render(footer, buf);
}

fn render_header(area: Rect, buf: &mut Buffer) {
    Block::default()
        .style(Style::default().bg(colors::header_bg()))
        .render(area, buf);

    let nav: Vec<Span> = NAV_ITEMS
        .iter()
        .flat_map(|item| [Span::raw(*item).fg(colors::text_dim()), Span::raw("  ")])
        .collect();
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(nav_width())]).areas(area);

    Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(BRAND, Style::default().fg(colors::text()).bold()),
    ]))
    .render(left, buf);
    Paragraph::new(Line::from(nav)).render(right, buf);
}

fn nav_width() -> u16 {
    NAV_ITEMS.iter().map(|item| item.len() as u16 + 2).sum()
}

fn render_hero(area: Rect, buf: &mut Buffer) {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(HERO_TITLE, Style::default().fg(colors::text()).bold())),
        Line::from(Span::styled(HERO_TAGLINE, Style::default().fg(colors::text_dim()))),
    ])
    .alignment(Alignment::Center)
    .render(area, buf);
}
