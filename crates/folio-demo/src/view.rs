#![forbid(unsafe_code)]

//! Pure text rendering of the demo model.
//!
//! [`render`] turns an [`AppModel`] into exactly `height` lines, each at most
//! `width` terminal columns wide. It never touches the terminal, so tests can
//! assert on the output directly.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::AppModel;

/// Marker drawn in front of the selected palette row.
pub const SELECTED_MARKER: &str = "> ";
const UNSELECTED_MARKER: &str = "  ";

/// Shown in the palette when the query matches no command.
pub const EMPTY_RESULTS: &str = "No commands found";

const HINTS: &str = "Ctrl+K commands  s scramble  q quit";

/// Render the model into `height` lines of at most `width` columns.
#[must_use]
pub fn render(model: &AppModel, width: u16, height: u16) -> Vec<String> {
    let width = usize::from(width);
    let height = usize::from(height);
    let mut lines: Vec<String> = Vec::with_capacity(height);

    lines.push(String::new());
    lines.push(centered("Hi, I'm Chetan", width));
    lines.push(centered(model.hero_text(), width));
    lines.push(String::new());

    if model.palette().is_open() {
        lines.extend(palette_lines(model, width));
    }

    let footer = match model.status() {
        Some(status) => format!("{HINTS}  |  {status}"),
        None => HINTS.to_owned(),
    };

    lines.truncate(height.saturating_sub(1));
    while lines.len() + 1 < height {
        lines.push(String::new());
    }
    if height > 0 {
        lines.push(footer);
    }
    lines.into_iter().map(|line| fit(&line, width)).collect()
}

/// Palette box: query line, grouped results, and a border.
fn palette_lines(model: &AppModel, width: usize) -> Vec<String> {
    let palette = model.palette();
    let inner = width.saturating_sub(4).min(56);
    let mut body = vec![format!("Search: {}_", palette.query()), String::new()];

    let groups = palette.grouped();
    if groups.is_empty() {
        body.push(EMPTY_RESULTS.to_owned());
    }
    for group in &groups {
        body.push(group.title().to_uppercase());
        for (offset, command) in group.commands.iter().enumerate() {
            let index = group.start_index + offset;
            let marker = if index == palette.selected_index() {
                SELECTED_MARKER
            } else {
                UNSELECTED_MARKER
            };
            let label = format!("{marker}{}", command.label());
            let row = match command.shortcut() {
                Some(hint) => right_align(&label, hint, inner),
                None => label,
            };
            body.push(row);
        }
    }

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(format!("+{}+", "-".repeat(inner + 2)));
    for row in body {
        lines.push(format!("| {} |", pad(&fit(&row, inner), inner)));
    }
    lines.push(format!("+{}+", "-".repeat(inner + 2)));
    lines
}

fn centered(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        return text.to_owned();
    }
    format!("{}{text}", " ".repeat((width - used) / 2))
}

fn right_align(left: &str, right: &str, width: usize) -> String {
    let gap = width.saturating_sub(left.width() + right.width()).max(1);
    format!("{left}{}{right}", " ".repeat(gap))
}

fn pad(text: &str, width: usize) -> String {
    let used = text.width();
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

/// Truncate `text` to at most `width` columns without splitting a wide char.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_owned();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
