//! Plain-text rendering for the terminal

use super::labels::Label;
use super::model::{ErrorPanel, ViewModel};
use std::fmt::Write;

const NAME_WIDTH: usize = 28;

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// Render the page as a text grid, one card per line
pub fn render_text(view: &ViewModel) -> String {
    let mut out = String::new();
    let lang = view.language;

    let _ = writeln!(out, "== {} ==", view.title);

    let tabs: Vec<String> = view
        .tabs
        .iter()
        .map(|t| {
            if t.active {
                format!("[{}]", t.label)
            } else {
                t.label.clone()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join(" | "));
    out.push('\n');

    if let Some(message) = &view.empty_message {
        let _ = writeln!(out, "  {}", message);
        return out;
    }

    for card in &view.cards {
        let marker = if card.unavailable { "x" } else { "*" };
        let _ = writeln!(
            out,
            "{} {} {:>9}  {} ({}: {})",
            marker,
            pad(&card.name, NAME_WIDTH),
            card.price,
            card.badge,
            Label::Stock.text(lang),
            card.stock
        );
        if !card.flavor.is_empty() {
            let _ = writeln!(out, "    {}", card.flavor);
        }
    }
    out
}

/// Render a load failure as a framed panel
pub fn render_error_text(panel: &ErrorPanel) -> String {
    let width = panel
        .title
        .chars()
        .count()
        .max(panel.detail.chars().count())
        + 4;
    let border = "!".repeat(width);
    format!(
        "{border}\n! {} !\n! {} !\n{border}\n",
        pad(&panel.title, width - 4),
        pad(&panel.detail, width - 4),
    )
}
