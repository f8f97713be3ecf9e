// Terminal rendering of the poll detail view

use poll_core::detail::{ERROR_HEADER, SUCCESS_BODY, SUCCESS_HEADER, WAITING_HEADER};
use poll_core::DetailView;
use serde_json::{json, Value};

/// Render the view as plain text.
pub fn render(view: &DetailView) -> String {
    let mut out = Vec::new();
    out.push(view.title.clone());
    out.push(format!("Poll {} expires at block {}", view.address, view.expiry_block_height));
    out.push(String::new());

    for row in &view.rows {
        let mark = if row.checked { "(x)" } else { "( )" };
        let lock = if row.disabled { " [locked]" } else { "" };
        out.push(format!("{} {}. {}{}", mark, row.index, row.label, lock));
    }

    if let Some(prompt) = &view.prompt {
        out.push(String::new());
        out.push(prompt.clone());
    }
    if view.can_vote {
        out.push("[Vote]".to_string());
    }

    if let Some(waiting) = view.waiting_message() {
        out.push(String::new());
        out.push(format!("{}: {}", WAITING_HEADER, waiting));
    }
    if let Some(error) = view.error_message() {
        out.push(String::new());
        out.push(format!("{}: {}", ERROR_HEADER, error));
    }
    if view.show_success() {
        out.push(String::new());
        out.push(format!("{} {}", SUCCESS_HEADER, SUCCESS_BODY));
    }

    if let Some(chart) = &view.chart {
        out.push(String::new());
        for ((label, value), color) in chart
            .labels()
            .iter()
            .zip(chart.values())
            .zip(chart.colors())
        {
            out.push(format!("  {} {} {}", color, value, label));
        }
    }

    out.join("\n")
}

/// Chart document for external renderers, `null` data before mount.
pub fn chart_json(view: &DetailView) -> Value {
    json!({
        "data": view.chart.as_ref().map(|c| c.to_chart_data()),
        "options": view.chart_options(),
    })
}
