use unicode_width::UnicodeWidthChar;

use crate::tui::state::{DashboardApp, Phase};
use crate::users::{group_by_department, title_case};

pub const SEARCH_PLACEHOLDER: &str = "Search users...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub header_lines: Vec<String>,
    pub search_line: String,
    pub body_lines: Vec<String>,
}

/// Width-aware truncation to `max` terminal columns; cut content ends
/// in an ellipsis.
pub fn truncate_display(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let mut width = 0usize;
    let mut out = String::new();
    let mut cut = false;
    for ch in s.chars() {
        let ch_w = ch.width().unwrap_or(0);
        if ch_w == 0 {
            out.push(ch);
            continue;
        }
        if width + ch_w > max {
            cut = true;
            break;
        }
        out.push(ch);
        width += ch_w;
    }
    if cut {
        // make room for the one-column ellipsis
        while width + 1 > max {
            match out.pop() {
                Some(ch) => width -= ch.width().unwrap_or(0),
                None => break,
            }
        }
        out.push('…');
    }
    out
}

/// Pure projection of the app state onto terminal lines. Re-runs on
/// every draw; no side effects.
pub fn build_render_plan(app: &DashboardApp, w: u16, h: u16) -> RenderPlan {
    let w_usize = w as usize;
    let status_str = match &app.phase {
        Phase::Loading => "Loading",
        Phase::Error(_) => "Error",
        Phase::Loaded => "Ready",
    };
    let title = format!("user-dash — [{status_str}]  {} users", app.active_set().len());
    let sep = "-".repeat(w_usize);
    let header_lines = vec![
        format!("\r{}\n", truncate_display(&title, w_usize)),
        format!("\r{}\n", sep),
    ];

    let search = if app.input.is_empty() {
        format!("> {SEARCH_PLACEHOLDER}")
    } else {
        format!("> {}", app.input)
    };
    let search_line = format!("\r{}\n", truncate_display(&search, w_usize));

    let max_body_rows = h.saturating_sub(3) as usize;
    let mut body = Vec::new();
    match &app.phase {
        Phase::Loading => body.push("Loading...".to_string()),
        Phase::Error(msg) => body.push(format!("Error: {msg}")),
        Phase::Loaded => {
            for (dept, members) in group_by_department(app.active_set()) {
                body.push(title_case(dept.as_str()));
                for u in members {
                    body.push(format!("  {} {} - {}", u.first_name, u.last_name, u.email));
                }
                body.push(String::new());
            }
            // drop the trailing group separator
            if body.last().is_some_and(|l| l.is_empty()) {
                body.pop();
            }
        }
    }
    body.truncate(max_body_rows);
    let body_lines = body
        .into_iter()
        .map(|l| format!("\r{}\n", truncate_display(&l, w_usize)))
        .collect();

    RenderPlan {
        header_lines,
        search_line,
        body_lines,
    }
}
