//! Plain-text rendering of the console.

use crate::state::{ConsoleState, Phase};
use shadowgate_core::UserRecord;
use std::fmt::Write;

const HEADERS: [&str; 6] = ["ID", "USERNAME", "ROLE", "IN-GAME", "COMPANY", "CREATED"];
const GAP: &str = "  ";

/// Render the whole console: badge, error region, then the table.
pub fn render(state: &ConsoleState, badge: &str) -> String {
    let mut out = String::new();
    out.push_str(badge);
    out.push('\n');

    if let Some(target) = state.redirect() {
        let _ = writeln!(out, "Redirecting to the {target}.");
        return out;
    }

    if let Some(message) = state.error() {
        let _ = writeln!(out, "Error: {message}");
    }

    if state.phase() == Phase::Loading {
        out.push_str("Loading…\n");
    }

    if state.shows_empty_state() {
        out.push_str("No users found.\n");
    } else if !state.rows().is_empty() {
        out.push_str(&render_table(state.rows()));
    }

    out
}

/// Render rows as a column-aligned table with a header line.
pub fn render_table(rows: &[UserRecord]) -> String {
    let cells: Vec<[String; 6]> = rows.iter().map(row_cells).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn row_cells(user: &UserRecord) -> [String; 6] {
    [
        user.id.to_string(),
        user.username.clone(),
        user.role.clone(),
        user.ingame_username_display().to_string(),
        user.company_code_display().to_string(),
        user.created_at_display(),
    ]
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let mut line = String::new();
    for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        // `{:<width$}` pads by chars, which is what the widths count.
        let _ = write!(line, "{cell:<width$}");
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConsoleEvent;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use shadowgate_core::{Redirect, normalize_user_list};

    fn loaded(body: serde_json::Value) -> ConsoleState {
        ConsoleState::new()
            .reduce(ConsoleEvent::LoadRequested)
            .reduce(ConsoleEvent::LoadSucceeded(normalize_user_list(body).unwrap()))
    }

    #[test]
    fn test_render_table() {
        let state = loaded(json!([
            {"id": 1, "username": "alice", "role": "admin", "ingame_username": "Ali", "company_code": "ACME"},
            {"id": 22, "username": "bob", "role": "user"}
        ]));

        let expected = "\
Role: admin · root
ID  USERNAME  ROLE   IN-GAME  COMPANY  CREATED
1   alice     admin  Ali      ACME
22  bob       user
";
        assert_eq!(render(&state, "Role: admin · root"), expected);
    }

    #[test]
    fn test_render_empty_state() {
        let state = loaded(json!({"users": []}));
        assert_eq!(render(&state, "Role: admin"), "Role: admin\nNo users found.\n");
    }

    #[test]
    fn test_render_error_keeps_rows() {
        let state = loaded(json!([{"id": 3, "username": "c", "role": "user"}]))
            .reduce(ConsoleEvent::ActionFailed("not found".to_string()));

        let expected = "\
Role: admin
Error: not found
ID  USERNAME  ROLE  IN-GAME  COMPANY  CREATED
3   c         user
";
        assert_eq!(render(&state, "Role: admin"), expected);
    }

    #[test]
    fn test_render_loading() {
        let state = ConsoleState::new().reduce(ConsoleEvent::LoadRequested);
        assert_eq!(render(&state, "Role: admin"), "Role: admin\nLoading…\n");
    }

    #[test]
    fn test_render_redirect() {
        let state = ConsoleState::new().reduce(ConsoleEvent::LogoutRequested);
        assert_eq!(
            render(&state, "Role: admin"),
            format!("Role: admin\nRedirecting to the {}.\n", Redirect::Login)
        );
    }
}
