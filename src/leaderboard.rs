//! Home-page leaderboard
//!
//! Derived from the users table on every visit; never written back.

use chrono::{DateTime, Utc};

use crate::users::UserTable;

/// Shown for a missing name or a user who never logged in
pub const PLACEHOLDER: &str = "—";

/// One leaderboard line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub name: String,
    pub ball: u32,
    pub dodge: u32,
    /// Best of both games, the sort key
    pub best: u32,
    pub last_login: String,
}

impl DisplayRow {
    /// `<tr>` with name, ball score, dodge score and last login
    pub fn to_html(&self) -> String {
        format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&self.name),
            self.ball,
            self.dodge,
            escape_html(&self.last_login)
        )
    }
}

/// Rows sorted by best score, highest first; equal scores keep table order
pub fn render(table: &UserTable) -> Vec<DisplayRow> {
    let mut rows: Vec<DisplayRow> = table
        .iter()
        .map(|u| DisplayRow {
            name: if u.name.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                u.name.clone()
            },
            ball: u.high_score_ball,
            dodge: u.high_score_dodge,
            best: u.best(),
            last_login: u
                .last_login()
                .map(format_login)
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        })
        .collect();
    // sort_by is stable
    rows.sort_by(|a, b| b.best.cmp(&a.best));
    rows
}

/// All rows as table-body HTML
pub fn to_html(rows: &[DisplayRow]) -> String {
    rows.iter().map(DisplayRow::to_html).collect()
}

/// Login instant as `dd/mm/yyyy, hh:mm:ss` (UTC)
pub fn format_login(ts: &DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y, %H:%M:%S").to_string()
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
