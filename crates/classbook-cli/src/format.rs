//! Small display helpers for table output.

use chrono::NaiveDateTime;
use classbook_core::models::Role;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None
pub fn optional(value: &Option<String>, default: &str) -> String {
    value.as_deref().unwrap_or(default).to_string()
}

/// Format a backend timestamp for display
pub fn date(value: &Option<NaiveDateTime>) -> String {
    value
        .map(|dt| dt.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format a 0-20 grade, or a dash when ungraded
pub fn grade(value: Option<f64>) -> String {
    value
        .map(|g| format!("{:.1}", g))
        .unwrap_or_else(|| "-".to_string())
}

pub fn role(role: Role) -> &'static str {
    match role {
        Role::Teacher => "teacher",
        Role::Student => "student",
    }
}
