//! Backup session display formatting
//!
//! Formats backup sessions for terminal output in table and detail views.

use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::models::BackupSession;

/// Format backup sessions (newest first) as a table
///
/// `now` is the local wall-clock time used for the age column.
pub fn format_session_list(sessions: &[BackupSession], now: NaiveDateTime) -> String {
    if sessions.is_empty() {
        return "No backups found.".to_string();
    }

    let id_width = sessions
        .iter()
        .map(|s| s.id.to_string().len())
        .max()
        .unwrap_or(7)
        .max(7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>3}  {:<id_width$}  {:>6}  {:>10}  {:>6}\n",
        "#",
        "Session",
        "Files",
        "Size",
        "Age",
        id_width = id_width,
    ));
    output.push_str(&format!(
        "{:->3}  {:-<id_width$}  {:->6}  {:->10}  {:->6}\n",
        "",
        "",
        "",
        "",
        "",
        id_width = id_width,
    ));

    for (i, session) in sessions.iter().enumerate() {
        let age = session
            .created_at()
            .map(|created| format_age(now - created))
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&format!(
            "{:>3}  {:<id_width$}  {:>6}  {:>10}  {:>6}\n",
            i + 1,
            session.id.to_string(),
            session.file_count,
            format_size(session.size_bytes),
            age,
            id_width = id_width,
        ));
    }

    output.push_str(&format!("\n{} backup(s)\n", sessions.len()));
    output
}

/// Format one session with the files it holds
pub fn format_session_details(session: &BackupSession, files: &[PathBuf]) -> String {
    let mut output = String::new();
    output.push_str(&format!("Session: {}\n", session.id));
    output.push_str(&format!("Path:    {}\n", session.path.display()));
    if let Some(created) = session.created_at() {
        output.push_str(&format!("Created: {}\n", created.format("%Y-%m-%d %H:%M:%S")));
    }
    output.push_str(&format!(
        "Size:    {} in {} file(s)\n",
        format_size(session.size_bytes),
        session.file_count
    ));

    for file in files {
        if let Some(name) = file.file_name() {
            output.push_str(&format!("  {}\n", name.to_string_lossy()));
        }
    }
    output
}

/// Format a duration as a compact age such as "5m" or "3d"
pub fn format_age(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

/// Format a byte count in binary units
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
