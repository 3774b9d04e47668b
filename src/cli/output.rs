//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use chrono::{DateTime, Utc};
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Entry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_rotation(days: u32) -> String {
    if days == 0 {
        "-".to_string()
    } else {
        days.to_string()
    }
}

/// Print a table of entries (never their passwords or notes).
pub fn print_entries_table(entries: &[&Entry]) {
    if entries.is_empty() {
        info("No entries to show.");
        tip("Run `passvault add <TITLE>` to add your first entry.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Title",
        "User Name",
        "Modified",
        "Password Changed",
        "Rotate (days)",
    ]);

    for e in entries {
        table.add_row(vec![
            e.title.clone(),
            e.user.clone().unwrap_or_default(),
            format_date(e.modified_date),
            format_date(e.last_password_changed),
            format_rotation(e.change_password_in_days),
        ]);
    }

    println!("{table}");
}

/// Print entries that are due for rotation with their due date.
pub fn print_due_table(entries: &[&Entry]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Title", "Password Changed", "Due"]);

    for e in entries {
        table.add_row(vec![
            e.title.clone(),
            format_date(e.last_password_changed),
            e.password_expires_at()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "now".to_string()),
        ]);
    }

    println!("{table}");
}
