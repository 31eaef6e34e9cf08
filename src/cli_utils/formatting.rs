use chrono::{DateTime, Utc};
use colored::Colorize;

/// Format a table with columns and rows
pub fn format_table(headers: Vec<&str>, rows: Vec<Vec<String>>) {
    let col_widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let mut width = header.chars().count();
            for row in &rows {
                if let Some(cell) = row.get(i) {
                    width = width.max(cell.chars().count());
                }
            }
            width
        })
        .collect();

    // Print header
    let header_line = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = col_widths[i]))
        .collect::<Vec<_>>()
        .join(" | ");

    println!("{}", header_line.bold());
    println!("{}", "-".repeat(header_line.len()));

    // Print rows
    for row in rows {
        let row_line = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:width$}", cell, width = col_widths.get(i).copied().unwrap_or(20)))
            .collect::<Vec<_>>()
            .join(" | ");
        println!("{}", row_line);
    }
}

/// Format a single record as key-value pairs
pub fn format_record(data: Vec<(&str, String)>) {
    let max_key_len = data.iter().map(|(k, _)| k.len()).max().unwrap_or(20);

    for (key, value) in data {
        let padded_key = format!("{:width$}", key, width = max_key_len);
        println!("  {}: {}", padded_key.bright_cyan(), value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tone {
    Success,
    Info,
    Failure,
}

/// One status line on stderr, prefixed and colored by tone
pub fn print_status(tone: Tone, message: &str) {
    let line = match tone {
        Tone::Success => format!("✓ {}", message).green(),
        Tone::Info => format!("ℹ {}", message).bright_cyan(),
        Tone::Failure => format!("✗ {}", message).red(),
    };
    eprintln!("{}", line);
}

/// Format a header
pub fn print_header(text: &str) {
    println!();
    println!("{}", text.bold().bright_cyan());
    println!("{}", "=".repeat(text.len()));
    println!();
}

/// Format datetime
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format an amount with 2 decimal places
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format an optional field, dimmed when absent
pub fn format_optional(value: Option<&str>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".dimmed().to_string(),
    }
}

/// Format a count
pub fn format_count(label: &str, count: usize) -> String {
    format!("{}: {}", label, count.to_string().bright_cyan())
}
