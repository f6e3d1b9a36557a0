pub mod report;

use colored::Colorize;
use serde::Serialize;

use crate::person::Person;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Clone, Debug, Serialize)]
pub struct OutputRecord {
    pub key: String,
    pub first_name: String,
    pub last_name: String,
    pub headshot_url: String,
}

pub fn build_records(people: &[Person]) -> Vec<OutputRecord> {
    people
        .iter()
        .map(|p| OutputRecord {
            key: p.reconciliation_key(),
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            headshot_url: p.headshot_url.clone(),
        })
        .collect()
}

pub const HEADERS: [&str; 3] = ["Thumbnail", "First Name", "Last Name"];

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    let mut out = value.to_string();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}

/// Column-aligned table: thumbnail URL, first name, last name.
pub fn render_text(records: &[OutputRecord], color: bool) -> Vec<u8> {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for r in records {
        widths[0] = widths[0].max(r.headshot_url.chars().count());
        widths[1] = widths[1].max(r.first_name.chars().count());
        widths[2] = widths[2].max(r.last_name.chars().count());
    }

    let mut out = String::new();
    let header = HEADERS
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| {
            let cell = pad(h, *w);
            if color {
                cell.bold().white().to_string()
            } else {
                cell
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(header.trim_end());
    out.push('\n');

    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&rule);
    out.push('\n');

    for r in records {
        let thumb = pad(&r.headshot_url, widths[0]);
        let first = pad(&r.first_name, widths[1]);
        let last = pad(&r.last_name, widths[2]);
        let line = if color {
            format!("{}  {}  {}", thumb.dimmed(), first.cyan(), last.cyan())
        } else {
            format!("{thumb}  {first}  {last}")
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_json(records: &[OutputRecord]) -> Vec<u8> {
    serde_json::to_vec_pretty(records).unwrap_or_else(|_| b"[]\n".to_vec())
}

pub fn render_html(records: &[OutputRecord]) -> Vec<u8> {
    report::render_html(records)
}

pub fn render(format: OutputFormat, records: &[OutputRecord], color: bool) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(records, color),
        OutputFormat::Json => render_json(records),
        OutputFormat::Html => render_html(records),
    }
}

pub fn render_controls(color: bool) -> String {
    let controls = [
        ("/<text>", "search"),
        ("s", "shuffle"),
        ("f", "sort (first name)"),
        ("l", "sort (last name)"),
        ("q", "quit"),
    ];
    controls
        .iter()
        .map(|(key, what)| {
            if color {
                format!("[{}] {}", key.bold().green(), what)
            } else {
                format!("[{key}] {what}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}
