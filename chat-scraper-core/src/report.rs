// Report rendering for aggregated links

use crate::aggregate::{AggregationState, CategoryGroups};
use crate::error::Result;
use serde_json::{Map, Value, json};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

pub fn generate_report(state: &AggregationState, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(state)),
        ReportFormat::Json => generate_json_report(state),
    }
}

/// Counts followed by either the flat link list or, once the state has been
/// grouped, one numbered section per category.
pub fn generate_text_report(state: &AggregationState) -> String {
    let summary = state.summary();
    let mut report = String::new();

    report.push_str(&format!("OK: {} lines read\n", summary.lines_read));
    report.push_str(&format!("All discovered: {}\n", summary.discovered));
    if summary.skipped > 0 {
        report.push_str(&format!("Skipped invalid: {}\n", summary.skipped));
    }

    match state.groups() {
        Some(groups) => report.push_str(&format_groups(groups)),
        None => {
            report.push_str(&format!("Links showed: {}\n", summary.shown));
            report.push_str(&format_numbered(state.all()));
        }
    }

    report
}

pub fn generate_json_report(state: &AggregationState) -> Result<String> {
    let mut body = Map::new();
    body.insert("summary".to_string(), serde_json::to_value(state.summary())?);

    match state.groups() {
        Some(groups) => {
            let mut by_category = Map::new();
            for (category, urls) in groups.iter() {
                by_category.insert(category.as_str().to_string(), url_strings(urls));
            }
            body.insert("groups".to_string(), Value::Object(by_category));
        }
        None => {
            body.insert("links".to_string(), url_strings(state.all()));
        }
    }

    Ok(serde_json::to_string_pretty(&Value::Object(body))?)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn format_groups(groups: &CategoryGroups) -> String {
    let mut section = String::new();
    for (category, urls) in groups.iter() {
        section.push_str(&format!("\n {}\n", category.heading()));
        section.push_str(&format_numbered(urls));
    }
    section
}

fn format_numbered(urls: &[Url]) -> String {
    urls.iter()
        .enumerate()
        .map(|(idx, url)| format!("\t{}: {}\n", idx + 1, url))
        .collect()
}

fn url_strings(urls: &[Url]) -> Value {
    json!(urls.iter().map(Url::as_str).collect::<Vec<_>>())
}
