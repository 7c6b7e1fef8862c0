// crates/nostrust-cli/src/output.rs
//
// Rendering ranked trust reports as plain text, a table, or JSON.

use clap::ValueEnum;
use serde::Serialize;
use tabled::{Table, Tabled};

use nostrust_reputation::ranker::{format_report, RankedEntry};

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `npub  score  name` lines under a header.
    Plain,
    /// Pretty-printed table.
    Table,
    /// JSON for machine consumption.
    Json,
}

#[derive(Tabled)]
struct RatingRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Npub")]
    npub: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    threshold: f64,
    ratings: &'a [RankedEntry],
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Render a ranked report in the requested format.
pub fn render(entries: &[RankedEntry], format: OutputFormat, minimum_trust_score: f64) -> String {
    match format {
        OutputFormat::Plain => format_report(entries, minimum_trust_score),
        OutputFormat::Table => {
            let rows: Vec<RatingRow> = entries
                .iter()
                .enumerate()
                .map(|(i, entry)| RatingRow {
                    rank: i + 1,
                    npub: entry.npub.clone(),
                    score: format!("{:.10}", entry.score),
                    name: entry.label().to_string(),
                })
                .collect();
            format_table(&rows)
        }
        OutputFormat::Json => format_json(&JsonReport {
            threshold: minimum_trust_score,
            ratings: entries,
        }),
    }
}
