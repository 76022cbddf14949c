//! Output formatting helpers for CLI commands

use crate::history::Snapshot;
use crate::probe::StatusRecord;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use std::time::Duration;

/// Bar heights for sparklines; index 0 marks a down sample.
const SPARK_LEVELS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Status text in green when healthy, red otherwise.
pub fn status_string(text: &str, healthy: bool) -> String {
    let text = if text.is_empty() { "waiting" } else { text };
    if healthy {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}

/// Render latency samples as a sparkline scaled to the largest sample.
pub fn sparkline(samples: &[u64]) -> String {
    let max = samples.iter().copied().max().unwrap_or(0);
    samples
        .iter()
        .map(|&sample| {
            if sample == 0 || max == 0 {
                SPARK_LEVELS[0]
            } else {
                let level = (sample * 8).div_ceil(max).clamp(1, 8);
                SPARK_LEVELS[level as usize]
            }
        })
        .collect()
}

/// Format one-shot probe results as a table
pub fn format_records_table(records: &[StatusRecord]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["URL", "Status", "Latency"]);

    for r in records {
        let latency = if r.healthy {
            format!("{}ms", r.response_millis)
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            Cell::new(&r.url),
            Cell::new(status_string(&r.status_text, r.healthy)),
            Cell::new(latency).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

/// Format one-shot probe results as JSON
pub fn format_records_json(records: &[StatusRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

/// Format one dashboard frame from store snapshots
pub fn format_dashboard(rows: &[(String, Snapshot)], interval: Duration, timeout: Duration) -> String {
    let healthy = rows.iter().filter(|(_, s)| s.latest.healthy).count();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["URL", "Status", "Last", "Up avg", "History"]);

    for (url, snapshot) in rows {
        table.add_row(vec![
            Cell::new(url),
            Cell::new(status_string(
                &snapshot.latest.status_text,
                snapshot.latest.healthy,
            )),
            Cell::new(format!("{} ms", snapshot.latest.response_millis))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2} ms", snapshot.up_average()))
                .set_alignment(CellAlignment::Right),
            Cell::new(sparkline(&snapshot.window)),
        ]);
    }

    format!(
        "httpoll | {}/{} up | every {}s, timeout {}s | Ctrl-C to quit\n{}\n",
        healthy,
        rows.len(),
        interval.as_secs(),
        timeout.as_secs(),
        table
    )
}
