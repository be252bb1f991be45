// Copyright (C) 2026 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Human and CSV renderings of a finished run.

use crate::bench_common::{format_ms, format_rate};
use crate::round::{LatencySummary, RoundReport, RoundState};
use crate::runner::LoadReport;
use serde_derive::Serialize;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tabled::{Table, Tabled};

/// How many leaderboard entries the text report shows.
const LEADERBOARD_TOP: usize = 5;

#[derive(Tabled)]
struct RoundRow {
    #[tabled(rename = "Round")]
    ordinal: usize,
    #[tabled(rename = "Server #")]
    round_number: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Plays")]
    submitted: usize,
    #[tabled(rename = "OK")]
    successful: usize,
    #[tabled(rename = "Failed")]
    failed: usize,
    #[tabled(rename = "Timeouts")]
    timed_out: usize,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "p50")]
    p50: String,
    #[tabled(rename = "p95")]
    p95: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "Wall Time")]
    wall_time: String,
}

impl From<&RoundReport> for RoundRow {
    fn from(r: &RoundReport) -> Self {
        let latency = |f: fn(&LatencySummary) -> f64| {
            r.latency
                .as_ref()
                .map(|l| format_ms(f(l)))
                .unwrap_or_else(|| "-".to_string())
        };
        Self {
            ordinal: r.ordinal,
            round_number: r
                .round_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            status: match r.state {
                RoundState::Failed => "failed".to_string(),
                _ => "ok".to_string(),
            },
            submitted: r.submitted,
            successful: r.successful,
            failed: r.failed_plays(),
            timed_out: r.timed_out,
            mean: latency(|l| l.mean_ms),
            p50: latency(|l| l.p50_ms),
            p95: latency(|l| l.p95_ms),
            min: latency(|l| l.min_ms),
            max: latency(|l| l.max_ms),
            wall_time: format!("{:.2}s", r.elapsed.as_secs_f64()),
        }
    }
}

/// One CSV record per round. Latency columns are empty when the round had no timing signal.
#[derive(Serialize)]
struct RoundRecord<'a> {
    round: usize,
    server_round: Option<u32>,
    state: &'a str,
    submitted: usize,
    successful: usize,
    failed: usize,
    timed_out: usize,
    mean_ms: Option<f64>,
    p50_ms: Option<f64>,
    p95_ms: Option<f64>,
    min_ms: Option<f64>,
    max_ms: Option<f64>,
    wall_time_ms: u64,
    failure: Option<&'a str>,
}

impl<'a> From<&'a RoundReport> for RoundRecord<'a> {
    fn from(r: &'a RoundReport) -> Self {
        Self {
            round: r.ordinal,
            server_round: r.round_number,
            state: if r.is_failed() { "failed" } else { "reported" },
            submitted: r.submitted,
            successful: r.successful,
            failed: r.failed_plays(),
            timed_out: r.timed_out,
            mean_ms: r.latency.map(|l| l.mean_ms),
            p50_ms: r.latency.map(|l| l.p50_ms),
            p95_ms: r.latency.map(|l| l.p95_ms),
            min_ms: r.latency.map(|l| l.min_ms),
            max_ms: r.latency.map(|l| l.max_ms),
            wall_time_ms: r.elapsed.as_millis() as u64,
            failure: r.failure.as_deref(),
        }
    }
}

/// Write one row per round to `path`, replacing whatever was there.
pub fn write_csv(path: &Path, rounds: &[RoundReport]) -> Result<(), eyre::Report> {
    let mut writer = csv::Writer::from_path(path)?;
    for round in rounds {
        writer.serialize(RoundRecord::from(round))?;
    }
    writer.flush()?;
    Ok(())
}

impl Display for LoadReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Load test report: tournament {} ===", self.tournament)?;
        writeln!(
            f,
            "Players enrolled: {}/{}",
            self.enrollment.players.len(),
            self.enrollment.requested()
        )?;
        for failure in &self.enrollment.failures {
            writeln!(f, "  not enrolled: {} ({})", failure.name, failure.error)?;
        }

        if !self.rounds.is_empty() {
            let rows: Vec<RoundRow> = self.rounds.iter().map(RoundRow::from).collect();
            writeln!(f, "{}", Table::new(&rows))?;
            for r in self.rounds.iter().filter(|r| r.is_failed()) {
                if let Some(why) = &r.failure {
                    writeln!(f, "  round {} failed: {why}", r.ordinal)?;
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "--- Server queue ---")?;
        match &self.server.metrics {
            Ok(m) => {
                let q = &m.queue_metrics;
                writeln!(
                    f,
                    "Submitted: {}  Processed: {}  Failed: {}  Queued: {}",
                    q.total_submitted, q.total_processed, q.total_failed, q.queue_size
                )?;
                writeln!(
                    f,
                    "Processing latency: avg {}, max {}",
                    format_ms(q.avg_latency_ms),
                    format_ms(q.max_latency_ms)
                )?;
            }
            Err(e) => writeln!(f, "unavailable: {e}")?,
        }

        writeln!(f, "--- Server health ---")?;
        match &self.server.health {
            Ok(h) => {
                writeln!(f, "Healthy: {}", h.healthy)?;
                writeln!(
                    f,
                    "Cache entries: {} (capacity used: {})",
                    h.components.cache.total_entries, h.components.cache.capacity_used
                )?;
            }
            Err(e) => writeln!(f, "unavailable: {e}")?,
        }

        writeln!(f, "--- Result cache ---")?;
        match &self.server.cache {
            Ok(c) => writeln!(
                f,
                "Entries: {}  Synced: {}  Unsynced: {}",
                c.total_entries, c.synced_entries, c.unsynced_entries
            )?,
            Err(e) => writeln!(f, "unavailable: {e}")?,
        }

        writeln!(f, "--- Leaderboard ---")?;
        match &self.leaderboard {
            Ok(entries) if entries.is_empty() => writeln!(f, "(empty)")?,
            Ok(entries) => {
                for (rank, entry) in entries.iter().take(LEADERBOARD_TOP).enumerate() {
                    writeln!(f, "{:>2}. {} {}", rank + 1, entry.name, entry.total_score)?;
                }
            }
            Err(e) => writeln!(f, "unavailable: {e}")?,
        }

        let stats = &self.stats;
        writeln!(f)?;
        writeln!(f, "--- Harness totals ---")?;
        writeln!(f, "Total plays: {}", stats.total_plays)?;
        writeln!(f, "Successful: {}", stats.successful_plays)?;
        writeln!(f, "Failed: {}", stats.failed_plays)?;
        if let Some(rate) = stats.success_rate() {
            writeln!(f, "Success rate: {}", format_rate(rate))?;
        }
        if let Some(mean) = stats.mean_latency_ms() {
            writeln!(f, "Mean latency: {}", format_ms(mean))?;
            writeln!(f, "Max latency: {}", format_ms(stats.max_latency_ms))?;
        }
        if let Some(min) = stats.min_latency() {
            writeln!(f, "Min latency: {}", format_ms(min))?;
        }
        Ok(())
    }
}

/// Print the final report to stdout.
pub fn print_report(report: &LoadReport) {
    println!("{report}");
}
