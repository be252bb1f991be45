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

//! Shared utilities for latency summaries and report formatting

/// Calculate percentiles from a list of millisecond latencies.
/// Returns (p50, p95, p99, max), or zeros for an empty list.
pub fn calculate_percentiles(mut latencies: Vec<f64>) -> (f64, f64, f64, f64) {
    if latencies.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }

    latencies.sort_by(f64::total_cmp);
    let len = latencies.len();

    let p50 = latencies[len / 2];
    let p95 = latencies[(len * 95) / 100];
    let p99 = latencies[(len * 99) / 100];
    let max = latencies[len - 1];

    (p50, p95, p99, max)
}

/// Format a millisecond latency for display in report tables.
pub fn format_ms(ms: f64) -> String {
    if ms < 1.0 {
        format!("{:.1}µs", ms * 1000.0)
    } else if ms < 1000.0 {
        format!("{ms:.2}ms")
    } else {
        format!("{:.2}s", ms / 1000.0)
    }
}

/// Format a 0..=1 ratio as a percentage.
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}
