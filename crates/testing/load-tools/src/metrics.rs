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

//! Run-wide play statistics, shared by every in-flight submission.

use std::sync::Mutex;
use tourney_client::PlayOutcome;

/// Point-in-time totals across every recorded play outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateStats {
    pub total_plays: u64,
    pub successful_plays: u64,
    pub failed_plays: u64,
    pub total_latency_ms: f64,
    pub max_latency_ms: f64,
    /// `f64::INFINITY` until the first outcome is recorded.
    pub min_latency_ms: f64,
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self {
            total_plays: 0,
            successful_plays: 0,
            failed_plays: 0,
            total_latency_ms: 0.0,
            max_latency_ms: 0.0,
            min_latency_ms: f64::INFINITY,
        }
    }
}

impl AggregateStats {
    fn apply(&mut self, outcome: &PlayOutcome) {
        self.total_plays += 1;
        if outcome.success {
            self.successful_plays += 1;
        } else {
            self.failed_plays += 1;
        }
        self.total_latency_ms += outcome.latency_ms;
        self.max_latency_ms = self.max_latency_ms.max(outcome.latency_ms);
        self.min_latency_ms = self.min_latency_ms.min(outcome.latency_ms);
    }

    /// `successful / total` as a fraction, or `None` before any play was recorded.
    pub fn success_rate(&self) -> Option<f64> {
        (self.total_plays > 0).then(|| self.successful_plays as f64 / self.total_plays as f64)
    }

    pub fn mean_latency_ms(&self) -> Option<f64> {
        (self.total_plays > 0).then(|| self.total_latency_ms / self.total_plays as f64)
    }

    /// Min latency, or `None` while it still holds its infinite sentinel.
    pub fn min_latency(&self) -> Option<f64> {
        self.min_latency_ms.is_finite().then_some(self.min_latency_ms)
    }
}

/// Accumulates [`AggregateStats`] from concurrently completing submissions.
///
/// All fields change together under one lock, so a snapshot never sees a partially applied
/// outcome.
#[derive(Debug, Default)]
pub struct MetricsAggregator {
    stats: Mutex<AggregateStats>,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, outcome: &PlayOutcome) {
        // Poisoning can only come from a panic mid-`apply`, which has no partial states worth
        // refusing; keep counting.
        let mut stats = self.stats.lock().unwrap_or_else(|e| e.into_inner());
        stats.apply(outcome);
    }

    pub fn snapshot(&self) -> AggregateStats {
        *self.stats.lock().unwrap_or_else(|e| e.into_inner())
    }
}
