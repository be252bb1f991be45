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

//! One tournament round under load.
//!
//! A round starts on the service, waits out a settle delay, then fires one submission per
//! participant. Each submission sleeps its own random jitter first, so arrivals are staggered
//! without being serialized. The round only finishes once every submission has produced an
//! outcome.

use crate::bench_common::calculate_percentiles;
use crate::metrics::MetricsAggregator;
use crate::plays::{Participant, PlayerRole, build_play};
use futures::{StreamExt, stream::FuturesUnordered};
use rand::Rng;
use std::time::Duration;
use tokio::time::Instant;
use tourney_client::{PlayOutcome, TournamentApi, TournamentId};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSettings {
    /// Pause between the round starting and the first submission being issued.
    pub settle_delay: Duration,
    /// Upper bound of the uniform per-submission jitter.
    pub max_jitter: Duration,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(1),
            max_jitter: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    NotStarted,
    Started,
    Settling,
    Submitting,
    Joined,
    Reported,
    Failed,
}

impl RoundState {
    fn can_advance_to(self, next: RoundState) -> bool {
        use RoundState::*;
        matches!(
            (self, next),
            (NotStarted, Started)
                | (NotStarted, Failed)
                | (Started, Settling)
                | (Settling, Submitting)
                | (Submitting, Joined)
                | (Joined, Reported)
        )
    }
}

/// Latency over the outcomes that carried a timing signal (latency > 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySummary {
    pub count: usize,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub p50_ms: f64,
    pub p95_ms: f64,
}

impl LatencySummary {
    pub fn from_outcomes(outcomes: &[PlayOutcome]) -> Option<Self> {
        let samples: Vec<f64> = outcomes
            .iter()
            .map(|o| o.latency_ms)
            .filter(|l| *l > 0.0)
            .collect();
        if samples.is_empty() {
            return None;
        }
        let count = samples.len();
        let mean_ms = samples.iter().sum::<f64>() / count as f64;
        let min_ms = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let (p50_ms, p95_ms, _, max_ms) = calculate_percentiles(samples);
        Some(Self {
            count,
            mean_ms,
            min_ms,
            max_ms,
            p50_ms,
            p95_ms,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    /// 1-based position of this round within the run.
    pub ordinal: usize,
    /// `Reported` or `Failed`.
    pub state: RoundState,
    /// The service's own number for the round, once started.
    pub round_number: Option<u32>,
    pub rack: Option<String>,
    pub failure: Option<String>,
    pub submitted: usize,
    pub successful: usize,
    pub timed_out: usize,
    pub latency: Option<LatencySummary>,
    pub elapsed: Duration,
}

impl RoundReport {
    fn failed(ordinal: usize, failure: String, elapsed: Duration) -> Self {
        Self {
            ordinal,
            state: RoundState::Failed,
            round_number: None,
            rack: None,
            failure: Some(failure),
            submitted: 0,
            successful: 0,
            timed_out: 0,
            latency: None,
            elapsed,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.state == RoundState::Failed
    }

    pub fn failed_plays(&self) -> usize {
        self.submitted - self.successful
    }
}

/// Tracks a round through its states.
struct RoundProgress {
    ordinal: usize,
    state: RoundState,
}

impl RoundProgress {
    fn new(ordinal: usize) -> Self {
        Self {
            ordinal,
            state: RoundState::NotStarted,
        }
    }

    fn advance(&mut self, next: RoundState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal round transition {:?} -> {next:?}",
            self.state
        );
        debug!(round = self.ordinal, "{:?} -> {next:?}", self.state);
        self.state = next;
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, max: Duration) -> Duration {
    if max.is_zero() {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(rng.random_range(0.0..=max.as_secs_f64()))
}

pub struct RoundSimulator<'a, A> {
    api: &'a A,
    metrics: &'a MetricsAggregator,
    settings: RoundSettings,
}

impl<'a, A: TournamentApi> RoundSimulator<'a, A> {
    pub fn new(api: &'a A, metrics: &'a MetricsAggregator, settings: RoundSettings) -> Self {
        Self {
            api,
            metrics,
            settings,
        }
    }

    /// Run one round to completion. Failures never escape: a round that cannot be started is
    /// reported as `Failed`, and every submission problem becomes a failed outcome.
    pub async fn run(
        &self,
        tournament: &TournamentId,
        participants: &[Participant],
        ordinal: usize,
    ) -> RoundReport {
        let round_start = Instant::now();
        let mut progress = RoundProgress::new(ordinal);
        info!(
            "Round {ordinal}: starting with {} players",
            participants.len()
        );

        let handle = match self.api.start_round(tournament).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Round {ordinal}: unable to start: {e}");
                progress.advance(RoundState::Failed);
                return RoundReport::failed(ordinal, e.to_string(), round_start.elapsed());
            }
        };
        progress.advance(RoundState::Started);
        info!(
            "Round {ordinal}: started as round {} (rack {})",
            handle.number,
            handle.rack().unwrap_or("?")
        );

        progress.advance(RoundState::Settling);
        tokio::time::sleep(self.settings.settle_delay).await;

        let optimal = if participants.iter().any(|p| p.role == PlayerRole::Optimal) {
            match self.api.optimal_play(tournament, handle.number).await {
                Ok(best) => {
                    debug!(round = ordinal, word = %best.word, "optimal play");
                    Some(best)
                }
                Err(e) => {
                    warn!("Round {ordinal}: no optimal play, optimal players will improvise: {e}");
                    None
                }
            }
        } else {
            None
        };

        progress.advance(RoundState::Submitting);
        let plans: Vec<_> = {
            let mut rng = rand::rng();
            participants
                .iter()
                .map(|p| {
                    let delay = jitter(&mut rng, self.settings.max_jitter);
                    let play = build_play(&mut rng, tournament, handle.number, p, optimal.as_ref());
                    (p.player.name.as_str(), delay, play)
                })
                .collect()
        };

        let mut in_flight: FuturesUnordered<_> = plans
            .into_iter()
            .map(|(name, delay, play)| async move {
                tokio::time::sleep(delay).await;
                let outcome = self.api.submit_play(&play).await;
                self.metrics.record(&outcome);
                if outcome.timed_out {
                    warn!("Round {ordinal}: play from {name} timed out");
                } else if !outcome.success {
                    warn!("Round {ordinal}: play from {name} failed");
                }
                outcome
            })
            .collect();

        let mut outcomes = Vec::with_capacity(participants.len());
        while let Some(outcome) = in_flight.next().await {
            outcomes.push(outcome);
        }
        progress.advance(RoundState::Joined);

        let report = RoundReport {
            ordinal,
            state: RoundState::Reported,
            round_number: Some(handle.number),
            rack: handle.rack().map(str::to_string),
            failure: None,
            submitted: outcomes.len(),
            successful: outcomes.iter().filter(|o| o.success).count(),
            timed_out: outcomes.iter().filter(|o| o.timed_out).count(),
            latency: LatencySummary::from_outcomes(&outcomes),
            elapsed: round_start.elapsed(),
        };
        progress.advance(RoundState::Reported);

        info!(
            "Round {ordinal}: {}/{} plays succeeded",
            report.successful, report.submitted
        );
        if let Some(l) = &report.latency {
            info!(
                "Round {ordinal}: latency avg {:.2}ms, max {:.2}ms, min {:.2}ms",
                l.mean_ms, l.max_ms, l.min_ms
            );
        }
        report
    }
}
