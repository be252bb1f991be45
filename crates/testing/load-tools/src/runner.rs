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

//! A full load run: one tournament, its players, and a fixed number of rounds.

use crate::enrollment::{Enrollment, enroll_players};
use crate::metrics::{AggregateStats, MetricsAggregator};
use crate::plays::assign_roles;
use crate::round::{RoundReport, RoundSettings, RoundSimulator};
use std::time::Duration;
use tourney_client::{
    ApiError, CacheStats, HealthReport, LeaderboardEntry, ServerMetrics, TournamentApi,
    TournamentId,
};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct LoadConfig {
    pub tournament_name: String,
    pub player_names: Vec<String>,
    pub rounds: usize,
    /// How many of the enrolled players submit the round's optimal play.
    pub optimal_players: usize,
    pub round: RoundSettings,
    /// Wait between consecutive rounds. Not applied after the last round.
    pub inter_round_pause: Duration,
    /// Wait after the last round before the service is inspected.
    pub drain: Duration,
}

impl LoadConfig {
    /// `Player_01`, `Player_02`, ...
    pub fn player_names(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("Player_{i:02}")).collect()
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            tournament_name: "Load test - 50 players".to_string(),
            player_names: Self::player_names(50),
            rounds: 3,
            optimal_players: 0,
            round: RoundSettings::default(),
            inter_round_pause: Duration::from_secs(3),
            drain: Duration::from_secs(5),
        }
    }
}

/// What the service reported about itself once the run finished. Each probe stands alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSnapshot {
    pub metrics: Result<ServerMetrics, ApiError>,
    pub health: Result<HealthReport, ApiError>,
    pub cache: Result<CacheStats, ApiError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub tournament: TournamentId,
    pub enrollment: Enrollment,
    pub rounds: Vec<RoundReport>,
    pub stats: AggregateStats,
    pub server: ServerSnapshot,
    pub leaderboard: Result<Vec<LeaderboardEntry>, ApiError>,
}

impl LoadReport {
    pub fn failed_rounds(&self) -> usize {
        self.rounds.iter().filter(|r| r.is_failed()).count()
    }
}

pub struct LoadRunner<A> {
    api: A,
    config: LoadConfig,
    metrics: MetricsAggregator,
}

impl<A: TournamentApi> LoadRunner<A> {
    pub fn new(api: A, config: LoadConfig) -> Self {
        Self {
            api,
            config,
            metrics: MetricsAggregator::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// Drive the whole run. Only failing to create the tournament aborts it; enrollment
    /// shortfalls, failed rounds and unreachable diagnostics all end up in the report.
    pub async fn run(&self) -> Result<LoadReport, ApiError> {
        let config = &self.config;
        info!(
            "Creating tournament '{}' for {} players",
            config.tournament_name,
            config.player_names.len()
        );
        let tournament = self
            .api
            .create_tournament(&config.tournament_name, &config.player_names)
            .await?;
        info!("Tournament created: {tournament}");

        let enrollment = enroll_players(&self.api, &tournament, &config.player_names).await;
        if enrollment.players.len() < config.player_names.len() {
            warn!(
                "Only {} of {} players enrolled, continuing with what we have",
                enrollment.players.len(),
                config.player_names.len()
            );
        }
        let participants = assign_roles(enrollment.players.clone(), config.optimal_players);

        let simulator = RoundSimulator::new(&self.api, &self.metrics, config.round);
        let mut rounds = Vec::with_capacity(config.rounds);
        for ordinal in 1..=config.rounds {
            rounds.push(simulator.run(&tournament, &participants, ordinal).await);
            if ordinal < config.rounds {
                info!(
                    "Pausing {}ms before round {}",
                    config.inter_round_pause.as_millis(),
                    ordinal + 1
                );
                tokio::time::sleep(config.inter_round_pause).await;
            }
        }

        info!(
            "Waiting {}ms for the service to drain its queue",
            config.drain.as_millis()
        );
        tokio::time::sleep(config.drain).await;

        let server = self.server_snapshot().await;
        let leaderboard = self.api.leaderboard(&tournament).await;
        if let Err(e) = &leaderboard {
            warn!("Leaderboard unavailable: {e}");
        }

        Ok(LoadReport {
            tournament,
            enrollment,
            rounds,
            stats: self.metrics.snapshot(),
            server,
            leaderboard,
        })
    }

    async fn server_snapshot(&self) -> ServerSnapshot {
        let (metrics, health, cache) = tokio::join!(
            self.api.queue_metrics(),
            self.api.health(),
            self.api.cache_stats()
        );
        for e in [metrics.as_ref().err(), health.as_ref().err(), cache.as_ref().err()]
            .into_iter()
            .flatten()
        {
            warn!("Diagnostics unavailable: {e}");
        }
        ServerSnapshot {
            metrics,
            health,
            cache,
        }
    }
}
