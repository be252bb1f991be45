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

//! An in-process, scriptable [`TournamentApi`] for driving the harness under a paused clock.

use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tourney_client::{
    ApiError, ApiResult, CacheHealth, CacheStats, HealthComponents, HealthReport,
    LeaderboardEntry, Operation, OptimalPlay, PlayRequest, PlayerId, Position, QueueMetrics,
    RoundHandle, ServerMetrics, TournamentApi, TournamentId,
};

/// How the fake answers one player's submissions.
#[derive(Debug, Clone)]
pub enum PlayScript {
    Answer(Duration),
    Reject(Duration, ApiError),
    Hang,
}

impl PlayScript {
    pub fn ok(after: Duration) -> Self {
        PlayScript::Answer(after)
    }

    pub fn hang() -> Self {
        PlayScript::Hang
    }

    pub fn transport_error() -> Self {
        PlayScript::Reject(
            Duration::ZERO,
            ApiError::Transport {
                operation: Operation::SubmitPlay,
                message: "connection refused".to_string(),
            },
        )
    }

    pub fn protocol_error(after: Duration) -> Self {
        PlayScript::Reject(
            after,
            ApiError::Protocol {
                operation: Operation::SubmitPlay,
                status: Some(400),
                message: "invalid placement".to_string(),
            },
        )
    }
}

/// Something the fake observed, in the order it observed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    RoundStartAttempt(usize),
    PlaySent(u32),
    PlayAnswered(u32),
}

#[derive(Default)]
struct Inner {
    start_attempts: usize,
    rounds_started: u32,
    round_started_at: Vec<Instant>,
    plays: Vec<PlayRequest>,
    play_times: Vec<Instant>,
    optimal_requests: usize,
    events: Vec<Event>,
}

pub struct FakeService {
    tournament: TournamentId,
    fail_create: bool,
    failing_names: HashSet<String>,
    failing_rounds: HashSet<usize>,
    fail_optimal: bool,
    fail_operational: bool,
    play_timeout: Duration,
    scripts: HashMap<String, PlayScript>,
    inner: Mutex<Inner>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            tournament: TournamentId::new("t-1"),
            fail_create: false,
            failing_names: HashSet::new(),
            failing_rounds: HashSet::new(),
            fail_optimal: false,
            fail_operational: false,
            play_timeout: Duration::from_secs(5),
            scripts: HashMap::new(),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// The id enrolled players get for `name`.
    pub fn player_id(name: &str) -> String {
        format!("id-{name}")
    }

    pub fn fail_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn fail_enroll(mut self, names: &[&str]) -> Self {
        self.failing_names
            .extend(names.iter().map(|n| n.to_string()));
        self
    }

    /// Reject the given round start attempts (1-based).
    pub fn fail_round_starts(mut self, attempts: &[usize]) -> Self {
        self.failing_rounds.extend(attempts.iter().copied());
        self
    }

    pub fn fail_optimal(mut self) -> Self {
        self.fail_optimal = true;
        self
    }

    pub fn fail_operational(mut self) -> Self {
        self.fail_operational = true;
        self
    }

    pub fn with_play_timeout(mut self, timeout: Duration) -> Self {
        self.play_timeout = timeout;
        self
    }

    pub fn script(mut self, player_id: &str, script: PlayScript) -> Self {
        self.scripts.insert(player_id.to_string(), script);
        self
    }

    pub fn tournament(&self) -> TournamentId {
        self.tournament.clone()
    }

    pub fn plays(&self) -> Vec<PlayRequest> {
        self.inner.lock().unwrap().plays.clone()
    }

    pub fn play_times(&self) -> Vec<Instant> {
        self.inner.lock().unwrap().play_times.clone()
    }

    pub fn round_started_at(&self, attempt: usize) -> Instant {
        self.inner.lock().unwrap().round_started_at[attempt]
    }

    pub fn start_attempts(&self) -> usize {
        self.inner.lock().unwrap().start_attempts
    }

    pub fn optimal_requests(&self) -> usize {
        self.inner.lock().unwrap().optimal_requests
    }

    pub fn events(&self) -> Vec<Event> {
        self.inner.lock().unwrap().events.clone()
    }

    fn rejected(operation: Operation, message: &str) -> ApiError {
        ApiError::Protocol {
            operation,
            status: Some(500),
            message: message.to_string(),
        }
    }
}

impl TournamentApi for FakeService {
    async fn create_tournament(&self, _: &str, _: &[String]) -> ApiResult<TournamentId> {
        if self.fail_create {
            return Err(Self::rejected(Operation::CreateTournament, "database offline"));
        }
        Ok(self.tournament.clone())
    }

    async fn enroll_player(&self, _: &TournamentId, player_name: &str) -> ApiResult<PlayerId> {
        if self.failing_names.contains(player_name) {
            return Err(ApiError::Protocol {
                operation: Operation::Enroll,
                status: Some(400),
                message: "duplicate player".to_string(),
            });
        }
        Ok(PlayerId::new(Self::player_id(player_name)))
    }

    async fn start_round(&self, _: &TournamentId) -> ApiResult<RoundHandle> {
        let mut inner = self.inner.lock().unwrap();
        inner.start_attempts += 1;
        let attempt = inner.start_attempts;
        inner.round_started_at.push(Instant::now());
        inner.events.push(Event::RoundStartAttempt(attempt));
        if self.failing_rounds.contains(&attempt) {
            return Err(Self::rejected(Operation::StartRound, "no rack available"));
        }
        inner.rounds_started += 1;
        let number = inner.rounds_started;
        Ok(RoundHandle {
            number,
            payload: json!({"number": number, "rack": "AEIRSTN"}),
        })
    }

    async fn send_play(&self, play: &PlayRequest) -> ApiResult<Value> {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.plays.push(play.clone());
            inner.play_times.push(Instant::now());
            inner.events.push(Event::PlaySent(play.round_number));
        }
        let script = self
            .scripts
            .get(play.player_id.as_str())
            .cloned()
            .unwrap_or(PlayScript::Answer(Duration::from_millis(10)));
        let result = match script {
            PlayScript::Answer(after) => {
                tokio::time::sleep(after).await;
                Ok(json!({"queued": true}))
            }
            PlayScript::Reject(after, e) => {
                tokio::time::sleep(after).await;
                Err(e)
            }
            PlayScript::Hang => std::future::pending().await,
        };
        self.inner
            .lock()
            .unwrap()
            .events
            .push(Event::PlayAnswered(play.round_number));
        result
    }

    async fn optimal_play(&self, _: &TournamentId, _: u32) -> ApiResult<OptimalPlay> {
        self.inner.lock().unwrap().optimal_requests += 1;
        if self.fail_optimal {
            return Err(Self::rejected(Operation::OptimalPlay, "solver busy"));
        }
        Ok(OptimalPlay {
            word: "ARISTON".to_string(),
            position: Position {
                row: 7,
                col: 4,
                down: false,
            },
            score: Some(72),
        })
    }

    async fn leaderboard(&self, _: &TournamentId) -> ApiResult<Vec<LeaderboardEntry>> {
        if self.fail_operational {
            return Err(Self::rejected(Operation::Leaderboard, "unavailable"));
        }
        Ok(vec![LeaderboardEntry {
            id: PlayerId::new("id-Player_01"),
            name: "Player_01".to_string(),
            total_score: 72,
        }])
    }

    async fn queue_metrics(&self) -> ApiResult<ServerMetrics> {
        if self.fail_operational {
            return Err(Self::rejected(Operation::QueueMetrics, "unavailable"));
        }
        let plays = self.inner.lock().unwrap().plays.len() as u64;
        Ok(ServerMetrics {
            queue_metrics: QueueMetrics {
                total_submitted: plays,
                total_processed: plays,
                total_failed: 0,
                avg_latency_ms: 12.5,
                max_latency_ms: 40.0,
                queue_size: 0,
            },
        })
    }

    async fn health(&self) -> ApiResult<HealthReport> {
        if self.fail_operational {
            return Err(Self::rejected(Operation::Health, "unavailable"));
        }
        Ok(HealthReport {
            healthy: true,
            components: HealthComponents {
                cache: CacheHealth {
                    total_entries: 4,
                    capacity_used: json!("0.4%"),
                },
            },
        })
    }

    async fn cache_stats(&self) -> ApiResult<CacheStats> {
        if self.fail_operational {
            return Err(Self::rejected(Operation::CacheStats, "unavailable"));
        }
        Ok(CacheStats {
            total_entries: 4,
            synced_entries: 3,
            unsynced_entries: 1,
        })
    }

    fn play_timeout(&self) -> Duration {
        self.play_timeout
    }
}
