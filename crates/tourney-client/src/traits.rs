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

//! The interface a load harness drives the tournament service through.

use crate::errors::ApiError;
use crate::model::{
    CacheStats, HealthReport, LeaderboardEntry, OptimalPlay, PlayOutcome, PlayRequest, PlayerId,
    RoundHandle, ServerMetrics, TournamentId,
};
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

pub type ApiResult<T> = Result<T, ApiError>;

/// Typed operations against the tournament service.
///
/// Implementations only need to provide the raw calls. [`TournamentApi::submit_play`] is provided
/// on top of [`TournamentApi::send_play`] so that every implementation times and classifies
/// submissions identically.
#[allow(async_fn_in_trait)]
pub trait TournamentApi {
    async fn create_tournament(&self, name: &str, player_names: &[String]) -> ApiResult<TournamentId>;

    async fn enroll_player(&self, tournament: &TournamentId, player_name: &str) -> ApiResult<PlayerId>;

    async fn start_round(&self, tournament: &TournamentId) -> ApiResult<RoundHandle>;

    /// Post one play. Returns the service's confirmation payload.
    async fn send_play(&self, play: &PlayRequest) -> ApiResult<Value>;

    async fn optimal_play(&self, tournament: &TournamentId, round_number: u32) -> ApiResult<OptimalPlay>;

    async fn leaderboard(&self, tournament: &TournamentId) -> ApiResult<Vec<LeaderboardEntry>>;

    async fn queue_metrics(&self) -> ApiResult<ServerMetrics>;

    async fn health(&self) -> ApiResult<HealthReport>;

    async fn cache_stats(&self) -> ApiResult<CacheStats>;

    /// Upper bound on a single submission.
    fn play_timeout(&self) -> Duration;

    /// Submit a play and reduce whatever happens to a single [`PlayOutcome`].
    ///
    /// Latency runs from just before the call to just after the response is observed. Hitting
    /// the timeout wall yields a failure whose latency is the timeout itself; any other failure
    /// yields a failure with zero latency, since no timing signal was obtained.
    async fn submit_play(&self, play: &PlayRequest) -> PlayOutcome {
        let bound = self.play_timeout();
        let timeout_ms = bound.as_secs_f64() * 1000.0;
        let start = Instant::now();
        match tokio::time::timeout(bound, self.send_play(play)).await {
            Ok(Ok(_)) => PlayOutcome::succeeded(start.elapsed().as_secs_f64() * 1000.0),
            Ok(Err(e)) if e.is_timeout() => {
                debug!(player = %play.player_id, "play timed out: {e}");
                PlayOutcome::timed_out(timeout_ms)
            }
            Ok(Err(e)) => {
                debug!(player = %play.player_id, "play failed: {e}");
                PlayOutcome::failed()
            }
            Err(_) => {
                debug!(player = %play.player_id, "play exceeded {}ms", bound.as_millis());
                PlayOutcome::timed_out(timeout_ms)
            }
        }
    }
}
