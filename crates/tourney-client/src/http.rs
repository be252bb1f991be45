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

//! reqwest-backed [`TournamentApi`].

use crate::envelope::{decode_bare, decode_envelope, decode_envelope_value};
use crate::errors::{ApiError, Operation};
use crate::model::{
    CacheStats, CreateTournamentRequest, CreatedTournament, EnrollRequest, Enrollment,
    HealthReport, LeaderboardEntry, OptimalPlay, PlayRequest, PlayerId, RoundHandle,
    ServerMetrics, TournamentId,
};
use crate::server_args::ServerArgs;
use crate::traits::{ApiResult, TournamentApi};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::trace;

/// HTTP client for the tournament service. Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
    request_timeout: Duration,
    play_timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str, request_timeout: Duration, play_timeout: Duration) -> Result<Self, ApiError> {
        let transport_error = |message: String| ApiError::Transport {
            operation: Operation::CreateTournament,
            message,
        };
        // Joining relative paths onto a base without a trailing slash would drop its last segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized)
            .map_err(|e| transport_error(format!("invalid server url {base_url:?}: {e}")))?;
        let client = Client::builder()
            .build()
            .map_err(|e| transport_error(format!("unable to build http client: {e}")))?;
        Ok(Self {
            client,
            base,
            request_timeout,
            play_timeout,
        })
    }

    pub fn from_args(args: &ServerArgs) -> Result<Self, ApiError> {
        Self::new(&args.server_url, args.request_timeout(), args.play_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, operation: Operation, path: &str) -> ApiResult<Url> {
        self.base.join(path).map_err(|e| ApiError::Transport {
            operation,
            message: format!("invalid request path {path:?}: {e}"),
        })
    }

    /// Send the request with `bound` as its timeout and collect status and body.
    async fn exchange(
        &self,
        operation: Operation,
        request: RequestBuilder,
        bound: Duration,
    ) -> ApiResult<(u16, Vec<u8>)> {
        let response = request
            .timeout(bound)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(operation, bound, e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(operation, bound, e))?;
        trace!(%operation, status, bytes = body.len(), "response");
        Ok((status, body.to_vec()))
    }

    async fn get_bare<T: serde::de::DeserializeOwned>(&self, operation: Operation, path: &str) -> ApiResult<T> {
        let url = self.url(operation, path)?;
        let (status, body) = self
            .exchange(operation, self.client.get(url), self.request_timeout)
            .await?;
        decode_bare(operation, status, &body)
    }
}

impl TournamentApi for ApiClient {
    async fn create_tournament(&self, name: &str, player_names: &[String]) -> ApiResult<TournamentId> {
        let operation = Operation::CreateTournament;
        let url = self.url(operation, "tournament/create")?;
        let request = self
            .client
            .post(url)
            .json(&CreateTournamentRequest { name, player_names });
        let (status, body) = self.exchange(operation, request, self.request_timeout).await?;
        let created: CreatedTournament = decode_envelope(operation, status, &body)?;
        Ok(created.tournament_id)
    }

    async fn enroll_player(&self, tournament: &TournamentId, player_name: &str) -> ApiResult<PlayerId> {
        let operation = Operation::Enroll;
        let url = self.url(operation, "tournament/enroll")?;
        let request = self.client.post(url).json(&EnrollRequest {
            tournament_id: tournament,
            player_name,
            name: player_name,
        });
        let (status, body) = self.exchange(operation, request, self.request_timeout).await?;
        let enrollment: Enrollment = decode_envelope(operation, status, &body)?;
        Ok(enrollment.player_id)
    }

    async fn start_round(&self, tournament: &TournamentId) -> ApiResult<RoundHandle> {
        let operation = Operation::StartRound;
        let url = self.url(operation, &format!("tournament/{tournament}/round/start"))?;
        let (status, body) = self
            .exchange(operation, self.client.post(url), self.request_timeout)
            .await?;
        let payload = decode_envelope_value(operation, status, &body)?;
        RoundHandle::from_payload(payload)
            .map_err(|message| ApiError::protocol(operation, Some(status), message))
    }

    async fn send_play(&self, play: &PlayRequest) -> ApiResult<Value> {
        let operation = Operation::SubmitPlay;
        let url = self.url(operation, "tournament/play/submit")?;
        let request = self.client.post(url).json(play);
        let (status, body) = self.exchange(operation, request, self.play_timeout).await?;
        decode_envelope_value(operation, status, &body)
    }

    async fn optimal_play(&self, tournament: &TournamentId, round_number: u32) -> ApiResult<OptimalPlay> {
        let operation = Operation::OptimalPlay;
        let url = self.url(
            operation,
            &format!("tournament/{tournament}/round/{round_number}/optimal"),
        )?;
        let (status, body) = self
            .exchange(operation, self.client.get(url), self.request_timeout)
            .await?;
        decode_envelope(operation, status, &body)
    }

    async fn leaderboard(&self, tournament: &TournamentId) -> ApiResult<Vec<LeaderboardEntry>> {
        let operation = Operation::Leaderboard;
        let url = self.url(operation, &format!("tournament/{tournament}/leaderboard"))?;
        let (status, body) = self
            .exchange(operation, self.client.get(url), self.request_timeout)
            .await?;
        decode_envelope(operation, status, &body)
    }

    async fn queue_metrics(&self) -> ApiResult<ServerMetrics> {
        self.get_bare(Operation::QueueMetrics, "api/metrics").await
    }

    async fn health(&self) -> ApiResult<HealthReport> {
        self.get_bare(Operation::Health, "api/health").await
    }

    async fn cache_stats(&self) -> ApiResult<CacheStats> {
        self.get_bare(Operation::CacheStats, "api/cache/stats").await
    }

    fn play_timeout(&self) -> Duration {
        self.play_timeout
    }
}
