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

//! Client interfaces for the word tournament service.
//!
//! - [`traits`] - The [`TournamentApi`] seam load tools are written against.
//! - [`http`] - The reqwest implementation, [`ApiClient`].
//! - [`envelope`] - Fail-closed decoding of the service's `{success, data | error}` responses.

pub mod envelope;
pub mod errors;
pub mod http;
pub mod model;
pub mod server_args;
pub mod traits;

pub use errors::{ApiError, Operation};
pub use http::ApiClient;
pub use model::{
    CacheHealth, CacheStats, HealthComponents, HealthReport, LeaderboardEntry, OptimalPlay,
    PlayOutcome, PlayRequest, PlayerId, Position, QueueMetrics, RoundHandle, ServerMetrics,
    TournamentId,
};
pub use server_args::ServerArgs;
pub use traits::{ApiResult, TournamentApi};
