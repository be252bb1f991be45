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

//! Request and response shapes for the tournament service.
//!
//! Identifiers are opaque to the harness: the service hands out UUID strings, but anything it
//! sends back as a JSON string or integer is accepted and echoed verbatim.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Str(s) if !s.is_empty() => Ok(s),
        Raw::Str(_) => Err(serde::de::Error::custom("empty identifier")),
        Raw::Int(i) => Ok(i.to_string()),
    }
}

macro_rules! opaque_id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(#[serde(deserialize_with = "opaque_id")] String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id_type!(TournamentId);
opaque_id_type!(PlayerId);

/// Board placement. Rows and columns are 0..=14 on the standard board; `down` is vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
    pub down: bool,
}

/// One player's play for a round, as posted to `/tournament/play/submit`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayRequest {
    pub tournament_id: TournamentId,
    pub player_id: PlayerId,
    pub round_number: u32,
    pub word: String,
    pub position: Position,
}

/// Terminal result of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayOutcome {
    pub success: bool,
    pub latency_ms: f64,
    /// Whether the failure was the timeout wall. Always false for successes.
    pub timed_out: bool,
}

impl PlayOutcome {
    pub fn succeeded(latency_ms: f64) -> Self {
        Self {
            success: true,
            latency_ms,
            timed_out: false,
        }
    }

    /// A failure that still produced a timing signal (the timeout wall).
    pub fn timed_out(timeout_ms: f64) -> Self {
        Self {
            success: false,
            latency_ms: timeout_ms,
            timed_out: true,
        }
    }

    /// A failure with no timing signal at all.
    pub fn failed() -> Self {
        Self {
            success: false,
            latency_ms: 0.0,
            timed_out: false,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateTournamentRequest<'a> {
    pub name: &'a str,
    pub player_names: &'a [String],
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedTournament {
    #[serde(alias = "id")]
    pub tournament_id: TournamentId,
}

/// The service reads `name`; older harnesses sent `player_name`. Both are sent.
#[derive(Debug, Serialize)]
pub(crate) struct EnrollRequest<'a> {
    pub tournament_id: &'a TournamentId,
    pub player_name: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Enrollment {
    pub player_id: PlayerId,
}

/// A started round: its number plus whatever else the service returned for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundHandle {
    pub number: u32,
    pub payload: Value,
}

impl RoundHandle {
    pub(crate) fn from_payload(payload: Value) -> Result<Self, String> {
        let number = payload
            .get("number")
            .ok_or_else(|| "round payload missing `number`".to_string())?
            .as_u64()
            .filter(|n| *n > 0 && *n <= u32::MAX as u64)
            .ok_or_else(|| "round `number` is not a positive integer".to_string())?;
        Ok(Self {
            number: number as u32,
            payload,
        })
    }

    /// The tiles dealt for the round, when the service reports them.
    pub fn rack(&self) -> Option<&str> {
        self.payload.get("rack").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OptimalPlay {
    pub word: String,
    pub position: Position,
    #[serde(default)]
    pub score: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeaderboardEntry {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub total_score: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueueMetrics {
    pub total_submitted: u64,
    pub total_processed: u64,
    pub total_failed: u64,
    pub avg_latency_ms: f64,
    pub max_latency_ms: f64,
    pub queue_size: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerMetrics {
    pub queue_metrics: QueueMetrics,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CacheHealth {
    pub total_entries: u64,
    /// Reported either as a ratio or a preformatted string, depending on the server build.
    pub capacity_used: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthComponents {
    pub cache: CacheHealth,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthReport {
    pub healthy: bool,
    pub components: HealthComponents,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CacheStats {
    pub total_entries: u64,
    pub synced_entries: u64,
    pub unsynced_entries: u64,
}
