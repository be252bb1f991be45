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

use std::fmt::{Display, Formatter};
use std::time::Duration;

/// The tournament service operation a request was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateTournament,
    Enroll,
    StartRound,
    SubmitPlay,
    OptimalPlay,
    Leaderboard,
    QueueMetrics,
    Health,
    CacheStats,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::CreateTournament => "create tournament",
            Operation::Enroll => "enroll player",
            Operation::StartRound => "start round",
            Operation::SubmitPlay => "submit play",
            Operation::OptimalPlay => "optimal play",
            Operation::Leaderboard => "leaderboard",
            Operation::QueueMetrics => "queue metrics",
            Operation::Health => "health",
            Operation::CacheStats => "cache stats",
        };
        f.write_str(name)
    }
}

/// Errors from calls against the tournament service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Connection, DNS or I/O failure; no usable response was received.
    #[error("{operation}: transport failure: {message}")]
    Transport {
        operation: Operation,
        message: String,
    },
    /// No response within the bound for this call.
    #[error("{operation}: no response within {}ms", .after.as_millis())]
    Timeout {
        operation: Operation,
        after: Duration,
    },
    /// The service answered, but not with a well-formed success envelope.
    #[error("{operation}: rejected (status {}): {message}", fmt_status(.status))]
    Protocol {
        operation: Operation,
        status: Option<u16>,
        message: String,
    },
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(s) => s.to_string(),
        None => "-".to_string(),
    }
}

impl ApiError {
    pub fn operation(&self) -> Operation {
        match self {
            ApiError::Transport { operation, .. }
            | ApiError::Timeout { operation, .. }
            | ApiError::Protocol { operation, .. } => *operation,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }

    pub(crate) fn protocol(operation: Operation, status: Option<u16>, message: impl Into<String>) -> Self {
        ApiError::Protocol {
            operation,
            status,
            message: message.into(),
        }
    }

    /// Classify a reqwest failure. Timeouts raised by reqwest itself are reported against
    /// `bound`, the timeout that was configured on the request.
    pub(crate) fn from_reqwest(operation: Operation, bound: Duration, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ApiError::Timeout {
                operation,
                after: bound,
            };
        }
        ApiError::Transport {
            operation,
            message: e.to_string(),
        }
    }
}
