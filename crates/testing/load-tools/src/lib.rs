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

//! Load testing utilities for the word tournament service
//!
//! Drives many simulated players through enrollment and concurrent rounds of play against a
//! [`tourney_client::TournamentApi`], and measures what the service does under that load.

pub mod bench_common;
pub mod enrollment;
pub mod logging;
pub mod metrics;
pub mod plays;
pub mod report;
pub mod round;
pub mod runner;

#[cfg(test)]
mod testing;

pub use enrollment::{Enrollment, EnrollmentFailure, Player, enroll_players};
pub use metrics::{AggregateStats, MetricsAggregator};
pub use plays::{Participant, PlayerRole};
pub use round::{LatencySummary, RoundReport, RoundSettings, RoundSimulator, RoundState};
pub use runner::{LoadConfig, LoadReport, LoadRunner, ServerSnapshot};
