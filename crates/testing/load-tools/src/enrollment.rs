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

//! Concurrent registration of the simulated players.

use futures::future::join_all;
use tourney_client::{ApiError, PlayerId, TournamentApi, TournamentId};
use tracing::{info, warn};

/// A player the service accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentFailure {
    pub name: String,
    pub error: ApiError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrollment {
    /// In the order the names were requested.
    pub players: Vec<Player>,
    pub failures: Vec<EnrollmentFailure>,
}

impl Enrollment {
    pub fn requested(&self) -> usize {
        self.players.len() + self.failures.len()
    }
}

/// Enroll every name at once. Individual failures are logged and dropped; the phase as a whole
/// never fails, so the caller decides what a short roster means.
pub async fn enroll_players<A: TournamentApi>(
    api: &A,
    tournament: &TournamentId,
    names: &[String],
) -> Enrollment {
    info!("Enrolling {} players...", names.len());
    let attempts = names.iter().map(|name| async move {
        let result = api.enroll_player(tournament, name).await;
        (name, result)
    });

    let mut enrollment = Enrollment::default();
    for (name, result) in join_all(attempts).await {
        match result {
            Ok(id) => enrollment.players.push(Player {
                id,
                name: name.clone(),
            }),
            Err(error) => {
                warn!("Unable to enroll {name}: {error}");
                enrollment.failures.push(EnrollmentFailure {
                    name: name.clone(),
                    error,
                });
            }
        }
    }
    info!(
        "{} of {} players enrolled",
        enrollment.players.len(),
        names.len()
    );
    enrollment
}
