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

//! What each simulated player submits.

use crate::enrollment::Player;
use rand::Rng;
use tourney_client::{OptimalPlay, PlayRequest, Position, TournamentId};

/// Highest row/column index on the board.
pub const BOARD_MAX_INDEX: u8 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerRole {
    /// A random 5-8 letter word at a random placement.
    Random,
    /// The round's optimal play, when the service can tell us what it is.
    Optimal,
}

/// An enrolled player together with the role it plays every round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub player: Player,
    pub role: PlayerRole,
}

/// The first `optimal` players (in enrollment order) play optimally; the rest play randomly.
pub fn assign_roles(players: Vec<Player>, optimal: usize) -> Vec<Participant> {
    players
        .into_iter()
        .enumerate()
        .map(|(i, player)| Participant {
            player,
            role: if i < optimal {
                PlayerRole::Optimal
            } else {
                PlayerRole::Random
            },
        })
        .collect()
}

pub fn random_word<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.random_range(5..=8);
    (0..len)
        .map(|_| char::from(b'A' + rng.random_range(0..26u8)))
        .collect()
}

pub fn random_position<R: Rng + ?Sized>(rng: &mut R) -> Position {
    Position {
        row: rng.random_range(0..=BOARD_MAX_INDEX),
        col: rng.random_range(0..=BOARD_MAX_INDEX),
        down: rng.random_bool(0.5),
    }
}

/// Build the request `participant` sends for round `round_number`. Optimal participants fall
/// back to a random play when no optimal play is known for the round.
pub fn build_play<R: Rng + ?Sized>(
    rng: &mut R,
    tournament: &TournamentId,
    round_number: u32,
    participant: &Participant,
    optimal: Option<&OptimalPlay>,
) -> PlayRequest {
    let (word, position) = match (participant.role, optimal) {
        (PlayerRole::Optimal, Some(best)) => (best.word.clone(), best.position),
        _ => (random_word(rng), random_position(rng)),
    };
    PlayRequest {
        tournament_id: tournament.clone(),
        player_id: participant.player.id.clone(),
        round_number,
        word,
        position,
    }
}
