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

//! A small stateful stand-in for the tournament service, served over real HTTP.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Knobs for the stand-in.
#[derive(Default, Clone)]
pub struct MockBehaviour {
    /// Names the service refuses to enroll.
    pub rejected_names: HashSet<String>,
    /// Players whose plays are answered only after `slow_delay`.
    pub slow_players: HashSet<String>,
    pub slow_delay: Duration,
    /// Round start calls (1-based) that fail.
    pub failing_round_starts: HashSet<usize>,
}

#[derive(Default)]
pub struct MockState {
    behaviour: MockBehaviour,
    enrolled: Mutex<Vec<String>>,
    start_calls: Mutex<usize>,
    active_round: Mutex<u32>,
    submitted: Mutex<u64>,
    out_of_round: Mutex<u64>,
}

impl MockState {
    pub fn submitted(&self) -> u64 {
        *self.submitted.lock().unwrap()
    }

    /// Plays that arrived for a round other than the active one.
    pub fn out_of_round(&self) -> u64 {
        *self.out_of_round.lock().unwrap()
    }

    pub fn enrolled(&self) -> Vec<String> {
        self.enrolled.lock().unwrap().clone()
    }
}

fn ok(data: Value) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({"success": true, "data": data, "error": null})),
    )
}

fn rejected(status: StatusCode, error: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({"success": false, "data": null, "error": error})),
    )
}

async fn create(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    ok(json!({"id": "t-load", "name": body["name"], "players": [], "status": "Pending"}))
}

async fn enroll(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    if state.behaviour.rejected_names.contains(&name) {
        return rejected(StatusCode::BAD_REQUEST, "Player already enrolled");
    }
    state.enrolled.lock().unwrap().push(name.clone());
    ok(json!({"player_id": format!("p-{name}"), "name": name}))
}

async fn start_round(
    State(state): State<Arc<MockState>>,
    Path(_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let call = {
        let mut calls = state.start_calls.lock().unwrap();
        *calls += 1;
        *calls
    };
    if state.behaviour.failing_round_starts.contains(&call) {
        return rejected(StatusCode::CONFLICT, "Previous round still active");
    }
    let number = {
        let mut active = state.active_round.lock().unwrap();
        *active += 1;
        *active
    };
    ok(json!({"number": number, "rack": "AEIRSTN", "status": "Active"}))
}

async fn submit(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    *state.submitted.lock().unwrap() += 1;
    let active = u64::from(*state.active_round.lock().unwrap());
    if body["round_number"].as_u64() != Some(active) {
        *state.out_of_round.lock().unwrap() += 1;
        return rejected(StatusCode::BAD_REQUEST, "Round not active");
    }
    let player = body["player_id"].as_str().unwrap_or_default();
    let name = player.strip_prefix("p-").unwrap_or(player);
    if state.behaviour.slow_players.contains(name) {
        tokio::time::sleep(state.behaviour.slow_delay).await;
    }
    ok(json!({"queued": true}))
}

async fn optimal(Path((_id, _round)): Path<(String, u32)>) -> (StatusCode, Json<Value>) {
    ok(json!({"word": "ARISTON", "position": {"row": 7, "col": 4, "down": false}, "score": 72}))
}

async fn leaderboard(
    State(state): State<Arc<MockState>>,
    Path(_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let entries: Vec<Value> = state
        .enrolled()
        .iter()
        .map(|name| json!({"id": format!("p-{name}"), "name": name, "total_score": 0}))
        .collect();
    ok(Value::Array(entries))
}

async fn metrics(State(state): State<Arc<MockState>>) -> Json<Value> {
    let submitted = state.submitted();
    Json(json!({"queue_metrics": {
        "total_submitted": submitted, "total_processed": submitted, "total_failed": 0,
        "avg_latency_ms": 3.0, "max_latency_ms": 9.0, "queue_size": 0
    }}))
}

async fn health() -> Json<Value> {
    Json(json!({"healthy": true, "components": {"cache": {"total_entries": 0, "capacity_used": "0.0%"}}}))
}

async fn cache_stats() -> Json<Value> {
    Json(json!({"total_entries": 0, "synced_entries": 0, "unsynced_entries": 0}))
}

/// Serve a fresh stand-in on an ephemeral port. Returns its base URL and shared state.
pub async fn spawn_service(behaviour: MockBehaviour) -> (String, Arc<MockState>) {
    let state = Arc::new(MockState {
        behaviour,
        ..MockState::default()
    });
    let router = Router::new()
        .route("/tournament/create", post(create))
        .route("/tournament/enroll", post(enroll))
        .route("/tournament/{id}/round/start", post(start_round))
        .route("/tournament/play/submit", post(submit))
        .route("/tournament/{id}/round/{round}/optimal", get(optimal))
        .route("/tournament/{id}/leaderboard", get(leaderboard))
        .route("/api/metrics", get(metrics))
        .route("/api/health", get(health))
        .route("/api/cache/stats", get(cache_stats))
        .with_state(state.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), state)
}
