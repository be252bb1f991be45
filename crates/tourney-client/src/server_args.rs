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

use clap_derive::Parser;
use serde_derive::{Deserialize, Serialize};
use std::time::Duration;

/// Common command line arguments for tools talking to the tournament service
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
pub struct ServerArgs {
    #[arg(
        long,
        value_name = "server-url",
        help = "Base URL of the tournament service",
        default_value = "http://localhost:8080"
    )]
    pub server_url: String,

    #[arg(
        long,
        value_name = "request-timeout-ms",
        help = "Timeout for control calls (create, enroll, round start, metrics), in milliseconds",
        default_value = "10000"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long,
        value_name = "play-timeout-ms",
        help = "Timeout for a single play submission, in milliseconds",
        default_value = "5000"
    )]
    pub play_timeout_ms: u64,
}

impl ServerArgs {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn play_timeout(&self) -> Duration {
        Duration::from_millis(self.play_timeout_ms)
    }
}
