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

//! Drives a word tournament through several rounds of concurrent play and reports how the
//! service held up.

use clap::Parser;
use clap_derive::Parser;
use figment::{
    Figment,
    providers::{Format, Serialized, Yaml},
};
use serde_derive::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tourney_client::{ApiClient, ServerArgs};
use tourney_load_tools::logging::init_tracing;
use tourney_load_tools::report::{print_report, write_csv};
use tourney_load_tools::{LoadConfig, LoadRunner, RoundSettings};
use tracing::{info, warn};

#[derive(Clone, Parser, Debug, Serialize, Deserialize)]
struct Args {
    #[command(flatten)]
    #[serde(flatten)]
    server: ServerArgs,

    #[arg(long, help = "Number of simulated players", default_value = "50")]
    players: usize,

    #[arg(long, help = "Number of rounds to play", default_value = "3")]
    rounds: usize,

    #[arg(
        long,
        help = "Tournament name. Defaults to one derived from the player count and current time"
    )]
    tournament_name: Option<String>,

    #[arg(
        long,
        help = "How many players submit the round's optimal play instead of a random one",
        default_value = "0"
    )]
    optimal_players: usize,

    #[arg(
        long,
        help = "Delay after a round starts before plays are submitted, in milliseconds",
        default_value = "1000"
    )]
    settle_delay_ms: u64,

    #[arg(
        long,
        help = "Maximum random delay before each play submission, in milliseconds",
        default_value = "500"
    )]
    max_jitter_ms: u64,

    #[arg(
        long,
        help = "Pause between rounds, in milliseconds",
        default_value = "3000"
    )]
    inter_round_pause_ms: u64,

    #[arg(
        long,
        help = "Wait after the last round before reading server diagnostics, in milliseconds",
        default_value = "5000"
    )]
    drain_ms: u64,

    #[arg(long, help = "CSV output file for per-round results")]
    output_file: Option<PathBuf>,

    #[arg(long, help = "Enable debug logging", default_value = "false")]
    debug: bool,

    #[arg(long, help = "Yaml config file to use, overrides values in CLI args")]
    config_file: Option<String>,
}

impl Args {
    fn load_config(&self) -> LoadConfig {
        let tournament_name = self.tournament_name.clone().unwrap_or_else(|| {
            format!(
                "Load test - {} players - {}",
                self.players,
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            )
        });
        LoadConfig {
            tournament_name,
            player_names: LoadConfig::player_names(self.players),
            rounds: self.rounds,
            optimal_players: self.optimal_players,
            round: RoundSettings {
                settle_delay: Duration::from_millis(self.settle_delay_ms),
                max_jitter: Duration::from_millis(self.max_jitter_ms),
            },
            inter_round_pause: Duration::from_millis(self.inter_round_pause_ms),
            drain: Duration::from_millis(self.drain_ms),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), eyre::Report> {
    color_eyre::install()?;
    let cli_args = Args::parse();
    let config_file = cli_args.config_file.clone();
    let mut args_figment = Figment::new().merge(Serialized::defaults(cli_args));
    if let Some(config_file) = config_file {
        args_figment = args_figment.merge(Yaml::file(config_file));
    }
    let args = args_figment.extract::<Args>()?;

    init_tracing(args.debug)?;

    let config = args.load_config();
    if config.optimal_players > config.player_names.len() {
        warn!(
            "{} optimal players requested but only {} players configured",
            config.optimal_players,
            config.player_names.len()
        );
    }
    let api = ApiClient::from_args(&args.server)?;
    info!(
        "Load testing {} with {} players over {} rounds",
        api.base_url(),
        config.player_names.len(),
        config.rounds
    );

    let runner = LoadRunner::new(api, config);
    let report = runner.run().await?;
    print_report(&report);

    if let Some(output_file) = &args.output_file {
        write_csv(output_file, &report.rounds)?;
        info!(
            "Wrote {} rounds to {}",
            report.rounds.len(),
            output_file.display()
        );
    }

    Ok(())
}
