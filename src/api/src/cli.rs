//! CLI commands for epl-api.
//!
//! Supports API server mode plus one-off predictions and team listing.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::predictor::{build_predictor, SharedPredictor};
use crate::types::{PredictRequest, PredictResponse, TeamsResponse};

#[derive(Parser)]
#[command(name = "epl-api")]
#[command(version, about = "Premier League match outcome prediction API and CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Match data CSV override
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Predict a single fixture
    Predict {
        /// Home team name
        #[arg(value_name = "HOME")]
        home: String,

        /// Away team name
        #[arg(value_name = "AWAY")]
        away: String,

        /// Season to report (defaults to the latest in the data)
        #[arg(short, long)]
        season: Option<i32>,

        /// Match data CSV override
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// List known teams
    Teams {
        /// Match data CSV override
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

/// Load configuration, applying a data path override if given.
pub fn load_config(data: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load()?;
    if let Some(path) = data {
        config.data.path = path.to_string_lossy().to_string();
    }
    Ok(config)
}

fn train(config: &AppConfig) -> anyhow::Result<SharedPredictor> {
    eprintln!("Loading matches from: {}", config.data.path);
    let predictor = build_predictor(&config.data.path, &config.data.competition)
        .with_context(|| format!("Failed to build predictor from {}", config.data.path))?;
    eprintln!(
        "Model trained on {} teams (latest season {})",
        predictor.teams().len(),
        predictor.latest_season()
    );
    Ok(predictor)
}

/// Run a single prediction and print it.
pub fn run_predict(
    home: String,
    away: String,
    season: Option<i32>,
    data: Option<PathBuf>,
    format: String,
) -> anyhow::Result<()> {
    let config = load_config(data)?;
    let predictor = train(&config)?;

    let req = PredictRequest {
        home_team: home,
        away_team: away,
        season,
    };
    let prediction = predictor.predict_match(&req.home_team, &req.away_team, req.season);
    let resp = PredictResponse::new(req, &prediction);

    match format.as_str() {
        "table" => print_prediction_table(&resp),
        _ => println!("{}", serde_json::to_string_pretty(&resp)?),
    }

    Ok(())
}

/// Print the team list as JSON.
pub fn run_teams(data: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(data)?;
    let predictor = train(&config)?;

    let resp = TeamsResponse {
        teams: predictor.teams().to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&resp)?);
    Ok(())
}

fn print_prediction_table(resp: &PredictResponse) {
    println!("\n{} vs {} (season {})", resp.home_team, resp.away_team, resp.season);
    println!("{}", "=".repeat(40));
    println!("{:<12} {:>10}", "Outcome", "Prob");
    println!("{}", "-".repeat(40));
    for (label, prob) in [
        ("homeWin", resp.probs.home_win),
        ("draw", resp.probs.draw),
        ("awayWin", resp.probs.away_win),
    ] {
        let marker = if label == resp.predicted { " *" } else { "" };
        println!("{:<12} {:>9.1}%{}", label, prob * 100.0, marker);
    }
}
