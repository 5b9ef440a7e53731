//! Frequency-based match outcome predictor.
//!
//! Counts home-venue results league-wide, per (home, away) pair, per home
//! team and per away team, then blends the smoothed estimates for a fixture.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use crate::dataset::{load_matches, MatchRecord, Venue};
use crate::error::{PredictorError, Result};
use crate::outcome::{blend, to_probability, Outcome, OutcomeCounts, OutcomeDistribution};

/// Pseudo-count added to every outcome before normalising.
pub const SMOOTHING_ALPHA: f64 = 1.0;

/// Blend weights for league, pair, home team and away team estimates.
pub const BLEND_WEIGHTS: [f64; 4] = [0.2, 0.4, 0.25, 0.15];

/// Predicted outcome label, from the home side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictedOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl PredictedOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            PredictedOutcome::HomeWin => "homeWin",
            PredictedOutcome::Draw => "draw",
            PredictedOutcome::AwayWin => "awayWin",
        }
    }
}

/// Blended probabilities for one fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPrediction {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
    pub season: i32,
}

impl MatchPrediction {
    /// Most likely outcome. Ties go to the earliest of home win, draw, away win.
    pub fn predicted(&self) -> PredictedOutcome {
        let mut best = (PredictedOutcome::HomeWin, self.home_win);
        for candidate in [
            (PredictedOutcome::Draw, self.draw),
            (PredictedOutcome::AwayWin, self.away_win),
        ] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best.0
    }
}

/// Trained predictor. Immutable once built, so it can be shared freely
/// between request handlers.
#[derive(Debug, Clone)]
pub struct Predictor {
    teams: Vec<String>,
    latest_season: i32,
    league: OutcomeCounts,
    /// home team -> away team -> counts
    home_pair: HashMap<String, HashMap<String, OutcomeCounts>>,
    home_team: HashMap<String, OutcomeCounts>,
    away_team: HashMap<String, OutcomeCounts>,
}

impl Predictor {
    /// Build all frequency tables in a single pass over `records`.
    ///
    /// Each match is expected once, as its home side's row; away rows only
    /// feed the team list and latest season. The away side's table is
    /// inferred by inverting the home result.
    pub fn train(records: &[MatchRecord]) -> Result<Self> {
        let latest_season = records
            .iter()
            .map(|r| r.season)
            .max()
            .ok_or(PredictorError::InsufficientData)?;

        let teams: BTreeSet<&str> = records.iter().map(|r| r.team.as_str()).collect();

        let mut league = OutcomeCounts::default();
        let mut home_pair: HashMap<String, HashMap<String, OutcomeCounts>> = HashMap::new();
        let mut home_team: HashMap<String, OutcomeCounts> = HashMap::new();
        let mut away_team: HashMap<String, OutcomeCounts> = HashMap::new();

        for r in records.iter().filter(|r| r.venue == Venue::Home) {
            league.record(r.result);
            home_pair
                .entry(r.team.clone())
                .or_default()
                .entry(r.opponent.clone())
                .or_default()
                .record(r.result);
            home_team.entry(r.team.clone()).or_default().record(r.result);
            away_team
                .entry(r.opponent.clone())
                .or_default()
                .record(r.result.invert());
        }

        tracing::info!(
            "Trained on {} matches ({} home rows), {} teams, latest season {}",
            records.len(),
            league.total(),
            teams.len(),
            latest_season
        );

        Ok(Self {
            teams: teams.into_iter().map(str::to_string).collect(),
            latest_season,
            league,
            home_pair,
            home_team,
            away_team,
        })
    }

    /// Sorted names of every team that appears in the `team` column.
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn latest_season(&self) -> i32 {
        self.latest_season
    }

    #[cfg(test)]
    pub fn league_counts(&self) -> OutcomeCounts {
        self.league
    }

    pub fn pair_counts(&self, home: &str, away: &str) -> OutcomeCounts {
        self.home_pair
            .get(home)
            .and_then(|opponents| opponents.get(away))
            .copied()
            .unwrap_or_default()
    }

    pub fn home_counts(&self, team: &str) -> OutcomeCounts {
        self.home_team.get(team).copied().unwrap_or_default()
    }

    pub fn away_counts(&self, team: &str) -> OutcomeCounts {
        self.away_team.get(team).copied().unwrap_or_default()
    }

    /// Predict a fixture. Unknown teams fall back to zero counts, which
    /// smoothing turns into uniform estimates.
    ///
    /// `season` defaults to the latest season and is only echoed back.
    pub fn predict_match(&self, home: &str, away: &str, season: Option<i32>) -> MatchPrediction {
        let season = season.unwrap_or(self.latest_season);

        let estimates: [OutcomeDistribution; 4] = [
            to_probability(&self.league, SMOOTHING_ALPHA),
            to_probability(&self.pair_counts(home, away), SMOOTHING_ALPHA),
            to_probability(&self.home_counts(home), SMOOTHING_ALPHA),
            to_probability(&self.away_counts(away), SMOOTHING_ALPHA),
        ];
        let probs = blend(&estimates, &BLEND_WEIGHTS);

        MatchPrediction {
            home_win: probs.get(Outcome::Win),
            draw: probs.get(Outcome::Draw),
            away_win: probs.get(Outcome::Loss),
            season,
        }
    }
}

/// Thread-safe predictor handle for use in web handlers.
pub type SharedPredictor = Arc<Predictor>;

/// Load the dataset at `path` and train a shared predictor from it.
pub fn build_predictor<P: AsRef<Path>>(path: P, competition: &str) -> Result<SharedPredictor> {
    let records = load_matches(path, competition)?;
    let predictor = Predictor::train(&records)?;
    Ok(Arc::new(predictor))
}
