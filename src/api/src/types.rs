//! Request and response types for the EPL API.

use serde::Serialize;
use serde_json::Value;

use crate::predictor::MatchPrediction;

/// Validated prediction request.
///
/// Built by hand from the raw JSON body so that type mismatches become
/// client errors with a readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictRequest {
    pub home_team: String,
    pub away_team: String,
    pub season: Option<i32>,
}

impl PredictRequest {
    pub fn from_json(body: &Value) -> Result<Self, String> {
        let home_team = body.get("homeTeam").and_then(Value::as_str);
        let away_team = body.get("awayTeam").and_then(Value::as_str);
        let (Some(home_team), Some(away_team)) = (home_team, away_team) else {
            return Err("homeTeam and awayTeam must be strings".to_string());
        };

        let season = match body.get("season") {
            None | Some(Value::Null) => None,
            Some(v) => {
                let season = v
                    .as_i64()
                    .and_then(|s| i32::try_from(s).ok())
                    .ok_or_else(|| "season must be an integer if provided".to_string())?;
                Some(season)
            }
        };

        Ok(Self {
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            season,
        })
    }
}

/// Outcome probabilities from the home side's point of view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Probabilities {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}

/// Prediction response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub home_team: String,
    pub away_team: String,
    pub season: i32,
    pub probs: Probabilities,
    pub predicted: String,
}

impl PredictResponse {
    pub fn new(req: PredictRequest, prediction: &MatchPrediction) -> Self {
        Self {
            home_team: req.home_team,
            away_team: req.away_team,
            season: prediction.season,
            probs: Probabilities {
                home_win: prediction.home_win,
                draw: prediction.draw,
                away_win: prediction.away_win,
            },
            predicted: prediction.predicted().label().to_string(),
        }
    }
}

/// Team list response
#[derive(Debug, Serialize)]
pub struct TeamsResponse {
    pub teams: Vec<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
