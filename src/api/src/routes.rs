//! API route handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::predictor::SharedPredictor;
use crate::types::{ErrorResponse, HealthResponse, PredictRequest, PredictResponse, TeamsResponse};

/// Application state shared across handlers.
pub struct AppState {
    /// `None` when the predictor failed to load at startup.
    pub predictor: Option<SharedPredictor>,
}

impl AppState {
    fn predictor(&self) -> Result<&SharedPredictor, ApiError> {
        self.predictor
            .as_ref()
            .ok_or_else(|| ApiError::unavailable("Model not available"))
    }
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.status.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Team list endpoint.
pub async fn teams(State(state): State<Arc<AppState>>) -> Result<Json<TeamsResponse>, ApiError> {
    let predictor = state.predictor()?;
    Ok(Json(TeamsResponse {
        teams: predictor.teams().to_vec(),
    }))
}

/// Prediction endpoint.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<PredictResponse>, ApiError> {
    let predictor = state.predictor()?;
    let req = PredictRequest::from_json(&body).map_err(ApiError::bad_request)?;

    let prediction = predictor.predict_match(&req.home_team, &req.away_team, req.season);
    tracing::debug!(
        "{} vs {}: {:.3}/{:.3}/{:.3}",
        req.home_team,
        req.away_team,
        prediction.home_win,
        prediction.draw,
        prediction.away_win
    );

    Ok(Json(PredictResponse::new(req, &prediction)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{MatchRecord, Venue};
    use crate::outcome::Outcome;
    use crate::predictor::Predictor;
    use serde_json::json;

    fn trained_state() -> Arc<AppState> {
        let records = vec![
            MatchRecord {
                team: "Arsenal".to_string(),
                opponent: "Chelsea".to_string(),
                venue: Venue::Home,
                result: Outcome::Win,
                season: 2022,
            },
            MatchRecord {
                team: "Brentford".to_string(),
                opponent: "Arsenal".to_string(),
                venue: Venue::Home,
                result: Outcome::Loss,
                season: 2023,
            },
        ];
        let predictor = Predictor::train(&records).unwrap();
        Arc::new(AppState {
            predictor: Some(Arc::new(predictor)),
        })
    }

    fn empty_state() -> Arc<AppState> {
        Arc::new(AppState {
            predictor: None,
        })
    }

    #[tokio::test]
    async fn test_health() {
        let Json(resp) = health().await;
        assert_eq!(resp.status, "ok");
    }

    #[tokio::test]
    async fn test_teams() {
        let Json(resp) = teams(State(trained_state())).await.unwrap();
        assert_eq!(resp.teams, vec!["Arsenal", "Brentford"]);
    }

    #[tokio::test]
    async fn test_teams_unavailable_without_model() {
        let err = teams(State(empty_state())).await.unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_predict() {
        let body = json!({"homeTeam": "Arsenal", "awayTeam": "Chelsea"});
        let Json(resp) = predict(State(trained_state()), Json(body)).await.unwrap();

        assert_eq!(resp.home_team, "Arsenal");
        assert_eq!(resp.away_team, "Chelsea");
        assert_eq!(resp.season, 2023);
        let total = resp.probs.home_win + resp.probs.draw + resp.probs.away_win;
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(resp.predicted, "homeWin");
    }

    #[tokio::test]
    async fn test_predict_unknown_teams_is_not_an_error() {
        let body = json!({"homeTeam": "Nobody", "awayTeam": "Nowhere", "season": 2019});
        let Json(resp) = predict(State(trained_state()), Json(body)).await.unwrap();
        assert_eq!(resp.season, 2019);
        assert!(resp.probs.home_win > 0.0);
    }

    #[tokio::test]
    async fn test_predict_bad_request() {
        let body = json!({"homeTeam": "Arsenal", "awayTeam": 7});
        let err = predict(State(trained_state()), Json(body)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let body = json!({"homeTeam": "Arsenal", "awayTeam": "Chelsea", "season": "2020"});
        let err = predict(State(trained_state()), Json(body)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "season must be an integer if provided");
    }

    #[tokio::test]
    async fn test_predict_unavailable_without_model() {
        let body = json!({"homeTeam": "Arsenal", "awayTeam": "Chelsea"});
        let err = predict(State(empty_state()), Json(body)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
