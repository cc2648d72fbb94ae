use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::ladder::{recent_matches, RecentMatch};

#[derive(Debug, Deserialize)]
pub struct ListMatchesParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    pub matches: Vec<RecentMatch>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct RecordMatchRequest {
    pub player1: String,
    pub player2: String,
    pub winner: String,
}

pub async fn list_matches(
    State(state): State<AppState>,
    Query(params): Query<ListMatchesParams>,
) -> Json<MatchesResponse> {
    let limit = params.limit.unwrap_or(state.recent_match_limit);
    let ladder = state.ladder.lock().await;
    Json(MatchesResponse {
        matches: recent_matches(ladder.matches(), limit),
        total: ladder.matches().len(),
    })
}

pub async fn record_match(
    State(state): State<AppState>,
    Json(request): Json<RecordMatchRequest>,
) -> Result<(StatusCode, Json<RecentMatch>), ApiError> {
    let mut ladder = state.ladder.lock().await;
    let record = ladder
        .recorder()
        .record_match(&request.player1, &request.player2, &request.winner)?;
    let number = ladder.matches().len();
    Ok((StatusCode::CREATED, Json(RecentMatch { number, record })))
}

pub async fn reset(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let mut ladder = state.ladder.lock().await;
    ladder.reset()?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use crate::storage::MemoryStore;
    use axum::http::StatusCode;

    const ALICE_BEATS_BOB: &str = r#"{"player1":"Alice","player2":"Bob","winner":"Alice"}"#;

    #[tokio::test]
    async fn test_record_match() {
        let (status, json) = post_json(app(), "/api/matches", ALICE_BEATS_BOB).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["number"], 1);
        assert_eq!(json["winner"], "Alice");
        assert_eq!(json["p1_rating_change"], 16);
        assert_eq!(json["p2_rating_change"], -16);
    }

    #[tokio::test]
    async fn test_record_match_validation() {
        let app = app();

        let (status, _) = post_json(
            app.clone(),
            "/api/matches",
            r#"{"player1":"Alice","player2":"Alice","winner":"Alice"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json(
            app.clone(),
            "/api/matches",
            r#"{"player1":"Alice","player2":"Bob","winner":"Charlie"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, json) = get_json(app, "/api/matches").await;
        assert_eq!(json["total"], 0);
    }

    #[tokio::test]
    async fn test_record_match_write_failure() {
        let mut backend = MemoryStore::new();
        backend.set_read_only(true);
        let app = app_with(backend);

        let (status, json) = post_json(app.clone(), "/api/matches", ALICE_BEATS_BOB).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "INTERNAL_ERROR");

        let (_, json) = get_json(app, "/api/rankings").await;
        assert_eq!(json["rankings"][0]["rating"], 1500);
    }

    #[tokio::test]
    async fn test_list_matches_limit() {
        let app = app();
        for _ in 0..3 {
            post_json(app.clone(), "/api/matches", ALICE_BEATS_BOB).await;
        }

        let (status, json) = get_json(app, "/api/matches?limit=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 3);
        let matches = json["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0]["number"], 3);
        assert_eq!(matches[1]["number"], 2);
    }

    #[tokio::test]
    async fn test_reset() {
        let app = app();
        post_json(app.clone(), "/api/players", r#"{"name":"Dana"}"#).await;
        post_json(app.clone(), "/api/matches", ALICE_BEATS_BOB).await;

        let (status, _) = post_json(app.clone(), "/api/reset", "").await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, json) = get_json(app.clone(), "/api/players").await;
        assert_eq!(json["players"], serde_json::json!(["Alice", "Bob", "Charlie"]));
        let (_, json) = get_json(app, "/api/matches").await;
        assert_eq!(json["total"], 0);
    }
}
