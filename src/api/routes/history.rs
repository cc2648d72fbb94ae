use axum::extract::State;
use axum::Json;

use crate::api::state::AppState;
use crate::ladder::{series_for, HistorySeries};

pub async fn get_history(State(state): State<AppState>) -> Json<HistorySeries> {
    let ladder = state.ladder.lock().await;
    Json(series_for(ladder.players()))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_history_tracks_matches() {
        let app = app();
        post_json(
            app.clone(),
            "/api/matches",
            r#"{"player1":"Bob","player2":"Charlie","winner":"Charlie"}"#,
        )
        .await;

        let (status, json) = get_json(app, "/api/history").await;

        assert_eq!(status, StatusCode::OK);
        let series = json.as_array().unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0]["name"], "Alice");
        assert_eq!(series[0]["points"].as_array().unwrap().len(), 1);
        assert_eq!(series[2]["points"][1]["match"], 1);
        assert_eq!(series[2]["points"][1]["rating"], 1516);
    }
}
