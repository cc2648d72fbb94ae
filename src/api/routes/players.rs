use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::ladder::{rankings, RankingEntry};
use crate::models::Player;

#[derive(Debug, Serialize)]
pub struct PlayersResponse {
    pub players: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddPlayerRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct RankingsResponse {
    pub rankings: Vec<RankingEntry>,
}

pub async fn list_players(State(state): State<AppState>) -> Json<PlayersResponse> {
    let ladder = state.ladder.lock().await;
    Json(PlayersResponse {
        players: ladder
            .player_names()
            .into_iter()
            .map(String::from)
            .collect(),
    })
}

pub async fn add_player(
    State(state): State<AppState>,
    Json(request): Json<AddPlayerRequest>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let mut ladder = state.ladder.lock().await;
    let player = ladder.add_player(&request.name)?.clone();
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn get_rankings(State(state): State<AppState>) -> Json<RankingsResponse> {
    let ladder = state.ladder.lock().await;
    Json(RankingsResponse {
        rankings: rankings(ladder.players()),
    })
}
