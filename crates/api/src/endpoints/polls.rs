//! Public poll endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use newsdesk_common::AppResult;
use newsdesk_core::poll::{PollWinner, PollWithDetails};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::ApiResponse,
};

/// Poll option with its tally.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOptionResponse {
    pub id: String,
    pub text: String,
    pub position: i32,
    pub vote_count: u64,
}

/// Poll with options and tallies.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: newsdesk_db::entities::poll::PollStatus,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub options: Vec<PollOptionResponse>,
    pub total_votes: u64,
    /// The requesting user's current choice, when authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voted_option_id: Option<String>,
}

impl PollResponse {
    pub(crate) fn from_details(details: PollWithDetails, viewer_id: Option<&str>) -> Self {
        let options = details
            .options
            .iter()
            .map(|option| PollOptionResponse {
                id: option.id.clone(),
                text: option.text.clone(),
                position: option.position,
                vote_count: details
                    .votes
                    .iter()
                    .filter(|v| v.option_id == option.id)
                    .count() as u64,
            })
            .collect();

        let voted_option_id = viewer_id.and_then(|user_id| {
            details
                .votes
                .iter()
                .find(|v| v.user_id == user_id)
                .map(|v| v.option_id.clone())
        });

        Self {
            id: details.poll.id,
            title: details.poll.title,
            description: details.poll.description,
            status: details.poll.status,
            start_date: details.poll.start_date.to_rfc3339(),
            end_date: details.poll.end_date.map(|d| d.to_rfc3339()),
            total_votes: details.votes.len() as u64,
            options,
            voted_option_id,
        }
    }
}

/// Winning option of a poll. `winner` is null for an option-less poll.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerResponse {
    pub winner: Option<PollOptionResponse>,
}

impl From<Option<PollWinner>> for WinnerResponse {
    fn from(winner: Option<PollWinner>) -> Self {
        Self {
            winner: winner.map(|w| PollOptionResponse {
                id: w.option.id,
                text: w.option.text,
                position: w.option.position,
                vote_count: w.vote_count,
            }),
        }
    }
}

/// Polls open for voting. An authenticated caller sees their own vote.
async fn list_active(
    MaybeAuthUser(maybe_user): MaybeAuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<PollResponse>>> {
    let viewer_id = maybe_user.map(|u| u.id);
    let polls = state.poll_service.list_active(viewer_id.as_deref()).await?;

    Ok(ApiResponse::ok(
        polls
            .into_iter()
            .map(|p| PollResponse::from_details(p, viewer_id.as_deref()))
            .collect(),
    ))
}

/// Pagination parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// All polls regardless of status, newest first.
async fn list_all(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<PageQuery>,
) -> AppResult<Json<newsdesk_common::Page<newsdesk_db::entities::poll::Model>>> {
    let result = state
        .poll_service
        .list_all(query.page.unwrap_or(1), query.limit.unwrap_or(20))
        .await?;
    Ok(Json(result))
}

/// The current winner of a poll.
async fn winner(
    State(state): State<AppState>,
    Path(poll_id): Path<String>,
) -> AppResult<ApiResponse<WinnerResponse>> {
    let winner = state.poll_service.winner(&poll_id).await?;
    Ok(ApiResponse::ok(winner.into()))
}

/// Vote request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub option_id: String,
}

/// Cast or change a vote.
async fn vote(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(poll_id): Path<String>,
    Json(req): Json<VoteRequest>,
) -> AppResult<ApiResponse<PollResponse>> {
    let details = state
        .poll_service
        .vote(&poll_id, &req.option_id, &user.id)
        .await?;

    Ok(ApiResponse::ok(PollResponse::from_details(
        details,
        Some(&user.id),
    )))
}

/// Retract a vote.
async fn unvote(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(poll_id): Path<String>,
) -> AppResult<ApiResponse<PollResponse>> {
    let details = state.poll_service.remove_vote(&poll_id, &user.id).await?;

    Ok(ApiResponse::ok(PollResponse::from_details(
        details,
        Some(&user.id),
    )))
}

/// Create the public poll router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_active))
        .route("/all", get(list_all))
        .route("/{id}/winner", get(winner))
        .route("/{id}/vote", post(vote))
        .route("/{id}/vote", delete(unvote))
}
