//! Public advertisement endpoints.

use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use newsdesk_common::AppResult;
use newsdesk_db::entities::ad;
use serde::Deserialize;

use crate::{middleware::AppState, response::ApiResponse};

/// Placement slot query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdQuery {
    pub placement: String,
}

/// Active advertisements for a placement slot.
async fn list_active(
    State(state): State<AppState>,
    Query(query): Query<AdQuery>,
) -> AppResult<ApiResponse<Vec<ad::Model>>> {
    Ok(ApiResponse::ok(
        state.ad_service.list_active(&query.placement).await?,
    ))
}

/// Create the public ads router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_active))
}
