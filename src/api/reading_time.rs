use axum::{extract::State, http::Uri, Json};

use crate::{app::AppState, error::AppResult, model::ReadingTimeResponse, service};

pub async fn estimate(
    State(state): State<AppState>,
    uri: Uri,
) -> AppResult<Json<ReadingTimeResponse>> {
    let report = service::reading_time::analyze(&state.fetcher, uri.path()).await?;
    Ok(Json(report))
}
