use axum::{extract::State, Json};
use fincheck_core::AnalysisRecord;

use super::{map_db_error, ApiError, AppState};

/// `GET /results`: every stored analysis, newest first, unpaginated.
pub(super) async fn list_results(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnalysisRecord>>, ApiError> {
    let records = fincheck_db::list_analyses(&state.pool)
        .await
        .map_err(|e| map_db_error(&e))?;

    tracing::debug!(count = records.len(), "listing analyses");
    Ok(Json(records))
}
