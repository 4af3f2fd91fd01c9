use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::AppError,
    state::AppState,
    uploads::{
        dto::{UploadGrant, UploadGrantRequest},
        services,
    },
};

pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/s3-presigned-url", post(presigned_url))
}

#[instrument(skip(state, payload))]
pub async fn presigned_url(
    State(state): State<AppState>,
    payload: Result<Json<UploadGrantRequest>, JsonRejection>,
) -> Result<Json<UploadGrant>, AppError> {
    let Json(payload) = payload?;
    let grant = services::create_upload_grant(
        state.storage.as_ref(),
        payload.file_name.as_deref(),
        payload.file_type.as_deref(),
    )
    .await?;
    Ok(Json(grant))
}
