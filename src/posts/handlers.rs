use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    error::AppError,
    posts::{
        dto::{MessageResponse, SubmitPostRequest, SubmitPostResponse},
        repo_types::{Post, PostStatus},
        services,
    },
    state::AppState,
};

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(submit_post))
        .route("/posts/approved", get(list_approved).delete(no_such_post))
        .route("/posts/pending", get(list_pending).delete(no_such_post))
        .route("/posts/:id", get(get_post).delete(delete_post))
        .route("/posts/:id/approve", put(approve_post))
        .route("/posts/:id/reject", put(reject_post))
}

/// A path segment that is not a UUID cannot name a stored post.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("post"))
}

/// `DELETE` on a listing path names no post, same as a malformed id.
async fn no_such_post() -> AppError {
    AppError::NotFound("post")
}

#[instrument(skip(state, payload))]
pub async fn submit_post(
    State(state): State<AppState>,
    payload: Result<Json<SubmitPostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitPostResponse>), AppError> {
    let Json(payload) = payload?;
    let post_id = services::submit(state.posts.as_ref(), payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitPostResponse {
            message: "Post submitted for review",
            post_id,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(services::list_all(state.posts.as_ref()).await?))
}

#[instrument(skip(state))]
pub async fn list_approved(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(
        services::list_by_status(state.posts.as_ref(), PostStatus::Approved).await?,
    ))
}

#[instrument(skip(state))]
pub async fn list_pending(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(
        services::list_by_status(state.posts.as_ref(), PostStatus::Pending).await?,
    ))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(services::get(state.posts.as_ref(), id).await?))
}

#[instrument(skip(state))]
pub async fn approve_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    services::approve(state.posts.as_ref(), parse_id(&id)?).await?;
    Ok(Json(MessageResponse {
        message: "Post approved",
    }))
}

#[instrument(skip(state))]
pub async fn reject_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    services::reject(state.posts.as_ref(), parse_id(&id)?).await?;
    Ok(Json(MessageResponse {
        message: "Post rejected",
    }))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    services::delete(state.posts.as_ref(), parse_id(&id)?).await?;
    Ok(Json(MessageResponse {
        message: "Post deleted",
    }))
}
