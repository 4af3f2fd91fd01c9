use tracing::info;
use uuid::Uuid;

use crate::error::{required, AppError};
use crate::posts::{
    dto::SubmitPostRequest,
    repo::PostRepo,
    repo_types::{NewPost, Post, PostStatus, DEFAULT_CATEGORY},
};

pub async fn submit(posts: &dyn PostRepo, req: SubmitPostRequest) -> Result<Uuid, AppError> {
    let new_post = NewPost {
        title: required(req.title.as_deref(), "title")?.to_string(),
        content: required(req.content.as_deref(), "content")?.to_string(),
        author: required(req.author.as_deref(), "author")?.to_string(),
        username: required(req.username.as_deref(), "username")?.to_string(),
        image_url: req
            .image_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty()),
        category: req
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
    };

    let post = posts.insert(new_post).await?;
    info!(post_id = %post.id, username = ?post.username, "post submitted for moderation");
    Ok(post.id)
}

pub async fn list_all(posts: &dyn PostRepo) -> Result<Vec<Post>, AppError> {
    Ok(posts.list(None).await?)
}

pub async fn list_by_status(
    posts: &dyn PostRepo,
    status: PostStatus,
) -> Result<Vec<Post>, AppError> {
    Ok(posts.list(Some(status)).await?)
}

pub async fn get(posts: &dyn PostRepo, id: Uuid) -> Result<Post, AppError> {
    posts.get(id).await?.ok_or(AppError::NotFound("post"))
}

pub async fn approve(posts: &dyn PostRepo, id: Uuid) -> Result<(), AppError> {
    moderate(posts, id, PostStatus::Approved).await
}

pub async fn reject(posts: &dyn PostRepo, id: Uuid) -> Result<(), AppError> {
    moderate(posts, id, PostStatus::Rejected).await
}

/// Unconditional overwrite: prior status is not checked.
async fn moderate(posts: &dyn PostRepo, id: Uuid, status: PostStatus) -> Result<(), AppError> {
    match posts.set_status(id, status).await? {
        0 => Err(AppError::NotFound("post")),
        _ => {
            info!(post_id = %id, %status, "post moderated");
            Ok(())
        }
    }
}

pub async fn delete(posts: &dyn PostRepo, id: Uuid) -> Result<(), AppError> {
    match posts.delete(id).await? {
        0 => Err(AppError::NotFound("post")),
        _ => {
            info!(post_id = %id, "post deleted");
            Ok(())
        }
    }
}
