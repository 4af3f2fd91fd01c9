use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RepoError;
use crate::posts::repo_types::{NewPost, Post, PostStatus};

/// Post persistence. Mutations return the number of affected rows so callers
/// can tell "no such post" apart from "already in that state".
#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Newest first; `None` lists every status.
    async fn list(&self, status: Option<PostStatus>) -> Result<Vec<Post>, RepoError>;

    async fn get(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    async fn set_status(&self, id: Uuid, status: PostStatus) -> Result<u64, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<u64, RepoError>;
}

#[derive(Clone)]
pub struct PgPostRepo {
    db: PgPool,
}

impl PgPostRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepo for PgPostRepo {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let row = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, author, username, image_url, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, content, author, username, image_url, category, status, created_at
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.author)
        .bind(&post.username)
        .bind(&post.image_url) // Option<String> → NULL allowed
        .bind(&post.category)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn list(&self, status: Option<PostStatus>) -> Result<Vec<Post>, RepoError> {
        let rows = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, author, username, image_url, category, status, created_at
              FROM posts
             WHERE $1::post_status IS NULL OR status = $1
             ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let row = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, author, username, image_url, category, status, created_at
              FROM posts
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn set_status(&self, id: Uuid, status: PostStatus) -> Result<u64, RepoError> {
        let res = sqlx::query("UPDATE posts SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepoError> {
        let res = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected())
    }
}
