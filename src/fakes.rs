//! In-memory collaborators for unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::UserRepo;
use crate::auth::repo_types::{NewUser, User};
use crate::error::RepoError;
use crate::posts::repo::PostRepo;
use crate::posts::repo_types::{NewPost, Post, PostStatus};
use crate::storage::StorageClient;

#[derive(Default)]
pub struct MemoryUserRepo {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepo {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::UniqueViolation);
        }
        let row = User {
            id: Uuid::new_v4(),
            full_name: user.full_name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(row.clone());
        Ok(row)
    }
}

/// Rows are kept in insertion order, so reversing gives newest first even
/// when two posts share a timestamp.
#[derive(Default)]
pub struct MemoryPostRepo {
    posts: Mutex<Vec<Post>>,
}

#[async_trait]
impl PostRepo for MemoryPostRepo {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let row = Post {
            id: Uuid::new_v4(),
            title: post.title,
            content: post.content,
            author: post.author,
            username: Some(post.username),
            image_url: post.image_url,
            category: post.category,
            status: PostStatus::Pending,
            created_at: OffsetDateTime::now_utc(),
        };
        self.posts.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list(&self, status: Option<PostStatus>) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.lock().unwrap();
        Ok(posts
            .iter()
            .rev()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn set_status(&self, id: Uuid, status: PostStatus) -> Result<u64, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let mut affected = 0;
        for p in posts.iter_mut().filter(|p| p.id == id) {
            p.status = status;
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok((before - posts.len()) as u64)
    }
}

/// Records every presign request and returns a URL containing the key.
#[derive(Default)]
pub struct FakeStorage {
    calls: Mutex<Vec<(String, String, Duration)>>,
}

impl FakeStorage {
    pub fn calls(&self) -> Vec<(String, String, Duration)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageClient for FakeStorage {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> anyhow::Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((key.to_string(), content_type.to_string(), ttl));
        Ok(format!(
            "https://fake.local/{}?X-Amz-Expires={}",
            key,
            ttl.as_secs()
        ))
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://bucket.test/{key}")
    }
}

pub struct FailingStorage;

#[async_trait]
impl StorageClient for FailingStorage {
    async fn presign_put(&self, _k: &str, _ct: &str, _ttl: Duration) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("access denied"))
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://bucket.test/{key}")
    }
}
