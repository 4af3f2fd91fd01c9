//! Repository tests against a real Postgres. Run with
//! `DATABASE_URL=... cargo test -- --ignored`.

use blogmod::auth::repo::{PgUserRepo, UserRepo};
use blogmod::auth::repo_types::NewUser;
use blogmod::error::RepoError;
use blogmod::posts::repo::{PgPostRepo, PostRepo};
use blogmod::posts::repo_types::{NewPost, PostStatus};
use sqlx::PgPool;
use uuid::Uuid;

fn new_post(title: &str) -> NewPost {
    NewPost {
        title: title.into(),
        content: "C".into(),
        author: "Alice".into(),
        username: "alice".into(),
        image_url: None,
        category: "uncategorized".into(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_email_is_a_unique_violation(pool: PgPool) {
    let repo = PgUserRepo::new(pool);
    let user = NewUser {
        full_name: "First".into(),
        email: "dup@example.com".into(),
        password_hash: "$argon2id$stub".into(),
    };
    let first = repo.create(user.clone()).await.unwrap();

    let err = repo
        .create(NewUser {
            full_name: "Second".into(),
            ..user
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::UniqueViolation));

    let kept = repo.find_by_email("dup@example.com").await.unwrap().unwrap();
    assert_eq!(kept.id, first.id);
    assert_eq!(kept.full_name, "First");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn inserted_post_defaults_to_pending(pool: PgPool) {
    let repo = PgPostRepo::new(pool);
    let post = repo.insert(new_post("T")).await.unwrap();
    assert_eq!(post.status, PostStatus::Pending);

    let fetched = repo.get(post.id).await.unwrap().unwrap();
    assert_eq!(fetched.status, PostStatus::Pending);
    assert_eq!(fetched.category, "uncategorized");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn status_updates_report_affected_rows(pool: PgPool) {
    let repo = PgPostRepo::new(pool);
    let post = repo.insert(new_post("T")).await.unwrap();

    assert_eq!(repo.set_status(post.id, PostStatus::Approved).await.unwrap(), 1);
    // Same target status still matches the row.
    assert_eq!(repo.set_status(post.id, PostStatus::Approved).await.unwrap(), 1);
    assert_eq!(repo.set_status(post.id, PostStatus::Rejected).await.unwrap(), 1);
    assert_eq!(
        repo.get(post.id).await.unwrap().unwrap().status,
        PostStatus::Rejected
    );

    assert_eq!(repo.set_status(Uuid::new_v4(), PostStatus::Approved).await.unwrap(), 0);
    assert_eq!(repo.delete(post.id).await.unwrap(), 1);
    assert_eq!(repo.delete(post.id).await.unwrap(), 0);
    assert!(repo.get(post.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn listing_filters_by_status_newest_first(pool: PgPool) {
    let repo = PgPostRepo::new(pool.clone());
    let old = repo.insert(new_post("old")).await.unwrap();
    let new = repo.insert(new_post("new")).await.unwrap();
    let rejected = repo.insert(new_post("rejected")).await.unwrap();

    // Pin timestamps so ordering does not depend on clock resolution.
    for (id, offset) in [(old.id, 3), (new.id, 1), (rejected.id, 2)] {
        sqlx::query("UPDATE posts SET created_at = now() - make_interval(mins => $1) WHERE id = $2")
            .bind(offset)
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();
    }
    repo.set_status(old.id, PostStatus::Approved).await.unwrap();
    repo.set_status(new.id, PostStatus::Approved).await.unwrap();
    repo.set_status(rejected.id, PostStatus::Rejected).await.unwrap();

    let approved: Vec<_> = repo
        .list(Some(PostStatus::Approved))
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(approved, vec![new.id, old.id]);

    let all: Vec<_> = repo.list(None).await.unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(all, vec![new.id, rejected.id, old.id]);

    assert!(repo.list(Some(PostStatus::Pending)).await.unwrap().is_empty());
}
