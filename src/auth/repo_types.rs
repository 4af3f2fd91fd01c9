use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,                     // unique user ID
    pub full_name: String,            // display name
    pub email: String,                // login identity, unique
    pub password_hash: String,        // Argon2 PHC string, never returned to clients
    pub created_at: OffsetDateTime,   // creation timestamp
}

/// Fields required to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
}
