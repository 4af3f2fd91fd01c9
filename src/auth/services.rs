use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::auth::{
    dto::UserSummary,
    password::{hash_password, verify_password},
    repo::UserRepo,
    repo_types::NewUser,
};
use crate::error::{required, AppError, RepoError};

/// Password presence is checked without trimming: whitespace is a legal password.
fn required_password(value: Option<&str>) -> Result<&str, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::validation("password is required")),
    }
}

pub async fn register(
    users: &dyn UserRepo,
    full_name: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<Uuid, AppError> {
    let full_name = required(full_name, "fullName")?;
    let email = required(email, "email")?;
    let password = required_password(password)?;

    let password_hash = hash_password(password.to_string())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = users
        .create(NewUser {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await
        .map_err(|e| match e {
            RepoError::UniqueViolation => {
                warn!(%email, "email already registered");
                AppError::DuplicateEmail
            }
            other => AppError::Store(other),
        })?;

    info!(user_id = %user.id, "user registered");
    Ok(user.id)
}

pub async fn authenticate(
    users: &dyn UserRepo,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<UserSummary, AppError> {
    let email = required(email, "email")?;
    let password = required_password(password)?;

    // Unknown emails still pay for a full verification against a placeholder hash.
    let user = users.find_by_email(email).await?;
    let stored = user.as_ref().map(|u| u.password_hash.clone());
    let ok = verify_password(password.to_string(), stored).await.map_err(|e| {
        error!(error = %e, %email, "password verification failed");
        AppError::Internal(e.to_string())
    })?;

    let user = match user {
        Some(user) if ok => user,
        Some(user) => {
            debug!(user_id = %user.id, "login invalid password");
            return Err(AppError::InvalidCredentials);
        }
        None => {
            debug!(%email, "login unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    info!(user_id = %user.id, "user logged in");
    Ok(user.into())
}
