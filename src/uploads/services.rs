use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{error, info};

use crate::error::{required, AppError};
use crate::storage::StorageClient;
use crate::uploads::dto::UploadGrant;

const KEY_PREFIX: &str = "posts";

/// Lifetime of an upload URL.
pub const UPLOAD_URL_TTL: Duration = Duration::from_secs(5 * 60);

/// Collapses whitespace runs to `_`, then drops anything outside `[A-Za-z0-9._-]`.
pub fn sanitize_file_name(name: &str) -> String {
    lazy_static! {
        static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
        static ref DISALLOWED_RE: Regex = Regex::new(r"[^A-Za-z0-9._-]").unwrap();
    }
    let underscored = WHITESPACE_RE.replace_all(name, "_");
    DISALLOWED_RE.replace_all(&underscored, "").into_owned()
}

pub fn object_key(epoch_millis: i128, file_name: &str) -> String {
    format!("{KEY_PREFIX}/{epoch_millis}-{}", sanitize_file_name(file_name))
}

fn now_millis() -> i128 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}

pub async fn create_upload_grant(
    storage: &dyn StorageClient,
    file_name: Option<&str>,
    file_type: Option<&str>,
) -> Result<UploadGrant, AppError> {
    let file_name = required(file_name, "fileName")?;
    let file_type = required(file_type, "fileType")?;

    let key = object_key(now_millis(), file_name);
    let upload_url = storage
        .presign_put(&key, file_type, UPLOAD_URL_TTL)
        .await
        .map_err(|e| {
            error!(error = %e, %key, "presign upload failed");
            AppError::StorageAuth(format!("{e:#}"))
        })?;

    info!(
        %key,
        content_type = %file_type,
        ttl_secs = UPLOAD_URL_TTL.as_secs(),
        "upload grant issued"
    );
    Ok(UploadGrant {
        upload_url,
        file_url: storage.public_url(&key),
    })
}
