use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadGrantRequest {
    pub file_name: Option<String>,
    pub file_type: Option<String>,
}

/// `upload_url` accepts one PUT until it expires; `file_url` is where the object will be readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadGrant {
    pub upload_url: String,
    pub file_url: String,
}
