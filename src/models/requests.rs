use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of a STORE request
///
/// Missing fields deserialize to empty strings so that absence and
/// emptiness both fail validation with the same caller-facing message.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoreFaceRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "userEmail", default)]
    pub user_email: String,
    /// Base64-encoded reference image
    #[validate(length(min = 1))]
    #[serde(default)]
    pub image: String,
}

/// Query parameters of a COMPARE request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompareFaceQuery {
    #[validate(length(min = 1))]
    #[serde(rename = "userEmail", default)]
    pub user_email: String,
    /// Base64-encoded probe image
    #[validate(length(min = 1))]
    #[serde(default)]
    pub image: String,
}
