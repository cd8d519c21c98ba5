use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response for a successful STORE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFaceResponse {
    pub message: String,
    #[serde(rename = "userEmail")]
    pub user_email: String,
}

/// Response for a successful COMPARE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareFaceResponse {
    #[serde(rename = "match")]
    pub matched: bool,
    /// Full raw response from the comparison service, passed through verbatim
    #[serde(rename = "rekognitionResponse")]
    pub rekognition_response: Value,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
