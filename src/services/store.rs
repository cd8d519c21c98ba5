use crate::models::UserFaceRecord;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the face store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Store returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the key-value store holding reference face images
///
/// Speaks the DynamoDB JSON wire protocol (PutItem/GetItem) against a
/// configured endpoint. One record per user: `userEmail` keys a binary
/// `image_data` attribute, overwritten unconditionally on every put.
pub struct FaceStoreClient {
    endpoint: String,
    table_name: String,
    auth_token: Option<String>,
    client: Client,
}

impl FaceStoreClient {
    /// Create a new store client
    pub fn new(
        endpoint: String,
        table_name: String,
        auth_token: Option<String>,
        timeout_secs: u64,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            table_name,
            auth_token,
            client,
        }
    }

    async fn call(&self, target: &str, payload: &Value) -> Result<Value, StoreError> {
        let url = format!("{}/", self.endpoint.trim_end_matches('/'));

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/x-amz-json-1.0")
            .header("X-Amz-Target", target)
            .json(payload);

        if let Some(token) = &self.auth_token {
            request = request.header("Authorization", token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Store call {} failed: {} - {}", target, status, body);
            return Err(StoreError::ApiError(format!(
                "{} failed: {}",
                target, status
            )));
        }

        response.json().await.map_err(Into::into)
    }

    /// Upsert the reference image for a user
    ///
    /// Unconditional overwrite by key; any prior record for the email is
    /// replaced. No merge, no versioning.
    pub async fn put_face(&self, record: &UserFaceRecord) -> Result<(), StoreError> {
        let payload = json!({
            "TableName": self.table_name,
            "Item": {
                "userEmail": { "S": record.user_email },
                "image_data": { "B": general_purpose::STANDARD.encode(&record.image_data) },
            }
        });

        self.call("DynamoDB_20120810.PutItem", &payload).await?;

        tracing::debug!(
            "Stored reference image for {} ({} bytes)",
            record.user_email,
            record.image_data.len()
        );

        Ok(())
    }

    /// Point lookup of the stored reference image
    ///
    /// Returns `None` when no record exists for the email.
    pub async fn get_face(&self, user_email: &str) -> Result<Option<UserFaceRecord>, StoreError> {
        let payload = json!({
            "TableName": self.table_name,
            "Key": { "userEmail": { "S": user_email } }
        });

        let response = self.call("DynamoDB_20120810.GetItem", &payload).await?;

        let item = match response.get("Item") {
            Some(item) => item,
            None => return Ok(None),
        };

        let encoded = item
            .get("image_data")
            .and_then(|attr| attr.get("B"))
            .and_then(|b| b.as_str())
            .ok_or_else(|| StoreError::InvalidResponse("Missing image_data attribute".into()))?;

        let image_data = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| StoreError::InvalidResponse(format!("Undecodable image_data: {}", e)))?;

        Ok(Some(UserFaceRecord {
            user_email: user_email.to_string(),
            image_data,
        }))
    }

    /// Health check for the store connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        let payload = json!({ "TableName": self.table_name });

        self.call("DynamoDB_20120810.DescribeTable", &payload)
            .await
            .map(|_| true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_client_creation() {
        let client = FaceStoreClient::new(
            "http://store.test:8000".to_string(),
            "rekognitionAuth".to_string(),
            Some("test_token".to_string()),
            30,
        );

        assert_eq!(client.endpoint, "http://store.test:8000");
        assert_eq!(client.table_name, "rekognitionAuth");
        assert_eq!(client.auth_token.as_deref(), Some("test_token"));
    }
}
