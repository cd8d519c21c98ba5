use crate::models::ComparisonResult;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the face-comparison service
#[derive(Debug, Error)]
pub enum RekognitionError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the face-comparison service
///
/// Speaks the CompareFaces JSON wire protocol. The service applies the
/// similarity threshold itself and excludes candidates below it; this
/// client only reports whether any match came back.
pub struct RekognitionClient {
    endpoint: String,
    auth_token: Option<String>,
    similarity_threshold: f32,
    client: Client,
}

impl RekognitionClient {
    /// Create a new comparison client
    pub fn new(
        endpoint: String,
        auth_token: Option<String>,
        similarity_threshold: f32,
        timeout_secs: u64,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            auth_token,
            similarity_threshold,
            client,
        }
    }

    /// Compare a probe image against a stored reference image
    ///
    /// The full service response is carried back untouched alongside the
    /// derived match flag.
    pub async fn compare_faces(
        &self,
        source: &[u8],
        target: &[u8],
    ) -> Result<ComparisonResult, RekognitionError> {
        let payload = json!({
            "SourceImage": { "Bytes": general_purpose::STANDARD.encode(source) },
            "TargetImage": { "Bytes": general_purpose::STANDARD.encode(target) },
            "SimilarityThreshold": self.similarity_threshold,
        });

        let url = format!("{}/", self.endpoint.trim_end_matches('/'));

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/x-amz-json-1.1")
            .header("X-Amz-Target", "RekognitionService.CompareFaces")
            .json(&payload);

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
            tracing::error!("CompareFaces failed: {} - {}", status, body);
            return Err(RekognitionError::ApiError(format!(
                "CompareFaces failed: {}",
                status
            )));
        }

        let raw: Value = response.json().await?;

        let matched = raw
            .get("FaceMatches")
            .and_then(|m| m.as_array())
            .map(|matches| !matches.is_empty())
            .ok_or_else(|| RekognitionError::InvalidResponse("Missing FaceMatches array".into()))?;

        tracing::debug!("CompareFaces returned match={}", matched);

        Ok(ComparisonResult { matched, raw })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rekognition_client_creation() {
        let client = RekognitionClient::new(
            "http://rekognition.test:8010".to_string(),
            None,
            80.0,
            30,
        );

        assert_eq!(client.endpoint, "http://rekognition.test:8010");
        assert_eq!(client.similarity_threshold, 80.0);
        assert!(client.auth_token.is_none());
    }
}
