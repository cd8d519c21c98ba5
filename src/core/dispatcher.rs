use crate::models::{
    CompareFaceQuery, InboundRequest, Operation, RequestMethod, StoreFaceRequest, UserFaceRecord,
};
use crate::services::{FaceStoreClient, RekognitionClient, RekognitionError, StoreError};
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

pub const MISSING_BODY_FIELDS: &str = "Missing userEmail or image in body";
pub const MISSING_QUERY_FIELDS: &str = "Missing userEmail or image in query parameters";
pub const NO_IMAGE_FOR_EMAIL: &str = "No image found for the given email";
pub const INVALID_METHOD: &str = "Invalid or missing HTTP method";
pub const MALFORMED_BODY: &str = "Malformed JSON body";
pub const INVALID_IMAGE_ENCODING: &str = "Invalid base64 image data";
pub const INTERNAL_ERROR: &str = "Internal server error";
pub const PREFLIGHT_BODY: &str = "CORS preflight response";

/// Failures a dispatched request can end in
///
/// Collaborator and parse errors keep their detail for the logs; the
/// caller only ever sees the fixed message from `public_message`.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("no stored image for the requested email")]
    NotFound,

    #[error("malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("invalid base64 image payload: {0}")]
    InvalidImageEncoding(#[source] base64::DecodeError),

    #[error("store call failed: {0}")]
    Store(#[from] StoreError),

    #[error("face comparison failed: {0}")]
    Rekognition(#[from] RekognitionError),
}

impl DispatchError {
    /// Status code this failure surfaces as
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) | Self::InvalidImageEncoding(_) => 400,
            Self::NotFound => 404,
            Self::Store(_) | Self::Rekognition(_) => 500,
        }
    }

    /// Caller-facing message; internal detail stays in the logs
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Validation(message) => *message,
            Self::NotFound => NO_IMAGE_FOR_EMAIL,
            Self::MalformedBody(_) => MALFORMED_BODY,
            Self::InvalidImageEncoding(_) => INVALID_IMAGE_ENCODING,
            Self::Store(_) | Self::Rekognition(_) => INTERNAL_ERROR,
        }
    }
}

/// Status code plus JSON body
///
/// The transport layer attaches the fixed header set; the dispatcher
/// only decides status and payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub status: u16,
    pub body: Value,
}

/// Resolve the operation for an inbound event
///
/// One rule, applied in order: OPTIONS is a preflight; POST is a store,
/// as is an absent method with a body present (kept for callers that
/// never set one); GET is a compare; anything else is invalid.
pub fn classify(method: Option<RequestMethod>, has_body: bool) -> Operation {
    match method {
        Some(RequestMethod::Options) => Operation::Preflight,
        Some(RequestMethod::Post) => Operation::Store,
        None if has_body => Operation::Store,
        Some(RequestMethod::Get) => Operation::Compare,
        None => Operation::Invalid,
    }
}

/// Classifies, validates and executes one inbound request
///
/// Every invocation produces exactly one outcome; validation rejections,
/// lookup misses and collaborator failures are all converted to
/// responses at this boundary and never escape it.
#[derive(Clone)]
pub struct RequestDispatcher {
    store: Arc<FaceStoreClient>,
    rekognition: Arc<RekognitionClient>,
}

impl RequestDispatcher {
    pub fn new(store: Arc<FaceStoreClient>, rekognition: Arc<RekognitionClient>) -> Self {
        Self { store, rekognition }
    }

    /// Handle one inbound request to completion
    pub async fn dispatch(&self, request: &InboundRequest) -> DispatchOutcome {
        let operation = classify(request.method, request.body.is_some());

        tracing::debug!("Dispatching {:?} request", operation);

        let result = match operation {
            Operation::Preflight => Ok(DispatchOutcome {
                status: 200,
                body: Value::String(PREFLIGHT_BODY.to_string()),
            }),
            Operation::Store => self.handle_store(request).await,
            Operation::Compare => self.handle_compare(request).await,
            Operation::Invalid => Err(DispatchError::Validation(INVALID_METHOD)),
        };

        result.unwrap_or_else(|e| {
            match &e {
                DispatchError::Store(_) | DispatchError::Rekognition(_) => {
                    tracing::error!("Dispatch failed: {}", e);
                }
                _ => tracing::info!("Dispatch rejected: {}", e),
            }

            DispatchOutcome {
                status: e.status(),
                body: json!({ "error": e.public_message() }),
            }
        })
    }

    /// STORE path: decode the body, upsert the reference image
    async fn handle_store(&self, request: &InboundRequest) -> Result<DispatchOutcome, DispatchError> {
        let raw = request
            .body
            .as_deref()
            .ok_or(DispatchError::Validation(MISSING_BODY_FIELDS))?;

        let body: StoreFaceRequest =
            serde_json::from_str(raw).map_err(DispatchError::MalformedBody)?;

        if body.validate().is_err() {
            return Err(DispatchError::Validation(MISSING_BODY_FIELDS));
        }

        let image_data = general_purpose::STANDARD
            .decode(&body.image)
            .map_err(DispatchError::InvalidImageEncoding)?;

        let record = UserFaceRecord {
            user_email: body.user_email,
            image_data,
        };

        self.store.put_face(&record).await?;

        tracing::info!(
            "Stored reference image for {} ({} bytes)",
            record.user_email,
            record.image_data.len()
        );

        Ok(DispatchOutcome {
            status: 200,
            body: json!({
                "message": "Item successfully inserted",
                "userEmail": record.user_email,
            }),
        })
    }

    /// COMPARE path: decode the probe, fetch the reference, compare
    async fn handle_compare(
        &self,
        request: &InboundRequest,
    ) -> Result<DispatchOutcome, DispatchError> {
        let query = CompareFaceQuery {
            user_email: request.query.get("userEmail").cloned().unwrap_or_default(),
            image: request.query.get("image").cloned().unwrap_or_default(),
        };

        if query.validate().is_err() {
            return Err(DispatchError::Validation(MISSING_QUERY_FIELDS));
        }

        let probe = general_purpose::STANDARD
            .decode(&query.image)
            .map_err(DispatchError::InvalidImageEncoding)?;

        let record = self
            .store
            .get_face(&query.user_email)
            .await?
            .ok_or(DispatchError::NotFound)?;

        let comparison = self
            .rekognition
            .compare_faces(&probe, &record.image_data)
            .await?;

        tracing::info!(
            "Compared probe for {}: match={}",
            query.user_email,
            comparison.matched
        );

        Ok(DispatchOutcome {
            status: 200,
            body: json!({
                "match": comparison.matched,
                "rekognitionResponse": comparison.raw,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_options_is_preflight() {
        assert_eq!(classify(Some(RequestMethod::Options), false), Operation::Preflight);
        // Body presence does not change a preflight
        assert_eq!(classify(Some(RequestMethod::Options), true), Operation::Preflight);
    }

    #[test]
    fn test_classify_post_is_store() {
        assert_eq!(classify(Some(RequestMethod::Post), true), Operation::Store);
        assert_eq!(classify(Some(RequestMethod::Post), false), Operation::Store);
    }

    #[test]
    fn test_classify_absent_method_with_body_is_store() {
        assert_eq!(classify(None, true), Operation::Store);
    }

    #[test]
    fn test_classify_get_is_compare() {
        assert_eq!(classify(Some(RequestMethod::Get), false), Operation::Compare);
        assert_eq!(classify(Some(RequestMethod::Get), true), Operation::Compare);
    }

    #[test]
    fn test_classify_absent_method_without_body_is_invalid() {
        assert_eq!(classify(None, false), Operation::Invalid);
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(DispatchError::Validation(MISSING_BODY_FIELDS).status(), 400);
        assert_eq!(DispatchError::NotFound.status(), 404);

        let store_err = DispatchError::Store(StoreError::ApiError("down".into()));
        assert_eq!(store_err.status(), 500);
        assert_eq!(store_err.public_message(), INTERNAL_ERROR);
    }

    #[test]
    fn test_not_found_public_message() {
        assert_eq!(DispatchError::NotFound.public_message(), NO_IMAGE_FOR_EMAIL);
    }
}
