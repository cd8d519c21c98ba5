// Unit tests for the face-auth dispatcher core

use face_auth::core::{
    classify, DispatchError, INTERNAL_ERROR, INVALID_IMAGE_ENCODING, INVALID_METHOD,
    MALFORMED_BODY, MISSING_BODY_FIELDS, MISSING_QUERY_FIELDS, NO_IMAGE_FOR_EMAIL,
};
use face_auth::models::{
    CompareFaceQuery, CompareFaceResponse, ErrorResponse, Operation, RequestMethod,
    StoreFaceRequest, StoreFaceResponse,
};
use face_auth::services::{RekognitionError, StoreError};
use serde_json::json;
use validator::Validate;

#[test]
fn test_classify_full_rule_table() {
    // OPTIONS always wins
    assert_eq!(classify(Some(RequestMethod::Options), false), Operation::Preflight);
    assert_eq!(classify(Some(RequestMethod::Options), true), Operation::Preflight);

    // POST is a store regardless of body presence; validation rejects later
    assert_eq!(classify(Some(RequestMethod::Post), true), Operation::Store);
    assert_eq!(classify(Some(RequestMethod::Post), false), Operation::Store);

    // Absent method with a body defaults to store for legacy callers
    assert_eq!(classify(None, true), Operation::Store);

    // GET is a compare
    assert_eq!(classify(Some(RequestMethod::Get), false), Operation::Compare);
    assert_eq!(classify(Some(RequestMethod::Get), true), Operation::Compare);

    // Nothing to go on
    assert_eq!(classify(None, false), Operation::Invalid);
}

#[test]
fn test_store_request_missing_fields_deserialize_empty() {
    // Absent fields land as empty strings, so absence and emptiness fail
    // validation identically
    let request: StoreFaceRequest = serde_json::from_str(r#"{"userEmail": "a@x.com"}"#)
        .expect("partial body should deserialize");

    assert_eq!(request.user_email, "a@x.com");
    assert_eq!(request.image, "");
    assert!(request.validate().is_err());
}

#[test]
fn test_store_request_complete_body_validates() {
    let request: StoreFaceRequest =
        serde_json::from_str(r#"{"userEmail": "a@x.com", "image": "aGVsbG8="}"#)
            .expect("complete body should deserialize");

    assert!(request.validate().is_ok());
}

#[test]
fn test_store_request_empty_email_fails_validation() {
    let request: StoreFaceRequest =
        serde_json::from_str(r#"{"userEmail": "", "image": "aGVsbG8="}"#)
            .expect("body should deserialize");

    assert!(request.validate().is_err());
}

#[test]
fn test_compare_query_validation() {
    let complete = CompareFaceQuery {
        user_email: "a@x.com".to_string(),
        image: "aGVsbG8=".to_string(),
    };
    assert!(complete.validate().is_ok());

    let missing_image = CompareFaceQuery {
        user_email: "a@x.com".to_string(),
        image: String::new(),
    };
    assert!(missing_image.validate().is_err());

    let missing_email = CompareFaceQuery {
        user_email: String::new(),
        image: "aGVsbG8=".to_string(),
    };
    assert!(missing_email.validate().is_err());
}

#[test]
fn test_error_status_codes() {
    assert_eq!(DispatchError::Validation(MISSING_BODY_FIELDS).status(), 400);
    assert_eq!(DispatchError::Validation(MISSING_QUERY_FIELDS).status(), 400);
    assert_eq!(DispatchError::Validation(INVALID_METHOD).status(), 400);
    assert_eq!(DispatchError::NotFound.status(), 404);
    assert_eq!(
        DispatchError::Store(StoreError::ApiError("unreachable".into())).status(),
        500
    );
    assert_eq!(
        DispatchError::Rekognition(RekognitionError::ApiError("unreachable".into())).status(),
        500
    );
}

#[test]
fn test_error_public_messages_hide_internal_detail() {
    let store_err = DispatchError::Store(StoreError::ApiError(
        "PutItem failed: 503 at 10.0.0.3".into(),
    ));
    assert_eq!(store_err.public_message(), INTERNAL_ERROR);

    let rekognition_err = DispatchError::Rekognition(RekognitionError::InvalidResponse(
        "Missing FaceMatches array".into(),
    ));
    assert_eq!(rekognition_err.public_message(), INTERNAL_ERROR);

    let body_err = serde_json::from_str::<StoreFaceRequest>("not json")
        .map_err(DispatchError::MalformedBody)
        .unwrap_err();
    assert_eq!(body_err.public_message(), MALFORMED_BODY);
    assert_eq!(body_err.status(), 400);

    assert_eq!(DispatchError::NotFound.public_message(), NO_IMAGE_FOR_EMAIL);
}

#[test]
fn test_invalid_base64_maps_to_encoding_error() {
    use base64::{engine::general_purpose, Engine as _};

    let err = general_purpose::STANDARD
        .decode("*** not base64 ***")
        .map_err(DispatchError::InvalidImageEncoding)
        .unwrap_err();

    assert_eq!(err.status(), 400);
    assert_eq!(err.public_message(), INVALID_IMAGE_ENCODING);
}

#[test]
fn test_store_response_wire_shape() {
    let response = StoreFaceResponse {
        message: "Item successfully inserted".to_string(),
        user_email: "a@x.com".to_string(),
    };

    let value = serde_json::to_value(&response).expect("response should serialize");
    assert_eq!(
        value,
        json!({ "message": "Item successfully inserted", "userEmail": "a@x.com" })
    );
}

#[test]
fn test_compare_response_wire_shape() {
    let response = CompareFaceResponse {
        matched: true,
        rekognition_response: json!({ "FaceMatches": [{ "Similarity": 99.1 }] }),
    };

    let value = serde_json::to_value(&response).expect("response should serialize");
    assert_eq!(value["match"], json!(true));
    assert_eq!(
        value["rekognitionResponse"],
        json!({ "FaceMatches": [{ "Similarity": 99.1 }] })
    );
}

#[test]
fn test_error_response_wire_shape() {
    let response = ErrorResponse {
        error: "Invalid or missing HTTP method".to_string(),
    };

    let value = serde_json::to_value(&response).expect("response should serialize");
    assert_eq!(value, json!({ "error": "Invalid or missing HTTP method" }));
}
