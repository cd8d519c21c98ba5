// Core exports
pub mod dispatcher;

pub use dispatcher::{
    classify, DispatchError, DispatchOutcome, RequestDispatcher, INTERNAL_ERROR,
    INVALID_IMAGE_ENCODING, INVALID_METHOD, MALFORMED_BODY, MISSING_BODY_FIELDS,
    MISSING_QUERY_FIELDS, NO_IMAGE_FOR_EMAIL, PREFLIGHT_BODY,
};
