use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// HTTP-like method of an inbound event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Options,
}

/// Transport-agnostic inbound event
///
/// Exactly one of `body` (STORE) or `query` (COMPARE) is consulted,
/// depending on the resolved operation. `method` may be absent for
/// callers that predate explicit methods.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    pub method: Option<RequestMethod>,
    pub body: Option<String>,
    pub query: HashMap<String, String>,
}

/// Operation resolved from an inbound event by `core::classify`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Preflight,
    Store,
    Compare,
    Invalid,
}

/// Reference face record, one per user email
///
/// Owned by the external store; created or fully overwritten on every
/// successful STORE, read on every COMPARE. Last write wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFaceRecord {
    #[serde(rename = "userEmail")]
    pub user_email: String,
    pub image_data: Vec<u8>,
}

/// Outcome of a CompareFaces call
///
/// `raw` is the full service response, carried back to the caller
/// untouched. Only `matched` is derived locally.
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub matched: bool,
    pub raw: Value,
}
