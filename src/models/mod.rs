// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ComparisonResult, InboundRequest, Operation, RequestMethod, UserFaceRecord};
pub use requests::{CompareFaceQuery, StoreFaceRequest};
pub use responses::{CompareFaceResponse, ErrorResponse, HealthResponse, StoreFaceResponse};
