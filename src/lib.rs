//! Face Auth - face verification service
//!
//! Stores one reference face image per user email in an external
//! key-value store and verifies probe images against it through an
//! external face-comparison service. The core is a single request
//! dispatcher; everything else is transport and client plumbing.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{classify, DispatchOutcome, RequestDispatcher};
pub use crate::models::{InboundRequest, Operation, RequestMethod, UserFaceRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let operation = classify(Some(RequestMethod::Get), false);
        assert_eq!(operation, Operation::Compare);
    }
}
