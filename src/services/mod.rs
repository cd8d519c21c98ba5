// Service exports
pub mod rekognition;
pub mod store;

pub use rekognition::{RekognitionClient, RekognitionError};
pub use store::{FaceStoreClient, StoreError};
