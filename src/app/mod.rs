pub mod error;
pub mod submission_service;

pub use error::{ApiError, ErrorResponse};
