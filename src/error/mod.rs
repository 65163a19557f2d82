//! Error types

mod types;

pub use types::{
    ApiError, ErrorDetail, ErrorResponse, NotFoundResponse, ValidationErrorDetail,
    ValidationErrorResponse,
};
