//! Gateway types module
//!
//! ## Input Types
//! - [`OrderRequest`]: meal order from the HTML form or the JSON API
//!
//! ## Output Types
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`SubmissionData`]: JSON submission result
//!
//! ## Submodules
//! - [`order`]: Order request and shape validation
//! - [`response`]: Response types and error codes

pub mod order;
pub mod response;

pub use order::OrderRequest;
pub use response::{
    ApiResponse, SubmissionData, SubmissionStatus, error_codes, rejection_code,
};
