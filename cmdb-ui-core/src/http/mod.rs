//! CMDB REST data access

mod client;
mod error_decoding;
mod log_sanitizer;

pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use error_decoding::decode_error_response;
pub use log_sanitizer::truncate_for_log;
