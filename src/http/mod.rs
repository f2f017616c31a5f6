//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! form and download handlers.

pub mod cache;
pub mod form;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_304_response, build_400_response, build_404_response, build_405_response, build_413_response,
    build_500_response, build_attachment_response, build_health_response, build_html_response,
    build_options_response, build_redirect_response,
};
