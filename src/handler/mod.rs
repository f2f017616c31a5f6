//! Request handler module
//!
//! Routes requests to the form page, the form submission and the prompt
//! record download.

pub mod download;
pub mod form;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
