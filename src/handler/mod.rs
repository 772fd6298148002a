//! Request handler module
//!
//! Responsible for request validation, dispatch to registered page handlers,
//! and turning their page state into responses.

pub mod page;
pub mod registry;
pub mod router;

// Re-export main entry point
pub use page::{Page, Script, StatusLine};
pub use registry::{HandlerFn, HandlerRegistry};
pub use router::{dispatch, handle_request};
