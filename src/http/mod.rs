//! HTTP protocol layer module
//!
//! Response builders shared by the page router, decoupled from wiring logic.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_400_response, build_404_response, build_405_response, build_413_response,
    build_500_response, build_options_response, build_page_response,
};
