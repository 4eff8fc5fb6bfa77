//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the dispatch sequencer, the static file
//! tiers, and the API subsystem; decoupled from routing and rendering.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_403_response, build_404_response, build_405_response, build_html_response,
    build_options_response, build_redirect_response, build_resource_response,
};
