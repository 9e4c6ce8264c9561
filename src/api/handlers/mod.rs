//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod create_trail;
pub mod health;
pub mod redirect;

pub use create_trail::create_trail_handler;
pub use health::health_handler;
pub use redirect::{redirect_handler, root_handler};
