//! Utility functions shared across layers.
//!
//! - [`trail_id`] - Trail id generation and validation

pub mod trail_id;
