//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into engine calls and formats responses. Request
//! shape validation happens here so the engine only sees well-formed input.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request processing middleware
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
