//! REST API client module for the Product Evaluator backend.
//!
//! This module provides the `ApiClient` for JSON and multipart requests
//! against the evaluator API. Requests carry the stored bearer token; a 401
//! answer ends the local session and redirects to the login page instead of
//! surfacing an error.

pub mod client;
pub mod error;

pub use client::{ApiClient, RequestOptions};
pub use error::{ApiError, ApiResult, FALLBACK_ERROR_MESSAGE};
