//! Client-side helpers for the Product Evaluator web application.
//!
//! - [`api`]: `ApiClient`, JSON and form requests with bearer-token auth
//! - [`auth`]: session storage and local login checks
//! - [`ui`]: toasts, date/HTML/markdown formatting, score classes
//! - [`nav`]: the page-navigation seam used for login redirects
//!
//! Storage and navigation are passed in explicitly, so the same code runs
//! against a browser bridge, a file-backed store or test doubles.

pub mod api;
pub mod auth;
pub mod config;
pub mod logging;
pub mod nav;
pub mod ui;

pub use api::{ApiClient, ApiError, ApiResult, RequestOptions};
pub use auth::{Auth, AuthError, FileStore, MemoryStore, SessionStore, TokenResponse, UserInfo};
pub use config::Config;
pub use nav::{Navigator, RecordingNavigator};
