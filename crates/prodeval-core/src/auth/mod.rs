//! Authentication module for managing the local login session.
//!
//! This module provides:
//! - `SessionStore`: string key/value storage for the `auth_token` and
//!   `user_info` keys, with in-memory and file-backed implementations
//! - `Auth`: local session checks, login guards and logout
//!
//! No request here reaches the server; an expired token is only noticed when
//! the API answers 401.

pub mod session;
pub mod store;

pub use session::{Auth, AuthError, TokenResponse, UserInfo, FALLBACK_USERNAME};
pub use store::{
    FileStore, MemoryStore, SessionStore, StoreError, AUTH_TOKEN_KEY, SESSION_KEYS, USER_INFO_KEY,
};
