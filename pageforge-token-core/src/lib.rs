//! # Pageforge Token Core
//!
//! Core utilities and types shared across Pageforge token implementations.
//!
//! This crate provides the plumbing used by the render-token crate,
//! including:
//!
//! - Token string encoding/decoding utilities
//! - Time configuration for token validity
//! - The process-wide signing key
//! - Common error types

pub mod error;
pub mod key;
pub mod time;
pub mod utils;

pub use error::TokenError;
pub use key::{SigningKey, SECRET_ENV_VAR};
pub use time::{now_millis, TokenTimeConfig, DEFAULT_MAX_AGE_MS};
pub use utils::{decode_token, encode_token};
