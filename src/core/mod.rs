//! Core types for wpreadme
//!
//! This module holds the error vocabulary shared by every other module:
//! - [`ReadmeError`] - Enumerated error types for the failures that can reach a caller
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! # Error Handling Pattern
//!
//! ```rust
//! use wpreadme_cli::core::{ReadmeError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<String> {
//!     Err(ReadmeError::InvalidLocator { locator: String::new() }.into())
//! }
//!
//! if let Err(e) = example_operation() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.suggestion.is_some());
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, ReadmeError, user_friendly_error};
