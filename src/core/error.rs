//! Error handling for wpreadme
//!
//! This module provides the error types and user-friendly error reporting for the
//! readme parser. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! Most of the parser never fails: a missing segment is an empty string and an
//! unreachable identity provider degrades to a placeholder profile. The variants
//! here cover what *can* reach a caller: unreadable sources, bad locators,
//! configuration problems and cache I/O.
//!
//! # Error Conversion and Context
//!
//! Library code returns [`anyhow::Result`] and wraps these variants with
//! context. Use [`user_friendly_error`] to turn whatever reaches `main` into a
//! user-friendly format with contextual suggestions; it also recognizes
//! foreign io, HTTP and TOML errors in the chain.
//!
//! # Examples
//!
//! ```rust,no_run
//! use wpreadme_cli::core::{ReadmeError, ErrorContext};
//!
//! let context = ErrorContext::new(ReadmeError::SourceUnreadable {
//!     locator: "missing/readme.txt".to_string(),
//!     reason: "No such file or directory".to_string(),
//! })
//! .with_suggestion("Check the path passed with --file");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for wpreadme operations
///
/// # Error Categories
///
/// ## Sources
/// - [`SourceUnreadable`] - The readme could not be fetched or decoded
/// - [`InvalidLocator`] - A source locator could not be interpreted
///
/// ## Network
/// - [`NetworkError`] - An HTTP request failed or returned a non-success status
///
/// ## Configuration
/// - [`ConfigError`] - Configuration content is invalid
///
/// ## Cache
/// - [`CacheError`] - The on-disk cache could not be read or written
///
/// [`SourceUnreadable`]: ReadmeError::SourceUnreadable
/// [`InvalidLocator`]: ReadmeError::InvalidLocator
/// [`NetworkError`]: ReadmeError::NetworkError
/// [`ConfigError`]: ReadmeError::ConfigError
/// [`CacheError`]: ReadmeError::CacheError
#[derive(Error, Debug, Clone)]
pub enum ReadmeError {
    /// The readme source could not be read
    #[error("Unable to read readme source: {locator}")]
    SourceUnreadable {
        /// Path or URL that was requested
        locator: String,
        /// Underlying reason reported by the transport
        reason: String,
    },

    /// The locator does not describe a usable source
    #[error("Invalid source locator: {locator}")]
    InvalidLocator {
        /// The rejected locator
        locator: String,
    },

    /// Network request failed
    #[error("Network error: {operation}")]
    NetworkError {
        /// What was being attempted (e.g. "GET https://...")
        operation: String,
        /// Reason for the failure
        reason: String,
    },

    /// Configuration content is invalid
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// Cache read/write failure
    #[error("Cache error during {operation}: {reason}")]
    CacheError {
        /// The cache operation ("read", "write", "clear")
        operation: String,
        /// Reason for the failure
        reason: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`ReadmeError`] and adds an optional suggestion and
/// optional details. When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context in yellow (optional)
/// 3. **Suggestion**: Actionable steps in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ReadmeError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: ReadmeError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`ReadmeError`], [`ErrorContext`], [`std::io::Error`],
/// [`reqwest::Error`] and [`toml::de::Error`] anywhere in the error chain;
/// everything else is reported with its message only.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(ctx) = error.downcast_ref::<ErrorContext>() {
        return ErrorContext {
            error: ctx.error.clone(),
            suggestion: ctx.suggestion.clone(),
            details: ctx.details.clone(),
        };
    }

    for cause in error.chain() {
        if let Some(readme_error) = cause.downcast_ref::<ReadmeError>() {
            return create_error_context(readme_error.clone());
        }

        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            match io_error.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    return ErrorContext::new(ReadmeError::Other {
                        message: format!("Permission denied: {error}"),
                    })
                    .with_suggestion("Check the file permissions of the readme or cache directory");
                }
                std::io::ErrorKind::NotFound => {
                    return ErrorContext::new(ReadmeError::Other {
                        message: error.to_string(),
                    })
                    .with_suggestion("Check that the file exists and the path is correct");
                }
                _ => {}
            }
        }

        if let Some(http_error) = cause.downcast_ref::<reqwest::Error>() {
            let ctx = ErrorContext::new(ReadmeError::NetworkError {
                operation: http_error
                    .url()
                    .map_or_else(|| "HTTP request".to_string(), |u| format!("GET {u}")),
                reason: http_error.to_string(),
            });
            return if http_error.is_timeout() {
                ctx.with_suggestion("The remote host did not answer in time; try again later")
            } else {
                ctx.with_suggestion("Check your network connection and the source URL")
            };
        }

        if let Some(toml_error) = cause.downcast_ref::<toml::de::Error>() {
            return ErrorContext::new(ReadmeError::ConfigError {
                message: toml_error.message().to_string(),
            })
            .with_details(error.to_string())
            .with_suggestion("Fix the TOML syntax in your wpreadme configuration file");
        }
    }

    ErrorContext::new(ReadmeError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: ReadmeError) -> ErrorContext {
    match &error {
        ReadmeError::SourceUnreadable {
            reason,
            ..
        } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Check the path or URL; private GitHub files need --token")
        }
        ReadmeError::InvalidLocator {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Use --file <path>, --url <url>, --wpsvn <plugin/trunk/readme.txt> or --github <owner/repo/branch/readme.txt>",
        ),
        ReadmeError::NetworkError {
            reason,
            ..
        } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Check your network connection and try again")
        }
        ReadmeError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'wpreadme config show' to inspect the active configuration"),
        ReadmeError::CacheError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'wpreadme cache clear' or retry with --no-cache"),
        _ => ErrorContext::new(error),
    }
}
