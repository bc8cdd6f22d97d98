//! Integration test suite for wpreadme
//!
//! End-to-end tests that run the `wpreadme` binary against readme files in
//! a temporary directory. Nothing here touches the network: readmes are
//! local files and contributor fixtures only use links that resolve
//! without a provider lookup.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **show**: Segment requests, parse flags, translations, response cache
//! - **document**: Whole-document output with and without tags
//! - **contributors**: Plain and JSON contributor output
//! - **config**: `config init|show|path` and `cache clear|path`
//! - **errors**: Exit codes and user-facing error messages

mod common;

mod config;
mod contributors;
mod document;
mod errors;
mod show;
