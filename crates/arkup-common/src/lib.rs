//! Arkup Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared utilities and error handling for the Arkup workspace.
//!
//! # Overview
//!
//! This crate provides functionality used across all Arkup workspace members:
//!
//! - **Error Handling**: Workspace-level error and result types
//! - **Digests**: Content hashing used for identifier derivation
//! - **Logging**: Tracing subscriber setup (console, file, or both)

pub mod digest;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{ArkupError, Result};
