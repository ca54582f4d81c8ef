//! Shared test utilities for the regrid workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic meshes (regular, curvilinear, unstructured, polar)
//! - Deterministic data fields
//! - Small fixtures with exactly known answers
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fibonacci_sphere, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
