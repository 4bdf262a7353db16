//! Integration test suite for template-digest
//!
//! End-to-end tests for the library API and the `tdigest` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: `tdigest` commands run as a subprocess
//! - **concurrency**: Many threads sharing one cache
//! - **digests**: Digest propagation and memoization over in-memory templates
//! - **filesystem**: Templates laid out on disk

mod cli;
mod concurrency;
mod digests;
mod filesystem;
