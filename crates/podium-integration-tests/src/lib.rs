//! Integration test crate for the podium workspace.
//!
//! This crate has no library code — it only contains integration tests
//! that exercise end-to-end voting flows across the workspace crates,
//! against an in-memory store.
