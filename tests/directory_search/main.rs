//! Directory Search Integration Tests
//!
//! End-to-end behavior of listing and category search through the
//! `DirectorySearch` facade.

#[path = "../common/mod.rs"]
mod common;

mod categories;
mod configuration;
mod listings;
mod resilience;
