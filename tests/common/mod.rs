//! Shared test utilities for integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use dirsearch::{Category, DirectorySearch, Listing, MemoryStore, RecordId, SiteId};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route `dirsearch` logs to the test writer; `RUST_LOG` overrides the level.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("dirsearch=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_test_writer()
            .try_init();
    });
}

/// Fresh in-memory search with logging enabled
pub fn search() -> DirectorySearch<MemoryStore> {
    init_tracing();
    DirectorySearch::ephemeral().unwrap()
}

// ============================================================================
// Record builders
// ============================================================================

pub fn id(raw: &str) -> RecordId {
    RecordId::new(raw).unwrap()
}

pub fn site(raw: &str) -> SiteId {
    SiteId::new(raw).unwrap()
}

/// Fixed timestamp `days` after 2024-01-01
pub fn day(days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::days(days)
}

pub fn listing(site_raw: &str, raw_id: &str, category: &str, title: &str) -> Listing {
    Listing::new(id(raw_id), site(site_raw), id(category), title)
}

pub fn category(site_raw: &str, raw_id: &str, name: &str) -> Category {
    Category::new(id(raw_id), site(site_raw), name)
}

/// Sorted ids of a result page
pub fn sorted_ids(results: &dirsearch::SearchResults) -> Vec<String> {
    let mut ids: Vec<String> = results.ids().into_iter().map(String::from).collect();
    ids.sort();
    ids
}
