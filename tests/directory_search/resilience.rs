//! Record-layer error policy through the facade
//!
//! The record layer keeps its own write regardless of the indexing outcome;
//! these tests play that caller against a store that fails on demand.

use crate::common::*;
use dirsearch::testing::{FaultOp, FaultyStore};
use dirsearch::{DirectorySearch, IndexOutcome, MemoryStore, SearchConfig, SearchRequest};

fn faulty_search() -> DirectorySearch<FaultyStore<MemoryStore>> {
    init_tracing();
    DirectorySearch::new(FaultyStore::new(MemoryStore::new()), SearchConfig::default()).unwrap()
}

#[test]
fn test_indexing_failure_is_an_outcome() {
    let search = faulty_search();
    search.store().fail(FaultOp::HSet);

    let outcome = search
        .listings()
        .index(&listing("s1", "l1", "c1", "Brass Lantern"));
    assert!(outcome.is_failed());
    assert!(outcome.error().is_some());
    assert_eq!(search.store().injected_faults(), 1);
}

#[test]
fn test_search_and_count_degrade() {
    let search = faulty_search();
    search
        .listings()
        .index(&listing("s1", "l1", "c1", "Brass Lantern"));
    search.store().fail(FaultOp::Any);

    let q = SearchRequest::new().with_query("lantern").with_limit(5);
    let results = search.listings().search(&site("s1"), &q);
    assert!(results.is_empty());
    assert_eq!(results.total, 0);
    assert_eq!(results.limit, 5);
    assert_eq!(search.listings().count(&site("s1"), &q), 0);
    assert_eq!(search.categories().count(&site("s1"), &SearchRequest::new()), 0);
}

#[test]
fn test_recovery_after_outage() {
    let search = faulty_search();
    let lantern = listing("s1", "l1", "c1", "Brass Lantern");

    search.store().fail(FaultOp::Any);
    assert!(search.listings().index(&lantern).is_failed());

    search.store().heal();
    assert!(matches!(search.listings().update(&lantern), IndexOutcome::Indexed));
    assert_eq!(
        search
            .listings()
            .count(&site("s1"), &SearchRequest::new().with_query("lantern")),
        1
    );
}

#[test]
fn test_missing_record_removal_is_benign() {
    let search = faulty_search();
    assert!(matches!(
        search.categories().remove(&site("s1"), &id("nope")),
        IndexOutcome::NotIndexed
    ));
    assert_eq!(search.store().injected_faults(), 0);
}
