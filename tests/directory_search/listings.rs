//! Listing search through the facade

use crate::common::*;
use dirsearch::{IndexOutcome, ListingFilters, ListingStatus, SearchRequest, SortMode};

#[test]
fn test_hiking_boots_scenario() {
    let search = search();
    let listings = search.listings();
    let s1 = site("s1");

    listings.index(&listing("s1", "red", "c1", "Red Hiking Boots"));
    listings.index(&listing("s1", "blue", "c1", "Blue Hiking Boots").with_featured(true));

    let both = listings.search(&s1, &SearchRequest::new().with_query("hiking boots"));
    assert_eq!(sorted_ids(&both), vec!["blue", "red"]);

    let red = listings.search(&s1, &SearchRequest::new().with_query("red"));
    assert_eq!(red.ids(), vec!["red"]);

    let featured = listings.search(&s1, &ListingFilters::new().featured_only().request());
    assert_eq!(featured.ids(), vec!["blue"]);

    assert!(matches!(listings.remove(&s1, &id("red")), IndexOutcome::Removed));
    assert!(listings
        .search(&s1, &SearchRequest::new().with_query("red"))
        .is_empty());
}

#[test]
fn test_relevance_prefers_title_matches() {
    let search = search();
    let listings = search.listings();
    listings.index(&listing("s1", "a", "c1", "Camping Stove").with_description("lantern hook"));
    listings.index(&listing("s1", "b", "c1", "Brass Lantern"));
    listings.index(&listing("s1", "c", "c1", "Tent").with_content("fits a lantern and a stove"));

    let results = listings.search(&site("s1"), &SearchRequest::new().with_query("lantern"));
    assert_eq!(results.ids(), vec!["b", "a", "c"]);
    assert!(results.hits[0].score > results.hits[1].score);
    assert!(results.hits[1].score > results.hits[2].score);
}

#[test]
fn test_sort_modes() {
    let search = search();
    let listings = search.listings();
    listings.index(&listing("s1", "a", "c1", "banana lamp").with_timestamps(day(3), day(3)));
    listings.index(
        &listing("s1", "b", "c1", "Apple lamp")
            .with_featured(true)
            .with_timestamps(day(1), day(1)),
    );
    listings.index(&listing("s1", "c", "c1", "cherry lamp").with_timestamps(day(2), day(2)));

    let sorted = |mode: SortMode| {
        let req = SearchRequest::new().with_query("lamp").with_sort(mode);
        listings
            .search(&site("s1"), &req)
            .ids()
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    };
    assert_eq!(sorted(SortMode::Newest), vec!["a", "c", "b"]);
    assert_eq!(sorted(SortMode::Oldest), vec!["b", "c", "a"]);
    assert_eq!(sorted(SortMode::TitleAsc), vec!["b", "a", "c"]);
    assert_eq!(sorted(SortMode::TitleDesc), vec!["c", "a", "b"]);
    assert_eq!(sorted(SortMode::FeaturedFirst), vec!["b", "a", "c"]);
    assert_eq!(
        sorted("relevance".parse().unwrap()),
        vec!["a", "b", "c"]
    );
}

#[test]
fn test_combined_filters() {
    let search = search();
    let listings = search.listings();
    listings.index(&listing("s1", "a", "c1", "Lamp").with_featured(true));
    listings.index(
        &listing("s1", "b", "c1", "Lamp")
            .with_featured(true)
            .with_status(ListingStatus::Draft),
    );
    listings.index(&listing("s1", "c", "c2", "Lamp").with_featured(true));
    listings.index(&listing("s1", "d", "c1", "Lamp"));

    let filters = ListingFilters::new()
        .in_category(id("c1"))
        .featured_only()
        .with_status(ListingStatus::Published);
    let browse = listings.search(&site("s1"), &filters.request());
    assert_eq!(browse.ids(), vec!["a"]);

    let with_text = listings.search(&site("s1"), &filters.request().with_query("lamp"));
    assert_eq!(with_text.ids(), vec!["a"]);
    assert_eq!(listings.count(&site("s1"), &filters.request()), 1);
}

#[test]
fn test_summary_hydration() {
    let search = search();
    let listings = search.listings();
    listings.index(
        &listing("s1", "l1", "c1", "Brass Lantern")
            .with_slug("brass-lantern")
            .with_description("Solid brass")
            .with_image_url("https://img.example/lantern.png")
            .with_backlink_url("https://maker.example")
            .with_timestamps(day(0), day(5)),
    );

    let hit = &listings
        .search(&site("s1"), &SearchRequest::new().with_query("brass"))
        .hits[0];
    assert_eq!(hit.summary.title, "Brass Lantern");
    assert_eq!(hit.summary.slug, "brass-lantern");
    assert_eq!(hit.summary.field("description"), "Solid brass");
    assert_eq!(hit.summary.facet("category"), Some("c1"));
    assert_eq!(hit.summary.facet("status"), Some("published"));
    assert_eq!(
        hit.summary.extras.get("backlink_url").map(String::as_str),
        Some("https://maker.example")
    );
    assert_eq!(hit.summary.updated_at, day(5));
}

#[test]
fn test_pagination_metadata() {
    let search = search();
    let listings = search.listings();
    for i in 0..45 {
        listings.index(&listing("s1", &format!("l{:02}", i), "c1", "Lamp"));
    }

    let first = listings.search(&site("s1"), &SearchRequest::new().with_query("lamp"));
    assert_eq!(first.len(), 20);
    assert_eq!(first.total, 45);
    assert!(first.has_more());

    let last = listings.search(
        &site("s1"),
        &SearchRequest::new().with_query("lamp").with_offset(40),
    );
    assert_eq!(last.len(), 5);
    assert!(!last.has_more());
    assert_eq!(last.ids()[0], "l40");

    let all = listings.search(
        &site("s1"),
        &SearchRequest::new().with_query("lamp").with_limit(usize::MAX),
    );
    assert_eq!(all.len(), listings.count(&site("s1"), &SearchRequest::new().with_query("lamp")));
}

#[test]
fn test_tenants_do_not_see_each_other() {
    let search = search();
    let listings = search.listings();
    listings.index(&listing("acme", "l1", "c1", "Acme Anvil"));
    listings.index(&listing("globex", "l1", "c1", "Globex Anvil"));

    let acme = listings.search(&site("acme"), &SearchRequest::new().with_query("anvil"));
    assert_eq!(acme.len(), 1);
    assert_eq!(acme.hits[0].summary.title, "Acme Anvil");
    assert_eq!(
        listings.count(&site("acme"), &SearchRequest::new().with_query("globex")),
        0
    );
}
