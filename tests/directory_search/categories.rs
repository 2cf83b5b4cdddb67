//! Category search through the facade

use crate::common::*;
use dirsearch::{CategoryFilters, SearchRequest, SortMode};

fn populate(search: &dirsearch::DirectorySearch<dirsearch::MemoryStore>) {
    let categories = search.categories();
    categories.index(&category("s1", "outdoor", "Outdoor").with_description("Gear for trails"));
    categories.index(&category("s1", "tents", "Tents").with_parent(id("outdoor")));
    categories.index(
        &category("s1", "stoves", "Camp Stoves")
            .with_parent(id("outdoor"))
            .with_description("Outdoor cooking"),
    );
    categories.index(&category("s1", "home", "Home"));
}

#[test]
fn test_name_and_description_search() {
    let search = search();
    populate(&search);
    let results = search
        .categories()
        .search(&site("s1"), &SearchRequest::new().with_query("outdoor"));
    assert_eq!(results.ids(), vec!["outdoor", "stoves"]);
}

#[test]
fn test_parent_grouping() {
    let search = search();
    populate(&search);
    let categories = search.categories();

    let top = categories.search(&site("s1"), &CategoryFilters::new().top_level_only().request());
    assert_eq!(top.ids(), vec!["home", "outdoor"]);

    let children = categories.search(
        &site("s1"),
        &CategoryFilters::new()
            .children_of(id("outdoor"))
            .request()
            .with_sort(SortMode::TitleAsc),
    );
    assert_eq!(children.ids(), vec!["stoves", "tents"]);
}

#[test]
fn test_category_with_id_root_keeps_its_children_apart() {
    let search = search();
    let categories = search.categories();
    categories.index(&category("s1", "root", "Root"));
    categories.index(&category("s1", "child", "Child").with_parent(id("root")));
    categories.index(&category("s1", "top", "Top"));

    let top = categories.search(&site("s1"), &CategoryFilters::new().top_level_only().request());
    assert_eq!(top.ids(), vec!["root", "top"]);

    let children = CategoryFilters::new().children_of(id("root")).request();
    assert_eq!(categories.search(&site("s1"), &children).ids(), vec!["child"]);

    // Promoting the child to top level moves it between the two sets
    categories.update(&category("s1", "child", "Child"));
    assert_eq!(categories.count(&site("s1"), &children), 0);
    assert_eq!(
        categories.count(&site("s1"), &CategoryFilters::new().top_level_only().request()),
        3
    );
}

#[test]
fn test_listings_and_categories_do_not_mix() {
    let search = search();
    populate(&search);
    search
        .listings()
        .index(&listing("s1", "outdoor", "tents", "Outdoor Tent"));

    let q = SearchRequest::new().with_query("outdoor");
    assert_eq!(search.listings().count(&site("s1"), &q), 1);
    assert_eq!(search.categories().count(&site("s1"), &q), 2);

    // Removing the listing leaves the same-id category intact
    search.listings().remove(&site("s1"), &id("outdoor"));
    assert_eq!(search.categories().count(&site("s1"), &q), 2);
    assert!(search
        .categories()
        .get_summary(&site("s1"), &id("outdoor"))
        .unwrap()
        .is_some());
}

#[test]
fn test_rename_updates_index() {
    let search = search();
    populate(&search);
    let categories = search.categories();
    categories.update(&category("s1", "home", "Kitchen").with_description("Cookware"));

    let q = |text: &str| categories.count(&site("s1"), &SearchRequest::new().with_query(text));
    assert_eq!(q("home"), 0);
    assert_eq!(q("kitchen"), 1);
    assert_eq!(q("cookware"), 1);
}
