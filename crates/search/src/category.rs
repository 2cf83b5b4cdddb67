//! Category index
//!
//! Categories are tokenized over name and description. Their one facet,
//! `parent`, groups children under their parent id; top-level categories
//! leave it unset and share the facet's valueless set.

use crate::indexer::{IndexOutcome, Indexer};
use crate::request::{FacetFilter, SearchRequest, SearchResults};
use crate::schema::{FacetKind, FacetSpec, FacetValue, FieldRole, FieldSpec, IndexSchema, Indexable};
use crate::summary::Summary;
use chrono::{DateTime, Utc};
use dirsearch_core::{Category, DocKind, RecordId, Result, SearchConfig, SiteId};
use dirsearch_storage::Store;

/// Name field
pub const NAME: &str = "name";
/// Description field
pub const DESCRIPTION: &str = "description";
/// Parent grouping facet
pub const PARENT: &str = "parent";

/// Schema for categories
pub fn category_schema() -> IndexSchema {
    IndexSchema::new(DocKind::Category)
        .field(FieldSpec::new(NAME, FieldRole::Title))
        .field(FieldSpec::new(DESCRIPTION, FieldRole::Description))
        .facet(FacetSpec::new(PARENT, FacetKind::Scope))
}

impl Indexable for Category {
    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn site_id(&self) -> &SiteId {
        &self.site_id
    }

    fn field_text(&self, field: &str) -> Option<&str> {
        match field {
            NAME => Some(&self.name),
            DESCRIPTION => Some(&self.description),
            _ => None,
        }
    }

    fn facet_value(&self, facet: &str) -> Option<FacetValue> {
        match facet {
            PARENT => Some(match &self.parent_id {
                Some(parent) => FacetValue::Value(parent.to_string()),
                None => FacetValue::Unset,
            }),
            _ => None,
        }
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Typed category filters; unset fields do not constrain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilters {
    /// Only direct children of this category
    pub parent_id: Option<RecordId>,
    /// Only top-level categories
    pub top_level_only: bool,
}

impl CategoryFilters {
    /// No constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: restrict to children of `parent_id`
    pub fn children_of(mut self, parent_id: RecordId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Builder: restrict to top-level categories
    pub fn top_level_only(mut self) -> Self {
        self.top_level_only = true;
        self
    }

    /// Facet filters these constraints translate to
    ///
    /// Both constraints together match nothing.
    pub fn to_filters(&self) -> Vec<FacetFilter> {
        let mut filters = vec![];
        if let Some(parent) = &self.parent_id {
            filters.push(FacetFilter::equals(PARENT, parent.as_str()));
        }
        if self.top_level_only {
            filters.push(FacetFilter::unset(PARENT));
        }
        filters
    }

    /// A request carrying these filters
    pub fn request(&self) -> SearchRequest {
        SearchRequest::new().with_filters(self.to_filters())
    }
}

/// Indexer for categories
#[derive(Debug)]
pub struct CategoryIndexer<S> {
    inner: Indexer<S>,
}

impl<S: Store> CategoryIndexer<S> {
    /// Create a category indexer over `store`
    ///
    /// # Errors
    /// `Error::Config` when the configuration is invalid.
    pub fn new(store: S, config: SearchConfig) -> Result<Self> {
        Ok(CategoryIndexer {
            inner: Indexer::new(store, category_schema(), config)?,
        })
    }

    /// Generic indexer underneath
    pub fn inner(&self) -> &Indexer<S> {
        &self.inner
    }

    /// Index a category after its write succeeded
    pub fn index(&self, category: &Category) -> IndexOutcome {
        self.inner.index(category)
    }

    /// Re-index a category after its update succeeded
    pub fn update(&self, category: &Category) -> IndexOutcome {
        self.inner.update(category)
    }

    /// Remove a category after its deletion succeeded
    pub fn remove(&self, site: &SiteId, id: &RecordId) -> IndexOutcome {
        self.inner.remove(site, id)
    }

    /// Index a category, returning failures
    pub fn try_index(&self, category: &Category) -> Result<()> {
        self.inner.try_index(category)
    }

    /// Re-index a category, returning failures
    pub fn try_update(&self, category: &Category) -> Result<()> {
        self.inner.try_update(category)
    }

    /// Remove a category, returning failures
    pub fn try_remove(&self, site: &SiteId, id: &RecordId) -> Result<bool> {
        self.inner.try_remove(site, id)
    }

    /// Search categories; empty on failure
    pub fn search(&self, site: &SiteId, request: &SearchRequest) -> SearchResults {
        self.inner.search(site, request)
    }

    /// Search categories, returning failures
    pub fn try_search(&self, site: &SiteId, request: &SearchRequest) -> Result<SearchResults> {
        self.inner.try_search(site, request)
    }

    /// Count matching categories; zero on failure
    pub fn count(&self, site: &SiteId, request: &SearchRequest) -> usize {
        self.inner.count(site, request)
    }

    /// Count matching categories, returning failures
    pub fn try_count(&self, site: &SiteId, request: &SearchRequest) -> Result<usize> {
        self.inner.try_count(site, request)
    }

    /// Current summary of a category
    pub fn get_summary(&self, site: &SiteId, id: &RecordId) -> Result<Option<Summary>> {
        self.inner.get_summary(site, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::SortMode;
    use dirsearch_storage::MemoryStore;

    fn id(raw: &str) -> RecordId {
        RecordId::new(raw).unwrap()
    }

    fn site() -> SiteId {
        SiteId::new("s1").unwrap()
    }

    fn indexer() -> CategoryIndexer<MemoryStore> {
        let indexer = CategoryIndexer::new(MemoryStore::new(), SearchConfig::default()).unwrap();
        indexer.index(&Category::new(id("outdoor"), site(), "Outdoor Gear"));
        indexer.index(
            &Category::new(id("camping"), site(), "Camping")
                .with_description("Tents and outdoor sleeping")
                .with_parent(id("outdoor")),
        );
        indexer.index(&Category::new(id("hiking"), site(), "Hiking").with_parent(id("outdoor")));
        indexer.index(&Category::new(id("kitchen"), site(), "Kitchen"));
        indexer
    }

    #[test]
    fn test_top_level_leaves_parent_unset() {
        let c = Category::new(id("c1"), site(), "Top");
        assert_eq!(c.facet_value(PARENT), Some(FacetValue::Unset));
        let child = c.clone().with_parent(id("c0"));
        assert_eq!(child.facet_value(PARENT), Some(FacetValue::Value("c0".to_string())));
    }

    #[test]
    fn test_top_level_only() {
        let req = CategoryFilters::new().top_level_only().request();
        assert_eq!(indexer().search(&site(), &req).ids(), vec!["kitchen", "outdoor"]);
    }

    #[test]
    fn test_children_of() {
        let req = CategoryFilters::new()
            .children_of(id("outdoor"))
            .request()
            .with_sort(SortMode::TitleAsc);
        assert_eq!(indexer().search(&site(), &req).ids(), vec!["camping", "hiking"]);
    }

    #[test]
    fn test_name_outranks_description() {
        let req = SearchRequest::new().with_query("outdoor");
        assert_eq!(indexer().search(&site(), &req).ids(), vec!["outdoor", "camping"]);
    }

    #[test]
    fn test_category_named_root_is_not_top_level() {
        let indexer = CategoryIndexer::new(MemoryStore::new(), SearchConfig::default()).unwrap();
        indexer.index(&Category::new(id("root"), site(), "Root"));
        indexer.index(&Category::new(id("child"), site(), "Child").with_parent(id("root")));
        indexer.index(&Category::new(id("top"), site(), "Top"));

        let top = CategoryFilters::new().top_level_only().request();
        let children = CategoryFilters::new().children_of(id("root")).request();
        assert_eq!(indexer.search(&site(), &top).ids(), vec!["root", "top"]);
        assert_eq!(indexer.search(&site(), &children).ids(), vec!["child"]);
        assert_eq!(indexer.count(&site(), &children), 1);
    }

    #[test]
    fn test_reparenting_moves_facet() {
        let indexer = indexer();
        indexer.update(&Category::new(id("hiking"), site(), "Hiking"));
        let top = CategoryFilters::new().top_level_only().request();
        let children = CategoryFilters::new().children_of(id("outdoor")).request();
        assert_eq!(indexer.count(&site(), &top), 3);
        assert_eq!(indexer.count(&site(), &children), 1);
    }
}
