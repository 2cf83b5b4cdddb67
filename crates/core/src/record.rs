//! Records consumed by the indexers
//!
//! These are the record layer's authoritative rows, passed to the indexer
//! only after the record layer's own write has committed. The indexer never
//! writes them back.

use crate::types::{ListingStatus, RecordId, SiteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directory listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique per site
    pub id: RecordId,
    /// Owning site
    pub site_id: SiteId,
    /// Category the listing is filed under
    pub category_id: RecordId,
    /// Display title
    pub title: String,
    /// URL slug
    pub slug: String,
    /// Short (meta) description
    pub description: String,
    /// Long body content, may be large
    pub content: String,
    /// Optional image
    pub image_url: Option<String>,
    /// Optional backlink target
    pub backlink_url: Option<String>,
    /// Featured flag
    pub featured: bool,
    /// Publication state
    pub status: ListingStatus,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Create a published, non-featured listing with empty text fields
    pub fn new(id: RecordId, site_id: SiteId, category_id: RecordId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Listing {
            id,
            site_id,
            category_id,
            title: title.into(),
            slug: String::new(),
            description: String::new(),
            content: String::new(),
            image_url: None,
            backlink_url: None,
            featured: false,
            status: ListingStatus::Published,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder: set slug
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: set body content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Builder: set featured flag
    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// Builder: set status
    pub fn with_status(mut self, status: ListingStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder: set image url
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Builder: set backlink url
    pub fn with_backlink_url(mut self, url: impl Into<String>) -> Self {
        self.backlink_url = Some(url.into());
        self
    }

    /// Builder: set both timestamps
    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }
}

/// A listing category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique per site
    pub id: RecordId,
    /// Owning site
    pub site_id: SiteId,
    /// Display name
    pub name: String,
    /// URL slug
    pub slug: String,
    /// Short (meta) description
    pub description: String,
    /// Parent category, `None` for top-level categories
    pub parent_id: Option<RecordId>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a top-level category
    pub fn new(id: RecordId, site_id: SiteId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Category {
            id,
            site_id,
            name: name.into(),
            slug: String::new(),
            description: String::new(),
            parent_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder: set slug
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: set parent
    pub fn with_parent(mut self, parent_id: RecordId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Builder: set both timestamps
    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> RecordId {
        RecordId::new(s).unwrap()
    }

    #[test]
    fn test_listing_defaults() {
        let listing = Listing::new(id("l1"), SiteId::new("s1").unwrap(), id("c1"), "Red Boots");
        assert!(!listing.featured);
        assert_eq!(listing.status, ListingStatus::Published);
        assert_eq!(listing.created_at, listing.updated_at);
        assert!(listing.image_url.is_none());
    }

    #[test]
    fn test_listing_builders() {
        let listing = Listing::new(id("l1"), SiteId::new("s1").unwrap(), id("c1"), "Red Boots")
            .with_description("Waterproof")
            .with_content("Long text")
            .with_featured(true)
            .with_status(ListingStatus::Draft)
            .with_image_url("https://example.com/a.jpg");
        assert_eq!(listing.description, "Waterproof");
        assert_eq!(listing.content, "Long text");
        assert!(listing.featured);
        assert_eq!(listing.status, ListingStatus::Draft);
        assert_eq!(listing.image_url.as_deref(), Some("https://example.com/a.jpg"));
    }

    #[test]
    fn test_category_parent() {
        let child = Category::new(id("c2"), SiteId::new("s1").unwrap(), "Boots").with_parent(id("c1"));
        assert_eq!(child.parent_id, Some(id("c1")));
    }
}
