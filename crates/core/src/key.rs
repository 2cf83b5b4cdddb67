//! Key naming for index structures
//!
//! Every structure lives under `{prefix}:{site}:{kind}:...`:
//!
//! | Structure    | Key                              | Store type |
//! |--------------|----------------------------------|------------|
//! | Posting      | `p:s:k:term:{term}`              | set        |
//! | Term set     | `p:s:k:terms:{record}`           | scalar     |
//! | Flag facet   | `p:s:k:facet:{facet}`            | set        |
//! | Value facet  | `p:s:k:facet:{facet}:{value}`    | set        |
//! | Summary hash | `p:s:k:summary`                  | hash       |
//!
//! Tenant isolation comes only from this naming: site ids are validated so
//! they cannot contain the separator, and nothing builds a key without one.

use crate::types::{DocKind, RecordId, SiteId};

/// Key builder scoped to one site and one index family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    site: SiteId,
    /// `{prefix}:{site}:{kind}`
    base: String,
}

impl KeySpace {
    /// Create a key space for `site` and `kind` under `prefix`
    pub fn new(prefix: &str, site: &SiteId, kind: DocKind) -> Self {
        KeySpace {
            site: site.clone(),
            base: format!("{}:{}:{}", prefix, site, kind.as_str()),
        }
    }

    /// Site owning every key in this space
    pub fn site(&self) -> &SiteId {
        &self.site
    }

    /// Common prefix of every key in this space
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Posting entry for a term
    pub fn posting(&self, term: &str) -> String {
        format!("{}:term:{}", self.base, term)
    }

    /// Term set of a record
    pub fn term_set(&self, id: &RecordId) -> String {
        format!("{}:terms:{}", self.base, id)
    }

    /// Facet set for a flag facet (`value == None`) or a value facet
    pub fn facet(&self, facet: &str, value: Option<&str>) -> String {
        match value {
            Some(v) => format!("{}:facet:{}:{}", self.base, facet, v),
            None => format!("{}:facet:{}", self.base, facet),
        }
    }

    /// Summary hash for the whole site
    pub fn summary(&self) -> String {
        format!("{}:summary", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(site: &str) -> KeySpace {
        KeySpace::new("dirsearch", &SiteId::new(site).unwrap(), DocKind::Listing)
    }

    #[test]
    fn test_key_layout() {
        let ks = space("s1");
        let id = RecordId::new("l1").unwrap();
        assert_eq!(ks.posting("boots"), "dirsearch:s1:listing:term:boots");
        assert_eq!(ks.term_set(&id), "dirsearch:s1:listing:terms:l1");
        assert_eq!(ks.facet("featured", None), "dirsearch:s1:listing:facet:featured");
        assert_eq!(
            ks.facet("category", Some("c1")),
            "dirsearch:s1:listing:facet:category:c1"
        );
        assert_eq!(ks.summary(), "dirsearch:s1:listing:summary");
    }

    #[test]
    fn test_every_key_starts_with_site_base() {
        let ks = space("s1");
        let id = RecordId::new("l1").unwrap();
        for key in [
            ks.posting("x"),
            ks.term_set(&id),
            ks.facet("f", None),
            ks.facet("f", Some("v")),
            ks.summary(),
        ] {
            assert!(key.starts_with("dirsearch:s1:listing:"), "{}", key);
        }
    }

    #[test]
    fn test_sites_never_share_keys() {
        // "s1" must not be a prefix-collision of "s10"
        let a = space("s1");
        let b = space("s10");
        assert_ne!(a.summary(), b.summary());
        assert!(!b.posting("x").starts_with(&format!("{}:", a.base())));
    }

    #[test]
    fn test_kinds_never_share_keys() {
        let site = SiteId::new("s1").unwrap();
        let listing = KeySpace::new("p", &site, DocKind::Listing);
        let category = KeySpace::new("p", &site, DocKind::Category);
        assert_ne!(listing.posting("boots"), category.posting("boots"));
    }
}
