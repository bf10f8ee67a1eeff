// Client-side filtering over an already loaded catalog
use crate::models::GameEntry;

/// Search box plus platform and store selects. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub search: Option<String>,
    pub platform: Option<String>,
    pub store: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CatalogFilter {
    pub fn new(search: Option<String>, platform: Option<String>, store: Option<String>) -> Self {
        Self {
            search: non_blank(search),
            platform: non_blank(platform),
            store: non_blank(store),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.platform.is_none() && self.store.is_none()
    }

    /// `platform` and `store` are the shelf the entry was listed under, when
    /// it has one. An entry also matches on its own `platforms` and `store`.
    pub fn matches(&self, entry: &GameEntry, platform: Option<&str>, store: Option<&str>) -> bool {
        if let Some(needle) = &self.search {
            if !entry.matches_title(needle) {
                return false;
            }
        }

        if let Some(wanted) = &self.platform {
            let on_shelf = platform.map_or(false, |p| p.eq_ignore_ascii_case(wanted));
            if !on_shelf && !entry.has_platform(wanted) {
                return false;
            }
        }

        if let Some(wanted) = &self.store {
            let on_shelf = store.map_or(false, |s| s.eq_ignore_ascii_case(wanted));
            if !on_shelf && !entry.has_store(wanted) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn entry(title: &str) -> GameEntry {
        GameEntry::new(title, "https://example.com")
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = CatalogFilter::new(Some("  ".to_string()), None, Some(String::new()));
        assert!(filter.is_empty());
        assert!(filter.matches(&entry("Portal"), None, None));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filter = CatalogFilter::new(Some("PORT".to_string()), None, None);
        assert!(filter.matches(&entry("Portal 2"), Some("pc"), Some("steam")));
        assert!(!filter.matches(&entry("Half-Life"), Some("pc"), Some("steam")));
    }

    #[test]
    fn test_platform_matches_shelf_or_entry_tags() {
        let filter = CatalogFilter::new(None, Some("PS5".to_string()), None);
        let mut tagged = entry("Genshin");
        tagged.platforms = BTreeSet::from(["ps5".to_string(), "pc".to_string()]);

        assert!(filter.matches(&entry("Warframe"), Some("ps5"), None));
        assert!(filter.matches(&tagged, Some("pc"), None));
        assert!(!filter.matches(&entry("Warframe"), Some("pc"), None));
    }

    #[test]
    fn test_store_matches_shelf_or_entry_store() {
        let filter = CatalogFilter::new(None, None, Some("steam".to_string()));
        let mut listed = entry("Hades");
        listed.store = Some("Steam".to_string());

        assert!(filter.matches(&entry("Portal"), None, Some("STEAM")));
        assert!(filter.matches(&listed, None, Some("other")));
        assert!(!filter.matches(&entry("Fortnite"), None, Some("epic")));
    }
}
