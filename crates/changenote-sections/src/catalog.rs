//! The fixed set of sections

use changenote_core::config::Config;
use changenote_core::Section;

/// Immutable, display-ordered list of sections
#[derive(Debug, Clone)]
pub struct SectionCatalog {
    sections: Vec<Section>,
}

impl SectionCatalog {
    /// Create a catalog, ordering sections by `sort_order`
    pub fn new(mut sections: Vec<Section>) -> Self {
        sections.sort_by_key(|s| s.sort_order);
        Self { sections }
    }

    /// Build the catalog from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.sections.clone())
    }

    /// Look up a section by uid
    pub fn get(&self, uid: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.uid == uid)
    }

    /// Check whether a uid names a section
    pub fn contains(&self, uid: &str) -> bool {
        self.get(uid).is_some()
    }

    /// Iterate over sections in display order
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the catalog has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Resolve uids to sections in display order, dropping unknown uids
    pub fn sort<I, S>(&self, uids: I) -> Vec<&Section>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let uids: Vec<S> = uids.into_iter().collect();
        self.sections
            .iter()
            .filter(|s| uids.iter().any(|u| u.as_ref() == s.uid))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ordered_by_sort_order() {
        let catalog = SectionCatalog::new(vec![
            Section::new("internal", "Internal Changes", 9),
            Section::new("highlights", "Highlights", 0),
            Section::new("bugfixes", "Bug Fixes", 5),
        ]);

        let uids: Vec<&str> = catalog.iter().map(|s| s.uid.as_str()).collect();
        assert_eq!(uids, vec!["highlights", "bugfixes", "internal"]);
    }

    #[test]
    fn test_default_catalog() {
        let catalog = SectionCatalog::from_config(&Config::default());
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.get("other").unwrap().title, "Other Changes");
        assert!(!catalog.contains("misc"));
    }

    #[test]
    fn test_sort_uids() {
        let catalog = SectionCatalog::from_config(&Config::default());
        let sorted = catalog.sort(["internal", "security", "unknown", "bugfixes"]);
        let uids: Vec<&str> = sorted.iter().map(|s| s.uid.as_str()).collect();
        assert_eq!(uids, vec!["security", "bugfixes", "internal"]);
    }
}
