//! Label to section classification

use std::collections::{BTreeSet, HashSet};

use changenote_core::config::{Config, LabelMapping};
use tracing::{debug, trace};

/// Uid of the section used when nothing matches
pub const DEFAULT_SECTION: &str = "other";

/// Decides which sections a change note belongs to
pub trait SectionClassifier: Send + Sync {
    /// Classify a change from its labels and the types of its linked issues.
    ///
    /// The result is never empty.
    fn classify(&self, labels: &[String], issue_types: Option<&[String]>) -> BTreeSet<String>;
}

/// Ordered label to section-uid table
#[derive(Debug, Clone, Default)]
pub struct SectionMapping {
    entries: Vec<LabelMapping>,
}

impl SectionMapping {
    /// Create a mapping from its entries
    pub fn new(entries: Vec<LabelMapping>) -> Self {
        Self { entries }
    }

    /// Entries in declaration order
    pub fn entries(&self) -> &[LabelMapping] {
        &self.entries
    }

    /// Section of the first entry with exactly this label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.section.as_str())
    }

    /// Every target section whose label is in `tags`
    pub fn sections_for(&self, tags: &HashSet<&str>) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|e| tags.contains(e.label.as_str()))
            .map(|e| e.section.clone())
            .collect()
    }
}

/// Classifies by looking labels and issue types up in a [`SectionMapping`].
///
/// All matched sections are returned, so a change labelled both as a bug and
/// as a security fix lands in both sections. Unknown labels are ignored.
#[derive(Debug, Clone)]
pub struct LabelSectionClassifier {
    mapping: SectionMapping,
    default_section: String,
}

impl LabelSectionClassifier {
    /// Create a classifier falling back to [`DEFAULT_SECTION`]
    pub fn new(mapping: SectionMapping) -> Self {
        Self {
            mapping,
            default_section: DEFAULT_SECTION.to_string(),
        }
    }

    /// Build the classifier from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(SectionMapping::new(config.mapping.clone()))
            .with_default_section(config.default_section.clone())
    }

    /// Use a different fallback section
    pub fn with_default_section(mut self, uid: impl Into<String>) -> Self {
        self.default_section = uid.into();
        self
    }

    /// The mapping in use
    pub fn mapping(&self) -> &SectionMapping {
        &self.mapping
    }
}

impl SectionClassifier for LabelSectionClassifier {
    fn classify(&self, labels: &[String], issue_types: Option<&[String]>) -> BTreeSet<String> {
        let combined: HashSet<&str> = labels
            .iter()
            .chain(issue_types.unwrap_or_default())
            .map(String::as_str)
            .collect();
        trace!(tags = ?combined, "classifying change");

        let found = self.mapping.sections_for(&combined);
        if found.is_empty() {
            debug!(default = %self.default_section, "no label matched, using default section");
            return BTreeSet::from([self.default_section.clone()]);
        }

        debug!(sections = ?found, "classified change");
        found
    }
}
