//! changenote sections - classification of change notes into sections
//!
//! Labels from pull requests and types of linked issues are mapped onto the
//! configured sections. The classifier is a strategy object so engines can
//! be generic over how a change is categorised.

pub mod catalog;
pub mod classifier;

pub use catalog::SectionCatalog;
pub use classifier::{LabelSectionClassifier, SectionClassifier, SectionMapping, DEFAULT_SECTION};
