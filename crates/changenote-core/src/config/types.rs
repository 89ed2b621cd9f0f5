//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::Section;

/// Main configuration for changenote
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Section used when no label matches
    pub default_section: String,

    /// Sections change notes can be filed under
    pub sections: Vec<Section>,

    /// Label to section mapping, in declaration order
    pub mapping: Vec<LabelMapping>,

    /// Change note scanner configuration
    pub scanner: ScannerConfig,

    /// Release placeholder rewrite configuration
    pub rewrite: RewriteConfig,

    /// Release finalization configuration
    pub release: ReleaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_section: "other".to_string(),
            sections: default_sections(),
            mapping: default_mapping(),
            scanner: ScannerConfig::default(),
            rewrite: RewriteConfig::default(),
            release: ReleaseConfig::default(),
        }
    }
}

/// A single label to section entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMapping {
    /// Label or issue type, matched exactly
    pub label: String,
    /// Target section uid
    pub section: String,
}

impl LabelMapping {
    /// Create a new mapping entry
    pub fn new(label: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            section: section.into(),
        }
    }
}

/// Where the change note engine looks for notes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Base directory holding versioned notes
    pub base_directory: PathBuf,

    /// Directory (relative to the base) holding unreleased notes
    pub unreleased_directory: PathBuf,

    /// GitHub owner the notes link to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// GitHub repository the notes link to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl ScannerConfig {
    /// Resolve the unreleased directory against a project directory
    pub fn unreleased_path(&self, project_dir: &Path) -> PathBuf {
        project_dir
            .join(&self.base_directory)
            .join(&self.unreleased_directory)
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            base_directory: PathBuf::from("."),
            unreleased_directory: PathBuf::from("unreleased"),
            owner: None,
            repository: None,
        }
    }
}

/// Release-time placeholder rewrite
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Directory to scan, relative to the project directory
    pub root: PathBuf,

    /// File extensions to rewrite (without the leading dot)
    pub extensions: Vec<String>,

    /// Regular expression matching the placeholder
    pub placeholder: String,

    /// Files never rewritten, relative to `root` unless absolute
    pub exclude: Vec<PathBuf>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("src"),
            extensions: vec!["py".to_string()],
            placeholder: r"NEXT\.VERSION".to_string(),
            exclude: vec![PathBuf::from("docs/source/contribute.rst")],
        }
    }
}

/// Release finalization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Shell command that finalizes the release; `{version}` is substituted
    pub finalize_command: Option<String>,
}

fn default_sections() -> Vec<Section> {
    vec![
        Section::new("highlights", "Highlights", 0),
        Section::new("breaking", "Breaking Changes", 1),
        Section::new("security", "Security Changes", 2),
        Section::new("deprecations", "Deprecations", 3),
        Section::new("features", "New Features", 4),
        Section::new("bugfixes", "Bug Fixes", 5),
        Section::new("dependencies", "Dependencies", 6),
        Section::new("other", "Other Changes", 7),
        Section::new("documentation", "Documentation", 8),
        Section::new("internal", "Internal Changes", 9),
    ]
}

fn default_mapping() -> Vec<LabelMapping> {
    [
        ("🐛 bug", "bugfixes"),
        ("💡 feature", "features"),
        ("🧹 chore", "internal"),
        ("⚙️ bot-api", "features"),
        ("⚙️ documentation", "documentation"),
        ("⚙️ tests", "internal"),
        ("⚙️ ci-cd", "internal"),
        ("⚙️ security", "security"),
        ("⚙️ examples", "documentation"),
        ("⚙️ type-hinting", "other"),
        ("🛠 refactor", "internal"),
        ("🛠 breaking", "breaking"),
        ("⚙️ dependencies", "dependencies"),
        ("🔗 github-actions", "internal"),
        ("🛠 code-quality", "internal"),
    ]
    .into_iter()
    .map(|(label, section)| LabelMapping::new(label, section))
    .collect()
}
