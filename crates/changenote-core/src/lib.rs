//! changenote core - configuration, errors and the release rewrite
//!
//! This crate holds the configuration model shared by the CLI and the
//! section classifier, and the release workflow that rewrites the version
//! placeholder before handing over to the change note engine.

pub mod config;
pub mod error;
pub mod types;
pub mod workflow;

pub use error::{ChangenoteError, Result};
pub use types::{Section, Version};
pub use workflow::{
    CommandFinalizer, NoopFinalizer, PlaceholderRewriter, ReleaseFinalizer, ReleaseOutcome,
    ReleaseTextRewriter, RewriteReport,
};
