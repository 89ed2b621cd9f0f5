//! Release workflow orchestration

use serde::Serialize;
use tracing::{info, instrument};

use crate::error::Result;
use crate::types::Version;

use super::finalize::ReleaseFinalizer;
use super::rewrite::{PlaceholderRewriter, RewriteReport};

/// Result of a release
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseOutcome {
    /// Version released
    pub version: String,
    /// What the rewrite pass changed
    pub rewrite: RewriteReport,
    /// Whether the finalizer reported success
    pub finalized: bool,
}

/// Rewrites the placeholder, then hands the release to a finalizer
pub struct ReleaseTextRewriter<F> {
    rewriter: PlaceholderRewriter,
    finalizer: F,
}

impl<F: ReleaseFinalizer> ReleaseTextRewriter<F> {
    /// Create a new release workflow
    pub fn new(rewriter: PlaceholderRewriter, finalizer: F) -> Self {
        Self {
            rewriter,
            finalizer,
        }
    }

    /// Rewrite the source tree and finalize the release.
    ///
    /// Returns the finalizer's verdict unchanged. A rewrite failure aborts
    /// before the finalizer runs; files already rewritten stay rewritten.
    pub fn rewrite_and_release(&self, version: &Version) -> Result<bool> {
        Ok(self.release(version)?.finalized)
    }

    /// Like [`rewrite_and_release`](Self::rewrite_and_release), also returning the rewrite report
    #[instrument(skip_all, fields(version = %version))]
    pub fn release(&self, version: &Version) -> Result<ReleaseOutcome> {
        let rewrite = self.rewriter.rewrite(version)?;
        let finalized = self.finalizer.finalize(version)?;

        info!(finalized, rewritten = rewrite.rewritten.len(), "release finished");
        Ok(ReleaseOutcome {
            version: version.uid().to_string(),
            rewrite,
            finalized,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewriteConfig;
    use crate::error::{ChangenoteError, FinalizeError};
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Records the version and the tree state seen at finalization
    struct RecordingFinalizer {
        file: PathBuf,
        verdict: bool,
        seen: RefCell<Vec<(String, String)>>,
    }

    impl RecordingFinalizer {
        fn new(file: PathBuf, verdict: bool) -> Self {
            Self {
                file,
                verdict,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl ReleaseFinalizer for RecordingFinalizer {
        fn finalize(&self, version: &Version) -> Result<bool> {
            let content = std::fs::read_to_string(&self.file).unwrap_or_default();
            self.seen
                .borrow_mut()
                .push((version.uid().to_string(), content));
            Ok(self.verdict)
        }
    }

    struct FailingFinalizer;

    impl ReleaseFinalizer for FailingFinalizer {
        fn finalize(&self, _version: &Version) -> Result<bool> {
            Err(FinalizeError::SpawnFailed {
                command: "chango release".to_string(),
                message: "not found".to_string(),
            }
            .into())
        }
    }

    fn project() -> (TempDir, PlaceholderRewriter) {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("api.py"), "added in NEXT.VERSION\n").unwrap();
        let rewriter = PlaceholderRewriter::new(&RewriteConfig::default(), temp.path()).unwrap();
        (temp, rewriter)
    }

    #[test]
    fn test_finalizer_sees_rewritten_tree() {
        let (temp, rewriter) = project();
        let finalizer = RecordingFinalizer::new(temp.path().join("src/api.py"), true);
        let release = ReleaseTextRewriter::new(rewriter, &finalizer);

        assert!(release.rewrite_and_release(&Version::new("21.0").unwrap()).unwrap());

        let seen = finalizer.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "21.0");
        assert_eq!(seen[0].1, "added in 21.0\n");
    }

    #[test]
    fn test_finalizer_verdict_returned_verbatim() {
        let (temp, rewriter) = project();
        let finalizer = RecordingFinalizer::new(temp.path().join("src/api.py"), false);
        let release = ReleaseTextRewriter::new(rewriter, &finalizer);

        assert!(!release.rewrite_and_release(&Version::new("21.0").unwrap()).unwrap());
    }

    #[test]
    fn test_finalizer_error_propagates() {
        let (_temp, rewriter) = project();
        let release = ReleaseTextRewriter::new(rewriter, FailingFinalizer);

        let err = release
            .rewrite_and_release(&Version::new("21.0").unwrap())
            .unwrap_err();
        assert!(matches!(err, ChangenoteError::Finalize(_)));
    }

    #[test]
    fn test_rewrite_failure_skips_finalizer() {
        let (temp, rewriter) = project();
        std::fs::write(temp.path().join("src/broken.py"), [0xc3, 0x28]).unwrap();
        let finalizer = RecordingFinalizer::new(temp.path().join("src/api.py"), true);
        let release = ReleaseTextRewriter::new(rewriter, &finalizer);

        assert!(release.rewrite_and_release(&Version::new("21.0").unwrap()).is_err());
        assert!(finalizer.seen.borrow().is_empty());
    }

    #[test]
    fn test_release_outcome_reports_rewrite() {
        let (_temp, rewriter) = project();
        let release = ReleaseTextRewriter::new(rewriter, crate::workflow::NoopFinalizer);

        let outcome = release.release(&Version::new("21.0").unwrap()).unwrap();
        assert_eq!(outcome.version, "21.0");
        assert_eq!(outcome.rewrite.rewritten.len(), 1);
        assert!(outcome.finalized);
    }
}
