//! Version placeholder rewriting
//!
//! Before a release is finalized, every matching source file under the
//! rewrite root has its placeholder replaced with the version uid. Files in
//! the exclusion set are never touched and files without a placeholder are
//! never written.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::{NoExpand, Regex};
use serde::Serialize;
use tracing::{debug, info, instrument, trace};
use walkdir::WalkDir;

use crate::config::RewriteConfig;
use crate::error::{Result, RewriteError};
use crate::types::Version;

/// Outcome of a rewrite pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct RewriteReport {
    /// Number of files matching the extension filter
    pub scanned: usize,
    /// Files whose content changed
    pub rewritten: Vec<PathBuf>,
    /// Matching files skipped because they are excluded
    pub excluded: Vec<PathBuf>,
    /// Total number of placeholder occurrences replaced
    pub replacements: usize,
}

impl RewriteReport {
    /// Whether any file was (or would be) modified
    pub fn is_noop(&self) -> bool {
        self.rewritten.is_empty()
    }
}

/// Replaces the version placeholder across a source subtree
#[derive(Debug, Clone)]
pub struct PlaceholderRewriter {
    root: PathBuf,
    extensions: Vec<String>,
    pattern: Regex,
    exclusions: HashSet<PathBuf>,
}

impl PlaceholderRewriter {
    /// Build a rewriter for `config`, resolving paths against `project_dir`.
    ///
    /// The root and the exclusion entries are canonicalized so that the
    /// exclusion check compares like with like.
    pub fn new(config: &RewriteConfig, project_dir: &Path) -> Result<Self> {
        let root_path = project_dir.join(&config.root);
        let root = std::fs::canonicalize(&root_path).map_err(|source| RewriteError::Root {
            path: root_path.clone(),
            source,
        })?;

        let pattern = Regex::new(&config.placeholder).map_err(|source| RewriteError::Pattern {
            pattern: config.placeholder.clone(),
            source,
        })?;

        let exclusions = config
            .exclude
            .iter()
            .map(|p| normalize(&root.join(p)))
            .collect();

        Ok(Self {
            root,
            extensions: config.extensions.clone(),
            pattern,
            exclusions,
        })
    }

    /// Check whether a path is in the exclusion set
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclusions.contains(&normalize(path))
    }

    /// Rewrite all placeholders to `version`, writing changed files in place
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn rewrite(&self, version: &Version) -> Result<RewriteReport> {
        self.run(version, true)
    }

    /// Compute what [`rewrite`](Self::rewrite) would change without writing
    pub fn plan(&self, version: &Version) -> Result<RewriteReport> {
        self.run(version, false)
    }

    fn run(&self, version: &Version, write: bool) -> Result<RewriteReport> {
        info!(version = %version, write, "rewriting version placeholder");
        let mut report = RewriteReport::default();

        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|source| RewriteError::Walk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                source,
            })?;

            if !entry.file_type().is_file() || !self.matches_extension(entry.path()) {
                continue;
            }
            report.scanned += 1;

            // Symlinks are not followed, so paths below the canonical root are canonical.
            let path = entry.path();
            if self.exclusions.contains(path) {
                debug!(path = %path.display(), "skipping excluded file");
                report.excluded.push(path.to_path_buf());
                continue;
            }

            let count = self.rewrite_file(path, version, write)?;
            if count > 0 {
                report.replacements += count;
                report.rewritten.push(path.to_path_buf());
            }
        }

        info!(
            scanned = report.scanned,
            rewritten = report.rewritten.len(),
            excluded = report.excluded.len(),
            replacements = report.replacements,
            "placeholder rewrite complete"
        );
        Ok(report)
    }

    fn rewrite_file(&self, path: &Path, version: &Version, write: bool) -> Result<usize> {
        let content = std::fs::read_to_string(path).map_err(|source| RewriteError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let count = self.pattern.find_iter(&content).count();
        if count == 0 {
            trace!(path = %path.display(), "no placeholder");
            return Ok(0);
        }

        let modified = self.pattern.replace_all(&content, NoExpand(version.uid()));
        if modified == content {
            return Ok(0);
        }

        debug!(path = %path.display(), count, "replacing placeholder");
        if write {
            std::fs::write(path, modified.as_bytes()).map_err(|source| RewriteError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(count)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.iter().any(|x| x == e))
    }
}

/// Canonicalize a path if it exists, otherwise keep it as given
fn normalize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn version(uid: &str) -> Version {
        Version::new(uid).unwrap()
    }

    fn setup() -> (TempDir, RewriteConfig) {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        std::fs::create_dir_all(src.join("pkg")).unwrap();
        std::fs::create_dir_all(src.join("docs/source")).unwrap();

        std::fs::write(
            src.join("pkg/bot.py"),
            "# .. versionadded:: NEXT.VERSION\ndef send(): ...\n",
        )
        .unwrap();
        std::fs::write(src.join("pkg/plain.py"), "x = 1\n").unwrap();
        std::fs::write(src.join("pkg/notes.txt"), "NEXT.VERSION\n").unwrap();
        std::fs::write(
            src.join("docs/source/contribute.py"),
            "use NEXT.VERSION for new APIs\n",
        )
        .unwrap();

        let config = RewriteConfig {
            exclude: vec![PathBuf::from("docs/source/contribute.py")],
            ..RewriteConfig::default()
        };
        (temp, config)
    }

    fn read(temp: &TempDir, rel: &str) -> String {
        std::fs::read_to_string(temp.path().join("src").join(rel)).unwrap()
    }

    #[test]
    fn test_single_occurrence_replaced() {
        let (temp, config) = setup();
        let rewriter = PlaceholderRewriter::new(&config, temp.path()).unwrap();

        let report = rewriter.rewrite(&version("22.0")).unwrap();

        assert_eq!(read(&temp, "pkg/bot.py"), "# .. versionadded:: 22.0\ndef send(): ...\n");
        assert_eq!(report.rewritten.len(), 1);
        assert_eq!(report.replacements, 1);
    }

    #[test]
    fn test_all_occurrences_replaced() {
        let (temp, config) = setup();
        std::fs::write(
            temp.path().join("src/pkg/multi.py"),
            "NEXT.VERSION NEXT.VERSION\nNEXT.VERSION\n",
        )
        .unwrap();
        let rewriter = PlaceholderRewriter::new(&config, temp.path()).unwrap();

        rewriter.rewrite(&version("1.2")).unwrap();

        assert_eq!(read(&temp, "pkg/multi.py"), "1.2 1.2\n1.2\n");
    }

    #[test]
    fn test_excluded_file_untouched() {
        let (temp, config) = setup();
        let before = read(&temp, "docs/source/contribute.py");
        let rewriter = PlaceholderRewriter::new(&config, temp.path()).unwrap();

        let report = rewriter.rewrite(&version("22.0")).unwrap();

        assert_eq!(read(&temp, "docs/source/contribute.py"), before);
        assert_eq!(report.excluded.len(), 1);
    }

    #[test]
    fn test_exclusion_matches_through_relative_project_dir() {
        let (temp, config) = setup();
        let relative = temp.path().join("src").join("..");
        let rewriter = PlaceholderRewriter::new(&config, &relative).unwrap();

        assert!(rewriter.is_excluded(&temp.path().join("src/docs/source/contribute.py")));
        rewriter.rewrite(&version("22.0")).unwrap();
        assert!(read(&temp, "docs/source/contribute.py").contains("NEXT.VERSION"));
    }

    #[test]
    fn test_other_extensions_ignored() {
        let (temp, config) = setup();
        let rewriter = PlaceholderRewriter::new(&config, temp.path()).unwrap();

        rewriter.rewrite(&version("22.0")).unwrap();

        assert_eq!(read(&temp, "pkg/notes.txt"), "NEXT.VERSION\n");
    }

    #[test]
    fn test_file_without_placeholder_not_written() {
        let (temp, config) = setup();
        let path = temp.path().join("src/pkg/plain.py");
        let old = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000);
        std::fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(old)
            .unwrap();
        let rewriter = PlaceholderRewriter::new(&config, temp.path()).unwrap();

        rewriter.rewrite(&version("22.0")).unwrap();

        let mtime = std::fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(mtime, old);
        assert_eq!(read(&temp, "pkg/plain.py"), "x = 1\n");
    }

    #[test]
    fn test_second_rewrite_is_noop() {
        let (temp, config) = setup();
        let rewriter = PlaceholderRewriter::new(&config, temp.path()).unwrap();

        let first = rewriter.rewrite(&version("22.0")).unwrap();
        let second = rewriter.rewrite(&version("22.0")).unwrap();

        assert!(!first.is_noop());
        assert!(second.is_noop());
        assert_eq!(second.replacements, 0);
    }

    #[test]
    fn test_replacement_is_literal() {
        let (temp, config) = setup();
        let rewriter = PlaceholderRewriter::new(&config, temp.path()).unwrap();

        rewriter.rewrite(&version("$1.0")).unwrap();

        assert!(read(&temp, "pkg/bot.py").contains("versionadded:: $1.0"));
    }

    #[test]
    fn test_plan_does_not_write() {
        let (temp, config) = setup();
        let rewriter = PlaceholderRewriter::new(&config, temp.path()).unwrap();

        let report = rewriter.plan(&version("22.0")).unwrap();

        assert_eq!(report.rewritten.len(), 1);
        assert!(read(&temp, "pkg/bot.py").contains("NEXT.VERSION"));
    }

    #[test]
    fn test_missing_root_is_error() {
        let temp = TempDir::new().unwrap();
        let result = PlaceholderRewriter::new(&RewriteConfig::default(), temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_non_utf8_file_is_read_error() {
        let (temp, config) = setup();
        std::fs::write(temp.path().join("src/pkg/binary.py"), [0xff, 0xfe, 0x00]).unwrap();
        let rewriter = PlaceholderRewriter::new(&config, temp.path()).unwrap();

        let err = rewriter.rewrite(&version("22.0")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::ChangenoteError::Rewrite(RewriteError::Read { .. })
        ));
    }
}
