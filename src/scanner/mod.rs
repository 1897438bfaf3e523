use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Trait for discovering candidate files under a repository root.
pub trait FileScanner {
    /// Walk the root and return matching paths, relative to the root and
    /// sorted for deterministic report output.
    ///
    /// # Errors
    /// Returns an error if the root cannot be read.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Walks the repository tree, dropping any path whose root-relative form
/// contains one of the exclusion fragments.
///
/// The exclusion is a plain substring check, not a gitignore-style matcher:
/// a legitimate file whose path happens to contain the literal fragment is
/// also dropped. Exclusion applies before any file is read.
pub struct RepoScanner {
    exclude_fragments: Vec<String>,
}

impl RepoScanner {
    #[must_use]
    pub const fn new(exclude_fragments: Vec<String>) -> Self {
        Self { exclude_fragments }
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        let text = relative.to_string_lossy();
        self.exclude_fragments
            .iter()
            .any(|fragment| text.contains(fragment.as_str()))
    }

    fn scan_impl(&self, root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| {
                entry
                    .path()
                    .strip_prefix(root)
                    .is_ok_and(|relative| !self.is_excluded(relative))
            })
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.path().strip_prefix(root).ok().map(Path::to_path_buf))
            .collect();

        files.sort();
        files
    }
}

impl FileScanner for RepoScanner {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.scan_impl(root))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
