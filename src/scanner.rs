/*!
 * File collection
 */

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::filter::PathFilter;
use crate::types::FileEntry;

/// Collects the files that make up the report body
pub struct Scanner<'a> {
    /// Scan root
    root: PathBuf,
    /// Selection rules
    filter: PathFilter<'a>,
    /// Report file name, never collected
    output_filename: String,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner
    pub fn new(
        root: impl Into<PathBuf>,
        filter: PathFilter<'a>,
        output_filename: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            filter,
            output_filename: output_filename.into(),
        }
    }

    /// Create a scanner for the configured project
    pub fn from_config(config: &'a Config) -> Self {
        Self::new(
            &config.target_dir,
            PathFilter::new(&config.filters),
            config.output_filename(),
        )
    }

    /// Walk the whole tree and return every exportable file, sorted
    /// case-insensitively by relative path.
    ///
    /// Unlike the rendered tree, collection has no depth limit.
    pub fn scan(&self) -> Vec<FileEntry> {
        let mut files: Vec<FileEntry> = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| !self.is_pruned(e))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Error walking entry: {}", e);
                    None
                }
            })
            .filter_map(|entry| self.process_entry(&entry))
            .collect();

        files.sort_by_cached_key(FileEntry::sort_key);
        log::debug!("Collected {} files under {}", files.len(), self.root.display());
        files
    }

    fn process_entry(&self, entry: &DirEntry) -> Option<FileEntry> {
        let path = entry.path();
        // Follows symlinks so linked files are exported too
        if !path.is_file() {
            return None;
        }

        let relative = path.strip_prefix(&self.root).ok()?;
        if !self.filter.should_include(relative, &self.output_filename) {
            log::trace!("Skipping {}", relative.display());
            return None;
        }

        Some(FileEntry::new(relative.to_string_lossy(), path))
    }

    /// Excluded directories cannot contain exportable files, so they are not descended into
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self
                .filter
                .rules()
                .exclude_dirs
                .contains(&*entry.file_name().to_string_lossy())
    }
}

/// Convenience wrapper over [`Scanner::scan`]
pub fn collect_files(filter: PathFilter<'_>, root: &Path, output_filename: &str) -> Vec<FileEntry> {
    Scanner::new(root, filter, output_filename).scan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    fn relative_paths(root: &Path, output: &str) -> Vec<String> {
        let rules = FilterConfig::default();
        collect_files(PathFilter::new(&rules), root, output)
            .into_iter()
            .map(|f| f.relative_path.replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_collects_without_depth_limit() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "a/b/c/d/e/f/g/h/i/j/k/l/Deep.kt");
        touch(temp.path(), "Top.kt");

        assert_eq!(
            relative_paths(temp.path(), "out.txt"),
            vec!["a/b/c/d/e/f/g/h/i/j/k/l/Deep.kt", "Top.kt"]
        );
    }

    #[test]
    fn test_sorted_case_insensitively() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "b.kt");
        touch(temp.path(), "A.kt");
        touch(temp.path(), "C.kt");
        touch(temp.path(), "app/Z.kt");

        assert_eq!(
            relative_paths(temp.path(), "out.txt"),
            vec!["A.kt", "app/Z.kt", "b.kt", "C.kt"]
        );
    }

    #[test]
    fn test_applies_path_filter() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "a.kt");
        touch(temp.path(), "b.png");
        touch(temp.path(), "build/c.kt");
        touch(temp.path(), "app/build/d.kt");
        touch(temp.path(), "buildSrc/e.kt");
        touch(temp.path(), "out.txt");
        touch(temp.path(), "prev_codebase_export.txt");

        assert_eq!(
            relative_paths(temp.path(), "out.txt"),
            vec!["a.kt", "buildSrc/e.kt"]
        );
    }

    #[test]
    fn test_entries_carry_absolute_paths() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "src/Main.java");

        let rules = FilterConfig::default();
        let files = Scanner::new(temp.path(), PathFilter::new(&rules), "out.txt").scan();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].absolute_path, temp.path().join("src").join("Main.java"));
    }

    #[test]
    fn test_scan_is_idempotent() {
        let temp = tempdir().unwrap();
        for name in ["x/1.kt", "Y/2.xml", "z.md", "a/B.json"] {
            touch(temp.path(), name);
        }
        let first = relative_paths(temp.path(), "out.txt");
        let second = relative_paths(temp.path(), "out.txt");
        assert_eq!(first, second);

        let mut sorted = first.clone();
        sorted.sort_by_key(|p| p.to_lowercase());
        assert_eq!(first, sorted);
    }

    #[test]
    fn test_root_named_like_excluded_dir() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("build");
        touch(&root, "Main.kt");

        assert_eq!(relative_paths(&root, "out.txt"), vec!["Main.kt"]);
    }

    #[test]
    fn test_empty_root() {
        let temp = tempdir().unwrap();
        assert!(relative_paths(temp.path(), "out.txt").is_empty());
    }
}
