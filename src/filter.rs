/*!
 * Path selection rules
 */

use std::path::{Component, Path};

use crate::config::FilterConfig;

/// Decides which paths take part in an export
#[derive(Debug, Clone, Copy)]
pub struct PathFilter<'a> {
    rules: &'a FilterConfig,
}

impl<'a> PathFilter<'a> {
    /// Create a filter over the given rules
    pub fn new(rules: &'a FilterConfig) -> Self {
        Self { rules }
    }

    /// The rules this filter applies
    pub fn rules(&self) -> &'a FilterConfig {
        self.rules
    }

    /// Check whether a file should be exported.
    ///
    /// A path is rejected when its file name is `output_filename` or carries the
    /// export suffix, when any of its segments is an excluded directory name, or
    /// when its lower-cased extension is not in the include set.
    pub fn should_include(&self, path: &Path, output_filename: &str) -> bool {
        let file_name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };

        // Never export the report itself or an earlier one
        if file_name == output_filename || file_name.ends_with(&self.rules.export_suffix) {
            return false;
        }

        if self.has_excluded_segment(path) {
            return false;
        }

        match extension_of(path) {
            Some(ext) => self.rules.include_extensions.contains(&ext),
            None => false,
        }
    }

    /// Check whether a directory is hidden from the rendered tree.
    ///
    /// Unlike [`should_include`](Self::should_include), this matches the tokens
    /// as substrings of the directory name, so `buildSrc` is hidden too.
    pub fn hides_tree_dir(&self, dir_name: &str) -> bool {
        self.rules
            .tree_exclude_tokens
            .iter()
            .any(|token| dir_name.contains(token.as_str()))
    }

    /// Check whether a file is one of the known binary formats
    pub fn is_binary(&self, path: &Path) -> bool {
        extension_of(path).map_or(false, |ext| self.rules.binary_extensions.contains(&ext))
    }

    fn has_excluded_segment(&self, path: &Path) -> bool {
        path.components().any(|component| match component {
            Component::Normal(segment) => self
                .rules
                .exclude_dirs
                .contains(&*segment.to_string_lossy()),
            _ => false,
        })
    }
}

/// Lower-cased extension with its leading dot, e.g. `.kt`.
///
/// Dotfiles such as `.gitignore` have no extension.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT: &str = "codebase_export.txt";

    fn check(path: &str) -> bool {
        let rules = FilterConfig::default();
        PathFilter::new(&rules).should_include(Path::new(path), OUTPUT)
    }

    #[test]
    fn test_includes_known_extensions() {
        assert!(check("app/src/main/java/com/dev/MainActivity.kt"));
        assert!(check("settings.gradle"));
        assert!(check("app/src/main/AndroidManifest.xml"));
        assert!(check("README.md"));
        assert!(check("proguard-rules.pro"));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(check("Legacy.JAVA"));
        assert!(check("NOTES.Md"));
    }

    #[test]
    fn test_unknown_extension_is_excluded() {
        assert!(!check("icon.png"));
        assert!(!check("Makefile"));
        assert!(!check("lib.rs"));
    }

    #[test]
    fn test_dotfile_has_no_extension() {
        // `.gitignore` is listed but a dotfile has no extension to match
        assert!(!check(".gitignore"));
        assert_eq!(extension_of(Path::new(".gitignore")), None);
        assert_eq!(extension_of(Path::new("a.9.PNG")).as_deref(), Some(".png"));
    }

    #[test]
    fn test_output_file_is_excluded() {
        assert!(!check("codebase_export.txt"));
        assert!(!check("docs/codebase_export.txt"));
        assert!(!check("ejTouch_codebase_export.txt"));
        assert!(check("export.txt"));
    }

    #[test]
    fn test_custom_output_filename_is_excluded() {
        let rules = FilterConfig::default();
        let filter = PathFilter::new(&rules);
        assert!(!filter.should_include(Path::new("dump.txt"), "dump.txt"));
        assert!(filter.should_include(Path::new("codebase_export.txt"), "dump.txt"));
    }

    #[test]
    fn test_excluded_segment_rejects_any_extension() {
        assert!(!check("build/generated/R.java"));
        assert!(!check("app/build/intermediates/manifest.xml"));
        assert!(!check(".git/config.json"));
        assert!(!check("node_modules/pkg/package.json"));
        assert!(!check("app/.cxx/notes.txt"));
    }

    #[test]
    fn test_segments_match_whole_names_only() {
        assert!(check("buildSrc/src/main/kotlin/Deps.kt"));
        assert!(check("rebuild/notes.md"));
        assert!(check("my.git/readme.md"));
    }

    #[test]
    fn test_tree_dir_matching_uses_substrings() {
        let rules = FilterConfig::default();
        let filter = PathFilter::new(&rules);

        assert!(filter.hides_tree_dir("build"));
        assert!(filter.hides_tree_dir("buildSrc"));
        assert!(filter.hides_tree_dir("my.idea.backup"));
        assert!(!filter.hides_tree_dir("app"));

        // These are excluded for collection but still drawn in the tree
        assert!(!filter.hides_tree_dir(".git"));
        assert!(!filter.hides_tree_dir("node_modules"));
    }

    #[test]
    fn test_binary_detection() {
        let rules = FilterConfig::default();
        let filter = PathFilter::new(&rules);
        assert!(filter.is_binary(Path::new("res/drawable/icon.PNG")));
        assert!(filter.is_binary(Path::new("bg.9.png")));
        assert!(filter.is_binary(Path::new("photo.jpeg")));
        assert!(!filter.is_binary(Path::new("Main.kt")));
        assert!(!filter.is_binary(Path::new("png")));
    }
}
