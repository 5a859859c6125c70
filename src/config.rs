/*!
 * Configuration handling for codedump
 */

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::ensure;
use crate::error::Result;

/// Directory scanned when none is given
pub const DEFAULT_PROJECT_ROOT: &str = ".";

/// Report file written when none is given
pub const DEFAULT_OUTPUT_FILE: &str = "codebase_export.txt";

/// Deepest directory level rendered in the project tree
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Name suffix reserved for earlier exports
pub const EXPORT_SUFFIX: &str = "_codebase_export.txt";

const INCLUDE_EXTENSIONS: &[&str] = &[
    ".java",
    ".kt",
    ".xml",
    ".gradle",
    ".properties",
    ".json",
    ".md",
    ".txt",
    ".yml",
    ".yaml",
    ".pro",
    ".gitignore",
];

const EXCLUDE_DIRS: &[&str] = &[
    "build",
    ".gradle",
    ".idea",
    "captures",
    ".externalNativeBuild",
    ".cxx",
    "node_modules",
    "venv",
    "__pycache__",
    ".git",
    ".kotlin",
];

const TREE_EXCLUDE_TOKENS: &[&str] = &[
    "build",
    ".gradle",
    ".idea",
    "captures",
    ".externalNativeBuild",
    ".cxx",
];

const BINARY_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".webp", ".gif", ".bmp", ".ico", ".9.png",
];

/// Command-line arguments for codedump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codedump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Export a project's directory tree and source files into a single text report",
    long_about = "Walks an Android-style project, renders its directory tree and concatenates every recognised source file into one plain-text report."
)]
pub struct Args {
    /// Project directory to export (prompted for when omitted on a terminal)
    pub directory_path: Option<String>,

    /// Output report file name
    #[clap(default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress logging and the progress bar
    #[clap(short, long)]
    pub quiet: bool,
}

/// Fixed selection rules shared by the tree renderer, collector and extractor
#[derive(Clone, Debug)]
pub struct FilterConfig {
    /// Lower-case extensions, with the leading dot, whose files are exported
    pub include_extensions: HashSet<String>,

    /// Directory names that exclude every path passing through them
    pub exclude_dirs: HashSet<String>,

    /// Substrings that hide a directory from the rendered tree
    pub tree_exclude_tokens: Vec<String>,

    /// Lower-case extensions replaced by a size placeholder instead of content
    pub binary_extensions: HashSet<String>,

    /// File name suffix marking a previous export
    pub export_suffix: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        fn owned(items: &'static [&'static str]) -> impl Iterator<Item = String> {
            items.iter().map(|s| s.to_string())
        }

        Self {
            include_extensions: owned(INCLUDE_EXTENSIONS).collect(),
            exclude_dirs: owned(EXCLUDE_DIRS).collect(),
            tree_exclude_tokens: owned(TREE_EXCLUDE_TOKENS).collect(),
            binary_extensions: owned(BINARY_EXTENSIONS).collect(),
            export_suffix: EXPORT_SUFFIX.to_string(),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Project root to export, as supplied by the user
    pub target_dir: PathBuf,

    /// Report file path
    pub output_file: PathBuf,

    /// Deepest tree level rendered
    pub max_depth: usize,

    /// Selection rules
    pub filters: FilterConfig,
}

impl Config {
    /// Create a configuration with the default rules
    pub fn new(target_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            output_file: output_file.into(),
            max_depth: DEFAULT_MAX_DEPTH,
            filters: FilterConfig::default(),
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let target_dir = args
            .directory_path
            .unwrap_or_else(|| DEFAULT_PROJECT_ROOT.to_string());
        Self::new(target_dir, args.output_file)
    }

    /// File name of the report, used to keep it out of its own contents
    pub fn output_filename(&self) -> String {
        self.output_file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.is_dir(),
            PathNotFound,
            "Project directory '{}' does not exist",
            self.target_dir.display()
        );

        ensure!(
            !self.output_filename().is_empty(),
            Config,
            "Output file '{}' has no file name",
            self.output_file.display()
        );

        // Check if output file directory exists
        if let Some(parent) = self.output_file.parent() {
            ensure!(
                parent == Path::new("") || parent.is_dir(),
                PathNotFound,
                "Output directory not found: {}",
                parent.display()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use tempfile::tempdir;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["codedump"]);
        assert_eq!(args.directory_path, None);
        assert_eq!(args.output_file, DEFAULT_OUTPUT_FILE);

        let config = Config::from_args(args);
        assert_eq!(config.target_dir, PathBuf::from("."));
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.output_filename(), "codebase_export.txt");
    }

    #[test]
    fn test_args_positional() {
        let args = Args::parse_from(["codedump", "-vv", "/tmp/app", "out/app_export.txt"]);
        assert_eq!(args.verbose, 2);
        let config = Config::from_args(args);
        assert_eq!(config.target_dir, PathBuf::from("/tmp/app"));
        assert_eq!(config.output_filename(), "app_export.txt");
    }

    #[test]
    fn test_tree_tokens_are_subset_of_exclude_dirs() {
        let filters = FilterConfig::default();
        for token in &filters.tree_exclude_tokens {
            assert!(filters.exclude_dirs.contains(token), "{token}");
        }
        assert!(filters.include_extensions.contains(".kt"));
        assert!(!filters.include_extensions.contains(".png"));
        assert!(filters.binary_extensions.contains(".png"));
    }

    #[test]
    fn test_validate_missing_root() {
        let temp = tempdir().unwrap();
        let config = Config::new(temp.path().join("missing"), "out.txt");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ExportError::PathNotFound(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_missing_output_directory() {
        let temp = tempdir().unwrap();
        let config = Config::new(temp.path(), temp.path().join("nope").join("out.txt"));
        assert!(matches!(
            config.validate(),
            Err(ExportError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_validate_ok() {
        let temp = tempdir().unwrap();
        assert!(Config::new(temp.path(), "out.txt").validate().is_ok());
        assert!(Config::new(temp.path(), temp.path().join("out.txt"))
            .validate()
            .is_ok());
    }
}
