/*!
 * codedump - Export a project's structure and source files as one text report
 *
 * This library walks a project directory, draws its directory tree and
 * concatenates every recognised source file into a single plain-text file.
 */

pub mod config;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod report;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Config, FilterConfig};
pub use error::{ExportError, Result};
pub use extractor::ContentExtractor;
pub use filter::PathFilter;
pub use report::{Reporter, RunReport};
pub use scanner::{collect_files, Scanner};
pub use tree::{render_tree, TreeRenderer};
pub use types::{ExportSummary, FileEntry, TextEncoding};
pub use utils::{format_file_size, project_name};
pub use writer::ReportWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
