/*!
 * Project tree rendering
 *
 * The tree is produced lazily, one formatted line at a time. A directory is
 * only listed when the iterator reaches it, so callers can stream the output
 * straight into the report.
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::filter::PathFilter;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const BLANK_INDENT: &str = "    ";

/// Placeholder drawn in place of a directory that cannot be listed
pub const PERMISSION_DENIED: &str = "[Permission Denied]";

/// Renders the directory tree shown at the top of a report
#[derive(Debug, Clone, Copy)]
pub struct TreeRenderer<'a> {
    filter: PathFilter<'a>,
    output_filename: &'a str,
    max_depth: usize,
}

impl<'a> TreeRenderer<'a> {
    /// Create a renderer
    pub fn new(filter: PathFilter<'a>, output_filename: &'a str, max_depth: usize) -> Self {
        Self {
            filter,
            output_filename,
            max_depth,
        }
    }

    /// Render the tree below `root`, starting at depth zero
    pub fn render(&self, root: &Path) -> TreeLines<'a> {
        self.render_from(root, "", 0)
    }

    /// Render the tree below `root` as if it were already `current_depth` levels deep.
    ///
    /// Nothing is produced once `current_depth` exceeds the maximum depth.
    pub fn render_from(&self, root: &Path, prefix: &str, current_depth: usize) -> TreeLines<'a> {
        TreeLines {
            renderer: *self,
            root: root.to_path_buf(),
            stack: vec![Frame::Unread {
                dir: root.to_path_buf(),
                prefix: prefix.to_string(),
                depth: current_depth,
            }],
        }
    }

    /// List the visible entries of one directory, directories first.
    ///
    /// Entries are sorted before filtering, and each visible entry remembers
    /// whether it was last in the full listing. A hidden trailing entry
    /// therefore leaves no `└──` connector at that level.
    fn list(&self, root: &Path, dir: &Path) -> io::Result<Vec<TreeItem>> {
        let mut items = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.path() == Some(dir) => {
                    return Err(err.into_io_error().unwrap_or_else(|| {
                        io::Error::new(io::ErrorKind::Other, "directory walk failed")
                    }));
                }
                Err(err) => {
                    log::debug!("Skipping unreadable tree entry: {}", err);
                    continue;
                }
            };

            // Symlinks are resolved here; a dangling one is neither a file nor
            // a directory and is drawn as a plain leaf.
            let (is_dir, is_file) = match fs::metadata(entry.path()) {
                Ok(meta) => (meta.is_dir(), meta.is_file()),
                Err(err) => {
                    log::debug!("Cannot resolve {}: {}", entry.path().display(), err);
                    (false, false)
                }
            };

            items.push(TreeItem {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.path().to_path_buf(),
                is_dir,
                is_file,
                is_last: false,
            });
        }

        items.sort_by_cached_key(|item| (item.is_file, item.name.to_lowercase()));
        if let Some(last) = items.last_mut() {
            last.is_last = true;
        }

        items.retain(|item| self.is_visible(root, item));
        Ok(items)
    }

    fn is_visible(&self, root: &Path, item: &TreeItem) -> bool {
        let relative = item.path.strip_prefix(root).unwrap_or(&item.path);

        if item.is_file && !self.filter.should_include(relative, self.output_filename) {
            log::trace!("Tree skips file {}", relative.display());
            return false;
        }
        if item.is_dir && self.filter.hides_tree_dir(&item.name) {
            log::trace!("Tree skips directory {}", relative.display());
            return false;
        }
        true
    }
}

/// Line drawn for a directory that could not be listed, if any.
///
/// Only a permission failure is shown; other failures leave the subtree out.
fn listing_failure_line(prefix: &str, kind: io::ErrorKind) -> Option<String> {
    match kind {
        io::ErrorKind::PermissionDenied => {
            Some(format!("{}{}{}", prefix, LAST_BRANCH, PERMISSION_DENIED))
        }
        _ => None,
    }
}

/// Convenience wrapper over [`TreeRenderer::render_from`]
pub fn render_tree<'a>(
    filter: PathFilter<'a>,
    output_filename: &'a str,
    root: &Path,
    prefix: &str,
    max_depth: usize,
    current_depth: usize,
) -> TreeLines<'a> {
    TreeRenderer::new(filter, output_filename, max_depth).render_from(root, prefix, current_depth)
}

#[derive(Debug)]
struct TreeItem {
    name: String,
    path: PathBuf,
    is_dir: bool,
    is_file: bool,
    /// Last entry of the unfiltered, sorted listing
    is_last: bool,
}

#[derive(Debug)]
enum Frame {
    /// A directory whose entries have not been read yet
    Unread {
        dir: PathBuf,
        prefix: String,
        depth: usize,
    },
    /// A directory part way through being drawn
    Listing {
        items: std::vec::IntoIter<TreeItem>,
        prefix: String,
        depth: usize,
    },
}

/// Lazy depth-first sequence of tree lines, without trailing newlines
#[derive(Debug)]
pub struct TreeLines<'a> {
    renderer: TreeRenderer<'a>,
    root: PathBuf,
    stack: Vec<Frame>,
}

impl Iterator for TreeLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            match self.stack.pop()? {
                Frame::Unread { dir, prefix, depth } => {
                    if depth > self.renderer.max_depth {
                        continue;
                    }
                    match self.renderer.list(&self.root, &dir) {
                        Ok(items) => self.stack.push(Frame::Listing {
                            items: items.into_iter(),
                            prefix,
                            depth,
                        }),
                        Err(err) => {
                            log::warn!("Cannot list {}: {}", dir.display(), err);
                            if let Some(line) = listing_failure_line(&prefix, err.kind()) {
                                return Some(line);
                            }
                        }
                    }
                }
                Frame::Listing {
                    mut items,
                    prefix,
                    depth,
                } => {
                    let item = match items.next() {
                        Some(item) => item,
                        None => continue,
                    };
                    let (connector, indent) = if item.is_last {
                        (LAST_BRANCH, BLANK_INDENT)
                    } else {
                        (BRANCH, PIPE_INDENT)
                    };
                    let line = format!("{}{}{}", prefix, connector, item.name);
                    let child = item.is_dir.then(|| Frame::Unread {
                        dir: item.path,
                        prefix: format!("{}{}", prefix, indent),
                        depth: depth + 1,
                    });

                    self.stack.push(Frame::Listing {
                        items,
                        prefix,
                        depth,
                    });
                    if let Some(child) = child {
                        self.stack.push(child);
                    }
                    return Some(line);
                }
            }
        }
    }
}
