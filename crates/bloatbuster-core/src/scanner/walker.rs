/// Tree walker — lazily enumerates every regular file under a root.
///
/// Directory reads run on `jwalk`'s rayon-backed pool, so enumeration of wide
/// trees overlaps with the probes the dispatch engine is running.
///
/// # Symlink policy
///
/// Symbolic links are never followed (`follow_links(false)`), which makes
/// cycles impossible without tracking visited inodes. A symlink is not a
/// regular file, so it is skipped along with directories, sockets, FIFOs and
/// device nodes.
///
/// # Errors
///
/// A directory that cannot be read shows up as [`WalkItem::Warning`]; the
/// rest of the tree is still walked.
use crate::error::DirectoryAccessError;
use crate::model::{CaseSensitivity, ExtensionKey};
use std::path::{Path, PathBuf};

/// One item produced by [`TreeWalker::walk`].
#[derive(Debug)]
pub enum WalkItem {
    /// A regular file and its normalised extension.
    File {
        path: PathBuf,
        extension: ExtensionKey,
    },
    /// A non-fatal traversal problem.
    Warning(DirectoryAccessError),
}

/// Configured walker. Each call to [`walk`](Self::walk) starts a fresh,
/// independent traversal.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    threads: usize,
    case: CaseSensitivity,
}

impl TreeWalker {
    pub fn new(threads: usize, case: CaseSensitivity) -> Self {
        Self {
            threads: threads.max(1),
            case,
        }
    }

    /// Walk `root`, yielding regular files and traversal warnings.
    ///
    /// The iterator is lazy: directories are read as the caller pulls items.
    pub fn walk(&self, root: &Path) -> impl Iterator<Item = WalkItem> {
        let parallelism = if self.threads == 1 {
            jwalk::Parallelism::Serial
        } else {
            jwalk::Parallelism::RayonNewPool(self.threads)
        };
        let case = self.case;

        jwalk::WalkDir::new(root)
            .skip_hidden(false)
            .follow_links(false)
            .parallelism(parallelism)
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    // jwalk reports a failed `read_dir` on the directory's own
                    // entry rather than as a separate error item.
                    if let Some(err) = &entry.read_children_error {
                        return Some(WalkItem::Warning(DirectoryAccessError {
                            path: Some(entry.path()),
                            message: err.to_string(),
                        }));
                    }
                    if !entry.file_type().is_file() {
                        return None;
                    }
                    let name = entry.file_name().to_string_lossy();
                    let extension = ExtensionKey::from_file_name(&name, case);
                    Some(WalkItem::File {
                        path: entry.path(),
                        extension,
                    })
                }
                // Per-entry failures inside an otherwise readable directory.
                Err(err) => Some(WalkItem::Warning(DirectoryAccessError {
                    path: err.path().map(Path::to_path_buf),
                    message: err.to_string(),
                })),
            })
    }
}
