//! Recursive candidate discovery
//!
//! Walks the full subtree under each root, following symlinks like
//! directories (archive volumes are frequently symlink farms), and collects
//! one [`FileCandidate`] per regular file whose extension matches the
//! selector. Candidates are sorted by path so downstream ordering is
//! deterministic regardless of filesystem iteration order.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, ScanError};
use crate::scan::classify::{ContainerFamily, FileKind};

/// A discovered file, prior to any parsing
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub extension: String,
    pub family: ContainerFamily,
}

/// List all candidate files under the given roots
///
/// Fails with [`ScanError::NotFound`] if a root is missing. An empty result
/// for valid roots is not an error at this layer; the orchestrator decides
/// whether that is fatal.
pub fn enumerate(roots: &[PathBuf], kind: FileKind) -> Result<Vec<FileCandidate>> {
    for root in roots {
        if !root.exists() {
            return Err(ScanError::NotFound(root.clone()));
        }
    }

    let mut candidates = Vec::new();
    for root in roots {
        collect_under(root, kind, &mut candidates);
    }

    // Deterministic order: later grouping and tie-breaking rely on it
    candidates.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(
        count = candidates.len(),
        roots = roots.len(),
        "enumerated candidates"
    );
    Ok(candidates)
}

fn collect_under(root: &Path, kind: FileKind, out: &mut Vec<FileCandidate>) {
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // Unreadable subtrees are logged, not fatal
                tracing::warn!("error walking {}: {err}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let family = ContainerFamily::from_path(path);
        if !kind.matches(family) {
            continue;
        }

        let size_bytes = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(err) => {
                tracing::warn!("could not stat {}: {err}", path.display());
                continue;
            }
        };
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        out.push(FileCandidate {
            path: path.to_path_buf(),
            size_bytes,
            extension,
            family,
        });
    }
}
