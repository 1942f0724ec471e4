use super::MergeError;
use crate::tree::Node;
use std::path::{Path, PathBuf};

/// Directories a merge must never root itself in.
const PROTECTED_UNIX: &[&str] = &[
    "/etc", "/usr", "/bin", "/sbin", "/var", "/boot", "/dev", "/proc", "/sys", "/lib",
];

const PROTECTED_WINDOWS: &[&str] = &["C:\\Windows", "C:\\Program Files", "C:\\Program Files (x86)"];

/// Fatal precondition: the merge root must be an existing directory outside
/// every protected system path. Checked before any mutation; returns the
/// canonicalized root on success.
pub fn ensure_safe_root(root: &Path) -> Result<PathBuf, MergeError> {
    let canonical = root
        .canonicalize()
        .map_err(|_| MergeError::RootUnavailable(root.to_path_buf()))?;

    if !canonical.is_dir() {
        return Err(MergeError::RootUnavailable(root.to_path_buf()));
    }

    if canonical == Path::new("/") {
        return Err(MergeError::UnsafeRoot(canonical));
    }

    for protected in PROTECTED_UNIX {
        if canonical.starts_with(protected) {
            return Err(MergeError::UnsafeRoot(canonical));
        }
    }

    if cfg!(windows) {
        for protected in PROTECTED_WINDOWS {
            if canonical.starts_with(protected) {
                return Err(MergeError::UnsafeRoot(canonical));
            }
        }
    }

    // merging straight into the home directory is refused as well
    if let Some(base_dirs) = directories::BaseDirs::new() {
        if canonical == base_dirs.home_dir() {
            return Err(MergeError::UnsafeRoot(canonical));
        }
    }

    Ok(canonical)
}

/// An incoming root folder named like the merge root itself maps onto the
/// root instead of nesting a copy one level deeper.
pub fn collapses_onto_root(root: &Path, node: &Node) -> bool {
    node.is_folder()
        && node.target_path.is_none()
        && root
            .file_name()
            .map_or(false, |name| name.to_string_lossy() == node.name)
}

/// A `target_path` resolves against the merge root; everything else
/// resolves under its parent directory.
pub fn resolve_node_path(root: &Path, parent_dir: &Path, node: &Node, at_root: bool) -> PathBuf {
    if let Some(target) = &node.target_path {
        return root.join(target);
    }
    if at_root && collapses_onto_root(root, node) {
        return root.to_path_buf();
    }
    parent_dir.join(&node.name)
}
