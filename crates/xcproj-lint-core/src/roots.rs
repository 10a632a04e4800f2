//! Source-tree root resolution.
//!
//! Resolution is a pure function over externally supplied roots, so the
//! toolchain queries that produce those roots stay fully separated and
//! the logic is testable with fake paths.

use std::path::{Component, Path, PathBuf};

use crate::graph::SourceTree;

/// The absolute root directories file references resolve against,
/// gathered once per run.
#[derive(Debug, Clone)]
pub struct ResolvedRoots {
    /// Directory containing the `.xcodeproj` bundle.
    pub project_root: PathBuf,
    /// Toolchain installation root (`xcode-select -p`).
    pub developer_dir: PathBuf,
    /// Root of the SDK the project builds against.
    pub sdk_root: PathBuf,
}

/// Resolves the root directory for a file reference.
///
/// `ancestors` is the chain of enclosing group path segments from the
/// main group down to the reference's parent; empty segments contribute
/// nothing. Returns `None` for unsupported source trees, which the
/// caller must skip without reporting.
#[must_use]
pub fn resolve_root(
    source_tree: &SourceTree,
    ancestors: &[String],
    roots: &ResolvedRoots,
) -> Option<PathBuf> {
    match source_tree {
        SourceTree::GroupRelative => {
            let mut root = roots.project_root.clone();
            for segment in ancestors {
                if !segment.is_empty() {
                    root.push(segment);
                }
            }
            Some(root)
        }
        SourceTree::SourceRoot => Some(roots.project_root.clone()),
        SourceTree::DeveloperDir => Some(roots.developer_dir.clone()),
        SourceTree::SdkRoot => Some(roots.sdk_root.clone()),
        SourceTree::Other(_) => None,
    }
}

/// Collapses `.` and `..` components lexically, without touching the
/// filesystem. Symlinks are deliberately not resolved; reconciliation
/// compares paths as written.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
