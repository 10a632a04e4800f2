//! File-reference reconciliation check.
//!
//! Walks the main file tree resolving every leaf to an absolute path,
//! warns about references with no file behind them, then scans the real
//! project directory and warns about files no reference points at.
//! With cleaning enabled the untracked files are deleted, strictly
//! after the full referenced-path set has been computed.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::graph::{Object, ObjectGraph, ObjectId};
use crate::roots::{normalize_path, resolve_root, ResolvedRoots};
use crate::types::Finding;

/// Check name used in findings.
pub(crate) const NAME: &str = "file-references";

/// Deletion failure while cleaning untracked files.
#[derive(Debug, Error)]
#[error("failed to delete {path}: {source}")]
pub struct CleanError {
    /// The file that could not be deleted.
    pub path: PathBuf,
    /// Underlying IO error.
    pub source: std::io::Error,
}

/// The file-reference reconciliation check.
pub(crate) struct FileReferenceCheck {
    clean: bool,
    ignore: Vec<String>,
}

impl FileReferenceCheck {
    pub(crate) fn new(clean: bool, ignore: Vec<String>) -> Self {
        Self { clean, ignore }
    }

    /// Runs the walk, the scan, and the reconciliation.
    ///
    /// `container_dir` is the `.xcodeproj` bundle holding the project
    /// file; it is always excluded from the scan.
    pub(crate) fn check(
        &self,
        graph: &ObjectGraph,
        roots: &ResolvedRoots,
        container_dir: &Path,
    ) -> Result<Vec<Finding>, CleanError> {
        let mut findings = Vec::new();
        let mut referenced = BTreeSet::new();
        walk(graph, graph.main_group(), &[], roots, &mut referenced, &mut findings);
        debug!("Referenced paths: {}", referenced.len());

        let untracked = self.scan_untracked(&roots.project_root, container_dir, &referenced);
        if !untracked.is_empty() {
            if self.clean {
                for path in &untracked {
                    std::fs::remove_file(path).map_err(|source| CleanError {
                        path: path.clone(),
                        source,
                    })?;
                    debug!("Deleted: {}", path.display());
                }
            }
            let listing: Vec<String> = untracked.iter().map(|p| p.display().to_string()).collect();
            findings.push(Finding::warning(
                NAME,
                None,
                format!(
                    "Files present but not referenced by project: {}\n  {}",
                    untracked.len(),
                    listing.join("\n  ")
                ),
            ));
        }
        Ok(findings)
    }

    /// Enumerates regular files under the project root that no
    /// reference resolves to, in sorted order.
    fn scan_untracked(
        &self,
        project_root: &Path,
        container_dir: &Path,
        referenced: &BTreeSet<PathBuf>,
    ) -> Vec<PathBuf> {
        let mut markers: Vec<String> = vec![
            container_dir.to_string_lossy().into_owned(),
            project_root.join("Pods").to_string_lossy().into_owned(),
        ];
        markers.extend(self.ignore.iter().cloned());

        let mut untracked = Vec::new();
        for entry in WalkDir::new(project_root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let path_str = path.to_string_lossy();
            if markers.iter().any(|marker| path_str.contains(marker.as_str())) {
                continue;
            }
            if !referenced.contains(path) {
                untracked.push(path.to_path_buf());
            }
        }
        untracked.sort();
        untracked
    }
}

/// Depth-first walk carrying the accumulated ancestor path segments.
fn walk(
    graph: &ObjectGraph,
    id: &ObjectId,
    ancestors: &[String],
    roots: &ResolvedRoots,
    referenced: &mut BTreeSet<PathBuf>,
    findings: &mut Vec<Finding>,
) {
    match graph.get(id) {
        Some(Object::Group(group)) => {
            let mut next = ancestors.to_vec();
            next.push(group.path.clone().unwrap_or_default());
            for child in &group.children {
                walk(graph, child, &next, roots, referenced, findings);
            }
        }
        Some(Object::VariantGroup(group)) => {
            // Variant groups contribute no path segment of their own.
            let mut next = ancestors.to_vec();
            next.push(String::new());
            for child in &group.children {
                walk(graph, child, &next, roots, referenced, findings);
            }
        }
        Some(Object::FileReference(file)) => {
            match resolve_root(&file.source_tree, ancestors, roots) {
                Some(root) => {
                    let path = normalize_path(&root.join(&file.path));
                    if !path.exists() {
                        findings.push(Finding::warning(
                            NAME,
                            Some(id.clone()),
                            format!("Project references a missing file!\n  {}", path.display()),
                        ));
                    }
                    referenced.insert(path);
                }
                None => {
                    debug!(
                        "File {} is in an unsupported source tree: {}",
                        file.path, file.source_tree
                    );
                }
            }
        }
        Some(other) => {
            debug!("Skipping non-tree object '{id}' ({other:?})");
        }
        None => {
            debug!("File tree references unknown object '{id}'");
        }
    }
}
