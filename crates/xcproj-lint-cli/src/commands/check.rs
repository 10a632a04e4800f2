//! Check command implementation.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use xcproj_lint_core::{Config, Linter};

use crate::config_resolver::{self, ConfigSource};
use crate::OutputFormat;

/// Runs the lint and prints the result.
///
/// Exits the process with code 1 when the result contains errors.
pub fn run(
    project: &Path,
    strict: bool,
    clean: bool,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<()> {
    let project_file = resolve_project_file(project);
    if !project_file.is_file() {
        anyhow::bail!("input file not found: {}", project_file.display());
    }

    // The directory that contains the .xcodeproj bundle.
    let project_dir = project_file
        .parent()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));

    let source = config_resolver::resolve(project_dir, config_path);
    let config = match &source {
        ConfigSource::Default => Config::default(),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("failed to load config: {}", p.display()))?
        }
    };

    let linter = Linter::builder(project_file)
        .strict(strict)
        .clean(clean)
        .config(config)
        .build()
        .context("failed to set up the linter")?;

    let result = linter.run()?;

    super::output::print(&result, format)?;

    // Exit with error code if there are errors
    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Accepts either a `project.pbxproj` path or a `.xcodeproj` bundle
/// directory, resolving the latter to the project file inside it.
fn resolve_project_file(project: &Path) -> PathBuf {
    if project.is_dir() {
        project.join("project.pbxproj")
    } else {
        project.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn xcodeproj_bundle_resolves_to_inner_project_file() {
        let tmp = TempDir::new().unwrap();
        let bundle = tmp.path().join("Demo.xcodeproj");
        fs::create_dir(&bundle).unwrap();
        fs::write(bundle.join("project.pbxproj"), "{}").unwrap();

        let resolved = resolve_project_file(&bundle);
        assert_eq!(resolved, bundle.join("project.pbxproj"));
    }

    #[test]
    fn plain_file_path_is_kept() {
        let path = Path::new("/somewhere/project.pbxproj");
        assert_eq!(resolve_project_file(path), path);
    }
}
