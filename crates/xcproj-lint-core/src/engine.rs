//! Lint engine: orchestrates the checks in a fixed order.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::checks::file_refs::{CleanError, FileReferenceCheck};
use crate::checks::localization::LocalizationCheck;
use crate::config::Config;
use crate::loader::{self, LoadError};
use crate::roots::{normalize_path, ResolvedRoots};
use crate::toolchain::{Toolchain, ToolchainError, XcodeToolchain};
use crate::types::LintResult;

/// Errors that abort a lint run.
///
/// Lint findings are not errors; they land in the [`LintResult`]. These
/// variants are the fatal conditions under which no result exists.
#[derive(Debug, Error)]
pub enum LintError {
    /// The input path has no parent directories to derive roots from.
    #[error("cannot determine the project root from {path}")]
    BadProjectPath {
        /// The offending input path.
        path: PathBuf,
    },

    /// The project description failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A toolchain query failed.
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    /// No SDK name could be read from the project's configurations.
    #[error("no build configuration declares an SDKROOT setting")]
    MissingSdkRoot,

    /// Deleting an untracked file failed.
    #[error(transparent)]
    Clean(#[from] CleanError),

    /// IO error resolving the working directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builder for configuring a [`Linter`].
pub struct LinterBuilder {
    project_file: PathBuf,
    strict: bool,
    clean: bool,
    config: Config,
    toolchain: Box<dyn Toolchain>,
}

impl LinterBuilder {
    /// Forces strict mode, disabling the media-extension leniency.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enables deletion of untracked files. Destructive; off by default.
    #[must_use]
    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replaces the toolchain used for root discovery.
    #[must_use]
    pub fn toolchain<T: Toolchain + 'static>(mut self, toolchain: T) -> Self {
        self.toolchain = Box::new(toolchain);
        self
    }

    /// Builds the linter, making the project path absolute.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be resolved.
    pub fn build(self) -> Result<Linter, LintError> {
        let project_file = if self.project_file.is_absolute() {
            self.project_file
        } else {
            std::env::current_dir()?.join(self.project_file)
        };
        Ok(Linter {
            project_file: normalize_path(&project_file),
            strict: self.strict,
            clean: self.clean,
            config: self.config,
            toolchain: self.toolchain,
        })
    }
}

/// Runs the consistency checks over one project description.
///
/// Use [`Linter::builder`] to construct an instance.
pub struct Linter {
    project_file: PathBuf,
    strict: bool,
    clean: bool,
    config: Config,
    toolchain: Box<dyn Toolchain>,
}

impl Linter {
    /// Creates a builder for the given `project.pbxproj` path.
    #[must_use]
    pub fn builder(project_file: impl Into<PathBuf>) -> LinterBuilder {
        LinterBuilder {
            project_file: project_file.into(),
            strict: false,
            clean: false,
            config: Config::default(),
            toolchain: Box::new(XcodeToolchain::new()),
        }
    }

    /// The absolute path of the project file being linted.
    #[must_use]
    pub fn project_file(&self) -> &Path {
        &self.project_file
    }

    /// Runs all checks and returns the accumulated findings.
    ///
    /// Check order is fixed: localization first, then toolchain root
    /// discovery, then file-reference reconciliation. One bad node
    /// never aborts a check; only the [`LintError`] conditions do.
    ///
    /// # Errors
    ///
    /// Returns a [`LintError`] on any fatal condition (load failure,
    /// toolchain failure, missing SDK setting, failed deletion).
    pub fn run(&self) -> Result<LintResult, LintError> {
        info!("Analyzing: {}", self.project_file.display());
        let graph = loader::load(&self.project_file)?;

        let container_dir = self
            .project_file
            .parent()
            .ok_or_else(|| LintError::BadProjectPath {
                path: self.project_file.clone(),
            })?;
        let project_root = container_dir
            .parent()
            .ok_or_else(|| LintError::BadProjectPath {
                path: self.project_file.clone(),
            })?;

        let mut result = LintResult::new();

        let strict = self.strict || self.config.strict;
        let localization = LocalizationCheck::new(strict, self.config.media_extensions.clone());
        result.extend(localization.check(&graph));

        let developer_dir = self.toolchain.developer_dir()?;
        let sdk_name = graph.sdk_name().ok_or(LintError::MissingSdkRoot)?;
        let sdk_root = self.toolchain.sdk_root(sdk_name)?;
        debug!("SDK name: {sdk_name}");
        debug!("Developer dir: {}", developer_dir.display());
        debug!("Project root: {}", project_root.display());

        let roots = ResolvedRoots {
            project_root: project_root.to_path_buf(),
            developer_dir,
            sdk_root,
        };
        let file_refs = FileReferenceCheck::new(self.clean, self.config.effective_ignore());
        result.extend(file_refs.check(&graph, &roots, container_dir)?);

        let (errors, warnings) = result.count_by_severity();
        info!("Lint complete: {errors} error(s), {warnings} warning(s)");
        Ok(result)
    }
}
