//! Toolchain root discovery.
//!
//! Root resolution needs two absolute paths only the installed
//! toolchain knows: the developer directory and the selected SDK root.
//! Both are blocking external queries with no retry; any failure aborts
//! the run, since path resolution is meaningless without them.

use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

/// Errors from toolchain queries.
#[derive(Debug, Error)]
pub enum ToolchainError {
    /// The tool could not be started.
    #[error("failed to start `{command}`: {source}")]
    Launch {
        /// The command line that failed to start.
        command: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The tool exited with a non-zero status.
    #[error("`{command}` exited with status {status}")]
    Exit {
        /// The command line that failed.
        command: String,
        /// Its exit status.
        status: std::process::ExitStatus,
    },

    /// The tool produced no output.
    #[error("`{command}` produced no output")]
    EmptyOutput {
        /// The command line that produced nothing.
        command: String,
    },
}

/// Supplies the externally discovered root directories.
pub trait Toolchain {
    /// Absolute path of the toolchain installation root.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolchainError`] when discovery fails.
    fn developer_dir(&self) -> Result<PathBuf, ToolchainError>;

    /// Absolute root path of the named SDK.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolchainError`] when discovery fails.
    fn sdk_root(&self, sdk: &str) -> Result<PathBuf, ToolchainError>;
}

/// Production implementation backed by `xcode-select` and `xcrun`.
#[derive(Debug, Clone, Copy, Default)]
pub struct XcodeToolchain;

impl XcodeToolchain {
    /// Creates the default toolchain.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Toolchain for XcodeToolchain {
    fn developer_dir(&self) -> Result<PathBuf, ToolchainError> {
        query("xcode-select", &["-p"])
    }

    fn sdk_root(&self, sdk: &str) -> Result<PathBuf, ToolchainError> {
        query("xcrun", &["--sdk", sdk, "--show-sdk-path"])
    }
}

fn query(program: &str, args: &[&str]) -> Result<PathBuf, ToolchainError> {
    let command = if args.is_empty() {
        program.to_owned()
    } else {
        format!("{program} {}", args.join(" "))
    };
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| ToolchainError::Launch {
            command: command.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(ToolchainError::Exit {
            command,
            status: output.status,
        });
    }

    let path = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    if path.is_empty() {
        return Err(ToolchainError::EmptyOutput { command });
    }
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_failure_names_the_command() {
        let err = query("xcproj-lint-no-such-tool", &["-p"]).unwrap_err();
        assert!(matches!(err, ToolchainError::Launch { .. }));
        assert!(err.to_string().contains("xcproj-lint-no-such-tool -p"));
    }

    #[test]
    fn empty_output_is_an_error() {
        // `true` exits zero and prints nothing on every unix.
        let err = query("true", &[]).unwrap_err();
        assert!(matches!(err, ToolchainError::EmptyOutput { .. }));
    }

    #[test]
    fn nonzero_exit_is_an_error() {
        let err = query("false", &[]).unwrap_err();
        assert!(matches!(err, ToolchainError::Exit { .. }));
    }
}
