//! # xcproj-lint-core
//!
//! Consistency checks for Xcode project descriptions.
//!
//! The engine loads a `project.pbxproj` into a typed object graph and
//! runs two checks against it:
//!
//! - **localization**: every variant group must carry all required
//!   language variants, with an extension-gated leniency for media
//!   assets outside strict mode;
//! - **file references**: every leaf of the main file tree must exist
//!   on disk, and every file on disk must be reachable from the tree.
//!
//! ## Example
//!
//! ```ignore
//! use xcproj_lint_core::Linter;
//!
//! let result = Linter::builder("Demo.xcodeproj/project.pbxproj")
//!     .strict(true)
//!     .build()?
//!     .run()?;
//! if result.has_errors() {
//!     std::process::exit(1);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checks;
mod config;
mod engine;
mod graph;
mod roots;
mod toolchain;
mod types;

/// Project-description loading.
pub mod loader;
/// OpenStep property-list parsing.
pub mod plist;

pub use checks::file_refs::CleanError;
pub use config::{Config, ConfigError, DEFAULT_IGNORE, DEFAULT_MEDIA_EXTENSIONS};
pub use engine::{LintError, Linter, LinterBuilder};
pub use graph::{
    Configuration, ConfigurationList, FileReference, Group, Object, ObjectGraph, ObjectId,
    ProjectRoot, SourceTree, VariantGroup,
};
pub use loader::{load, LoadError};
pub use roots::{normalize_path, resolve_root, ResolvedRoots};
pub use toolchain::{Toolchain, ToolchainError, XcodeToolchain};
pub use types::{Finding, LintResult, Severity};
