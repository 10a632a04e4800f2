//! Loads a `project.pbxproj` file into an [`ObjectGraph`].
//!
//! Loading is two-layered: [`load`] reads the file and delegates to
//! [`parse`], which runs the plist parser and builds the typed graph.
//! Any structural problem is fatal; no checks run against a graph that
//! did not load cleanly.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::graph::{
    Configuration, ConfigurationList, FileReference, Group, Object, ObjectGraph, ObjectId,
    ProjectRoot, SourceTree, VariantGroup,
};
use crate::plist::{self, Value};

/// Errors that can occur while loading a project description.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error reading the project file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file is not a well-formed property list.
    #[error("invalid property list: {0}")]
    Plist(#[from] plist::ParseError),

    /// The property list does not have the expected project structure.
    #[error("malformed project: {message}")]
    Malformed {
        /// What is structurally wrong.
        message: String,
    },
}

fn malformed(message: impl Into<String>) -> LoadError {
    LoadError::Malformed {
        message: message.into(),
    }
}

/// Loads a project description from `path`.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be read, is not a valid
/// property list, or lacks the expected project structure.
pub fn load(path: &Path) -> Result<ObjectGraph, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content)
}

/// Parses a project description from its serialized contents.
///
/// # Errors
///
/// Returns a [`LoadError`] on parse failure or structural problems.
pub fn parse(content: &str) -> Result<ObjectGraph, LoadError> {
    let top = plist::parse(content)?;
    let top = top
        .as_dict()
        .ok_or_else(|| malformed("top-level value is not a dictionary"))?;

    let raw_objects = top
        .get("objects")
        .and_then(Value::as_dict)
        .ok_or_else(|| malformed("missing 'objects' dictionary"))?;
    let root_id = top
        .get("rootObject")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing 'rootObject' identifier"))?;

    let mut objects = BTreeMap::new();
    for (id, value) in raw_objects {
        let record = value
            .as_dict()
            .ok_or_else(|| malformed(format!("object '{id}' is not a dictionary")))?;
        objects.insert(ObjectId(id.clone()), build_object(id, record)?);
    }

    let root_record = raw_objects
        .get(root_id)
        .and_then(Value::as_dict)
        .ok_or_else(|| malformed(format!("root object '{root_id}' not found")))?;
    let root = build_root(root_id, root_record)?;

    Ok(ObjectGraph::new(root, objects))
}

fn build_object(id: &str, record: &BTreeMap<String, Value>) -> Result<Object, LoadError> {
    let isa = record
        .get("isa")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(format!("object '{id}' has no 'isa' tag")))?;

    let object = match isa {
        "PBXGroup" => Object::Group(Group {
            name: string_field(record, "name"),
            path: string_field(record, "path"),
            children: id_list(id, record, "children")?,
        }),
        "PBXVariantGroup" => Object::VariantGroup(VariantGroup {
            name: string_field(record, "name")
                .ok_or_else(|| malformed(format!("variant group '{id}' has no name")))?,
            children: id_list(id, record, "children")?,
        }),
        "PBXFileReference" => Object::FileReference(FileReference {
            name: string_field(record, "name"),
            path: string_field(record, "path")
                .ok_or_else(|| malformed(format!("file reference '{id}' has no path")))?,
            source_tree: SourceTree::from_tag(
                &string_field(record, "sourceTree")
                    .ok_or_else(|| malformed(format!("file reference '{id}' has no sourceTree")))?,
            ),
        }),
        "XCConfigurationList" => Object::ConfigurationList(ConfigurationList {
            configurations: id_list(id, record, "buildConfigurations")?,
        }),
        "XCBuildConfiguration" => Object::Configuration(Configuration {
            name: string_field(record, "name")
                .ok_or_else(|| malformed(format!("build configuration '{id}' has no name")))?,
            settings: build_settings(record),
        }),
        other => Object::Other {
            isa: other.to_owned(),
        },
    };
    Ok(object)
}

fn build_root(id: &str, record: &BTreeMap<String, Value>) -> Result<ProjectRoot, LoadError> {
    let main_group = record
        .get("mainGroup")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(format!("root object '{id}' has no mainGroup")))?;
    let build_configuration_list = record
        .get("buildConfigurationList")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(format!("root object '{id}' has no buildConfigurationList")))?;
    let known_regions = record
        .get("knownRegions")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(format!("root object '{id}' has no knownRegions")))?
        .iter()
        .filter_map(Value::as_str)
        .map(ToOwned::to_owned)
        .collect();

    Ok(ProjectRoot {
        known_regions,
        main_group: ObjectId::from(main_group),
        build_configuration_list: ObjectId::from(build_configuration_list),
    })
}

fn string_field(record: &BTreeMap<String, Value>, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(ToOwned::to_owned)
}

fn id_list(
    id: &str,
    record: &BTreeMap<String, Value>,
    key: &str,
) -> Result<Vec<ObjectId>, LoadError> {
    let Some(value) = record.get(key) else {
        return Ok(Vec::new());
    };
    let items = value
        .as_array()
        .ok_or_else(|| malformed(format!("object '{id}': '{key}' is not an array")))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(ObjectId::from)
                .ok_or_else(|| malformed(format!("object '{id}': '{key}' contains a non-string")))
        })
        .collect()
}

/// Keeps only string-valued build settings; the single lookup the
/// checks perform (`SDKROOT`) is always a string.
fn build_settings(record: &BTreeMap<String, Value>) -> BTreeMap<String, String> {
    record
        .get("buildSettings")
        .and_then(Value::as_dict)
        .map(|settings| {
            settings
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_owned())))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"// !$*UTF8*$!
{
    archiveVersion = 1;
    objectVersion = 56;
    objects = {
        PROJ = {
            isa = PBXProject;
            mainGroup = MAIN;
            buildConfigurationList = CFGLIST;
            knownRegions = (en, fr, Base);
        };
        MAIN = {
            isa = PBXGroup;
            children = (FILE1);
            sourceTree = "<group>";
        };
        FILE1 = {
            isa = PBXFileReference;
            path = main.c;
            sourceTree = SOURCE_ROOT;
        };
        CFGLIST = {
            isa = XCConfigurationList;
            buildConfigurations = (DEBUG);
        };
        DEBUG = {
            isa = XCBuildConfiguration;
            name = Debug;
            buildSettings = {
                SDKROOT = iphoneos;
                OTHER_LDFLAGS = ("-ObjC");
            };
        };
    };
    rootObject = PROJ;
}
"#;

    #[test]
    fn loads_minimal_project() {
        let graph = parse(MINIMAL).unwrap_or_else(|e| panic!("load failed: {e}"));
        assert_eq!(graph.known_regions(), ["en", "fr", "Base"]);
        assert_eq!(graph.main_group(), &ObjectId::from("MAIN"));
        assert_eq!(graph.sdk_name(), Some("iphoneos"));

        match graph.get(&ObjectId::from("FILE1")) {
            Some(Object::FileReference(file)) => {
                assert_eq!(file.path, "main.c");
                assert_eq!(file.source_tree, SourceTree::SourceRoot);
            }
            other => panic!("unexpected object: {other:?}"),
        }
    }

    #[test]
    fn non_string_build_settings_are_dropped() {
        let graph = parse(MINIMAL).unwrap_or_else(|e| panic!("load failed: {e}"));
        match graph.get(&ObjectId::from("DEBUG")) {
            Some(Object::Configuration(conf)) => {
                assert!(!conf.settings.contains_key("OTHER_LDFLAGS"));
                assert_eq!(conf.settings.get("SDKROOT").map(String::as_str), Some("iphoneos"));
            }
            other => panic!("unexpected object: {other:?}"),
        }
    }

    #[test]
    fn unknown_isa_becomes_other() {
        let content = MINIMAL.replace("isa = XCBuildConfiguration;", "isa = XCMysteryRecord;");
        let graph = parse(&content).unwrap_or_else(|e| panic!("load failed: {e}"));
        match graph.get(&ObjectId::from("DEBUG")) {
            Some(Object::Other { isa }) => assert_eq!(isa, "XCMysteryRecord"),
            other => panic!("unexpected object: {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_objects_dict() {
        let err = parse("{ rootObject = PROJ; }").unwrap_err();
        assert!(err.to_string().contains("objects"));
    }

    #[test]
    fn rejects_missing_root_object() {
        let err = parse("{ objects = { }; rootObject = PROJ; }").unwrap_err();
        assert!(err.to_string().contains("root object 'PROJ' not found"));
    }

    #[test]
    fn rejects_record_without_isa() {
        let err = parse("{ objects = { A = { path = x; }; }; rootObject = A; }").unwrap_err();
        assert!(err.to_string().contains("no 'isa' tag"));
    }

    #[test]
    fn rejects_file_reference_without_path() {
        let content = MINIMAL.replace("path = main.c;", "name = main.c;");
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("has no path"));
    }

    #[test]
    fn load_reports_io_failure_with_path() {
        let err = load(Path::new("/nonexistent/project.pbxproj")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("project.pbxproj"));
    }
}
