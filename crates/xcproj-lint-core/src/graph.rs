//! Typed object graph for a loaded project description.
//!
//! A pbxproj file is a flat identifier-keyed mapping of records, each
//! carrying an `isa` type tag. The graph models the record kinds the
//! checks care about as a closed variant and keeps everything else as
//! [`Object::Other`] so dangling-looking references to irrelevant kinds
//! never fail a load.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Stable, unique, opaque identifier of a project object.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ObjectId(pub String);

impl ObjectId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// The root directory a file reference resolves against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceTree {
    /// Relative to the chain of enclosing group path segments (`<group>`).
    GroupRelative,
    /// Relative to the project root directory (`SOURCE_ROOT`).
    SourceRoot,
    /// Relative to the toolchain installation root (`DEVELOPER_DIR`).
    DeveloperDir,
    /// Relative to the selected SDK root (`SDKROOT`).
    SdkRoot,
    /// Any other tag; excluded from path resolution.
    Other(String),
}

impl SourceTree {
    /// Maps the serialized `sourceTree` value to its variant.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "<group>" => Self::GroupRelative,
            "SOURCE_ROOT" => Self::SourceRoot,
            "DEVELOPER_DIR" => Self::DeveloperDir,
            "SDKROOT" => Self::SdkRoot,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl std::fmt::Display for SourceTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GroupRelative => f.write_str("<group>"),
            Self::SourceRoot => f.write_str("SOURCE_ROOT"),
            Self::DeveloperDir => f.write_str("DEVELOPER_DIR"),
            Self::SdkRoot => f.write_str("SDKROOT"),
            Self::Other(tag) => f.write_str(tag),
        }
    }
}

/// A group node in the main file tree (`PBXGroup`).
#[derive(Debug, Clone)]
pub struct Group {
    /// Display name, when distinct from the path.
    pub name: Option<String>,
    /// Path segment this group contributes, possibly absent.
    pub path: Option<String>,
    /// Ordered child identifiers.
    pub children: Vec<ObjectId>,
}

/// A grouping of language variants of one resource (`PBXVariantGroup`).
#[derive(Debug, Clone)]
pub struct VariantGroup {
    /// Shared resource name, extension included (e.g. `Main.strings`).
    pub name: String,
    /// Ordered child identifiers, one per language variant.
    pub children: Vec<ObjectId>,
}

/// A leaf file reference (`PBXFileReference`).
#[derive(Debug, Clone)]
pub struct FileReference {
    /// Display name; for variant-group children this is the language tag.
    pub name: Option<String>,
    /// Path relative to the resolved root.
    pub path: String,
    /// Which root the path resolves against.
    pub source_tree: SourceTree,
}

impl FileReference {
    /// Display name, falling back to the path when no name is set.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }
}

/// An ordered list of build configurations (`XCConfigurationList`).
#[derive(Debug, Clone)]
pub struct ConfigurationList {
    /// Configuration identifiers in declared order.
    pub configurations: Vec<ObjectId>,
}

/// A single build configuration (`XCBuildConfiguration`).
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Configuration name (e.g. `Debug`).
    pub name: String,
    /// String-valued build settings. Non-string values are dropped at load.
    pub settings: BTreeMap<String, String>,
}

/// A typed project object.
#[derive(Debug, Clone)]
pub enum Object {
    /// A file-tree group.
    Group(Group),
    /// A localization variant group.
    VariantGroup(VariantGroup),
    /// A leaf file reference.
    FileReference(FileReference),
    /// A build configuration list.
    ConfigurationList(ConfigurationList),
    /// A build configuration.
    Configuration(Configuration),
    /// Any other record kind, kept only so references to it resolve.
    Other {
        /// The record's `isa` tag.
        isa: String,
    },
}

/// Root-object fields the checks consume.
#[derive(Debug, Clone)]
pub struct ProjectRoot {
    /// Declared language/region tags, `Base` included.
    pub known_regions: Vec<String>,
    /// Identifier of the main file-tree group.
    pub main_group: ObjectId,
    /// Identifier of the project's configuration list.
    pub build_configuration_list: ObjectId,
}

/// Immutable identifier-keyed view of a loaded project description.
#[derive(Debug)]
pub struct ObjectGraph {
    root: ProjectRoot,
    objects: BTreeMap<ObjectId, Object>,
}

impl ObjectGraph {
    /// Creates a graph from its parts.
    #[must_use]
    pub fn new(root: ProjectRoot, objects: BTreeMap<ObjectId, Object>) -> Self {
        Self { root, objects }
    }

    /// Looks up an object by identifier.
    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    /// Identifier of the main file-tree group.
    #[must_use]
    pub fn main_group(&self) -> &ObjectId {
        &self.root.main_group
    }

    /// Declared language/region tags, `Base` included.
    #[must_use]
    pub fn known_regions(&self) -> &[String] {
        &self.root.known_regions
    }

    /// Required translation languages: known regions minus the `Base`
    /// fallback, which is not a translation requirement.
    #[must_use]
    pub fn required_languages(&self) -> BTreeSet<String> {
        self.root
            .known_regions
            .iter()
            .filter(|region| *region != "Base")
            .cloned()
            .collect()
    }

    /// Iterates all variant groups in identifier order.
    pub fn variant_groups(&self) -> impl Iterator<Item = (&ObjectId, &VariantGroup)> {
        self.objects.iter().filter_map(|(id, obj)| match obj {
            Object::VariantGroup(vg) => Some((id, vg)),
            _ => None,
        })
    }

    /// SDK name from the first configuration on the project's
    /// configuration list, in declared order.
    ///
    /// Returns `None` when the list is missing or empty, or when the
    /// first configuration carries no string `SDKROOT` setting.
    #[must_use]
    pub fn sdk_name(&self) -> Option<&str> {
        let list = match self.get(&self.root.build_configuration_list)? {
            Object::ConfigurationList(list) => list,
            _ => return None,
        };
        let first = list.configurations.first()?;
        match self.get(first)? {
            Object::Configuration(conf) => conf.settings.get("SDKROOT").map(String::as_str),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(objects: Vec<(&str, Object)>) -> ObjectGraph {
        let objects = objects
            .into_iter()
            .map(|(id, obj)| (ObjectId::from(id), obj))
            .collect();
        ObjectGraph::new(
            ProjectRoot {
                known_regions: vec!["en".into(), "fr".into(), "Base".into()],
                main_group: ObjectId::from("MAIN"),
                build_configuration_list: ObjectId::from("CFGLIST"),
            },
            objects,
        )
    }

    #[test]
    fn required_languages_exclude_base() {
        let graph = graph_with(Vec::new());
        let required_langs = graph.required_languages();
        let required: Vec<&str> = required_langs.iter().map(String::as_str).collect();
        assert_eq!(required, ["en", "fr"]);
    }

    #[test]
    fn source_tree_tags_round_trip() {
        assert_eq!(SourceTree::from_tag("<group>"), SourceTree::GroupRelative);
        assert_eq!(SourceTree::from_tag("SOURCE_ROOT"), SourceTree::SourceRoot);
        assert_eq!(SourceTree::from_tag("DEVELOPER_DIR"), SourceTree::DeveloperDir);
        assert_eq!(SourceTree::from_tag("SDKROOT"), SourceTree::SdkRoot);
        assert_eq!(
            SourceTree::from_tag("BUILT_PRODUCTS_DIR"),
            SourceTree::Other("BUILT_PRODUCTS_DIR".into())
        );
        assert_eq!(SourceTree::from_tag("<group>").to_string(), "<group>");
    }

    #[test]
    fn sdk_name_uses_first_configuration_in_order() {
        let graph = graph_with(vec![
            (
                "CFGLIST",
                Object::ConfigurationList(ConfigurationList {
                    configurations: vec![ObjectId::from("DEBUG"), ObjectId::from("RELEASE")],
                }),
            ),
            (
                "DEBUG",
                Object::Configuration(Configuration {
                    name: "Debug".into(),
                    settings: [("SDKROOT".to_owned(), "iphoneos".to_owned())].into(),
                }),
            ),
            (
                "RELEASE",
                Object::Configuration(Configuration {
                    name: "Release".into(),
                    settings: [("SDKROOT".to_owned(), "macosx".to_owned())].into(),
                }),
            ),
        ]);
        assert_eq!(graph.sdk_name(), Some("iphoneos"));
    }

    #[test]
    fn sdk_name_missing_when_first_configuration_has_no_sdkroot() {
        let graph = graph_with(vec![
            (
                "CFGLIST",
                Object::ConfigurationList(ConfigurationList {
                    configurations: vec![ObjectId::from("DEBUG")],
                }),
            ),
            (
                "DEBUG",
                Object::Configuration(Configuration {
                    name: "Debug".into(),
                    settings: BTreeMap::new(),
                }),
            ),
        ]);
        assert_eq!(graph.sdk_name(), None);
    }

    #[test]
    fn display_name_falls_back_to_path() {
        let named = FileReference {
            name: Some("en".into()),
            path: "en.lproj/Main.strings".into(),
            source_tree: SourceTree::GroupRelative,
        };
        let unnamed = FileReference {
            name: None,
            path: "main.c".into(),
            source_tree: SourceTree::GroupRelative,
        };
        assert_eq!(named.display_name(), "en");
        assert_eq!(unnamed.display_name(), "main.c");
    }
}
