//! Localization completeness check.
//!
//! Every variant group must carry a variant for every required
//! language. Media assets are commonly only partially localized by
//! design, so outside strict mode a gap on a media resource with at
//! least one present language downgrades to a warning.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::info;

use crate::graph::{Object, ObjectGraph};
use crate::types::{Finding, Severity};

/// Check name used in findings.
pub(crate) const NAME: &str = "localization";

/// The localization completeness check.
pub(crate) struct LocalizationCheck {
    strict: bool,
    media_extensions: Vec<String>,
}

impl LocalizationCheck {
    pub(crate) fn new(strict: bool, media_extensions: Vec<String>) -> Self {
        Self {
            strict,
            media_extensions,
        }
    }

    /// Walks all variant groups and reports localization gaps.
    pub(crate) fn check(&self, graph: &ObjectGraph) -> Vec<Finding> {
        let required = graph.required_languages();
        info!(
            "Localizations: {}",
            required.iter().cloned().collect::<Vec<_>>().join(", ")
        );

        let mut findings = Vec::new();
        for (id, group) in graph.variant_groups() {
            let langs: Vec<&str> = group
                .children
                .iter()
                .filter_map(|child| match graph.get(child) {
                    Some(Object::FileReference(file)) => Some(file.display_name()),
                    _ => None,
                })
                .collect();

            // A lone Base variant means intentionally not localized.
            if langs == ["Base"] {
                continue;
            }

            let present: BTreeSet<&str> = langs.iter().copied().collect();
            let missing: Vec<&str> = required
                .iter()
                .map(String::as_str)
                .filter(|lang| !present.contains(*lang))
                .collect();
            if missing.is_empty() {
                continue;
            }

            let lenient = !self.strict && !langs.is_empty() && self.is_media(&group.name);
            let (severity, verdict) = if lenient {
                (Severity::Warning, "might be missing resources")
            } else {
                (Severity::Error, "is missing resources!")
            };

            let mut sorted_present = langs.clone();
            sorted_present.sort_unstable();
            let message = format!(
                "{} {}\n  Present: {}\n  Missing: {}",
                group.name,
                verdict,
                sorted_present.join(", "),
                missing.join(", ")
            );
            findings.push(Finding::new(NAME, severity, Some(id.clone()), message));
        }
        findings
    }

    fn is_media(&self, resource_name: &str) -> bool {
        Path::new(resource_name)
            .extension()
            .is_some_and(|ext| {
                let dotted = format!(".{}", ext.to_string_lossy());
                self.media_extensions.iter().any(|m| *m == dotted)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MEDIA_EXTENSIONS;
    use crate::graph::{FileReference, ObjectGraph, ObjectId, ProjectRoot, SourceTree, VariantGroup};
    use std::collections::BTreeMap;

    /// Graph with required languages {en, fr} and one variant group
    /// named `name` whose children carry the given language tags.
    fn graph(name: &str, langs: &[&str]) -> ObjectGraph {
        graph_with_regions(&["en", "fr", "Base"], name, langs)
    }

    fn graph_with_regions(regions: &[&str], name: &str, langs: &[&str]) -> ObjectGraph {
        let mut objects = BTreeMap::new();
        let children: Vec<ObjectId> = langs
            .iter()
            .enumerate()
            .map(|(i, lang)| {
                let id = ObjectId(format!("LANG{i}"));
                objects.insert(
                    id.clone(),
                    Object::FileReference(FileReference {
                        name: Some((*lang).to_owned()),
                        path: format!("{lang}.lproj/{name}"),
                        source_tree: SourceTree::GroupRelative,
                    }),
                );
                id
            })
            .collect();
        objects.insert(
            ObjectId::from("VG"),
            Object::VariantGroup(VariantGroup {
                name: name.to_owned(),
                children,
            }),
        );
        ObjectGraph::new(
            ProjectRoot {
                known_regions: regions.iter().map(|r| (*r).to_owned()).collect(),
                main_group: ObjectId::from("MAIN"),
                build_configuration_list: ObjectId::from("CFGLIST"),
            },
            objects,
        )
    }

    fn check(strict: bool, graph: &ObjectGraph) -> Vec<Finding> {
        let media = DEFAULT_MEDIA_EXTENSIONS.iter().map(|s| (*s).to_owned()).collect();
        LocalizationCheck::new(strict, media).check(graph)
    }

    #[test]
    fn base_only_group_is_skipped_in_both_modes() {
        let graph = graph("icon.png", &["Base"]);
        assert!(check(false, &graph).is_empty());
        assert!(check(true, &graph).is_empty());
    }

    #[test]
    fn complete_group_produces_nothing() {
        let graph = graph("Main.strings", &["en", "fr"]);
        assert!(check(false, &graph).is_empty());
    }

    #[test]
    fn partially_localized_media_warns_outside_strict_mode() {
        let graph = graph("icon.png", &["en"]);
        let findings = check(false, &graph);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].subject, Some(ObjectId::from("VG")));
        assert_eq!(
            findings[0].message,
            "icon.png might be missing resources\n  Present: en\n  Missing: fr"
        );
    }

    #[test]
    fn partially_localized_text_resource_is_an_error() {
        let graph = graph("Main.strings", &["en"]);
        let findings = check(false, &graph);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.contains("is missing resources!"));
    }

    #[test]
    fn strict_mode_turns_media_warning_into_error() {
        let graph = graph("icon.png", &["en"]);
        let findings = check(true, &graph);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn media_group_with_no_present_language_is_an_error() {
        let graph = graph("icon.png", &[]);
        let findings = check(false, &graph);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn listings_are_sorted_ascending() {
        let graph = graph_with_regions(&["fr", "en", "de", "Base"], "icon.png", &["fr", "en"]);
        let findings = check(false, &graph);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "icon.png might be missing resources\n  Present: en, fr\n  Missing: de"
        );
    }
}
