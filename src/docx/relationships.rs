//! Relationship files (`_rels/*.rels`).

use crate::package::Package;
use crate::xml::{NamespaceMap, XmlElement};

const RELATIONSHIPS_NAMESPACE: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const TRANSITIONAL_TYPE_PREFIX: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/";

const STRICT_TYPE_PREFIX: &str = "http://purl.oclc.org/ooxml/officeDocument/relationships/";

/// Namespace mapping used for relationship files, independent of reader options.
pub fn relationships_namespaces() -> NamespaceMap {
    NamespaceMap::new().with("relationships", RELATIONSHIPS_NAMESPACE)
}

/// Check if a relationship type URI denotes the named function
/// (e.g. "footnotes"), in either the transitional or strict vocabulary.
pub fn is_relationship_type(rel_type: &str, name: &str) -> bool {
    [TRANSITIONAL_TYPE_PREFIX, STRICT_TYPE_PREFIX]
        .iter()
        .any(|prefix| rel_type.strip_prefix(prefix) == Some(name))
}

/// A relationship entry from a .rels file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path as written (relative or absolute)
    pub target: String,
    /// Whether the target is outside the package
    pub external: bool,
}

/// Relationships from one .rels file, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    pub fn new(entries: Vec<Relationship>) -> Self {
        Self { entries }
    }

    /// Read relationships from a parsed `relationships:Relationships` element.
    ///
    /// Entries without an ID are skipped.
    pub fn read(element: &XmlElement) -> Self {
        let entries = element
            .find_children("relationships:Relationship")
            .filter_map(|child| {
                let id = child.attribute("Id")?;
                if id.is_empty() {
                    return None;
                }
                Some(Relationship {
                    id: id.to_string(),
                    rel_type: child.attribute("Type").unwrap_or_default().to_string(),
                    target: child.attribute("Target").unwrap_or_default().to_string(),
                    external: child
                        .attribute("TargetMode")
                        .is_some_and(|mode| mode.eq_ignore_ascii_case("external")),
                })
            })
            .collect();
        Self { entries }
    }

    /// Read the relationships file belonging to `part_path`.
    ///
    /// A missing file yields no relationships. So does a malformed one, since
    /// every lookup has a fallback; the failure is logged.
    pub fn read_for_part(package: &Package, part_path: &str) -> Self {
        let rels_path = Package::relationships_path_for(part_path);
        match package.try_read_xml(&rels_path, &relationships_namespaces()) {
            Ok(Some(root)) => Self::read(&root),
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("ignoring unreadable relationships file {}: {}", rels_path, e);
                Self::default()
            }
        }
    }

    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.entries.iter().find(|rel| rel.id == id)
    }

    /// Get the target of a relationship by ID.
    pub fn find_target_by_id(&self, id: &str) -> Option<&str> {
        self.get(id).map(|rel| rel.target.as_str())
    }

    /// Targets of relationships with exactly this type, in document order.
    pub fn find_targets_by_type<'a>(&'a self, rel_type: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |rel| rel.rel_type == rel_type)
            .map(|rel| rel.target.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
