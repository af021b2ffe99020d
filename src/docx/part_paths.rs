//! Locating the functional parts of a package.
//!
//! The main document is found through the package relationships, and the
//! auxiliary parts through the main document's own relationships. Every
//! lookup falls back to a conventional path, so resolution never fails; a
//! main document path that does not exist is reported later, when the part
//! is opened.

use serde::Serialize;

use super::relationships::{is_relationship_type, Relationships};
use crate::package::Package;

/// Conventional main document path, tried after any relationship targets.
pub const MAIN_DOCUMENT_FALLBACK: &str = "word/document.xml";

/// Auxiliary part kinds located through the main document's relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    Comments,
    Endnotes,
    Footnotes,
    Numbering,
    Styles,
}

impl PartKind {
    pub const ALL: [PartKind; 5] = [
        PartKind::Comments,
        PartKind::Endnotes,
        PartKind::Footnotes,
        PartKind::Numbering,
        PartKind::Styles,
    ];

    /// Relationship type suffix, also the conventional file stem.
    pub fn name(&self) -> &'static str {
        match self {
            PartKind::Comments => "comments",
            PartKind::Endnotes => "endnotes",
            PartKind::Footnotes => "footnotes",
            PartKind::Numbering => "numbering",
            PartKind::Styles => "styles",
        }
    }
}

/// Resolved paths of the parts a conversion reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartPaths {
    pub main_document: String,
    pub comments: String,
    pub endnotes: String,
    pub footnotes: String,
    pub numbering: String,
    pub styles: String,
}

impl PartPaths {
    /// Get the path of an auxiliary part.
    pub fn get(&self, kind: PartKind) -> &str {
        match kind {
            PartKind::Comments => &self.comments,
            PartKind::Endnotes => &self.endnotes,
            PartKind::Footnotes => &self.footnotes,
            PartKind::Numbering => &self.numbering,
            PartKind::Styles => &self.styles,
        }
    }
}

/// Resolve the part paths of a package.
pub fn find_part_paths(package: &Package) -> PartPaths {
    let package_relationships = Relationships::read_for_part(package, "");
    let main_document = find_main_document(package, &package_relationships);

    let document_relationships = Relationships::read_for_part(package, &main_document);
    let find = |kind| find_part_path(package, &document_relationships, kind, &main_document);

    let paths = PartPaths {
        comments: find(PartKind::Comments),
        endnotes: find(PartKind::Endnotes),
        footnotes: find(PartKind::Footnotes),
        numbering: find(PartKind::Numbering),
        styles: find(PartKind::Styles),
        main_document,
    };
    log::debug!("resolved part paths: {:?}", paths);
    paths
}

fn find_main_document(package: &Package, relationships: &Relationships) -> String {
    let mut candidates = targets_of_type(relationships, "officeDocument", "");
    candidates.push(MAIN_DOCUMENT_FALLBACK.to_string());
    first_existing(package, &candidates).unwrap_or_else(|| candidates.swap_remove(0))
}

fn find_part_path(
    package: &Package,
    relationships: &Relationships,
    kind: PartKind,
    main_document: &str,
) -> String {
    let candidates = targets_of_type(relationships, kind.name(), main_document);
    first_existing(package, &candidates)
        .unwrap_or_else(|| Package::resolve_path(main_document, &format!("{}.xml", kind.name())))
}

/// Normalized targets of relationships of one type, in document order,
/// resolved against the directory of the declaring part.
fn targets_of_type(relationships: &Relationships, name: &str, source: &str) -> Vec<String> {
    relationships
        .iter()
        .filter(|rel| !rel.external && is_relationship_type(&rel.rel_type, name))
        .map(|rel| Package::resolve_path(source, &rel.target))
        .collect()
}

fn first_existing(package: &Package, candidates: &[String]) -> Option<String> {
    candidates.iter().find(|path| package.exists(path)).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn package(files: &[(&str, &str)]) -> Package {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in files {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }
        Package::from_bytes(zip.finish().unwrap().into_inner()).unwrap()
    }

    fn package_rels(target: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="{}" Id="rId1"/>
</Relationships>"#,
            target
        )
    }

    fn document_rels(name: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/{}" Target="target-path.xml" Id="rId2"/>
</Relationships>"#,
            name
        )
    }

    #[test]
    fn test_main_document_found_using_package_relationships() {
        let rels = package_rels("/word/document2.xml");
        let package = package(&[("word/document2.xml", " "), ("_rels/.rels", rels.as_str())]);
        assert_eq!(find_part_paths(&package).main_document, "word/document2.xml");
    }

    #[test]
    fn test_main_document_fallback_without_relationships() {
        let package = package(&[("word/document.xml", " ")]);
        assert_eq!(find_part_paths(&package).main_document, "word/document.xml");
    }

    #[test]
    fn test_main_document_missing_keeps_relationship_target() {
        let rels = package_rels("/word/document2.xml");
        let package = package(&[("_rels/.rels", rels.as_str())]);
        assert_eq!(find_part_paths(&package).main_document, "word/document2.xml");
    }

    #[test]
    fn test_missing_relationship_target_falls_through_to_convention() {
        let rels = package_rels("/word/missing.xml");
        let package = package(&[("_rels/.rels", rels.as_str()), ("word/document.xml", " ")]);
        assert_eq!(find_part_paths(&package).main_document, "word/document.xml");
    }

    #[test]
    fn test_first_matching_relationship_wins() {
        let rels = r#"<?xml version="1.0" encoding="utf-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/b.xml" Id="rId1"/>
    <Relationship Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/a.xml" Id="rId2"/>
</Relationships>"#;
        let package = package(&[("_rels/.rels", rels), ("word/a.xml", " "), ("word/b.xml", " ")]);
        assert_eq!(find_part_paths(&package).main_document, "word/b.xml");
    }

    #[test]
    fn test_parts_found_using_main_document_relationships() {
        let package_rels = package_rels("/word/document.xml");
        for kind in PartKind::ALL {
            let document_rels = document_rels(kind.name());
            let package = package(&[
                ("_rels/.rels", package_rels.as_str()),
                ("word/document.xml", " "),
                ("word/_rels/document.xml.rels", document_rels.as_str()),
                ("word/target-path.xml", " "),
            ]);
            let paths = find_part_paths(&package);
            assert_eq!(paths.get(kind), "word/target-path.xml", "{:?}", kind);
        }
    }

    #[test]
    fn test_parts_fall_back_to_conventional_paths() {
        let package_rels = package_rels("/word/document.xml");
        let package = package(&[("_rels/.rels", package_rels.as_str()), ("word/document.xml", " ")]);
        let paths = find_part_paths(&package);
        for kind in PartKind::ALL {
            assert_eq!(paths.get(kind), format!("word/{}.xml", kind.name()), "{:?}", kind);
        }
    }

    #[test]
    fn test_malformed_relationships_use_fallbacks() {
        let package = package(&[("_rels/.rels", "<Relationships>"), ("word/document.xml", " ")]);
        let paths = find_part_paths(&package);
        assert_eq!(paths.main_document, "word/document.xml");
        assert_eq!(paths.styles, "word/styles.xml");
    }
}
