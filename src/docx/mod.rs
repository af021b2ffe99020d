//! DOCX (Word) package reading.
//!
//! [`read`] is the conversion entry point: it locates the parts of the
//! package, parses each one, reads the auxiliary parts (styles, numbering,
//! notes, comments) and finally builds the [`Document`] from the main
//! document body.

pub mod body;
pub mod comments;
pub mod document;
pub mod notes;
pub mod numbering;
pub mod part_paths;
pub mod relationships;
pub mod styles;

pub use body::BodyReader;
pub use part_paths::{find_part_paths, PartKind, PartPaths};
pub use relationships::{Relationship, Relationships};

use crate::error::{Error, Result};
use crate::model::{Document, NoteType, Notes};
use crate::options::ReadOptions;
use crate::package::Package;
use crate::results::ReadResult;
use crate::xml::{NamespaceMap, XmlElement};

use numbering::Numbering;
use styles::Styles;

/// Read a package into a document.
///
/// Malformed XML in any part, a missing main document and a main document
/// without a body are fatal. Everything else the readers do not understand is
/// returned as warnings, in encounter order: footnotes, endnotes, comments,
/// then the main body.
pub fn read(package: &Package, options: &ReadOptions) -> Result<ReadResult<Document>> {
    let namespaces = &options.namespace_mapping;
    let paths = find_part_paths(package);

    let styles = package
        .try_read_xml(&paths.styles, namespaces)?
        .map(|element| Styles::read(&element))
        .unwrap_or_default();
    let numbering = package
        .try_read_xml(&paths.numbering, namespaces)?
        .map(|element| Numbering::read(&element))
        .unwrap_or_default();

    let mut messages = Vec::new();

    let mut notes = Notes::new();
    for (note_type, path) in [
        (NoteType::Footnote, &paths.footnotes),
        (NoteType::Endnote, &paths.endnotes),
    ] {
        let Some(element) = package.try_read_xml(path, namespaces)? else {
            continue;
        };
        let relationships = Relationships::read_for_part(package, path);
        let reader = BodyReader::new(&styles, &numbering, &relationships);
        let result = notes::read_notes_xml_element(&element, note_type, reader);
        log::debug!("read {} {}s from {}", result.value.len(), note_type, path);
        notes.extend(result.value);
        messages.extend(result.messages);
    }

    let comments = match package.try_read_xml(&paths.comments, namespaces)? {
        Some(element) => {
            let relationships = Relationships::read_for_part(package, &paths.comments);
            let reader = BodyReader::new(&styles, &numbering, &relationships);
            let result = comments::read_comments_xml_element(&element, reader);
            messages.extend(result.messages);
            result.value
        }
        None => Vec::new(),
    };

    let root = read_main_document(package, &paths.main_document, namespaces)?;
    let relationships = Relationships::read_for_part(package, &paths.main_document);
    let reader = BodyReader::new(&styles, &numbering, &relationships);
    let mut result = document::read_document_xml_element(
        &root,
        notes,
        comments,
        reader,
        &options.body_element_name,
    )?;

    messages.append(&mut result.messages);
    result.messages = messages;
    Ok(result)
}

fn read_main_document(
    package: &Package,
    path: &str,
    namespaces: &NamespaceMap,
) -> Result<XmlElement> {
    package
        .try_read_xml(path, namespaces)?
        .ok_or_else(|| Error::MainDocumentNotFound(path.to_string()))
}
