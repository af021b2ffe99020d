//! Main document part.

use super::body::BodyReader;
use crate::error::{Error, Result};
use crate::model::{Comment, Document, Notes};
use crate::results::ReadResult;
use crate::xml::XmlElement;

/// Build the document from the parsed root of the main document part.
///
/// The body element must be a direct child of the root; its absence is the
/// only hard failure. Note references in the body are resolved against
/// `notes`, which then moves into the document.
pub fn read_document_xml_element(
    root: &XmlElement,
    notes: Notes,
    comments: Vec<Comment>,
    reader: BodyReader<'_>,
    body_element_name: &str,
) -> Result<ReadResult<Document>> {
    let body = root
        .find_child(body_element_name)
        .ok_or_else(|| Error::MissingBody(body_element_name.to_string()))?;

    let children = reader.with_notes(&notes).read_blocks(body);
    Ok(children.map(|children| Document {
        children,
        notes,
        comments,
    }))
}
