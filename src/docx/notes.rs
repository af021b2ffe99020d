//! Footnote and endnote parts.

use super::body::BodyReader;
use crate::model::{Note, NoteType};
use crate::results::ReadResult;
use crate::xml::XmlElement;

/// Note types that hold layout separators rather than note content.
const SEPARATOR_TYPES: &[&str] = &["separator", "continuationSeparator"];

/// Read the notes of one type from a parsed `w:footnotes` or `w:endnotes`
/// element. Each note body is read with the same block readers as the main
/// document body.
pub fn read_notes_xml_element(
    element: &XmlElement,
    note_type: NoteType,
    reader: BodyReader<'_>,
) -> ReadResult<Vec<Note>> {
    let tag = match note_type {
        NoteType::Footnote => "w:footnote",
        NoteType::Endnote => "w:endnote",
    };

    element
        .find_children(tag)
        .filter(|note| {
            !note
                .attribute("w:type")
                .is_some_and(|t| SEPARATOR_TYPES.contains(&t))
        })
        .map(|note| match note.attribute("w:id") {
            Some(id) => reader
                .read_blocks(note)
                .map(|body| vec![Note::new(note_type, id, body)]),
            None => ReadResult::warning(format!("A note without an ID was ignored ({})", note_type)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::numbering::Numbering;
    use crate::docx::relationships::Relationships;
    use crate::docx::styles::Styles;
    use crate::model::{Block, Paragraph};
    use crate::options::default_namespaces;
    use crate::xml::parse_xml;

    fn read(xml: &str, note_type: NoteType) -> ReadResult<Vec<Note>> {
        let styles = Styles::default();
        let numbering = Numbering::default();
        let relationships = Relationships::default();
        let element = parse_xml(xml.as_bytes(), &default_namespaces()).unwrap();
        read_notes_xml_element(
            &element,
            note_type,
            BodyReader::new(&styles, &numbering, &relationships),
        )
    }

    #[test]
    fn test_footnotes_skip_separators() {
        let result = read(
            r#"<w:footnotes xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    <w:footnote w:type="separator" w:id="-1"><w:p><w:r><w:separator/></w:r></w:p></w:footnote>
    <w:footnote w:type="continuationSeparator" w:id="0"><w:p/></w:footnote>
    <w:footnote w:id="1"><w:p><w:r><w:footnoteRef/><w:t> Note one</w:t></w:r></w:p></w:footnote>
</w:footnotes>"#,
            NoteType::Footnote,
        );

        assert!(result.messages.is_empty());
        assert_eq!(
            result.value,
            vec![Note::new(
                NoteType::Footnote,
                "1",
                vec![Block::Paragraph(Paragraph::with_text(" Note one"))]
            )]
        );
    }

    #[test]
    fn test_endnotes() {
        let result = read(
            r#"<w:endnotes xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    <w:endnote w:id="2"><w:p/></w:endnote>
    <w:endnote><w:p/></w:endnote>
</w:endnotes>"#,
            NoteType::Endnote,
        );

        assert_eq!(result.value.len(), 1);
        assert_eq!(result.value[0].note_type, NoteType::Endnote);
        assert_eq!(result.value[0].note_id, "2");
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].message, "A note without an ID was ignored (endnote)");
    }
}
