//! Document model structures.

use super::{Paragraph, Table};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl Block {
    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph(para) => para.plain_text(),
            Block::Table(table) => table
                .rows
                .iter()
                .flat_map(|row| row.cells.iter())
                .flat_map(|cell| cell.children.iter())
                .map(Block::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Kind of note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    Footnote,
    Endnote,
}

impl NoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Footnote => "footnote",
            NoteType::Endnote => "endnote",
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A footnote or endnote body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub note_type: NoteType,
    /// Identifier, unique within the note type
    pub note_id: String,
    #[serde(default)]
    pub body: Vec<Block>,
}

impl Note {
    pub fn new(note_type: NoteType, note_id: impl Into<String>, body: Vec<Block>) -> Self {
        Self {
            note_type,
            note_id: note_id.into(),
            body,
        }
    }
}

/// Notes keyed by `(note_type, note_id)`, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notes {
    notes: Vec<Note>,
    index: HashMap<(NoteType, String), usize>,
}

impl Notes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a note, replacing any note with the same key.
    pub fn insert(&mut self, note: Note) {
        let key = (note.note_type, note.note_id.clone());
        match self.index.get(&key) {
            Some(&position) => self.notes[position] = note,
            None => {
                self.index.insert(key, self.notes.len());
                self.notes.push(note);
            }
        }
    }

    /// Find a note by type and ID.
    pub fn find_note(&self, note_type: NoteType, note_id: &str) -> Option<&Note> {
        self.index
            .get(&(note_type, note_id.to_string()))
            .map(|&position| &self.notes[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl FromIterator<Note> for Notes {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        let mut notes = Notes::new();
        for note in iter {
            notes.insert(note);
        }
        notes
    }
}

impl Extend<Note> for Notes {
    fn extend<I: IntoIterator<Item = Note>>(&mut self, iter: I) {
        for note in iter {
            self.insert(note);
        }
    }
}

impl Serialize for Notes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.notes.iter())
    }
}

impl<'de> Deserialize<'de> for Notes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Vec::<Note>::deserialize(deserializer)?.into_iter().collect())
    }
}

/// A comment attached to the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: String,
    #[serde(default)]
    pub body: Vec<Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_initials: Option<String>,
}

/// The abstract document: body blocks plus the notes and comments they reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub children: Vec<Block>,

    #[serde(default, skip_serializing_if = "Notes::is_empty")]
    pub notes: Notes,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

impl Document {
    /// Create a document with no notes or comments.
    pub fn new(children: Vec<Block>) -> Self {
        Self {
            children,
            ..Default::default()
        }
    }

    /// Find a referenced note by type and ID.
    pub fn find_note(&self, note_type: NoteType, note_id: &str) -> Option<&Note> {
        self.notes.find_note(note_type, note_id)
    }

    /// Find a comment by ID.
    pub fn find_comment(&self, comment_id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.comment_id == comment_id)
    }

    /// Check if the document has no body content.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Extract all body text as a single string, one line per block.
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_note_round_trips() {
        let mut notes = Notes::new();
        let note = Note::new(
            NoteType::Footnote,
            "4",
            vec![Block::Paragraph(Paragraph::default())],
        );
        notes.insert(note.clone());

        assert_eq!(notes.find_note(NoteType::Footnote, "4"), Some(&note));
        assert!(notes.find_note(NoteType::Endnote, "4").is_none());
        assert!(notes.find_note(NoteType::Footnote, "5").is_none());
    }

    #[test]
    fn test_insert_replaces_same_key() {
        let notes: Notes = vec![
            Note::new(NoteType::Endnote, "1", vec![]),
            Note::new(NoteType::Footnote, "1", vec![]),
            Note::new(
                NoteType::Endnote,
                "1",
                vec![Block::Paragraph(Paragraph::with_text("new"))],
            ),
        ]
        .into_iter()
        .collect();

        assert_eq!(notes.len(), 2);
        let endnote = notes.find_note(NoteType::Endnote, "1").unwrap();
        assert_eq!(endnote.body.len(), 1);
        assert_eq!(notes.iter().next().unwrap().note_type, NoteType::Endnote);
    }

    #[test]
    fn test_plain_text_extraction() {
        let doc = Document::new(vec![
            Block::Paragraph(Paragraph::with_text("Hello")),
            Block::Paragraph(Paragraph::with_text("World")),
        ]);
        assert_eq!(doc.plain_text(), "Hello\nWorld");
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_notes_serialize_as_sequence() {
        let mut doc = Document::new(vec![]);
        doc.notes.insert(Note::new(NoteType::Footnote, "1", vec![]));

        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"notes\":[{\"note_type\":\"footnote\",\"note_id\":\"1\""));
        assert!(!json.contains("comments"));

        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}
