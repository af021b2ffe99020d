//! Paragraph, run, and inline node models.

use serde::{Deserialize, Serialize};

use super::NoteType;

/// Vertical position of run text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    #[default]
    Baseline,
    Superscript,
    Subscript,
}

/// List membership of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingLevel {
    /// Nesting level index (`w:ilvl`), "0" for top level
    pub level_index: String,
    /// Whether the list is numbered rather than bulleted
    pub is_ordered: bool,
}

impl NumberingLevel {
    pub fn new(level_index: impl Into<String>, is_ordered: bool) -> Self {
        Self {
            level_index: level_index.into(),
            is_ordered,
        }
    }
}

/// A run of text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A named position marker.
///
/// Besides bookmarks declared in the source, a `lastRenderedPageBreak` marker
/// is synthesized wherever the producer recorded a rendered page boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub name: String,
}

impl Bookmark {
    /// Name of the marker synthesized for rendered page breaks.
    pub const LAST_RENDERED_PAGE_BREAK: &'static str = "lastRenderedPageBreak";

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Check if this marks a rendered page boundary.
    pub fn is_page_break(&self) -> bool {
        self.name == Self::LAST_RENDERED_PAGE_BREAK
    }
}

/// Kind of explicit break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakType {
    #[default]
    Line,
    Page,
    Column,
}

/// Reference from the document flow to a footnote or endnote.
///
/// The note body lives in [`crate::model::Notes`]; look it up with
/// [`crate::model::Document::find_note`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteReference {
    pub note_type: NoteType,
    pub note_id: String,
}

impl NoteReference {
    pub fn new(note_type: NoteType, note_id: impl Into<String>) -> Self {
        Self {
            note_type,
            note_id: note_id.into(),
        }
    }
}

/// Reference from the document flow to a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentReference {
    pub comment_id: String,
}

/// Content of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RunChild {
    Text(Text),
    Tab,
    Break { break_type: BreakType },
    Bookmark(Bookmark),
    NoteReference(NoteReference),
    CommentReference(CommentReference),
}

impl RunChild {
    pub fn text(value: impl Into<String>) -> Self {
        RunChild::Text(Text::new(value))
    }
}

/// A run of content with uniform character formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    #[serde(default)]
    pub children: Vec<RunChild>,

    /// Character style ID reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,

    /// Character style display name, when the style is defined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_bold: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_italic: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_underline: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_strikethrough: bool,

    #[serde(default, skip_serializing_if = "is_baseline")]
    pub vertical_alignment: VerticalAlignment,
}

fn is_baseline(alignment: &VerticalAlignment) -> bool {
    *alignment == VerticalAlignment::Baseline
}

impl Run {
    pub fn new(children: Vec<RunChild>) -> Self {
        Self {
            children,
            ..Default::default()
        }
    }

    /// Create a run holding a single text node.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(vec![RunChild::text(text)])
    }

    /// Concatenated text of the run; tabs and line breaks become whitespace.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                RunChild::Text(t) => text.push_str(&t.value),
                RunChild::Tab => text.push('\t'),
                RunChild::Break {
                    break_type: BreakType::Line,
                } => text.push('\n'),
                _ => {}
            }
        }
        text
    }

    /// Check if the run has nothing but empty text.
    pub fn is_empty(&self) -> bool {
        self.children
            .iter()
            .all(|child| matches!(child, RunChild::Text(t) if t.value.is_empty()))
    }
}

/// A hyperlink wrapping inline content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperlink {
    #[serde(default)]
    pub children: Vec<Inline>,

    /// External target, resolved from the part's relationships
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Bookmark name for an internal link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_frame: Option<String>,
}

/// Content of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    Run(Run),
    Hyperlink(Hyperlink),
    Bookmark(Bookmark),
}

impl Inline {
    fn plain_text(&self) -> String {
        match self {
            Inline::Run(run) => run.plain_text(),
            Inline::Hyperlink(link) => link.children.iter().map(Inline::plain_text).collect(),
            Inline::Bookmark(_) => String::new(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Inline::Run(run) => run.is_empty(),
            _ => false,
        }
    }
}

/// A paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub children: Vec<Inline>,

    /// Paragraph style ID reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,

    /// Paragraph style display name, when the style is defined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,

    /// List information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbering: Option<NumberingLevel>,

    /// Justification (`w:jc` value)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
}

impl Paragraph {
    pub fn new(children: Vec<Inline>) -> Self {
        Self {
            children,
            ..Default::default()
        }
    }

    /// Create a paragraph holding one run of text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(vec![Inline::Run(Run::with_text(text))])
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(Inline::plain_text).collect()
    }

    /// Check if the paragraph has no content beyond empty runs.
    pub fn is_empty(&self) -> bool {
        self.children.iter().all(Inline::is_empty)
    }

    /// Check if this paragraph is a list item.
    pub fn is_list_item(&self) -> bool {
        self.numbering.is_some()
    }
}
