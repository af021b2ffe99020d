//! Body content readers.
//!
//! Every element of a body tree is classified once into an [`ElementKind`],
//! and each reading context (blocks, paragraph content, run content, table
//! rows and cells) matches exhaustively on the kinds it accepts. Anything
//! else becomes a warning, never an error: an element of unknown kind is
//! reported as unrecognised, and a known element in the wrong place as
//! unexpected.

use std::collections::HashMap;

use super::numbering::Numbering;
use super::relationships::Relationships;
use super::styles::{StyleType, Styles};
use crate::model::{
    Block, Bookmark, BreakType, CommentReference, Hyperlink, Inline, NoteReference, NoteType,
    Notes, NumberingLevel, Paragraph, Run, RunChild, Table, TableCell, TableRow,
    VerticalAlignment,
};
use crate::results::{ReadResult, Warning};
use crate::xml::XmlElement;

/// Elements with no content of their own, skipped without a warning.
const IGNORED_ELEMENTS: &[&str] = &[
    "w:pPr",
    "w:rPr",
    "w:bookmarkEnd",
    "w:sectPr",
    "w:proofErr",
    "w:commentRangeStart",
    "w:commentRangeEnd",
    "w:del",
    "w:footnoteRef",
    "w:endnoteRef",
    "w:annotationRef",
    "w:fldChar",
    "w:instrText",
    "w:tblPr",
    "w:tblGrid",
    "w:trPr",
    "w:tcPr",
    "w:sdtPr",
    "w:sdtEndPr",
    "v:shapetype",
    "v:shadow",
    "office-word:wrap",
];

/// Containers whose children are read in place of the container.
const PASS_THROUGH_ELEMENTS: &[&str] = &["w:ins", "w:smartTag", "w:sdt", "w:sdtContent", "w:fldSimple"];

/// Bookmark Word inserts at the last edit position.
const GO_BACK_BOOKMARK: &str = "_GoBack";

/// Recognised element kinds.
#[derive(Debug, Clone, Copy)]
enum ElementKind<'a> {
    Paragraph(&'a XmlElement),
    Run(&'a XmlElement),
    Text(&'a XmlElement),
    Tab,
    Break(&'a XmlElement),
    LastRenderedPageBreak,
    BookmarkStart(&'a XmlElement),
    Hyperlink(&'a XmlElement),
    NoteReference(NoteType, &'a XmlElement),
    CommentReference(&'a XmlElement),
    Table(&'a XmlElement),
    TableRow(&'a XmlElement),
    TableCell(&'a XmlElement),
    PassThrough(&'a XmlElement),
    AlternateContent(&'a XmlElement),
    Ignored,
    Unrecognised(&'a XmlElement),
}

impl<'a> ElementKind<'a> {
    fn of(element: &'a XmlElement) -> Self {
        match element.name.as_str() {
            "w:p" => ElementKind::Paragraph(element),
            "w:r" => ElementKind::Run(element),
            "w:t" => ElementKind::Text(element),
            "w:tab" => ElementKind::Tab,
            "w:br" => ElementKind::Break(element),
            "w:lastRenderedPageBreak" => ElementKind::LastRenderedPageBreak,
            "w:bookmarkStart" => ElementKind::BookmarkStart(element),
            "w:hyperlink" => ElementKind::Hyperlink(element),
            "w:footnoteReference" => ElementKind::NoteReference(NoteType::Footnote, element),
            "w:endnoteReference" => ElementKind::NoteReference(NoteType::Endnote, element),
            "w:commentReference" => ElementKind::CommentReference(element),
            "w:tbl" => ElementKind::Table(element),
            "w:tr" => ElementKind::TableRow(element),
            "w:tc" => ElementKind::TableCell(element),
            "mc:AlternateContent" => ElementKind::AlternateContent(element),
            name if PASS_THROUGH_ELEMENTS.contains(&name) => ElementKind::PassThrough(element),
            name if IGNORED_ELEMENTS.contains(&name) => ElementKind::Ignored,
            _ => ElementKind::Unrecognised(element),
        }
    }
}

fn unrecognised<T>(element: &XmlElement) -> ReadResult<Vec<T>> {
    ReadResult::warning(format!(
        "An unrecognised element was ignored: {}",
        element.name
    ))
}

fn unexpected<T>(element: &XmlElement) -> ReadResult<Vec<T>> {
    ReadResult::warning(format!(
        "An element was ignored because it is not allowed here: {}",
        element.name
    ))
}

fn ignored<T>(element: &XmlElement) -> ReadResult<Vec<T>> {
    log::trace!("ignoring {}", element.name);
    ReadResult::empty()
}

/// Reads body trees into model nodes.
///
/// Note references are checked against `notes` when it is set: a reference
/// that does not resolve is dropped with a warning. Without notes (while the
/// note parts themselves are being read) references are kept as found.
#[derive(Debug, Clone, Copy)]
pub struct BodyReader<'a> {
    styles: &'a Styles,
    numbering: &'a Numbering,
    relationships: &'a Relationships,
    notes: Option<&'a Notes>,
}

impl<'a> BodyReader<'a> {
    pub fn new(styles: &'a Styles, numbering: &'a Numbering, relationships: &'a Relationships) -> Self {
        Self {
            styles,
            numbering,
            relationships,
            notes: None,
        }
    }

    /// Resolve note references against a note collection.
    pub fn with_notes(self, notes: &'a Notes) -> Self {
        Self {
            notes: Some(notes),
            ..self
        }
    }

    /// Read the block-level children of a container (body, note, comment, cell).
    pub fn read_blocks(&self, parent: &XmlElement) -> ReadResult<Vec<Block>> {
        parent
            .child_elements()
            .map(|element| match ElementKind::of(element) {
                ElementKind::Paragraph(p) => self.read_paragraph(p).map(|p| vec![Block::Paragraph(p)]),
                ElementKind::Table(t) => self.read_table(t).map(|t| vec![Block::Table(t)]),
                ElementKind::PassThrough(e) => self.read_blocks(e),
                ElementKind::AlternateContent(e) => self.read_fallback(e, Self::read_blocks),
                // Bookmarks between paragraphs have no block-level position
                ElementKind::BookmarkStart(_) | ElementKind::Ignored => ignored(element),
                ElementKind::Unrecognised(e) => unrecognised(e),
                ElementKind::Run(_)
                | ElementKind::Text(_)
                | ElementKind::Tab
                | ElementKind::Break(_)
                | ElementKind::LastRenderedPageBreak
                | ElementKind::Hyperlink(_)
                | ElementKind::NoteReference(..)
                | ElementKind::CommentReference(_)
                | ElementKind::TableRow(_)
                | ElementKind::TableCell(_) => unexpected(element),
            })
            .collect()
    }

    /// Read the content of a paragraph or hyperlink.
    fn read_inlines(&self, parent: &XmlElement) -> ReadResult<Vec<Inline>> {
        parent
            .child_elements()
            .map(|element| match ElementKind::of(element) {
                ElementKind::Run(r) => self.read_run(r).map(|r| vec![Inline::Run(r)]),
                ElementKind::Hyperlink(h) => self.read_hyperlink(h),
                ElementKind::BookmarkStart(b) => {
                    ReadResult::success(read_bookmark(b).map(Inline::Bookmark).into_iter().collect())
                }
                ElementKind::PassThrough(e) => self.read_inlines(e),
                ElementKind::AlternateContent(e) => self.read_fallback(e, Self::read_inlines),
                ElementKind::Ignored => ignored(element),
                ElementKind::Unrecognised(e) => unrecognised(e),
                ElementKind::Paragraph(_)
                | ElementKind::Text(_)
                | ElementKind::Tab
                | ElementKind::Break(_)
                | ElementKind::LastRenderedPageBreak
                | ElementKind::NoteReference(..)
                | ElementKind::CommentReference(_)
                | ElementKind::Table(_)
                | ElementKind::TableRow(_)
                | ElementKind::TableCell(_) => unexpected(element),
            })
            .collect()
    }

    /// Read the content of a run.
    ///
    /// A rendered page break becomes a bookmark at its position, so the text
    /// on either side is kept in order around it.
    fn read_run_children(&self, run: &XmlElement) -> ReadResult<Vec<RunChild>> {
        run.child_elements()
            .map(|element| match ElementKind::of(element) {
                ElementKind::Text(t) => ReadResult::success(vec![RunChild::text(t.inner_text())]),
                ElementKind::Tab => ReadResult::success(vec![RunChild::Tab]),
                ElementKind::Break(b) => read_break(b),
                ElementKind::LastRenderedPageBreak => ReadResult::success(vec![RunChild::Bookmark(
                    Bookmark::new(Bookmark::LAST_RENDERED_PAGE_BREAK),
                )]),
                ElementKind::BookmarkStart(b) => {
                    ReadResult::success(read_bookmark(b).map(RunChild::Bookmark).into_iter().collect())
                }
                ElementKind::NoteReference(note_type, r) => self.read_note_reference(note_type, r),
                ElementKind::CommentReference(r) => read_comment_reference(r),
                ElementKind::PassThrough(e) => self.read_run_children(e),
                ElementKind::AlternateContent(e) => self.read_fallback(e, Self::read_run_children),
                ElementKind::Ignored => ignored(element),
                ElementKind::Unrecognised(e) => unrecognised(e),
                ElementKind::Paragraph(_)
                | ElementKind::Run(_)
                | ElementKind::Hyperlink(_)
                | ElementKind::Table(_)
                | ElementKind::TableRow(_)
                | ElementKind::TableCell(_) => unexpected(element),
            })
            .collect()
    }

    /// Read the `mc:Fallback` branch of an `mc:AlternateContent` element.
    fn read_fallback<T>(
        &self,
        element: &XmlElement,
        read: impl Fn(&Self, &XmlElement) -> ReadResult<Vec<T>>,
    ) -> ReadResult<Vec<T>> {
        match element.find_child("mc:Fallback") {
            Some(fallback) => read(self, fallback),
            None => ReadResult::empty(),
        }
    }

    fn read_paragraph(&self, element: &XmlElement) -> ReadResult<Paragraph> {
        let properties = element.find_child("w:pPr");
        let ReadResult {
            value: (style_id, style_name),
            mut messages,
        } = self.read_style(properties, "w:pStyle", StyleType::Paragraph);

        let children = self.read_inlines(element);
        messages.extend(children.messages);

        let paragraph = Paragraph {
            children: children.value,
            style_id,
            style_name,
            numbering: properties.and_then(|p| self.read_numbering(p)),
            alignment: properties
                .and_then(|p| p.find_child("w:jc"))
                .and_then(|jc| jc.attribute("w:val"))
                .map(str::to_string),
        };
        ReadResult::new(paragraph, messages)
    }

    fn read_numbering(&self, properties: &XmlElement) -> Option<NumberingLevel> {
        let num_pr = properties.find_child("w:numPr")?;
        let level = num_pr.find_child("w:ilvl")?.attribute("w:val")?;
        let num_id = num_pr.find_child("w:numId")?.attribute("w:val")?;
        self.numbering.find_level(num_id, level).cloned()
    }

    fn read_run(&self, element: &XmlElement) -> ReadResult<Run> {
        let properties = element.find_child("w:rPr");
        let ReadResult {
            value: (style_id, style_name),
            mut messages,
        } = self.read_style(properties, "w:rStyle", StyleType::Character);

        let children = self.read_run_children(element);
        messages.extend(children.messages);

        let run = Run {
            children: children.value,
            style_id,
            style_name,
            is_bold: bool_property(properties, "w:b"),
            is_italic: bool_property(properties, "w:i"),
            is_underline: underline_property(properties),
            is_strikethrough: bool_property(properties, "w:strike"),
            vertical_alignment: vertical_alignment_property(properties),
        };
        ReadResult::new(run, messages)
    }

    /// Look up the style referenced by `properties/<tag>`, returning its ID and name.
    fn read_style(
        &self,
        properties: Option<&XmlElement>,
        tag: &str,
        style_type: StyleType,
    ) -> ReadResult<(Option<String>, Option<String>)> {
        let Some(style_id) = properties
            .and_then(|p| p.find_child(tag))
            .and_then(|style| style.attribute("w:val"))
        else {
            return ReadResult::success((None, None));
        };

        match self.styles.find(style_type, style_id) {
            Some(style) => ReadResult::success((Some(style_id.to_string()), style.name.clone())),
            None => ReadResult::new(
                (Some(style_id.to_string()), None),
                vec![Warning::new(format!(
                    "{} style with ID {} was referenced but not defined in the document",
                    style_type.label(),
                    style_id
                ))],
            ),
        }
    }

    fn read_hyperlink(&self, element: &XmlElement) -> ReadResult<Vec<Inline>> {
        let children = self.read_inlines(element);
        let anchor = element.attribute("w:anchor").filter(|a| !a.is_empty());
        let target_frame = element
            .attribute("w:tgtFrame")
            .filter(|f| !f.is_empty())
            .map(str::to_string);

        if let Some(relationship_id) = element.attribute("r:id") {
            let Some(target) = self.relationships.find_target_by_id(relationship_id) else {
                let mut result = children;
                result.messages.push(Warning::new(format!(
                    "Could not find hyperlink target with relationship ID {}",
                    relationship_id
                )));
                return result;
            };
            let href = match anchor {
                Some(anchor) => {
                    let base = target.split('#').next().unwrap_or(target);
                    format!("{}#{}", base, anchor)
                }
                None => target.to_string(),
            };
            children.map(|children| {
                vec![Inline::Hyperlink(Hyperlink {
                    children,
                    href: Some(href),
                    anchor: None,
                    target_frame,
                })]
            })
        } else if let Some(anchor) = anchor {
            children.map(|children| {
                vec![Inline::Hyperlink(Hyperlink {
                    children,
                    href: None,
                    anchor: Some(anchor.to_string()),
                    target_frame,
                })]
            })
        } else {
            children
        }
    }

    fn read_note_reference(&self, note_type: NoteType, element: &XmlElement) -> ReadResult<Vec<RunChild>> {
        let Some(note_id) = element.attribute("w:id") else {
            return ReadResult::warning(format!("A {} reference without an ID was ignored", note_type));
        };
        match self.notes {
            Some(notes) if notes.find_note(note_type, note_id).is_none() => ReadResult::warning(format!(
                "A reference to a missing {} was ignored: {}",
                note_type, note_id
            )),
            _ => ReadResult::success(vec![RunChild::NoteReference(NoteReference::new(
                note_type, note_id,
            ))]),
        }
    }

    fn read_table(&self, element: &XmlElement) -> ReadResult<Table> {
        let properties = element.find_child("w:tblPr");
        let ReadResult {
            value: (style_id, style_name),
            mut messages,
        } = self.read_style(properties, "w:tblStyle", StyleType::Table);

        let rows = self.read_rows(element);
        messages.extend(rows.messages);

        let table = Table {
            rows: calculate_row_spans(rows.value),
            style_id,
            style_name,
        };
        ReadResult::new(table, messages)
    }

    fn read_rows(&self, parent: &XmlElement) -> ReadResult<Vec<RowRead>> {
        parent
            .child_elements()
            .map(|element| match ElementKind::of(element) {
                ElementKind::TableRow(row) => self.read_row(row).map(|row| vec![row]),
                ElementKind::PassThrough(e) => self.read_rows(e),
                ElementKind::Ignored => ignored(element),
                ElementKind::Unrecognised(e) => unrecognised(e),
                _ => unexpected(element),
            })
            .collect()
    }

    fn read_row(&self, element: &XmlElement) -> ReadResult<RowRead> {
        let is_header = bool_property(element.find_child("w:trPr"), "w:tblHeader");
        self.read_cells(element)
            .map(|cells| RowRead { cells, is_header })
    }

    fn read_cells(&self, parent: &XmlElement) -> ReadResult<Vec<CellRead>> {
        parent
            .child_elements()
            .map(|element| match ElementKind::of(element) {
                ElementKind::TableCell(cell) => self.read_cell(cell).map(|cell| vec![cell]),
                ElementKind::PassThrough(e) => self.read_cells(e),
                ElementKind::Ignored => ignored(element),
                ElementKind::Unrecognised(e) => unrecognised(e),
                _ => unexpected(element),
            })
            .collect()
    }

    fn read_cell(&self, element: &XmlElement) -> ReadResult<CellRead> {
        let properties = element.find_child("w:tcPr");
        let colspan = properties
            .and_then(|p| p.find_child("w:gridSpan"))
            .and_then(|span| span.attribute("w:val"))
            .and_then(|val| val.parse::<u32>().ok())
            .filter(|&span| span > 0)
            .unwrap_or(1);
        let vertical_merge = properties
            .and_then(|p| p.find_child("w:vMerge"))
            .map(|merge| match merge.attribute("w:val") {
                Some("restart") => VerticalMerge::Restart,
                _ => VerticalMerge::Continue,
            });

        self.read_blocks(element).map(|children| CellRead {
            cell: TableCell {
                children,
                colspan,
                rowspan: 1,
            },
            vertical_merge,
        })
    }
}

fn read_break(element: &XmlElement) -> ReadResult<Vec<RunChild>> {
    let break_type = match element.attribute("w:type") {
        None | Some("textWrapping") => BreakType::Line,
        Some("page") => BreakType::Page,
        Some("column") => BreakType::Column,
        Some(other) => return ReadResult::warning(format!("Unsupported break type: {}", other)),
    };
    ReadResult::success(vec![RunChild::Break { break_type }])
}

fn read_bookmark(element: &XmlElement) -> Option<Bookmark> {
    element
        .attribute("w:name")
        .filter(|name| !name.is_empty() && *name != GO_BACK_BOOKMARK)
        .map(Bookmark::new)
}

fn read_comment_reference(element: &XmlElement) -> ReadResult<Vec<RunChild>> {
    match element.attribute("w:id") {
        Some(id) => ReadResult::success(vec![RunChild::CommentReference(CommentReference {
            comment_id: id.to_string(),
        })]),
        None => ReadResult::warning("A comment reference without an ID was ignored"),
    }
}

/// A toggle property: on when present, unless its value is false.
fn bool_property(properties: Option<&XmlElement>, name: &str) -> bool {
    properties
        .and_then(|p| p.find_child(name))
        .is_some_and(|element| !matches!(element.attribute("w:val"), Some("false" | "0")))
}

fn underline_property(properties: Option<&XmlElement>) -> bool {
    properties
        .and_then(|p| p.find_child("w:u"))
        .and_then(|u| u.attribute("w:val"))
        .is_some_and(|val| !matches!(val, "false" | "0" | "none"))
}

fn vertical_alignment_property(properties: Option<&XmlElement>) -> VerticalAlignment {
    match properties
        .and_then(|p| p.find_child("w:vertAlign"))
        .and_then(|align| align.attribute("w:val"))
    {
        Some("superscript") => VerticalAlignment::Superscript,
        Some("subscript") => VerticalAlignment::Subscript,
        _ => VerticalAlignment::Baseline,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerticalMerge {
    Restart,
    Continue,
}

#[derive(Debug)]
struct CellRead {
    cell: TableCell,
    vertical_merge: Option<VerticalMerge>,
}

#[derive(Debug)]
struct RowRead {
    cells: Vec<CellRead>,
    is_header: bool,
}

/// Fold vertically merged cells into the rowspan of the cell that starts the merge.
///
/// A continuation cell is dropped when the cell above it in the same grid
/// column is part of a merge; otherwise it is kept as an ordinary cell.
fn calculate_row_spans(rows: Vec<RowRead>) -> Vec<TableRow> {
    let mut table_rows: Vec<TableRow> = Vec::with_capacity(rows.len());
    // Grid column -> (row, cell) index of the cell holding an open merge
    let mut merges: HashMap<usize, (usize, usize)> = HashMap::new();

    for row in rows {
        let row_index = table_rows.len();
        let mut cells = Vec::with_capacity(row.cells.len());
        let mut column = 0;

        for CellRead {
            cell,
            vertical_merge,
        } in row.cells
        {
            let colspan = cell.colspan as usize;
            let origin = merges.get(&column).copied();
            match (vertical_merge, origin) {
                (Some(VerticalMerge::Continue), Some((origin_row, origin_cell))) => {
                    table_rows[origin_row].cells[origin_cell].rowspan += 1;
                }
                (Some(_), _) => {
                    merges.insert(column, (row_index, cells.len()));
                    cells.push(cell);
                }
                (None, _) => {
                    merges.remove(&column);
                    cells.push(cell);
                }
            }
            column += colspan;
        }

        table_rows.push(TableRow {
            cells,
            is_header: row.is_header,
        });
    }
    table_rows
}
