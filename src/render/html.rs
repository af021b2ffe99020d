//! Default HTML renderer.
//!
//! Paragraphs become `<p>` (or `<h1>`-`<h6>` for heading styles), run
//! formatting becomes `<strong>`, `<em>`, `<u>`, `<s>`, `<sup>` and `<sub>`,
//! and tables keep their cell spans. Note references are numbered in order
//! of appearance and the referenced notes are written as a list at the end,
//! each with a link back to its reference.

use crate::model::{
    Block, Bookmark, BreakType, Document, Hyperlink, Inline, NoteReference, NoteType, Paragraph,
    Run, RunChild, Table, VerticalAlignment,
};
use crate::writer::{page_marker, Fragment, HtmlWriter};

use super::options::RenderOptions;

/// Convert a Document to HTML.
pub fn to_html(doc: &Document, options: &RenderOptions) -> String {
    let mut renderer = HtmlRenderer::new(doc, options);
    renderer.render_blocks(&doc.children);
    renderer.render_notes();
    renderer.writer.finish()
}

struct HtmlRenderer<'a> {
    document: &'a Document,
    options: &'a RenderOptions,
    writer: HtmlWriter,
    /// Referenced notes in order of first appearance; position + 1 is the displayed number
    note_references: Vec<(NoteType, &'a str)>,
    /// Number of the page currently being rendered
    page: usize,
    /// Page breaks are only counted in the main body
    in_notes: bool,
}

impl<'a> HtmlRenderer<'a> {
    fn new(document: &'a Document, options: &'a RenderOptions) -> Self {
        Self {
            document,
            options,
            writer: HtmlWriter::new(),
            note_references: Vec::new(),
            page: 1,
            in_notes: false,
        }
    }

    fn html_id(&self, suffix: &str) -> String {
        format!("{}{}", self.options.id_prefix, suffix)
    }

    fn note_html_id(&self, note_type: NoteType, note_id: &str) -> String {
        self.html_id(&format!("{}-{}", note_type, note_id))
    }

    fn note_ref_html_id(&self, note_type: NoteType, note_id: &str) -> String {
        self.html_id(&format!("{}-ref-{}", note_type, note_id))
    }

    fn render_blocks(&mut self, blocks: &'a [Block]) {
        for block in blocks {
            match block {
                Block::Paragraph(paragraph) => self.render_paragraph(paragraph, None),
                Block::Table(table) => self.render_table(table),
            }
        }
    }

    /// Render a paragraph, optionally ending it with a back-link to `back_link`.
    fn render_paragraph(&mut self, paragraph: &'a Paragraph, back_link: Option<&str>) {
        if back_link.is_none() && self.options.ignore_empty_paragraphs && paragraph.is_empty() {
            return;
        }

        let tag = match self
            .options
            .style_mapping
            .get(paragraph.style_id.as_deref(), paragraph.style_name.as_deref())
        {
            Some(level) => format!("h{}", level.min(self.options.max_heading_level)),
            None => "p".to_string(),
        };

        self.writer.start(&tag, &[]);
        self.render_inlines(&paragraph.children);
        if let Some(href) = back_link {
            self.render_back_link(href);
        }
        self.writer.end(&tag);
    }

    fn render_back_link(&mut self, href: &str) {
        self.writer.text(" ");
        self.writer.start("a", &[("href", href)]);
        self.writer.text("↑");
        self.writer.end("a");
    }

    fn render_inlines(&mut self, inlines: &'a [Inline]) {
        for inline in inlines {
            match inline {
                Inline::Run(run) => self.render_run(run),
                Inline::Hyperlink(link) => self.render_hyperlink(link),
                Inline::Bookmark(bookmark) => self.render_bookmark(bookmark),
            }
        }
    }

    fn render_hyperlink(&mut self, link: &'a Hyperlink) {
        let href = match (&link.href, &link.anchor) {
            (Some(href), _) => href.clone(),
            (None, Some(anchor)) => format!("#{}", self.html_id(anchor)),
            (None, None) => {
                self.render_inlines(&link.children);
                return;
            }
        };

        let mut attributes = vec![("href", href.as_str())];
        if let Some(target) = &link.target_frame {
            attributes.push(("target", target.as_str()));
        }
        self.writer.start("a", &attributes);
        self.render_inlines(&link.children);
        self.writer.end("a");
    }

    fn render_bookmark(&mut self, bookmark: &Bookmark) {
        if bookmark.is_page_break() {
            if self.options.page_markers && !self.in_notes {
                self.page += 1;
                self.writer.write(&page_marker(self.page));
            }
            return;
        }
        let id = self.html_id(&bookmark.name);
        self.writer.start("a", &[("id", id.as_str())]);
        self.writer.end("a");
    }

    fn render_run(&mut self, run: &'a Run) {
        if run.children.is_empty() {
            return;
        }

        let mut wrappers = Vec::new();
        if run.is_bold {
            wrappers.push("strong");
        }
        if run.is_italic {
            wrappers.push("em");
        }
        match run.vertical_alignment {
            VerticalAlignment::Superscript => wrappers.push("sup"),
            VerticalAlignment::Subscript => wrappers.push("sub"),
            VerticalAlignment::Baseline => {}
        }
        if run.is_underline {
            wrappers.push("u");
        }
        if run.is_strikethrough {
            wrappers.push("s");
        }

        for tag in &wrappers {
            self.writer.start(tag, &[]);
        }
        for child in &run.children {
            self.render_run_child(child);
        }
        for tag in wrappers.iter().rev() {
            self.writer.end(tag);
        }
    }

    fn render_run_child(&mut self, child: &'a RunChild) {
        match child {
            RunChild::Text(text) => self.writer.write(&Fragment::text(text.value.as_str())),
            RunChild::Tab => self.writer.text("\t"),
            RunChild::Break {
                break_type: BreakType::Line,
            } => self.writer.self_closing("br", &[]),
            RunChild::Break { .. } => {}
            RunChild::Bookmark(bookmark) => self.render_bookmark(bookmark),
            RunChild::NoteReference(reference) => self.render_note_reference(reference),
            RunChild::CommentReference(_) => {}
        }
    }

    /// Repeated references to one note share its number; only the first
    /// carries the id the back-link points to.
    fn render_note_reference(&mut self, reference: &'a NoteReference) {
        let key = (reference.note_type, reference.note_id.as_str());
        let (number, first) = match self.note_references.iter().position(|r| *r == key) {
            Some(index) => (index + 1, false),
            None => {
                self.note_references.push(key);
                (self.note_references.len(), true)
            }
        };

        let href = format!("#{}", self.note_html_id(reference.note_type, &reference.note_id));
        let id = self.note_ref_html_id(reference.note_type, &reference.note_id);
        let mut attributes = vec![("href", href.as_str())];
        if first {
            attributes.push(("id", id.as_str()));
        }
        self.writer.start("sup", &[]);
        self.writer.start("a", &attributes);
        self.writer.text(&format!("[{}]", number));
        self.writer.end("a");
        self.writer.end("sup");
    }

    fn render_table(&mut self, table: &'a Table) {
        self.writer.start("table", &[]);
        for row in &table.rows {
            self.writer.start("tr", &[]);
            let cell_tag = if row.is_header { "th" } else { "td" };
            for cell in &row.cells {
                let colspan = cell.colspan.to_string();
                let rowspan = cell.rowspan.to_string();
                let mut attributes = Vec::new();
                if cell.colspan != 1 {
                    attributes.push(("colspan", colspan.as_str()));
                }
                if cell.rowspan != 1 {
                    attributes.push(("rowspan", rowspan.as_str()));
                }
                self.writer.start(cell_tag, &attributes);
                self.render_blocks(&cell.children);
                self.writer.end(cell_tag);
            }
            self.writer.end("tr");
        }
        self.writer.end("table");
    }

    /// Write the referenced notes as an ordered list.
    ///
    /// Notes referenced from inside a note body are appended to the list
    /// while it is being written.
    fn render_notes(&mut self) {
        self.in_notes = true;
        let document = self.document;
        let mut opened = false;
        let mut index = 0;
        while index < self.note_references.len() {
            let (note_type, note_id) = self.note_references[index];
            index += 1;
            let Some(note) = document.find_note(note_type, note_id) else {
                continue;
            };
            if !opened {
                self.writer.start("ol", &[]);
                opened = true;
            }

            let id = self.note_html_id(note.note_type, &note.note_id);
            let back_link = format!("#{}", self.note_ref_html_id(note.note_type, &note.note_id));
            self.writer.start("li", &[("id", id.as_str())]);

            match note.body.split_last() {
                Some((Block::Paragraph(last), rest)) => {
                    self.render_blocks(rest);
                    self.render_paragraph(last, Some(&back_link));
                }
                _ => {
                    self.render_blocks(&note.body);
                    self.writer.start("p", &[]);
                    self.render_back_link(&back_link);
                    self.writer.end("p");
                }
            }
            self.writer.end("li");
        }
        if opened {
            self.writer.end("ol");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Note, TableCell, TableRow};

    fn render(children: Vec<Block>) -> String {
        to_html(&Document::new(children), &RenderOptions::default())
    }

    fn paragraph(inlines: Vec<Inline>) -> Block {
        Block::Paragraph(Paragraph::new(inlines))
    }

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(
            render(vec![Block::Paragraph(Paragraph::with_text("Hello & <world>"))]),
            "<p>Hello &amp; &lt;world&gt;</p>"
        );
    }

    #[test]
    fn test_empty_paragraphs() {
        let blocks = vec![Block::Paragraph(Paragraph::default())];
        assert_eq!(render(blocks.clone()), "");
        let options = RenderOptions::new().with_ignore_empty_paragraphs(false);
        assert_eq!(to_html(&Document::new(blocks), &options), "<p></p>");
    }

    #[test]
    fn test_heading() {
        let mut heading = Paragraph::with_text("Title");
        heading.style_id = Some("Heading2".to_string());
        heading.style_name = Some("heading 2".to_string());
        assert_eq!(render(vec![Block::Paragraph(heading.clone())]), "<h2>Title</h2>");

        let options = RenderOptions::new().with_max_heading(1);
        assert_eq!(
            to_html(&Document::new(vec![Block::Paragraph(heading)]), &options),
            "<h1>Title</h1>"
        );
    }

    #[test]
    fn test_formatted_text() {
        let mut run = Run::with_text("x");
        run.is_bold = true;
        run.is_italic = true;
        run.is_strikethrough = true;
        run.vertical_alignment = VerticalAlignment::Subscript;
        assert_eq!(
            render(vec![paragraph(vec![Inline::Run(run)])]),
            "<p><strong><em><sub><s>x</s></sub></em></strong></p>"
        );
    }

    #[test]
    fn test_line_break_and_tab() {
        let run = Run::new(vec![
            RunChild::text("a"),
            RunChild::Break {
                break_type: BreakType::Line,
            },
            RunChild::Tab,
            RunChild::text("b"),
        ]);
        assert_eq!(render(vec![paragraph(vec![Inline::Run(run)])]), "<p>a<br />\tb</p>");
    }

    #[test]
    fn test_hyperlinks_and_bookmarks() {
        let html = render(vec![paragraph(vec![
            Inline::Bookmark(Bookmark::new("_Toc1")),
            Inline::Hyperlink(Hyperlink {
                children: vec![Inline::Run(Run::with_text("site"))],
                href: Some("https://example.com/?a=1&b=2".to_string()),
                target_frame: Some("_blank".to_string()),
                ..Default::default()
            }),
            Inline::Hyperlink(Hyperlink {
                children: vec![Inline::Run(Run::with_text("top"))],
                anchor: Some("_Toc1".to_string()),
                ..Default::default()
            }),
        ])]);
        assert_eq!(
            html,
            r##"<p><a id="_Toc1"></a><a href="https://example.com/?a=1&amp;b=2" target="_blank">site</a><a href="#_Toc1">top</a></p>"##
        );
    }

    #[test]
    fn test_page_markers() {
        let run = Run::new(vec![
            RunChild::text("One"),
            RunChild::Bookmark(Bookmark::new(Bookmark::LAST_RENDERED_PAGE_BREAK)),
            RunChild::text("Two"),
        ]);
        let blocks = vec![paragraph(vec![Inline::Run(run)])];
        assert_eq!(
            render(blocks.clone()),
            r#"<p>One<span data-page="2"></span>Two</p>"#
        );

        let options = RenderOptions::new().with_page_markers(false);
        assert_eq!(to_html(&Document::new(blocks), &options), "<p>OneTwo</p>");
    }

    #[test]
    fn test_marker_shaped_text_stays_escaped() {
        let html = render(vec![Block::Paragraph(Paragraph::with_text(
            r#"<span data-page="7"></span>"#,
        ))]);
        assert_eq!(
            html,
            "<p>&lt;span data-page=&quot;7&quot;&gt;&lt;/span&gt;</p>"
        );
    }

    #[test]
    fn test_note_references_and_note_list() {
        let mut doc = Document::new(vec![paragraph(vec![Inline::Run(Run::new(vec![
            RunChild::text("Text"),
            RunChild::NoteReference(NoteReference::new(NoteType::Footnote, "4")),
        ]))])]);
        doc.notes.insert(Note::new(
            NoteType::Footnote,
            "4",
            vec![Block::Paragraph(Paragraph::with_text("Note"))],
        ));

        let html = to_html(&doc, &RenderOptions::default());
        assert_eq!(
            html,
            concat!(
                r##"<p>Text<sup><a href="#footnote-4" id="footnote-ref-4">[1]</a></sup></p>"##,
                r##"<ol><li id="footnote-4"><p>Note <a href="#footnote-ref-4">↑</a></p></li></ol>"##,
            )
        );

        let prefixed = to_html(&doc, &RenderOptions::new().with_id_prefix("doc-"));
        assert!(prefixed.contains(r##"href="#doc-footnote-4" id="doc-footnote-ref-4""##));
    }

    fn note_reference(note_id: &str) -> RunChild {
        RunChild::NoteReference(NoteReference::new(NoteType::Footnote, note_id))
    }

    #[test]
    fn test_repeated_reference_shares_one_note_entry() {
        let mut doc = Document::new(vec![paragraph(vec![Inline::Run(Run::new(vec![
            RunChild::text("A"),
            note_reference("1"),
            RunChild::text("B"),
            note_reference("1"),
        ]))])]);
        doc.notes.insert(Note::new(
            NoteType::Footnote,
            "1",
            vec![Block::Paragraph(Paragraph::with_text("N1"))],
        ));

        assert_eq!(
            to_html(&doc, &RenderOptions::default()),
            concat!(
                r##"<p>A<sup><a href="#footnote-1" id="footnote-ref-1">[1]</a></sup>"##,
                r##"B<sup><a href="#footnote-1">[1]</a></sup></p>"##,
                r##"<ol><li id="footnote-1"><p>N1 <a href="#footnote-ref-1">↑</a></p></li></ol>"##,
            )
        );
    }

    #[test]
    fn test_note_referenced_from_a_note_is_listed() {
        let mut doc = Document::new(vec![paragraph(vec![Inline::Run(Run::new(vec![
            RunChild::text("Body"),
            note_reference("1"),
        ]))])]);
        doc.notes.insert(Note::new(
            NoteType::Footnote,
            "1",
            vec![paragraph(vec![Inline::Run(Run::new(vec![
                RunChild::text("N1"),
                note_reference("2"),
            ]))])],
        ));
        doc.notes.insert(Note::new(
            NoteType::Footnote,
            "2",
            vec![Block::Paragraph(Paragraph::with_text("N2"))],
        ));

        assert_eq!(
            to_html(&doc, &RenderOptions::default()),
            concat!(
                r##"<p>Body<sup><a href="#footnote-1" id="footnote-ref-1">[1]</a></sup></p><ol>"##,
                r##"<li id="footnote-1"><p>N1<sup><a href="#footnote-2" id="footnote-ref-2">[2]</a></sup>"##,
                r##" <a href="#footnote-ref-1">↑</a></p></li>"##,
                r##"<li id="footnote-2"><p>N2 <a href="#footnote-ref-2">↑</a></p></li></ol>"##,
            )
        );
    }

    #[test]
    fn test_page_breaks_in_notes_are_not_counted() {
        let page_break = || RunChild::Bookmark(Bookmark::new(Bookmark::LAST_RENDERED_PAGE_BREAK));
        let mut doc = Document::new(vec![
            paragraph(vec![Inline::Run(Run::new(vec![
                RunChild::text("One"),
                note_reference("1"),
            ]))]),
            paragraph(vec![Inline::Run(Run::new(vec![page_break(), RunChild::text("Two")]))]),
        ]);
        doc.notes.insert(Note::new(
            NoteType::Footnote,
            "1",
            vec![paragraph(vec![Inline::Run(Run::new(vec![
                page_break(),
                RunChild::text("N1"),
            ]))])],
        ));

        let html = to_html(&doc, &RenderOptions::default());
        assert_eq!(html.matches("data-page").count(), 1);
        assert!(html.contains(r#"<p><span data-page="2"></span>Two</p>"#));
        assert!(html.contains(r##"<li id="footnote-1"><p>N1 <a"##));
    }

    #[test]
    fn test_table() {
        let mut header = TableRow::new(vec![TableCell::new(vec![Block::Paragraph(
            Paragraph::with_text("H"),
        )])]);
        header.is_header = true;
        let mut wide = TableCell::new(vec![Block::Paragraph(Paragraph::with_text("A"))]);
        wide.colspan = 2;
        wide.rowspan = 3;
        let table = Table::new(vec![header, TableRow::new(vec![wide])]);

        assert_eq!(
            render(vec![Block::Table(table)]),
            r#"<table><tr><th><p>H</p></th></tr><tr><td colspan="2" rowspan="3"><p>A</p></td></tr></table>"#
        );
    }
}
