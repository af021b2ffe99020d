//! # docxtree
//!
//! Word-processing package (.docx) reading into an abstract document tree,
//! with a default HTML rendering of that tree.
//!
//! A package is a ZIP archive of XML parts linked by relationship files.
//! Reading locates the functional parts through those relationships, parses
//! each one into a namespace-resolved XML tree, and builds a [`Document`] of
//! paragraphs, runs, text, bookmarks, tables and note references, together
//! with the notes and comments they refer to.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docxtree::{read_file, ReadOptions};
//!
//! let result = read_file("document.docx", &ReadOptions::default())?;
//! for warning in &result.messages {
//!     eprintln!("warning: {}", warning);
//! }
//! println!("{}", result.value.plain_text());
//!
//! // Convert to HTML
//! let html = docxtree::convert_to_html("document.docx")?;
//! std::fs::write("output.html", html.value)?;
//! # Ok::<(), docxtree::Error>(())
//! ```
//!
//! ## Lower-level APIs
//!
//! ```no_run
//! use docxtree::docx::find_part_paths;
//! use docxtree::package::Package;
//!
//! let package = Package::open("report.docx")?;
//! let paths = find_part_paths(&package);
//! println!("main document: {}", paths.main_document);
//! # Ok::<(), docxtree::Error>(())
//! ```

pub mod docx;
pub mod error;
pub mod model;
pub mod options;
pub mod package;
pub mod render;
pub mod results;
pub mod writer;
pub mod xml;

// Re-exports
pub use error::{Error, Result};
pub use model::{
    Block, Bookmark, BreakType, Comment, CommentReference, Document, Hyperlink, Inline, Note,
    NoteReference, NoteType, Notes, NumberingLevel, Paragraph, Run, RunChild, Table, TableCell,
    TableRow, Text, VerticalAlignment,
};
pub use options::ReadOptions;
pub use package::Package;
pub use results::{ReadResult, Warning};
pub use writer::{Fragment, HtmlWriter};
pub use xml::{parse_xml, NamespaceMap, XmlElement, XmlNode};

use std::path::Path;

/// Read a .docx file into a document.
///
/// # Example
///
/// ```no_run
/// use docxtree::{read_file, ReadOptions};
///
/// let result = read_file("document.docx", &ReadOptions::default())?;
/// println!("Blocks: {}", result.value.children.len());
/// # Ok::<(), docxtree::Error>(())
/// ```
pub fn read_file(path: impl AsRef<Path>, options: &ReadOptions) -> Result<ReadResult<Document>> {
    let package = Package::open(path)?;
    docx::read(&package, options)
}

/// Read a .docx package held in memory.
///
/// # Example
///
/// ```no_run
/// use docxtree::{read_bytes, ReadOptions};
///
/// let data = std::fs::read("document.docx")?;
/// let result = read_bytes(data, &ReadOptions::default())?;
/// # Ok::<(), docxtree::Error>(())
/// ```
pub fn read_bytes(data: Vec<u8>, options: &ReadOptions) -> Result<ReadResult<Document>> {
    let package = Package::from_bytes(data)?;
    docx::read(&package, options)
}

/// Extract plain text from a document.
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let result = read_file(path, &ReadOptions::default())?;
    Ok(result.value.plain_text())
}

/// Convert a document to HTML with default options.
pub fn convert_to_html(path: impl AsRef<Path>) -> Result<ReadResult<String>> {
    convert_to_html_with_options(path, &ReadOptions::default(), &render::RenderOptions::default())
}

/// Convert a document to HTML with options.
///
/// # Example
///
/// ```no_run
/// use docxtree::{convert_to_html_with_options, render::RenderOptions, ReadOptions};
///
/// let options = RenderOptions::default().with_id_prefix("doc-");
/// let html = convert_to_html_with_options("document.docx", &ReadOptions::default(), &options)?;
/// # Ok::<(), docxtree::Error>(())
/// ```
pub fn convert_to_html_with_options(
    path: impl AsRef<Path>,
    read_options: &ReadOptions,
    render_options: &render::RenderOptions,
) -> Result<ReadResult<String>> {
    let result = read_file(path, read_options)?;
    Ok(result.map(|doc| render::to_html(&doc, render_options)))
}
