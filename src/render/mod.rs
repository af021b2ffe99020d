//! Output rendering for documents.
//!
//! This module provides the default HTML rendering pass over the document
//! model, and JSON output of the model itself.
//!
//! # Example
//!
//! ```no_run
//! use docxtree::{read_file, ReadOptions, render::*};
//!
//! let result = read_file("document.docx", &ReadOptions::default())?;
//!
//! // Render to HTML
//! let html = to_html(&result.value, &RenderOptions::default());
//!
//! // Render to JSON
//! let json = to_json(&result.value, JsonFormat::Pretty)?;
//! # Ok::<(), docxtree::Error>(())
//! ```

mod html;
mod json;
mod options;
mod style_mapping;

pub use html::to_html;
pub use json::{to_json, to_json_default, JsonFormat};
pub use options::RenderOptions;
pub use style_mapping::StyleMapping;
