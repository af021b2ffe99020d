//! Abstract document model.
//!
//! This module defines the format-agnostic tree produced by the package
//! reader. Readers convert part XML into these structures, and renderers
//! convert them to output formats like HTML.

mod document;
mod paragraph;
mod table;

pub use document::*;
pub use paragraph::*;
pub use table::*;
