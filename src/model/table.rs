//! Table model structures.

use super::Block;
use serde::{Deserialize, Serialize};

/// A cell in a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content
    #[serde(default)]
    pub children: Vec<Block>,

    /// Horizontal span (colspan)
    #[serde(default = "default_span", skip_serializing_if = "is_default_span")]
    pub colspan: u32,

    /// Vertical span (rowspan)
    #[serde(default = "default_span", skip_serializing_if = "is_default_span")]
    pub rowspan: u32,
}

fn default_span() -> u32 {
    1
}

fn is_default_span(n: &u32) -> bool {
    *n == 1
}

impl Default for TableCell {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TableCell {
    pub fn new(children: Vec<Block>) -> Self {
        Self {
            children,
            colspan: 1,
            rowspan: 1,
        }
    }
}

/// A row in a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub cells: Vec<TableCell>,

    /// Whether this row repeats as a header
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_header: bool,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }
}

/// A table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<TableRow>,

    /// Table style ID reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,

    /// Table style display name, when the style is defined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
}

impl Table {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    /// Get the maximum number of grid columns across rows.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.cells.iter().map(|c| c.colspan as usize).sum())
            .max()
            .unwrap_or(0)
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
