//! Paragraph style to heading level mapping.
//!
//! Maps paragraph style names and style IDs to heading levels for the
//! default HTML rendering. Names match case-insensitively, IDs exactly.

use std::collections::HashMap;

/// Mapping from style names/IDs to heading levels (1-6).
#[derive(Debug, Clone, Default)]
pub struct StyleMapping {
    /// Mapping from lowercased style name to heading level
    name_to_heading: HashMap<String, u8>,
    /// Mapping from style ID to heading level
    id_to_heading: HashMap<String, u8>,
}

impl StyleMapping {
    /// Create a new empty style mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a style mapping for the built-in heading styles.
    pub fn with_defaults() -> Self {
        let mut mapping = Self::new();

        for level in 1..=6u8 {
            mapping.add_name_mapping(format!("Heading {}", level), level);
            mapping.add_id_mapping(format!("Heading{}", level), level);
        }
        mapping.add_name_mapping("Title", 1);
        mapping.add_id_mapping("Title", 1);

        mapping
    }

    /// Add a name-based mapping (case-insensitive).
    pub fn add_name_mapping(&mut self, name: impl Into<String>, level: u8) {
        self.name_to_heading
            .insert(name.into().to_lowercase(), level.clamp(1, 6));
    }

    /// Add an ID-based mapping (exact match).
    pub fn add_id_mapping(&mut self, id: impl Into<String>, level: u8) {
        self.id_to_heading.insert(id.into(), level.clamp(1, 6));
    }

    pub fn get_by_name(&self, name: &str) -> Option<u8> {
        self.name_to_heading.get(&name.to_lowercase()).copied()
    }

    pub fn get_by_id(&self, id: &str) -> Option<u8> {
        self.id_to_heading.get(id).copied()
    }

    /// Get heading level by style name, falling back to the style ID.
    pub fn get(&self, style_id: Option<&str>, style_name: Option<&str>) -> Option<u8> {
        style_name
            .and_then(|name| self.get_by_name(name))
            .or_else(|| style_id.and_then(|id| self.get_by_id(id)))
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_heading.is_empty() && self.id_to_heading.is_empty()
    }
}
