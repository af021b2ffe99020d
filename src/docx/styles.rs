//! Styles part parsing.

use std::collections::HashMap;

use crate::xml::XmlElement;

/// Style type (`w:type` attribute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleType {
    Paragraph,
    Character,
    Table,
    Numbering,
}

impl StyleType {
    fn from_attribute(value: Option<&str>) -> Option<Self> {
        match value {
            // An untyped style is a paragraph style
            None | Some("paragraph") => Some(StyleType::Paragraph),
            Some("character") => Some(StyleType::Character),
            Some("table") => Some(StyleType::Table),
            Some("numbering") => Some(StyleType::Numbering),
            Some(_) => None,
        }
    }

    /// Human-readable kind used in warnings.
    pub fn label(&self) -> &'static str {
        match self {
            StyleType::Paragraph => "Paragraph",
            StyleType::Character => "Run",
            StyleType::Table => "Table",
            StyleType::Numbering => "Numbering",
        }
    }
}

/// A style definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Style ID (e.g., "Heading1")
    pub style_id: String,
    /// Display name (e.g., "Heading 1")
    pub name: Option<String>,
}

/// Style definitions by type and ID.
#[derive(Debug, Clone, Default)]
pub struct Styles {
    styles: HashMap<(StyleType, String), Style>,
}

impl Styles {
    /// Read styles from the parsed `w:styles` element.
    ///
    /// When an ID is defined twice for one type, the first definition wins.
    pub fn read(element: &XmlElement) -> Self {
        let mut styles = Styles::default();
        for style_element in element.find_children("w:style") {
            let Some(style_type) = StyleType::from_attribute(style_element.attribute("w:type"))
            else {
                continue;
            };
            let Some(style_id) = style_element.attribute("w:styleId") else {
                continue;
            };
            let name = style_element
                .find_child("w:name")
                .and_then(|name| name.attribute("w:val"))
                .map(str::to_string);
            styles
                .styles
                .entry((style_type, style_id.to_string()))
                .or_insert_with(|| Style {
                    style_id: style_id.to_string(),
                    name,
                });
        }
        styles
    }

    /// Find a style by type and ID.
    pub fn find(&self, style_type: StyleType, style_id: &str) -> Option<&Style> {
        self.styles.get(&(style_type, style_id.to_string()))
    }

    pub fn find_paragraph_style_by_id(&self, style_id: &str) -> Option<&Style> {
        self.find(StyleType::Paragraph, style_id)
    }

    pub fn find_character_style_by_id(&self, style_id: &str) -> Option<&Style> {
        self.find(StyleType::Character, style_id)
    }

    pub fn find_table_style_by_id(&self, style_id: &str) -> Option<&Style> {
        self.find(StyleType::Table, style_id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
