//! Reading options configuration.

use crate::xml::NamespaceMap;

/// Namespace prefixes used by the part readers.
///
/// The readers match element names such as `w:p` and `r:id`, so a custom
/// mapping should keep these prefixes and only add to them.
pub const DEFAULT_NAMESPACES: &[(&str, &str)] = &[
    ("w", "http://schemas.openxmlformats.org/wordprocessingml/2006/main"),
    ("wp", "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"),
    ("a", "http://schemas.openxmlformats.org/drawingml/2006/main"),
    ("pic", "http://schemas.openxmlformats.org/drawingml/2006/picture"),
    ("content-types", "http://schemas.openxmlformats.org/package/2006/content-types"),
    ("r", "http://schemas.openxmlformats.org/officeDocument/2006/relationships"),
    ("relationships", "http://schemas.openxmlformats.org/package/2006/relationships"),
    ("v", "urn:schemas-microsoft-com:vml"),
    ("mc", "http://schemas.openxmlformats.org/markup-compatibility/2006"),
    ("office-word", "urn:schemas-microsoft-com:office:word"),
    // Strict conformance packages use these URIs for the same vocabularies
    ("w", "http://purl.oclc.org/ooxml/wordprocessingml/main"),
    ("wp", "http://purl.oclc.org/ooxml/drawingml/wordprocessingDrawing"),
    ("a", "http://purl.oclc.org/ooxml/drawingml/main"),
    ("pic", "http://purl.oclc.org/ooxml/drawingml/picture"),
    ("r", "http://purl.oclc.org/ooxml/officeDocument/relationships"),
];

/// Name of the body container under the main document's root element.
pub const DEFAULT_BODY_ELEMENT: &str = "w:body";

/// The standard word-processing namespace mapping.
pub fn default_namespaces() -> NamespaceMap {
    DEFAULT_NAMESPACES.iter().copied().collect()
}

/// Options for reading a package into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// URI to prefix table applied when parsing every part
    pub namespace_mapping: NamespaceMap,

    /// Resolved name of the body element in the main document
    pub body_element_name: String,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            namespace_mapping: default_namespaces(),
            body_element_name: DEFAULT_BODY_ELEMENT.to_string(),
        }
    }
}

impl ReadOptions {
    /// Create new read options with the standard namespace mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the namespace mapping.
    pub fn with_namespace_mapping(mut self, mapping: NamespaceMap) -> Self {
        self.namespace_mapping = mapping;
        self
    }

    /// Set the body element name.
    pub fn with_body_element_name(mut self, name: impl Into<String>) -> Self {
        self.body_element_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ReadOptions::default();
        assert_eq!(opts.body_element_name, "w:body");
        assert_eq!(
            opts.namespace_mapping
                .prefix_for("http://schemas.openxmlformats.org/wordprocessingml/2006/main"),
            Some("w")
        );
        assert_eq!(
            opts.namespace_mapping
                .prefix_for("http://purl.oclc.org/ooxml/wordprocessingml/main"),
            Some("w")
        );
        assert_eq!(opts.namespace_mapping.len(), DEFAULT_NAMESPACES.len());
    }

    #[test]
    fn test_builder_pattern() {
        let opts = ReadOptions::new()
            .with_namespace_mapping(NamespaceMap::new().with("x", "word"))
            .with_body_element_name("x:body");

        assert_eq!(opts.body_element_name, "x:body");
        assert_eq!(opts.namespace_mapping.prefix_for("word"), Some("x"));
    }
}
