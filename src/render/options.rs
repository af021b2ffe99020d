//! Rendering options configuration.

use super::style_mapping::StyleMapping;

/// Options for rendering documents.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Prefix for generated element IDs (note anchors, bookmarks)
    pub id_prefix: String,

    /// Skip paragraphs with no content
    pub ignore_empty_paragraphs: bool,

    /// Emit `<span data-page="N"></span>` where a rendered page starts
    pub page_markers: bool,

    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Paragraph styles rendered as headings
    pub style_mapping: StyleMapping,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            id_prefix: String::new(),
            ignore_empty_paragraphs: true,
            page_markers: true,
            max_heading_level: 6,
            style_mapping: StyleMapping::with_defaults(),
        }
    }
}

impl RenderOptions {
    /// Create new render options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix for generated IDs.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn with_ignore_empty_paragraphs(mut self, ignore: bool) -> Self {
        self.ignore_empty_paragraphs = ignore;
        self
    }

    pub fn with_page_markers(mut self, enabled: bool) -> Self {
        self.page_markers = enabled;
        self
    }

    /// Set maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Replace the heading style mapping.
    pub fn with_style_mapping(mut self, mapping: StyleMapping) -> Self {
        self.style_mapping = mapping;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = RenderOptions::default();
        assert!(opts.id_prefix.is_empty());
        assert!(opts.ignore_empty_paragraphs);
        assert!(opts.page_markers);
        assert!(!opts.style_mapping.is_empty());
    }

    #[test]
    fn test_builder_pattern() {
        let opts = RenderOptions::new()
            .with_id_prefix("doc-")
            .with_ignore_empty_paragraphs(false)
            .with_page_markers(false);

        assert_eq!(opts.id_prefix, "doc-");
        assert!(!opts.ignore_empty_paragraphs);
        assert!(!opts.page_markers);
    }

    #[test]
    fn test_max_heading_clamp() {
        let opts = RenderOptions::new().with_max_heading(10);
        assert_eq!(opts.max_heading_level, 6);

        let opts = RenderOptions::new().with_max_heading(0);
        assert_eq!(opts.max_heading_level, 1);
    }
}
