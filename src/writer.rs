//! Incremental HTML output.
//!
//! [`HtmlWriter`] collects escaped markup fragments as a rendering pass emits
//! them. Content that must stay live markup, such as page markers, is passed
//! as an explicit [`Fragment::Raw`] instead of being recovered from escaped
//! text.

/// A piece of inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Plain text, escaped on output
    Text(String),
    /// Trusted markup, written verbatim
    Raw(String),
}

impl Fragment {
    pub fn text(value: impl Into<String>) -> Self {
        Fragment::Text(value.into())
    }

    pub fn raw(value: impl Into<String>) -> Self {
        Fragment::Raw(value.into())
    }
}

/// Marker written where a rendered page starts.
pub fn page_marker(page: usize) -> Fragment {
    Fragment::Raw(format!("<span data-page=\"{}\"></span>", page))
}

/// Escape `&`, `<`, `>` and `"`.
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// HTML writer accumulating fragments in emission order.
#[derive(Debug, Clone, Default)]
pub struct HtmlWriter {
    fragments: Vec<String>,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write escaped text.
    pub fn text(&mut self, text: &str) {
        if !text.is_empty() {
            self.fragments.push(escape(text));
        }
    }

    /// Write an opening tag. Attributes are written sorted by name.
    pub fn start(&mut self, name: &str, attributes: &[(&str, &str)]) {
        self.fragments
            .push(format!("<{}{}>", name, attribute_string(attributes)));
    }

    pub fn end(&mut self, name: &str) {
        self.fragments.push(format!("</{}>", name));
    }

    /// Write a void element such as `<br />`.
    pub fn self_closing(&mut self, name: &str, attributes: &[(&str, &str)]) {
        self.fragments
            .push(format!("<{}{} />", name, attribute_string(attributes)));
    }

    /// Write markup verbatim. The caller is responsible for its safety.
    pub fn append(&mut self, html: &str) {
        self.fragments.push(html.to_string());
    }

    /// Write a fragment: text is escaped, raw markup is not.
    pub fn write(&mut self, fragment: &Fragment) {
        match fragment {
            Fragment::Text(text) => self.text(text),
            Fragment::Raw(html) => self.append(html),
        }
    }

    /// Concatenate everything written so far. The writer is left unchanged.
    pub fn finish(&self) -> String {
        self.fragments.concat()
    }
}

fn attribute_string(attributes: &[(&str, &str)]) -> String {
    let mut sorted = attributes.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    sorted
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", name, escape(value)))
        .collect()
}
