//! Minimal element tree used to build every XML document before it is written.
//!
//! Documents are assembled in memory and serialized in one pass, so escaping
//! and nesting are handled in a single place.

use std::fmt::Display;

use lilith_core::ToolVersions;

use crate::config::OutputConfig;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    /// Nested element.
    Element(Element),
    /// Character data, escaped on output.
    Text(String),
}

/// XML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element holding only `text`.
    pub fn leaf(name: impl Into<String>, text: impl Display) -> Self {
        Self::new(name).text(text)
    }

    /// Appends an attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.attrs.push((key.into(), value.to_string()));
        self
    }

    /// Appends an attribute when `value` is present.
    pub fn attr_opt(self, key: impl Into<String>, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }

    /// Appends character data.
    pub fn text(mut self, text: impl Display) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    /// Appends a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Appends a child element in place.
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    fn has_element_children(&self) -> bool {
        self.children
            .iter()
            .any(|node| matches!(node, Node::Element(_)))
    }

    fn write_into(&self, out: &mut String, depth: usize, indent: usize) {
        let pad = " ".repeat(depth * indent);
        out.push_str(&pad);
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }
        out.push('>');
        if self.has_element_children() {
            out.push('\n');
            for node in &self.children {
                match node {
                    Node::Element(child) => child.write_into(out, depth + 1, indent),
                    Node::Text(text) => {
                        out.push_str(&" ".repeat((depth + 1) * indent));
                        out.push_str(&escape_text(text));
                        out.push('\n');
                    }
                }
            }
            out.push_str(&pad);
        } else {
            for node in &self.children {
                if let Node::Text(text) = node {
                    out.push_str(&escape_text(text));
                }
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push_str(">\n");
    }
}

/// A root element with an optional leading comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    declaration: bool,
    comment: Option<String>,
    root: Element,
}

impl Document {
    /// Wraps `root` into a document.
    pub fn new(root: Element) -> Self {
        Self {
            declaration: true,
            comment: None,
            root,
        }
    }

    /// Never prints the `<?xml ..?>` declaration, whatever the config says.
    pub fn without_declaration(mut self) -> Self {
        self.declaration = false;
        self
    }

    /// Adds a comment printed between the declaration and the root element.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Serializes the whole document.
    pub fn render(&self, config: &OutputConfig) -> String {
        let mut out = String::new();
        if self.declaration && config.xml_declaration {
            out.push_str("<?xml version=\"1.0\"?>\n\n");
        }
        if let Some(comment) = &self.comment {
            out.push_str("<!--\n");
            out.push_str(&sanitize_comment(comment));
            out.push_str("\n-->\n\n");
        }
        self.root.write_into(&mut out, 0, config.indent);
        out
    }
}

/// Skeleton shared by the coupling and signal-strength input files.
pub fn input_document(versions: &ToolVersions, blocks: Vec<Element>) -> Document {
    let mut root = Element::new("lilithinput");
    for block in blocks {
        root.push(block);
    }
    Document::new(root).with_comment(format!(
        "input file for Lilith generated by Lilith {}",
        versions.lilith
    ))
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

// "--" is not allowed inside a comment and the body must not end with "-".
fn sanitize_comment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == '-' && out.ends_with('-') {
            out.push(' ');
        }
        out.push(ch);
    }
    if out.ends_with('-') {
        out.push(' ');
    }
    out
}
