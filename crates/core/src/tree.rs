//! Content tree data model.
//!
//! The tree is a plain owned hierarchy: every node is owned by its parent's
//! child list and nodes never point back at their parents. Ancestor-aware
//! passes get the parent chain from [`crate::visit::visit_with_ancestors`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered element property map (`class`, `href`, `data-*`, ...).
pub type Properties = BTreeMap<String, PropertyValue>;

/// Value stored on an element property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean attribute (`hidden`, `data-footnote-ref`).
    Bool(bool),
    /// Plain string attribute.
    String(String),
    /// Space-separated token set such as `class` or `rel`.
    List(Vec<String>),
}

impl PropertyValue {
    /// Returns the string value, if this is a plain string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the token list, if this is a token set.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            PropertyValue::List(tokens) => Some(tokens),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(tokens: Vec<String>) -> Self {
        PropertyValue::List(tokens)
    }
}

/// A node in the content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// Literal text.
    Text(Text),
    /// Markup element with properties and children.
    Element(Element),
    /// Fenced code block awaiting highlighting.
    CodeBlock(CodeBlock),
    /// Pre-rendered markup emitted verbatim by the renderer.
    Raw(Raw),
}

/// Literal text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    /// Text value.
    pub value: String,
}

/// Pre-rendered markup node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raw {
    /// Markup string.
    pub value: String,
}

/// Fenced code block as produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Raw source text.
    pub value: String,
    /// Info-string language identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Remainder of the info string (carries `[Title]`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
}

/// Markup element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Lowercase tag name.
    pub tag_name: String,
    /// Element properties.
    #[serde(default)]
    pub properties: Properties,
    /// Owned children in document order.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an element with no properties or children.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties: Properties::new(),
            children: Vec::new(),
        }
    }

    /// Builder: sets a property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Builder: appends a child.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: appends several children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns a string property.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(PropertyValue::as_str)
    }

    /// Sets a property, replacing any previous value.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Returns true if the `class` token set contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.has_token("class", class)
    }

    /// Adds a token to the `class` token set.
    pub fn add_class(&mut self, class: &str) {
        self.add_token("class", class);
    }

    /// Returns true if the token set property `name` contains `token`.
    ///
    /// A plain string value is treated as a whitespace-separated list.
    pub fn has_token(&self, name: &str, token: &str) -> bool {
        match self.properties.get(name) {
            Some(PropertyValue::List(tokens)) => tokens.iter().any(|t| t == token),
            Some(PropertyValue::String(value)) => value.split_whitespace().any(|t| t == token),
            _ => false,
        }
    }

    /// Adds `token` to the token set property `name`, keeping insertion order.
    ///
    /// Adding a token that is already present is a no-op.
    pub fn add_token(&mut self, name: &str, token: &str) {
        let mut tokens = match self.properties.remove(name) {
            Some(PropertyValue::List(tokens)) => tokens,
            Some(PropertyValue::String(value)) => {
                value.split_whitespace().map(str::to_string).collect()
            }
            _ => Vec::new(),
        };
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
        self.properties
            .insert(name.to_string(), PropertyValue::List(tokens));
    }

    /// Heading level for `h1`..`h6`.
    pub fn heading_level(&self) -> Option<u8> {
        heading_level(&self.tag_name)
    }

    /// Concatenated text of all descendants, ignoring markup.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

impl Node {
    /// Creates a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text {
            value: value.into(),
        })
    }

    /// Creates a raw markup node.
    pub fn raw(value: impl Into<String>) -> Self {
        Node::Raw(Raw {
            value: value.into(),
        })
    }

    /// Creates an empty element node.
    pub fn element(tag_name: impl Into<String>) -> Self {
        Node::Element(Element::new(tag_name))
    }

    /// Creates a code block node.
    pub fn code_block(value: impl Into<String>, lang: Option<&str>, meta: Option<&str>) -> Self {
        Node::CodeBlock(CodeBlock {
            value: value.into(),
            lang: lang.map(str::to_string),
            meta: meta.map(str::to_string),
        })
    }

    /// Returns the element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the element mutably, if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns true for an element with the given tag name.
    pub fn is_element(&self, tag_name: &str) -> bool {
        matches!(self, Node::Element(el) if el.tag_name == tag_name)
    }

    /// Children of an element; other kinds have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            _ => &[],
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&text.value),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            Node::CodeBlock(code) => out.push_str(&code.value),
            // Raw markup is not text.
            Node::Raw(_) => {}
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Returns the level of an `h1`..`h6` tag name.
pub fn heading_level(tag_name: &str) -> Option<u8> {
    match tag_name.as_bytes() {
        [b'h', level @ b'1'..=b'6'] => Some(level - b'0'),
        _ => None,
    }
}

/// Tag name for a heading level.
pub fn heading_tag(level: u8) -> String {
    format!("h{}", level)
}
