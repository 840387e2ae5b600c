//! GitHub-style alert blockquotes turned into callouts.
//!
//! ```text
//! > [!NOTE]
//! >
//! > Body
//! ```
//!
//! parses to `blockquote["\n", p["[!NOTE]"], "\n", p["Body"], "\n"]` and
//! becomes
//!
//! ```text
//! <aside class="admonition" data-admonition-type="note">
//!   <div class="admonition-title">💬  Note</div>
//!   <p>Body</p>
//! </aside>
//! ```
//!
//! The match is a best-effort heuristic over the parser's child layout, not
//! a grammar: anything that does not fit is left exactly as it was. A
//! marker block that starts with `[!` but names no configured kind (or
//! carries trailing text) is recorded as a malformed-node warning.

use crate::config::AdmonitionOptions;
use xhast_core::visit::is_element;
use xhast_core::{Element, Node, Transform, TransformContext, TransformError, visit};

/// Class of the callout container.
pub const ADMONITION_CLASS: &str = "admonition";
/// Class of the caption element.
pub const ADMONITION_TITLE_CLASS: &str = "admonition-title";

/// Scanner state while walking a blockquote's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan<'a> {
    /// Expecting the leading whitespace node.
    Leading,
    /// Expecting the block that carries the marker.
    Marker,
    /// Marker found for this configured kind.
    Matched(&'a str),
    /// Shape did not fit; leave the blockquote alone.
    Rejected,
}

/// Converts marked blockquotes into callouts.
pub struct AdmonitionTransformer {
    options: AdmonitionOptions,
}

impl AdmonitionTransformer {
    /// Creates the pass.
    pub fn new(options: AdmonitionOptions) -> Self {
        Self { options }
    }

    /// Returns the configured kind a blockquote is marked with.
    fn detect<'a>(&'a self, quote: &Element) -> Option<&'a str> {
        let mut state = Scan::Leading;
        for child in &quote.children {
            state = match state {
                Scan::Leading => Scan::Marker,
                Scan::Marker => self.marker_kind(child).map_or(Scan::Rejected, Scan::Matched),
                done => done,
            };
            if matches!(state, Scan::Matched(_) | Scan::Rejected) {
                break;
            }
        }
        match state {
            Scan::Matched(kind) => Some(kind),
            _ => None,
        }
    }

    fn marker_kind(&self, block: &Node) -> Option<&str> {
        let Node::Element(block) = block else {
            return None;
        };
        let Some(Node::Text(text)) = block.children.first() else {
            return None;
        };
        let kind = text.value.strip_prefix("[!")?.strip_suffix(']')?;
        self.options
            .kinds
            .get_key_value(kind)
            .map(|(kind, _)| kind.as_str())
    }

    fn convert(&self, quote: &mut Element, kind: &str) {
        let icon = self.options.kinds.get(kind).map(String::as_str).unwrap_or_default();
        let caption = Element::new("div")
            .with_property("class", vec![ADMONITION_TITLE_CLASS.to_string()])
            .with_child(Node::text(format!("{}  {}", icon, capitalize(kind))));

        quote.tag_name = "aside".to_string();
        quote.add_class(ADMONITION_CLASS);
        quote.set_property("data-admonition-type", kind.to_lowercase());
        quote.children[1] = caption.into();
    }
}

/// Text of a marker block that starts like `[!KIND]` but was not accepted.
fn stray_marker(quote: &Element) -> Option<String> {
    let Some(Node::Element(block)) = quote.children.get(1) else {
        return None;
    };
    match block.children.first() {
        Some(Node::Text(text)) if text.value.starts_with("[!") => Some(text.value.clone()),
        _ => None,
    }
}

fn capitalize(kind: &str) -> String {
    let lower = kind.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Transform for AdmonitionTransformer {
    fn name(&self) -> &str {
        "admonitions"
    }

    fn transform(&self, tree: &mut Node, ctx: &mut TransformContext) -> Result<(), TransformError> {
        visit(tree, is_element("blockquote"), |node| {
            let Some(quote) = node.as_element_mut() else {
                return Ok(());
            };
            if let Some(kind) = self.detect(quote) {
                self.convert(quote, kind);
            } else if let Some(marker) = stray_marker(quote) {
                ctx.diagnostics.downgrade(TransformError::malformed(
                    self.name(),
                    format!("unrecognized admonition marker '{}'", marker),
                ))?;
            } else {
                log::debug!("blockquote is not an admonition");
            }
            Ok(())
        })
    }
}
