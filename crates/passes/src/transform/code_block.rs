//! Code block highlighting.
//!
//! Turns each [`Node::CodeBlock`] into
//!
//! ```text
//! <pre class="language-<id> notranslate" translate="no"
//!      data-language="<display name>" data-title="<title>">
//!   <code>{highlighted markup}</code>
//! </pre>
//! ```
//!
//! `data-language` is only emitted when the language has a display name and
//! `data-title` only when the fence meta carries one. A language without a
//! grammar is emitted escaped but otherwise unhighlighted and recorded as a
//! warning; the run continues.

use super::NO_TRANSLATE_CLASS;
use crate::config::CodeBlockOptions;
use crate::registry::GrammarRegistry;
use std::sync::Arc;
use xhast_core::{CodeBlock, Element, Node, Transform, TransformContext, TransformError, visit};

/// Highlights fenced code blocks through a [`GrammarRegistry`].
pub struct CodeBlockHighlighter {
    options: CodeBlockOptions,
    registry: Arc<GrammarRegistry>,
}

impl CodeBlockHighlighter {
    /// Creates the pass.
    pub fn new(options: CodeBlockOptions, registry: Arc<GrammarRegistry>) -> Self {
        Self { options, registry }
    }

    fn render(
        &self,
        code: &CodeBlock,
        ctx: &mut TransformContext,
    ) -> Result<Element, TransformError> {
        let language = code
            .lang
            .as_deref()
            .filter(|lang| !lang.is_empty())
            .unwrap_or(self.options.default_language.as_str());

        let markup = match self.registry.highlight(&code.value, language) {
            Ok(markup) => markup,
            Err(err) => {
                log::warn!("{}, emitting plain text", err);
                ctx.diagnostics.downgrade(err)?;
                html_escape::encode_text(&code.value).into_owned()
            }
        };

        let mut pre = Element::new("pre")
            .with_property(
                "class",
                vec![format!("language-{}", language), NO_TRANSLATE_CLASS.to_string()],
            )
            .with_property("translate", "no");
        if let Some(name) = self.options.language_names.get(language) {
            pre.set_property("data-language", name.as_str());
        }
        if let Some(title) = code.meta.as_deref().and_then(parse_title) {
            pre.set_property("data-title", title);
        }
        Ok(pre.with_child(Element::new("code").with_child(Node::raw(markup)).into()))
    }
}

impl Transform for CodeBlockHighlighter {
    fn name(&self) -> &str {
        "code-blocks"
    }

    fn transform(&self, tree: &mut Node, ctx: &mut TransformContext) -> Result<(), TransformError> {
        visit(
            tree,
            |node| matches!(node, Node::CodeBlock(_)),
            |node| {
                if let Node::CodeBlock(code) = node {
                    let pre = self.render(code, ctx)?;
                    *node = Node::Element(pre);
                }
                Ok(())
            },
        )
    }
}

/// Extracts a title from fence meta such as `[main.rs]`.
///
/// The first `[` and the first `]` are removed wherever they appear; the
/// rest, surrounding whitespace included, is kept verbatim. Blank meta
/// yields no title.
pub fn parse_title(meta: &str) -> Option<String> {
    let title = meta.replacen('[', "", 1).replacen(']', "", 1);
    if title.trim().is_empty() {
        None
    } else {
        Some(title)
    }
}
