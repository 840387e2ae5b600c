//! Inline code translate guard and reference linking.
//!
//! Every inline `<code>` gets `class="notranslate"` and `translate="no"`.
//! When a reference map is configured, a code span whose only child is text
//! found verbatim in the map is wrapped in
//! `<a href="<url>" data-code-reference>`. Spans directly inside a link or a
//! heading are never wrapped, which also keeps a second run from wrapping
//! the span it wrapped the first time. Spans containing nested markup are
//! not linked.

use super::NO_TRANSLATE_CLASS;
use crate::config::InlineCodeOptions;
use xhast_core::tree::heading_level;
use xhast_core::{
    Ancestors, Element, Node, Transform, TransformContext, TransformError, visit_with_ancestors,
};

/// Attribute marking links generated by this pass.
pub const CODE_REFERENCE_ATTRIBUTE: &str = "data-code-reference";

/// Marks inline code untranslatable and links known references.
pub struct InlineCodeLinker {
    options: InlineCodeOptions,
}

impl InlineCodeLinker {
    /// Creates the pass.
    pub fn new(options: InlineCodeOptions) -> Self {
        Self { options }
    }

    fn link_target(&self, code: &Element, ancestors: &Ancestors) -> Option<String> {
        if self.options.references.is_empty() {
            return None;
        }
        let parent = ancestors.parent()?;
        if parent.tag_name == "a" || heading_level(&parent.tag_name).is_some() {
            log::debug!("not linking code span inside <{}>", parent.tag_name);
            return None;
        }
        let [Node::Text(text)] = code.children.as_slice() else {
            return None;
        };
        self.options.references.get(&text.value).cloned()
    }
}

impl Transform for InlineCodeLinker {
    fn name(&self) -> &str {
        "inline-code"
    }

    fn transform(&self, tree: &mut Node, _ctx: &mut TransformContext) -> Result<(), TransformError> {
        visit_with_ancestors(
            tree,
            |node| node.is_element("code"),
            |node, ancestors| {
                // `pre > code` belongs to a code block, not an inline span.
                if ancestors.parent_is("pre") {
                    return Ok(());
                }
                let Node::Element(code) = node else {
                    return Ok(());
                };
                code.add_class(NO_TRANSLATE_CLASS);
                code.set_property("translate", "no");

                if let Some(href) = self.link_target(code, ancestors) {
                    let span = std::mem::replace(node, Node::text(""));
                    *node = Element::new("a")
                        .with_property("href", href)
                        .with_property(CODE_REFERENCE_ATTRIBUTE, true)
                        .with_child(span)
                        .into();
                }
                Ok(())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn pass(refs: &[(&str, &str)]) -> InlineCodeLinker {
        let references: BTreeMap<String, String> = refs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        InlineCodeLinker::new(InlineCodeOptions { references })
    }

    fn code(text: &str) -> Node {
        Element::new("code").with_child(Node::text(text)).into()
    }

    fn para(children: Vec<Node>) -> Node {
        Element::new("root")
            .with_child(Element::new("p").with_children(children).into())
            .into()
    }

    fn run(pass: &InlineCodeLinker, tree: &mut Node) {
        pass.transform(tree, &mut TransformContext::new()).unwrap();
    }

    #[test]
    fn wraps_known_reference() {
        let mut tree = para(vec![code("foo")]);
        run(&pass(&[("foo", "/docs/foo")]), &mut tree);

        let link = tree.children()[0].children()[0].as_element().unwrap();
        assert_eq!(link.tag_name, "a");
        assert_eq!(link.property("href"), Some("/docs/foo"));
        assert!(link.properties.contains_key(CODE_REFERENCE_ATTRIBUTE));
        let span = link.children[0].as_element().unwrap();
        assert_eq!(link.children.len(), 1);
        assert!(span.has_class("notranslate"));
        assert_eq!(span.property("translate"), Some("no"));
        assert_eq!(span.text_content(), "foo");
    }

    #[test]
    fn heading_and_link_parents_are_skipped() {
        let mut tree: Node = Element::new("root")
            .with_child(Element::new("h2").with_child(code("foo")).into())
            .with_child(
                Element::new("a")
                    .with_property("href", "/elsewhere")
                    .with_child(code("foo"))
                    .into(),
            )
            .into();
        run(&pass(&[("foo", "/docs/foo")]), &mut tree);

        let in_heading = tree.children()[0].children()[0].as_element().unwrap();
        assert_eq!(in_heading.tag_name, "code");
        assert!(in_heading.has_class("notranslate"));
        let in_link = tree.children()[1].children()[0].as_element().unwrap();
        assert_eq!(in_link.tag_name, "code");
        assert!(in_link.has_class("notranslate"));
    }

    #[test]
    fn lookup_is_verbatim() {
        let mut tree = para(vec![code(" foo"), code("Foo")]);
        run(&pass(&[("foo", "/docs/foo")]), &mut tree);
        let p = &tree.children()[0];
        assert!(p.children().iter().all(|c| c.is_element("code")));
    }

    #[test]
    fn nested_markup_is_not_linked() {
        let nested: Node = Element::new("code")
            .with_child(Element::new("em").with_child(Node::text("foo")).into())
            .into();
        let mut tree = para(vec![nested]);
        run(&pass(&[("foo", "/docs/foo")]), &mut tree);
        assert!(tree.children()[0].children()[0].is_element("code"));
    }

    #[test]
    fn empty_map_still_guards() {
        let mut tree = para(vec![code("foo")]);
        run(&pass(&[]), &mut tree);
        let span = tree.children()[0].children()[0].as_element().unwrap();
        assert_eq!(span.tag_name, "code");
        assert_eq!(span.property("translate"), Some("no"));
    }

    #[test]
    fn code_block_bodies_are_left_alone() {
        let mut tree: Node = Element::new("root")
            .with_child(Element::new("pre").with_child(code("foo")).into())
            .into();
        run(&pass(&[("foo", "/docs/foo")]), &mut tree);
        let inner = tree.children()[0].children()[0].as_element().unwrap();
        assert!(inner.properties.is_empty());
    }

    #[test]
    fn rerun_does_not_double_wrap() {
        let mut tree = para(vec![code("foo")]);
        let pass = pass(&[("foo", "/docs/foo")]);
        run(&pass, &mut tree);
        let once = tree.clone();
        run(&pass, &mut tree);
        assert_eq!(tree, once);
    }
}
