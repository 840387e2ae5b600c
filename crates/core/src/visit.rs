//! Depth-first, pre-order traversal over the content tree.
//!
//! Callbacks receive the matched node mutably and may rewrite it in place or
//! replace it wholesale by assigning through the reference. Traversal then
//! descends into the children of whatever node now occupies that slot, so a
//! pass that wraps a node in a container will meet the original node again
//! one level deeper. Wrapping passes must therefore guard on their ancestors
//! (see [`visit_with_ancestors`]) or they will recurse without end.

use crate::tree::{Element, Node, PropertyValue};

/// A single frame of the ancestor chain.
///
/// Frames are snapshots taken on the way down; they carry only what
/// parent-aware passes look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    /// Tag name of the ancestor element.
    pub tag_name: String,
    /// Class tokens of the ancestor element.
    pub classes: Vec<String>,
}

impl Ancestor {
    fn of(element: &Element) -> Self {
        let classes = match element.properties.get("class") {
            Some(PropertyValue::List(tokens)) => tokens.clone(),
            Some(PropertyValue::String(value)) => {
                value.split_whitespace().map(str::to_string).collect()
            }
            _ => Vec::new(),
        };
        Self {
            tag_name: element.tag_name.clone(),
            classes,
        }
    }

    /// Returns true if the frame carries the given class token.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Ancestor chain of the node being visited, root first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ancestors {
    frames: Vec<Ancestor>,
}

impl Ancestors {
    /// Immediate parent element, if any.
    pub fn parent(&self) -> Option<&Ancestor> {
        self.frames.last()
    }

    /// Returns true if the immediate parent has the given tag name.
    pub fn parent_is(&self, tag_name: &str) -> bool {
        self.parent().is_some_and(|p| p.tag_name == tag_name)
    }

    /// Number of ancestors (depth of the visited node).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true for the root node.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterates root first.
    pub fn iter(&self) -> impl Iterator<Item = &Ancestor> {
        self.frames.iter()
    }
}

/// Visits every node matching `predicate`, depth-first and pre-order.
pub fn visit<P, F, E>(root: &mut Node, predicate: P, mut callback: F) -> Result<(), E>
where
    P: Fn(&Node) -> bool,
    F: FnMut(&mut Node) -> Result<(), E>,
{
    walk(root, &predicate, &mut callback)
}

fn walk<P, F, E>(node: &mut Node, predicate: &P, callback: &mut F) -> Result<(), E>
where
    P: Fn(&Node) -> bool,
    F: FnMut(&mut Node) -> Result<(), E>,
{
    if predicate(node) {
        callback(node)?;
    }
    if let Node::Element(element) = node {
        for child in element.children.iter_mut() {
            walk(child, predicate, callback)?;
        }
    }
    Ok(())
}

/// Like [`visit`], additionally handing the ancestor chain to `callback`.
pub fn visit_with_ancestors<P, F, E>(root: &mut Node, predicate: P, mut callback: F) -> Result<(), E>
where
    P: Fn(&Node) -> bool,
    F: FnMut(&mut Node, &Ancestors) -> Result<(), E>,
{
    let mut ancestors = Ancestors::default();
    walk_with_ancestors(root, &mut ancestors, &predicate, &mut callback)
}

fn walk_with_ancestors<P, F, E>(
    node: &mut Node,
    ancestors: &mut Ancestors,
    predicate: &P,
    callback: &mut F,
) -> Result<(), E>
where
    P: Fn(&Node) -> bool,
    F: FnMut(&mut Node, &Ancestors) -> Result<(), E>,
{
    if predicate(node) {
        callback(node, ancestors)?;
    }
    if let Node::Element(element) = node {
        ancestors.frames.push(Ancestor::of(element));
        for child in element.children.iter_mut() {
            walk_with_ancestors(child, ancestors, predicate, callback)?;
        }
        ancestors.frames.pop();
    }
    Ok(())
}

/// Predicate matching elements with the given tag name.
pub fn is_element(tag_name: &'static str) -> impl Fn(&Node) -> bool {
    move |node: &Node| node.is_element(tag_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn sample() -> Node {
        Element::new("root")
            .with_child(
                Element::new("p")
                    .with_child(Node::text("a"))
                    .with_child(Element::new("em").with_child(Node::text("b")).into())
                    .into(),
            )
            .with_child(Element::new("p").with_child(Node::text("c")).into())
            .into()
    }

    #[test]
    fn visits_pre_order() {
        let mut tree = sample();
        let mut seen = Vec::new();
        visit(
            &mut tree,
            |_| true,
            |node| {
                match node {
                    Node::Element(el) => seen.push(el.tag_name.clone()),
                    Node::Text(text) => seen.push(text.value.clone()),
                    _ => {}
                }
                Ok::<_, Infallible>(())
            },
        )
        .unwrap();
        assert_eq!(seen, ["root", "p", "a", "em", "b", "p", "c"]);
    }

    #[test]
    fn descends_into_replacement() {
        let mut tree = sample();
        let mut texts = Vec::new();
        visit(
            &mut tree,
            |node| matches!(node, Node::Text(_)) || node.is_element("em"),
            |node| {
                if node.is_element("em") {
                    *node = Element::new("strong")
                        .with_child(Node::text("replaced"))
                        .into();
                } else if let Node::Text(text) = node {
                    texts.push(text.value.clone());
                }
                Ok::<_, Infallible>(())
            },
        )
        .unwrap();
        assert_eq!(texts, ["a", "replaced", "c"]);
    }

    #[test]
    fn supplies_ancestors_root_first() {
        let mut tree = sample();
        let mut chains = Vec::new();
        visit_with_ancestors(&mut tree, is_element("em"), |_, ancestors| {
            chains.push(
                ancestors
                    .iter()
                    .map(|a| a.tag_name.clone())
                    .collect::<Vec<_>>(),
            );
            assert!(ancestors.parent_is("p"));
            Ok::<_, Infallible>(())
        })
        .unwrap();
        assert_eq!(chains, vec![vec!["root".to_string(), "p".to_string()]]);
    }

    #[test]
    fn callback_errors_stop_traversal() {
        let mut tree = sample();
        let mut calls = 0;
        let result = visit(&mut tree, is_element("p"), |_| {
            calls += 1;
            Err("boom")
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 1);
    }
}
