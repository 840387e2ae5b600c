//! Pass abstraction and the ordered pipeline that runs passes.
//!
//! Passes run in insertion order, each one finishing its traversal before
//! the next begins. A [`TransformContext`] is created for every run, so
//! nothing is shared between invocations.

use crate::error::{TransformDiagnostics, TransformError};
use crate::tree::Node;
use serde::Serialize;

/// Heading metadata recorded by the heading pass.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    /// Heading depth after clamping (1-6).
    pub depth: u8,
    /// Anchor identifier.
    pub slug: String,
    /// Visible heading text.
    pub text: String,
}

/// Mutable state for a single pipeline run.
#[derive(Debug, Default)]
pub struct TransformContext {
    /// Non-fatal diagnostics.
    pub diagnostics: TransformDiagnostics,
    /// Headings in document order.
    pub headings: Vec<HeadingEntry>,
}

impl TransformContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the context into a run report.
    pub fn into_report(self) -> TransformReport {
        TransformReport {
            diagnostics: self.diagnostics,
            headings: self.headings,
        }
    }
}

/// What a pipeline run produced besides the mutated tree.
#[derive(Debug, Default)]
pub struct TransformReport {
    /// Non-fatal diagnostics.
    pub diagnostics: TransformDiagnostics,
    /// Headings in document order.
    pub headings: Vec<HeadingEntry>,
}

/// A self-contained tree rewrite.
pub trait Transform: Send + Sync {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Rewrites `tree` in place.
    ///
    /// Unexpected node shapes are recorded in `ctx` and skipped; only a
    /// broken tree invariant is returned as an error.
    fn transform(&self, tree: &mut Node, ctx: &mut TransformContext)
    -> Result<(), TransformError>;
}

impl<F> Transform for F
where
    F: Fn(&mut Node) + Send + Sync,
{
    fn name(&self) -> &str {
        "anonymous"
    }

    fn transform(&self, tree: &mut Node, _ctx: &mut TransformContext) -> Result<(), TransformError> {
        (self)(tree);
        Ok(())
    }
}

/// Ordered collection of passes.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Appends a pass.
    pub fn push<T: Transform + 'static>(&mut self, pass: T) {
        self.passes.push(Box::new(pass));
    }

    /// Appends boxed passes.
    pub fn extend(&mut self, passes: impl IntoIterator<Item = Box<dyn Transform>>) {
        self.passes.extend(passes);
    }

    /// Number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Returns true if no passes were added.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Pass names in execution order.
    pub fn transform_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Runs every pass over `tree`, stopping at the first fatal error.
    ///
    /// A pass that gives up with a recoverable error is recorded as a
    /// warning and the remaining passes still run.
    pub fn run(&self, tree: &mut Node) -> Result<TransformReport, TransformError> {
        let mut ctx = TransformContext::new();
        for pass in &self.passes {
            log::debug!("running pass '{}'", pass.name());
            if let Err(err) = pass.transform(tree, &mut ctx) {
                if err.is_fatal() {
                    return Err(err);
                }
                log::warn!("pass '{}' gave up: {}", pass.name(), err);
                ctx.diagnostics.downgrade(err)?;
            }
        }
        Ok(ctx.into_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Element;

    struct Rename(&'static str, &'static str);

    impl Transform for Rename {
        fn name(&self) -> &str {
            "rename"
        }

        fn transform(
            &self,
            tree: &mut Node,
            _ctx: &mut TransformContext,
        ) -> Result<(), TransformError> {
            if let Some(el) = tree.as_element_mut()
                && el.tag_name == self.0
            {
                el.tag_name = self.1.to_string();
            }
            Ok(())
        }
    }

    struct Broken;

    impl Transform for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn transform(&self, _: &mut Node, _: &mut TransformContext) -> Result<(), TransformError> {
            Err(TransformError::structural("broken", "orphaned children"))
        }
    }

    struct Picky;

    impl Transform for Picky {
        fn name(&self) -> &str {
            "picky"
        }

        fn transform(&self, _: &mut Node, _: &mut TransformContext) -> Result<(), TransformError> {
            Err(TransformError::malformed("picky", "unexpected root"))
        }
    }

    #[test]
    fn recoverable_errors_become_warnings() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Picky);
        pipeline.push(Rename("div", "span"));
        let mut tree = Node::element("div");
        let report = pipeline.run(&mut tree).unwrap();
        assert!(tree.is_element("span"));
        assert_eq!(report.diagnostics.count(), 1);
        assert_eq!(
            report.diagnostics.warnings[0].to_string(),
            "picky: skipped node: unexpected root"
        );
    }

    #[test]
    fn runs_in_insertion_order() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Rename("a", "b"));
        pipeline.push(Rename("b", "c"));
        assert_eq!(pipeline.transform_names(), ["rename", "rename"]);

        let mut tree = Node::from(Element::new("a"));
        pipeline.run(&mut tree).unwrap();
        assert!(tree.is_element("c"));
    }

    #[test]
    fn closures_are_passes() {
        let mut pipeline = Pipeline::new();
        pipeline.push(|tree: &mut Node| {
            if let Some(el) = tree.as_element_mut() {
                el.children.push(Node::text("x"));
            }
        });
        let mut tree = Node::element("div");
        pipeline.run(&mut tree).unwrap();
        assert_eq!(tree.text_content(), "x");
    }

    #[test]
    fn stops_at_fatal_error() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Broken);
        pipeline.push(Rename("div", "span"));
        let mut tree = Node::element("div");
        assert!(pipeline.run(&mut tree).is_err());
        assert!(tree.is_element("div"));
    }
}
