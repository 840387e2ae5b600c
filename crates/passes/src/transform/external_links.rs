//! Adds `rel="noopener noreferrer"` and `target="_blank"` to absolute links.
//!
//! Only a literal `http://` / `https://` prefix counts as absolute.
//! Protocol-relative (`//host`) and relative links are left untouched.

use xhast_core::{Node, Transform, TransformContext, TransformError, visit};

const ABSOLUTE_SCHEMES: &[&str] = &["http://", "https://"];

/// Hardens links that leave the site.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalLinkSafeguard;

impl ExternalLinkSafeguard {
    /// Creates the pass.
    pub fn new() -> Self {
        Self
    }
}

/// Returns true if `href` starts with an absolute http(s) scheme.
pub fn is_external(href: &str) -> bool {
    ABSOLUTE_SCHEMES.iter().any(|scheme| href.starts_with(scheme))
}

impl Transform for ExternalLinkSafeguard {
    fn name(&self) -> &str {
        "external-links"
    }

    fn transform(&self, tree: &mut Node, _ctx: &mut TransformContext) -> Result<(), TransformError> {
        visit(
            tree,
            |node| node.is_element("a"),
            |node| {
                if let Some(link) = node.as_element_mut()
                    && link.property("href").is_some_and(is_external)
                {
                    link.add_token("rel", "noopener");
                    link.add_token("rel", "noreferrer");
                    link.set_property("target", "_blank");
                }
                Ok(())
            },
        )
    }
}
