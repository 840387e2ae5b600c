//! Wraps each `<table>` in a styled container (`<div class="table-wrapper">`).
//!
//! A table whose immediate parent already has the wrapper tag is skipped,
//! whatever its classes. The traversal revisits a freshly wrapped table
//! one level down, so this guard is also what stops the pass from wrapping
//! the same table forever.

use crate::config::TableOptions;
use xhast_core::visit::is_element;
use xhast_core::{
    Ancestors, Element, Node, Transform, TransformContext, TransformError, visit_with_ancestors,
};

/// Puts tables in a scroll container.
pub struct TableWrapper {
    options: TableOptions,
}

impl TableWrapper {
    /// Creates the pass.
    pub fn new(options: TableOptions) -> Self {
        Self { options }
    }

    fn already_wrapped(&self, ancestors: &Ancestors) -> bool {
        ancestors.parent_is(&self.options.wrapper_tag)
    }

    fn wrap(&self, node: &mut Node) -> Result<(), TransformError> {
        let table = std::mem::replace(node, Node::text(""));
        let wrapper = Element::new(self.options.wrapper_tag.as_str())
            .with_property("class", vec![self.options.wrapper_class.clone()])
            .with_child(table);
        if !matches!(wrapper.children.as_slice(), [child] if child.is_element("table")) {
            return Err(TransformError::structural(
                self.name(),
                "wrapper must hold exactly the relocated table",
            ));
        }
        *node = wrapper.into();
        Ok(())
    }
}

impl Transform for TableWrapper {
    fn name(&self) -> &str {
        "tables"
    }

    fn transform(&self, tree: &mut Node, _ctx: &mut TransformContext) -> Result<(), TransformError> {
        visit_with_ancestors(tree, is_element("table"), |node, ancestors| {
            if self.already_wrapped(ancestors) {
                return Ok(());
            }
            self.wrap(node)
        })
    }
}
