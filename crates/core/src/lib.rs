#![deny(missing_docs)]
//! xhast core: content tree model, traversal engine, slugs, and the pass pipeline.

/// Core error and diagnostic types.
pub mod error;
/// markdown-rs adapter producing content trees.
pub mod parse;
/// Heading slug generation.
pub mod slug;
/// Pass trait, run context, and pipeline.
pub mod transform;
/// Content tree data model.
pub mod tree;
/// Depth-first traversal with optional ancestor context.
pub mod visit;

pub use error::{SourceLocation, TransformDiagnostics, TransformError, TransformWarning};
pub use parse::{ParseOptions, from_mdast, parse_markdown};
pub use slug::{SlugFn, Slugger, extract_custom_id, slug};
pub use transform::{HeadingEntry, Pipeline, Transform, TransformContext, TransformReport};
pub use tree::{CodeBlock, Element, Node, Properties, PropertyValue, Raw, Text};
pub use visit::{Ancestor, Ancestors, visit, visit_with_ancestors};
