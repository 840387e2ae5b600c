#![deny(missing_docs)]
//! xhast passes: the enrichment passes run between parsing and rendering.
//!
//! Passes are independent [`xhast_core::Transform`]s; [`standard_pipeline`] assembles
//! all of them in an order where no pass produces nodes an earlier pass
//! should have seen.

/// Serde-backed pass configuration.
pub mod config;
/// Grammar registry and default lookup tables.
pub mod registry;
/// The passes.
pub mod transform;

pub use config::{
    AdmonitionOptions, CodeBlockOptions, HeadingOptions, ImageOptions, InlineCodeOptions,
    PipelineConfig, TableOptions,
};
pub use registry::{Grammar, GrammarRegistry, GrammarSource, PlainText};
pub use transform::{
    AdmonitionTransformer, CodeBlockHighlighter, ExternalLinkSafeguard, HeadingNormalizer,
    ImagePathRewriter, InlineCodeLinker, TableWrapper,
};

use std::sync::Arc;
use xhast_core::{Pipeline, TransformError};

/// Builds the standard pipeline from `config`.
///
/// Order: admonitions, code blocks, inline code, external links, headings,
/// images, tables. Code blocks run before inline code so that `pre > code`
/// already exists and is recognized as block code; inline code runs before
/// external links so generated reference links are never treated as
/// external.
pub fn standard_pipeline(
    config: &PipelineConfig,
    registry: Arc<GrammarRegistry>,
) -> Result<Pipeline, TransformError> {
    config.validate()?;
    let mut pipeline = Pipeline::new();
    pipeline.push(AdmonitionTransformer::new(config.admonitions.clone()));
    pipeline.push(CodeBlockHighlighter::new(config.code_blocks.clone(), registry));
    pipeline.push(InlineCodeLinker::new(config.inline_code.clone()));
    pipeline.push(ExternalLinkSafeguard::new());
    pipeline.push(HeadingNormalizer::new(config.headings.clone())?);
    pipeline.push(ImagePathRewriter::new(config.images.clone()));
    pipeline.push(TableWrapper::new(config.tables.clone()));
    log::debug!("standard pipeline: {:?}", pipeline.transform_names());
    Ok(pipeline)
}
