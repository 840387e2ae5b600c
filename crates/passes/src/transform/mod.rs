//! Tree rewrite passes.
//!
//! - `admonitions`: `> [!NOTE]` blockquotes to callouts.
//! - `code_block`: fenced code to highlighted `<pre>` blocks.
//! - `external_links`: `rel`/`target` on absolute links.
//! - `headings`: level clamping, ids, and self-link anchors.
//! - `images`: relative sources moved under the asset root.
//! - `inline_code`: translate guard and reference links for `<code>`.
//! - `tables`: container around each table.

/// Blockquote alerts to callouts.
pub mod admonitions;
/// Code block highlighting.
pub mod code_block;
/// External link hardening.
pub mod external_links;
/// Heading normalization.
pub mod headings;
/// Image source rewriting.
pub mod images;
/// Inline code guard and linking.
pub mod inline_code;
/// Table wrapping.
pub mod tables;

/// Class telling translation tools to leave an element alone.
pub const NO_TRANSLATE_CLASS: &str = "notranslate";

pub use admonitions::AdmonitionTransformer;
pub use code_block::CodeBlockHighlighter;
pub use external_links::ExternalLinkSafeguard;
pub use headings::HeadingNormalizer;
pub use images::ImagePathRewriter;
pub use inline_code::InlineCodeLinker;
pub use tables::TableWrapper;
