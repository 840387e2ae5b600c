//! Per-pass configuration, loadable from JSON or YAML.
//!
//! Every field has a default, so an empty document (`{}`) yields the
//! standard configuration.

use crate::registry::{default_admonition_kinds, default_language_names};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use xhast_core::TransformError;

/// Configuration for the whole standard pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// Code block highlighter options.
    pub code_blocks: CodeBlockOptions,
    /// Inline code reference linker options.
    pub inline_code: InlineCodeOptions,
    /// Heading normalizer options.
    pub headings: HeadingOptions,
    /// Image path rewriter options.
    pub images: ImageOptions,
    /// Table wrapper options.
    pub tables: TableOptions,
    /// Admonition transformer options.
    pub admonitions: AdmonitionOptions,
}

impl PipelineConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(input: &str) -> Result<Self, TransformError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a YAML configuration.
    pub fn from_yaml(input: &str) -> Result<Self, TransformError> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no pass can honor.
    pub fn validate(&self) -> Result<(), TransformError> {
        self.headings.validate()?;
        if self.tables.wrapper_tag.trim().is_empty() {
            return Err(TransformError::InvalidConfig(
                "tables.wrapperTag must not be empty".to_string(),
            ));
        }
        if self.code_blocks.default_language.trim().is_empty() {
            return Err(TransformError::InvalidConfig(
                "codeBlocks.defaultLanguage must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Options for [`crate::CodeBlockHighlighter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeBlockOptions {
    /// Language id to display name (`rs` -> `Rust`).
    pub language_names: BTreeMap<String, String>,
    /// Language used when a fence has no info string.
    pub default_language: String,
}

impl Default for CodeBlockOptions {
    fn default() -> Self {
        Self {
            language_names: default_language_names(),
            default_language: "text".to_string(),
        }
    }
}

/// Options for [`crate::InlineCodeLinker`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineCodeOptions {
    /// Exact code span text to destination URL.
    pub references: BTreeMap<String, String>,
}

/// Options for [`crate::HeadingNormalizer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingOptions {
    /// Smallest level emitted (inclusive).
    pub min_level: u8,
    /// Largest level emitted (inclusive).
    pub max_level: u8,
    /// Move heading children into a self-link anchor. When off, the id is
    /// set on the heading itself.
    pub autolink: bool,
    /// Suffix repeated ids (`intro`, `intro-1`). When off, identical text
    /// yields identical ids.
    pub unique_ids: bool,
}

impl Default for HeadingOptions {
    fn default() -> Self {
        Self {
            min_level: 2,
            max_level: 6,
            autolink: true,
            unique_ids: true,
        }
    }
}

impl HeadingOptions {
    /// Checks `1 <= min_level <= max_level <= 6`.
    pub fn validate(&self) -> Result<(), TransformError> {
        if !(1..=6).contains(&self.min_level) || !(1..=6).contains(&self.max_level) {
            return Err(TransformError::InvalidConfig(format!(
                "heading levels must be within 1..=6 (got {}..={})",
                self.min_level, self.max_level
            )));
        }
        if self.min_level > self.max_level {
            return Err(TransformError::InvalidConfig(format!(
                "headings.minLevel ({}) exceeds headings.maxLevel ({})",
                self.min_level, self.max_level
            )));
        }
        Ok(())
    }
}

/// Options for [`crate::ImagePathRewriter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageOptions {
    /// Root path rewritten images are placed under.
    pub asset_root: String,
    /// Whether to add `loading="lazy"` to rewritten images.
    pub lazy_loading: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            asset_root: "/assets".to_string(),
            lazy_loading: false,
        }
    }
}

/// Options for [`crate::TableWrapper`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableOptions {
    /// Tag of the container element.
    pub wrapper_tag: String,
    /// Class put on the container element.
    pub wrapper_class: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            wrapper_tag: "div".to_string(),
            wrapper_class: "table-wrapper".to_string(),
        }
    }
}

/// Options for [`crate::AdmonitionTransformer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdmonitionOptions {
    /// Marker keyword (`NOTE`) to caption icon.
    pub kinds: BTreeMap<String, String>,
}

impl Default for AdmonitionOptions {
    fn default() -> Self {
        Self {
            kinds: default_admonition_kinds(),
        }
    }
}
