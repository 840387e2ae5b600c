//! Lookup tables consumed by the passes: grammars, language names, admonition icons.

/// Default display-name and icon tables.
pub mod defaults;
/// Caller-owned grammar registry.
pub mod grammar;

pub use defaults::{default_admonition_kinds, default_language_names};
pub use grammar::{Grammar, GrammarRegistry, GrammarSource, PLAIN_TEXT_LANGUAGES, PlainText};
