//! Grammar registry consulted by the code block highlighter.
//!
//! The tokenizer itself is a collaborator: anything implementing [`Grammar`]
//! can be registered. The registry is an ordinary value owned by the caller
//! and shared with the highlighter through an `Arc`, so separate pipelines
//! (and tests) never see each other's grammars.

use std::collections::HashMap;
use std::sync::Arc;
use xhast_core::TransformError;

/// A tokenizer able to highlight one language.
pub trait Grammar: Send + Sync {
    /// Returns highlighted markup for `code`.
    ///
    /// `language` is the identifier the grammar was resolved under, which
    /// lets one grammar serve several aliases.
    fn highlight(&self, code: &str, language: &str) -> String;
}

impl<F> Grammar for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn highlight(&self, code: &str, language: &str) -> String {
        (self)(code, language)
    }
}

/// Supplies grammars by language id during [`GrammarRegistry::load_languages`].
pub trait GrammarSource {
    /// Returns the grammar for `language`, if the source knows it.
    fn grammar(&self, language: &str) -> Option<Arc<dyn Grammar>>;
}

impl GrammarSource for HashMap<String, Arc<dyn Grammar>> {
    fn grammar(&self, language: &str) -> Option<Arc<dyn Grammar>> {
        self.get(language).cloned()
    }
}

/// Grammar that escapes its input and adds no markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl Grammar for PlainText {
    fn highlight(&self, code: &str, _language: &str) -> String {
        html_escape::encode_text(code).into_owned()
    }
}

/// Language ids answered by [`PlainText`] in a fresh registry.
pub const PLAIN_TEXT_LANGUAGES: &[&str] = &["text", "plaintext", "txt"];

/// Language id to grammar mapping.
pub struct GrammarRegistry {
    grammars: HashMap<String, Arc<dyn Grammar>>,
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarRegistry {
    /// Creates a registry that only knows the plain text languages.
    pub fn new() -> Self {
        let mut registry = Self {
            grammars: HashMap::new(),
        };
        let plain: Arc<dyn Grammar> = Arc::new(PlainText);
        for id in PLAIN_TEXT_LANGUAGES {
            registry.grammars.insert((*id).to_string(), Arc::clone(&plain));
        }
        registry
    }

    /// Registers (or replaces) the grammar for `language`.
    pub fn register(&mut self, language: impl Into<String>, grammar: Arc<dyn Grammar>) {
        self.grammars.insert(language.into(), grammar);
    }

    /// Pulls each of `languages` from `source` into the registry.
    ///
    /// Every language the source knows is loaded; the first one it does not
    /// know is reported as [`TransformError::UnknownLanguage`].
    pub fn load_languages<S, I>(&mut self, source: &S, languages: I) -> Result<(), TransformError>
    where
        S: GrammarSource + ?Sized,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut missing = None;
        for language in languages {
            let language = language.as_ref();
            match source.grammar(language) {
                Some(grammar) => self.register(language, grammar),
                None => {
                    log::debug!("grammar source has no grammar for '{}'", language);
                    missing.get_or_insert_with(|| language.to_string());
                }
            }
        }
        match missing {
            Some(language) => Err(TransformError::UnknownLanguage { language }),
            None => Ok(()),
        }
    }

    /// Returns true if `language` has a grammar.
    pub fn contains(&self, language: &str) -> bool {
        self.grammars.contains_key(language)
    }

    /// Highlights `code` with the grammar registered for `language`.
    pub fn highlight(&self, code: &str, language: &str) -> Result<String, TransformError> {
        let grammar = self
            .grammars
            .get(language)
            .ok_or_else(|| TransformError::UnknownLanguage {
                language: language.to_string(),
            })?;
        Ok(grammar.highlight(code, language))
    }

    /// Registered language ids, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.grammars.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl std::fmt::Debug for GrammarRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrammarRegistry")
            .field("languages", &self.languages())
            .finish()
    }
}
