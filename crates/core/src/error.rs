use thiserror::Error;

/// Source location information for adapter errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors raised while transforming a content tree.
///
/// Only [`TransformError::StructuralViolation`] and configuration errors are
/// expected to reach callers of a pipeline; the remaining variants are
/// produced by passes and downgraded to [`TransformWarning`]s where the input
/// shape is merely unexpected.
#[derive(Debug, Error)]
pub enum TransformError {
    /// No grammar registered for a code block language.
    #[error("Unknown language: {language}")]
    UnknownLanguage {
        /// Language identifier that failed to resolve.
        language: String,
    },
    /// Node did not have the shape a pass expected.
    #[error("Malformed node in {pass}: {message}")]
    MalformedNode {
        /// Pass that encountered the node.
        pass: String,
        /// Description of the mismatch.
        message: String,
    },
    /// A pass broke the tree invariant (lost or duplicated children).
    #[error("Structural violation in {pass}: {message}")]
    StructuralViolation {
        /// Pass that broke the invariant.
        pass: String,
        /// Description of the violation.
        message: String,
    },
    /// Configuration values were rejected by validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// JSON configuration could not be decoded.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    /// YAML configuration could not be decoded.
    #[error("Config error: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),
    /// markdown-rs parser error surfaced through the adapter.
    #[error("Parse error at {location}: {message}")]
    MarkdownAdapter {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
}

impl TransformError {
    /// Create a structural violation for a pass.
    pub fn structural(pass: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StructuralViolation {
            pass: pass.into(),
            message: message.into(),
        }
    }

    /// Create a malformed-node error for a pass.
    pub fn malformed(pass: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedNode {
            pass: pass.into(),
            message: message.into(),
        }
    }

    /// Returns true if the pipeline must stop on this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            TransformError::UnknownLanguage { .. } | TransformError::MalformedNode { .. }
        )
    }
}

/// Non-fatal warnings recorded while a pass keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformWarning {
    /// Code block left unhighlighted because its language has no grammar.
    UnknownLanguage {
        /// Language identifier.
        language: String,
    },
    /// Node skipped because it did not have the expected shape.
    MalformedNode {
        /// Pass that skipped the node.
        pass: String,
        /// Why the node was skipped.
        message: String,
    },
}

impl std::fmt::Display for TransformWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformWarning::UnknownLanguage { language } => {
                write!(f, "unknown language '{}', emitted as plain text", language)
            }
            TransformWarning::MalformedNode { pass, message } => {
                write!(f, "{}: skipped node: {}", pass, message)
            }
        }
    }
}

impl TryFrom<TransformError> for TransformWarning {
    type Error = TransformError;

    /// Downgrades a recoverable error; fatal errors are handed back.
    fn try_from(error: TransformError) -> Result<Self, Self::Error> {
        match error {
            TransformError::UnknownLanguage { language } => {
                Ok(TransformWarning::UnknownLanguage { language })
            }
            TransformError::MalformedNode { pass, message } => {
                Ok(TransformWarning::MalformedNode { pass, message })
            }
            fatal => Err(fatal),
        }
    }
}

/// Collection of non-fatal diagnostics gathered during one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct TransformDiagnostics {
    /// Warnings in the order they were raised.
    pub warnings: Vec<TransformWarning>,
}

impl TransformDiagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the diagnostics collection
    pub fn add_warning(&mut self, warning: TransformWarning) {
        self.warnings.push(warning);
    }

    /// Records a recoverable error as a warning, returning fatal errors.
    pub fn downgrade(&mut self, error: TransformError) -> Result<(), TransformError> {
        let warning = TransformWarning::try_from(error)?;
        self.warnings.push(warning);
        Ok(())
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get total count of all diagnostics
    pub fn count(&self) -> usize {
        self.warnings.len()
    }
}
