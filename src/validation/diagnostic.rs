use std::fmt;

use serde::Serialize;

use crate::config::Severity;
use crate::types::SourceLocation;

/// Kind of problem found in a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    DuplicateEntry,
    UnfinishedTranslation,
    EmptyTranslation,
    PluralFormCount,
    MissingCountPlaceholder,
    PlaceholderMismatch,
    UnknownPluralRule,
}

impl DiagnosticCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateEntry => "duplicate-entry",
            Self::UnfinishedTranslation => "unfinished-translation",
            Self::EmptyTranslation => "empty-translation",
            Self::PluralFormCount => "plural-form-count",
            Self::MissingCountPlaceholder => "missing-count-placeholder",
            Self::PlaceholderMismatch => "placeholder-mismatch",
            Self::UnknownPluralRule => "unknown-plural-rule",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding of [`super::validate`].
///
/// Document-level findings carry neither context nor source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
    /// First `<location>` of the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.severity, self.code)?;
        if let Some(context) = &self.context {
            write!(f, " {context}")?;
        }
        if let Some(source) = &self.source_text {
            write!(f, " {source:?}")?;
        }
        if let Some(location) = &self.location {
            write!(f, " ({location})")?;
        }
        write!(f, ": {}", self.message)
    }
}
