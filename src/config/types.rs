use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::runtime::LookupOptions;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Contents of `.ts-catalog.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSettings {
    pub translation_files: TranslationFilesConfig,

    /// Applied to every walked path, in addition to `.gitignore`.
    pub exclude_patterns: Vec<String>,

    /// Language of the source strings.
    ///
    /// Resolving to this language renders the source text, unless a catalog
    /// for it exists.
    pub source_language: String,
    /// Language to activate when none is given on the command line.
    /// If unset, the OS locale is used.
    pub default_language: Option<String>,

    pub lookup: LookupOptions,
    pub indexing: IndexingConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexingConfig {
    /// Parallel thread count for indexing.
    /// Default: 80% of CPU cores (minimum 1).
    pub num_threads: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

/// Diagnostic severity. `Off` disables the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Off,
}

impl Severity {
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Off => "off",
        };
        f.write_str(label)
    }
}

/// Severity per validation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    pub unfinished: Severity,
    pub empty_translation: Severity,
    /// Numerus form count and the language's plural rule.
    pub plural_forms: Severity,
    /// `%1`.. and `%n` consistency between source and translation.
    pub placeholders: Severity,
    pub duplicates: Severity,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            unfinished: Severity::Info,
            empty_translation: Severity::Warning,
            plural_forms: Severity::Error,
            placeholders: Severity::Error,
            duplicates: Severity::Error,
        }
    }
}

impl CatalogSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Invalid thread count
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.translation_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.includePatterns",
                "At least one pattern is required. Example: [\"**/translations/*.ts\"]",
            ));
        }

        check_patterns(
            &mut errors,
            "translationFiles.includePatterns",
            &self.translation_files.include_patterns,
        );
        check_patterns(
            &mut errors,
            "translationFiles.excludePatterns",
            &self.translation_files.exclude_patterns,
        );
        check_patterns(&mut errors, "excludePatterns", &self.exclude_patterns);

        if self.source_language.trim().is_empty() {
            errors.push(ValidationError::new(
                "sourceLanguage",
                "The language cannot be empty. Example: \"en\"",
            ));
        }

        if let Some(language) = &self.default_language
            && language.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "defaultLanguage",
                "The language cannot be empty. Specify a language (e.g., \"ru\"), or remove this field",
            ));
        }

        if self.indexing.num_threads == Some(0) {
            errors.push(ValidationError::new(
                "indexing.numThreads",
                "Thread count must be at least 1, or remove this field to use the default",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn check_patterns(errors: &mut Vec<ValidationError>, field: &str, patterns: &[String]) {
    for (index, pattern) in patterns.iter().enumerate() {
        if let Err(e) = globset::Glob::new(pattern) {
            errors.push(ValidationError::new(
                format!("{field}[{index}]"),
                format!("Invalid glob pattern '{pattern}': {e}"),
            ));
        }
    }
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self {
            include_patterns: vec![
                "**/translations/**/*.ts".to_string(),
                "**/*_??.ts".to_string(),
                "**/*_??_??.ts".to_string(),
            ],
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            translation_files: TranslationFilesConfig::default(),
            exclude_patterns: vec!["node_modules/**".to_string(), "target/**".to_string()],
            source_language: "en".to_string(),
            default_language: None,
            lookup: LookupOptions::default(),
            indexing: IndexingConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = CatalogSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"defaultLanguage": "ru", "lookup": {"includeUnfinished": true}}"#;

        let settings: CatalogSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.source_language, eq("en"));
        assert_that!(settings.default_language, some(eq("ru")));
        assert_that!(settings.lookup.include_unfinished, eq(true));
        assert_that!(settings.translation_files.include_patterns, len(eq(3)));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: CatalogSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings, eq(&CatalogSettings::default()));
        assert_that!(settings.exclude_patterns, elements_are![eq("node_modules/**"), eq("target/**")]);
        assert_that!(settings.translation_files.exclude_patterns, is_empty());
    }

    #[rstest]
    fn deserialize_validation_severities() {
        let json = r#"{"validation": {"unfinished": "off", "placeholders": "warning"}}"#;

        let settings: CatalogSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.validation.unfinished, eq(Severity::Off));
        assert_that!(settings.validation.placeholders, eq(Severity::Warning));
        assert_that!(settings.validation.duplicates, eq(Severity::Error));
    }

    #[rstest]
    fn deserialize_unknown_severity_fails() {
        let json = r#"{"validation": {"unfinished": "fatal"}}"#;

        assert_that!(serde_json::from_str::<CatalogSettings>(json), err(anything()));
    }

    #[rstest]
    fn validate_invalid_source_language_empty() {
        let settings =
            CatalogSettings { source_language: String::new(), ..CatalogSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("sourceLanguage")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_default_language_empty() {
        let settings = CatalogSettings {
            default_language: Some(String::new()),
            ..CatalogSettings::default()
        };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("defaultLanguage")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_include_patterns_empty() {
        let settings = CatalogSettings {
            translation_files: TranslationFilesConfig {
                include_patterns: vec![],
                exclude_patterns: vec![],
            },
            ..CatalogSettings::default()
        };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("translationFiles.includePatterns")),
                field!(ValidationError.message, contains_substring("At least one pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_include_pattern_invalid_glob() {
        let settings = CatalogSettings {
            translation_files: TranslationFilesConfig {
                include_patterns: vec!["**/*.{ts".to_string()],
                exclude_patterns: vec![],
            },
            ..CatalogSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("translationFiles.includePatterns[0]")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern")),
                field!(ValidationError.message, contains_substring("**/*.{ts"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_exclude_pattern_invalid_glob() {
        let settings = CatalogSettings {
            exclude_patterns: vec![
                "node_modules/**".to_string(),
                "build/**".to_string(),
                "invalid[pattern".to_string(),
            ],
            ..CatalogSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("excludePatterns[2]")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern")),
                field!(ValidationError.message, contains_substring("invalid[pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_num_threads_zero() {
        let settings = CatalogSettings {
            indexing: IndexingConfig { num_threads: Some(0) },
            ..CatalogSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.field_path, eq("indexing.numThreads"))])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = CatalogSettings {
            source_language: String::new(),
            translation_files: TranslationFilesConfig {
                include_patterns: vec![],
                exclude_patterns: vec![],
            },
            ..CatalogSettings::default()
        };

        let validation_result = settings.validate();
        let errors = validation_result.unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. translationFiles.includePatterns"));
        assert_that!(error_message, contains_substring("At least one pattern"));
        assert_that!(error_message, contains_substring("2. sourceLanguage"));
        assert_that!(error_message, contains_substring("cannot be empty"));
    }

    #[rstest]
    #[case(Severity::Error, "error", true)]
    #[case(Severity::Warning, "warning", true)]
    #[case(Severity::Info, "info", true)]
    #[case(Severity::Off, "off", false)]
    fn severity_display_and_enabled(
        #[case] severity: Severity,
        #[case] label: &str,
        #[case] enabled: bool,
    ) {
        assert_that!(severity.to_string(), eq(label));
        assert_that!(severity.is_enabled(), eq(enabled));
    }
}
