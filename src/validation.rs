//! カタログの品質チェック
//!
//! 読み込み済みの [`TsDocument`] を検査し、[`Diagnostic`] のリストを返します。
//! 削除済み（`vanished` / `obsolete`）のエントリは対象外です。

mod diagnostic;

use std::collections::{
    BTreeSet,
    HashSet,
};

pub use diagnostic::{
    Diagnostic,
    DiagnosticCode,
};

use crate::catalog::{
    Message,
    Status,
    Translation,
    TsDocument,
};
use crate::config::{
    Severity,
    ValidationConfig,
};
use crate::runtime::{
    PluralRule,
    has_count_placeholder,
    placeholder_numbers,
};

/// ドキュメントを検査する
///
/// `Off` に設定されたチェックは実行しない。
#[must_use]
pub fn validate(document: &TsDocument, config: &ValidationConfig) -> Vec<Diagnostic> {
    let mut collector = Collector { diagnostics: Vec::new() };
    let plural_rule = document.language.as_deref().and_then(PluralRule::for_language);

    if plural_rule.is_none()
        && config.plural_forms.is_enabled()
        && document.messages().any(|(_, message)| message.is_plural())
    {
        let message = document.language.as_deref().map_or_else(
            || "Catalog has no language; plural forms cannot be selected".to_string(),
            |language| format!("No plural rule for language '{language}'"),
        );
        collector.document_level(config.plural_forms, DiagnosticCode::UnknownPluralRule, message);
    }

    for context in &document.contexts {
        let mut seen = HashSet::new();
        for message in &context.messages {
            let key = (message.source.as_str(), message.disambiguation.as_deref());
            if !seen.insert(key) {
                collector.push(
                    config.duplicates,
                    DiagnosticCode::DuplicateEntry,
                    &context.name,
                    message,
                    "Duplicate entry: the same source text appears earlier in this context"
                        .to_string(),
                );
                continue;
            }
            if !message.status.is_active() {
                continue;
            }
            check_message(&mut collector, config, plural_rule, &context.name, message);
        }
    }

    collector.diagnostics
}

/// `Error` の診断があるかどうか
#[must_use]
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

fn check_message(
    collector: &mut Collector,
    config: &ValidationConfig,
    plural_rule: Option<PluralRule>,
    context: &str,
    message: &Message,
) {
    if message.status == Status::Unfinished {
        collector.push(
            config.unfinished,
            DiagnosticCode::UnfinishedTranslation,
            context,
            message,
            "Translation is unfinished; the source text is shown".to_string(),
        );
    }

    let translated = message.translation.texts().any(|text| !text.is_empty());

    if message.status == Status::Finished && message.translation.texts().any(str::is_empty) {
        let text = if message.is_plural() {
            "A plural form is empty; the source text is shown for it"
        } else {
            "Translation is empty; the source text is shown"
        };
        collector.push(
            config.empty_translation,
            DiagnosticCode::EmptyTranslation,
            context,
            message,
            text.to_string(),
        );
    }

    if let (Translation::Plural(forms), Some(rule)) = (&message.translation, plural_rule)
        && (translated || message.status == Status::Finished)
        && forms.len() != rule.form_count()
    {
        collector.push(
            config.plural_forms,
            DiagnosticCode::PluralFormCount,
            context,
            message,
            format!("Expected {} plural forms, found {}", rule.form_count(), forms.len()),
        );
    }

    check_placeholders(collector, config, context, message);
}

fn check_placeholders(
    collector: &mut Collector,
    config: &ValidationConfig,
    context: &str,
    message: &Message,
) {
    let expected = placeholder_numbers(&message.source);
    let counts = message.is_plural() && has_count_placeholder(&message.source);

    for text in message.translation.texts().filter(|text| !text.is_empty()) {
        let found = placeholder_numbers(text);
        if found != expected {
            collector.push(
                config.placeholders,
                DiagnosticCode::PlaceholderMismatch,
                context,
                message,
                describe_mismatch(&expected, &found, text),
            );
        }
        if counts && !has_count_placeholder(text) {
            collector.push(
                config.placeholders,
                DiagnosticCode::MissingCountPlaceholder,
                context,
                message,
                format!("Plural form {text:?} does not contain %n"),
            );
        }
    }
}

fn describe_mismatch(expected: &BTreeSet<u8>, found: &BTreeSet<u8>, text: &str) -> String {
    let list = |numbers: Vec<&u8>| {
        numbers.iter().map(|n| format!("%{n}")).collect::<Vec<_>>().join(", ")
    };
    let missing: Vec<_> = expected.difference(found).collect();
    let extra: Vec<_> = found.difference(expected).collect();

    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing {}", list(missing)));
    }
    if !extra.is_empty() {
        parts.push(format!("unexpected {}", list(extra)));
    }
    format!("Placeholders differ from the source text in {text:?}: {}", parts.join("; "))
}

struct Collector {
    diagnostics: Vec<Diagnostic>,
}

impl Collector {
    fn push(
        &mut self,
        severity: Severity,
        code: DiagnosticCode,
        context: &str,
        message: &Message,
        text: String,
    ) {
        if !severity.is_enabled() {
            return;
        }
        self.diagnostics.push(Diagnostic {
            severity,
            code,
            context: Some(context.to_string()),
            source_text: Some(message.source.clone()),
            location: message.locations.first().cloned(),
            message: text,
        });
    }

    fn document_level(&mut self, severity: Severity, code: DiagnosticCode, text: String) {
        self.diagnostics.push(Diagnostic {
            severity,
            code,
            context: None,
            source_text: None,
            location: None,
            message: text,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::catalog::Context;
    use crate::test_utils::{
        plain,
        plural,
    };
    use crate::types::SourceLocation;

    fn document(messages: Vec<Message>) -> TsDocument {
        TsDocument::new("ru", vec![Context::new("CentralWidget", messages)])
    }

    fn codes(diagnostics: &[Diagnostic]) -> Vec<DiagnosticCode> {
        diagnostics.iter().map(|d| d.code).collect()
    }

    #[rstest]
    fn test_clean_document_has_no_diagnostics() {
        let document = document(vec![
            plain("Error", "Ошибка"),
            plain("Version %1", "Версия %1"),
            plural("%n object(s)", &["%n объект", "%n объекта", "%n объектов"]),
        ]);

        assert_that!(validate(&document, &ValidationConfig::default()), is_empty());
    }

    #[rstest]
    fn test_unfinished() {
        let document = document(vec![
            plain("Dev mode", "").with_status(Status::Unfinished).with_location(SourceLocation::new(
                "../src/admc/main_window.cpp",
                Some(101),
            )),
        ]);

        let diagnostics = validate(&document, &ValidationConfig::default());

        assert_eq!(codes(&diagnostics), vec![DiagnosticCode::UnfinishedTranslation]);
        assert_that!(diagnostics[0].severity, eq(Severity::Info));
        assert_that!(diagnostics[0].context.as_deref(), some(eq("CentralWidget")));
        assert_that!(diagnostics[0].source_text.as_deref(), some(eq("Dev mode")));
        assert_that!(
            diagnostics[0].location.as_ref().map(ToString::to_string),
            some(eq("../src/admc/main_window.cpp:101"))
        );
    }

    #[rstest]
    fn test_empty_translation() {
        let document = document(vec![
            plain("Filter", ""),
            plural("%n object(s)", &["%n объект", "", "%n объектов"]),
        ]);

        let diagnostics = validate(&document, &ValidationConfig::default());

        assert_eq!(
            codes(&diagnostics),
            vec![DiagnosticCode::EmptyTranslation, DiagnosticCode::EmptyTranslation]
        );
        assert_that!(diagnostics[1].message, contains_substring("plural form"));
    }

    #[rstest]
    fn test_duplicates() {
        let document = document(vec![
            plain("Link", "Связь"),
            plain("Link", "Связать").with_disambiguation("verb"),
            plain("Link", "Ссылка"),
        ]);

        let diagnostics = validate(&document, &ValidationConfig::default());

        assert_eq!(codes(&diagnostics), vec![DiagnosticCode::DuplicateEntry]);
        assert!(has_errors(&diagnostics));
    }

    #[rstest]
    fn test_plural_form_count() {
        let document = document(vec![
            plural("%n object(s)", &["%n объект", "%n объектов"]),
            // Never translated: no forms is not a count mismatch.
            plural("%n file(s)", &[]).with_status(Status::Unfinished),
        ]);
        let config = ValidationConfig { unfinished: Severity::Off, ..ValidationConfig::default() };

        let diagnostics = validate(&document, &config);

        assert_eq!(codes(&diagnostics), vec![DiagnosticCode::PluralFormCount]);
        assert_that!(diagnostics[0].message, eq("Expected 3 plural forms, found 2"));
    }

    #[rstest]
    #[case::dropped("Can't set \"%1\" when \"%2\" is set.", "Нельзя задать \"%1\".", "missing %2")]
    #[case::added("Error", "Ошибка %1", "unexpected %1")]
    #[case::renumbered("%1 of %2", "%1 из %3", "missing %2; unexpected %3")]
    fn test_placeholder_mismatch(
        #[case] source: &str,
        #[case] translation: &str,
        #[case] detail: &str,
    ) {
        let document = document(vec![plain(source, translation)]);

        let diagnostics = validate(&document, &ValidationConfig::default());

        assert_eq!(codes(&diagnostics), vec![DiagnosticCode::PlaceholderMismatch]);
        assert_that!(diagnostics[0].message, contains_substring(detail));
    }

    #[rstest]
    fn test_reordered_placeholders_are_fine() {
        let document = document(vec![plain("%1 of %2", "%2 из %1")]);

        assert_that!(validate(&document, &ValidationConfig::default()), is_empty());
    }

    #[rstest]
    fn test_missing_count_placeholder() {
        let document =
            document(vec![plural("%n object(s)", &["один объект", "%n объекта", "%n объектов"])]);

        let diagnostics = validate(&document, &ValidationConfig::default());

        assert_eq!(codes(&diagnostics), vec![DiagnosticCode::MissingCountPlaceholder]);
    }

    #[rstest]
    fn test_vanished_entries_are_skipped() {
        let document = document(vec![
            plain("Old", "").with_status(Status::Vanished),
            plain("Older %1", "Старее").with_status(Status::Obsolete),
        ]);

        assert_that!(validate(&document, &ValidationConfig::default()), is_empty());
    }

    #[rstest]
    fn test_unknown_plural_rule() {
        let mut document = document(vec![plural("%n object(s)", &["%n Doch"])]);
        document.language = Some("tlh".to_string());

        let diagnostics = validate(&document, &ValidationConfig::default());

        assert_eq!(codes(&diagnostics), vec![DiagnosticCode::UnknownPluralRule]);
        assert_that!(diagnostics[0].context, none());
        assert_that!(diagnostics[0].message, contains_substring("'tlh'"));
    }

    #[rstest]
    fn test_unknown_language_without_plurals_is_fine() {
        let mut document = document(vec![plain("Error", "Ошибка")]);
        document.language = None;

        assert_that!(validate(&document, &ValidationConfig::default()), is_empty());
    }

    #[rstest]
    fn test_disabled_checks() {
        let document = document(vec![
            plain("Link", "Связь"),
            plain("Link", "Ссылка"),
            plain("Version %1", "Версия").with_status(Status::Unfinished),
        ]);
        let config = ValidationConfig {
            unfinished: Severity::Off,
            duplicates: Severity::Off,
            placeholders: Severity::Warning,
            ..ValidationConfig::default()
        };

        let diagnostics = validate(&document, &config);

        assert_eq!(codes(&diagnostics), vec![DiagnosticCode::PlaceholderMismatch]);
        assert!(!has_errors(&diagnostics));
    }
}
