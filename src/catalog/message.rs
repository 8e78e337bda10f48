//! Translation entry definitions.

use serde::Serialize;

use crate::types::SourceLocation;

/// Review state of a message, as recorded in the `type` attribute of `<translation>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// Reviewed translation (no `type` attribute).
    #[default]
    Finished,
    /// Not yet confirmed by a translator.
    Unfinished,
    /// The source string disappeared from the application.
    Vanished,
    /// Legacy marker for removed source strings.
    Obsolete,
}

impl Status {
    /// Parses the `type` attribute. `None` means the attribute is absent.
    #[must_use]
    pub fn from_type_attribute(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("") => Some(Self::Finished),
            Some("unfinished") => Some(Self::Unfinished),
            Some("vanished") => Some(Self::Vanished),
            Some("obsolete") => Some(Self::Obsolete),
            Some(_) => None,
        }
    }

    #[must_use]
    pub const fn type_attribute(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }

    /// True for entries whose source still exists in the application.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Finished | Self::Unfinished)
    }
}

/// Translated text of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Translation {
    Plain(String),
    /// Numerus forms, ordered as the target language's plural rule indexes them.
    Plural(Vec<String>),
}

impl Default for Translation {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl Translation {
    /// True when there is no usable text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Plain(text) => text.is_empty(),
            Self::Plural(forms) => forms.iter().all(String::is_empty),
        }
    }

    #[must_use]
    pub const fn is_plural(&self) -> bool {
        matches!(self, Self::Plural(_))
    }

    #[must_use]
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text),
            Self::Plural(_) => None,
        }
    }

    #[must_use]
    pub fn forms(&self) -> Option<&[String]> {
        match self {
            Self::Plain(_) => None,
            Self::Plural(forms) => Some(forms),
        }
    }

    /// Every text carried by this translation, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        let texts: &[String] = match self {
            Self::Plain(text) => std::slice::from_ref(text),
            Self::Plural(forms) => forms,
        };
        texts.iter().map(String::as_str)
    }
}

/// One source-string-to-translation record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub source: String,
    /// Extra key component distinguishing identical sources (`<comment>`).
    pub disambiguation: Option<String>,
    pub translation: Translation,
    pub status: Status,
    pub translator_comment: Option<String>,
    /// Note from the developer to translators (`<extracomment>`).
    pub extra_comment: Option<String>,
    pub locations: Vec<SourceLocation>,
}

impl Message {
    #[must_use]
    pub fn new(source: impl Into<String>, translation: Translation) -> Self {
        Self { source: source.into(), translation, ..Self::default() }
    }

    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_disambiguation(mut self, disambiguation: impl Into<String>) -> Self {
        self.disambiguation = Some(disambiguation.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.locations.push(location);
        self
    }

    #[must_use]
    pub const fn is_plural(&self) -> bool {
        self.translation.is_plural()
    }
}

/// Messages owned by one GUI component.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Context {
    pub name: String,
    pub messages: Vec<Message>,
}

impl Context {
    #[must_use]
    pub fn new(name: impl Into<String>, messages: Vec<Message>) -> Self {
        Self { name: name.into(), messages }
    }
}

/// A whole TS file as written on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TsDocument {
    pub version: String,
    /// Target locale, e.g. `ru` or `pt_BR`.
    pub language: Option<String>,
    pub source_language: Option<String>,
    pub contexts: Vec<Context>,
}

impl Default for TsDocument {
    fn default() -> Self {
        Self {
            version: Self::DEFAULT_VERSION.to_string(),
            language: None,
            source_language: None,
            contexts: Vec::new(),
        }
    }
}

impl TsDocument {
    pub const DEFAULT_VERSION: &'static str = "2.1";

    #[must_use]
    pub fn new(language: impl Into<String>, contexts: Vec<Context>) -> Self {
        Self { language: Some(language.into()), contexts, ..Self::default() }
    }

    /// Iterates `(context name, message)` pairs in file order.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.contexts
            .iter()
            .flat_map(|context| {
                context.messages.iter().map(move |m| (context.name.as_str(), m))
            })
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::absent(None, Some(Status::Finished))]
    #[case::empty(Some(""), Some(Status::Finished))]
    #[case::unfinished(Some("unfinished"), Some(Status::Unfinished))]
    #[case::vanished(Some("vanished"), Some(Status::Vanished))]
    #[case::obsolete(Some("obsolete"), Some(Status::Obsolete))]
    #[case::unknown(Some("reviewed"), None)]
    fn test_status_from_type_attribute(
        #[case] value: Option<&str>,
        #[case] expected: Option<Status>,
    ) {
        assert_that!(Status::from_type_attribute(value), eq(expected));
    }

    #[rstest]
    fn test_status_attribute_matches_parser() {
        for status in [Status::Finished, Status::Unfinished, Status::Vanished, Status::Obsolete] {
            assert_that!(Status::from_type_attribute(status.type_attribute()), some(eq(status)));
        }
    }

    #[googletest::test]
    fn test_translation_is_empty() {
        expect_that!(Translation::Plain(String::new()).is_empty(), eq(true));
        expect_that!(Translation::Plural(vec![String::new(), String::new()]).is_empty(), eq(true));
        expect_that!(
            Translation::Plural(vec![String::new(), "%n объектов".to_string()]).is_empty(),
            eq(false)
        );
        expect_that!(Translation::Plain("Ошибка".to_string()).is_empty(), eq(false));
    }

    #[rstest]
    fn test_document_messages_flattens_in_order() {
        let document = TsDocument::new(
            "ru",
            vec![
                Context::new("A", vec![Message::new("one", Translation::default())]),
                Context::new(
                    "B",
                    vec![
                        Message::new("two", Translation::default()),
                        Message::new("three", Translation::default()),
                    ],
                ),
            ],
        );

        let keys: Vec<(&str, &str)> =
            document.messages().map(|(ctx, m)| (ctx, m.source.as_str())).collect();

        assert_eq!(keys, vec![("A", "one"), ("B", "two"), ("B", "three")]);
    }
}
