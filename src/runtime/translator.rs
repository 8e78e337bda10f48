//! Lookups against one catalog with fail-open fallback to the source text.

use std::sync::Arc;

use serde::{
    Deserialize,
    Serialize,
};

use super::placeholder::substitute;
use crate::catalog::{
    Catalog,
    Message,
    Status,
    Translation,
};

/// Lookup behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LookupOptions {
    /// Use unfinished translations that have text instead of the source.
    pub include_unfinished: bool,
}

/// Read-only view of one catalog.
///
/// Never fails: a missing entry, an unfinished entry, a missing plural form or
/// a placeholder without value all degrade to the best available text.
/// A translator without a catalog renders the source language.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    catalog: Option<Arc<Catalog>>,
    options: LookupOptions,
}

impl Translator {
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>, options: LookupOptions) -> Self {
        Self { catalog: Some(catalog), options }
    }

    /// A translator that always renders source strings.
    #[must_use]
    pub const fn source_language(options: LookupOptions) -> Self {
        Self { catalog: None, options }
    }

    #[must_use]
    pub const fn catalog(&self) -> Option<&Arc<Catalog>> {
        self.catalog.as_ref()
    }

    #[must_use]
    pub const fn options(&self) -> LookupOptions {
        self.options
    }

    /// Translates `source` within `context` and substitutes `%1`, `%2`, ...
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use ts_catalog::catalog::Catalog;
    /// use ts_catalog::runtime::{LookupOptions, Translator};
    ///
    /// let catalog: Catalog = r#"<TS version="2.1" language="ru"><context>
    ///     <name>AttributeEditor</name>
    ///     <message><source>Attribute: %1</source><translation>Атрибут: %1</translation></message>
    ///     </context></TS>"#
    ///     .parse()
    ///     .unwrap();
    /// let translator = Translator::new(Arc::new(catalog), LookupOptions::default());
    ///
    /// assert_eq!(translator.lookup("AttributeEditor", "Attribute: %1", &["cn"]), "Атрибут: cn");
    /// assert_eq!(translator.lookup("AttributeEditor", "Value", &[]), "Value");
    /// ```
    #[must_use]
    pub fn lookup(&self, context: &str, source: &str, args: &[&str]) -> String {
        self.lookup_with(context, source, None, args)
    }

    /// Like [`Self::lookup`], for a source string carrying a disambiguation.
    #[must_use]
    pub fn lookup_with(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
        args: &[&str],
    ) -> String {
        let text = self
            .find(context, source, disambiguation)
            .and_then(|message| self.plain_text(message))
            .unwrap_or(source);
        substitute(text, None, args)
    }

    /// Translates a plural source string for the count `n`.
    ///
    /// The numerus form is chosen by the plural rule of the catalog language;
    /// `%n` is replaced by `n`.
    #[must_use]
    pub fn lookup_plural(&self, context: &str, source: &str, n: i64, args: &[&str]) -> String {
        self.lookup_plural_with(context, source, None, n, args)
    }

    /// Like [`Self::lookup_plural`], for a source string carrying a disambiguation.
    #[must_use]
    pub fn lookup_plural_with(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
        n: i64,
        args: &[&str],
    ) -> String {
        let text = self
            .find(context, source, disambiguation)
            .and_then(|message| self.plural_text(message, n))
            .unwrap_or(source);
        substitute(text, Some(n), args)
    }

    /// Finds the message for a key; a disambiguated key that has no entry
    /// falls back to the entry without disambiguation.
    fn find(&self, context: &str, source: &str, disambiguation: Option<&str>) -> Option<&Message> {
        let catalog = self.catalog.as_deref()?;
        catalog.get(context, source, disambiguation).or_else(|| {
            disambiguation.and_then(|_| catalog.get(context, source, None))
        })
    }

    const fn is_usable(&self, status: Status) -> bool {
        match status {
            Status::Finished => true,
            Status::Unfinished => self.options.include_unfinished,
            Status::Vanished | Status::Obsolete => false,
        }
    }

    fn plain_text<'a>(&self, message: &'a Message) -> Option<&'a str> {
        if !self.is_usable(message.status) {
            return None;
        }
        match &message.translation {
            Translation::Plain(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    fn plural_text<'a>(&self, message: &'a Message, n: i64) -> Option<&'a str> {
        if !self.is_usable(message.status) {
            return None;
        }
        let rule = self.catalog.as_deref()?.plural_rule()?;
        let form = message.translation.forms()?.get(rule.form_index(n))?;
        if form.is_empty() { None } else { Some(form) }
    }
}
