//! Translation catalogs: the data model and the indexed, read-only table.

mod error;
mod message;
mod set;

use std::collections::HashMap;
use std::path::Path;

pub use error::CatalogError;
pub use message::{
    Context,
    Message,
    Status,
    Translation,
    TsDocument,
};
pub use set::CatalogSet;

use crate::format;
use crate::runtime::PluralRule;

/// Position of a message inside the document.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    disambiguation: Option<String>,
    context: usize,
    message: usize,
}

/// An immutable, indexed translation table for one language.
///
/// Built once from a [`TsDocument`]; lookups go through
/// [`crate::runtime::Translator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    document: TsDocument,
    plural_rule: Option<PluralRule>,
    /// context name → source text → candidates differing by disambiguation
    index: HashMap<String, HashMap<String, Vec<Slot>>>,
}

impl Catalog {
    /// Indexes a document.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateEntry`] when two messages of one context
    /// share the same source text and disambiguation.
    pub fn from_document(document: TsDocument) -> Result<Self, CatalogError> {
        let mut index: HashMap<String, HashMap<String, Vec<Slot>>> = HashMap::new();

        for (context_index, context) in document.contexts.iter().enumerate() {
            let by_source = index.entry(context.name.clone()).or_default();
            for (message_index, message) in context.messages.iter().enumerate() {
                let slots = by_source.entry(message.source.clone()).or_default();
                if slots.iter().any(|slot| slot.disambiguation == message.disambiguation) {
                    return Err(CatalogError::DuplicateEntry {
                        context: context.name.clone(),
                        source_text: message.source.clone(),
                        disambiguation: message.disambiguation.clone(),
                    });
                }
                slots.push(Slot {
                    disambiguation: message.disambiguation.clone(),
                    context: context_index,
                    message: message_index,
                });
            }
        }

        let plural_rule = document.language.as_deref().and_then(PluralRule::for_language);
        if plural_rule.is_none() {
            tracing::debug!(
                language = ?document.language,
                "No plural rule for catalog language; plural lookups will use source text"
            );
        }

        Ok(Self { document, plural_rule, index })
    }

    /// Loads and indexes a TS file.
    pub fn load_file(path: &Path) -> Result<Self, CatalogError> {
        let document = format::read_file(path)?;
        let catalog = Self::from_document(document)?;
        tracing::debug!(
            language = ?catalog.language(),
            entries = catalog.len(),
            "Loaded catalog from {:?}",
            path
        );
        Ok(catalog)
    }

    /// Target language of the catalog (e.g. `ru`).
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.document.language.as_deref()
    }

    #[must_use]
    pub const fn plural_rule(&self) -> Option<PluralRule> {
        self.plural_rule
    }

    #[must_use]
    pub fn contexts(&self) -> &[Context] {
        &self.document.contexts
    }

    #[must_use]
    pub const fn document(&self) -> &TsDocument {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> TsDocument {
        self.document
    }

    /// Number of messages, including vanished ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.document.contexts.iter().map(|c| c.messages.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exact-key lookup of a message, regardless of its status.
    #[must_use]
    pub fn get(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
    ) -> Option<&Message> {
        let slot = self
            .index
            .get(context)?
            .get(source)?
            .iter()
            .find(|slot| slot.disambiguation.as_deref() == disambiguation)?;
        self.document.contexts.get(slot.context)?.messages.get(slot.message)
    }
}

/// Parses and indexes a TS document held in memory.
impl std::str::FromStr for Catalog {
    type Err = CatalogError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::from_document(format::read_str(input)?)
    }
}
