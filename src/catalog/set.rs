//! Catalogs of several languages, keyed by normalized language code.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::Catalog;
use crate::language::{
    normalize_language_code,
    primary_subtag,
};

/// Loaded catalogs available for a language switch.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    catalogs: BTreeMap<String, Arc<Catalog>>,
}

impl CatalogSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a catalog, replacing any previous one for the same language.
    pub fn insert(&mut self, language: &str, catalog: Arc<Catalog>) -> Option<Arc<Catalog>> {
        self.catalogs.insert(normalize_language_code(language), catalog)
    }

    /// Finds the catalog for a language.
    ///
    /// `ru-RU` matches a catalog registered as `ru_RU` first, then `ru`.
    /// A bare `pt` matches the first registered `pt_*` catalog.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<&Arc<Catalog>> {
        let normalized = normalize_language_code(language);
        if let Some(catalog) = self.catalogs.get(&normalized) {
            return Some(catalog);
        }

        let primary = primary_subtag(&normalized);
        self.catalogs.get(primary).or_else(|| {
            self.catalogs
                .iter()
                .find(|(code, _)| primary_subtag(code) == primary)
                .map(|(_, catalog)| catalog)
        })
    }

    /// Normalized language codes, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}
