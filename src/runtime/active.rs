//! The process-wide active catalog.
//!
//! Lookups clone a cheap [`Translator`] handle out of the lock, so a reader
//! always sees one complete catalog while another thread swaps it.

use std::path::Path;
use std::sync::{
    Arc,
    LazyLock,
    PoisonError,
    RwLock,
};

use super::translator::{
    LookupOptions,
    Translator,
};
use crate::catalog::{
    Catalog,
    CatalogError,
    CatalogSet,
};

/// Swappable handle to the catalog used for lookups.
#[derive(Debug, Default)]
pub struct ActiveCatalog {
    current: RwLock<Translator>,
}

impl ActiveCatalog {
    /// Starts without a catalog; lookups render the source language.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_catalog(catalog: Arc<Catalog>, options: LookupOptions) -> Self {
        Self { current: RwLock::new(Translator::new(catalog, options)) }
    }

    /// Snapshot of the active catalog. Later swaps do not affect it.
    #[must_use]
    pub fn translator(&self) -> Translator {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Makes `catalog` active and returns the previously active one.
    pub fn replace(&self, catalog: Catalog) -> Option<Arc<Catalog>> {
        self.replace_arc(Arc::new(catalog))
    }

    pub fn replace_arc(&self, catalog: Arc<Catalog>) -> Option<Arc<Catalog>> {
        tracing::debug!(language = ?catalog.language(), "Switching active catalog");
        self.swap(|options| Translator::new(catalog, options))
    }

    /// Drops the active catalog; lookups render the source language again.
    pub fn clear(&self) -> Option<Arc<Catalog>> {
        self.swap(Translator::source_language)
    }

    pub fn set_options(&self, options: LookupOptions) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = match current.catalog() {
            Some(catalog) => Translator::new(Arc::clone(catalog), options),
            None => Translator::source_language(options),
        };
    }

    /// Loads a TS file and makes it active.
    ///
    /// # Errors
    /// Returns the load error; the previously active catalog stays in place.
    pub fn load_file(&self, path: &Path) -> Result<Option<Arc<Catalog>>, CatalogError> {
        let catalog = Catalog::load_file(path).inspect_err(|e| {
            tracing::warn!("Failed to load catalog {:?}: {}", path, e);
        })?;
        Ok(self.replace(catalog))
    }

    /// Activates the catalog of `language` from `catalogs`.
    ///
    /// Returns `false` and keeps the current catalog when none matches.
    pub fn switch_language(&self, catalogs: &CatalogSet, language: &str) -> bool {
        let Some(catalog) = catalogs.get(language) else {
            tracing::warn!("No catalog available for language '{}'", language);
            return false;
        };
        self.replace_arc(Arc::clone(catalog));
        true
    }

    fn swap(&self, build: impl FnOnce(LookupOptions) -> Translator) -> Option<Arc<Catalog>> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = build(current.options());
        std::mem::replace(&mut *current, next).catalog().cloned()
    }
}

static GLOBAL: LazyLock<ActiveCatalog> = LazyLock::new(ActiveCatalog::new);

/// The process-wide catalog used by [`tr`] and [`tr_n`].
#[must_use]
pub fn global() -> &'static ActiveCatalog {
    &GLOBAL
}

/// Translates through the process-wide catalog.
#[must_use]
pub fn tr(context: &str, source: &str, args: &[&str]) -> String {
    GLOBAL.translator().lookup(context, source, args)
}

/// Plural translation through the process-wide catalog.
#[must_use]
pub fn tr_n(context: &str, source: &str, n: i64, args: &[&str]) -> String {
    GLOBAL.translator().lookup_plural(context, source, n, args)
}
