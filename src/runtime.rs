//! Runtime lookup: plural selection, placeholder substitution and the
//! active catalog.

mod active;
mod placeholder;
mod plural;
mod translator;

pub use active::{
    ActiveCatalog,
    global,
    tr,
    tr_n,
};
pub use placeholder::{
    has_count_placeholder,
    placeholder_numbers,
    substitute,
};
pub use plural::PluralRule;
pub use translator::{
    LookupOptions,
    Translator,
};
