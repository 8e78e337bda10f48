//! ts-catalog
//!
//! Qt Linguist の TS 形式（XML）の翻訳カタログを読み込み、実行時の翻訳検索と
//! 品質チェックを提供するライブラリ

pub mod catalog;
pub mod cli;
pub mod config;
pub mod format;
pub mod indexer;
pub mod language;
pub mod report;
pub mod runtime;
pub mod types;
pub mod validation;

mod test_utils;

pub use catalog::{
    Catalog,
    CatalogSet,
};
pub use runtime::{
    ActiveCatalog,
    LookupOptions,
    Translator,
    global,
    tr,
    tr_n,
};
