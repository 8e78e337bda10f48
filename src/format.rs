//! Reading and writing the XML TS translation format.
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <!DOCTYPE TS>
//! <TS version="2.1" language="ru">
//! <context>
//!     <name>AboutDialog</name>
//!     <message>
//!         <location filename="../src/admc/about_dialog.cpp" line="32"/>
//!         <source>Version %1</source>
//!         <translation type="unfinished">Версия %1</translation>
//!     </message>
//! </context>
//! </TS>
//! ```

mod error;
mod reader;
mod writer;

pub use error::FormatError;
pub use reader::{
    read_file,
    read_str,
};
pub use writer::{
    write_file,
    write_string,
};

/// Element and attribute names of the format.
mod names {
    pub(super) const ROOT: &[u8] = b"TS";
    pub(super) const CONTEXT: &[u8] = b"context";
    pub(super) const NAME: &[u8] = b"name";
    pub(super) const MESSAGE: &[u8] = b"message";
    pub(super) const LOCATION: &[u8] = b"location";
    pub(super) const SOURCE: &[u8] = b"source";
    pub(super) const COMMENT: &[u8] = b"comment";
    pub(super) const EXTRA_COMMENT: &[u8] = b"extracomment";
    pub(super) const TRANSLATOR_COMMENT: &[u8] = b"translatorcomment";
    pub(super) const TRANSLATION: &[u8] = b"translation";
    pub(super) const NUMERUS_FORM: &[u8] = b"numerusform";
}
