use thiserror::Error;

/// Errors raised while reading or writing a TS document.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Failed to access translation file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Missing <TS> root element")]
    MissingRoot,

    #[error("More than one <TS> root element")]
    MultipleRoots,

    #[error("Unexpected end of document inside <{0}>")]
    UnexpectedEof(&'static str),

    /// A known element appeared where the format does not allow it,
    /// including inside another element of the same kind.
    #[error("Unexpected <{element}>: it must be a direct child of <{expected_parent}>")]
    Misplaced { element: String, expected_parent: &'static str },

    #[error("Unknown translation type '{0}'")]
    UnknownStatus(String),

    #[error("Translation file is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
