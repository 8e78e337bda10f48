//! TS document reader.

use std::borrow::Cow;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{
    BytesStart,
    Event,
};

use super::FormatError;
use super::names;
use crate::catalog::{
    Context,
    Message,
    Status,
    Translation,
    TsDocument,
};
use crate::types::{
    LineNumber,
    SourceLocation,
};

/// Parses a TS document from a string.
///
/// Unknown elements are skipped. Text is kept verbatim (after entity
/// unescaping) inside text-bearing elements and ignored elsewhere.
///
/// # Examples
/// ```
/// use ts_catalog::format::read_str;
///
/// let document = read_str(
///     r#"<TS version="2.1" language="ru"><context><name>Dialog</name>
///        <message><source>Error</source><translation>Ошибка</translation></message>
///        </context></TS>"#,
/// )
/// .unwrap();
///
/// assert_eq!(document.language.as_deref(), Some("ru"));
/// assert_eq!(document.contexts[0].messages[0].source, "Error");
/// ```
pub fn read_str(input: &str) -> Result<TsDocument, FormatError> {
    let mut reader = Reader::from_str(input);
    let mut parser = DocumentParser::default();

    loop {
        match reader.read_event()? {
            Event::Start(element) => parser.start(&element)?,
            Event::Empty(element) => {
                parser.start(&element)?;
                parser.end(element.local_name().as_ref())?;
            }
            Event::End(element) => parser.end(element.local_name().as_ref())?,
            Event::Text(text) => parser.text(&text.unescape()?),
            Event::CData(data) => parser.text(&String::from_utf8_lossy(&data)),
            Event::Eof => break,
            _ => {}
        }
    }

    parser.finish()
}

/// Reads and parses a TS file.
pub fn read_file(path: &Path) -> Result<TsDocument, FormatError> {
    tracing::debug!("Reading translation file: {:?}", path);
    let content = std::fs::read_to_string(path)?;
    read_str(&content)
}

/// Message under construction.
#[derive(Debug, Default)]
struct PendingMessage {
    message: Message,
    /// `numerus="yes"` on `<message>`.
    numerus: bool,
    forms: Vec<String>,
    has_translation: bool,
}

/// Event-driven builder of a [`TsDocument`].
#[derive(Debug, Default)]
struct DocumentParser {
    document: Option<TsDocument>,
    context: Option<Context>,
    message: Option<PendingMessage>,
    /// Text of the element currently being captured.
    text: Option<String>,
    /// `</TS>` has been seen.
    closed: bool,
}

impl DocumentParser {
    fn start(&mut self, element: &BytesStart<'_>) -> Result<(), FormatError> {
        match element.local_name().as_ref() {
            names::ROOT => {
                if self.document.is_some() {
                    return Err(FormatError::MultipleRoots);
                }
                self.document = Some(TsDocument {
                    version: attribute(element, "version")?
                        .unwrap_or_else(|| TsDocument::DEFAULT_VERSION.to_string()),
                    language: attribute(element, "language")?.filter(|l| !l.is_empty()),
                    source_language: attribute(element, "sourcelanguage")?
                        .filter(|l| !l.is_empty()),
                    contexts: Vec::new(),
                });
            }
            names::CONTEXT => {
                if self.document.is_none() || self.context.is_some() || self.closed {
                    return Err(misplaced(names::CONTEXT, "TS"));
                }
                self.context = Some(Context::default());
            }
            names::NAME => {
                if self.context.is_some() && self.message.is_none() {
                    self.text = Some(String::new());
                }
            }
            names::MESSAGE => {
                if self.context.is_none() || self.message.is_some() {
                    return Err(misplaced(names::MESSAGE, "context"));
                }
                let numerus = attribute(element, "numerus")?.is_some_and(|v| v == "yes");
                self.message = Some(PendingMessage { numerus, ..PendingMessage::default() });
            }
            names::LOCATION => {
                let Some(pending) = self.message.as_mut() else {
                    return Err(misplaced(names::LOCATION, "message"));
                };
                let filename = attribute(element, "filename")?.unwrap_or_default();
                let line = attribute(element, "line")?.and_then(|line| parse_line(&line));
                pending.message.locations.push(SourceLocation { filename, line });
            }
            names::SOURCE | names::COMMENT | names::EXTRA_COMMENT | names::TRANSLATOR_COMMENT => {
                if self.message.is_some() {
                    self.text = Some(String::new());
                }
            }
            names::TRANSLATION => {
                let Some(pending) = self.message.as_mut() else {
                    return Err(misplaced(names::TRANSLATION, "message"));
                };
                let kind = attribute(element, "type")?;
                pending.message.status = Status::from_type_attribute(kind.as_deref())
                    .ok_or_else(|| FormatError::UnknownStatus(kind.unwrap_or_default()))?;
                pending.has_translation = true;
                if !pending.numerus {
                    self.text = Some(String::new());
                }
            }
            names::NUMERUS_FORM => match self.message.as_ref() {
                Some(pending) if pending.numerus => self.text = Some(String::new()),
                Some(_) => tracing::debug!("Ignoring <numerusform> in a non-numerus message"),
                None => return Err(misplaced(names::NUMERUS_FORM, "message")),
            },
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, name: &[u8]) -> Result<(), FormatError> {
        match name {
            names::NAME => {
                if let (Some(context), Some(text)) = (self.context.as_mut(), self.text.take()) {
                    context.name = text;
                }
            }
            names::SOURCE => {
                if let (Some(pending), Some(text)) = (self.message.as_mut(), self.text.take()) {
                    pending.message.source = text;
                }
            }
            names::COMMENT => {
                if let (Some(pending), Some(text)) = (self.message.as_mut(), self.text.take()) {
                    pending.message.disambiguation = non_empty(text);
                }
            }
            names::EXTRA_COMMENT => {
                if let (Some(pending), Some(text)) = (self.message.as_mut(), self.text.take()) {
                    pending.message.extra_comment = non_empty(text);
                }
            }
            names::TRANSLATOR_COMMENT => {
                if let (Some(pending), Some(text)) = (self.message.as_mut(), self.text.take()) {
                    pending.message.translator_comment = non_empty(text);
                }
            }
            names::TRANSLATION => {
                if let (Some(pending), Some(text)) = (self.message.as_mut(), self.text.take()) {
                    pending.message.translation = Translation::Plain(text);
                }
            }
            names::NUMERUS_FORM => {
                if let (Some(pending), Some(text)) = (self.message.as_mut(), self.text.take()) {
                    pending.forms.push(text);
                }
            }
            names::MESSAGE => {
                if let (Some(context), Some(pending)) = (self.context.as_mut(), self.message.take())
                {
                    context.messages.push(pending.into_message());
                }
            }
            names::CONTEXT => {
                if let (Some(document), Some(context)) =
                    (self.document.as_mut(), self.context.take())
                {
                    document.contexts.push(context);
                }
            }
            names::ROOT => self.closed = true,
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if let Some(buffer) = self.text.as_mut() {
            buffer.push_str(text);
        }
    }

    fn finish(self) -> Result<TsDocument, FormatError> {
        if self.message.is_some() {
            return Err(FormatError::UnexpectedEof("message"));
        }
        if self.context.is_some() {
            return Err(FormatError::UnexpectedEof("context"));
        }
        match self.document {
            Some(document) if self.closed => Ok(document),
            Some(_) => Err(FormatError::UnexpectedEof("TS")),
            None => Err(FormatError::MissingRoot),
        }
    }
}

impl PendingMessage {
    fn into_message(self) -> Message {
        let mut message = self.message;
        if self.numerus {
            message.translation = Translation::Plural(self.forms);
        }
        // A message without <translation> has never been translated.
        if !self.has_translation {
            message.status = Status::Unfinished;
        }
        message
    }
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>, FormatError> {
    let Some(attr) = element.try_get_attribute(name)? else {
        return Ok(None);
    };
    Ok(Some(attr.unescape_value().map(Cow::into_owned)?))
}

fn parse_line(value: &str) -> Option<LineNumber> {
    let line = value.parse().ok();
    if line.is_none() {
        tracing::debug!("Ignoring unparsable location line '{}'", value);
    }
    line
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

fn misplaced(element: &[u8], expected_parent: &'static str) -> FormatError {
    FormatError::Misplaced {
        element: String::from_utf8_lossy(element).into_owned(),
        expected_parent,
    }
}
