//! TS document writer.

use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{
    BytesDecl,
    BytesEnd,
    BytesStart,
    BytesText,
    Event,
};

use super::FormatError;
use super::names;
use crate::catalog::{
    Context,
    Message,
    Translation,
    TsDocument,
};

/// Indentation used by the translation tools that produce TS files.
const INDENT_SIZE: usize = 4;

type XmlWriter = Writer<Vec<u8>>;

/// Serializes a document, preserving the order of contexts, messages,
/// locations and numerus forms.
pub fn write_string(document: &TsDocument) -> Result<String, FormatError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::from_escaped("TS")))?;

    let mut root = BytesStart::new("TS");
    root.push_attribute(("version", document.version.as_str()));
    if let Some(language) = &document.language {
        root.push_attribute(("language", language.as_str()));
    }
    if let Some(source_language) = &document.source_language {
        root.push_attribute(("sourcelanguage", source_language.as_str()));
    }
    writer.write_event(Event::Start(root))?;

    for context in &document.contexts {
        write_context(&mut writer, context)?;
    }

    writer.write_event(Event::End(BytesEnd::new("TS")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8(bytes)?)
}

/// Serializes a document into a file, replacing its contents.
pub fn write_file(document: &TsDocument, path: &Path) -> Result<(), FormatError> {
    tracing::debug!("Writing translation file: {:?}", path);
    let content = write_string(document)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn write_context(writer: &mut XmlWriter, context: &Context) -> Result<(), FormatError> {
    writer.write_event(Event::Start(BytesStart::new(tag(names::CONTEXT))))?;
    write_text_element(writer, names::NAME, &context.name)?;
    for message in &context.messages {
        write_message(writer, message)?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag(names::CONTEXT))))?;
    Ok(())
}

fn write_message(writer: &mut XmlWriter, message: &Message) -> Result<(), FormatError> {
    let mut start = BytesStart::new(tag(names::MESSAGE));
    if message.is_plural() {
        start.push_attribute(("numerus", "yes"));
    }
    writer.write_event(Event::Start(start))?;

    for location in &message.locations {
        let mut element = BytesStart::new(tag(names::LOCATION));
        element.push_attribute(("filename", location.filename.as_str()));
        if let Some(line) = location.line {
            element.push_attribute(("line", line.to_string().as_str()));
        }
        writer.write_event(Event::Empty(element))?;
    }

    write_text_element(writer, names::SOURCE, &message.source)?;
    if let Some(comment) = &message.disambiguation {
        write_text_element(writer, names::COMMENT, comment)?;
    }
    if let Some(comment) = &message.extra_comment {
        write_text_element(writer, names::EXTRA_COMMENT, comment)?;
    }
    if let Some(comment) = &message.translator_comment {
        write_text_element(writer, names::TRANSLATOR_COMMENT, comment)?;
    }

    let mut translation = BytesStart::new(tag(names::TRANSLATION));
    if let Some(kind) = message.status.type_attribute() {
        translation.push_attribute(("type", kind));
    }
    match &message.translation {
        Translation::Plain(text) => {
            writer.write_event(Event::Start(translation))?;
            write_text(writer, text)?;
            writer.write_event(Event::End(BytesEnd::new(tag(names::TRANSLATION))))?;
        }
        Translation::Plural(forms) => {
            writer.write_event(Event::Start(translation))?;
            for form in forms {
                write_text_element(writer, names::NUMERUS_FORM, form)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag(names::TRANSLATION))))?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new(tag(names::MESSAGE))))?;
    Ok(())
}

fn write_text_element(writer: &mut XmlWriter, name: &[u8], text: &str) -> Result<(), FormatError> {
    writer.write_event(Event::Start(BytesStart::new(tag(name))))?;
    write_text(writer, text)?;
    writer.write_event(Event::End(BytesEnd::new(tag(name))))?;
    Ok(())
}

/// Writes escaped text. An empty text event still keeps the closing tag on
/// the same line, so empty elements read back as empty strings.
fn write_text(writer: &mut XmlWriter, text: &str) -> Result<(), FormatError> {
    writer.write_event(Event::Text(BytesText::new(text)))?;
    Ok(())
}

/// Element names are ASCII constants.
fn tag(name: &[u8]) -> &str {
    std::str::from_utf8(name).unwrap_or_default()
}
