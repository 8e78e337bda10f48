//! Translation completeness statistics.

use std::fmt;

use serde::Serialize;

use crate::catalog::{
    Message,
    Status,
    TsDocument,
};

/// Message counts by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    /// All messages, including removed ones.
    pub total: usize,
    pub finished: usize,
    pub unfinished: usize,
    /// `vanished` and `obsolete` messages.
    pub vanished: usize,
    /// Finished share of the active (finished + unfinished) messages, rounded down.
    pub percent_finished: usize,
}

impl Counts {
    fn from_messages<'a>(messages: impl IntoIterator<Item = &'a Message>) -> Self {
        let mut counts = Self::default();
        for message in messages {
            counts.total += 1;
            match message.status {
                Status::Finished => counts.finished += 1,
                Status::Unfinished => counts.unfinished += 1,
                Status::Vanished | Status::Obsolete => counts.vanished += 1,
            }
        }
        let active = counts.finished + counts.unfinished;
        counts.percent_finished =
            if active == 0 { 100 } else { counts.finished * 100 / active };
        counts
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.unfinished == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextReport {
    pub name: String,
    pub counts: Counts,
}

/// Completeness of one catalog, overall and per context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    pub language: Option<String>,
    pub counts: Counts,
    pub contexts: Vec<ContextReport>,
}

impl CompletenessReport {
    #[must_use]
    pub fn from_document(document: &TsDocument) -> Self {
        let contexts = document
            .contexts
            .iter()
            .map(|context| ContextReport {
                name: context.name.clone(),
                counts: Counts::from_messages(&context.messages),
            })
            .collect();

        Self {
            language: document.language.clone(),
            counts: Counts::from_messages(document.messages().map(|(_, message)| message)),
            contexts,
        }
    }
}

impl fmt::Display for CompletenessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = &self.counts;
        writeln!(
            f,
            "{}: {}/{} finished ({}%), {} unfinished, {} vanished",
            self.language.as_deref().unwrap_or("(unknown)"),
            counts.finished,
            counts.finished + counts.unfinished,
            counts.percent_finished,
            counts.unfinished,
            counts.vanished,
        )?;
        for context in self.contexts.iter().filter(|c| !c.counts.is_complete()) {
            writeln!(
                f,
                "  {}: {}/{} ({}%)",
                context.name,
                context.counts.finished,
                context.counts.finished + context.counts.unfinished,
                context.counts.percent_finished,
            )?;
        }
        Ok(())
    }
}
