use thiserror::Error;

use crate::format::FormatError;

/// Errors raised while building a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(
        "Duplicate entry in context '{context}': {source_text:?}{}",
        .disambiguation.as_ref().map(|d| format!(" ({d})")).unwrap_or_default()
    )]
    DuplicateEntry { context: String, source_text: String, disambiguation: Option<String> },

    #[error(transparent)]
    Format(#[from] FormatError),
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::plain(None, "Duplicate entry in context 'GroupPolicyTab': \"Link\"")]
    #[case::disambiguated(Some("verb"), "Duplicate entry in context 'GroupPolicyTab': \"Link\" (verb)")]
    fn test_duplicate_entry_message(#[case] disambiguation: Option<&str>, #[case] expected: &str) {
        let error = CatalogError::DuplicateEntry {
            context: "GroupPolicyTab".to_string(),
            source_text: "Link".to_string(),
            disambiguation: disambiguation.map(str::to_string),
        };

        assert_that!(error.to_string(), eq(expected));
    }
}
