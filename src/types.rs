//! Core types used throughout the project.

use std::fmt;
use std::str::FromStr;

use serde::{
    Serialize,
    Serializer,
};

/// Line attribute of a `<location>`.
///
/// Translation tools write either absolute lines (`32`) or, in relative
/// mode, offsets from the previous location in the same file (`+3`, `-2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineNumber {
    /// 1-indexed line.
    Absolute(u32),
    /// Offset from the previous location of the same file.
    Relative(i32),
}

impl FromStr for LineNumber {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.starts_with(['+', '-']) {
            value.parse().map(Self::Relative)
        } else {
            value.parse().map(Self::Absolute)
        }
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(line) => write!(f, "{line}"),
            Self::Relative(offset) => write!(f, "{offset:+}"),
        }
    }
}

impl Serialize for LineNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absolute(line) => serializer.serialize_u32(*line),
            Self::Relative(_) => serializer.collect_str(self),
        }
    }
}

/// Provenance of a message in the application sources (`<location>`).
///
/// Informational only: lookups never depend on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: Option<LineNumber>,
}

impl SourceLocation {
    /// Location with an absolute line, if any.
    #[must_use]
    pub fn new(filename: impl Into<String>, line: Option<u32>) -> Self {
        Self { filename: filename.into(), line: line.map(LineNumber::Absolute) }
    }

    #[must_use]
    pub fn relative(filename: impl Into<String>, offset: i32) -> Self {
        Self { filename: filename.into(), line: Some(LineNumber::Relative(offset)) }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}", self.filename),
            None => f.write_str(&self.filename),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::with_line(SourceLocation::new("../src/about_dialog.cpp", Some(32)), "../src/about_dialog.cpp:32")]
    #[case::without_line(SourceLocation::new("main.cpp", None), "main.cpp")]
    #[case::relative_forward(SourceLocation::relative("main.cpp", 3), "main.cpp:+3")]
    #[case::relative_backward(SourceLocation::relative("main.cpp", -2), "main.cpp:-2")]
    fn test_display(#[case] location: SourceLocation, #[case] expected: &str) {
        assert_that!(location.to_string(), eq(expected));
    }

    #[rstest]
    #[case::absolute("32", LineNumber::Absolute(32))]
    #[case::forward("+3", LineNumber::Relative(3))]
    #[case::backward("-2", LineNumber::Relative(-2))]
    #[case::unchanged("+0", LineNumber::Relative(0))]
    fn test_parse_line_number(#[case] value: &str, #[case] expected: LineNumber) {
        let line: LineNumber = value.parse().unwrap();

        assert_that!(line, eq(expected));
        assert_that!(line.to_string(), eq(value));
    }

    #[rstest]
    #[case::garbage("abc")]
    #[case::sign_only("-")]
    fn test_parse_line_number_invalid(#[case] value: &str) {
        assert!(value.parse::<LineNumber>().is_err());
    }

    #[rstest]
    fn test_serialize_line_number() {
        let json = serde_json::to_value([LineNumber::Absolute(32), LineNumber::Relative(3)]).unwrap();

        assert_that!(json, eq(&serde_json::json!([32, "+3"])));
    }
}
