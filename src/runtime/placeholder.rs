//! Placeholder substitution (`%1`..`%99`, `%n`, `%L1` and `%Ln`).
//!
//! The `L` forms are accepted but formatted like the plain ones: no locale
//! digit grouping is applied.

use std::collections::BTreeSet;

/// Piece of a template string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    /// `%n` / `%Ln`.
    Count { raw: &'a str },
    /// `%1`..`%99` / `%L1`..`%L99`.
    Arg { number: u8, raw: &'a str },
}

/// Splits a template into literals and placeholders.
///
/// A `%` that does not start a placeholder stays part of the literal text.
fn tokenize(template: &str) -> Vec<Token<'_>> {
    let bytes = template.as_bytes();
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut index = 0;

    while index < bytes.len() {
        if bytes.get(index) != Some(&b'%') {
            index += 1;
            continue;
        }
        let rest = bytes.get(index + 1..).unwrap_or_default();
        let Some((kind, len)) = parse_placeholder(rest) else {
            index += 1;
            continue;
        };

        if literal_start < index {
            tokens.push(Token::Literal(template.get(literal_start..index).unwrap_or_default()));
        }
        let raw = template.get(index..=index + len).unwrap_or_default();
        tokens.push(match kind {
            Placeholder::Count => Token::Count { raw },
            Placeholder::Arg(number) => Token::Arg { number, raw },
        });
        index += len + 1;
        literal_start = index;
    }

    if literal_start < bytes.len() {
        tokens.push(Token::Literal(template.get(literal_start..).unwrap_or_default()));
    }
    tokens
}

/// Placeholder kind recognized after a `%`.
#[derive(Debug, Clone, Copy)]
enum Placeholder {
    Count,
    Arg(u8),
}

/// Parses the bytes following `%`; returns the kind and the number of bytes consumed.
fn parse_placeholder(rest: &[u8]) -> Option<(Placeholder, usize)> {
    let (prefix, rest) = match rest.first() {
        Some(b'L') => (1, rest.get(1..)?),
        _ => (0, rest),
    };

    match *rest.first()? {
        b'n' => Some((Placeholder::Count, prefix + 1)),
        first @ b'1'..=b'9' => {
            let first = first - b'0';
            match rest.get(1) {
                Some(second @ b'0'..=b'9') => {
                    Some((Placeholder::Arg(first * 10 + (second - b'0')), prefix + 2))
                }
                _ => Some((Placeholder::Arg(first), prefix + 1)),
            }
        }
        _ => None,
    }
}

/// Placeholder numbers used in a template, e.g. `{1, 2}` for `"%1 of %2"`.
#[must_use]
pub fn placeholder_numbers(template: &str) -> BTreeSet<u8> {
    numbers_in(&tokenize(template))
}

/// True when the template contains `%n` or `%Ln`.
#[must_use]
pub fn has_count_placeholder(template: &str) -> bool {
    tokenize(template).iter().any(|token| matches!(token, Token::Count { .. }))
}

/// Substitutes placeholders.
///
/// The distinct placeholder numbers present in the template are sorted and
/// receive `args` in that order, so `"%2 of %5"` with `["a", "b"]` yields
/// `"a of b"`. `%n` is replaced by `count` when given. `%Ln` and `%L1` are
/// substituted the same way, without locale digit grouping. Placeholders
/// without a value are kept verbatim.
///
/// # Examples
/// ```
/// use ts_catalog::runtime::substitute;
///
/// assert_eq!(substitute("Version %1", None, &["1.2"]), "Version 1.2");
/// assert_eq!(substitute("%n object(s)", Some(5), &[]), "5 object(s)");
/// assert_eq!(substitute("100% of %1", None, &[]), "100% of %1");
/// ```
#[must_use]
pub fn substitute(template: &str, count: Option<i64>, args: &[&str]) -> String {
    let tokens = tokenize(template);
    if tokens.iter().all(|token| matches!(token, Token::Literal(_))) {
        return template.to_string();
    }

    let numbers: Vec<u8> = numbers_in(&tokens).into_iter().collect();
    let mut output = String::with_capacity(template.len());
    for token in tokens {
        match token {
            Token::Literal(text) => output.push_str(text),
            Token::Count { raw } => match count {
                Some(count) => output.push_str(&count.to_string()),
                None => output.push_str(raw),
            },
            Token::Arg { number, raw } => {
                let value = numbers
                    .iter()
                    .position(|candidate| *candidate == number)
                    .and_then(|position| args.get(position));
                output.push_str(value.copied().unwrap_or(raw));
            }
        }
    }
    output
}

fn numbers_in(tokens: &[Token<'_>]) -> BTreeSet<u8> {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Arg { number, .. } => Some(*number),
            _ => None,
        })
        .collect()
}
