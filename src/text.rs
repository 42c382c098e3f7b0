//! Literal text primitives the mixer is built on.
//! Every structural edit and every context resolution goes through
//! [`split_in_three`]; every substitution goes through [`replace_all`].

use crate::error::{Error, Result};

/// Counts non-overlapping occurrences of `token` in `text`.
///
/// An empty token never occurs.
pub fn count_occurrences(text: &str, token: &str) -> usize {
    if token.is_empty() {
        return 0;
    }
    text.matches(token).count()
}

/// Splits `text` at the two occurrences of `delimiter`.
///
/// # Arguments
/// * `text` - Text to split
/// * `delimiter` - Token expected exactly twice in `text`
///
/// # Returns
/// * `Result<(&str, &str, &str)>` - Text before the first delimiter, between
///   the delimiters, and after the second one. Delimiters are not included.
///
/// # Errors
/// * `Error::EmptyTokenError` if the delimiter is empty
/// * `Error::MalformedContextError` unless the delimiter occurs exactly twice
pub fn split_in_three<'a>(
    text: &'a str,
    delimiter: &str,
) -> Result<(&'a str, &'a str, &'a str)> {
    if delimiter.is_empty() {
        return Err(Error::EmptyTokenError);
    }

    let occurrences = count_occurrences(text, delimiter);
    if occurrences != 2 {
        return Err(Error::MalformedContextError {
            context: delimiter.to_string(),
            occurrences,
        });
    }

    let mut found = text.match_indices(delimiter).map(|(i, _)| i);
    let (first, second) = match (found.next(), found.next()) {
        (Some(first), Some(second)) => (first, second),
        _ => {
            return Err(Error::MalformedContextError {
                context: delimiter.to_string(),
                occurrences,
            })
        }
    };

    Ok((
        &text[..first],
        &text[first + delimiter.len()..second],
        &text[second + delimiter.len()..],
    ))
}

/// Replaces every literal occurrence of `marker` in `text` with `value`.
///
/// Scanning resumes right after the inserted value, so text introduced by
/// `value` is never matched again. An empty marker leaves `text` unchanged.
pub fn replace_all(text: &str, marker: &str, value: &str) -> String {
    if marker.is_empty() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(i) = rest.find(marker) {
        result.push_str(&rest[..i]);
        result.push_str(value);
        rest = &rest[i + marker.len()..];
    }
    result.push_str(rest);
    result
}
