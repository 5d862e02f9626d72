//! Extracting a declared name and value from ARG, ENV, and LABEL
//! arguments.

use super::arguments::{continuation, first_unescaped_equals, skip_continued_lines};
use crate::language::{Argument, LineIndex, Property, Range};

/// Build a Property from `name=value` in a single argument, or from the
/// legacy two-token `name value` form when a second argument is given.
pub fn extract_property(
    first: &Argument<'_>,
    second: Option<&Argument<'_>>,
    escape: char,
) -> Property {
    if let Some(second) = second {
        return Property {
            name: unescape_value(first.raw(), escape),
            name_range: first.range(),
            value: Some(unescape_value(second.raw(), escape)),
            value_range: Some(second.range()),
            raw_value: Some(
                second
                    .raw()
                    .to_string(),
            ),
            range: Range::new(
                first
                    .range()
                    .start,
                second
                    .range()
                    .end,
            ),
        };
    }

    let raw = first.raw();
    let equals = first_unescaped_equals(raw, escape).filter(|i| !is_quoted_name(raw, *i));

    match equals {
        Some(i) => {
            // character index to byte offset
            let offset = raw
                .char_indices()
                .nth(i)
                .map(|(offset, _)| offset)
                .unwrap_or(raw.len());
            let locator = LineIndex::with_origin(raw, first.range().start);
            let name = &raw[..offset];
            let value = &raw[offset + 1..];

            Property {
                name: unescape_value(name, escape),
                name_range: locator.range_of(0, offset),
                value: Some(unescape_value(value, escape)),
                value_range: Some(locator.range_of(offset + 1, raw.len())),
                raw_value: Some(value.to_string()),
                range: first.range(),
            }
        }
        None => Property {
            name: unescape_value(raw, escape),
            name_range: first.range(),
            value: None,
            value_range: None,
            raw_value: None,
            range: first.range(),
        },
    }
}

/// An argument that opens with a quote, where the `=` directly follows
/// the same quote, is a quoted name with no value.
fn is_quoted_name(raw: &str, equals: usize) -> bool {
    let mut chars = raw.chars();
    match chars.next() {
        Some(quote @ ('"' | '\'')) if equals > 0 => raw
            .chars()
            .nth(equals - 1)
            == Some(quote),
        _ => false,
    }
}

/// Remove quoting, continuations, and escapes from a declared value.
pub fn unescape_value(raw: &str, escape: char) -> String {
    let chars: Vec<char> = raw
        .chars()
        .collect();

    match quoted_bounds(&chars, escape) {
        Some((open, close)) => unescape_quoted(&chars[open + 1..close], escape),
        None => unescape_plain(&chars, escape),
    }
}

/// Indices of the first and last characters that are not part of a line
/// continuation, when they are a matching pair of quotes.
fn quoted_bounds(chars: &[char], escape: char) -> Option<(usize, usize)> {
    let mut first: Option<usize> = None;
    let mut last: Option<usize> = None;
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == escape {
            if let Some(next) = continuation(chars, i) {
                i = skip_continued_lines(chars, next);
                continue;
            }
        }
        first.get_or_insert(i);
        last = Some(i);
        i += 1;
    }

    let (open, close) = (first?, last?);
    match chars[open] {
        '"' | '\'' if close > open && chars[close] == chars[open] => Some((open, close)),
        _ => None,
    }
}

/// Inside quotes the escape character is literal, except that an escaped
/// line break is still a continuation.
fn unescape_quoted(chars: &[char], escape: char) -> String {
    let mut value = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == escape {
            match chars.get(i + 1) {
                Some('\r') if chars.get(i + 2) == Some(&'\n') => {
                    i += 3;
                    continue;
                }
                Some('\r') | Some('\n') => {
                    i += 2;
                    continue;
                }
                _ => {}
            }
        }
        value.push(c);
        i += 1;
    }

    value
}

fn unescape_plain(chars: &[char], escape: char) -> String {
    let mut value = String::new();
    let mut i = 0;
    // set after an unescaped blank; an escape clears it
    let mut separated = false;
    // length of the value up to its last character that isn't an
    // unescaped blank
    let mut content = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '#' && separated {
            // trailing comment
            value.truncate(content);
            break;
        }
        if c != escape {
            value.push(c);
            separated = c == ' ' || c == '\t';
            if !separated {
                content = value.len();
            }
            i += 1;
            continue;
        }

        if let Some(next) = continuation(chars, i) {
            // a comment line following the continuation goes too
            i = skip_continued_lines(chars, next);
            continue;
        }

        match chars.get(i + 1) {
            Some(&next) => {
                value.push(next);
                i += 2;
            }
            None => {
                // trailing lone escape is kept
                value.push(c);
                i += 1;
            }
        }
        separated = false;
        content = value.len();
    }

    value
}
