//! Splitting an instruction's trailing text into arguments, and finding
//! variable references within an argument.

use crate::language::{Argument, LineIndex, Modifier, Position, Range, Tristate, Variable};

/// How whitespace separates arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Splitting {
    /// Any unescaped whitespace ends an argument.
    Whitespace,
    /// Whitespace inside single or double quotes does not.
    Quoted,
    /// Whitespace never does; the whole text is one argument.
    Whole,
}

pub fn split_arguments<'i>(text: &'i str, origin: Position, escape: char) -> Vec<Argument<'i>> {
    Tokenizer::new(text, origin, escape, Splitting::Whitespace).run()
}

pub(crate) fn split_declarations<'i>(
    text: &'i str,
    origin: Position,
    escape: char,
) -> Vec<Argument<'i>> {
    Tokenizer::new(text, origin, escape, Splitting::Quoted).run()
}

pub(crate) fn whole_argument<'i>(
    text: &'i str,
    origin: Position,
    escape: char,
) -> Option<Argument<'i>> {
    Tokenizer::new(text, origin, escape, Splitting::Whole)
        .run()
        .into_iter()
        .next()
}

/// If the escape character at `i` begins a line continuation (optionally
/// with blanks between it and the line break), the index just past the
/// line break.
pub(crate) fn continuation(chars: &[char], i: usize) -> Option<usize> {
    let mut j = i + 1;
    while j < chars.len() && (chars[j] == ' ' || chars[j] == '\t') {
        j += 1;
    }
    match chars.get(j) {
        Some('\r') if chars.get(j + 1) == Some(&'\n') => Some(j + 2),
        Some('\r') | Some('\n') => Some(j + 1),
        _ => None,
    }
}

/// Starting at the beginning of a continued line, skip over any lines that
/// are blank or whose first non-blank character is `#`, returning the
/// start of the first line with content.
pub(crate) fn skip_continued_lines(chars: &[char], mut i: usize) -> usize {
    loop {
        let mut j = i;
        while j < chars.len() && (chars[j] == ' ' || chars[j] == '\t') {
            j += 1;
        }

        match chars.get(j) {
            Some('#') => {
                while j < chars.len() && chars[j] != '\r' && chars[j] != '\n' {
                    j += 1;
                }
                if j >= chars.len() {
                    return j;
                }
                i = past_line_break(chars, j);
            }
            Some('\r') | Some('\n') => {
                i = past_line_break(chars, j);
            }
            _ => return i,
        }
    }
}

fn past_line_break(chars: &[char], j: usize) -> usize {
    if chars[j] == '\r' && chars.get(j + 1) == Some(&'\n') {
        j + 2
    } else {
        j + 1
    }
}

/// Is there an `=` in the text that isn't escaped?
pub(crate) fn has_unescaped_equals(text: &str, escape: char) -> bool {
    first_unescaped_equals(text, escape).is_some()
}

/// Character index of the first unescaped `=`.
pub(crate) fn first_unescaped_equals(text: &str, escape: char) -> Option<usize> {
    let mut chars = text
        .chars()
        .enumerate();
    while let Some((i, c)) = chars.next() {
        if c == escape {
            chars.next();
        } else if c == '=' {
            return Some(i);
        }
    }
    None
}

/// An argument being accumulated.
struct Pending {
    start: usize,
    end: usize,
    value: String,
    spans: Vec<Range>,
    escaped: Vec<bool>,
}

struct Tokenizer<'i> {
    text: &'i str,
    index: LineIndex<'i>,
    escape: char,
    splitting: Splitting,
    chars: Vec<char>,
    offsets: Vec<usize>,
}

impl<'i> Tokenizer<'i> {
    fn new(text: &'i str, origin: Position, escape: char, splitting: Splitting) -> Tokenizer<'i> {
        let (offsets, chars) = text
            .char_indices()
            .unzip();
        Tokenizer {
            text,
            index: LineIndex::with_origin(text, origin),
            escape,
            splitting,
            chars,
            offsets,
        }
    }

    fn offset(&self, i: usize) -> usize {
        self.offsets
            .get(i)
            .copied()
            .unwrap_or(
                self.text
                    .len(),
            )
    }

    /// Append `c` to the pending argument, attributing it to the source
    /// span `from..to` (character indices). `escaped` marks a character
    /// that was written behind the escape character.
    fn push(&self, pending: &mut Option<Pending>, c: char, from: usize, to: usize, escaped: bool) {
        let start = self.offset(from);
        let end = self.offset(to);
        let span = self
            .index
            .range_of(start, end);

        let argument = pending.get_or_insert_with(|| Pending {
            start,
            end,
            value: String::new(),
            spans: Vec::new(),
            escaped: Vec::new(),
        });
        argument
            .value
            .push(c);
        argument
            .spans
            .push(span);
        argument
            .escaped
            .push(escaped);
        argument.end = end;
    }

    fn finish(&self, pending: &mut Option<Pending>, arguments: &mut Vec<Argument<'i>>) {
        if let Some(argument) = pending.take() {
            let range = self
                .index
                .range_of(argument.start, argument.end);
            arguments.push(Argument::new(
                argument.value,
                &self.text[argument.start..argument.end],
                range,
                argument.spans,
                argument.escaped,
            ));
        }
    }

    fn run(self) -> Vec<Argument<'i>> {
        let mut arguments = Vec::new();
        let mut pending: Option<Pending> = None;
        let mut quote: Option<char> = None;
        let length = self
            .chars
            .len();
        let mut i = 0;

        while i < length {
            let c = self.chars[i];

            if c == self.escape {
                if let Some(next) = continuation(&self.chars, i) {
                    // elided, and does not end the current argument
                    i = skip_continued_lines(&self.chars, next);
                    continue;
                }
                match self
                    .chars
                    .get(i + 1)
                {
                    None => {
                        // dangling escape at the very end
                        self.push(&mut pending, c, i, i + 1, false);
                        i += 1;
                    }
                    Some('$') => {
                        // kept as written so the reference is not detected
                        self.push(&mut pending, c, i, i + 1, false);
                        self.push(&mut pending, '$', i + 1, i + 2, true);
                        i += 2;
                    }
                    Some(&next) => {
                        self.push(&mut pending, next, i, i + 2, true);
                        i += 2;
                    }
                }
                continue;
            }

            if c == '#' && pending.is_none() && quote.is_none() {
                // a comment opening a token runs to the end of the line
                while i < length && self.chars[i] != '\r' && self.chars[i] != '\n' {
                    i += 1;
                }
                continue;
            }

            let separates = match self.splitting {
                Splitting::Whitespace => is_separator(c),
                Splitting::Quoted => quote.is_none() && is_separator(c),
                Splitting::Whole => false,
            };

            if separates {
                self.finish(&mut pending, &mut arguments);
            } else {
                if self.splitting == Splitting::Quoted {
                    quote = match quote {
                        None if c == '"' || c == '\'' => Some(c),
                        Some(q) if q == c => None,
                        other => other,
                    };
                }
                self.push(&mut pending, c, i, i + 1, false);
            }
            i += 1;
        }

        self.finish(&mut pending, &mut arguments);
        arguments
    }
}

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || c == '\n'
}

fn is_name_character(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Find the `$name` and `${name...}` references in an argument's value. A
/// `$` the splitter marked as escaped is not a reference. References
/// nested in a substitution parameter are reported after the reference
/// that encloses them.
pub fn find_variables(argument: &Argument<'_>) -> Vec<Variable> {
    let chars: Vec<char> = argument
        .value()
        .chars()
        .collect();
    let mut variables = Vec::new();
    scan_variables(argument, &chars, 0, chars.len(), &mut variables);
    variables
}

fn scan_variables(
    argument: &Argument<'_>,
    chars: &[char],
    from: usize,
    to: usize,
    variables: &mut Vec<Variable>,
) {
    let mut k = from;

    while k < to {
        let c = chars[k];

        if c != '$' || argument.is_escaped(k) || k + 1 >= to {
            k += 1;
            continue;
        }

        let next = chars[k + 1];
        if next.is_whitespace() {
            k += 1;
        } else if next == '{' {
            match read_braced(argument, chars, k, to) {
                Some((variable, parameter, end)) => {
                    variables.push(variable);
                    if let Some((start, stop)) = parameter {
                        scan_variables(argument, chars, start, stop, variables);
                    }
                    k = end;
                }
                None => k += 1,
            }
        } else {
            let mut j = k + 1;
            while j < to && is_name_character(chars[j]) {
                j += 1;
            }
            if j == k + 1 {
                k += 1;
                continue;
            }
            variables.push(Variable {
                name: chars[k + 1..j]
                    .iter()
                    .collect(),
                name_range: argument.sub_range(k + 1, j),
                range: argument.sub_range(k, j),
                modifier: None,
                modifier_range: None,
                substitution_parameter: None,
                substitution_parameter_range: None,
                defined: Tristate::Unknown,
                build_variable: Tristate::Unknown,
                text: chars[k..j]
                    .iter()
                    .collect(),
            });
            k = j;
        }
    }
}

/// Where the walk through a braced reference is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Braced {
    /// Inside the name; `:` moves on, `}` closes.
    Name,
    /// Just after the first `:`; the next character is the operator.
    Modifier,
    /// After the operator; everything up to the balancing `}` is kept.
    Parameter,
}

type Braces = (Variable, Option<(usize, usize)>, usize);

/// Read `${...}` starting at the `$` at index `k`. Returns the variable,
/// the character bounds of its substitution parameter, and the index just
/// past the closing brace; None if the reference is never closed.
fn read_braced(argument: &Argument<'_>, chars: &[char], k: usize, to: usize) -> Option<Braces> {
    let mut state = Braced::Name;
    let mut name = String::new();
    let mut name_first: Option<usize> = None;
    let mut name_last = k + 2;
    let mut modifier: Option<(Modifier, Range)> = None;
    let mut parameter_start: Option<usize> = None;
    let mut depth = 0;
    let mut j = k + 2;

    let close = loop {
        if j >= to {
            return None;
        }
        let c = chars[j];

        match state {
            Braced::Name => match c {
                '}' => break j,
                ':' => state = Braced::Modifier,
                c if c.is_whitespace() => {}
                c => {
                    name.push(c);
                    name_first.get_or_insert(j);
                    name_last = j + 1;
                }
            },
            Braced::Modifier => match c {
                '}' => {
                    modifier = Some((Modifier::Empty, argument.sub_range(j, j)));
                    break j;
                }
                c if c.is_whitespace() => {}
                c => {
                    modifier = Some((Modifier::Operator(c), argument.sub_range(j, j + 1)));
                    parameter_start = Some(j + 1);
                    state = Braced::Parameter;
                }
            },
            Braced::Parameter => {
                if c == ':' && parameter_start == Some(j) && chars[j - 1] != ':' {
                    parameter_start = Some(j + 1);
                } else if c == '$' && j + 1 < to && chars[j + 1] == '{' {
                    depth += 1;
                    j += 1;
                } else if c == '}' {
                    if depth == 0 {
                        break j;
                    }
                    depth -= 1;
                }
            }
        }
        j += 1;
    };

    let name_range = match name_first {
        Some(first) => argument.sub_range(first, name_last),
        None => argument.sub_range(k + 2, k + 2),
    };

    let parameter = parameter_start.map(|start| (start, close));

    let variable = Variable {
        name,
        name_range,
        range: argument.sub_range(k, close + 1),
        modifier: modifier.map(|(m, _)| m),
        modifier_range: modifier.map(|(_, r)| r),
        substitution_parameter: parameter.map(|(start, stop)| {
            chars[start..stop]
                .iter()
                .collect()
        }),
        substitution_parameter_range: parameter.map(|(start, stop)| argument.sub_range(start, stop)),
        defined: Tristate::Unknown,
        build_variable: Tristate::Unknown,
        text: chars[k..=close]
            .iter()
            .collect(),
    };

    Some((variable, parameter, close + 1))
}
