//! Instructions: a keyword followed by a trailing argument span, possibly
//! continued across several physical lines. Arguments, flags, properties,
//! and variables are derived from the recorded span on demand.

use std::fmt;

use serde::Serialize;

use super::argument::Argument;
use super::document::Resolver;
use super::flag::Flag;
use super::lines::Comment;
use super::position::{LineIndex, Position, Range};
use super::property::Property;
use super::reference::FromInstruction;
use super::variable::{Tristate, Variable};
use crate::parsing::arguments;
use crate::parsing::property::extract_property;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Keyword {
    Add,
    Arg,
    Cmd,
    Copy,
    Entrypoint,
    Env,
    Expose,
    From,
    Healthcheck,
    Label,
    Maintainer,
    Onbuild,
    Run,
    Shell,
    Stopsignal,
    User,
    Volume,
    Workdir,
    Unknown,
}

const KEYWORDS: [(Keyword, &str); 18] = [
    (Keyword::Add, "ADD"),
    (Keyword::Arg, "ARG"),
    (Keyword::Cmd, "CMD"),
    (Keyword::Copy, "COPY"),
    (Keyword::Entrypoint, "ENTRYPOINT"),
    (Keyword::Env, "ENV"),
    (Keyword::Expose, "EXPOSE"),
    (Keyword::From, "FROM"),
    (Keyword::Healthcheck, "HEALTHCHECK"),
    (Keyword::Label, "LABEL"),
    (Keyword::Maintainer, "MAINTAINER"),
    (Keyword::Onbuild, "ONBUILD"),
    (Keyword::Run, "RUN"),
    (Keyword::Shell, "SHELL"),
    (Keyword::Stopsignal, "STOPSIGNAL"),
    (Keyword::User, "USER"),
    (Keyword::Volume, "VOLUME"),
    (Keyword::Workdir, "WORKDIR"),
];

impl Keyword {
    /// Case-insensitive recognition of an instruction keyword.
    pub fn parse(text: &str) -> Keyword {
        KEYWORDS
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(text))
            .map(|(keyword, _)| *keyword)
            .unwrap_or(Keyword::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(keyword, _)| keyword == self)
            .map(|(_, name)| *name)
            .unwrap_or("")
    }

    pub fn supports_flags(&self) -> bool {
        matches!(
            self,
            Keyword::Add | Keyword::Copy | Keyword::From | Keyword::Run | Keyword::Healthcheck
        )
    }

    pub fn declares_properties(&self) -> bool {
        matches!(self, Keyword::Arg | Keyword::Env | Keyword::Label)
    }

    /// ARG and ENV declare names that later references can resolve to.
    pub fn declares_variables(&self) -> bool {
        matches!(self, Keyword::Arg | Keyword::Env)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction<'i> {
    source: &'i str,
    range: Range,
    keyword: String,
    keyword_range: Range,
    kind: Keyword,
    arguments: Option<(usize, usize)>,
    comments: Vec<Comment>,
    escape: char,
}

impl<'i> Instruction<'i> {
    /// `source` is the instruction's full extent and `arguments`, if any,
    /// the byte offsets of its trailing span within it.
    pub(crate) fn new(
        source: &'i str,
        range: Range,
        keyword: String,
        keyword_range: Range,
        arguments: Option<(usize, usize)>,
        escape: char,
    ) -> Instruction<'i> {
        let kind = Keyword::parse(&keyword);
        Instruction {
            source,
            range,
            keyword,
            keyword_range,
            kind,
            arguments,
            comments: Vec::new(),
            escape,
        }
    }

    pub(crate) fn attach_comment(&mut self, comment: Comment) {
        self.comments
            .push(comment);
    }

    /// The keyword as written, with any continuations inside it removed.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn kind(&self) -> Keyword {
        self.kind
    }

    pub fn keyword_range(&self) -> Range {
        self.keyword_range
    }

    pub fn range(&self) -> Range {
        self.range
    }

    /// The instruction exactly as written, embedded comments included.
    pub fn text(&self) -> &'i str {
        self.source
    }

    pub fn escape_character(&self) -> char {
        self.escape
    }

    /// Comments sitting on continued lines inside this instruction.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_stage(&self) -> bool {
        self.kind == Keyword::From
    }

    pub fn from(&self) -> Option<FromInstruction<'_, 'i>> {
        if self.is_stage() {
            Some(FromInstruction::new(self))
        } else {
            None
        }
    }

    fn locator(&self) -> LineIndex<'i> {
        LineIndex::with_origin(self.source, self.range.start)
    }

    fn arguments_text(&self) -> Option<(&'i str, Position)> {
        let (start, end) = self.arguments?;
        let origin = self
            .locator()
            .position_at(start);
        Some((&self.source[start..end], origin))
    }

    pub fn arguments_range(&self) -> Option<Range> {
        let (start, end) = self.arguments?;
        Some(
            self.locator()
                .range_of(start, end),
        )
    }

    /// The pieces of the argument span that are not embedded comment lines
    /// or blank continuation lines, one per physical line.
    pub fn argument_ranges(&self) -> Vec<Range> {
        match self.arguments {
            Some((start, end)) => {
                let locator = self.locator();
                argument_segments(self.source, start, end)
                    .into_iter()
                    .map(|(from, to)| locator.range_of(from, to))
                    .collect()
            }
            None => Vec::new(),
        }
    }

    /// The argument span with embedded comments and line continuations
    /// removed, as the build would see it.
    pub fn argument_content(&self) -> String {
        let Some((start, end)) = self.arguments else {
            return String::new();
        };

        let segments = argument_segments(self.source, start, end);
        let count = segments.len();
        let mut content = String::new();

        for (i, (from, to)) in segments
            .into_iter()
            .enumerate()
        {
            let piece = &self.source[from..to];
            if i + 1 < count {
                content.push_str(strip_continuation(piece, self.escape));
            } else {
                content.push_str(piece);
            }
        }

        content
    }

    pub fn arguments(&self) -> Vec<Argument<'i>> {
        match self.arguments_text() {
            Some((text, origin)) => arguments::split_arguments(text, origin, self.escape),
            None => Vec::new(),
        }
    }

    pub fn flags(&self) -> Vec<Flag> {
        if !self
            .kind
            .supports_flags()
        {
            return Vec::new();
        }

        self.arguments()
            .iter()
            .take_while(|argument| Flag::is_flag(argument))
            .map(Flag::parse)
            .collect()
    }

    /// Declarations made by ARG, ENV, and LABEL. Arguments are split
    /// respecting quotes here, so `ENV a="b c"` is a single declaration.
    pub fn properties(&self) -> Vec<Property> {
        if !self
            .kind
            .declares_properties()
        {
            return Vec::new();
        }
        let Some((text, origin)) = self.arguments_text() else {
            return Vec::new();
        };

        let declarations = arguments::split_declarations(text, origin, self.escape);

        if self.kind == Keyword::Env
            && declarations.len() > 1
            && !arguments::has_unescaped_equals(declarations[0].raw(), self.escape)
        {
            // legacy form, ENV name value with spaces
            let first = &declarations[0];
            let rest = self.whole_argument(
                declarations[1]
                    .range()
                    .start,
                declarations[declarations.len() - 1]
                    .range()
                    .end,
            );
            return vec![extract_property(first, rest.as_ref(), self.escape)];
        }

        declarations
            .iter()
            .map(|argument| extract_property(argument, None, self.escape))
            .collect()
    }

    fn whole_argument(&self, start: Position, end: Position) -> Option<Argument<'i>> {
        let locator = self.locator();
        let from = locator.offset_at(start)?;
        let to = locator.offset_at(end)?;
        arguments::whole_argument(&self.source[from..to], start, self.escape)
    }

    /// Variable references in the arguments, each classified by asking
    /// the resolver about the line the reference sits on.
    pub fn variables(&self, resolver: &dyn Resolver) -> Vec<Variable> {
        let mut variables = Vec::new();

        for argument in self.arguments() {
            for mut variable in arguments::find_variables(&argument) {
                let line = variable
                    .range
                    .start
                    .line;
                if line < resolver.line_count() {
                    variable.defined = if resolver
                        .resolve_variable(&variable.name, line)
                        .is_declared()
                    {
                        Tristate::Yes
                    } else {
                        Tristate::No
                    };
                    variable.build_variable = resolver.is_build_variable(&variable.name, line);
                }
                variables.push(variable);
            }
        }

        variables
    }
}

impl fmt::Display for Instruction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword)?;
        for argument in self.arguments() {
            write!(f, " {}", argument.value())?;
        }
        Ok(())
    }
}

/// Split the argument span `start..end` of `source` into per-line pieces,
/// dropping comment lines and blank lines after the first, and trimming
/// surrounding whitespace from each piece.
fn argument_segments(source: &str, start: usize, end: usize) -> Vec<(usize, usize)> {
    let bytes = source.as_bytes();
    let mut segments = Vec::new();
    let mut from = start;
    let mut first = true;

    while from <= end {
        let mut to = from;
        while to < end && bytes[to] != b'\r' && bytes[to] != b'\n' {
            to += 1;
        }

        let line = &source[from..to];
        let trimmed = line.trim_start_matches(is_blank);
        let leading = line.len() - trimmed.len();
        let trimmed = trimmed.trim_end_matches(is_blank);

        let is_comment = !first && trimmed.starts_with('#');
        if !trimmed.is_empty() && !is_comment {
            let begin = from + leading;
            segments.push((begin, begin + trimmed.len()));
        }
        first = false;

        if to >= end {
            break;
        }
        from = if bytes[to] == b'\r' && to + 1 < end && bytes[to + 1] == b'\n' {
            to + 2
        } else {
            to + 1
        };
    }

    segments
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn strip_continuation(piece: &str, escape: char) -> &str {
    piece
        .strip_suffix(escape)
        .unwrap_or(piece)
}
