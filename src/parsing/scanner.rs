//! The character-level scanner that turns recipe text into top-level lines.
//!
//! The walk moves through four states:
//!
//! - `AwaitingDirective`: at the very start of the text. Only blanks are
//!   skipped; a `#` line here may be a parser directive. Anything else
//!   closes the directive window without consuming input.
//! - `AwaitingFirstLine`: the first line was a directive or a comment;
//!   its line break is consumed before ordinary scanning begins.
//! - `ScanningLines`: blank lines are skipped, `#` lines become comments,
//!   and anything else starts an instruction which is read through all of
//!   its continuation lines.
//! - `Done`: the end of the text has been reached.

use tracing::debug;

use crate::language::{
    Comment, DirectiveKind, Document, Instruction, LineIndex, ParserDirective,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingDirective,
    AwaitingFirstLine,
    ScanningLines,
    Done,
}

pub(crate) const DEFAULT_ESCAPE: char = '\\';

pub(crate) struct Scanner<'i> {
    source: &'i str,
    bytes: &'i [u8],
    index: LineIndex<'i>,
    offset: usize,
    state: State,
    escape: char,
    directive: Option<ParserDirective>,
    comments: Vec<Comment>,
    instructions: Vec<Instruction<'i>>,
}

impl<'i> Scanner<'i> {
    pub(crate) fn new(source: &'i str) -> Scanner<'i> {
        Scanner {
            source,
            bytes: source.as_bytes(),
            index: LineIndex::new(source),
            offset: 0,
            state: State::AwaitingDirective,
            escape: DEFAULT_ESCAPE,
            directive: None,
            comments: Vec::new(),
            instructions: Vec::new(),
        }
    }

    pub(crate) fn scan(mut self) -> Document<'i> {
        loop {
            self.state = match self.state {
                State::AwaitingDirective => self.read_directive(),
                State::AwaitingFirstLine => self.finish_first_line(),
                State::ScanningLines => self.read_line(),
                State::Done => break,
            };
        }

        Document::assemble(
            self.source,
            self.index,
            self.escape,
            self.directive,
            self.comments,
            self.instructions,
        )
    }

    fn len(&self) -> usize {
        self.bytes
            .len()
    }

    fn is_blank(&self, i: usize) -> bool {
        i < self.len() && (self.bytes[i] == b' ' || self.bytes[i] == b'\t')
    }

    fn is_line_break(&self, i: usize) -> bool {
        i < self.len() && (self.bytes[i] == b'\r' || self.bytes[i] == b'\n')
    }

    fn char_at(&self, i: usize) -> Option<char> {
        self.source[i..]
            .chars()
            .next()
    }

    /// Offset of the line break ending the line containing `i`, or the end
    /// of the text.
    fn line_end(&self, mut i: usize) -> usize {
        while i < self.len() && !self.is_line_break(i) {
            i += 1;
        }
        i
    }

    fn past_line_break(&self, i: usize) -> usize {
        if i + 1 < self.len() && self.bytes[i] == b'\r' && self.bytes[i + 1] == b'\n' {
            i + 2
        } else if self.is_line_break(i) {
            i + 1
        } else {
            i
        }
    }

    fn read_directive(&mut self) -> State {
        let mut i = 0;
        while self.is_blank(i) {
            i += 1;
        }

        if i >= self.len() {
            return State::Done;
        }
        if self.bytes[i] != b'#' {
            // a line break or an instruction; no directive is possible
            return State::ScanningLines;
        }

        let source = self.source;
        let end = self.line_end(i);
        let line = &source[i..end];
        let re = regex!(r"^#[ \t]*([^\s=]+)[ \t]*=[ \t]*(.*?)[ \t]*$");

        match re.captures(line) {
            Some(cap) => {
                // both groups always participate in a match
                let (Some(name), Some(value)) = (cap.get(1), cap.get(2)) else {
                    return State::ScanningLines;
                };
                let kind = DirectiveKind::parse(name.as_str());
                debug!(name = name.as_str(), value = value.as_str(), "parser directive");

                if kind == Some(DirectiveKind::Escape) {
                    match value.as_str() {
                        "`" => self.escape = '`',
                        "\\" => self.escape = '\\',
                        other => debug!(value = other, "ignoring invalid escape character"),
                    }
                }

                self.directive = Some(ParserDirective {
                    range: self
                        .index
                        .range_of(i, end),
                    name: name
                        .as_str()
                        .to_string(),
                    name_range: self
                        .index
                        .range_of(i + name.start(), i + name.end()),
                    value: value
                        .as_str()
                        .to_string(),
                    value_range: self
                        .index
                        .range_of(i + value.start(), i + value.end()),
                    kind,
                });
            }
            None => self.add_comment(i, end),
        }

        self.offset = end;
        State::AwaitingFirstLine
    }

    fn finish_first_line(&mut self) -> State {
        self.offset = self.past_line_break(self.offset);
        State::ScanningLines
    }

    fn read_line(&mut self) -> State {
        let mut i = self.offset;
        while self.is_blank(i) || self.is_line_break(i) {
            i += 1;
        }

        if i >= self.len() {
            self.offset = i;
            return State::Done;
        }

        if self.bytes[i] == b'#' {
            let end = self.line_end(i);
            self.add_comment(i, end);
            self.offset = end;
        } else {
            self.offset = self.read_instruction(i);
        }

        State::ScanningLines
    }

    fn add_comment(&mut self, start: usize, end: usize) {
        self.comments
            .push(Comment {
                range: self
                    .index
                    .range_of(start, end),
            });
    }

    /// If the escape character at `i` is followed, perhaps after blanks, by
    /// a line break, the offset just past that line break.
    fn continuation(&self, i: usize) -> Option<usize> {
        let mut j = i + self
            .escape
            .len_utf8();
        while self.is_blank(j) {
            j += 1;
        }
        if self.is_line_break(j) {
            Some(self.past_line_break(j))
        } else {
            None
        }
    }

    /// At the start of a continued line, record and skip comment lines and
    /// skip blank lines, returning the start of the next line with content.
    /// `last` is advanced past any comment recorded.
    fn skip_continued_lines(&mut self, mut i: usize, last: &mut usize) -> usize {
        loop {
            let mut j = i;
            while self.is_blank(j) {
                j += 1;
            }

            if j < self.len() && self.bytes[j] == b'#' {
                let end = self.line_end(j);
                self.add_comment(j, end);
                *last = end;
                if end >= self.len() {
                    return end;
                }
                i = self.past_line_break(end);
            } else if self.is_line_break(j) {
                i = self.past_line_break(j);
            } else {
                return i;
            }
        }
    }

    /// Read one instruction starting at `start`, returning the offset at
    /// which it ends.
    fn read_instruction(&mut self, start: usize) -> usize {
        let mut keyword = String::new();
        let mut keyword_end = start;
        let mut i = start;

        // the keyword, which ends at a blank, a line break, or the end
        let has_arguments = loop {
            let Some(c) = self.char_at(i) else {
                break false;
            };

            if c == self.escape {
                if let Some(next) = self.continuation(i) {
                    i = next;
                    continue;
                }
                keyword.push(c);
                i += c.len_utf8();
                keyword_end = i;
                continue;
            }

            match c {
                ' ' | '\t' => break true,
                '\r' | '\n' => break false,
                _ => {
                    keyword.push(c);
                    i += c.len_utf8();
                    keyword_end = i;
                }
            }
        };

        let mut arguments = None;
        let mut end = keyword_end;

        if has_arguments {
            while self.is_blank(i) {
                i += 1;
            }

            if i < self.len() && !self.is_line_break(i) {
                let first = i;
                let mut last = i;

                while let Some(c) = self.char_at(i) {
                    if c == self.escape {
                        if let Some(next) = self.continuation(i) {
                            last = i + c.len_utf8();
                            i = self.skip_continued_lines(next, &mut last);
                            continue;
                        }
                        i += c.len_utf8();
                        last = i;
                        if let Some(escaped) = self.char_at(i) {
                            i += escaped.len_utf8();
                            last = i;
                        }
                        continue;
                    }

                    match c {
                        '\r' | '\n' => break,
                        ' ' | '\t' => i += 1,
                        _ => {
                            i += c.len_utf8();
                            last = i;
                        }
                    }
                }

                arguments = Some((first - start, last - start));
                end = last;
            }
        }

        let source = self.source;
        let instruction = Instruction::new(
            &source[start..end],
            self.index
                .range_of(start, end),
            keyword,
            self.index
                .range_of(start, keyword_end),
            arguments,
            self.escape,
        );

        self.instructions
            .push(instruction);

        // resume after everything consumed, including trailing blanks
        i.max(end)
    }
}
