//! The kinds of top-level line a recipe is made of, other than
//! instructions.

use serde::Serialize;

use super::instruction::Instruction;
use super::position::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment {
    pub range: Range,
}

impl Comment {
    /// The comment's text after the leading `#`, trimmed.
    pub fn content<'i>(&self, document: &'i str) -> &'i str {
        let index = super::position::LineIndex::new(document);
        match (
            index.offset_at(self.range.start),
            index.offset_at(self.range.end),
        ) {
            (Some(start), Some(end)) => document[start..end]
                .trim_start_matches('#')
                .trim(),
            _ => "",
        }
    }
}

/// Parser directives known to the scanner. Only `escape` changes how the
/// rest of the document is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    Escape,
    Syntax,
    Check,
}

impl DirectiveKind {
    pub fn parse(name: &str) -> Option<DirectiveKind> {
        if name.eq_ignore_ascii_case("escape") {
            Some(DirectiveKind::Escape)
        } else if name.eq_ignore_ascii_case("syntax") {
            Some(DirectiveKind::Syntax)
        } else if name.eq_ignore_ascii_case("check") {
            Some(DirectiveKind::Check)
        } else {
            None
        }
    }
}

/// A `# name=value` line at the very top of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserDirective {
    pub range: Range,
    pub name: String,
    pub name_range: Range,
    pub value: String,
    pub value_range: Range,
    pub kind: Option<DirectiveKind>,
}

#[derive(Debug, Clone)]
pub enum Line<'i> {
    Directive(ParserDirective),
    Comment(Comment),
    Instruction(Instruction<'i>),
}

impl<'i> Line<'i> {
    pub fn range(&self) -> Range {
        match self {
            Line::Directive(directive) => directive.range,
            Line::Comment(comment) => comment.range,
            Line::Instruction(instruction) => instruction.range(),
        }
    }
}
