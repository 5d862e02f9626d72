//! The parsed document: its top-level lines in source order, the stages
//! FROM instructions divide it into, and variable resolution across them.

use super::instruction::{Instruction, Keyword};
use super::lines::{Comment, Line, ParserDirective};
use super::position::{LineIndex, Position};
use super::property::Property;
use super::variable::{Resolution, Tristate};

/// What an instruction needs to know about its surroundings in order to
/// classify the variables it references.
pub trait Resolver {
    /// The value `name` has on `line`, considering only declarations made
    /// on earlier lines of the same stage.
    fn resolve_variable(&self, name: &str, line: u32) -> Resolution;

    /// Whether `name`, as seen from `line`, is a build argument (ARG)
    /// rather than an environment variable (ENV).
    fn is_build_variable(&self, name: &str, line: u32) -> Tristate;

    /// ARG declarations made before the first FROM.
    fn initial_declarations(&self) -> Vec<Property>;

    fn line_count(&self) -> u32;
}

#[derive(Debug, Clone)]
pub struct Document<'i> {
    text: &'i str,
    index: LineIndex<'i>,
    escape: char,
    directive: Option<ParserDirective>,
    lines: Vec<Line<'i>>,
    comments: Vec<Comment>,
}

impl<'i> Document<'i> {
    /// Put the scanner's output together. Comments falling inside an
    /// instruction's range are attached to it rather than becoming lines
    /// of their own.
    pub(crate) fn assemble(
        text: &'i str,
        index: LineIndex<'i>,
        escape: char,
        directive: Option<ParserDirective>,
        comments: Vec<Comment>,
        mut instructions: Vec<Instruction<'i>>,
    ) -> Document<'i> {
        let mut standalone = Vec::new();

        for comment in &comments {
            let owner = instructions
                .iter_mut()
                .find(|instruction| {
                    instruction
                        .range()
                        .contains_range(&comment.range)
                });
            match owner {
                Some(instruction) => instruction.attach_comment(*comment),
                None => standalone.push(*comment),
            }
        }

        let mut lines = Vec::with_capacity(1 + standalone.len() + instructions.len());
        if let Some(directive) = &directive {
            lines.push(Line::Directive(directive.clone()));
        }

        let mut standalone = standalone
            .into_iter()
            .peekable();
        let mut instructions = instructions
            .into_iter()
            .peekable();

        loop {
            let next = match (standalone.peek(), instructions.peek()) {
                (Some(comment), Some(instruction)) => {
                    if comment.range.start < instruction.range().start {
                        standalone
                            .next()
                            .map(Line::Comment)
                    } else {
                        instructions
                            .next()
                            .map(Line::Instruction)
                    }
                }
                (Some(_), None) => standalone
                    .next()
                    .map(Line::Comment),
                (None, Some(_)) => instructions
                    .next()
                    .map(Line::Instruction),
                (None, None) => None,
            };
            match next {
                Some(line) => lines.push(line),
                None => break,
            }
        }

        Document {
            text,
            index,
            escape,
            directive,
            lines,
            comments,
        }
    }

    pub fn text(&self) -> &'i str {
        self.text
    }

    /// Top-level lines in source order. Comments embedded in a continued
    /// instruction belong to that instruction and are not listed here.
    pub fn lines(&self) -> &[Line<'i>] {
        &self.lines
    }

    /// Every comment in the document, embedded ones included, in source
    /// order.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn directive(&self) -> Option<&ParserDirective> {
        self.directive
            .as_ref()
    }

    pub fn escape_character(&self) -> char {
        self.escape
    }

    pub fn instructions(&self) -> Vec<&Instruction<'i>> {
        self.lines
            .iter()
            .filter_map(|line| match line {
                Line::Instruction(instruction) => Some(instruction),
                _ => None,
            })
            .collect()
    }

    pub fn instructions_of(&self, keyword: Keyword) -> Vec<&Instruction<'i>> {
        self.instructions()
            .into_iter()
            .filter(|instruction| instruction.kind() == keyword)
            .collect()
    }

    pub fn froms(&self) -> Vec<&Instruction<'i>> {
        self.instructions_of(Keyword::From)
    }

    pub fn args(&self) -> Vec<&Instruction<'i>> {
        self.instructions_of(Keyword::Arg)
    }

    pub fn envs(&self) -> Vec<&Instruction<'i>> {
        self.instructions_of(Keyword::Env)
    }

    /// Instructions preceding the first FROM.
    pub fn initial_instructions(&self) -> Vec<&Instruction<'i>> {
        self.instructions()
            .into_iter()
            .take_while(|instruction| !instruction.is_stage())
            .collect()
    }

    pub fn initial_declarations(&self) -> Vec<Property> {
        self.initial_instructions()
            .into_iter()
            .filter(|instruction| instruction.kind() == Keyword::Arg)
            .flat_map(|instruction| instruction.properties())
            .collect()
    }

    /// The document as a whole, acting as stage zero.
    pub fn image(&self) -> ImageScope<'_, 'i> {
        ImageScope {
            document: self,
            from: None,
            first: 0,
            last: None,
        }
    }

    /// One scope per FROM, each running up to the next FROM or the end of
    /// the document.
    pub fn stages(&self) -> Vec<ImageScope<'_, 'i>> {
        let froms = self.froms();
        let mut stages = Vec::with_capacity(froms.len());

        for (i, from) in froms
            .iter()
            .enumerate()
        {
            let last = froms
                .get(i + 1)
                .map(|next| {
                    next.range()
                        .start
                        .line
                });
            stages.push(ImageScope {
                document: self,
                from: Some(*from),
                first: from
                    .range()
                    .start
                    .line,
                last,
            });
        }

        stages
    }

    /// The scope a position lies in: the document itself when before the
    /// first FROM, otherwise the stage containing the position's line.
    /// None if the position is outside the document.
    pub fn containing_image(&self, position: Position) -> Option<ImageScope<'_, 'i>> {
        if !self.is_reachable(position) {
            return None;
        }

        self.stages()
            .into_iter()
            .rev()
            .find(|stage| stage.first <= position.line)
            .or_else(|| Some(self.image()))
    }

    /// Does the position address a line of the document, and a column no
    /// further than the end of that line's content?
    pub fn is_reachable(&self, position: Position) -> bool {
        match self
            .index
            .line_length(position.line)
        {
            Some(length) => position.character <= length,
            None => false,
        }
    }

    pub fn position_at(&self, offset: usize) -> Position {
        self.index
            .position_at(offset)
    }

    pub fn offset_at(&self, position: Position) -> Option<usize> {
        self.index
            .offset_at(position)
    }

    /// The FROM instruction whose range covers `line`, if any.
    fn stage_header_at(&self, line: u32) -> Option<&Instruction<'i>> {
        self.froms()
            .into_iter()
            .find(|from| {
                from.range()
                    .spans_line(line)
            })
    }

    /// ARG and ENV instructions visible from `line`: those in the same
    /// scope that end before it, nearest first. An instruction continued
    /// onto `line` does not see its own declarations.
    fn declarations_before(&self, line: u32) -> Vec<&Instruction<'i>> {
        let scope = self
            .containing_line(line)
            .unwrap_or_else(|| self.image());
        let mut declarations: Vec<&Instruction<'i>> = scope
            .instructions()
            .into_iter()
            .filter(|instruction| {
                instruction
                    .kind()
                    .declares_variables()
                    && instruction
                        .range()
                        .end
                        .line
                        < line
            })
            .collect();
        declarations.reverse();
        declarations
    }

    /// The scope containing a line, without regard to column.
    fn containing_line(&self, line: u32) -> Option<ImageScope<'_, 'i>> {
        self.stages()
            .into_iter()
            .rev()
            .find(|stage| stage.first <= line)
    }

    pub fn resolve_variable(&self, name: &str, line: u32) -> Resolution {
        let initial = self.initial_declarations();

        if self
            .stage_header_at(line)
            .is_some()
        {
            return match initial
                .iter()
                .rev()
                .find(|property| property.name == name)
            {
                Some(property) => resolution_of(property),
                None => Resolution::Undeclared,
            };
        }

        let in_stage = self
            .containing_line(line)
            .is_some();

        for instruction in self.declarations_before(line) {
            let properties = instruction.properties();
            let Some(property) = properties
                .iter()
                .rev()
                .find(|property| property.name == name)
            else {
                continue;
            };

            if property
                .value
                .is_none()
                && in_stage
                && instruction.kind() == Keyword::Arg
            {
                // a bare ARG in a stage takes the default declared before
                // the first FROM
                if let Some(inherited) = initial
                    .iter()
                    .rev()
                    .find(|initial| initial.name == name)
                {
                    return resolution_of(inherited);
                }
            }
            return resolution_of(property);
        }

        Resolution::Undeclared
    }

    pub fn is_build_variable(&self, name: &str, line: u32) -> Tristate {
        if self
            .stage_header_at(line)
            .is_some()
        {
            let declared = self
                .initial_declarations()
                .iter()
                .any(|property| property.name == name);
            return if declared {
                Tristate::Yes
            } else {
                Tristate::Unknown
            };
        }

        let declarations = self.declarations_before(line);
        let declares = |keyword: Keyword| {
            declarations
                .iter()
                .filter(|instruction| instruction.kind() == keyword)
                .any(|instruction| {
                    instruction
                        .properties()
                        .iter()
                        .any(|property| property.name == name)
                })
        };

        if declares(Keyword::Env) {
            Tristate::No
        } else if declares(Keyword::Arg) {
            Tristate::Yes
        } else {
            Tristate::Unknown
        }
    }

    /// Names of every variable declared and visible from `line`, nearest
    /// declaration first, each name once.
    pub fn available_variables(&self, line: u32) -> Vec<String> {
        let properties: Vec<Property> = if self
            .stage_header_at(line)
            .is_some()
        {
            let mut initial = self.initial_declarations();
            initial.reverse();
            initial
        } else {
            self.declarations_before(line)
                .into_iter()
                .flat_map(|instruction| {
                    let mut properties = instruction.properties();
                    properties.reverse();
                    properties
                })
                .collect()
        };

        let mut names: Vec<String> = Vec::new();
        for property in properties {
            if !names.contains(&property.name) {
                names.push(property.name);
            }
        }
        names
    }
}

fn resolution_of(property: &Property) -> Resolution {
    match &property.value {
        Some(value) => Resolution::Value(value.clone()),
        None => Resolution::Valueless,
    }
}

impl Resolver for Document<'_> {
    fn resolve_variable(&self, name: &str, line: u32) -> Resolution {
        Document::resolve_variable(self, name, line)
    }

    fn is_build_variable(&self, name: &str, line: u32) -> Tristate {
        Document::is_build_variable(self, name, line)
    }

    fn initial_declarations(&self) -> Vec<Property> {
        Document::initial_declarations(self)
    }

    fn line_count(&self) -> u32 {
        self.index
            .line_count()
    }
}

/// A region of the document: either the whole document (stage zero) or
/// one stage, from its FROM line up to the next FROM.
#[derive(Debug, Clone, Copy)]
pub struct ImageScope<'d, 'i> {
    document: &'d Document<'i>,
    from: Option<&'d Instruction<'i>>,
    first: u32,
    last: Option<u32>,
}

impl<'d, 'i> ImageScope<'d, 'i> {
    pub fn is_document(&self) -> bool {
        self.from
            .is_none()
    }

    /// The FROM instruction opening this stage.
    pub fn from(&self) -> Option<&'d Instruction<'i>> {
        self.from
    }

    pub fn stage_name(&self) -> Option<String> {
        self.from?
            .from()?
            .stage_name()
    }

    fn covers(&self, line: u32) -> bool {
        line >= self.first
            && match self.last {
                Some(last) => line < last,
                None => true,
            }
    }

    pub fn contains(&self, position: Position) -> bool {
        self.document
            .is_reachable(position)
            && self.covers(position.line)
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.document
            .comments()
            .iter()
            .filter(|comment| {
                self.covers(
                    comment
                        .range
                        .start
                        .line,
                )
            })
            .copied()
            .collect()
    }

    pub fn instructions(&self) -> Vec<&'d Instruction<'i>> {
        self.document
            .instructions()
            .into_iter()
            .filter(|instruction| {
                self.covers(
                    instruction
                        .range()
                        .start
                        .line,
                )
            })
            .collect()
    }

    pub fn args(&self) -> Vec<&'d Instruction<'i>> {
        self.instructions()
            .into_iter()
            .filter(|instruction| instruction.kind() == Keyword::Arg)
            .collect()
    }

    pub fn envs(&self) -> Vec<&'d Instruction<'i>> {
        self.instructions()
            .into_iter()
            .filter(|instruction| instruction.kind() == Keyword::Env)
            .collect()
    }

    /// Variables visible from `line`. For the document scope this is
    /// whatever the stage containing `line` sees; for a stage, nothing is
    /// visible from lines outside it.
    pub fn available_variables(&self, line: u32) -> Vec<String> {
        if self.is_document() || self.covers(line) {
            self.document
                .available_variables(line)
        } else {
            Vec::new()
        }
    }
}
