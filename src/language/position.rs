//! Positions and ranges within a document, counted the way editors count
//! them: zero-origin lines, and columns measured in UTF-16 code units.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Position {
        Position { line, character }
    }
}

/// A half-open span of the source, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Range {
        Range { start, end }
    }

    pub fn empty(at: Position) -> Range {
        Range { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }

    pub fn contains_range(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Does any part of this range sit on the given line?
    pub fn spans_line(&self, line: u32) -> bool {
        self.start.line <= line && line <= self.end.line
    }
}

/// Converts byte offsets within a piece of text to positions and back. The
/// text need not be a whole document: `origin` is the position of its first
/// character, which lets an instruction locate its own sub-tokens without
/// reference to the rest of the file.
#[derive(Debug, Clone)]
pub struct LineIndex<'i> {
    text: &'i str,
    origin: Position,
    starts: Vec<usize>,
}

impl<'i> LineIndex<'i> {
    pub fn new(text: &'i str) -> LineIndex<'i> {
        LineIndex::with_origin(text, Position::default())
    }

    pub fn with_origin(text: &'i str, origin: Position) -> LineIndex<'i> {
        let bytes = text.as_bytes();
        let mut starts = vec![0];
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    starts.push(i + 1);
                }
                b'\n' => starts.push(i + 1),
                _ => {}
            }
            i += 1;
        }

        LineIndex {
            text,
            origin,
            starts,
        }
    }

    pub fn text(&self) -> &'i str {
        self.text
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn line_count(&self) -> u32 {
        self.starts
            .len() as u32
    }

    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(
            self.text
                .len(),
        );
        let index = match self
            .starts
            .binary_search(&offset)
        {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let start = self.starts[index];

        let width = self
            .text
            .get(start..offset)
            .map(utf16_width)
            .unwrap_or((offset - start) as u32);

        if index == 0 {
            Position::new(self.origin.line, self.origin.character + width)
        } else {
            Position::new(self.origin.line + index as u32, width)
        }
    }

    pub fn range_of(&self, start: usize, end: usize) -> Range {
        Range::new(self.position_at(start), self.position_at(end))
    }

    /// The byte offset of a position, or None if the position does not
    /// address a character boundary on an existing line. Positions past
    /// the end of a line's content are not clamped.
    pub fn offset_at(&self, position: Position) -> Option<usize> {
        let index = position
            .line
            .checked_sub(self.origin.line)? as usize;
        let start = *self
            .starts
            .get(index)?;

        let mut column = if index == 0 {
            position
                .character
                .checked_sub(self.origin.character)?
        } else {
            position.character
        };

        let end = self.content_end(index);
        let mut offset = start;

        for c in self.text[start..end].chars() {
            if column == 0 {
                return Some(offset);
            }
            let width = c.len_utf16() as u32;
            if column < width {
                return None;
            }
            column -= width;
            offset += c.len_utf8();
        }

        if column == 0 {
            Some(offset)
        } else {
            None
        }
    }

    /// Width, in UTF-16 code units, of the given line's content excluding
    /// its line break.
    pub fn line_length(&self, line: u32) -> Option<u32> {
        let index = line.checked_sub(self.origin.line)? as usize;
        let start = *self
            .starts
            .get(index)?;
        let end = self.content_end(index);
        Some(utf16_width(&self.text[start..end]))
    }

    fn content_end(&self, index: usize) -> usize {
        let start = self.starts[index];
        match self
            .starts
            .get(index + 1)
        {
            None => self
                .text
                .len(),
            Some(&next) => {
                let mut end = next;
                let bytes = self
                    .text
                    .as_bytes();
                if end > start && bytes[end - 1] == b'\n' {
                    end -= 1;
                }
                if end > start && bytes[end - 1] == b'\r' {
                    end -= 1;
                }
                end
            }
        }
    }
}

pub(crate) fn utf16_width(text: &str) -> u32 {
    text.chars()
        .map(|c| c.len_utf16() as u32)
        .sum()
}
