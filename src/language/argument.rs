use super::position::{Position, Range};

/// One whitespace-delimited argument of an instruction. The value has
/// continuations removed and escapes applied; every character of the value
/// remembers the span of source it came from, so that sub-tokens (variable
/// names, reference components) can be located precisely even when the
/// argument was split across lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument<'i> {
    value: String,
    raw: &'i str,
    range: Range,
    spans: Vec<Range>,
    escaped: Vec<bool>,
}

impl<'i> Argument<'i> {
    pub(crate) fn new(
        value: String,
        raw: &'i str,
        range: Range,
        spans: Vec<Range>,
        escaped: Vec<bool>,
    ) -> Argument<'i> {
        Argument {
            value,
            raw,
            range,
            spans,
            escaped,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The argument exactly as it appears in the source.
    pub fn raw(&self) -> &'i str {
        self.raw
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn contains(&self, position: Position) -> bool {
        self.range
            .contains(position)
    }

    /// Was the value's character at `index` (a character index) written
    /// behind the escape character?
    pub fn is_escaped(&self, index: usize) -> bool {
        self.escaped
            .get(index)
            .copied()
            .unwrap_or(false)
    }

    /// The source range covered by the value's characters `start..end`
    /// (character indices, not bytes).
    pub fn sub_range(&self, start: usize, end: usize) -> Range {
        if start < end && end <= self.spans.len() {
            Range::new(self.spans[start].start, self.spans[end - 1].end)
        } else if start < self.spans.len() {
            Range::empty(self.spans[start].start)
        } else {
            Range::empty(self.range.end)
        }
    }
}
