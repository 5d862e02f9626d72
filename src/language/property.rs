use super::position::Range;

/// A declared name, with its value if one was given, from a single
/// argument of ARG, ENV, or LABEL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub name_range: Range,
    pub value: Option<String>,
    pub value_range: Option<Range>,
    /// The value as written, quotes and escapes intact.
    pub raw_value: Option<String>,
    pub range: Range,
}
