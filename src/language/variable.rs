//! Variable references found inside instruction arguments, and the answers
//! the resolver gives about them.

use serde::Serialize;

use super::position::Range;

/// A three-way answer where "don't know" is distinct from "no".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tristate {
    Yes,
    No,
    Unknown,
}

/// What a variable name resolves to at a given line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Resolution {
    /// Declared with a value.
    Value(String),
    /// Declared, but without a value (`ARG name`).
    Valueless,
    /// No declaration is visible from the line asked about.
    Undeclared,
}

impl Resolution {
    pub fn is_declared(&self) -> bool {
        !matches!(self, Resolution::Undeclared)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Resolution::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// The operator following the `:` in a braced reference such as
/// `${name:-default}`. `${name:}` has an empty modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Modifier {
    Empty,
    Operator(char),
}

impl Modifier {
    pub fn operator(&self) -> Option<char> {
        match self {
            Modifier::Empty => None,
            Modifier::Operator(c) => Some(*c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub name_range: Range,
    pub range: Range,
    pub modifier: Option<Modifier>,
    pub modifier_range: Option<Range>,
    pub substitution_parameter: Option<String>,
    pub substitution_parameter_range: Option<Range>,
    pub defined: Tristate,
    pub build_variable: Tristate,
    pub text: String,
}

impl Variable {
    pub fn is_braced(&self) -> bool {
        self.text
            .starts_with("${")
    }
}
