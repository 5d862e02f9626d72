//! Types representing a parsed build recipe

mod argument;
mod document;
mod error;
mod flag;
mod instruction;
mod lines;
mod position;
mod property;
mod reference;
mod variable;

pub use argument::Argument;
pub use document::{Document, ImageScope, Resolver};
pub use error::LoadingError;
pub use flag::{Flag, FlagOption};
pub use instruction::{Instruction, Keyword};
pub use lines::{Comment, DirectiveKind, Line, ParserDirective};
pub use position::{LineIndex, Position, Range};
pub use property::Property;
pub use reference::{Component, FromInstruction, ImageReference};
pub use variable::{Modifier, Resolution, Tristate, Variable};
