//! Parser for Dockerfile build recipes that keeps the exact source position
//! of every token, for tooling that needs to query and present the
//! document.

#[macro_use]
mod regex;

pub mod language;
pub mod parsing;

pub use parsing::parse;
