//! parser for Dockerfile build recipes

use std::path::Path;
use tracing::debug;

use crate::language::{Document, LoadingError};

pub mod arguments;
pub mod property;
mod scanner;

/// Read a file and return an owned String. We pass that ownership back to the
/// caller so that the Document created by parse() below can borrow from it.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Parse text into a Document. Any input at all is accepted; what could
/// not be made sense of simply shows up as unknown instructions or empty
/// views.
pub fn parse(content: &str) -> Document<'_> {
    debug!(bytes = content.len(), "parsing");

    let document = scanner::Scanner::new(content).scan();

    let instructions = document
        .instructions()
        .len();
    let stages = document
        .froms()
        .len();
    debug!(
        "Found {} instruction{}, {} comment{}, {} stage{}",
        instructions,
        if instructions == 1 { "" } else { "s" },
        document
            .comments()
            .len(),
        if document
            .comments()
            .len()
            == 1
        {
            ""
        } else {
            "s"
        },
        stages,
        if stages == 1 { "" } else { "s" }
    );

    document
}
