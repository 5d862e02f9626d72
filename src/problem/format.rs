use owo_colors::OwoColorize;
use std::path::Path;
use docket::language::{LoadingError, Variable};

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    format!(
        "{}: {}:{}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    )
}

/// Format a warning about a variable reference that nothing declares.
/// Lines and columns are shown one-origin, the way editors and compilers
/// print them.
pub fn concise_undeclared_variable(filename: &Path, variable: &Variable) -> String {
    let start = variable
        .name_range
        .start;
    let problem = format!("variable '{}' is not declared", variable.name);

    format!(
        "{}: {}:{}:{} {}",
        "warning".bright_yellow(),
        filename.to_string_lossy(),
        start.line + 1,
        start.character + 1,
        problem.bold(),
    )
}
