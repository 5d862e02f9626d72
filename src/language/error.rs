use std::{fmt, path::Path};

/// Failure to read a recipe from disk. Parsing itself never fails; this
/// is the only error the library reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self
            .details
            .is_empty()
        {
            write!(f, "{}: {}", self.problem, self.filename.display())
        } else {
            write!(
                f,
                "{}: {} ({})",
                self.problem,
                self.filename
                    .display(),
                self.details
            )
        }
    }
}

impl std::error::Error for LoadingError<'_> {}
