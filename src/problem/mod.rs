// Program wide top-level problem reporting

mod format;
mod references;

// Re-export all public symbols
pub use format::*;
pub use references::*;
