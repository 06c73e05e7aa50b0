use thiserror::Error;

use rowdelta_types::RowPath;

/// Errors produced when applying operations to an in-memory model view.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("no section at index {0}")]
    SectionOutOfBounds(usize),

    #[error("no row at path {0}")]
    RowOutOfBounds(RowPath),
}
