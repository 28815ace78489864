//! Errors raised while running one operator command.
//!
//! Every variant is reported to the operator as a single `Error: ...` line and
//! the session carries on, except [`CommandError::Terminal`] and
//! [`CommandError::InputClosed`], which end the session instead.

use std::io;

use db::queries::export::ExportError;
use db::queries::import::ImportError;
use db::DbError;
use thiserror::Error;

/// Broad classes of command failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operator's input is malformed: bad CSV header, bad table name.
    Input,
    /// The store rejected a statement.
    Store,
    /// A file could not be opened, read or written.
    Resource,
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Db(#[from] DbError),

    /// Reading operator input or writing to the terminal failed.
    #[error("Terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    /// Input ended while a command was still prompting.
    #[error("Input ended")]
    InputClosed,
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::Import(ImportError::Db(_)) => ErrorKind::Store,
            CommandError::Import(e) if e.is_input_error() => ErrorKind::Input,
            CommandError::Import(_) => ErrorKind::Resource,
            CommandError::Export(ExportError::Db(_)) => ErrorKind::Store,
            CommandError::Export(ExportError::NoResultColumns) => ErrorKind::Input,
            CommandError::Export(_) => ErrorKind::Resource,
            CommandError::Db(_) => ErrorKind::Store,
            CommandError::Terminal(_) => ErrorKind::Resource,
            CommandError::InputClosed => ErrorKind::Input,
        }
    }
}
