use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Structure not registered: {}", path.display())]
    StructureNotRegistered { path: PathBuf },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
