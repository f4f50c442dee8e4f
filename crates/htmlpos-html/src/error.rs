//! Projection errors

/// Failure of one `parse` invocation. No output tree accompanies an error.
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    /// Input bytes are not text; raised before the engine runs
    #[error("The input needs to be a UTF-8 string: {0}")]
    InvalidInput(#[from] std::str::Utf8Error),

    /// The engine produced an element outside HTML, SVG and MathML
    #[error("Unknown tag namespace: {namespace}")]
    UnknownNamespace { namespace: String },
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
