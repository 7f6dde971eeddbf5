use std::path::PathBuf;

/// Convenience result type used across inkraster.
pub type InkResult<T> = Result<T, InkError>;

/// Top-level error taxonomy used by the rendering APIs.
///
/// Degenerate strokes and zero-extent bounding boxes are not errors: the former are skipped by the
/// draw-plan compiler and the latter are absorbed by an epsilon in the coordinate mapper.
#[derive(thiserror::Error, Debug)]
pub enum InkError {
    /// The input document path does not exist.
    #[error("input not found: {}", path.display())]
    InputNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The input document exists but could not be read.
    #[error("input unreadable: {}: {source}", path.display())]
    InputUnreadable {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The document could not be parsed into the sample model.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A render configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Canvas allocation, rasterization or encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// The vector document could not be finalized or written.
    #[error("vector export failed: {0}")]
    VectorExport(String),

    /// An output file could not be written.
    #[error("output write failed: {}: {source}", path.display())]
    OutputWrite {
        /// Destination path.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InkError {
    /// Build an [`InkError::MalformedDocument`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }

    /// Build an [`InkError::InvalidConfig`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Build an [`InkError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`InkError::VectorExport`] value.
    pub fn vector_export(msg: impl Into<String>) -> Self {
        Self::VectorExport(msg.into())
    }

    /// Classify an IO failure while opening an input document.
    pub fn input_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::InputNotFound { path }
        } else {
            Self::InputUnreadable { path, source }
        }
    }

    /// Build an [`InkError::OutputWrite`] value.
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
