//! Error types for route generation

use thiserror::Error;

/// Result type alias for route generation
pub type RouteGenResult<T> = Result<T, RouteGenError>;

/// Error type for route generation
///
/// Malformed annotations and name collisions are never errors; they are
/// resolved inside the model builder.
#[derive(Error, Debug)]
pub enum RouteGenError {
    /// Invalid or incomplete generator configuration
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Descriptor set could not be decoded or has unresolved references
    #[error("invalid descriptor set: {0}")]
    DescriptorError(String),

    /// A file requested for generation is missing from the descriptor set
    #[error("file not found in descriptor set: {0}")]
    UnknownFile(String),

    /// Template failed to parse or render
    #[error("template error: {0}")]
    TemplateError(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    IoError(String),

    /// Plugin wire encoding/decoding error
    #[error("codec error: {0}")]
    CodecError(String),
}

impl RouteGenError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            RouteGenError::ConfigError(_) => 2,
            RouteGenError::DescriptorError(_) => 3,
            RouteGenError::UnknownFile(_) => 4,
            RouteGenError::TemplateError(_) => 5,
            RouteGenError::IoError(_) => 6,
            RouteGenError::CodecError(_) => 7,
        }
    }
}

impl From<std::io::Error> for RouteGenError {
    fn from(err: std::io::Error) -> Self {
        RouteGenError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for RouteGenError {
    fn from(err: toml::de::Error) -> Self {
        RouteGenError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for RouteGenError {
    fn from(err: serde_json::Error) -> Self {
        RouteGenError::CodecError(err.to_string())
    }
}
