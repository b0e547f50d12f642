//! Codec trait and prost implementation

use routegen_core::RouteGenError;
use thiserror::Error;

/// Errors that can occur during encoding/decoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

impl From<prost::DecodeError> for CodecError {
    fn from(err: prost::DecodeError) -> Self {
        CodecError::Decoding(err.to_string())
    }
}

impl From<prost::EncodeError> for CodecError {
    fn from(err: prost::EncodeError) -> Self {
        CodecError::Encoding(err.to_string())
    }
}

impl From<CodecError> for RouteGenError {
    fn from(err: CodecError) -> Self {
        RouteGenError::CodecError(err.to_string())
    }
}

/// Trait for message encoding and decoding
pub trait Codec: Send + Sync {
    /// Encode a message to bytes
    fn encode<T: prost::Message>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Decode bytes to a message
    fn decode<T: prost::Message + Default>(&self, data: &[u8]) -> Result<T, CodecError>;
}

/// Protobuf binary codec using prost
#[derive(Debug, Clone, Copy, Default)]
pub struct ProstCodec {
    /// Reject empty input instead of decoding it as a default message
    reject_empty: bool,
}

impl ProstCodec {
    /// Create a new codec
    pub fn new() -> Self {
        Self {
            reject_empty: false,
        }
    }

    /// Create a codec that fails on empty input
    ///
    /// An empty stdin is a valid (empty) protobuf message, but for a protoc
    /// plugin it almost always means the binary was started by hand.
    pub fn strict() -> Self {
        Self { reject_empty: true }
    }
}

impl Codec for ProstCodec {
    fn encode<T: prost::Message>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::with_capacity(value.encoded_len());
        value.encode(&mut buf)?;
        Ok(buf)
    }

    fn decode<T: prost::Message + Default>(&self, data: &[u8]) -> Result<T, CodecError> {
        if self.reject_empty && data.is_empty() {
            return Err(CodecError::InvalidFormat(
                "empty input; expected a serialized message".to_string(),
            ));
        }
        Ok(T::decode(data)?)
    }
}
