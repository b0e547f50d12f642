//! routegen-transport - protoc plugin wire protocol
//!
//! This crate provides:
//! - [`Codec`] trait for encoding/decoding protobuf messages
//! - [`ProstCodec`] implementation backed by `prost`
//! - [`PluginRequest`] and [`PluginResponse`] envelopes for the
//!   `CodeGeneratorRequest` / `CodeGeneratorResponse` exchange with protoc
//! - descriptor pool construction that keeps custom options intact

mod codec;
mod descriptor;
mod envelope;

pub use codec::{Codec, CodecError, ProstCodec};
pub use descriptor::{decode_descriptor_set, pool_from_file_protos};
pub use envelope::{CompilerVersion, GeneratedFile, PluginRequest, PluginResponse};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Codec, CodecError, CompilerVersion, GeneratedFile, PluginRequest, PluginResponse,
        ProstCodec, decode_descriptor_set,
    };
}
