//! Descriptor pool construction
//!
//! `prost_types::FileDescriptorProto` drops unknown fields, which is where
//! protoc puts custom options. Files are therefore kept as raw bytes and
//! handed to `prost_reflect`, which resolves extensions lazily.

use prost::Message;
use prost_reflect::DescriptorPool;
use routegen_core::{RouteGenError, RouteGenResult};

#[derive(Clone, PartialEq, ::prost::Message)]
struct RawFileDescriptorSet {
    #[prost(bytes = "vec", repeated, tag = "1")]
    file: Vec<Vec<u8>>,
}

/// Build a pool from serialized `FileDescriptorProto`s.
///
/// Unresolved type references are fatal and reported as
/// [`RouteGenError::DescriptorError`].
pub fn pool_from_file_protos(files: &[Vec<u8>]) -> RouteGenResult<DescriptorPool> {
    let set = RawFileDescriptorSet {
        file: files.to_vec(),
    };
    decode_descriptor_set(&set.encode_to_vec())
}

/// Build a pool from a serialized `FileDescriptorSet`.
///
/// This is the format written by `protoc --include_imports --include_source_info -o`
/// and `buf build -o`.
pub fn decode_descriptor_set(bytes: &[u8]) -> RouteGenResult<DescriptorPool> {
    DescriptorPool::decode(bytes).map_err(|e| RouteGenError::DescriptorError(e.to_string()))
}
