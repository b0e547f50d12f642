//! Request and response envelopes for the protoc plugin exchange

use crate::codec::{Codec, CodecError, ProstCodec};
use crate::descriptor::pool_from_file_protos;
use prost_reflect::DescriptorPool;
use prost_types::compiler::{CodeGeneratorResponse, Version, code_generator_response};
use routegen_core::RouteGenResult;

/// Wire form of `google.protobuf.compiler.CodeGeneratorRequest`
///
/// `proto_file` stays as raw bytes so custom options survive decoding.
#[derive(Clone, PartialEq, ::prost::Message)]
struct RawCodeGeneratorRequest {
    #[prost(string, repeated, tag = "1")]
    file_to_generate: Vec<String>,
    #[prost(string, optional, tag = "2")]
    parameter: Option<String>,
    #[prost(message, optional, tag = "3")]
    compiler_version: Option<Version>,
    #[prost(bytes = "vec", repeated, tag = "15")]
    proto_file: Vec<Vec<u8>>,
}

/// Version of the protoc that invoked the plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerVersion {
    pub major: i32,
    pub minor: i32,
    pub patch: i32,
    pub suffix: String,
}

impl From<Version> for CompilerVersion {
    fn from(v: Version) -> Self {
        Self {
            major: v.major.unwrap_or_default(),
            minor: v.minor.unwrap_or_default(),
            patch: v.patch.unwrap_or_default(),
            suffix: v.suffix.unwrap_or_default(),
        }
    }
}

impl From<&CompilerVersion> for Version {
    fn from(v: &CompilerVersion) -> Self {
        Self {
            major: Some(v.major),
            minor: Some(v.minor),
            patch: Some(v.patch),
            suffix: Some(v.suffix.clone()),
        }
    }
}

impl std::fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.suffix.is_empty() {
            write!(f, "-{}", self.suffix)?;
        }
        Ok(())
    }
}

/// Code generation request received from protoc
#[derive(Debug, Clone, Default)]
pub struct PluginRequest {
    /// Files protoc asked the plugin to generate, in command-line order
    pub files_to_generate: Vec<String>,

    /// Raw parameter string from `--route_opt` / `--route_out=<params>:`
    pub parameter: Option<String>,

    /// Version of the invoking protoc, when it reports one
    pub compiler_version: Option<CompilerVersion>,

    /// Serialized `FileDescriptorProto`s, dependencies first
    proto_files: Vec<Vec<u8>>,
}

impl PluginRequest {
    /// Create a new request
    pub fn new(files_to_generate: Vec<String>, proto_files: Vec<Vec<u8>>) -> Self {
        Self {
            files_to_generate,
            parameter: None,
            compiler_version: None,
            proto_files,
        }
    }

    /// Set the parameter string
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    /// Set the compiler version
    pub fn with_compiler_version(mut self, version: CompilerVersion) -> Self {
        self.compiler_version = Some(version);
        self
    }

    /// Serialized `FileDescriptorProto`s carried by the request
    pub fn proto_files(&self) -> &[Vec<u8>] {
        &self.proto_files
    }

    /// Parameter string, empty when absent
    pub fn parameter_str(&self) -> &str {
        self.parameter.as_deref().unwrap_or_default()
    }

    /// Resolve every carried file into a descriptor pool
    pub fn descriptor_pool(&self) -> RouteGenResult<DescriptorPool> {
        pool_from_file_protos(&self.proto_files)
    }

    /// Serialize to the protoc wire format
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let raw = RawCodeGeneratorRequest {
            file_to_generate: self.files_to_generate.clone(),
            parameter: self.parameter.clone(),
            compiler_version: self.compiler_version.as_ref().map(Version::from),
            proto_file: self.proto_files.clone(),
        };
        ProstCodec::new().encode(&raw)
    }

    /// Deserialize from the protoc wire format
    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        let raw: RawCodeGeneratorRequest = ProstCodec::strict().decode(data)?;
        Ok(Self {
            files_to_generate: raw.file_to_generate,
            parameter: raw.parameter,
            compiler_version: raw.compiler_version.map(CompilerVersion::from),
            proto_files: raw.proto_file,
        })
    }
}

/// One generated output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the protoc output directory
    pub name: String,

    /// File content
    pub content: String,
}

impl GeneratedFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Code generation response returned to protoc
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginResponse {
    /// Generated files
    pub files: Vec<GeneratedFile>,

    /// Error reported to protoc. Generation failures exit non-zero instead,
    /// so responses built here never set it.
    pub error: Option<String>,
}

impl PluginResponse {
    /// Create a success response
    pub fn success(files: Vec<GeneratedFile>) -> Self {
        Self { files, error: None }
    }

    /// Convert to the protoc message
    pub fn to_proto(&self) -> CodeGeneratorResponse {
        CodeGeneratorResponse {
            error: self.error.clone(),
            supported_features: Some(
                code_generator_response::Feature::Proto3Optional as u64,
            ),
            file: self
                .files
                .iter()
                .map(|f| code_generator_response::File {
                    name: Some(f.name.clone()),
                    insertion_point: None,
                    content: Some(f.content.clone()),
                    generated_code_info: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    /// Serialize to the protoc wire format
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        ProstCodec::new().encode(&self.to_proto())
    }

    /// Deserialize from the protoc wire format
    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        let proto: CodeGeneratorResponse = ProstCodec::new().decode(data)?;
        let files = proto
            .file
            .into_iter()
            .map(|f| {
                GeneratedFile::new(
                    f.name.unwrap_or_default(),
                    f.content.unwrap_or_default(),
                )
            })
            .collect();
        Ok(Self {
            files,
            error: proto.error,
        })
    }
}
