//! Descriptor fixtures compiled from `.proto` text

use prost_reflect::DescriptorPool;
use routegen_core::GeneratorConfig;
use routegen_transport::decode_descriptor_set;
use std::fs;

pub const OPTIONS_PROTO: &str = r#"
syntax = "proto3";

package sphere.options;

import "google/protobuf/descriptor.proto";

message KeyValuePair {
  string key = 1;
  string value = 2;
}

message Options {
  string key = 1;
  repeated KeyValuePair extra = 2;
}

extend google.protobuf.MethodOptions {
  Options options = 501319;
}
"#;

pub const MENU_PROTO: &str = r#"
syntax = "proto3";

package bot.v1;

import "sphere/options/options.proto";

message UpdateCountRequest {}
message UpdateCountResponse {}
message ProcessMenuRequest {}
message ProcessMenuResponse {}

service MenuService {
  // test comment line1
  // test comment line2
  rpc UpdateCount(UpdateCountRequest) returns (UpdateCountResponse) {
    option (sphere.options.options) = {
      key: "bot"
      extra: [
        { key: "command", value: "start" },
        { key: "callback_query", value: "start" }
      ]
    };
  }

  rpc ProcessMenu(ProcessMenuRequest) returns (ProcessMenuResponse) {
    option (sphere.options.options) = {
      key: "bot"
      extra: [{ key: "callback_query", value: "menu_.*" }]
    };
  }
}
"#;

/// Compile `files` (path, body) together with the options proto
///
/// Returns an encoded `FileDescriptorSet` including imports and source info.
pub fn compile(files: &[(&str, &str)]) -> Vec<u8> {
    let dir = tempfile::tempdir().unwrap();
    let mut all = vec![("sphere/options/options.proto", OPTIONS_PROTO)];
    all.extend_from_slice(files);

    for (name, body) in &all {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    let mut compiler = protox::Compiler::new([dir.path()]).unwrap();
    compiler.include_imports(true).include_source_info(true);
    compiler.open_files(files.iter().map(|(name, _)| *name)).unwrap();
    compiler.encode_file_descriptor_set()
}

pub fn pool(files: &[(&str, &str)]) -> DescriptorPool {
    decode_descriptor_set(&compile(files)).unwrap()
}

pub fn menu_pool() -> DescriptorPool {
    pool(&[("bot/v1/menu.proto", MENU_PROTO)])
}

pub fn config(key: &str) -> GeneratorConfig {
    let mut config = GeneratorConfig::new();
    config.options_key = key.to_string();
    config.request_model = "crate::bot::Update".to_string();
    config.response_model = "crate::bot::Reply".to_string();
    config
}

pub fn config_with_extra(key: &str) -> GeneratorConfig {
    let mut config = config(key);
    config.extra_data_model = Some("crate::bot::Extra".to_string());
    config.extra_data_constructor = Some("crate::bot::Extra::from_pairs".to_string());
    config
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct RawFileDescriptorSet {
    #[prost(bytes = "vec", repeated, tag = "1")]
    file: Vec<Vec<u8>>,
}

/// Serialized `FileDescriptorProto`s, dependencies first, as protoc sends them
pub fn file_protos(files: &[(&str, &str)]) -> Vec<Vec<u8>> {
    use prost::Message;
    RawFileDescriptorSet::decode(compile(files).as_slice())
        .unwrap()
        .file
}
