//! Shared fixtures for integration tests
//!
//! Compilation helpers come from the unit-test fixtures; only the richer
//! menu used by the binary tests lives here.

#![allow(dead_code, unused_imports)]

#[path = "../../src/test_support.rs"]
mod fixtures;

pub use fixtures::{compile as descriptor_set, file_protos};

pub const MENU_PROTO: &str = r#"
syntax = "proto3";

package bot.v1;

import "sphere/options/options.proto";

message UpdateCountRequest {}
message UpdateCountResponse {}
message ProcessMenuRequest {}
message ProcessMenuResponse {}
message WebRequest {}
message WebResponse {}

service MenuService {
  // test comment line1
  // test comment line2
  // test comment line3
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

  rpc Web(WebRequest) returns (WebResponse) {
    option (sphere.options.options) = {
      key: "http"
      extra: [{ key: "method", value: "GET" }, { key: "path", value: "/menu" }]
    };
  }

  rpc Internal(WebRequest) returns (WebResponse);
}
"#;

pub const PARAMETER: &str =
    "options_key=bot,request_model=crate::bot::Update,response_model=crate::bot::Reply";

pub fn menu_files() -> Vec<(&'static str, &'static str)> {
    vec![("bot/v1/menu.proto", MENU_PROTO)]
}
