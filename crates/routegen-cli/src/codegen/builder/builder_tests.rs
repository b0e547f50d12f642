#![allow(non_snake_case)]

use super::*;
use crate::test_support::{self, MENU_PROTO};

fn collision_proto(package: &str) -> String {
    format!(
        r#"
syntax = "proto3";
package {package};
import "sphere/options/options.proto";
message Req {{}}
message Resp {{}}
service MenuService {{
  rpc UpdateCount(Req) returns (Resp) {{
    option (sphere.options.options) = {{ key: "bot" }};
  }}
}}
"#
    )
}

const MIXED_PROTO: &str = r#"
syntax = "proto3";

package mixed.v1;

import "sphere/options/options.proto";

message Req {}
message Resp {}

service HttpOnly {
  rpc Get(Req) returns (Resp) {
    option (sphere.options.options) = { key: "http" };
  }
}

service Mixed {
  rpc Plain(Req) returns (Resp);
  rpc Web(Req) returns (Resp) {
    option (sphere.options.options) = { key: "http" };
  }
  rpc Chat(Req) returns (Resp) {
    option (sphere.options.options) = {
      key: "bot"
      extra: [
        { key: "command", value: "first" },
        { key: "command", value: "second" }
      ]
    };
  }
  rpc Watch(Req) returns (stream Resp) {
    option (sphere.options.options) = { key: "bot" };
  }
}

service Silent {
  rpc Ping(Req) returns (Resp);
}
"#;

fn mixed_pool() -> DescriptorPool {
    test_support::pool(&[("mixed/v1/mixed.proto", MIXED_PROTO)])
}

fn build_for(pool: &DescriptorPool, key: &str) -> Vec<ServiceDesc> {
    let config = test_support::config(key);
    ModelBuilder::new(pool, &config)
        .unwrap()
        .build(&mut NameDeduper::new())
        .unwrap()
}

fn method_names(service: &ServiceDesc) -> Vec<&str> {
    service.methods().iter().map(|m| m.name.as_str()).collect()
}

#[test]
fn ModelBuilder___menu_service___yields_one_group_in_declaration_order() {
    let pool = test_support::menu_pool();

    let services = build_for(&pool, "bot");

    assert_eq!(services.len(), 1);
    let menu = &services[0];
    assert_eq!(menu.options_key, "bot");
    assert_eq!(menu.service_type, "MenuService");
    assert_eq!(menu.service_name, "bot.v1.MenuService");
    assert_eq!(method_names(menu), vec!["UpdateCount", "ProcessMenu"]);
    assert!(menu.methods().iter().all(|m| m.dedup_number == 0));
    assert!(menu.method("UpdateCount").is_some());
    assert!(menu.method("ProcessMenu").is_some());
}

#[test]
fn ModelBuilder___menu_service___preserves_extra() {
    let pool = test_support::menu_pool();

    let services = build_for(&pool, "bot");

    let update = services[0].method("UpdateCount").unwrap();
    assert_eq!(update.extra.len(), 2);
    assert_eq!(update.extra["command"], "start");
    assert_eq!(update.extra["callback_query"], "start");
    let process = services[0].method("ProcessMenu").unwrap();
    assert_eq!(process.extra["callback_query"], "menu_.*");
}

#[test]
fn ModelBuilder___menu_service___fills_names_and_types() {
    let pool = test_support::menu_pool();

    let services = build_for(&pool, "bot");

    let update = services[0].method("UpdateCount").unwrap();
    assert_eq!(update.original_name, "MenuServiceUpdateCount");
    assert_eq!(update.request_type, "UpdateCountRequest");
    assert_eq!(update.request_full_name, "bot.v1.UpdateCountRequest");
    assert_eq!(update.reply_type, "UpdateCountResponse");
    assert_eq!(update.reply_full_name, "bot.v1.UpdateCountResponse");
}

#[test]
fn ModelBuilder___leading_comment___kept_verbatim() {
    let pool = test_support::menu_pool();

    let services = build_for(&pool, "bot");

    assert_eq!(
        services[0].method("UpdateCount").unwrap().comment,
        " test comment line1\n test comment line2\n"
    );
    assert_eq!(services[0].method("ProcessMenu").unwrap().comment, "");
}

#[test]
fn ModelBuilder___key_partitioning___never_mixes_keys() {
    let pool = mixed_pool();

    let bot = build_for(&pool, "bot");
    let http = build_for(&pool, "http");

    let bot_methods: Vec<_> = bot.iter().flat_map(method_names).collect();
    let http_methods: Vec<_> = http.iter().flat_map(method_names).collect();
    assert_eq!(bot_methods, vec!["Chat", "Watch"]);
    assert_eq!(http_methods, vec!["Get", "Web"]);
}

#[test]
fn ModelBuilder___unannotated_methods___never_appear() {
    let pool = mixed_pool();

    for key in ["bot", "http", "grpc"] {
        for service in build_for(&pool, key) {
            assert!(service.method("Plain").is_none());
            assert!(service.method("Ping").is_none());
        }
    }
}

#[test]
fn ModelBuilder___service_without_matches___is_omitted() {
    let pool = mixed_pool();

    let bot = build_for(&pool, "bot");

    let services: Vec<_> = bot.iter().map(|s| s.service_type.as_str()).collect();
    assert_eq!(services, vec!["Mixed"]);
    assert!(bot.iter().all(|s| !s.is_empty()));
}

#[test]
fn ModelBuilder___unused_key___yields_nothing() {
    let pool = mixed_pool();

    assert!(build_for(&pool, "grpc").is_empty());
}

#[test]
fn ModelBuilder___duplicate_extra_key___last_occurrence_wins() {
    let pool = mixed_pool();

    let bot = build_for(&pool, "bot");

    let chat = bot[0].method("Chat").unwrap();
    assert_eq!(chat.extra.len(), 1);
    assert_eq!(chat.extra["command"], "second");
}

#[test]
fn ModelBuilder___streaming_method___included_with_flags() {
    let pool = mixed_pool();

    let bot = build_for(&pool, "bot");

    let watch = bot[0].method("Watch").unwrap();
    assert!(watch.server_streaming);
    assert!(!watch.client_streaming);
}

#[test]
fn ModelBuilder___every_group___has_consistent_method_set() {
    let pool = mixed_pool();

    for key in ["bot", "http"] {
        for service in build_for(&pool, key) {
            assert!(service.is_consistent());
            assert_eq!(service.method_set().len(), service.methods().len());
            for method in service.methods() {
                assert_eq!(service.method_set().get(&method.name), Some(method));
            }
        }
    }
}

#[test]
fn ModelBuilder___every_group___shares_one_package() {
    let pool = mixed_pool();
    let config = test_support::config("http");
    let builder = ModelBuilder::new(&pool, &config).unwrap();

    let services = builder.build(&mut NameDeduper::new()).unwrap();

    assert_eq!(services.len(), 2);
    for service in &services {
        assert!(Arc::ptr_eq(service.package(), builder.package()));
    }
}

#[test]
fn ModelBuilder___colliding_names___numbered_in_file_order() {
    let a = collision_proto("a.v1");
    let b = collision_proto("b.v1");
    let c = collision_proto("c.v1");
    let pool = test_support::pool(&[
        ("a/v1/menu.proto", a.as_str()),
        ("b/v1/menu.proto", b.as_str()),
        ("c/v1/menu.proto", c.as_str()),
    ]);
    let config = test_support::config("bot");
    let builder = ModelBuilder::new(&pool, &config).unwrap();
    let files: Vec<String> = ["a/v1/menu.proto", "b/v1/menu.proto", "c/v1/menu.proto"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let routes = builder.build_files(&files, &mut NameDeduper::new()).unwrap();

    let numbers: Vec<(String, u32)> = routes
        .iter()
        .map(|r| {
            let m = &r.services[0].methods()[0];
            (m.original_name.clone(), m.dedup_number)
        })
        .collect();
    assert_eq!(
        numbers,
        vec![
            ("MenuServiceUpdateCount".to_string(), 0),
            ("MenuServiceUpdateCount".to_string(), 1),
            ("MenuServiceUpdateCount".to_string(), 2),
        ]
    );
}

#[test]
fn ModelBuilder___services_differing_only_in_case___numbered_apart() {
    let source = r#"
syntax = "proto3";
package p.v1;
import "sphere/options/options.proto";
message Req {}
message Resp {}
service menuService {
  rpc UpdateCount(Req) returns (Resp) { option (sphere.options.options) = { key: "bot" }; }
}
service MenuService {
  rpc UpdateCount(Req) returns (Resp) { option (sphere.options.options) = { key: "bot" }; }
}
"#;
    let pool = test_support::pool(&[("p/v1/case.proto", source)]);

    let services = build_for(&pool, "bot");

    let numbers: Vec<(&str, u32, &str, u32)> = services
        .iter()
        .map(|s| {
            let m = &s.methods()[0];
            (
                s.service_type.as_str(),
                s.dedup_number,
                m.original_name.as_str(),
                m.dedup_number,
            )
        })
        .collect();
    assert_eq!(
        numbers,
        vec![
            ("menuService", 0, "menuServiceUpdateCount", 0),
            ("MenuService", 1, "MenuServiceUpdateCount", 1),
        ]
    );
}

#[test]
fn ModelBuilder___build_files___skips_files_without_matches() {
    let pool = test_support::pool(&[
        ("bot/v1/menu.proto", MENU_PROTO),
        ("mixed/v1/mixed.proto", MIXED_PROTO),
    ]);
    let config = test_support::config("bot");
    let builder = ModelBuilder::new(&pool, &config).unwrap();
    let files = vec![
        "sphere/options/options.proto".to_string(),
        "bot/v1/menu.proto".to_string(),
        "mixed/v1/mixed.proto".to_string(),
    ];

    let routes = builder.build_files(&files, &mut NameDeduper::new()).unwrap();

    let names: Vec<_> = routes.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(names, vec!["bot/v1/menu.proto", "mixed/v1/mixed.proto"]);
}

#[test]
fn ModelBuilder___build_files_unknown_file___returns_unknown_file() {
    let pool = test_support::menu_pool();
    let config = test_support::config("bot");
    let builder = ModelBuilder::new(&pool, &config).unwrap();

    let result = builder.build_files(&["nope.proto".to_string()], &mut NameDeduper::new());

    match result {
        Err(RouteGenError::UnknownFile(name)) => assert_eq!(name, "nope.proto"),
        other => panic!("expected UnknownFile, got {other:?}"),
    }
}

#[test]
fn ModelBuilder___invalid_config___is_rejected() {
    let pool = test_support::menu_pool();
    let config = test_support::config("");

    let result = ModelBuilder::new(&pool, &config);

    assert!(matches!(result, Err(RouteGenError::ConfigError(_))));
}

#[test]
fn ModelBuilder___custom_extension_name___uses_it() {
    let pool = test_support::menu_pool();
    let mut config = test_support::config("bot");
    config.extension = "other.options".to_string();

    let services = ModelBuilder::new(&pool, &config)
        .unwrap()
        .build(&mut NameDeduper::new())
        .unwrap();

    assert!(services.is_empty());
}

#[test]
fn ModelBuilder___repeated_builds___are_identical() {
    let pool = test_support::pool(&[
        ("bot/v1/menu.proto", MENU_PROTO),
        ("mixed/v1/mixed.proto", MIXED_PROTO),
    ]);

    let first = build_for(&pool, "bot");
    let second = build_for(&pool, "bot");

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn ModelBuilder___shared_deduper___continues_numbering_across_builds() {
    let pool = test_support::menu_pool();
    let config = test_support::config("bot");
    let builder = ModelBuilder::new(&pool, &config).unwrap();
    let mut deduper = NameDeduper::new();

    builder.build(&mut deduper).unwrap();
    let second = builder.build(&mut deduper).unwrap();

    assert!(second[0].methods().iter().all(|m| m.dedup_number == 1));
}
