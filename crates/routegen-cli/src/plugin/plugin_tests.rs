#![allow(non_snake_case)]

use super::*;
use crate::codegen::GENERATED_HEADER;
use crate::test_support::{self, MENU_PROTO};
use routegen_core::RouteGenError;
use routegen_transport::CompilerVersion;

const PARAMETER: &str =
    "options_key=bot,request_model=crate::bot::Update,response_model=crate::bot::Reply";

fn menu_request() -> PluginRequest {
    PluginRequest::new(
        vec!["bot/v1/menu.proto".to_string()],
        test_support::file_protos(&[("bot/v1/menu.proto", MENU_PROTO)]),
    )
    .with_parameter(PARAMETER)
}

#[test]
fn process___menu_request___generates_one_file() {
    let request = menu_request();
    let config = GeneratorConfig::from_parameter(PARAMETER).unwrap();

    let response = process(&request, config).unwrap();

    assert!(response.error.is_none());
    assert_eq!(response.files.len(), 1);
    assert_eq!(response.files[0].name, "bot/v1/menu_bot.rs");
    assert!(response.files[0].content.starts_with(GENERATED_HEADER));
    assert!(response.files[0]
        .content
        .contains(r#""/bot.v1.MenuService/UpdateCount""#));
}

#[test]
fn process___compiler_version___recorded_in_header() {
    let request = menu_request().with_compiler_version(CompilerVersion {
        major: 5,
        minor: 27,
        patch: 0,
        suffix: String::new(),
    });
    let config = GeneratorConfig::from_parameter(PARAMETER).unwrap();

    let response = process(&request, config).unwrap();

    assert!(response.files[0].content.contains("// - protoc v5.27.0\n"));
}

#[test]
fn process___other_key___generates_nothing() {
    let request = menu_request();
    let config = GeneratorConfig::from_parameter(PARAMETER)
        .unwrap()
        .with_options_key("http");

    let response = process(&request, config).unwrap();

    assert!(response.error.is_none());
    assert!(response.files.is_empty());
}

#[test]
fn process___missing_dependency___returns_descriptor_error() {
    let mut protos = test_support::file_protos(&[("bot/v1/menu.proto", MENU_PROTO)]);
    // drop everything but the menu file itself, leaving its imports unresolved
    let menu = protos.pop().unwrap();
    let request = PluginRequest::new(vec!["bot/v1/menu.proto".to_string()], vec![menu]);
    let config = GeneratorConfig::from_parameter(PARAMETER).unwrap();

    let result = process(&request, config);

    assert!(matches!(result, Err(RouteGenError::DescriptorError(_))));
}

#[test]
fn process___file_not_in_request___returns_unknown_file() {
    let mut request = menu_request();
    request.files_to_generate.push("missing.proto".to_string());
    let config = GeneratorConfig::from_parameter(PARAMETER).unwrap();

    let result = process(&request, config);

    assert!(matches!(result, Err(RouteGenError::UnknownFile(_))));
}

#[test]
fn run___request_bytes___returns_response_bytes() {
    let input = menu_request().to_bytes().unwrap();

    let output = run(&input).unwrap();

    let response = PluginResponse::from_bytes(&output).unwrap();
    assert!(response.error.is_none());
    assert_eq!(response.files[0].name, "bot/v1/menu_bot.rs");
}

#[test]
fn run___empty_input___returns_codec_error() {
    let result = run(&[]);

    assert!(matches!(result, Err(RouteGenError::CodecError(_))));
}

#[test]
fn run___missing_options_key___returns_config_error() {
    let request = PluginRequest::new(
        vec!["bot/v1/menu.proto".to_string()],
        test_support::file_protos(&[("bot/v1/menu.proto", MENU_PROTO)]),
    )
    .with_parameter("request_model=A,response_model=B");

    let result = run(&request.to_bytes().unwrap());

    assert!(matches!(result, Err(RouteGenError::ConfigError(_))));
}

#[test]
fn run___unknown_parameter___returns_config_error() {
    let request = menu_request().with_parameter(format!("{PARAMETER},colour=blue"));

    let result = run(&request.to_bytes().unwrap());

    match result {
        Err(RouteGenError::ConfigError(msg)) => assert!(msg.contains("colour")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn run___file_suffix_parameter___renames_output() {
    let request = menu_request().with_parameter(format!("{PARAMETER},file_suffix=.{{key}}.routes.rs"));

    let output = run(&request.to_bytes().unwrap()).unwrap();

    let response = PluginResponse::from_bytes(&output).unwrap();
    assert_eq!(response.files[0].name, "bot/v1/menu.bot.routes.rs");
}
