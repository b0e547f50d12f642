//! protoc plugin entry point
//!
//! The request parameter (`--route_opt` or `--route_out=<params>:<dir>`)
//! carries the generator configuration, for example:
//!
//! ```text
//! protoc --route_out=. \
//!   --route_opt=options_key=bot,request_model=crate::bot::Update,response_model=crate::bot::Reply \
//!   bot/v1/menu.proto
//! ```

use crate::pass::GenerationPass;
use routegen_core::{GeneratorConfig, LogLevel, RouteGenResult};
use routegen_logging::LogSinkManager;
use routegen_transport::{PluginRequest, PluginResponse};
use tracing::debug;

/// Generate the response for a decoded request
pub fn process(request: &PluginRequest, config: GeneratorConfig) -> RouteGenResult<PluginResponse> {
    let pass = GenerationPass::new(config)?.with_compiler_version(request.compiler_version.clone());
    let pool = request.descriptor_pool()?;
    debug!(
        files = request.files_to_generate.len(),
        key = pass.key(),
        "processing request"
    );

    let files = pass.run(&pool, &request.files_to_generate)?;
    Ok(PluginResponse::success(files))
}

/// Full plugin exchange: request bytes in, response bytes out
///
/// The log level from the parameter string takes effect before generation.
pub fn run(input: &[u8]) -> RouteGenResult<Vec<u8>> {
    let request = PluginRequest::from_bytes(input)?;
    let config = GeneratorConfig::from_parameter(request.parameter_str())?;
    LogSinkManager::global().set_level(config.log_level.parse::<LogLevel>()?);

    let response = process(&request, config)?;
    Ok(response.to_bytes()?)
}

#[cfg(test)]
#[path = "plugin/plugin_tests.rs"]
mod plugin_tests;
