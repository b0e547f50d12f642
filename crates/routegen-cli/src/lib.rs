//! routegen-cli - Route compiler behind `protoc-gen-route`
//!
//! - [`codegen`]: annotation extraction, model building, rendering, emission
//! - [`pass`]: one generation pass per routing key
//! - [`plugin`]: the protoc request/response exchange

pub mod codegen;
pub mod pass;
pub mod plugin;

pub use pass::{GenerationPass, PassOutcome, run_passes};

#[cfg(test)]
mod test_support;
