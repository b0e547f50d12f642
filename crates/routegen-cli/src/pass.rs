//! Generation passes
//!
//! A pass compiles one routing key over a shared descriptor pool. Passes are
//! independent: each builds its own model with its own name counters, and a
//! failing pass leaves the others untouched.

use crate::codegen::{Emitter, FileRoutes, ModelBuilder, NameDeduper, Renderer};
use prost_reflect::DescriptorPool;
use routegen_core::{GeneratorConfig, RouteGenResult};
use routegen_transport::{CompilerVersion, GeneratedFile};
use tracing::{error, info};

/// One routing key and its configuration
#[derive(Debug, Clone)]
pub struct GenerationPass {
    config: GeneratorConfig,
    compiler_version: Option<CompilerVersion>,
}

impl GenerationPass {
    /// Create a pass; the configuration is validated here
    pub fn new(config: GeneratorConfig) -> RouteGenResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            compiler_version: None,
        })
    }

    /// Record the protoc version for generated headers
    pub fn with_compiler_version(mut self, version: Option<CompilerVersion>) -> Self {
        self.compiler_version = version;
        self
    }

    /// Routing key targeted by this pass
    pub fn key(&self) -> &str {
        &self.config.options_key
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the model for `files` with fresh name counters
    pub fn build_model(
        &self,
        pool: &DescriptorPool,
        files: &[String],
    ) -> RouteGenResult<Vec<FileRoutes>> {
        let builder = ModelBuilder::new(pool, &self.config)?;
        let mut deduper = NameDeduper::new();
        builder.build_files(files, &mut deduper)
    }

    /// Build, render and assemble output files
    ///
    /// Nothing is returned unless every file rendered.
    pub fn run(&self, pool: &DescriptorPool, files: &[String]) -> RouteGenResult<Vec<GeneratedFile>> {
        let renderer = Renderer::from_config(&self.config)?;
        let routes = self.build_model(pool, files)?;

        Emitter::new(&renderer, self.config.output_suffix())
            .with_compiler_version(self.compiler_version.clone())
            .emit_all(&routes)
    }
}

/// Result of one pass in [`run_passes`]
#[derive(Debug)]
pub struct PassOutcome {
    pub key: String,
    pub result: RouteGenResult<Vec<GeneratedFile>>,
}

impl PassOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run every pass over the same pool, in order
pub fn run_passes(
    passes: &[GenerationPass],
    pool: &DescriptorPool,
    files: &[String],
) -> Vec<PassOutcome> {
    passes
        .iter()
        .map(|pass| {
            let result = pass.run(pool, files);
            match &result {
                Ok(generated) => info!(key = pass.key(), files = generated.len(), "pass complete"),
                Err(e) => error!(key = pass.key(), "pass failed: {e}"),
            }
            PassOutcome {
                key: pass.key().to_string(),
                result,
            }
        })
        .collect()
}
