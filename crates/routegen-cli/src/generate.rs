//! Standalone generation from a descriptor set file

use crate::{ConfigArgs, InputArgs};
use anyhow::Context;
use routegen_cli::codegen::write_files;
use routegen_cli::{GenerationPass, run_passes};
use routegen_core::RouteGenResult;
use std::path::Path;
use tracing::info;

/// Run one pass per key and write every successful pass's files
///
/// A failed pass does not stop the others; the first failure is returned
/// after all passes ran.
pub fn run(input: &InputArgs, keys: &[String], config: &ConfigArgs, out: &Path) -> anyhow::Result<()> {
    let base = config.load()?;
    let (pool, files) = input.load()?;

    let passes = keys
        .iter()
        .map(|key| GenerationPass::new(base.with_options_key(key)))
        .collect::<RouteGenResult<Vec<_>>>()?;

    let mut first_failure = None;
    for outcome in run_passes(&passes, &pool, &files) {
        match outcome.result {
            Ok(generated) => {
                write_files(out, &generated)
                    .with_context(|| format!("pass '{}'", outcome.key))?;
                info!(key = %outcome.key, files = generated.len(), "wrote pass output");
            }
            Err(err) => {
                if first_failure.is_none() {
                    first_failure = Some((outcome.key, err));
                }
            }
        }
    }

    match first_failure {
        Some((key, err)) => Err(anyhow::Error::new(err).context(format!("pass '{key}' failed"))),
        None => Ok(()),
    }
}
