//! Model dump for template authors

use crate::{ConfigArgs, InputArgs};
use anyhow::Context;
use routegen_cli::GenerationPass;
use std::io::Write;

/// Print the route model for `key` as pretty JSON on stdout
pub fn run(input: &InputArgs, key: &str, config: &ConfigArgs) -> anyhow::Result<()> {
    let pass = GenerationPass::new(config.load()?.with_options_key(key))?;
    let (pool, files) = input.load()?;

    let routes = pass.build_model(&pool, &files)?;
    let json = serde_json::to_string_pretty(&routes).context("failed to serialize model")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("failed to write model to stdout")?;
    Ok(())
}
