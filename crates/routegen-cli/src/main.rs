//! protoc-gen-route - Compile annotated protobuf services into routing glue
//!
//! Modes:
//! - no arguments: protoc plugin (`CodeGeneratorRequest` on stdin,
//!   `CodeGeneratorResponse` on stdout)
//! - `protoc-gen-route generate` - generate from a `FileDescriptorSet` file
//! - `protoc-gen-route dump-model` - print the route model as JSON

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use routegen_core::{GeneratorConfig, LogLevel, RouteGenError};
use routegen_logging::{LogSinkManager, init_logging};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

mod dump;
mod generate;

#[derive(Parser)]
#[command(name = "protoc-gen-route")]
#[command(author, version, about = "protoc plugin generating routing glue for annotated services", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate route files from a binary FileDescriptorSet
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// Routing key to generate; repeat for one pass per key
        #[arg(short, long = "key", required = true)]
        keys: Vec<String>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Output directory for generated files
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Print the route model for one key as JSON
    DumpModel {
        #[command(flatten)]
        input: InputArgs,

        /// Routing key to build
        #[arg(short, long)]
        key: String,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

/// Descriptor input shared by the standalone commands
#[derive(Args)]
struct InputArgs {
    /// FileDescriptorSet from `protoc --include_imports --include_source_info -o` or `buf build -o`
    #[arg(short, long)]
    descriptor_set: PathBuf,

    /// Source file to generate for (default: every file in the set)
    #[arg(short, long = "file")]
    files: Vec<String>,
}

/// Configuration shared by the standalone commands
#[derive(Args)]
struct ConfigArgs {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override a configuration option (`name=value`), applied after --config
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<String>,
}

impl ConfigArgs {
    fn load(&self) -> anyhow::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::new(),
        };

        for pair in &self.overrides {
            let (name, value) = pair
                .split_once('=')
                .with_context(|| format!("expected NAME=VALUE, got '{pair}'"))?;
            config.set(name.trim(), value.trim())?;
        }

        LogSinkManager::global().set_level(config.log_level.parse::<LogLevel>()?);
        Ok(config)
    }
}

impl InputArgs {
    fn load(&self) -> anyhow::Result<(prost_reflect::DescriptorPool, Vec<String>)> {
        let bytes = std::fs::read(&self.descriptor_set).with_context(|| {
            format!("failed to read descriptor set {}", self.descriptor_set.display())
        })?;
        let pool = routegen_transport::decode_descriptor_set(&bytes)?;

        let files = if self.files.is_empty() {
            pool.files().map(|f| f.name().to_string()).collect()
        } else {
            self.files.clone()
        };
        Ok((pool, files))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(LogLevel::Info);

    let result = match cli.command {
        None => run_plugin(),
        Some(Commands::Generate {
            input,
            keys,
            config,
            out,
        }) => generate::run(&input, &keys, &config, &out),
        Some(Commands::DumpModel { input, key, config }) => dump::run(&input, &key, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("protoc-gen-route: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<RouteGenError>()
        .map(RouteGenError::exit_code)
        .unwrap_or(1)
}

/// Plugin mode; stdout is written only when generation succeeded
fn run_plugin() -> anyhow::Result<()> {
    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .context("failed to read CodeGeneratorRequest from stdin")?;

    let output = routegen_cli::plugin::run(&input)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&output)
        .and_then(|()| stdout.flush())
        .context("failed to write CodeGeneratorResponse to stdout")?;
    Ok(())
}
