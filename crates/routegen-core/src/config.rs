//! Generator configuration
//!
//! Configuration is supplied once per run, either as a TOML file or as the
//! protoc parameter string (`--route_opt=options_key=bot,request_model=...`).
//! Parameter pairs override values loaded from `config=<path>`.

use crate::error::{RouteGenError, RouteGenResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Full name of the method-option extension carrying route annotations
pub const DEFAULT_EXTENSION: &str = "sphere.options.options";

/// Configuration for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Annotation `key` value this run generates routes for (e.g. "bot", "http")
    #[serde(default)]
    pub options_key: String,

    /// Qualified type of the transport-native request
    #[serde(default)]
    pub request_model: String,

    /// Qualified type of the transport-native response
    #[serde(default)]
    pub response_model: String,

    /// Qualified type holding per-method extra data
    #[serde(default)]
    pub extra_data_model: Option<String>,

    /// Constructor building [`Self::extra_data_model`] from key/value pairs
    #[serde(default)]
    pub extra_data_constructor: Option<String>,

    /// Template file replacing the built-in template
    #[serde(default)]
    pub template_file: Option<PathBuf>,

    /// Suffix appended to the proto file stem; `{key}` expands to the options key
    #[serde(default)]
    pub file_suffix: Option<String>,

    /// Full name of the method-option extension to read
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Diagnostic log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            options_key: String::new(),
            request_model: String::new(),
            response_model: String::new(),
            extra_data_model: None,
            extra_data_constructor: None,
            template_file: None,
            file_suffix: None,
            extension: default_extension(),
            log_level: default_log_level(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> RouteGenResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> RouteGenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RouteGenError::ConfigError(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parse the protoc parameter string
    ///
    /// The string is a comma-separated list of `key=value` pairs. A
    /// `config=<path>` pair is applied first regardless of its position; every
    /// other pair is applied in order on top of it.
    pub fn from_parameter(parameter: &str) -> RouteGenResult<Self> {
        let mut pairs = Vec::new();
        for part in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                RouteGenError::ConfigError(format!("expected key=value, got '{part}'"))
            })?;
            pairs.push((key.trim(), value.trim()));
        }

        let mut config = match pairs.iter().find(|(k, _)| *k == "config") {
            Some((_, path)) => Self::from_file(path)?,
            None => Self::default(),
        };

        for (key, value) in pairs.into_iter().filter(|(k, _)| *k != "config") {
            config.set(key, value)?;
        }

        Ok(config)
    }

    /// Set a single option by its parameter name
    pub fn set(&mut self, key: &str, value: &str) -> RouteGenResult<()> {
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());

        match key {
            "options_key" => self.options_key = value.to_string(),
            "request_model" => self.request_model = value.to_string(),
            "response_model" => self.response_model = value.to_string(),
            "extra_data_model" => self.extra_data_model = optional(value),
            "extra_data_constructor" => self.extra_data_constructor = optional(value),
            "template_file" => self.template_file = optional(value).map(PathBuf::from),
            "file_suffix" => self.file_suffix = optional(value),
            "extension" => self.extension = value.to_string(),
            "log_level" => self.log_level = value.to_string(),
            other => {
                return Err(RouteGenError::ConfigError(format!(
                    "unknown option: {other}"
                )));
            }
        }
        Ok(())
    }

    /// Copy of this configuration targeting another options key
    pub fn with_options_key(&self, key: impl Into<String>) -> Self {
        Self {
            options_key: key.into(),
            ..self.clone()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> RouteGenResult<()> {
        if self.options_key.trim().is_empty() {
            return Err(RouteGenError::ConfigError(
                "options_key cannot be empty".to_string(),
            ));
        }

        if self.request_model.trim().is_empty() {
            return Err(RouteGenError::ConfigError(
                "request_model cannot be empty".to_string(),
            ));
        }

        if self.response_model.trim().is_empty() {
            return Err(RouteGenError::ConfigError(
                "response_model cannot be empty".to_string(),
            ));
        }

        if self.extra_data_model.is_some() != self.extra_data_constructor.is_some() {
            return Err(RouteGenError::ConfigError(
                "extra_data_model and extra_data_constructor must be set together".to_string(),
            ));
        }

        if self.extension.trim().is_empty() || self.extension.starts_with('.') {
            return Err(RouteGenError::ConfigError(format!(
                "extension must be a full name without a leading dot, got '{}'",
                self.extension
            )));
        }

        self.log_level.parse::<crate::LogLevel>()?;

        Ok(())
    }

    /// Whether per-method extra data is generated
    pub fn has_extra_data(&self) -> bool {
        self.extra_data_model.is_some() && self.extra_data_constructor.is_some()
    }

    /// Suffix for generated file names, with `{key}` expanded
    pub fn output_suffix(&self) -> String {
        match &self.file_suffix {
            Some(suffix) => suffix.replace("{key}", &self.options_key),
            None => format!("_{}.rs", self.options_key),
        }
    }
}
