//! Template rendering
//!
//! Each [`ServiceDesc`] is serialized and rendered through one Handlebars
//! template. The built-in template produces Rust; a `template_file` replaces
//! it wholesale.
//!
//! Helpers available to templates:
//!
//! | helper | example | output |
//! |--------|---------|--------|
//! | `snake_case` | `{{snake_case "UpdateCount"}}` | `update_count` |
//! | `pascal_case` | `{{pascal_case "bot"}}` | `Bot` |
//! | `shouty_snake_case` | `{{shouty_snake_case "UpdateCount"}}` | `UPDATE_COUNT` |
//! | `quote` | `{{quote "a\"b"}}` | `"a\"b"` |
//! | `unique_name` | `{{unique_name this}}` | `MenuServiceUpdateCount0` |
//! | `doc_comment` | `{{doc_comment comment "///"}}` | one prefixed line per comment line |

use handlebars::{Handlebars, handlebars_helper};
use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use routegen_core::{GeneratorConfig, RouteGenError, RouteGenResult, ServiceDesc};
use std::path::Path;

/// Built-in template
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/route.rs.hbs");

const TEMPLATE_NAME: &str = "route";

/// Renders route groups through a single template
pub struct Renderer {
    handlebars: Handlebars<'static>,
}

impl Renderer {
    /// Renderer using the built-in template
    pub fn new() -> RouteGenResult<Self> {
        Self::with_template(DEFAULT_TEMPLATE)
    }

    /// Renderer using `body` as the template
    ///
    /// Syntax errors are reported here, not at render time.
    pub fn with_template(body: &str) -> RouteGenResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars.register_helper("snake_case", Box::new(snake_case));
        handlebars.register_helper("pascal_case", Box::new(pascal_case));
        handlebars.register_helper("shouty_snake_case", Box::new(shouty_snake_case));
        handlebars.register_helper("quote", Box::new(quote));
        handlebars.register_helper("unique_name", Box::new(unique_name));
        handlebars.register_helper("doc_comment", Box::new(doc_comment_helper));

        handlebars
            .register_template_string(TEMPLATE_NAME, body)
            .map_err(|e| RouteGenError::TemplateError(e.to_string()))?;

        Ok(Self { handlebars })
    }

    /// Renderer using the template file at `path`
    pub fn from_file(path: impl AsRef<Path>) -> RouteGenResult<Self> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path).map_err(|e| {
            RouteGenError::IoError(format!("failed to read template {}: {e}", path.display()))
        })?;
        Self::with_template(&body).map_err(|e| match e {
            RouteGenError::TemplateError(msg) => {
                RouteGenError::TemplateError(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Renderer for a configuration: its `template_file`, else the built-in one
    pub fn from_config(config: &GeneratorConfig) -> RouteGenResult<Self> {
        match &config.template_file {
            Some(path) => Self::from_file(path),
            None => Self::new(),
        }
    }

    /// Render one route group
    pub fn render(&self, service: &ServiceDesc) -> RouteGenResult<String> {
        debug_assert!(
            service.is_consistent(),
            "method_set out of sync for {}",
            service.service_name
        );

        self.handlebars
            .render(TEMPLATE_NAME, service)
            .map_err(|e| RouteGenError::TemplateError(format!("{}: {e}", service.service_name)))
    }
}

handlebars_helper!(snake_case: |s: str| s.to_snake_case());
handlebars_helper!(pascal_case: |s: str| s.to_upper_camel_case());
handlebars_helper!(shouty_snake_case: |s: str| s.to_shouty_snake_case());
handlebars_helper!(quote: |s: str| format!("{s:?}"));
handlebars_helper!(unique_name: |method: object| {
    let original = method.get("original_name").and_then(|v| v.as_str()).unwrap_or_default();
    let number = method.get("dedup_number").and_then(|v| v.as_u64()).unwrap_or_default();
    format!("{original}{number}")
});

/// Prefix every line of a comment, one output line each
///
/// Lines are otherwise emitted verbatim. An empty comment writes nothing.
fn doc_comment_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let comment = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    let prefix = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("///");
    out.write(&doc_comment(comment, prefix))?;
    Ok(())
}

fn doc_comment(comment: &str, prefix: &str) -> String {
    if comment.is_empty() {
        return String::new();
    }
    comment
        .strip_suffix('\n')
        .unwrap_or(comment)
        .split('\n')
        .map(|line| format!("{prefix}{line}\n"))
        .collect()
}
