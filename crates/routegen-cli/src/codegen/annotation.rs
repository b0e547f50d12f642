//! Route annotation extraction
//!
//! A route annotation is a method option extension shaped like:
//!
//! ```proto
//! message KeyValuePair { string key = 1; string value = 2; }
//! message Options { string key = 1; repeated KeyValuePair extra = 2; }
//! extend google.protobuf.MethodOptions { Options options = 501319; }
//! ```
//!
//! Anything that does not read as that shape is treated as absent.

use prost_reflect::{DescriptorPool, DynamicMessage, ExtensionDescriptor, MethodDescriptor, Value};
use tracing::{debug, warn};

/// Routing key and extra metadata read from one method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAnnotation {
    /// Routing key, never empty
    pub key: String,

    /// Extra pairs in declaration order, duplicates kept
    pub extra: Vec<(String, String)>,
}

/// Reads route annotations from method options
pub struct AnnotationExtractor {
    extension: Option<ExtensionDescriptor>,
}

impl AnnotationExtractor {
    /// Resolve the extension named `extension_name` in `pool`
    ///
    /// A pool that does not define the extension matches no method.
    pub fn new(pool: &DescriptorPool, extension_name: &str) -> Self {
        let extension = pool.get_extension_by_name(extension_name);
        if extension.is_none() {
            debug!(
                extension = extension_name,
                "annotation extension not defined in descriptor set"
            );
        }
        Self { extension }
    }

    /// Whether the extension was found in the pool
    pub fn is_resolved(&self) -> bool {
        self.extension.is_some()
    }

    /// Extract the annotation attached to `method`, if any
    pub fn extract(&self, method: &MethodDescriptor) -> Option<RouteAnnotation> {
        let extension = self.extension.as_ref()?;
        let options = method.options();
        if !options.has_extension(extension) {
            return None;
        }

        let value = options.get_extension(extension);
        let Value::Message(message) = value.as_ref() else {
            warn!(
                method = method.full_name(),
                "route annotation is not a message, ignoring"
            );
            return None;
        };

        let annotation = read_annotation(message);
        if annotation.is_none() {
            warn!(
                method = method.full_name(),
                "route annotation has no usable key, ignoring"
            );
        }
        annotation
    }
}

fn read_annotation(message: &DynamicMessage) -> Option<RouteAnnotation> {
    let key = string_field(message, "key")?;
    if key.is_empty() {
        return None;
    }

    let extra = match message.get_field_by_name("extra").as_deref() {
        None => Vec::new(),
        Some(Value::List(entries)) => entries.iter().filter_map(read_pair).collect(),
        Some(_) => return None,
    };

    Some(RouteAnnotation { key, extra })
}

fn read_pair(entry: &Value) -> Option<(String, String)> {
    let Value::Message(pair) = entry else {
        return None;
    };
    Some((string_field(pair, "key")?, string_field(pair, "value")?))
}

fn string_field(message: &DynamicMessage, name: &str) -> Option<String> {
    match message.get_field_by_name(name).as_deref() {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}
