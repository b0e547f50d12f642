//! Route model handed to templates.
//!
//! One [`ServiceDesc`] is produced per proto service and routing key, holding
//! the annotated methods of that service in declaration order. Every
//! `ServiceDesc` of a run shares a single [`PackageDesc`].
//!
//! The model serializes with `serde`; field names below are the names
//! templates use (`{{service_type}}`, `{{#each methods}}`, `{{package.request_model}}`).

use crate::config::GeneratorConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Cross-cutting type references needed to render any service.
///
/// Built once per run and shared read-only by every [`ServiceDesc`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDesc {
    /// Qualified transport-native request type
    pub request_model: String,

    /// Qualified transport-native response type
    pub response_model: String,

    /// Qualified extra-data type, present only together with its constructor
    pub extra_data_model: Option<String>,

    /// Constructor for the extra-data type
    pub extra_data_constructor: Option<String>,
}

impl PackageDesc {
    pub fn new(request_model: impl Into<String>, response_model: impl Into<String>) -> Self {
        Self {
            request_model: request_model.into(),
            response_model: response_model.into(),
            extra_data_model: None,
            extra_data_constructor: None,
        }
    }

    pub fn with_extra_data(
        mut self,
        model: impl Into<String>,
        constructor: impl Into<String>,
    ) -> Self {
        self.extra_data_model = Some(model.into());
        self.extra_data_constructor = Some(constructor.into());
        self
    }

    /// Build from configuration. Extra data is dropped unless both the model
    /// and its constructor are configured.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let package = Self::new(&config.request_model, &config.response_model);
        match (&config.extra_data_model, &config.extra_data_constructor) {
            (Some(model), Some(constructor)) => package.with_extra_data(model, constructor),
            _ => package,
        }
    }

    pub fn has_extra_data(&self) -> bool {
        self.extra_data_model.is_some() && self.extra_data_constructor.is_some()
    }
}

/// One annotated rpc method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDesc {
    /// Method name as declared: `UpdateCount`
    pub name: String,

    /// Service and method name: `MenuServiceUpdateCount`
    pub original_name: String,

    /// 0 when `original_name` is unique in the run, otherwise the collision index
    pub dedup_number: u32,

    /// Input message short name: `UpdateCountRequest`
    pub request_type: String,

    /// Input message full name: `bot.v1.UpdateCountRequest`
    pub request_full_name: String,

    /// Output message short name
    pub reply_type: String,

    /// Output message full name
    pub reply_full_name: String,

    /// Leading comment, verbatim
    pub comment: String,

    pub client_streaming: bool,
    pub server_streaming: bool,

    /// Annotation extras
    pub extra: BTreeMap<String, String>,
}

impl MethodDesc {
    /// Fold ordered annotation pairs into the `extra` map.
    ///
    /// When a key repeats, the last occurrence wins.
    pub fn extra_from_pairs<I, K, V>(pairs: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }

    /// Identifier fragment unique within a run: `MenuServiceUpdateCount0`
    pub fn unique_name(&self) -> String {
        format!("{}{}", self.original_name, self.dedup_number)
    }

    pub fn is_streaming(&self) -> bool {
        self.client_streaming || self.server_streaming
    }
}

/// Route group: the methods of one service matching one routing key.
///
/// `method_set` is derived from `methods` and cannot be set directly; every
/// mutation of `methods` goes through this type and keeps the index in sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDesc {
    /// Routing key this group was built for: `bot`
    pub options_key: String,

    /// Service short name: `MenuService`
    pub service_type: String,

    /// Service full name: `bot.v1.MenuService`
    pub service_name: String,

    /// Occurrence number of `service_type` among groups of the same run,
    /// compared case-insensitively. Non-zero only when service-level
    /// identifiers would otherwise collide.
    pub dedup_number: u32,

    methods: Vec<MethodDesc>,

    method_set: BTreeMap<String, MethodDesc>,

    package: Arc<PackageDesc>,
}

impl ServiceDesc {
    pub fn new(
        options_key: impl Into<String>,
        service_type: impl Into<String>,
        service_name: impl Into<String>,
        package: Arc<PackageDesc>,
    ) -> Self {
        Self {
            options_key: options_key.into(),
            service_type: service_type.into(),
            service_name: service_name.into(),
            dedup_number: 0,
            methods: Vec::new(),
            method_set: BTreeMap::new(),
            package,
        }
    }

    /// Append a method, keeping declaration order.
    pub fn push_method(&mut self, method: MethodDesc) {
        self.method_set.insert(method.name.clone(), method.clone());
        self.methods.push(method);
    }

    /// Keep only the methods matching `f`.
    pub fn retain_methods<F>(&mut self, f: F)
    where
        F: FnMut(&MethodDesc) -> bool,
    {
        self.methods.retain(f);
        self.rebuild_method_set();
    }

    /// Recompute `method_set` from `methods`.
    pub fn rebuild_method_set(&mut self) {
        self.method_set = self
            .methods
            .iter()
            .map(|m| (m.name.clone(), m.clone()))
            .collect();
    }

    pub fn methods(&self) -> &[MethodDesc] {
        &self.methods
    }

    pub fn method_set(&self) -> &BTreeMap<String, MethodDesc> {
        &self.method_set
    }

    pub fn method(&self, name: &str) -> Option<&MethodDesc> {
        self.method_set.get(name)
    }

    pub fn package(&self) -> &Arc<PackageDesc> {
        &self.package
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Whether `method_set` is exactly the index of `methods` by name.
    pub fn is_consistent(&self) -> bool {
        self.method_set.len() == self.methods.len()
            && self
                .methods
                .iter()
                .all(|m| self.method_set.get(&m.name) == Some(m))
    }
}
