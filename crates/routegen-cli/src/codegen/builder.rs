//! Descriptor-to-model compilation
//!
//! Walks files, services and methods in declaration order, keeps the methods
//! whose annotation matches the configured routing key, and groups them into
//! one [`ServiceDesc`] per service.

use super::annotation::{AnnotationExtractor, RouteAnnotation};
use super::dedup::NameDeduper;
use prost_reflect::{DescriptorPool, FileDescriptor, MethodDescriptor, ServiceDescriptor};
use routegen_core::{
    GeneratorConfig, MethodDesc, PackageDesc, RouteGenError, RouteGenResult, ServiceDesc,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// `FileDescriptorProto.service`
const FILE_SERVICE_FIELD: i32 = 6;
/// `ServiceDescriptorProto.method`
const SERVICE_METHOD_FIELD: i32 = 2;

/// Route groups produced from one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRoutes {
    /// Source file name as known to protoc: `bot/v1/menu.proto`
    pub file_name: String,

    /// Route groups in service declaration order, never empty
    pub services: Vec<ServiceDesc>,
}

/// Builds route groups for one routing key
pub struct ModelBuilder<'a> {
    pool: &'a DescriptorPool,
    extractor: AnnotationExtractor,
    options_key: String,
    package: Arc<PackageDesc>,
}

impl<'a> ModelBuilder<'a> {
    /// Create a builder for `config.options_key`
    pub fn new(pool: &'a DescriptorPool, config: &GeneratorConfig) -> RouteGenResult<Self> {
        config.validate()?;
        Ok(Self {
            pool,
            extractor: AnnotationExtractor::new(pool, &config.extension),
            options_key: config.options_key.clone(),
            package: Arc::new(PackageDesc::from_config(config)),
        })
    }

    pub fn options_key(&self) -> &str {
        &self.options_key
    }

    /// Package info shared by every produced group
    pub fn package(&self) -> &Arc<PackageDesc> {
        &self.package
    }

    /// Build route groups over every file in the pool
    pub fn build(&self, deduper: &mut NameDeduper) -> RouteGenResult<Vec<ServiceDesc>> {
        let mut services = Vec::new();
        for file in self.pool.files() {
            services.extend(self.build_file(&file, deduper));
        }
        Ok(services)
    }

    /// Build route groups for the named files, grouped per file
    ///
    /// Files without any matching method are left out. A name missing from
    /// the pool fails the whole build.
    pub fn build_files(
        &self,
        files_to_generate: &[String],
        deduper: &mut NameDeduper,
    ) -> RouteGenResult<Vec<FileRoutes>> {
        let mut routes = Vec::new();
        for name in files_to_generate {
            let file = self
                .pool
                .get_file_by_name(name)
                .ok_or_else(|| RouteGenError::UnknownFile(name.clone()))?;

            let services = self.build_file(&file, deduper);
            if services.is_empty() {
                debug!(file = %name, key = %self.options_key, "no matching methods");
                continue;
            }
            routes.push(FileRoutes {
                file_name: name.clone(),
                services,
            });
        }
        Ok(routes)
    }

    fn build_file(&self, file: &FileDescriptor, deduper: &mut NameDeduper) -> Vec<ServiceDesc> {
        let comments = leading_comments(file);
        let mut services = Vec::new();

        for service in file.services() {
            let mut desc = ServiceDesc::new(
                self.options_key.clone(),
                service.name(),
                service.full_name(),
                Arc::clone(&self.package),
            );

            for method in service.methods() {
                let Some(annotation) = self.extractor.extract(&method) else {
                    continue;
                };
                if annotation.key != self.options_key {
                    continue;
                }

                let comment = comments
                    .get(method_path(&service, &method).as_slice())
                    .cloned()
                    .unwrap_or_default();
                desc.push_method(method_desc(&service, &method, annotation, comment, deduper));
            }

            if desc.is_empty() {
                continue;
            }
            desc.dedup_number = deduper.assign(service.name()).1;
            desc.rebuild_method_set();
            services.push(desc);
        }

        services
    }
}

fn method_desc(
    service: &ServiceDescriptor,
    method: &MethodDescriptor,
    annotation: RouteAnnotation,
    comment: String,
    deduper: &mut NameDeduper,
) -> MethodDesc {
    let (original_name, dedup_number) =
        deduper.assign(&format!("{}{}", service.name(), method.name()));

    let input = method.input();
    let output = method.output();
    let desc = MethodDesc {
        name: method.name().to_string(),
        original_name,
        dedup_number,
        request_type: input.name().to_string(),
        request_full_name: input.full_name().to_string(),
        reply_type: output.name().to_string(),
        reply_full_name: output.full_name().to_string(),
        comment,
        client_streaming: method.is_client_streaming(),
        server_streaming: method.is_server_streaming(),
        extra: MethodDesc::extra_from_pairs(annotation.extra),
    };

    if desc.is_streaming() {
        warn!(
            method = method.full_name(),
            "streaming method included in route group"
        );
    }
    debug!(
        method = method.full_name(),
        name = %desc.unique_name(),
        "matched route method"
    );

    desc
}

fn method_path(service: &ServiceDescriptor, method: &MethodDescriptor) -> Vec<i32> {
    vec![
        FILE_SERVICE_FIELD,
        service.index() as i32,
        SERVICE_METHOD_FIELD,
        method.index() as i32,
    ]
}

/// Leading comments by source path, verbatim
fn leading_comments(file: &FileDescriptor) -> HashMap<Vec<i32>, String> {
    file.file_descriptor_proto()
        .source_code_info
        .as_ref()
        .map(|info| {
            info.location
                .iter()
                .filter_map(|loc| Some((loc.path.clone(), loc.leading_comments.clone()?)))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "builder/builder_tests.rs"]
mod builder_tests;
