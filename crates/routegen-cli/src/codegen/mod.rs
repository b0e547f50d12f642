//! Descriptor-to-route compilation.
//!
//! # Pipeline
//!
//! ```text
//! DescriptorPool
//!     ↓
//!  [ModelBuilder] ── AnnotationExtractor, NameDeduper
//!     ↓
//!  FileRoutes (ServiceDesc per service, per file)
//!     ↓
//!  [Renderer] → text
//!     ↓
//!  [Emitter] → GeneratedFile
//! ```
//!
//! One pass targets one routing key. Passes share the pool read-only and
//! each owns its [`NameDeduper`], so they never affect each other's
//! numbering.
//!
//! # Annotating methods
//!
//! ```proto
//! service MenuService {
//!   rpc UpdateCount(UpdateCountRequest) returns (UpdateCountResponse) {
//!     option (sphere.options.options) = {
//!       key: "bot"
//!       extra: [
//!         { key: "command", value: "start" },
//!         { key: "callback_query", value: "start" }
//!       ]
//!     };
//!   }
//! }
//! ```
//!
//! Methods without the option, or with an empty `key`, are never routed.

pub mod annotation;
pub mod builder;
pub mod dedup;
pub mod emit;
pub mod render;

pub use annotation::{AnnotationExtractor, RouteAnnotation};
pub use builder::{FileRoutes, ModelBuilder};
pub use dedup::NameDeduper;
pub use emit::{Emitter, GENERATED_HEADER, file_header, output_file_name, write_files};
pub use render::{DEFAULT_TEMPLATE, Renderer};
