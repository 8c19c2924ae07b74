#![deny(missing_docs)]

//! # OpenAPI (OAS) Compilation
//!
//! Raw-document parsing and descriptor-graph construction.

/// Raw document shims (intermediate deserialization layer).
pub mod document;

/// `$ref` handling.
pub mod refs;

/// Descriptor graph (IR) structures.
pub mod descriptor;

/// Descriptor builder (two-phase registry construction).
pub mod builder;

/// Cycle detection over the finished graph.
pub mod cycles;

pub use builder::{build_api_descriptor, DescriptorBuilderOptions, EMPTY_SCHEMA_KEY};
pub use descriptor::{
    ApiDescriptor, Components, Operation, ParamLocation, Parameter, PathItem, RequestBody,
    Response, Schema, SchemaKind, SchemaOrType, TypeRef, Verb,
};
pub use document::RawDocument;
pub use refs::{ref_target_name, RefOr};
