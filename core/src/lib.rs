#![deny(missing_docs)]

//! # o2ts Core
//!
//! Core library for the OpenAPI-to-TypeScript client generator: compiles an
//! OpenAPI 3 JSON document into a normalized descriptor graph, then emits
//! zod validators, static types and optional action bindings from it.

/// Shared error types.
pub mod error;

/// OpenAPI parsing and descriptor-graph construction.
pub mod oas;

/// Output rendering and emitters.
pub mod render;

/// The top-level build-and-emit pipeline.
pub mod generate;

pub use error::{AppError, AppResult};
pub use generate::{generate, validate_options};
pub use oas::{
    build_api_descriptor, ApiDescriptor, DescriptorBuilderOptions, Operation, ParamLocation,
    Parameter, PathItem, RawDocument, RequestBody, Response, Schema, SchemaKind, SchemaOrType,
    TypeRef, Verb, EMPTY_SCHEMA_KEY,
};
pub use render::{
    ActionBinding, ActionEmitter, ActionGeneratorKind, GeneratorOptions, NamingMode, OutputBuffer,
    ReactFetchingLibraryBinding, RenderEngine, Segment, TypeDeclarationEmitter,
};
