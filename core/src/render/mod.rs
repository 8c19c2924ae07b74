#![deny(missing_docs)]

//! # Rendering
//!
//! Emission of the generated TypeScript source: a shared recursive engine
//! producing the static-type and runtime-validator projections in lock-step,
//! plus the two emitters consuming it.

/// Segmented output buffer.
pub mod buffer;

/// Shared recursive rendering engine.
pub mod engine;

/// Top-level type/validator declaration emitter.
pub mod types;

/// Per-operation declaration and binding emitter.
pub mod actions;

pub use actions::{ActionBinding, ActionEmitter, ReactFetchingLibraryBinding};
pub use buffer::{OutputBuffer, Segment};
pub use engine::RenderEngine;
pub use types::TypeDeclarationEmitter;

/// Field-name handling for generated types and validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingMode {
    /// Pass names through unchanged, no transform attached.
    #[default]
    None,
    /// Rewrite property names to camelCase and attach a bidirectional
    /// wire-name transform so serialization round-trips.
    CamelCase,
}

/// Which operation-binding flavor to emit, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionGeneratorKind {
    /// Emit only validators and types.
    #[default]
    None,
    /// Emit react-fetching-library action bindings.
    ReactFetchingLibrary,
}

/// User-facing generation options.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Omit static type aliases (validators only, comment-only parameter
    /// docs).
    pub skip_types: bool,
    /// Object validators reject unknown keys; when false they accept them.
    pub strict: bool,
    /// Emit explicit structural types instead of inferring them from the
    /// validator.
    pub explicit_types: bool,
    /// Field-name handling.
    pub naming: NamingMode,
    /// Operation-binding flavor.
    pub action_generator: ActionGeneratorKind,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            skip_types: false,
            strict: true,
            explicit_types: false,
            naming: NamingMode::None,
            action_generator: ActionGeneratorKind::None,
        }
    }
}
