#![deny(missing_docs)]

//! # Type Declaration Emitter
//!
//! Emits one named declaration pair per top-level schema: a value binding to
//! the invocation of a builder function, and (unless types are skipped) a
//! static type. All value/type declarations come first and every builder
//! function body after them, so declarations can forward-reference builders
//! textually regardless of definition order.

use crate::error::AppResult;
use crate::oas::descriptor::{ApiDescriptor, Schema, SchemaOrType};
use crate::render::buffer::{OutputBuffer, Segment};
use crate::render::engine::{sorted_entries, RenderEngine};
use crate::render::{ActionGeneratorKind, GeneratorOptions};

/// Emits the component block: one declaration pair per named schema, sorted
/// lexicographically by name.
pub struct TypeDeclarationEmitter<'a> {
    api: &'a ApiDescriptor,
    options: &'a GeneratorOptions,
    engine: RenderEngine<'a>,
}

impl<'a> TypeDeclarationEmitter<'a> {
    /// Creates an emitter over a fully built, cycle-annotated descriptor.
    pub fn new(api: &'a ApiDescriptor, options: &'a GeneratorOptions) -> Self {
        Self {
            api,
            options,
            engine: RenderEngine::new(api, options),
        }
    }

    /// Emits the component segment.
    pub fn build(&mut self, buffer: &mut OutputBuffer) -> AppResult<()> {
        let api = self.api;
        let schemas = &api.components.schemas;
        if schemas.is_empty() {
            return Ok(());
        }

        let entries = sorted_entries(schemas);

        // When operation bindings are generated, the component block is
        // namespaced so operation modules can alias `Schemas.X`.
        if self.options.action_generator != ActionGeneratorKind::None {
            self.engine.push("export module Schemas {\n");
        }

        self.declarations(&entries)?;
        self.builder_functions(&entries)?;

        if self.options.action_generator != ActionGeneratorKind::None {
            self.engine.push("}\n");
        }

        self.engine.flush_to(buffer, Segment::Components);

        Ok(())
    }

    fn declarations(&mut self, entries: &[(&String, &Schema)]) -> AppResult<()> {
        for (name, schema) in entries {
            let builder_name = self.engine.builder_fn_name(name);
            self.engine
                .push(&format!("export const {} = {}();\n", name, builder_name));

            if !self.options.skip_types {
                self.engine.push(&format!("export type {} = ", name));
                if self.options.explicit_types {
                    let node = SchemaOrType::Schema((*schema).clone());
                    self.engine.schema_type_expr(&node, false)?;
                } else {
                    self.engine.push(&format!("z.infer<typeof {}>", name));
                }

                self.engine.push(";\n");
            }

            self.engine.push("\n");
        }

        Ok(())
    }

    fn builder_functions(&mut self, entries: &[(&String, &Schema)]) -> AppResult<()> {
        for (name, schema) in entries {
            let builder_name = self.engine.builder_fn_name(name);
            self.engine
                .push(&format!("function {}() {{\nreturn ", builder_name));
            let node = SchemaOrType::Schema((*schema).clone());
            self.engine.schema_validator(&node, false)?;
            self.engine.push(";\n}\n\n");
        }

        Ok(())
    }
}
