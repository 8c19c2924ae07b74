#![deny(missing_docs)]

//! # Rendering Engine
//!
//! Two mirrored recursive walks over a schema node: one producing the
//! static type expression, one producing the runtime zod validator
//! expression. Both switch exhaustively on the same kind set, so a new
//! schema kind fails to compile until it is handled in both projections.
//!
//! An EMPTY node reaching either projection is an upstream invariant
//! violation and fails fast.

use crate::error::{AppError, AppResult};
use crate::oas::descriptor::{ApiDescriptor, SchemaKind, SchemaOrType};
use crate::render::buffer::{OutputBuffer, Segment};
use crate::render::{GeneratorOptions, NamingMode};
use heck::ToLowerCamelCase;
use indexmap::IndexMap;

const EMPTY_AT_RENDER_STAGE: &str =
    "Empty types are not expected to reach this stage. This is a bug.";

/// The shared recursive emitter. Accumulates text locally; emitters flush
/// the accumulated fragment into an output segment when a declaration is
/// complete.
pub struct RenderEngine<'a> {
    pub(crate) api: &'a ApiDescriptor,
    pub(crate) options: &'a GeneratorOptions,
    /// When set, named references render as calls to forward-declared
    /// builder functions; otherwise as constant aliases.
    use_builder_functions: bool,
    /// Prefix prepended to named types ("" or "Schemas.").
    schemas_prefix: &'static str,
    local: String,
}

impl<'a> RenderEngine<'a> {
    /// Engine for the component block: references call builder functions.
    pub fn new(api: &'a ApiDescriptor, options: &'a GeneratorOptions) -> Self {
        Self {
            api,
            options,
            use_builder_functions: true,
            schemas_prefix: "",
            local: String::new(),
        }
    }

    /// Engine for the operations block: references alias the evaluated
    /// `Schemas.` constants instead of calling builder functions.
    pub fn for_operations(api: &'a ApiDescriptor, options: &'a GeneratorOptions) -> Self {
        Self {
            api,
            options,
            use_builder_functions: false,
            schemas_prefix: "Schemas.",
            local: String::new(),
        }
    }

    /// Appends a fragment to the local buffer.
    pub fn push(&mut self, text: &str) {
        self.local.push_str(text);
    }

    /// Flushes the local buffer into the given output segment.
    pub fn flush_to(&mut self, buffer: &mut OutputBuffer, segment: Segment) {
        buffer.write(&self.local, segment);
        self.local.clear();
    }

    #[cfg(test)]
    pub(crate) fn take_local(&mut self) -> String {
        std::mem::take(&mut self.local)
    }

    /// Name of the forward-declared builder function for a named schema.
    pub fn builder_fn_name(&self, type_name: &str) -> String {
        format!("zodSchema{}", type_name)
    }

    /// Prefixed name of a named schema.
    pub fn full_type_name(&self, type_name: &str) -> String {
        format!("{}{}", self.schemas_prefix, type_name)
    }

    /// Applies the configured naming mode to a property name.
    pub fn process_name(&self, key: &str) -> String {
        match self.options.naming {
            NamingMode::None => key.to_string(),
            NamingMode::CamelCase => key.to_lower_camel_case(),
        }
    }

    /// Whether the node resolves to UNKNOWN (through the registry for named
    /// references; a dangling reference counts as not-unknown).
    pub fn is_unknown(&self, node: &SchemaOrType) -> bool {
        node.resolve(&self.api.components.schemas)
            .map(|schema| schema.kind == SchemaKind::Unknown)
            .unwrap_or(false)
    }

    // --- Static type projection ---

    /// Renders the static type expression for a node. Unless suppressed,
    /// the optionality and nullability modifiers are appended in that fixed
    /// order.
    pub fn schema_type_expr(
        &mut self,
        node: &SchemaOrType,
        suppress_modifiers: bool,
    ) -> AppResult<()> {
        match node {
            SchemaOrType::Type(reference) => {
                let name = self.full_type_name(&reference.type_name);
                self.push(&name);
            }
            SchemaOrType::Schema(schema) => match &schema.kind {
                SchemaKind::AllOf { members } => {
                    if !members.is_empty() {
                        self.push("(");
                    }

                    let kept: Vec<&SchemaOrType> =
                        members.iter().filter(|m| !self.is_unknown(m)).collect();
                    let count = kept.len();
                    for (index, member) in kept.into_iter().enumerate() {
                        self.schema_type_expr(member, false)?;
                        if index + 1 != count {
                            self.push("& ");
                        }
                    }

                    if !members.is_empty() {
                        self.push(")");
                    }
                }
                SchemaKind::OneOf { members } => {
                    self.push("(");
                    for (index, member) in members.iter().enumerate() {
                        self.schema_type_expr(member, false)?;
                        if index + 1 != members.len() {
                            self.push("| ");
                        }
                    }
                    self.push(")");
                }
                SchemaKind::AnyOf { members } => {
                    // Each member intersected with the others marked
                    // optional. Known approximation: no union separator is
                    // emitted between the alternatives.
                    for (index, member) in members.iter().enumerate() {
                        self.schema_type_expr(member, false)?;

                        if members.len() > 1 {
                            self.push("& Partial<");
                        }

                        let others: Vec<&SchemaOrType> = members
                            .iter()
                            .enumerate()
                            .filter(|(other_index, _)| *other_index != index)
                            .map(|(_, other)| other)
                            .collect();
                        let count = others.len();
                        for (other_index, other) in others.into_iter().enumerate() {
                            self.schema_type_expr(other, false)?;
                            if other_index + 1 != count {
                                self.push("& ");
                            }
                        }

                        if members.len() > 1 {
                            self.push("> ");
                        }
                    }
                }
                SchemaKind::Enum { values } => {
                    if !values.is_empty() {
                        self.push("(");
                    }

                    for (index, value) in values.iter().enumerate() {
                        self.push(&format!("'{}'", value));
                        if index + 1 != values.len() {
                            self.push("| ");
                        }
                    }

                    if !values.is_empty() {
                        self.push(")");
                    }
                }
                SchemaKind::Array { items } => {
                    self.push("Array<\n");
                    self.schema_type_expr(items, false)?;
                    self.push(">\n");
                }
                SchemaKind::Number | SchemaKind::Integer => self.push("number"),
                SchemaKind::String { .. } => self.push("string"),
                SchemaKind::Boolean => self.push("boolean"),
                SchemaKind::Null => self.push("null"),
                SchemaKind::Object {
                    properties,
                    additional_properties,
                } => self.object_type_expr(
                    properties.as_ref(),
                    additional_properties.as_deref(),
                )?,
                SchemaKind::Unknown => self.push("unknown"),
                SchemaKind::Empty => {
                    return Err(AppError::Invariant(EMPTY_AT_RENDER_STAGE.into()));
                }
            },
        }

        if !suppress_modifiers {
            if node.is_optional() {
                self.push(" | undefined");
            }

            if node.is_nullable() {
                self.push(" | null");
            }
        }

        Ok(())
    }

    fn object_type_expr(
        &mut self,
        properties: Option<&IndexMap<String, SchemaOrType>>,
        additional_properties: Option<&SchemaOrType>,
    ) -> AppResult<()> {
        if properties.is_some() || additional_properties.is_some() {
            self.push("{\n");
            if let Some(properties) = properties {
                self.properties_type_expr(properties)?;
            }

            if properties.is_some() && additional_properties.is_some() {
                self.push(", \n");
            }

            if let Some(additional) = additional_properties {
                self.push("[x: string]: ");
                self.schema_type_expr(additional, false)?;
                self.push("\n");
            }

            self.push("}\n");
        } else {
            self.push("unknown");
        }

        Ok(())
    }

    fn properties_type_expr(
        &mut self,
        properties: &IndexMap<String, SchemaOrType>,
    ) -> AppResult<()> {
        let entries = sorted_entries(properties);
        let count = entries.len();
        for (index, (key, schema)) in entries.into_iter().enumerate() {
            let name = self.process_name(key);
            self.push(&name);
            if schema.is_optional() {
                self.push("?");
            }

            self.push(": ");
            self.schema_type_expr(schema, false)?;

            if index + 1 != count {
                self.push(",\n");
            }
        }

        Ok(())
    }

    // --- Validator projection ---

    /// Renders the zod validator construction expression for a node. Unless
    /// suppressed, `.optional()` and `.nullable()` are appended in that
    /// fixed order.
    pub fn schema_validator(
        &mut self,
        node: &SchemaOrType,
        suppress_modifiers: bool,
    ) -> AppResult<()> {
        match node {
            SchemaOrType::Type(reference) => {
                if reference.has_loop {
                    self.push("z.lazy(() => ");
                }

                // Builder functions allow referencing a schema that has not
                // been defined yet.
                if self.use_builder_functions {
                    let name = self.builder_fn_name(&reference.type_name);
                    self.push(&name);
                    self.push("()");
                } else {
                    let name = self.full_type_name(&reference.type_name);
                    self.push(&name);
                }

                if reference.has_loop {
                    self.push(")");
                }
            }
            SchemaOrType::Schema(schema) => match &schema.kind {
                SchemaKind::AllOf { members } => {
                    // An unknown member contributes nothing and must not
                    // degrade the whole intersection to unknown.
                    let kept: Vec<&SchemaOrType> =
                        members.iter().filter(|m| !self.is_unknown(m)).collect();
                    let count = kept.len();
                    let mut open = 0;
                    for (index, member) in kept.into_iter().enumerate() {
                        if open > 0 {
                            self.push(",\n");
                        }

                        if index + 1 != count {
                            open += 1;
                            self.push("z.intersection(\n");
                        }

                        self.schema_validator(member, false)?;
                    }

                    for _ in 0..open {
                        self.push(")");
                    }
                }
                SchemaKind::OneOf { members } => {
                    self.push("z.union([");
                    for (index, member) in members.iter().enumerate() {
                        self.schema_validator(member, false)?;
                        if index + 1 != members.len() {
                            self.push(", ");
                        }
                    }
                    self.push("])");
                }
                SchemaKind::AnyOf { members } => {
                    // Known approximation: a plain union is not a faithful
                    // "at least one of N" validator for N > 2.
                    self.push("z.union([");
                    for (index, member) in members.iter().enumerate() {
                        self.schema_validator(member, false)?;
                        if index + 1 != members.len() {
                            self.push(", ");
                        }
                    }
                    self.push("])");
                }
                SchemaKind::Enum { values } => {
                    self.push("z.enum([\n");
                    for (index, value) in values.iter().enumerate() {
                        self.push(&format!("'{}'", value));
                        if index + 1 != values.len() {
                            self.push(",\n");
                        }
                    }
                    self.push("])\n");
                }
                SchemaKind::Array { items } => {
                    self.push("z.array(\n");
                    self.schema_validator(items, false)?;
                    self.push(")\n");
                }
                SchemaKind::Number => self.push("z.number()"),
                SchemaKind::Integer => self.push("z.number().int()"),
                SchemaKind::String { max_length } => {
                    self.push("z.string()");
                    if let Some(max_length) = max_length {
                        self.push(&format!(".max({})", max_length));
                    }
                }
                SchemaKind::Boolean => self.push("z.boolean()"),
                SchemaKind::Null => self.push("z.null()"),
                SchemaKind::Object {
                    properties,
                    additional_properties,
                } => self.object_validator(
                    properties.as_ref(),
                    additional_properties.as_deref(),
                )?,
                SchemaKind::Unknown => self.push("z.unknown()"),
                SchemaKind::Empty => {
                    return Err(AppError::Invariant(EMPTY_AT_RENDER_STAGE.into()));
                }
            },
        }

        if !suppress_modifiers {
            if node.is_optional() {
                self.push(".optional()");
            }

            if node.is_nullable() {
                self.push(".nullable()");
            }
        }

        Ok(())
    }

    fn object_validator(
        &mut self,
        properties: Option<&IndexMap<String, SchemaOrType>>,
        additional_properties: Option<&SchemaOrType>,
    ) -> AppResult<()> {
        if properties.is_some() || additional_properties.is_some() {
            // Accepted quirk: with both shapes present the validator is a
            // union while the static type is an intersection with an index
            // signature.
            if properties.is_some() && additional_properties.is_some() {
                self.push("z.union([\n");
            }

            if let Some(properties) = properties {
                self.push("z.object({\n");
                self.properties_validator(properties)?;
                self.push("})\n");
                if !self.options.strict {
                    self.push(".nonstrict()");
                }

                if self.options.naming != NamingMode::None {
                    self.transform(properties);
                }
            }

            if properties.is_some() && additional_properties.is_some() {
                self.push(", \n");
            }

            if let Some(additional) = additional_properties {
                self.push("z.record(\n");
                self.schema_validator(additional, false)?;
                self.push(")\n");
            }

            if properties.is_some() && additional_properties.is_some() {
                self.push("])\n");
            }
        } else {
            self.push("z.unknown()");
        }

        Ok(())
    }

    fn properties_validator(
        &mut self,
        properties: &IndexMap<String, SchemaOrType>,
    ) -> AppResult<()> {
        let entries = sorted_entries(properties);
        let count = entries.len();
        for (index, (key, schema)) in entries.into_iter().enumerate() {
            self.push(&format!("{}: ", key));
            self.schema_validator(schema, false)?;

            if index + 1 != count {
                self.push(",\n");
            }
        }

        Ok(())
    }

    /// Attaches the wire-name -> processed-name transform to an object
    /// validator.
    fn transform(&mut self, properties: &IndexMap<String, SchemaOrType>) {
        if self.options.naming == NamingMode::None {
            return;
        }

        if !properties.is_empty() {
            self.push(".transform(o => ({\n");
            for (key, _) in sorted_entries(properties) {
                let name = self.process_name(key);
                self.push(&format!("{}: o.{},\n", name, key));
            }
            self.push("}))");
        }
    }

    /// Renders the processed-name -> wire-name object literal used when a
    /// renamed body is sent back over the wire.
    pub fn untransform(
        &mut self,
        properties: &IndexMap<String, SchemaOrType>,
        object_name: &str,
    ) {
        if self.options.naming == NamingMode::None {
            self.push(object_name);
            return;
        }

        if !properties.is_empty() {
            self.push("{\n");
            for (key, _) in sorted_entries(properties) {
                let name = self.process_name(key);
                self.push(&format!("{}: {}.{},\n", key, object_name, name));
            }
            self.push("}");
        }
    }
}

/// Entries of an order-preserving map, sorted lexicographically by key.
pub(crate) fn sorted_entries<V>(map: &IndexMap<String, V>) -> Vec<(&String, &V)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::descriptor::{Components, Schema, TypeRef};
    use indexmap::indexmap;

    fn empty_api() -> ApiDescriptor {
        ApiDescriptor {
            base_path: String::new(),
            components: Components::default(),
            paths: Vec::new(),
        }
    }

    fn validator_of(api: &ApiDescriptor, node: &SchemaOrType) -> String {
        let options = GeneratorOptions::default();
        let mut engine = RenderEngine::new(api, &options);
        engine.schema_validator(node, false).unwrap();
        engine.take_local()
    }

    fn type_of(api: &ApiDescriptor, node: &SchemaOrType) -> String {
        let options = GeneratorOptions::default();
        let mut engine = RenderEngine::new(api, &options);
        engine.schema_type_expr(node, false).unwrap();
        engine.take_local()
    }

    fn inline(kind: SchemaKind) -> SchemaOrType {
        SchemaOrType::Schema(Schema::new(kind))
    }

    #[test]
    fn test_primitive_projections() {
        let api = empty_api();
        assert_eq!(validator_of(&api, &inline(SchemaKind::Number)), "z.number()");
        assert_eq!(
            validator_of(&api, &inline(SchemaKind::Integer)),
            "z.number().int()"
        );
        assert_eq!(
            validator_of(&api, &inline(SchemaKind::Boolean)),
            "z.boolean()"
        );
        assert_eq!(validator_of(&api, &inline(SchemaKind::Null)), "z.null()");
        assert_eq!(
            validator_of(&api, &inline(SchemaKind::Unknown)),
            "z.unknown()"
        );

        assert_eq!(type_of(&api, &inline(SchemaKind::Integer)), "number");
        assert_eq!(type_of(&api, &inline(SchemaKind::Unknown)), "unknown");
    }

    #[test]
    fn test_string_max_length_reaches_validator_only() {
        let api = empty_api();
        let node = inline(SchemaKind::String {
            max_length: Some(64),
        });
        assert_eq!(validator_of(&api, &node), "z.string().max(64)");
        assert_eq!(type_of(&api, &node), "string");
    }

    #[test]
    fn test_modifiers_apply_in_fixed_order() {
        let api = empty_api();
        let mut node = inline(SchemaKind::Boolean);
        node.set_optional(true);
        node.set_nullable(true);

        assert_eq!(
            validator_of(&api, &node),
            "z.boolean().optional().nullable()"
        );
        assert_eq!(type_of(&api, &node), "boolean | undefined | null");

        let options = GeneratorOptions::default();
        let mut engine = RenderEngine::new(&api, &options);
        engine.schema_validator(&node, true).unwrap();
        assert_eq!(engine.take_local(), "z.boolean()");
    }

    #[test]
    fn test_enum_projections() {
        let api = empty_api();
        let node = inline(SchemaKind::Enum {
            values: vec!["a".into(), "b".into()],
        });
        assert_eq!(validator_of(&api, &node), "z.enum([\n'a',\n'b'])\n");
        assert_eq!(type_of(&api, &node), "('a'| 'b')");
    }

    #[test]
    fn test_all_of_nests_intersections_and_filters_unknowns() {
        let api = empty_api();
        let node = inline(SchemaKind::AllOf {
            members: vec![
                inline(SchemaKind::Number),
                inline(SchemaKind::Unknown),
                inline(SchemaKind::Boolean),
                inline(SchemaKind::Null),
            ],
        });

        assert_eq!(
            validator_of(&api, &node),
            "z.intersection(\nz.number(),\nz.intersection(\nz.boolean(),\nz.null()))"
        );
        assert_eq!(type_of(&api, &node), "(number& boolean& null)");
    }

    #[test]
    fn test_one_of_renders_union() {
        let api = empty_api();
        let node = inline(SchemaKind::OneOf {
            members: vec![inline(SchemaKind::Number), inline(SchemaKind::Boolean)],
        });
        assert_eq!(
            validator_of(&api, &node),
            "z.union([z.number(), z.boolean()])"
        );
        assert_eq!(type_of(&api, &node), "(number| boolean)");
    }

    #[test]
    fn test_any_of_validator_is_a_documented_approximation() {
        // A plain union accepts any single member but does not model the
        // "any subset may be present" combination for more than two
        // members. Preserved as-is.
        let api = empty_api();
        let node = inline(SchemaKind::AnyOf {
            members: vec![
                inline(SchemaKind::Number),
                inline(SchemaKind::Boolean),
                inline(SchemaKind::Null),
            ],
        });
        assert_eq!(
            validator_of(&api, &node),
            "z.union([z.number(), z.boolean(), z.null()])"
        );
    }

    #[test]
    fn test_any_of_type_expr_intersects_partials_without_separator() {
        // Known approximation carried over from the validator's sibling
        // projection: alternatives are emitted back to back with no `|`.
        let api = empty_api();
        let node = inline(SchemaKind::AnyOf {
            members: vec![inline(SchemaKind::Number), inline(SchemaKind::Boolean)],
        });
        assert_eq!(
            type_of(&api, &node),
            "number& Partial<boolean> boolean& Partial<number> "
        );
    }

    #[test]
    fn test_object_with_properties_only() {
        let api = empty_api();
        let mut optional_bool = inline(SchemaKind::Boolean);
        optional_bool.set_optional(true);
        let node = inline(SchemaKind::Object {
            properties: Some(indexmap! {
                "b".to_string() => inline(SchemaKind::Number),
                "a".to_string() => optional_bool,
            }),
            additional_properties: None,
        });

        // Properties render sorted by name.
        assert_eq!(
            validator_of(&api, &node),
            "z.object({\na: z.boolean().optional(),\nb: z.number()})\n"
        );
        assert_eq!(
            type_of(&api, &node),
            "{\na?: boolean | undefined,\nb: number}\n"
        );
    }

    #[test]
    fn test_non_strict_objects_accept_unknown_keys() {
        let api = empty_api();
        let node = inline(SchemaKind::Object {
            properties: Some(indexmap! {
                "a".to_string() => inline(SchemaKind::Number),
            }),
            additional_properties: None,
        });

        let options = GeneratorOptions {
            strict: false,
            ..Default::default()
        };
        let mut engine = RenderEngine::new(&api, &options);
        engine.schema_validator(&node, false).unwrap();
        let rendered = engine.take_local();
        assert!(rendered.contains(".nonstrict()"));

        // The static projection is unaffected by strictness.
        let mut engine = RenderEngine::new(&api, &options);
        engine.schema_type_expr(&node, false).unwrap();
        assert!(!engine.take_local().contains("nonstrict"));
    }

    #[test]
    fn test_object_with_additional_properties_only() {
        let api = empty_api();
        let node = inline(SchemaKind::Object {
            properties: None,
            additional_properties: Some(Box::new(inline(SchemaKind::Number))),
        });
        assert_eq!(validator_of(&api, &node), "z.record(\nz.number())\n");
        assert_eq!(type_of(&api, &node), "{\n[x: string]: number\n}\n");
    }

    #[test]
    fn test_object_with_both_shapes_is_asymmetric_across_projections() {
        // Accepted quirk: union at the validator level, intersection with an
        // index signature at the type level.
        let api = empty_api();
        let node = inline(SchemaKind::Object {
            properties: Some(indexmap! {
                "a".to_string() => inline(SchemaKind::Number),
            }),
            additional_properties: Some(Box::new(inline(SchemaKind::Boolean))),
        });

        assert_eq!(
            validator_of(&api, &node),
            "z.union([\nz.object({\na: z.number()})\n, \nz.record(\nz.boolean())\n])\n"
        );
        assert_eq!(
            type_of(&api, &node),
            "{\na: number, \n[x: string]: boolean\n}\n"
        );
    }

    #[test]
    fn test_array_projections() {
        let api = empty_api();
        let node = inline(SchemaKind::Array {
            items: Box::new(inline(SchemaKind::String { max_length: None })),
        });
        assert_eq!(validator_of(&api, &node), "z.array(\nz.string())\n");
        assert_eq!(type_of(&api, &node), "Array<\nstring>\n");
    }

    #[test]
    fn test_reference_rendering_eager_and_lazy() {
        let mut api = empty_api();
        api.components
            .schemas
            .insert("User".into(), Schema::new(SchemaKind::Boolean));

        let plain = SchemaOrType::Type(TypeRef::new("User"));
        assert_eq!(validator_of(&api, &plain), "zodSchemaUser()");
        assert_eq!(type_of(&api, &plain), "User");

        let mut looped = TypeRef::new("User");
        looped.has_loop = true;
        let looped = SchemaOrType::Type(looped);
        assert_eq!(validator_of(&api, &looped), "z.lazy(() => zodSchemaUser())");

        // The operations engine aliases the evaluated constants instead.
        let options = GeneratorOptions::default();
        let mut engine = RenderEngine::for_operations(&api, &options);
        engine.schema_validator(&looped, false).unwrap();
        assert_eq!(engine.take_local(), "z.lazy(() => Schemas.User)");
    }

    #[test]
    fn test_empty_node_is_an_invariant_violation() {
        let api = empty_api();
        let node = inline(SchemaKind::Empty);

        let options = GeneratorOptions::default();
        let mut engine = RenderEngine::new(&api, &options);
        assert!(matches!(
            engine.schema_validator(&node, false),
            Err(AppError::Invariant(_))
        ));
        assert!(matches!(
            engine.schema_type_expr(&node, false),
            Err(AppError::Invariant(_))
        ));
    }

    #[test]
    fn test_naming_mode_rewrites_and_transforms() {
        let api = empty_api();
        let node = inline(SchemaKind::Object {
            properties: Some(indexmap! {
                "snake_case_prop".to_string() => inline(SchemaKind::Number),
            }),
            additional_properties: None,
        });

        let options = GeneratorOptions {
            naming: NamingMode::CamelCase,
            ..Default::default()
        };

        let mut engine = RenderEngine::new(&api, &options);
        engine.schema_validator(&node, false).unwrap();
        let validator = engine.take_local();
        assert!(validator.contains("snake_case_prop: z.number()"));
        assert!(validator.contains(".transform(o => ({\nsnakeCaseProp: o.snake_case_prop,\n}))"));

        let mut engine = RenderEngine::new(&api, &options);
        engine.schema_type_expr(&node, false).unwrap();
        assert!(engine.take_local().contains("snakeCaseProp: number"));

        let mut engine = RenderEngine::new(&api, &options);
        let SchemaOrType::Schema(schema) = &node else {
            unreachable!();
        };
        let SchemaKind::Object {
            properties: Some(properties),
            ..
        } = &schema.kind
        else {
            unreachable!();
        };
        engine.untransform(properties, "params.body");
        assert_eq!(
            engine.take_local(),
            "{\nsnake_case_prop: params.body.snakeCaseProp,\n}"
        );
    }
}
