#![deny(missing_docs)]

//! # Operation/Action Emitter
//!
//! Emits, per API operation, the anonymous inline declarations, the
//! parameter-bag shape, the discriminated validated-payload union, and a
//! client body delegating the network-call construction to a pluggable
//! `ActionBinding`. Concrete target-framework bindings implement the trait;
//! the core never branches on the flavor.

use crate::error::AppResult;
use crate::oas::descriptor::{
    ApiDescriptor, Operation, ParamLocation, Parameter, RequestBody, Response, SchemaKind,
    SchemaOrType,
};
use crate::render::buffer::{OutputBuffer, Segment};
use crate::render::engine::RenderEngine;
use crate::render::GeneratorOptions;
use heck::{ToLowerCamelCase, ToUpperCamelCase};
use indexmap::IndexMap;

/// A target-framework binding. Implementations render the network-call
/// construction for one operation against the descriptor graph; everything
/// else (modules, parameter bags, payload unions) is flavor-independent and
/// owned by the emitter.
pub trait ActionBinding {
    /// Writes binding-specific header imports.
    fn write_header(&self, buffer: &mut OutputBuffer, options: &GeneratorOptions);

    /// Renders the action construction for one operation into the emitter.
    fn action_function(&self, emitter: &mut ActionEmitter<'_>, operation: &Operation)
        -> AppResult<()>;
}

/// Emits the operations segment.
pub struct ActionEmitter<'a> {
    api: &'a ApiDescriptor,
    options: &'a GeneratorOptions,
    engine: RenderEngine<'a>,
}

impl<'a> ActionEmitter<'a> {
    /// Creates an emitter over a fully built, cycle-annotated descriptor and
    /// writes the flavor-independent header import.
    pub fn new(
        api: &'a ApiDescriptor,
        options: &'a GeneratorOptions,
        buffer: &mut OutputBuffer,
    ) -> Self {
        if !options.skip_types {
            buffer.write(
                "import { ValidatedResponse } from 'openapi2typescript';\n",
                Segment::Header,
            );
        }

        Self {
            api,
            options,
            engine: RenderEngine::for_operations(api, options),
        }
    }

    /// Emits the operations segment, delegating each action body to the
    /// binding.
    pub fn build(&mut self, binding: &dyn ActionBinding, buffer: &mut OutputBuffer) -> AppResult<()> {
        let api = self.api;

        self.push("export module Operations {\n");
        for path in &api.paths {
            for operation in &path.operations {
                self.push(&format!("export module {} {{\n", operation.id));
                self.anonymous_types(operation)?;
                self.params(operation);
                self.payload_type(operation);
                self.push("}\n");
            }
        }

        self.push("}\n\n");

        self.push("const createClient = () => {\n");
        let mut operations = Vec::new();

        for path in &api.paths {
            for operation in &path.operations {
                self.push(&format!(
                    "// {} {}\n",
                    operation.verb.as_str(),
                    operation.path
                ));
                if let Some(description) = &operation.description {
                    for line in description.split('\n') {
                        self.push(&format!("// {}\n", line));
                    }
                }

                operations.push(operation.id.clone());

                self.push(&format!("const {} = (() => {{\n", operation.id));
                if !operation.responses.is_empty() {
                    binding.action_function(self, operation)?;
                }
                self.push("\n");
                self.push("})();\n");
            }
        }

        self.push(&format!("return {{ {} }};", operations.join(", ")));
        self.push("};\n\n");
        self.push("export const client = createClient();\n");
        self.engine.flush_to(buffer, Segment::Operations);

        Ok(())
    }

    /// Appends a fragment to the pending operations text.
    pub fn push(&mut self, text: &str) {
        self.engine.push(text);
    }

    /// The descriptor graph under emission.
    pub fn api(&self) -> &'a ApiDescriptor {
        self.api
    }

    /// The active generation options.
    pub fn options(&self) -> &'a GeneratorOptions {
        self.options
    }

    /// Renders a validator expression at the current position.
    pub fn validator(&mut self, node: &SchemaOrType, suppress_modifiers: bool) -> AppResult<()> {
        self.engine.schema_validator(node, suppress_modifiers)
    }

    /// Renders a static type expression at the current position.
    pub fn type_expr(&mut self, node: &SchemaOrType, suppress_modifiers: bool) -> AppResult<()> {
        self.engine.schema_type_expr(node, suppress_modifiers)
    }

    /// Renders the processed-name -> wire-name object literal for a renamed
    /// body.
    pub fn untransform(&mut self, properties: &IndexMap<String, SchemaOrType>, object_name: &str) {
        self.engine.untransform(properties, object_name);
    }

    /// Prefixed name of a named schema (`Schemas.X`).
    pub fn full_type_name(&self, type_name: &str) -> String {
        self.engine.full_type_name(type_name)
    }

    /// Parameters with cookie parameters filtered out.
    pub fn filtered_parameters(parameters: &[Parameter]) -> Vec<&Parameter> {
        parameters
            .iter()
            .filter(|p| p.location != ParamLocation::Cookie)
            .collect()
    }

    /// Type name synthesized for an inline (anonymous) schema.
    pub fn anonymous_type_name(&self, name: &str) -> String {
        name.replace(['/', '{', '}', '[', ']', ':'], "_")
            .to_upper_camel_case()
    }

    /// Property name used for a parameter in the parameter bag.
    pub fn param_name(&self, name: &str) -> String {
        name.replace([':', '[', ']'], "_").to_lower_camel_case()
    }

    /// The action type alias emitted per operation.
    pub fn action_type_name(&self) -> &'static str {
        "ActionCreator"
    }

    /// The validated-payload type alias emitted per operation.
    pub fn payload_type_name(&self) -> &'static str {
        "Payload"
    }

    /// The action constructor binding emitted per operation.
    pub fn action_fn_name(&self) -> &'static str {
        "actionCreator"
    }

    /// The operation path with the resolved base path prepended.
    pub fn absolute_path(&self, path: &str) -> String {
        format!("{}{}", self.api.base_path, path)
    }

    /// Name used for a response type: the referred schema name (optionally
    /// prefixed) or a synthesized `ResponseNNN` for inline schemas.
    pub fn response_type_name(&self, response: &Response, full_name: bool) -> String {
        match &response.schema {
            SchemaOrType::Type(reference) => {
                if full_name {
                    self.full_type_name(&reference.type_name)
                } else {
                    reference.type_name.clone()
                }
            }
            SchemaOrType::Schema(_) => {
                self.anonymous_type_name(&format!("Response{}", response.status))
            }
        }
    }

    fn request_body_type_name(&self, request_body: &RequestBody) -> String {
        match &request_body.schema {
            SchemaOrType::Type(reference) => self.full_type_name(&reference.type_name),
            SchemaOrType::Schema(_) => self.anonymous_type_name("body"),
        }
    }

    /// Emits const/type pairs for every inline schema the operation uses:
    /// parameters, request body and responses defined without a top-level
    /// name need anonymous declarations to hang the validators on.
    fn anonymous_types(&mut self, operation: &Operation) -> AppResult<()> {
        for parameter in Self::filtered_parameters(&operation.parameters) {
            if let SchemaOrType::Schema(_) = &parameter.schema {
                let prop_name = self.anonymous_type_name(&parameter.name);
                self.push(&format!("const {} = ", prop_name));
                self.validator(&parameter.schema, true)?;
                self.push(";\n");

                if !self.options.skip_types {
                    self.push(&format!("type {} = ", prop_name));
                    if self.options.explicit_types {
                        self.type_expr(&parameter.schema, true)?;
                    } else {
                        self.push(&format!("z.infer<typeof {}>", prop_name));
                    }

                    self.push(";\n");
                }
            }
        }

        if let Some(request_body) = &operation.request_body {
            if let SchemaOrType::Schema(_) = &request_body.schema {
                let prop_name = self.anonymous_type_name("body");
                self.push(&format!("export const {} = ", prop_name));
                self.validator(&request_body.schema, true)?;
                self.push(";\n");
                if !self.options.skip_types {
                    self.push(&format!("export type {} = ", prop_name));
                    if self.options.explicit_types {
                        self.type_expr(&request_body.schema, true)?;
                    } else {
                        self.push(&format!("z.infer<typeof {}>", prop_name));
                    }

                    self.push(";\n");
                }
            }
        }

        for response in &operation.responses {
            if let SchemaOrType::Schema(_) = &response.schema {
                let prop_name = self.response_type_name(response, false);
                self.push(&format!("export const {} = ", prop_name));
                self.validator(&response.schema, true)?;
                self.push(";\n");
                if !self.options.skip_types {
                    self.push(&format!("export type {} = ", prop_name));
                    if self.options.explicit_types {
                        self.type_expr(&response.schema, true)?;
                    } else {
                        self.push(&format!("z.infer<typeof {}>", prop_name));
                    }

                    self.push(";\n");
                }
            }
        }

        Ok(())
    }

    /// Emits the parameter-bag shape: query/header/path parameters plus the
    /// body, cookie parameters excluded. A comment block stands in when
    /// types are skipped.
    fn params(&mut self, operation: &Operation) {
        if operation.parameters.is_empty() && operation.request_body.is_none() {
            return;
        }

        if self.options.skip_types {
            self.push("/*\n Params\n");
        } else {
            self.push("export interface Params {\n");
        }

        if !operation.parameters.is_empty() {
            let filtered = Self::filtered_parameters(&operation.parameters);
            let count = filtered.len();
            for (index, parameter) in filtered.into_iter().enumerate() {
                let is_required = !parameter.schema.is_optional();
                let name = self.param_name(&parameter.name);
                self.push(&format!(
                    "'{}'{}:",
                    name,
                    if is_required { "" } else { "?" }
                ));
                match &parameter.schema {
                    SchemaOrType::Type(reference) => {
                        let full = self.full_type_name(&reference.type_name);
                        self.push(&full);
                    }
                    SchemaOrType::Schema(_) => {
                        let anonymous = self.anonymous_type_name(&parameter.name);
                        self.push(&anonymous);
                    }
                }

                if operation.request_body.is_some() || index + 1 != count {
                    self.push(",\n");
                }
            }
        }

        if let Some(request_body) = &operation.request_body {
            let type_name = self.request_body_type_name(request_body);
            self.push("body");

            if let SchemaOrType::Type(reference) = &request_body.schema {
                if reference.is_optional {
                    self.push("?");
                }
            }

            self.push(&format!(": {}", type_name));
        }

        if self.options.skip_types {
            self.push("\n*/\n");
        } else {
            self.push("\n}\n\n");
        }
    }

    /// Emits the discriminated validated-payload union: one member per
    /// declared response plus the untyped fallback.
    fn payload_type(&mut self, operation: &Operation) {
        if operation.responses.is_empty() || self.options.skip_types {
            return;
        }

        let payload = self.payload_type_name();
        self.push(&format!("export type {} = ", payload));

        for response in &operation.responses {
            let value_type = self.response_type_name(response, true);
            let tag = match &response.schema {
                SchemaOrType::Type(_) => self.response_type_name(response, false),
                SchemaOrType::Schema(_) => "unknown".to_string(),
            };
            self.push(&format!(
                "ValidatedResponse<'{}', {}, {}> | ",
                tag, response.status, value_type
            ));
        }

        self.push("ValidatedResponse<'unknown', undefined, unknown>;\n");
    }
}

/// The react-fetching-library binding: renders each operation as an
/// `actionBuilder` chain with path substitution, a query bag and the
/// status-to-validator rule set.
pub struct ReactFetchingLibraryBinding;

impl ActionBinding for ReactFetchingLibraryBinding {
    fn write_header(&self, buffer: &mut OutputBuffer, options: &GeneratorOptions) {
        if !options.skip_types {
            buffer.write(
                "import { Action } from 'react-fetching-library';\n",
                Segment::Header,
            );
        }

        buffer.write(
            "import { ValidateRule } from 'openapi2typescript';\n",
            Segment::Header,
        );

        buffer.write(
            &format!(
                "import {{ actionBuilder{} }} from 'openapi2typescript-plugin-react-fetching-library';\n",
                if options.skip_types {
                    ""
                } else {
                    ", ActionValidatableConfig"
                }
            ),
            Segment::Header,
        );
    }

    fn action_function(
        &self,
        emitter: &mut ActionEmitter<'_>,
        operation: &Operation,
    ) -> AppResult<()> {
        let options = emitter.options();
        let action_type = emitter.action_type_name();
        let payload_type = emitter.payload_type_name();

        if !options.skip_types {
            emitter.push(&format!(
                "export type {} = Action<{}, ActionValidatableConfig>;\n",
                action_type, payload_type
            ));
        }

        emitter.push(&format!("export const {} = (", emitter.action_fn_name()));
        if !operation.parameters.is_empty() || operation.request_body.is_some() {
            emitter.push("params");
            if !options.skip_types {
                emitter.push(": Params");
            }
        }

        emitter.push(")");

        if !options.skip_types {
            emitter.push(&format!(": {}", action_type));
        }

        emitter.push(" => {\n");

        // Path params
        emitter.push(&format!(
            "const path = '{}'\n",
            emitter.absolute_path(&operation.path)
        ));
        for parameter in ActionEmitter::filtered_parameters(&operation.parameters) {
            if parameter.location != ParamLocation::Path {
                continue;
            }
            let name = emitter.param_name(&parameter.name);
            emitter.push(&format!(
                ".replace('{{{}}}', params['{}'].toString())\n",
                parameter.name, name
            ));
        }

        emitter.push(";\n");

        // Query params
        emitter.push("const query = {}");
        if !options.skip_types {
            emitter.push(" as Record<string, any>");
        }

        emitter.push(";\n");

        for parameter in ActionEmitter::filtered_parameters(&operation.parameters) {
            if parameter.location != ParamLocation::Query {
                continue;
            }
            let name = emitter.param_name(&parameter.name);
            emitter.push(&format!("if (params['{}'] !== undefined) {{\n", name));
            emitter.push(&format!(
                "query['{}'] = params['{}'];\n",
                parameter.name, name
            ));
            emitter.push("}\n\n");
        }

        emitter.push(&format!(
            "return actionBuilder('{}', path)\n",
            operation.verb.as_str()
        ));
        emitter.push(".queryParams(query)\n");

        if let Some(request_body) = &operation.request_body {
            let resolved = request_body
                .schema
                .resolve(&emitter.api().components.schemas);
            let object_properties = resolved.and_then(|schema| match &schema.kind {
                SchemaKind::Object {
                    properties: Some(properties),
                    ..
                } => Some(properties),
                _ => None,
            });

            if let Some(properties) = object_properties {
                emitter.push(".data(\n");
                emitter.untransform(properties, "params.body");
                emitter.push(")\n");
            } else {
                emitter.push(".data(params.body)\n");
            }
        }

        emitter.push(".config({\nrules:[\n");
        for (index, response) in operation.responses.iter().enumerate() {
            let tag = match &response.schema {
                SchemaOrType::Type(_) => {
                    format!("'{}'", emitter.response_type_name(response, false))
                }
                SchemaOrType::Schema(_) => "'unknown'".to_string(),
            };
            let value_type = emitter.response_type_name(response, true);
            emitter.push(&format!(
                "new ValidateRule({}, {}, {})\n",
                value_type, tag, response.status
            ));
            if index + 1 != operation.responses.len() {
                emitter.push(",\n");
            }
        }
        emitter.push("]})\n");

        emitter.push(".build();\n");
        emitter.push("}\n");

        Ok(())
    }
}
