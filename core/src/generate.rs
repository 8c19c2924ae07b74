#![deny(missing_docs)]

//! # Generation Pipeline
//!
//! The one-shot "build and emit" entry point: validates the option set,
//! builds the descriptor graph, runs both emitters and assembles the output
//! buffer. Each invocation constructs its own registries and buffers and
//! discards them on completion; nothing is shared across runs.

use crate::error::{AppError, AppResult};
use crate::oas::builder::{build_api_descriptor, DescriptorBuilderOptions};
use crate::oas::document::RawDocument;
use crate::render::actions::{ActionBinding, ActionEmitter, ReactFetchingLibraryBinding};
use crate::render::buffer::{OutputBuffer, Segment};
use crate::render::types::TypeDeclarationEmitter;
use crate::render::{ActionGeneratorKind, GeneratorOptions, NamingMode};

const HEADER_LINES: [&str; 4] = [
    "/**\n",
    "* Generated code, DO NOT modify directly.\n",
    "*/\n",
    "import * as z from 'zod';\n",
];

/// Rejects incompatible option combinations before any document is read.
///
/// Field renaming rewrites property names inside the inferred validator
/// shape; combining it with explicit or skipped types would leave the
/// renames unobservable or inconsistent.
pub fn validate_options(options: &GeneratorOptions) -> AppResult<()> {
    if options.naming != NamingMode::None && (options.explicit_types || options.skip_types) {
        return Err(AppError::Config(
            "naming cannot be combined with explicitTypes or skipTypes".into(),
        ));
    }

    Ok(())
}

/// Builds the descriptor graph for `document` and emits the generated
/// source.
pub fn generate(
    document: &RawDocument,
    builder_options: DescriptorBuilderOptions,
    options: &GeneratorOptions,
) -> AppResult<String> {
    validate_options(options)?;

    let descriptor = build_api_descriptor(document, builder_options)?;

    let mut buffer = OutputBuffer::new();
    for line in HEADER_LINES {
        buffer.write(line, Segment::Header);
    }

    TypeDeclarationEmitter::new(&descriptor, options).build(&mut buffer)?;

    match options.action_generator {
        ActionGeneratorKind::None => {}
        ActionGeneratorKind::ReactFetchingLibrary => {
            let binding = ReactFetchingLibraryBinding;
            let mut emitter = ActionEmitter::new(&descriptor, options, &mut buffer);
            binding.write_header(&mut buffer, options);
            emitter.build(&binding, &mut buffer)?;
        }
    }

    Ok(buffer.assemble())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> RawDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_naming_is_rejected_with_explicit_or_skipped_types() {
        let explicit = GeneratorOptions {
            naming: NamingMode::CamelCase,
            explicit_types: true,
            ..Default::default()
        };
        assert!(matches!(
            validate_options(&explicit),
            Err(AppError::Config(_))
        ));

        let skipped = GeneratorOptions {
            naming: NamingMode::CamelCase,
            skip_types: true,
            ..Default::default()
        };
        assert!(matches!(
            validate_options(&skipped),
            Err(AppError::Config(_))
        ));

        let inferred = GeneratorOptions {
            naming: NamingMode::CamelCase,
            ..Default::default()
        };
        assert!(validate_options(&inferred).is_ok());
    }

    #[test]
    fn test_config_is_validated_before_the_document_is_inspected() {
        // The document carries an unsupported construct, but the option
        // check fires first.
        let doc = parse(json!({
            "openapi": "3.0.0",
            "info": {"title": "t", "version": "1"},
            "paths": {"/x": {"get": {"responses": {"default": {"description": "d"}}}}}
        }));
        let options = GeneratorOptions {
            naming: NamingMode::CamelCase,
            skip_types: true,
            ..Default::default()
        };
        assert!(matches!(
            generate(&doc, DescriptorBuilderOptions::default(), &options),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_end_to_end_single_string_response() {
        let doc = parse(json!({
            "openapi": "3.0.0",
            "info": {"title": "t", "version": "1"},
            "paths": {
                "/foo": {
                    "get": {
                        "responses": {
                            "200": {"content": {"application/json": {"schema":
                                {"type": "string"}}}}
                        }
                    }
                }
            }
        }));

        let options = GeneratorOptions {
            action_generator: ActionGeneratorKind::ReactFetchingLibrary,
            ..Default::default()
        };
        let output = generate(&doc, DescriptorBuilderOptions::default(), &options).unwrap();

        assert!(output.starts_with("/**\n* Generated code, DO NOT modify directly.\n*/\n"));
        assert!(output.contains("import * as z from 'zod';\n"));
        assert!(output.contains("export module GetFoo {\n"));
        assert!(output.contains("export const Response200 = z.string();\n"));
        assert!(output.contains("new ValidateRule(Response200, 'unknown', 200)\n"));
        assert!(output.contains(
            "export type Payload = ValidatedResponse<'unknown', 200, Response200> | \
             ValidatedResponse<'unknown', undefined, unknown>;\n"
        ));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let doc = parse(json!({
            "openapi": "3.0.0",
            "info": {"title": "t", "version": "1"},
            "paths": {
                "/b": {"get": {"responses": {"204": {"description": "none"}}}},
                "/a": {"post": {"responses": {"201": {"content":
                    {"application/json": {"schema": {"$ref": "#/components/schemas/Thing"}}}}}}}
            },
            "components": {
                "schemas": {
                    "Thing": {"type": "object", "properties": {
                        "self": {"$ref": "#/components/schemas/Thing"},
                        "kind": {"enum": ["a", "b"]}
                    }}
                }
            }
        }));

        let options = GeneratorOptions {
            action_generator: ActionGeneratorKind::ReactFetchingLibrary,
            ..Default::default()
        };
        let first = generate(&doc, DescriptorBuilderOptions::default(), &options).unwrap();
        let second = generate(&doc, DescriptorBuilderOptions::default(), &options).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("z.lazy(() => zodSchemaThing())"));
    }

    #[test]
    fn test_no_action_generator_emits_no_operations_block() {
        let doc = parse(json!({
            "openapi": "3.0.0",
            "info": {"title": "t", "version": "1"},
            "paths": {"/foo": {"get": {"responses": {"200": {"content":
                {"application/json": {"schema": {"type": "string"}}}}}}}},
            "components": {"schemas": {"User": {"type": "string"}}}
        }));

        let output =
            generate(&doc, DescriptorBuilderOptions::default(), &GeneratorOptions::default())
                .unwrap();
        assert!(output.contains("export const User = zodSchemaUser();"));
        assert!(!output.contains("export module Operations"));
        assert!(!output.contains("createClient"));
        assert!(!output.contains("ValidatedResponse"));
    }
}
