#![deny(missing_docs)]

//! # o2ts CLI
//!
//! Command line surface for the OpenAPI-to-TypeScript generator.
//!
//! Generates TypeScript code from OpenAPI files: request and response types
//! for every operation, zod validators for every status code, and optional
//! binding code for react-fetching-library.

use clap::Parser;
use o2ts_core::{
    generate, validate_options, ActionGeneratorKind, AppResult, DescriptorBuilderOptions,
    GeneratorOptions, NamingMode, RawDocument,
};
use std::path::{Path, PathBuf};

mod input;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Generates TypeScript code from OpenAPI files")]
struct Cli {
    /// URL or local path to the openapi.json file.
    #[clap(short, long)]
    input: String,

    /// Output file to put the generated code. An existing directory gets a
    /// `Generated.ts` appended.
    #[clap(short, long)]
    output: PathBuf,

    /// Skips the postprocess (formatter, linter and the eslint banner).
    /// Formatting itself runs in external tooling.
    #[clap(short = 's', long)]
    skip_post_process: bool,

    /// Chooses the generator for the actions: `react-fetching-library` or
    /// `none` (only validators and types).
    #[clap(short = 'a', long, default_value = "none", value_parser = parse_action_generator)]
    action_generator: ActionGeneratorKind,

    /// Add `/* eslint-disable */` on top of the generated file.
    #[clap(long)]
    add_eslint_disable: bool,

    /// Skip the types, useful for js building.
    #[clap(long)]
    skip_types: bool,

    /// Ignore unknown object keys instead of counting them as an error.
    /// Useful to avoid failing when a new schema version adds properties.
    #[clap(long = "no-strict")]
    no_strict: bool,

    /// Override base path for all the services.
    #[clap(long, env = "O2TS_API_BASE_PATH")]
    api_base_path: Option<String>,

    /// Use explicit types instead of inferring from the zod schema. Makes
    /// the types more human readable and can help the IDE with recursion.
    #[clap(long)]
    explicit_types: bool,

    /// Field naming for generated types and validators: `none` or
    /// `camelcase`.
    #[clap(long, default_value = "none", value_parser = parse_naming)]
    naming: NamingMode,
}

fn parse_action_generator(raw: &str) -> Result<ActionGeneratorKind, String> {
    match raw.to_uppercase().as_str() {
        "REACT-FETCHING-LIBRARY" => Ok(ActionGeneratorKind::ReactFetchingLibrary),
        "NONE" => Ok(ActionGeneratorKind::None),
        _ => Err(format!("Unknown action generator: {}", raw)),
    }
}

fn parse_naming(raw: &str) -> Result<NamingMode, String> {
    match raw.to_uppercase().as_str() {
        "NONE" => Ok(NamingMode::None),
        "CAMELCASE" => Ok(NamingMode::CamelCase),
        _ => Err(format!("Unknown naming: {}", raw)),
    }
}

fn generator_options(cli: &Cli) -> GeneratorOptions {
    GeneratorOptions {
        skip_types: cli.skip_types,
        strict: !cli.no_strict,
        explicit_types: cli.explicit_types,
        naming: cli.naming,
        action_generator: cli.action_generator,
    }
}

fn resolve_output(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.join("Generated.ts");
    }

    path.to_path_buf()
}

fn execute(cli: &Cli) -> AppResult<()> {
    let options = generator_options(cli);
    // Pre-flight: incompatible options are rejected before the document is
    // read.
    validate_options(&options)?;

    let text = input::read_document(&cli.input)?;
    let document: RawDocument = serde_json::from_str(&text)?;

    let builder_options = DescriptorBuilderOptions {
        non_required_property_is_null: true,
        base_path: cli.api_base_path.clone(),
    };

    let mut generated = generate(&document, builder_options, &options)?;

    // The prettier/eslint post-process belongs to external tooling; the
    // eslint banner is the only cosmetic step applied here.
    if cli.add_eslint_disable && !cli.skip_post_process {
        generated = format!("/* eslint-disable */\n{}", generated);
    }

    std::fs::write(resolve_output(&cli.output), generated)?;

    Ok(())
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    execute(&cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    fn cli_for(input: &str, output: &Path) -> Cli {
        Cli::parse_from([
            "o2ts",
            "--input",
            input,
            "--output",
            output.to_str().unwrap(),
        ])
    }

    fn sample_document() -> &'static str {
        r##"{
            "openapi": "3.0.0",
            "info": {"title": "sample", "version": "1.0.0"},
            "paths": {
                "/foo": {
                    "get": {
                        "responses": {
                            "200": {"content": {"application/json":
                                {"schema": {"type": "string"}}}}
                        }
                    }
                }
            }
        }"##
    }

    #[test]
    fn test_execute_writes_generated_file_into_directory() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", sample_document()).unwrap();
        let out_dir = tempfile::tempdir().unwrap();

        let cli = cli_for(file.path().to_str().unwrap(), out_dir.path());
        execute(&cli).unwrap();

        let generated = out_dir.path().join("Generated.ts");
        let content = std::fs::read_to_string(generated).unwrap();
        assert!(content.contains("Generated code, DO NOT modify directly."));
        assert!(content.contains("import * as z from 'zod';"));
    }

    #[test]
    fn test_eslint_disable_prefix() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", sample_document()).unwrap();
        let out_dir = tempfile::tempdir().unwrap();

        let mut cli = cli_for(file.path().to_str().unwrap(), out_dir.path());
        cli.add_eslint_disable = true;
        execute(&cli).unwrap();

        let content = std::fs::read_to_string(out_dir.path().join("Generated.ts")).unwrap();
        assert!(content.starts_with("/* eslint-disable */\n"));
    }

    #[test]
    fn test_incompatible_options_fail_before_reading_input() {
        let out_dir = tempfile::tempdir().unwrap();
        // The input path does not exist; the pre-flight check must fire
        // first.
        let mut cli = cli_for("/definitely/not/here.json", out_dir.path());
        cli.naming = NamingMode::CamelCase;
        cli.skip_types = true;

        let err = execute(&cli).unwrap_err();
        assert!(matches!(err, o2ts_core::AppError::Config(_)));
    }
}
