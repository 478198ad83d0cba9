//! OpenAPI DTO CLI
//!
//! Command-line front end over the translation, validation, and document
//! post-processing functions, for inspecting what a schema will look like in
//! a generated API document.

use std::any::Any;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use openapi_dto::{
    apply_schema_meta, load_json, load_json_auto, transform, Schema, SchemaHolder, SchemaMeta,
};

#[derive(Parser)]
#[command(name = "openapi-dto")]
#[command(about = "Translate validator schemas into OpenAPI field metadata")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a schema into per-field documentation metadata
    Translate {
        /// Schema source: file path or URL (http:// or https://)
        schema: String,

        /// Metadata file to attach (descriptions, examples)
        #[arg(long)]
        meta: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a payload against a schema
    Validate {
        /// Payload file to validate
        payload: PathBuf,

        /// Schema source: file path or URL
        #[arg(long, short)]
        schema: String,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Apply schema-level metadata to a generated OpenAPI document
    Document {
        /// Document file to post-process
        document: PathBuf,

        /// Schema source: file path or URL
        #[arg(long, short)]
        schema: String,

        /// Name the document files the schema under
        #[arg(long, short)]
        name: String,

        /// Metadata file with schema-level description/example
        #[arg(long)]
        meta: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Translate {
            schema,
            meta,
            output,
            pretty,
        } => run_translate(&schema, meta, output, pretty),
        Commands::Validate {
            payload,
            schema,
            json,
        } => run_validate(&payload, &schema, json),
        Commands::Document {
            document,
            schema,
            name,
            meta,
            output,
            pretty,
        } => run_document(&document, &schema, &name, &meta, output, pretty),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn load_schema(source: &str, meta: Option<&PathBuf>) -> Result<Schema, u8> {
    let tree = load_json_auto(source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let schema = Schema::new(tree);
    let Some(meta_path) = meta else {
        return Ok(schema);
    };

    let meta_value = load_json(meta_path).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;
    let meta: SchemaMeta = serde_json::from_value(meta_value).map_err(|e| {
        eprintln!("Error: invalid metadata file: {}", e);
        2u8
    })?;

    schema.with_meta(meta).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })
}

fn write_output(value: &serde_json::Value, output: Option<PathBuf>, pretty: bool) -> Result<(), u8> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &rendered).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", rendered);
        }
    }

    Ok(())
}

fn run_translate(
    schema_source: &str,
    meta: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<(), u8> {
    let schema = load_schema(schema_source, meta.as_ref())?;
    let holder = SchemaHolder::new("Schema", schema);

    let fields = holder.metadata_factory().map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    write_output(&serde_json::Value::Object(fields), output, pretty)
}

fn run_validate(payload_path: &PathBuf, schema_source: &str, json_output: bool) -> Result<(), u8> {
    let payload = load_json(payload_path).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;
    let schema = load_schema(schema_source, None)?;
    let holder = SchemaHolder::new("Schema", schema);

    match transform(payload, Some(&holder as &dyn Any)) {
        Ok(_) => {
            if json_output {
                println!(r#"{{"valid":true}}"#);
            } else {
                println!("Payload is valid");
            }
            Ok(())
        }
        Err(e) => {
            if json_output {
                match e.to_rejection() {
                    Some(rejection) => match serde_json::to_string(&rejection) {
                        Ok(body) => println!("{}", body),
                        Err(ser) => eprintln!("Error serializing rejection: {}", ser),
                    },
                    None => eprintln!("Error: {}", e),
                }
            } else {
                eprintln!("Validation failed:");
                if let Some(rejection) = e.to_rejection() {
                    for error in &rejection.errors {
                        eprintln!("  {}", error);
                    }
                } else {
                    eprintln!("  {}", e);
                }
            }
            Err(e.exit_code() as u8)
        }
    }
}

fn run_document(
    document_path: &PathBuf,
    schema_source: &str,
    name: &str,
    meta_path: &PathBuf,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<(), u8> {
    let mut document = load_json(document_path).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;
    let schema = load_schema(schema_source, Some(meta_path))?;
    let holder = SchemaHolder::new(name, schema);

    apply_schema_meta(&mut document, &[&holder]);

    write_output(&document, output, pretty)
}
