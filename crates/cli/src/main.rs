//! openapi-graphql CLI
//!
//! Command-line interface for translating OpenAPI documents into GraphQL
//! schemas.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use openapi_graphql_common::{BindingTarget, GraphQLSchema, RootKind, TranslatorConfig};
use openapi_graphql_generator::generate_schema_file;
use openapi_graphql_parser::load_graphql_schema;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "openapi-graphql")]
#[command(
    version,
    about = "Translate OpenAPI 3.x documents into GraphQL schemas",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate an OpenAPI document and write the GraphQL SDL
    #[command(after_help = "EXAMPLES:\n  \
        # Translate the petstore API\n  \
        openapi-graphql convert petstore \\\n    \
        --source ./openapi-spec.yaml \\\n    \
        --output ./graphql-schema.graphql\n\n  \
        # Use translator options from a YAML file\n  \
        openapi-graphql convert petstore \\\n    \
        --source ./openapi-spec.json \\\n    \
        --config ./translator.yaml")]
    Convert {
        /// Name of the API, used in logs and output
        name: String,

        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        source: PathBuf,

        /// Output SDL file
        #[arg(short, long, default_value = "./graphql-schema.graphql")]
        output: PathBuf,

        /// Translator configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Translate an OpenAPI document and summarize the result
    #[command(after_help = "EXAMPLES:\n  \
        openapi-graphql inspect --source ./openapi-spec.yaml")]
    Inspect {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        source: PathBuf,

        /// Translator configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Convert {
            name,
            source,
            output,
            config,
        } => {
            convert_command(
                &name,
                source.as_path(),
                output.as_path(),
                config.as_deref(),
                cli.verbose,
            )?;
        },
        Commands::Inspect { source, config } => {
            inspect_command(source.as_path(), config.as_deref(), cli.verbose)?;
        },
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise warnings, or debug output with `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<TranslatorConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading translator config");
            TranslatorConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))
        },
        None => Ok(TranslatorConfig::default()),
    }
}

fn convert_command(
    name: &str,
    source: &Path,
    output: &Path,
    config_path: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    println!(
        "{} Translating {} from: {}",
        "→".cyan(),
        name.yellow(),
        source.display()
    );

    let config = load_config(config_path)?;
    if verbose {
        println!("  Source: {}", source.display());
        println!("  Output: {}", output.display());
        println!("  Body argument: {}", config.body_argument_name);
        println!("  Custom scalars: {}", config.custom_scalars);
    }

    let schema = load_graphql_schema(name, source, &config)
        .with_context(|| format!("Failed to translate OpenAPI document: {}", source.display()))?;

    println!(
        "{} Translated {} queries, {} mutations, {} types",
        "✓".green(),
        schema.query_fields().len(),
        schema.mutation_fields().len(),
        printable_types(&schema)
    );

    println!("{} Writing GraphQL schema...", "→".cyan());
    generate_schema_file(&schema, output).context("Failed to write GraphQL schema")?;

    println!("\n{}", "✓ Conversion complete!".green().bold());
    println!("\n{}", "Generated files:".bold());
    println!("  📄 {}", output.display());

    Ok(())
}

fn inspect_command(source: &Path, config_path: Option<&Path>, verbose: bool) -> Result<()> {
    println!("{} Inspecting: {}", "→".cyan(), source.display());

    let config = load_config(config_path)?;
    let name = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("api");
    let schema = load_graphql_schema(name, source, &config)
        .with_context(|| format!("Failed to translate OpenAPI document: {}", source.display()))?;

    println!("\n{}", "✓ Translation successful!".green().bold());

    for kind in [RootKind::Query, RootKind::Mutation] {
        let fields = schema.root_fields(kind);
        if fields.is_empty() {
            continue;
        }

        println!("\n{}", format!("{} fields:", kind.type_name()).bold());
        for field in fields {
            let args = field
                .arguments
                .iter()
                .map(|arg| format!("{}: {}", arg.name, schema.display_type(&arg.ty)))
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "  • {}({}): {}",
                field.name.cyan(),
                args,
                schema.display_type(&field.ty)
            );

            if let Some(binding) = &field.resolver {
                println!("    {} {}", binding.method.to_string().yellow(), binding.path);
                if verbose {
                    for arg in &binding.arguments {
                        let target = match &arg.target {
                            BindingTarget::Parameter { location, name } => {
                                format!("{} parameter '{}'", location, name)
                            },
                            BindingTarget::Body { content_type } => {
                                format!("request body ({})", content_type)
                            },
                        };
                        println!("      {} ← {}", arg.argument, target);
                    }
                    if let Some(status) = &binding.response_status {
                        println!("      returns: {}", status);
                    }
                }
            }
        }
    }

    println!("\n{}", "Types:".bold());
    for def in schema.types().iter().filter(|def| !def.is_builtin()) {
        if is_root(&schema, def.name()) {
            continue;
        }
        println!("  • {} {}", def.kind(), def.name().cyan());
    }

    Ok(())
}

fn is_root(schema: &GraphQLSchema, name: &str) -> bool {
    [RootKind::Query, RootKind::Mutation]
        .into_iter()
        .filter_map(|kind| schema.root_type(kind))
        .any(|root| root.name == name)
}

/// Types that end up in the SDL
fn printable_types(schema: &GraphQLSchema) -> usize {
    schema.types().iter().filter(|def| !def.is_builtin()).count()
}
