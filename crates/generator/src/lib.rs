//! GraphQL SDL generation
//!
//! This crate renders a translated [`GraphQLSchema`] as SDL text and hands
//! it to a [`SchemaWriter`].
//!
//! Types are printed in a fixed order: Query, Mutation, then every other
//! type in the order the translator created it. Built-in scalars are left
//! out; custom scalars carry `@specifiedBy` when a specification URL is
//! known.

mod templates;
mod view;
mod writer;

pub use writer::{FileWriter, SchemaWriter};

#[cfg(test)]
pub use writer::MockSchemaWriter;

use openapi_graphql_common::{GraphQLSchema, Result, TranslationError};
use std::path::Path;
use tera::Tera;
use tracing::info;

/// SDL printer
///
/// Renders a schema through the `schema.graphql` tera template.
pub struct SchemaPrinter {
    tera: Tera,
}

impl SchemaPrinter {
    /// Create a new printer with the bundled templates
    pub fn new() -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { tera })
    }

    /// Render a schema to SDL
    pub fn print(&self, schema: &GraphQLSchema) -> Result<String> {
        let context = self.create_context(schema);
        let rendered = self
            .tera
            .render(templates::SCHEMA_TEMPLATE, &context)
            .map_err(|e| TranslationError::Generation(format!("Template error: {:?}", e)))?;

        let mut sdl = rendered.trim_end().to_string();
        sdl.push('\n');
        Ok(sdl)
    }

    /// Render a schema and pass the text to a writer
    pub fn write(&self, schema: &GraphQLSchema, writer: &dyn SchemaWriter) -> Result<()> {
        let sdl = self.print(schema)?;
        writer.write(&sdl)
    }

    /// Create template context from a schema
    fn create_context(&self, schema: &GraphQLSchema) -> tera::Context {
        let mut context = tera::Context::new();
        context.insert("types", &view::type_views(schema));
        context
    }
}

/// Render a schema to SDL (convenience function)
pub fn print_schema(schema: &GraphQLSchema) -> Result<String> {
    SchemaPrinter::new()?.print(schema)
}

/// Render a schema and write it to a file (convenience function)
pub fn generate_schema_file(schema: &GraphQLSchema, output_path: &Path) -> Result<()> {
    let printer = SchemaPrinter::new()?;
    printer.write(schema, &FileWriter::new(output_path))?;

    info!(path = %output_path.display(), types = schema.types().len(), "generated GraphQL schema");
    Ok(())
}
