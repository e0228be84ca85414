//! OpenAPI parsing and OpenAPI-to-GraphQL translation
//!
//! This crate loads OpenAPI 3.x documents and translates them into a
//! [`GraphQLSchema`].
//!
//! ## Translation Strategy
//!
//! Operations become root fields:
//! - GET, HEAD → Query
//! - POST, PUT, PATCH, DELETE, OPTIONS, TRACE → Mutation
//!
//! Schemas become types:
//! - objects → object types (output) and input object types (input)
//! - enums → enum types
//! - `oneOf`/`anyOf` of objects → union types
//! - primitives → built-in or custom scalars
//! - free-form schemas → the JSON scalar
//!
//! Every name goes through the [`naming`] resolver, so the result only
//! contains valid, unique GraphQL identifiers.

mod assembler;
mod context;
pub mod naming;
pub mod openapi;
mod operation_mapper;
mod type_mapper;

pub use assembler::{SchemaAssembler, EMPTY_QUERY_FIELD};
pub use context::{PendingType, ScalarKind, TranslationContext, TypeCategory, TypeRegistry};
pub use naming::{NamingResolver, Namespace};
pub use openapi::{Document, OpenApiParser};
pub use operation_mapper::{OperationMapper, RootField};
pub use type_mapper::TypeMapper;

use openapi_graphql_common::{GraphQLSchema, Result, TranslatorConfig};
use std::path::Path;
use tracing::info_span;

/// Translate a resolved document
///
/// # Arguments
/// * `doc` - Document produced by [`OpenApiParser::parse`]
/// * `config` - Translator options
pub fn translate(doc: &Document, config: &TranslatorConfig) -> Result<GraphQLSchema> {
    SchemaAssembler::new(config.clone()).assemble(doc)
}

/// Load an OpenAPI file and translate it
///
/// # Arguments
/// * `name` - Label for the API, used in logs
/// * `source` - Path to an OpenAPI document (JSON or YAML)
/// * `config` - Translator options
pub fn load_graphql_schema(
    name: &str,
    source: &Path,
    config: &TranslatorConfig,
) -> Result<GraphQLSchema> {
    let _span = info_span!("translate", api = name).entered();
    let doc = OpenApiParser::from_file(source)?.parse()?;
    translate(&doc, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_minimal_document() {
        let doc = OpenApiParser::from_json(
            r#"{"openapi": "3.0.0", "info": {"title": "t", "version": "1"},
                "paths": {"/health": {"get": {"responses": {"204": {"description": "ok"}}}}}}"#,
        )
        .unwrap()
        .parse()
        .unwrap();

        let schema = translate(&doc, &TranslatorConfig::default()).unwrap();
        assert_eq!(schema.query_fields()[0].name, "getHealth");
        assert!(schema.mutation_type_id().is_none());
    }

    #[test]
    fn test_load_missing_file_is_parse_error() {
        let result = load_graphql_schema(
            "missing",
            Path::new("/nonexistent/openapi.yaml"),
            &TranslatorConfig::default(),
        );
        assert!(result.is_err());
    }
}
