//! Common types and utilities for openapi-graphql
//!
//! This crate contains the GraphQL schema model produced by the translator,
//! the translator configuration, and the error type shared by the parser,
//! generator, and CLI components.

pub mod config;
pub mod schema;

pub use config::{CollisionPolicy, TranslatorConfig, RESERVED_TYPE_NAMES};
pub use schema::{
    ArgumentBinding, BindingTarget, ConstValue, EnumType, EnumValue, FieldNode, GraphQLSchema,
    HttpMethod, InputObjectType, InputValue, ObjectType, ParameterLocation, ResolverBinding,
    RootKind, ScalarType, TypeDefinition, TypeId, TypeKind, TypeRef, UnionType,
};

use thiserror::Error;

/// Errors that can occur while loading, translating, or printing a schema
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unresolved reference: {0}")]
    UnresolvedReference(String),

    #[error("Circular schema reference without an object boundary: {0}")]
    Cycle(String),

    #[error("Name collision in {namespace}: '{name}' is already assigned")]
    NameCollision { namespace: String, name: String },

    #[error("Unsupported schema construct in {schema}: {construct}")]
    UnsupportedSchemaConstruct { schema: String, construct: String },

    #[error("Document defines no operations; a GraphQL schema needs at least one query field")]
    EmptySchema,

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for translator operations
pub type Result<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TranslationError::NameCollision {
            namespace: "type names".to_string(),
            name: "Status".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Name collision in type names: 'Status' is already assigned"
        );

        let err = TranslationError::Cycle("#/components/schemas/Loop".to_string());
        assert!(err.to_string().contains("Loop"));
    }
}
