//! Schema assembly
//!
//! Drives the operation and type mappers over a whole document and collects
//! the result into a validated [`GraphQLSchema`].

use crate::context::{ScalarKind, TranslationContext, TypeCategory};
use crate::openapi::Document;
use crate::operation_mapper::OperationMapper;
use crate::type_mapper::TypeMapper;
use openapi_graphql_common::{
    FieldNode, GraphQLSchema, ObjectType, Result, RootKind, TranslationError, TranslatorConfig,
    TypeDefinition, TypeRef,
};
use tracing::{debug, info};

/// Field added to Query when the document only has mutations
pub const EMPTY_QUERY_FIELD: &str = "_empty";

/// Builds GraphQL schemas from resolved OpenAPI documents
#[derive(Debug, Clone, Default)]
pub struct SchemaAssembler {
    config: TranslatorConfig,
}

impl SchemaAssembler {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    /// Translate a document into a schema
    ///
    /// Operations are mapped in declaration order (paths, then methods), so
    /// earlier operations win contested names. Object fields are bound
    /// afterwards, once every root field is known.
    pub fn assemble(&self, doc: &Document) -> Result<GraphQLSchema> {
        if doc.operation_count() == 0 {
            return Err(TranslationError::EmptySchema);
        }

        let mut ctx = TranslationContext::new(doc, &self.config);
        let mut query_fields = Vec::new();
        let mut mutation_fields = Vec::new();

        for (path, op) in doc.operations() {
            let root = OperationMapper::map_operation(&mut ctx, path, op)?;
            match root.kind {
                RootKind::Query => query_fields.push(root.field),
                RootKind::Mutation => mutation_fields.push(root.field),
            }
        }

        if self.config.include_unreferenced_schemas {
            for (name, schema) in &doc.components {
                TypeMapper::map_schema(&mut ctx, *schema, TypeCategory::Output, name)?;
            }
        }

        TypeMapper::finalize_pending(&mut ctx)?;

        if query_fields.is_empty() {
            debug!("document has no query operations, adding placeholder field");
            let boolean = ctx.scalar(ScalarKind::Boolean);
            let mut placeholder = FieldNode::new(EMPTY_QUERY_FIELD, TypeRef::named(boolean));
            placeholder.description =
                Some("Placeholder: this API exposes no query operations".to_string());
            query_fields.push(placeholder);
        }

        let query_count = query_fields.len();
        let mutation_count = mutation_fields.len();

        let query = ctx.registry.push(TypeDefinition::Object(ObjectType {
            name: RootKind::Query.type_name().to_string(),
            description: None,
            fields: query_fields,
        }));
        let mutation = if mutation_fields.is_empty() {
            None
        } else {
            Some(ctx.registry.push(TypeDefinition::Object(ObjectType {
                name: RootKind::Mutation.type_name().to_string(),
                description: None,
                fields: mutation_fields,
            })))
        };

        let types = ctx.into_registry().finish()?;
        let schema = GraphQLSchema::new(types, query, mutation);
        schema.validate()?;

        info!(
            title = %doc.title,
            queries = query_count,
            mutations = mutation_count,
            types = schema.types().len(),
            "assembled GraphQL schema"
        );
        Ok(schema)
    }
}
