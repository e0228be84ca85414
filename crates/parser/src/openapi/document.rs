//! Normalized OpenAPI document model
//!
//! This is what the translator consumes: every `$ref` has been resolved to a
//! [`SchemaId`] in the document's schema arena, path-level parameters are
//! merged into operations, and one media type has been chosen per body.
//! Recursive schemas are ordinary id cycles, so no reference nodes remain.

use indexmap::IndexMap;
use openapi_graphql_common::{HttpMethod, ParameterLocation, Result, TranslationError};
use serde_json::Value;

/// Index of a schema inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(usize);

impl SchemaId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Resolved OpenAPI document
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    /// Paths in declaration order
    pub paths: Vec<PathItem>,
    /// Component schemas in declaration order
    pub components: IndexMap<String, SchemaId>,
    schemas: Vec<SchemaDef>,
}

impl Document {
    pub fn new(
        title: impl Into<String>,
        version: impl Into<String>,
        description: Option<String>,
        paths: Vec<PathItem>,
        components: IndexMap<String, SchemaId>,
        arena: SchemaArena,
    ) -> Result<Self> {
        Ok(Self {
            title: title.into(),
            version: version.into(),
            description,
            paths,
            components,
            schemas: arena.finish()?,
        })
    }

    /// Look up a schema; ids are only handed out by this document's arena
    pub fn schema(&self, id: SchemaId) -> &SchemaDef {
        &self.schemas[id.0]
    }

    pub fn schemas(&self) -> impl Iterator<Item = (SchemaId, &SchemaDef)> {
        self.schemas.iter().enumerate().map(|(i, s)| (SchemaId(i), s))
    }

    pub fn component(&self, name: &str) -> Option<SchemaId> {
        self.components.get(name).copied()
    }

    /// All operations, paths first then methods, in declaration order
    pub fn operations(&self) -> impl Iterator<Item = (&PathItem, &Operation)> {
        self.paths
            .iter()
            .flat_map(|p| p.operations.iter().map(move |op| (p, op)))
    }

    pub fn operation_count(&self) -> usize {
        self.paths.iter().map(|p| p.operations.len()).sum()
    }
}

/// Storage for schema definitions, filled in two steps so that
/// recursive schemas can refer to ids before their bodies exist
#[derive(Debug, Default)]
pub struct SchemaArena {
    slots: Vec<Option<SchemaDef>>,
}

impl SchemaArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id whose definition follows later
    pub fn reserve(&mut self) -> SchemaId {
        self.slots.push(None);
        SchemaId(self.slots.len() - 1)
    }

    pub fn define(&mut self, id: SchemaId, schema: SchemaDef) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            *slot = Some(schema);
        }
    }

    pub fn push(&mut self, schema: SchemaDef) -> SchemaId {
        self.slots.push(Some(schema));
        SchemaId(self.slots.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn finish(self) -> Result<Vec<SchemaDef>> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.ok_or_else(|| {
                    TranslationError::Parse(format!("schema #{} was reserved but never defined", i))
                })
            })
            .collect()
    }
}

/// A schema with all references resolved
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDef {
    /// Component name, else `title`
    pub name: Option<String>,
    /// JSON pointer of the definition, used in error messages
    pub location: String,
    pub description: Option<String>,
    pub nullable: bool,
    pub read_only: bool,
    pub write_only: bool,
    pub deprecated: bool,
    pub default: Option<Value>,
    pub kind: SchemaKind,
}

impl SchemaDef {
    pub fn new(location: impl Into<String>, kind: SchemaKind) -> Self {
        Self {
            name: None,
            location: location.into(),
            description: None,
            nullable: false,
            read_only: false,
            write_only: false,
            deprecated: false,
            default: None,
            kind,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Closed set of schema shapes the translator understands
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Primitive {
        kind: PrimitiveKind,
        format: Option<String>,
    },
    Object(ObjectSchema),
    Array {
        items: Option<SchemaId>,
    },
    /// Literal values, `null` excluded
    Enum {
        values: Vec<Value>,
    },
    Union {
        mode: UnionMode,
        members: Vec<SchemaId>,
    },
    AllOf {
        members: Vec<SchemaId>,
    },
    /// No type and no structure
    Any,
}

impl SchemaKind {
    pub fn describe(&self) -> &'static str {
        match self {
            SchemaKind::Primitive { .. } => "primitive",
            SchemaKind::Object(_) => "object",
            SchemaKind::Array { .. } => "array",
            SchemaKind::Enum { .. } => "enum",
            SchemaKind::Union {
                mode: UnionMode::OneOf,
                ..
            } => "oneOf",
            SchemaKind::Union {
                mode: UnionMode::AnyOf,
                ..
            } => "anyOf",
            SchemaKind::AllOf { .. } => "allOf",
            SchemaKind::Any => "free-form",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Number,
    Integer,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnionMode {
    OneOf,
    AnyOf,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    pub properties: Vec<Property>,
    /// Every name listed under `required`, including names declared by
    /// sibling `allOf` members
    pub required: Vec<String>,
    pub additional_properties: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub schema: SchemaId,
}

/// A path and its operations in declaration order
#[derive(Debug, Clone)]
pub struct PathItem {
    pub path: String,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone)]
pub struct Operation {
    pub method: HttpMethod,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    /// Responses in declaration order
    pub responses: Vec<Response>,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub description: Option<String>,
    pub schema: SchemaId,
}

#[derive(Debug, Clone)]
pub struct RequestBody {
    pub content_type: String,
    pub schema: SchemaId,
    pub required: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Response {
    /// Status key as written: "200", "2XX", "default"
    pub status: String,
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub schema: Option<SchemaId>,
}
