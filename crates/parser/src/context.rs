//! State of one translation run
//!
//! A [`TranslationContext`] is created by the schema assembler for each
//! document and threaded through the type and operation mappers. It owns
//! the naming tables, the type registry, the mapping cache and the queue of
//! object types whose fields are still to be bound.

use crate::naming::{Namespace, NamingResolver};
use crate::openapi::{Document, SchemaId};
use openapi_graphql_common::{
    Result, ScalarType, TranslationError, TranslatorConfig, TypeDefinition, TypeId, TypeKind,
    TypeRef,
};
use std::collections::{HashMap, HashSet, VecDeque};

/// Whether a schema is being mapped for an output or an input position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Output,
    Input,
}

/// Scalars the translator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Int,
    Float,
    Boolean,
    DateTime,
    Date,
    Byte,
    Uuid,
    BigInt,
    /// Free-form and unmappable schemas
    Json,
    /// Return type of operations without a success body
    Success,
}

impl ScalarKind {
    pub const CUSTOM: [ScalarKind; 5] = [
        ScalarKind::DateTime,
        ScalarKind::Date,
        ScalarKind::Byte,
        ScalarKind::Uuid,
        ScalarKind::BigInt,
    ];

    pub fn name(self, config: &TranslatorConfig) -> &str {
        match self {
            ScalarKind::String => "String",
            ScalarKind::Int => "Int",
            ScalarKind::Float => "Float",
            ScalarKind::Boolean => "Boolean",
            ScalarKind::DateTime => "DateTime",
            ScalarKind::Date => "Date",
            ScalarKind::Byte => "Byte",
            ScalarKind::Uuid => "UUID",
            ScalarKind::BigInt => "BigInt",
            ScalarKind::Json => &config.json_scalar,
            ScalarKind::Success => &config.success_scalar,
        }
    }

    pub fn is_builtin(self) -> bool {
        matches!(
            self,
            ScalarKind::String | ScalarKind::Int | ScalarKind::Float | ScalarKind::Boolean
        )
    }

    fn description(self) -> Option<&'static str> {
        match self {
            ScalarKind::DateTime => {
                Some("Date and time in RFC 3339 format, e.g. 2024-01-31T12:00:00Z")
            },
            ScalarKind::Date => {
                Some("Calendar date in RFC 3339 full-date format, e.g. 2024-01-31")
            },
            ScalarKind::Byte => Some("Base64-encoded binary data"),
            ScalarKind::Uuid => Some("RFC 4122 universally unique identifier"),
            ScalarKind::BigInt => Some("64-bit signed integer"),
            ScalarKind::Json => Some("Arbitrary JSON value"),
            ScalarKind::Success => {
                Some("Marks a successful operation that returns no body; always null")
            },
            _ => None,
        }
    }

    fn specified_by(self) -> Option<&'static str> {
        match self {
            ScalarKind::DateTime => Some("https://scalars.graphql.org/andimarek/date-time"),
            ScalarKind::Date => Some("https://datatracker.ietf.org/doc/html/rfc3339#section-5.6"),
            ScalarKind::Byte => Some("https://datatracker.ietf.org/doc/html/rfc4648#section-4"),
            ScalarKind::Uuid => Some("https://datatracker.ietf.org/doc/html/rfc4122"),
            ScalarKind::Json => Some("https://datatracker.ietf.org/doc/html/rfc8259"),
            _ => None,
        }
    }
}

enum Slot {
    Reserved { name: String, kind: TypeKind },
    Defined(TypeDefinition),
}

/// Type definitions under construction
///
/// Object and input object types are reserved under their final name first
/// and defined once their fields are bound, which lets recursive schemas
/// refer to a type before it is complete.
#[derive(Default)]
pub struct TypeRegistry {
    slots: Vec<Slot>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve(&mut self, name: impl Into<String>, kind: TypeKind) -> TypeId {
        self.slots.push(Slot::Reserved {
            name: name.into(),
            kind,
        });
        TypeId(self.slots.len() - 1)
    }

    pub fn define(&mut self, id: TypeId, definition: TypeDefinition) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            *slot = Slot::Defined(definition);
        }
    }

    pub fn push(&mut self, definition: TypeDefinition) -> TypeId {
        self.slots.push(Slot::Defined(definition));
        TypeId(self.slots.len() - 1)
    }

    pub fn name(&self, id: TypeId) -> Option<&str> {
        self.slots.get(id.index()).map(|slot| match slot {
            Slot::Reserved { name, .. } => name.as_str(),
            Slot::Defined(def) => def.name(),
        })
    }

    /// Definition of a type, `None` while it is only reserved
    pub fn get(&self, id: TypeId) -> Option<&TypeDefinition> {
        match self.slots.get(id.index()) {
            Some(Slot::Defined(def)) => Some(def),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All definitions in creation order; fails if a placeholder was never filled
    pub fn finish(self) -> Result<Vec<TypeDefinition>> {
        self.slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Defined(def) => Ok(def),
                Slot::Reserved { name, kind } => Err(TranslationError::InvalidSchema(format!(
                    "{} {} was referenced but its fields were never bound",
                    kind, name
                ))),
            })
            .collect()
    }
}

/// Object type whose fields are bound after all root fields are mapped
#[derive(Debug, Clone, Copy)]
pub struct PendingType {
    pub id: TypeId,
    pub schema: SchemaId,
    pub category: TypeCategory,
}

/// Mutable state shared by the mappers during one run
pub struct TranslationContext<'a> {
    pub doc: &'a Document,
    pub config: &'a TranslatorConfig,
    pub naming: NamingResolver,
    pub registry: TypeRegistry,
    cache: HashMap<(SchemaId, TypeCategory), TypeRef>,
    in_progress: HashSet<(SchemaId, TypeCategory)>,
    scalars: HashMap<String, TypeId>,
    pending: VecDeque<PendingType>,
    operation_ids: HashMap<&'a str, usize>,
}

impl<'a> TranslationContext<'a> {
    pub fn new(doc: &'a Document, config: &'a TranslatorConfig) -> Self {
        let mut naming = NamingResolver::new(config.collision_policy);
        naming.reserve(&Namespace::Types, &config.json_scalar);
        naming.reserve(&Namespace::Types, &config.success_scalar);
        if config.custom_scalars {
            for kind in ScalarKind::CUSTOM {
                naming.reserve(&Namespace::Types, kind.name(config));
            }
        }

        let mut operation_ids = HashMap::new();
        for (_, op) in doc.operations() {
            if let Some(id) = op.operation_id.as_deref() {
                *operation_ids.entry(id).or_insert(0) += 1;
            }
        }

        Self {
            doc,
            config,
            naming,
            registry: TypeRegistry::new(),
            cache: HashMap::new(),
            in_progress: HashSet::new(),
            scalars: HashMap::new(),
            pending: VecDeque::new(),
            operation_ids,
        }
    }

    /// How many operations of the document declare this operationId
    pub fn operation_id_count(&self, operation_id: &str) -> usize {
        self.operation_ids.get(operation_id).copied().unwrap_or(0)
    }

    /// Scalar type id, defining the scalar on first use
    pub fn scalar(&mut self, kind: ScalarKind) -> TypeId {
        let name = kind.name(self.config).to_string();
        if let Some(id) = self.scalars.get(&name) {
            return *id;
        }
        let id = self.registry.push(TypeDefinition::Scalar(ScalarType {
            name: name.clone(),
            description: kind.description().map(str::to_string),
            specified_by: kind.specified_by().map(str::to_string),
            builtin: kind.is_builtin(),
        }));
        self.scalars.insert(name, id);
        id
    }

    pub fn json(&mut self) -> TypeRef {
        TypeRef::named(self.scalar(ScalarKind::Json))
    }

    pub fn cached(&self, schema: SchemaId, category: TypeCategory) -> Option<TypeRef> {
        self.cache.get(&(schema, category)).cloned()
    }

    pub fn remember(&mut self, schema: SchemaId, category: TypeCategory, ty: TypeRef) {
        self.cache.insert((schema, category), ty);
    }

    /// Mark a schema as being mapped; `false` if it already is
    pub fn enter(&mut self, schema: SchemaId, category: TypeCategory) -> bool {
        self.in_progress.insert((schema, category))
    }

    pub fn leave(&mut self, schema: SchemaId, category: TypeCategory) {
        self.in_progress.remove(&(schema, category));
    }

    pub fn defer(&mut self, pending: PendingType) {
        self.pending.push_back(pending);
    }

    pub fn next_pending(&mut self) -> Option<PendingType> {
        self.pending.pop_front()
    }

    pub fn into_registry(self) -> TypeRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::SchemaArena;
    use indexmap::IndexMap;
    use openapi_graphql_common::ObjectType;

    fn empty_document() -> Document {
        Document::new("t", "1", None, vec![], IndexMap::new(), SchemaArena::new()).unwrap()
    }

    #[test]
    fn test_scalars_are_defined_once() {
        let doc = empty_document();
        let config = TranslatorConfig::default();
        let mut ctx = TranslationContext::new(&doc, &config);

        let a = ctx.scalar(ScalarKind::DateTime);
        let b = ctx.scalar(ScalarKind::DateTime);
        assert_eq!(a, b);
        assert_eq!(ctx.registry.len(), 1);
        assert_eq!(ctx.registry.name(a), Some("DateTime"));
    }

    #[test]
    fn test_configured_scalar_names_are_reserved() {
        let doc = empty_document();
        let config = TranslatorConfig {
            json_scalar: "Any".to_string(),
            ..Default::default()
        };
        let ctx = TranslationContext::new(&doc, &config);

        assert!(ctx.naming.is_assigned(&Namespace::Types, "Any"));
        assert!(ctx.naming.is_assigned(&Namespace::Types, "Void"));
        assert!(ctx.naming.is_assigned(&Namespace::Types, "UUID"));
    }

    #[test]
    fn test_custom_scalar_names_free_when_disabled() {
        let doc = empty_document();
        let config = TranslatorConfig {
            custom_scalars: false,
            ..Default::default()
        };
        let ctx = TranslationContext::new(&doc, &config);
        assert!(!ctx.naming.is_assigned(&Namespace::Types, "DateTime"));
    }

    #[test]
    fn test_registry_finish_rejects_placeholders() {
        let mut registry = TypeRegistry::new();
        let pet = registry.reserve("Pet", TypeKind::Object);
        assert_eq!(registry.name(pet), Some("Pet"));
        assert!(registry.get(pet).is_none());

        let err = registry.finish().unwrap_err();
        assert!(err.to_string().contains("Pet"));
    }

    #[test]
    fn test_registry_define_fills_placeholder() {
        let mut registry = TypeRegistry::new();
        let pet = registry.reserve("Pet", TypeKind::Object);
        registry.define(
            pet,
            TypeDefinition::Object(ObjectType {
                name: "Pet".to_string(),
                description: None,
                fields: vec![],
            }),
        );
        assert!(registry.get(pet).is_some());
        assert_eq!(registry.finish().unwrap().len(), 1);
    }
}
