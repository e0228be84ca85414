//! Type mapping from OpenAPI schemas to GraphQL types
//!
//! Maps a resolved [`SchemaDef`] in an output or input position to a
//! GraphQL [`TypeRef`]. References come back in nullable form; callers add
//! the non-null wrapper when the owning property or parameter is required.
//!
//! Object types are only reserved here. Their fields are bound later by
//! [`TypeMapper::finalize_pending`], so a schema that reaches itself through
//! an object property maps to a plain self-reference.

use crate::context::{PendingType, ScalarKind, TranslationContext, TypeCategory};
use crate::naming::Namespace;
use crate::openapi::{Document, ObjectSchema, PrimitiveKind, SchemaDef, SchemaId, SchemaKind};
use heck::ToUpperCamelCase;
use openapi_graphql_common::{
    ConstValue, EnumType, EnumValue, FieldNode, InputObjectType, InputValue, ObjectType, Result,
    TranslationError, TypeDefinition, TypeKind, TypeRef, UnionType,
};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Reason attached to fields generated from deprecated schemas
pub const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// Maps OpenAPI schemas to GraphQL types
pub struct TypeMapper;

impl TypeMapper {
    /// Map a schema to a nullable type reference
    ///
    /// `hint` names the type when the schema has neither a component name
    /// nor a `title`.
    pub fn map_schema(
        ctx: &mut TranslationContext<'_>,
        schema: SchemaId,
        category: TypeCategory,
        hint: &str,
    ) -> Result<TypeRef> {
        let doc = ctx.doc;
        let def = doc.schema(schema);

        // Enums and scalars are shared by both positions
        let category = match def.kind {
            SchemaKind::Object(_)
            | SchemaKind::AllOf { .. }
            | SchemaKind::Union { .. }
            | SchemaKind::Array { .. } => category,
            _ => TypeCategory::Output,
        };

        if let Some(ty) = ctx.cached(schema, category) {
            return Ok(ty);
        }
        if !ctx.enter(schema, category) {
            return Err(TranslationError::Cycle(format!(
                "{} refers to itself without passing through an object property",
                def.location
            )));
        }

        let result = Self::map_kind(ctx, schema, def, category, hint);
        ctx.leave(schema, category);

        let ty = result?;
        ctx.remember(schema, category, ty.clone());
        Ok(ty)
    }

    fn map_kind(
        ctx: &mut TranslationContext<'_>,
        schema: SchemaId,
        def: &SchemaDef,
        category: TypeCategory,
        hint: &str,
    ) -> Result<TypeRef> {
        match &def.kind {
            SchemaKind::Primitive { kind, format } => {
                Ok(Self::map_primitive(ctx, *kind, format.as_deref()))
            },
            SchemaKind::Object(object) if object.properties.is_empty() => {
                debug!(schema = %def.location, "object without properties, using JSON scalar");
                Ok(ctx.json())
            },
            SchemaKind::Object(_) => Self::map_object(ctx, schema, def, category, hint),
            SchemaKind::Array { items } => Self::map_array(ctx, *items, category, hint),
            SchemaKind::Enum { values } => Self::map_enum(ctx, def, values, hint),
            SchemaKind::Union { members, .. } => {
                Self::map_union(ctx, schema, def, members, category, hint)
            },
            SchemaKind::AllOf { members } if members.len() == 1 => {
                Self::map_schema(ctx, members[0], category, hint)
            },
            SchemaKind::AllOf { .. } => Self::map_object(ctx, schema, def, category, hint),
            SchemaKind::Any => Ok(ctx.json()),
        }
    }

    fn map_primitive(
        ctx: &mut TranslationContext<'_>,
        kind: PrimitiveKind,
        format: Option<&str>,
    ) -> TypeRef {
        let custom = ctx.config.custom_scalars;
        let scalar = match (kind, format) {
            (PrimitiveKind::String, Some("date-time")) if custom => ScalarKind::DateTime,
            (PrimitiveKind::String, Some("date")) if custom => ScalarKind::Date,
            (PrimitiveKind::String, Some("byte")) if custom => ScalarKind::Byte,
            (PrimitiveKind::String, Some("uuid")) if custom => ScalarKind::Uuid,
            (PrimitiveKind::String, _) => ScalarKind::String,
            (PrimitiveKind::Integer, Some("int64")) if custom => ScalarKind::BigInt,
            (PrimitiveKind::Integer, _) => ScalarKind::Int,
            (PrimitiveKind::Number, _) => ScalarKind::Float,
            (PrimitiveKind::Boolean, _) => ScalarKind::Boolean,
        };
        TypeRef::named(ctx.scalar(scalar))
    }

    /// Reserve an object or input object type and queue its fields
    fn map_object(
        ctx: &mut TranslationContext<'_>,
        schema: SchemaId,
        def: &SchemaDef,
        category: TypeCategory,
        hint: &str,
    ) -> Result<TypeRef> {
        let doc = ctx.doc;
        let shape = Self::collect_properties(doc, schema)?;
        if !Self::has_visible_fields(doc, &shape, category) {
            debug!(schema = %def.location, ?category, "no fields left, using JSON scalar");
            return Ok(ctx.json());
        }

        let candidate = Self::type_name_candidate(ctx, def, category, hint);
        let name = ctx.naming.assign(&Namespace::Types, &candidate)?;
        let kind = match category {
            TypeCategory::Output => TypeKind::Object,
            TypeCategory::Input => TypeKind::InputObject,
        };
        let id = ctx.registry.reserve(name, kind);
        ctx.defer(PendingType {
            id,
            schema,
            category,
        });
        Ok(TypeRef::named(id))
    }

    fn map_array(
        ctx: &mut TranslationContext<'_>,
        items: Option<SchemaId>,
        category: TypeCategory,
        hint: &str,
    ) -> Result<TypeRef> {
        let element = match items {
            Some(items) => Self::map_schema(ctx, items, category, &format!("{}Item", hint))?,
            None => ctx.json(),
        };
        // Elements stay nullable; the owner decides the list's own nullability
        Ok(TypeRef::list(element))
    }

    fn map_enum(
        ctx: &mut TranslationContext<'_>,
        def: &SchemaDef,
        values: &[Value],
        hint: &str,
    ) -> Result<TypeRef> {
        let candidate = def.name.clone().unwrap_or_else(|| hint.to_string());
        let name = ctx.naming.assign(&Namespace::Types, &candidate)?;

        let namespace = Namespace::EnumValues(name.clone());
        let mut enum_values = Vec::new();
        for value in values {
            let literal = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            enum_values.push(EnumValue {
                name: ctx.naming.assign(&namespace, &literal)?,
                value: value.clone(),
                description: None,
            });
        }

        let id = ctx.registry.push(TypeDefinition::Enum(EnumType {
            name,
            description: def.description.clone(),
            values: enum_values,
        }));
        Ok(TypeRef::named(id))
    }

    fn map_union(
        ctx: &mut TranslationContext<'_>,
        schema: SchemaId,
        def: &SchemaDef,
        members: &[SchemaId],
        category: TypeCategory,
        hint: &str,
    ) -> Result<TypeRef> {
        let doc = ctx.doc;
        if let [single] = members {
            return Self::map_schema(ctx, *single, category, hint);
        }
        if category == TypeCategory::Input {
            debug!(schema = %def.location, "input unions are not expressible, using JSON scalar");
            return Ok(ctx.json());
        }
        if members.is_empty()
            || !members
                .iter()
                .all(|m| Self::is_object_like(doc, *m, category))
        {
            debug!(schema = %def.location, "union has non-object members, using JSON scalar");
            return Ok(ctx.json());
        }

        let candidate = Self::type_name_candidate(ctx, def, category, hint);
        let name = ctx.naming.assign(&Namespace::Types, &candidate)?;
        let id = ctx.registry.reserve(name.clone(), TypeKind::Union);
        let ty = TypeRef::named(id);
        // Members may lead back here through their fields
        ctx.remember(schema, category, ty.clone());

        let mut member_ids = Vec::new();
        for (i, member) in members.iter().enumerate() {
            let member_hint = format!("{}{}", name, i + 1);
            let member_ty = Self::map_schema(ctx, *member, category, &member_hint)?;
            let member_id = member_ty.named_type();
            if !member_ids.contains(&member_id) {
                member_ids.push(member_id);
            }
        }

        ctx.registry.define(
            id,
            TypeDefinition::Union(UnionType {
                name,
                description: def.description.clone(),
                members: member_ids,
            }),
        );
        Ok(ty)
    }

    /// Name a schema: component name or title, else the contextual hint.
    /// Named schemas in input position get the configured suffix.
    fn type_name_candidate(
        ctx: &TranslationContext<'_>,
        def: &SchemaDef,
        category: TypeCategory,
        hint: &str,
    ) -> String {
        match (&def.name, category) {
            (Some(name), TypeCategory::Input) => {
                format!("{}{}", name, ctx.config.input_type_suffix)
            },
            (Some(name), TypeCategory::Output) => name.clone(),
            (None, _) => hint.to_string(),
        }
    }

    /// Properties of an object, or the merged properties of an `allOf`
    ///
    /// Later members override the schema of a property declared earlier,
    /// which keeps its first position. `required` is the union of all
    /// members' lists.
    pub fn collect_properties(doc: &Document, schema: SchemaId) -> Result<ObjectSchema> {
        let mut merged = ObjectSchema::default();
        let mut stack = HashSet::new();
        Self::collect_into(doc, schema, &mut merged, &mut stack)?;
        Ok(merged)
    }

    fn collect_into(
        doc: &Document,
        schema: SchemaId,
        merged: &mut ObjectSchema,
        stack: &mut HashSet<SchemaId>,
    ) -> Result<()> {
        let def = doc.schema(schema);
        if !stack.insert(schema) {
            return Err(TranslationError::Cycle(format!(
                "{} is composed of itself through allOf",
                def.location
            )));
        }

        match &def.kind {
            SchemaKind::Object(object) => {
                for property in &object.properties {
                    match merged
                        .properties
                        .iter_mut()
                        .find(|p| p.name == property.name)
                    {
                        Some(existing) => existing.schema = property.schema,
                        None => merged.properties.push(property.clone()),
                    }
                }
                for name in &object.required {
                    if !merged.required.contains(name) {
                        merged.required.push(name.clone());
                    }
                }
                merged.additional_properties |= object.additional_properties;
            },
            SchemaKind::AllOf { members } => {
                for member in members {
                    Self::collect_into(doc, *member, merged, stack)?;
                }
            },
            // Annotation-only members such as `{description: ...}`
            SchemaKind::Any => {},
            other => {
                return Err(TranslationError::UnsupportedSchemaConstruct {
                    schema: def.location.clone(),
                    construct: format!("allOf member of kind {}", other.describe()),
                });
            },
        }

        stack.remove(&schema);
        Ok(())
    }

    /// Whether a schema maps to an object type in this category
    pub fn is_object_like(doc: &Document, schema: SchemaId, category: TypeCategory) -> bool {
        match &doc.schema(schema).kind {
            SchemaKind::Object(_) | SchemaKind::AllOf { .. } => {
                Self::collect_properties(doc, schema)
                    .map(|shape| Self::has_visible_fields(doc, &shape, category))
                    .unwrap_or(false)
            },
            _ => false,
        }
    }

    fn is_visible(def: &SchemaDef, category: TypeCategory) -> bool {
        match category {
            TypeCategory::Output => !def.write_only,
            TypeCategory::Input => !def.read_only,
        }
    }

    fn has_visible_fields(doc: &Document, shape: &ObjectSchema, category: TypeCategory) -> bool {
        shape
            .properties
            .iter()
            .any(|p| Self::is_visible(doc.schema(p.schema), category))
    }

    /// Bind the fields of every reserved object type, including the ones
    /// discovered while binding
    pub fn finalize_pending(ctx: &mut TranslationContext<'_>) -> Result<()> {
        while let Some(pending) = ctx.next_pending() {
            let definition = Self::bind_fields(ctx, pending)?;
            ctx.registry.define(pending.id, definition);
        }
        Ok(())
    }

    fn bind_fields(
        ctx: &mut TranslationContext<'_>,
        pending: PendingType,
    ) -> Result<TypeDefinition> {
        let doc = ctx.doc;
        let def = doc.schema(pending.schema);
        let type_name = ctx
            .registry
            .name(pending.id)
            .map(str::to_string)
            .unwrap_or_default();
        let shape = Self::collect_properties(doc, pending.schema)?;
        let namespace = Namespace::Fields(type_name.clone());

        match pending.category {
            TypeCategory::Output => {
                let mut fields = Vec::new();
                for property in &shape.properties {
                    let property_def = doc.schema(property.schema);
                    if !Self::is_visible(property_def, TypeCategory::Output) {
                        continue;
                    }
                    let name = ctx.naming.assign(&namespace, &property.name)?;
                    let hint = format!("{}{}", type_name, property.name.to_upper_camel_case());
                    let ty = Self::map_schema(ctx, property.schema, TypeCategory::Output, &hint)?
                        .required_if(Self::is_required(&shape, &property.name, property_def));

                    let mut field = FieldNode::new(name, ty);
                    if field.name != property.name {
                        field.source_name = Some(property.name.clone());
                    }
                    field.description = property_def.description.clone();
                    if property_def.deprecated {
                        field.deprecation = Some(DEFAULT_DEPRECATION_REASON.to_string());
                    }
                    fields.push(field);
                }
                Ok(TypeDefinition::Object(ObjectType {
                    name: type_name,
                    description: def.description.clone(),
                    fields,
                }))
            },
            TypeCategory::Input => {
                let mut fields = Vec::new();
                for property in &shape.properties {
                    let property_def = doc.schema(property.schema);
                    if !Self::is_visible(property_def, TypeCategory::Input) {
                        continue;
                    }
                    let name = ctx.naming.assign(&namespace, &property.name)?;
                    let hint = format!("{}{}", type_name, property.name.to_upper_camel_case());
                    let ty = Self::map_schema(ctx, property.schema, TypeCategory::Input, &hint)?
                        .required_if(Self::is_required(&shape, &property.name, property_def));

                    let mut field = InputValue::new(name, ty);
                    if field.name != property.name {
                        field.source_name = Some(property.name.clone());
                    }
                    field.description = property_def.description.clone();
                    field.default_value = match property_def.default {
                        Some(ref value) => Self::default_value(ctx, &field.ty, value),
                        None => None,
                    };
                    fields.push(field);
                }
                Ok(TypeDefinition::InputObject(InputObjectType {
                    name: type_name,
                    description: def.description.clone(),
                    fields,
                }))
            },
        }
    }

    /// Listed under `required` and not declared nullable
    fn is_required(shape: &ObjectSchema, name: &str, def: &SchemaDef) -> bool {
        shape.required.iter().any(|r| r == name) && !def.nullable
    }

    /// Convert a JSON default into a GraphQL literal for `ty`
    ///
    /// Only built-in scalars, enums and lists of those carry defaults;
    /// anything else is dropped.
    pub fn default_value(
        ctx: &TranslationContext<'_>,
        ty: &TypeRef,
        value: &Value,
    ) -> Option<ConstValue> {
        match ty {
            TypeRef::NonNull(inner) => Self::default_value(ctx, inner, value),
            TypeRef::List(inner) => match value {
                Value::Array(items) => items
                    .iter()
                    .map(|item| Self::default_value(ctx, inner, item))
                    .collect::<Option<Vec<_>>>()
                    .map(ConstValue::List),
                _ => None,
            },
            TypeRef::Named(id) => match ctx.registry.get(*id)? {
                TypeDefinition::Scalar(scalar) if scalar.builtin => {
                    match (scalar.name.as_str(), value) {
                        ("Boolean", Value::Bool(b)) => Some(ConstValue::Boolean(*b)),
                        // GraphQL Int is 32-bit
                        ("Int", Value::Number(n)) => n
                            .as_i64()
                            .filter(|i| i32::try_from(*i).is_ok())
                            .map(ConstValue::Int),
                        ("Float", Value::Number(n)) => n.as_f64().map(ConstValue::Float),
                        ("String", Value::String(s)) => Some(ConstValue::String(s.clone())),
                        _ => None,
                    }
                },
                TypeDefinition::Enum(enum_type) => enum_type
                    .values
                    .iter()
                    .find(|v| &v.value == value)
                    .map(|v| ConstValue::Enum(v.name.clone())),
                _ => None,
            },
        }
    }
}
