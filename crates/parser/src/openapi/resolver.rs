//! Lowers a raw OpenAPI spec into the resolved [`Document`] model

use super::document::{
    Document, ObjectSchema, Operation, Parameter, PathItem, PrimitiveKind, Property, RequestBody,
    Response, SchemaArena, SchemaDef, SchemaId, SchemaKind, UnionMode,
};
use super::types::{
    self, escape_pointer, local_component_name, AdditionalProperties, MediaType, OpenApiSpec,
    ReferenceOr, Schema,
};
use indexmap::IndexMap;
use openapi_graphql_common::{HttpMethod, ParameterLocation, Result, TranslationError};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Longest `$ref` chain followed for parameters, bodies and responses
const MAX_REF_DEPTH: usize = 32;

/// Resolve an OpenAPI spec into a Document
pub fn resolve_document(spec: &OpenApiSpec) -> Result<Document> {
    check_version(spec)?;

    let mut resolver = Resolver::new(spec);
    resolver.resolve_components()?;

    let mut paths = Vec::new();
    for (path, item) in &spec.paths {
        paths.push(resolver.resolve_path(path, item)?);
    }

    let Resolver {
        arena, components, ..
    } = resolver;

    Document::new(
        spec.info.title.clone(),
        spec.info.version.clone(),
        spec.info.description.clone(),
        paths,
        components,
        arena,
    )
}

fn check_version(spec: &OpenApiSpec) -> Result<()> {
    if let Some(ref swagger) = spec.swagger {
        return Err(TranslationError::Parse(format!(
            "Swagger {} documents are not supported; convert to OpenAPI 3 first",
            swagger
        )));
    }
    match spec.openapi.as_deref() {
        Some(v) if v.starts_with("3.") => Ok(()),
        Some(v) => Err(TranslationError::Parse(format!(
            "Unsupported OpenAPI version: {}",
            v
        ))),
        None => Err(TranslationError::Parse(
            "Missing 'openapi' version field".to_string(),
        )),
    }
}

/// Choose one media type: JSON first, then any `+json` variant, then the
/// first declared one that carries a schema
pub(crate) fn select_media_type(
    content: &IndexMap<String, MediaType>,
) -> Option<(&String, &MediaType)> {
    let with_schema = || content.iter().filter(|(_, m)| m.schema.is_some());

    with_schema()
        .find(|(ct, _)| is_json(ct) && !ct.contains('+'))
        .or_else(|| with_schema().find(|(ct, _)| is_json(ct)))
        .or_else(|| with_schema().next())
        .or_else(|| content.iter().next())
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    essence == "application/json" || essence.ends_with("+json") || essence == "*/*"
}

struct Resolver<'a> {
    spec: &'a OpenApiSpec,
    arena: SchemaArena,
    /// Component name -> id, aliases included
    components: IndexMap<String, SchemaId>,
}

impl<'a> Resolver<'a> {
    fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            spec,
            arena: SchemaArena::new(),
            components: IndexMap::new(),
        }
    }

    fn component_schemas(&self) -> Option<&'a IndexMap<String, ReferenceOr<Schema>>> {
        let spec: &'a OpenApiSpec = self.spec;
        spec.components.as_ref().map(|c| &c.schemas)
    }

    /// Allocate ids for every component schema, then lower their bodies.
    /// Components that are only a `$ref` share their target's id.
    fn resolve_components(&mut self) -> Result<()> {
        let Some(schemas) = self.component_schemas() else {
            return Ok(());
        };

        let mut ids: HashMap<&str, SchemaId> = HashMap::new();
        for (name, body) in schemas {
            if let ReferenceOr::Item(_) = body {
                ids.insert(name.as_str(), self.arena.reserve());
            }
        }

        for name in schemas.keys() {
            let id = Self::follow_alias(schemas, &ids, name)?;
            self.components.insert(name.clone(), id);
        }

        for (name, body) in schemas {
            if let ReferenceOr::Item(schema) = body {
                let id = ids[name.as_str()];
                let location = format!("#/components/schemas/{}", escape_pointer(name));
                let def = self.lower(schema, Some(name.clone()), &location)?;
                self.arena.define(id, def);
            }
        }

        Ok(())
    }

    fn follow_alias(
        schemas: &IndexMap<String, ReferenceOr<Schema>>,
        ids: &HashMap<&str, SchemaId>,
        start: &str,
    ) -> Result<SchemaId> {
        let mut visited = HashSet::new();
        let mut current = start.to_string();
        loop {
            if let Some(id) = ids.get(current.as_str()) {
                return Ok(*id);
            }
            if !visited.insert(current.clone()) {
                return Err(TranslationError::Cycle(format!(
                    "#/components/schemas/{} is an alias of itself",
                    start
                )));
            }
            match schemas.get(&current) {
                Some(ReferenceOr::Reference { ref_path }) => {
                    current = local_component_name(ref_path, "schemas")
                        .ok_or_else(|| TranslationError::UnresolvedReference(ref_path.clone()))?;
                },
                _ => {
                    return Err(TranslationError::UnresolvedReference(format!(
                        "#/components/schemas/{}",
                        current
                    )))
                },
            }
        }
    }

    fn schema_ref(&self, ref_path: &str) -> Result<SchemaId> {
        local_component_name(ref_path, "schemas")
            .and_then(|name| self.components.get(&name).copied())
            .ok_or_else(|| TranslationError::UnresolvedReference(ref_path.to_string()))
    }

    fn lower_ref(&mut self, schema: &ReferenceOr<Schema>, location: &str) -> Result<SchemaId> {
        match schema {
            ReferenceOr::Reference { ref_path } => self.schema_ref(ref_path),
            ReferenceOr::Item(schema) => {
                let id = self.arena.reserve();
                let def = self.lower(schema, None, location)?;
                self.arena.define(id, def);
                Ok(id)
            },
        }
    }

    /// Lower one inline schema
    fn lower(
        &mut self,
        schema: &Schema,
        name: Option<String>,
        location: &str,
    ) -> Result<SchemaDef> {
        let mut nullable = schema.nullable;
        let kind = self.lower_kind(schema, location, &mut nullable)?;

        Ok(SchemaDef {
            name: name.or_else(|| schema.title.clone()),
            location: location.to_string(),
            description: schema.description.clone(),
            nullable,
            read_only: schema.read_only,
            write_only: schema.write_only,
            deprecated: schema.deprecated,
            default: schema.default.clone(),
            kind,
        })
    }

    fn lower_kind(
        &mut self,
        schema: &Schema,
        location: &str,
        nullable: &mut bool,
    ) -> Result<SchemaKind> {
        let has_union = !schema.one_of.is_empty() || !schema.any_of.is_empty();
        if has_union && !schema.all_of.is_empty() {
            return Err(TranslationError::UnsupportedSchemaConstruct {
                schema: location.to_string(),
                construct: "oneOf/anyOf combined with allOf".to_string(),
            });
        }
        if !schema.one_of.is_empty() && !schema.any_of.is_empty() {
            return Err(TranslationError::UnsupportedSchemaConstruct {
                schema: location.to_string(),
                construct: "oneOf combined with anyOf".to_string(),
            });
        }

        if !schema.enum_values.is_empty() {
            let values: Vec<_> = schema
                .enum_values
                .iter()
                .filter(|v| !v.is_null())
                .cloned()
                .collect();
            if values.len() < schema.enum_values.len() {
                *nullable = true;
            }
            return Ok(if values.is_empty() {
                SchemaKind::Any
            } else {
                SchemaKind::Enum { values }
            });
        }

        if has_union {
            let (mode, keyword, members) = if schema.one_of.is_empty() {
                (UnionMode::AnyOf, "anyOf", &schema.any_of)
            } else {
                (UnionMode::OneOf, "oneOf", &schema.one_of)
            };
            let mut ids = Vec::new();
            for (i, member) in members.iter().enumerate() {
                if let ReferenceOr::Item(m) = member {
                    if m.is_null_type() {
                        *nullable = true;
                        continue;
                    }
                }
                let member_location = format!("{}/{}/{}", location, keyword, i);
                ids.push(self.lower_ref(member, &member_location)?);
            }
            if !schema.properties.is_empty() {
                debug!(schema = location, "ignoring properties declared next to {}", keyword);
            }
            return Ok(SchemaKind::Union { mode, members: ids });
        }

        if !schema.all_of.is_empty() {
            let mut ids = Vec::new();
            for (i, member) in schema.all_of.iter().enumerate() {
                let member_location = format!("{}/allOf/{}", location, i);
                ids.push(self.lower_ref(member, &member_location)?);
            }
            // Sibling properties act as one more object member
            if !schema.properties.is_empty() || !schema.required.is_empty() {
                let own = self.lower_object(schema, location)?;
                ids.push(self.arena.push(SchemaDef::new(location, own)));
            }
            return Ok(SchemaKind::AllOf { members: ids });
        }

        let names = schema.type_names();
        if names.contains(&"null") {
            *nullable = true;
        }
        let concrete: Vec<&str> = names.into_iter().filter(|t| *t != "null").collect();

        match concrete.as_slice() {
            [] if declares_only_null(schema) => Ok(SchemaKind::Any),
            [] => self.lower_untyped(schema, location),
            [single] => self.lower_typed(single, schema, location),
            _ => {
                debug!(schema = location, "multiple types {:?}, using free-form", concrete);
                Ok(SchemaKind::Any)
            },
        }
    }

    fn lower_typed(
        &mut self,
        type_name: &str,
        schema: &Schema,
        location: &str,
    ) -> Result<SchemaKind> {
        let primitive = |kind| SchemaKind::Primitive {
            kind,
            format: schema.format.clone(),
        };
        match type_name {
            "string" => Ok(primitive(PrimitiveKind::String)),
            "number" => Ok(primitive(PrimitiveKind::Number)),
            "integer" => Ok(primitive(PrimitiveKind::Integer)),
            "boolean" => Ok(primitive(PrimitiveKind::Boolean)),
            "array" => self.lower_array(schema, location),
            "object" => self.lower_object(schema, location),
            other => Err(TranslationError::UnsupportedSchemaConstruct {
                schema: location.to_string(),
                construct: format!("type '{}'", other),
            }),
        }
    }

    /// Schemas without `type`: infer from the keywords present
    fn lower_untyped(&mut self, schema: &Schema, location: &str) -> Result<SchemaKind> {
        if !schema.properties.is_empty() || schema.additional_properties.is_some() {
            self.lower_object(schema, location)
        } else if schema.items.is_some() {
            self.lower_array(schema, location)
        } else {
            Ok(SchemaKind::Any)
        }
    }

    fn lower_array(&mut self, schema: &Schema, location: &str) -> Result<SchemaKind> {
        let items = match schema.items {
            Some(ref items) => Some(self.lower_ref(items, &format!("{}/items", location))?),
            None => None,
        };
        Ok(SchemaKind::Array { items })
    }

    fn lower_object(&mut self, schema: &Schema, location: &str) -> Result<SchemaKind> {
        let mut properties = Vec::new();
        for (name, property) in &schema.properties {
            let property_location =
                format!("{}/properties/{}", location, escape_pointer(name));
            let id = self.lower_ref(property, &property_location)?;
            properties.push(Property {
                name: name.clone(),
                schema: id,
            });
        }

        let additional_properties = matches!(
            schema.additional_properties,
            Some(AdditionalProperties::Allowed(true)) | Some(AdditionalProperties::Schema(_))
        );

        Ok(SchemaKind::Object(ObjectSchema {
            properties,
            required: schema.required.clone(),
            additional_properties,
        }))
    }

    fn resolve_path(&mut self, path: &str, item: &'a types::PathItem) -> Result<PathItem> {
        if let Some(ref ref_path) = item.ref_path {
            return Err(TranslationError::UnresolvedReference(format!(
                "path item {} refers to {}; path item references are not supported",
                path, ref_path
            )));
        }

        let path_location = format!("#/paths/{}", escape_pointer(path));
        let shared = self.resolve_parameters(&item.parameters)?;

        let mut operations = Vec::new();
        for (method, operation) in item.operations()? {
            let location = format!("{}/{}", path_location, method.as_str());
            operations.push(self.resolve_operation(method, &operation, &shared, &location)?);
        }

        Ok(PathItem {
            path: path.to_string(),
            operations,
        })
    }

    fn resolve_parameters(
        &self,
        parameters: &'a [ReferenceOr<types::Parameter>],
    ) -> Result<Vec<&'a types::Parameter>> {
        let spec: &'a OpenApiSpec = self.spec;
        let components = spec.components.as_ref().map(|c| &c.parameters);
        parameters
            .iter()
            .map(|p| resolve_component(p, components, "parameters"))
            .collect()
    }

    fn resolve_operation(
        &mut self,
        method: HttpMethod,
        operation: &types::Operation,
        shared: &[&'a types::Parameter],
        location: &str,
    ) -> Result<Operation> {
        // Operation-level parameters override path-level ones with the same
        // name and location
        let own = self.resolve_own_parameters(&operation.parameters)?;
        let mut merged: Vec<types::Parameter> = shared.iter().map(|p| (*p).clone()).collect();
        for param in own {
            match merged
                .iter_mut()
                .find(|p| p.name == param.name && p.location == param.location)
            {
                Some(existing) => *existing = param,
                None => merged.push(param),
            }
        }

        let mut parameters = Vec::new();
        for (i, param) in merged.iter().enumerate() {
            let param_location = format!("{}/parameters/{}", location, i);
            parameters.push(self.lower_parameter(param, &param_location)?);
        }

        let request_body = match operation.request_body {
            Some(ref body) => self.lower_request_body(body, &format!("{}/requestBody", location))?,
            None => None,
        };

        let mut responses = Vec::new();
        for (status, response) in &operation.responses {
            let response_location = format!("{}/responses/{}", location, escape_pointer(status));
            responses.push(self.lower_response(status, response, &response_location)?);
        }

        Ok(Operation {
            method,
            operation_id: operation.operation_id.clone(),
            summary: operation.summary.clone(),
            description: operation.description.clone(),
            deprecated: operation.deprecated,
            parameters,
            request_body,
            responses,
        })
    }

    fn resolve_own_parameters(
        &self,
        parameters: &[ReferenceOr<types::Parameter>],
    ) -> Result<Vec<types::Parameter>> {
        let spec: &'a OpenApiSpec = self.spec;
        let components = spec.components.as_ref().map(|c| &c.parameters);
        parameters
            .iter()
            .map(|p| resolve_component(p, components, "parameters").cloned())
            .collect()
    }

    fn lower_parameter(&mut self, param: &types::Parameter, location: &str) -> Result<Parameter> {
        let schema = match param.schema {
            Some(ref schema) => Some(schema),
            None => select_media_type(&param.content).and_then(|(_, m)| m.schema.as_ref()),
        };
        let schema = match schema {
            Some(schema) => self.lower_ref(schema, &format!("{}/schema", location))?,
            // Parameters travel as strings when nothing else is declared
            None => self.arena.push(SchemaDef::new(
                location,
                SchemaKind::Primitive {
                    kind: PrimitiveKind::String,
                    format: None,
                },
            )),
        };

        Ok(Parameter {
            name: param.name.clone(),
            location: param.location,
            required: param.required || param.location == ParameterLocation::Path,
            description: param.description.clone(),
            schema,
        })
    }

    fn lower_request_body(
        &mut self,
        body: &ReferenceOr<types::RequestBody>,
        location: &str,
    ) -> Result<Option<RequestBody>> {
        let spec: &'a OpenApiSpec = self.spec;
        let components = spec.components.as_ref().map(|c| &c.request_bodies);
        let body = resolve_component(body, components, "requestBodies")?;

        let Some((content_type, media)) = select_media_type(&body.content) else {
            debug!(location, "request body declares no content, skipping");
            return Ok(None);
        };

        let schema_location = format!("{}/content/{}/schema", location, escape_pointer(content_type));
        let schema = match media.schema {
            Some(ref schema) => self.lower_ref(schema, &schema_location)?,
            None => self.arena.push(SchemaDef::new(schema_location, SchemaKind::Any)),
        };

        Ok(Some(RequestBody {
            content_type: content_type.clone(),
            schema,
            required: body.required,
            description: body.description.clone(),
        }))
    }

    fn lower_response(
        &mut self,
        status: &str,
        response: &ReferenceOr<types::Response>,
        location: &str,
    ) -> Result<Response> {
        let spec: &'a OpenApiSpec = self.spec;
        let components = spec.components.as_ref().map(|c| &c.responses);
        let response = resolve_component(response, components, "responses")?;

        let media = select_media_type(&response.content);
        let content_type = media.map(|(ct, _)| ct.clone());
        let schema = match media.and_then(|(ct, m)| m.schema.as_ref().map(|s| (ct, s))) {
            Some((ct, schema)) => {
                let schema_location =
                    format!("{}/content/{}/schema", location, escape_pointer(ct));
                Some(self.lower_ref(schema, &schema_location)?)
            },
            None => None,
        };

        Ok(Response {
            status: status.to_string(),
            description: response.description.clone(),
            content_type,
            schema,
        })
    }
}

/// Called once non-null type names are filtered out: a declared `type`
/// that listed nothing but "null"
fn declares_only_null(schema: &Schema) -> bool {
    !schema.type_names().is_empty()
}

/// Follow a `$ref` chain inside one components section
fn resolve_component<'s, T>(
    item: &'s ReferenceOr<T>,
    components: Option<&'s IndexMap<String, ReferenceOr<T>>>,
    section: &str,
) -> Result<&'s T> {
    let mut current = item;
    for _ in 0..MAX_REF_DEPTH {
        match current {
            ReferenceOr::Item(value) => return Ok(value),
            ReferenceOr::Reference { ref_path } => {
                current = local_component_name(ref_path, section)
                    .and_then(|name| components.and_then(|c| c.get(&name)))
                    .ok_or_else(|| TranslationError::UnresolvedReference(ref_path.clone()))?;
            },
        }
    }
    Err(TranslationError::Cycle(format!(
        "$ref chain in #/components/{} exceeds {} hops",
        section, MAX_REF_DEPTH
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(json: &str) -> OpenApiSpec {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_rejects_swagger_2() {
        let s = spec(r#"{"swagger": "2.0", "info": {"title": "t", "version": "1"}}"#);
        let err = resolve_document(&s).unwrap_err();
        assert!(err.to_string().contains("Swagger"));
    }

    #[test]
    fn test_component_alias_shares_id() {
        let s = spec(
            r##"{
                "openapi": "3.0.0",
                "info": {"title": "t", "version": "1"},
                "components": {"schemas": {
                    "PetAlias": {"$ref": "#/components/schemas/Pet"},
                    "Pet": {"type": "object", "properties": {"id": {"type": "integer"}}}
                }}
            }"##,
        );
        let doc = resolve_document(&s).unwrap();
        assert_eq!(doc.component("PetAlias"), doc.component("Pet"));
        let names: Vec<&String> = doc.components.keys().collect();
        assert_eq!(names, vec!["PetAlias", "Pet"]);
    }

    #[test]
    fn test_alias_cycle_is_error() {
        let s = spec(
            r##"{
                "openapi": "3.0.0",
                "info": {"title": "t", "version": "1"},
                "components": {"schemas": {
                    "A": {"$ref": "#/components/schemas/B"},
                    "B": {"$ref": "#/components/schemas/A"}
                }}
            }"##,
        );
        assert!(matches!(
            resolve_document(&s),
            Err(TranslationError::Cycle(_))
        ));
    }

    #[test]
    fn test_unresolved_reference() {
        let s = spec(
            r##"{
                "openapi": "3.0.0",
                "info": {"title": "t", "version": "1"},
                "components": {"schemas": {
                    "A": {"type": "object", "properties": {"b": {"$ref": "#/components/schemas/Missing"}}}
                }}
            }"##,
        );
        match resolve_document(&s) {
            Err(TranslationError::UnresolvedReference(r)) => {
                assert_eq!(r, "#/components/schemas/Missing")
            },
            other => panic!("expected unresolved reference, got {:?}", other),
        }
    }

    #[test]
    fn test_one_of_with_all_of_is_unsupported() {
        let s = spec(
            r##"{
                "openapi": "3.0.0",
                "info": {"title": "t", "version": "1"},
                "components": {"schemas": {
                    "A": {"oneOf": [{"type": "string"}], "allOf": [{"type": "object"}]}
                }}
            }"##,
        );
        assert!(matches!(
            resolve_document(&s),
            Err(TranslationError::UnsupportedSchemaConstruct { .. })
        ));
    }

    #[test]
    fn test_null_members_mark_union_nullable() {
        let s = spec(
            r##"{
                "openapi": "3.1.0",
                "info": {"title": "t", "version": "1"},
                "components": {"schemas": {
                    "Pet": {"type": "object", "properties": {"id": {"type": "integer"}}},
                    "MaybePet": {"anyOf": [{"$ref": "#/components/schemas/Pet"}, {"type": "null"}]}
                }}
            }"##,
        );
        let doc = resolve_document(&s).unwrap();
        let maybe = doc.schema(doc.component("MaybePet").unwrap());
        assert!(maybe.nullable);
        assert_eq!(
            maybe.kind,
            SchemaKind::Union {
                mode: UnionMode::AnyOf,
                members: vec![doc.component("Pet").unwrap()]
            }
        );
    }

    #[test]
    fn test_type_list_with_null() {
        let s = spec(
            r##"{
                "openapi": "3.1.0",
                "info": {"title": "t", "version": "1"},
                "components": {"schemas": {"Name": {"type": ["string", "null"]}}}
            }"##,
        );
        let doc = resolve_document(&s).unwrap();
        let name = doc.schema(doc.component("Name").unwrap());
        assert!(name.nullable);
        assert!(matches!(
            name.kind,
            SchemaKind::Primitive {
                kind: PrimitiveKind::String,
                ..
            }
        ));
    }

    #[test]
    fn test_parameters_merge_and_body_selection() {
        let s = spec(
            r##"{
                "openapi": "3.0.0",
                "info": {"title": "t", "version": "1"},
                "paths": {"/pets/{id}": {
                    "parameters": [
                        {"name": "id", "in": "path", "schema": {"type": "string"}},
                        {"$ref": "#/components/parameters/Trace"}
                    ],
                    "put": {
                        "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}],
                        "requestBody": {"content": {
                            "text/plain": {"schema": {"type": "string"}},
                            "application/json": {"schema": {"type": "object", "properties": {"name": {"type": "string"}}}}
                        }},
                        "responses": {"204": {"description": "No content"}}
                    }
                }},
                "components": {"parameters": {
                    "Trace": {"name": "X-Trace", "in": "header", "schema": {"type": "string"}}
                }}
            }"##,
        );
        let doc = resolve_document(&s).unwrap();
        let op = &doc.paths[0].operations[0];

        assert_eq!(op.parameters.len(), 2);
        assert_eq!(op.parameters[0].name, "id");
        assert!(op.parameters[0].required);
        assert!(matches!(
            doc.schema(op.parameters[0].schema).kind,
            SchemaKind::Primitive {
                kind: PrimitiveKind::Integer,
                ..
            }
        ));
        assert_eq!(op.parameters[1].location, ParameterLocation::Header);

        let body = op.request_body.as_ref().unwrap();
        assert_eq!(body.content_type, "application/json");
        assert_eq!(op.responses[0].status, "204");
        assert!(op.responses[0].schema.is_none());
    }

    #[test]
    fn test_deprecated_parameter_is_lowered_like_any_other() {
        let s = spec(
            r##"{
                "openapi": "3.0.0",
                "info": {"title": "t", "version": "1"},
                "paths": {"/pets": {"get": {
                    "parameters": [{
                        "name": "tag",
                        "in": "query",
                        "description": "Use filter instead",
                        "deprecated": true,
                        "schema": {"type": "string"}
                    }],
                    "responses": {"200": {"description": "OK"}}
                }}}
            }"##,
        );
        let doc = resolve_document(&s).unwrap();
        let param = &doc.paths[0].operations[0].parameters[0];

        assert_eq!(param.name, "tag");
        assert_eq!(param.location, ParameterLocation::Query);
        assert!(!param.required);
        assert_eq!(param.description.as_deref(), Some("Use filter instead"));
    }

    #[test]
    fn test_all_of_own_properties_become_member() {
        let s = spec(
            r##"{
                "openapi": "3.0.0",
                "info": {"title": "t", "version": "1"},
                "components": {"schemas": {
                    "Base": {"type": "object", "properties": {"id": {"type": "integer"}}},
                    "Dog": {
                        "allOf": [{"$ref": "#/components/schemas/Base"}],
                        "properties": {"bark": {"type": "boolean"}},
                        "required": ["id"]
                    }
                }}
            }"##,
        );
        let doc = resolve_document(&s).unwrap();
        match &doc.schema(doc.component("Dog").unwrap()).kind {
            SchemaKind::AllOf { members } => {
                assert_eq!(members.len(), 2);
                assert_eq!(members[0], doc.component("Base").unwrap());
                match &doc.schema(members[1]).kind {
                    SchemaKind::Object(own) => {
                        assert_eq!(own.properties[0].name, "bark");
                        assert_eq!(own.required, vec!["id".to_string()]);
                    },
                    other => panic!("unexpected kind {:?}", other),
                }
            },
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_select_media_type_preference() {
        let mut content = IndexMap::new();
        let media = || MediaType {
            schema: Some(ReferenceOr::Item(Schema::default())),
        };
        content.insert("text/plain".to_string(), media());
        content.insert("application/problem+json".to_string(), media());
        assert_eq!(
            select_media_type(&content).map(|(ct, _)| ct.as_str()),
            Some("application/problem+json")
        );

        content.insert("application/json; charset=utf-8".to_string(), media());
        assert_eq!(
            select_media_type(&content).map(|(ct, _)| ct.as_str()),
            Some("application/json; charset=utf-8")
        );
    }
}
