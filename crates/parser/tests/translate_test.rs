//! Translation behavior over complete documents

use openapi_graphql_common::{
    GraphQLSchema, RootKind, TranslationError, TranslatorConfig, TypeDefinition, TypeRef,
};
use openapi_graphql_parser::{translate, OpenApiParser};

fn translate_json(json: &str) -> Result<GraphQLSchema, TranslationError> {
    let doc = OpenApiParser::from_json(json)?.parse()?;
    translate(&doc, &TranslatorConfig::default())
}

#[test]
fn test_get_pet_by_id() {
    let schema = translate_json(
        r##"{
            "openapi": "3.0.3",
            "info": {"title": "Pets", "version": "1"},
            "paths": {"/pets/{id}": {"get": {
                "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}],
                "responses": {"200": {"description": "ok",
                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}}}}
            }}},
            "components": {"schemas": {"Pet": {
                "type": "object",
                "required": ["id"],
                "properties": {"id": {"type": "integer"}, "name": {"type": "string"}}
            }}}
        }"##,
    )
    .unwrap();

    assert_eq!(schema.query_fields().len(), 1);
    assert!(schema.mutation_type_id().is_none());

    let field = &schema.query_fields()[0];
    assert_eq!(field.name, "getPetById");
    assert_eq!(schema.display_type(&field.ty), "Pet!");
    assert_eq!(
        schema.display_type(&field.argument("id").unwrap().ty),
        "Int!"
    );

    let pet = schema.type_by_name("Pet").and_then(TypeDefinition::as_object).unwrap();
    assert_eq!(schema.display_type(&pet.field("id").unwrap().ty), "Int!");
    assert_eq!(schema.display_type(&pet.field("name").unwrap().ty), "String");
}

#[test]
fn test_self_referencing_pet() {
    let schema = translate_json(
        r##"{
            "openapi": "3.0.3",
            "info": {"title": "Pets", "version": "1"},
            "paths": {"/pets": {"get": {"responses": {"200": {"description": "ok",
                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}}}}}}},
            "components": {"schemas": {"Pet": {
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "friends": {"type": "array", "items": {"$ref": "#/components/schemas/Pet"}}
                }
            }}}
        }"##,
    )
    .unwrap();

    let pets: Vec<&TypeDefinition> = schema
        .types()
        .iter()
        .filter(|t| t.name().starts_with("Pet"))
        .collect();
    assert_eq!(pets.len(), 1);

    let pet = pets[0].as_object().unwrap();
    let friends = &pet.field("friends").unwrap().ty;
    assert_eq!(schema.display_type(friends), "[Pet]");
    assert_eq!(
        friends,
        &TypeRef::list(TypeRef::named(schema.type_id("Pet").unwrap()))
    );
}

#[test]
fn test_zero_paths_is_empty_schema() {
    let result = translate_json(
        r#"{"openapi": "3.0.3", "info": {"title": "Nothing", "version": "1"}, "paths": {}}"#,
    );
    assert!(matches!(result, Err(TranslationError::EmptySchema)));
}

#[test]
fn test_methods_split_between_roots() {
    let schema = translate_json(
        r#"{
            "openapi": "3.0.3",
            "info": {"title": "Pets", "version": "1"},
            "paths": {
                "/pets": {
                    "get": {"operationId": "listPets", "responses": {}},
                    "post": {"operationId": "createPet", "responses": {}}
                },
                "/pets/{id}": {
                    "head": {"operationId": "petExists", "responses": {}},
                    "put": {"operationId": "replacePet", "responses": {}},
                    "patch": {"operationId": "updatePet", "responses": {}},
                    "delete": {"operationId": "deletePet", "responses": {}}
                }
            }
        }"#,
    )
    .unwrap();

    let names = |kind| -> Vec<String> {
        schema
            .root_fields(kind)
            .iter()
            .map(|f| f.name.clone())
            .collect()
    };
    assert_eq!(names(RootKind::Query), vec!["listPets", "petExists"]);
    assert_eq!(
        names(RootKind::Mutation),
        vec!["createPet", "replacePet", "updatePet", "deletePet"]
    );
}

#[test]
fn test_distinct_schemas_named_status() {
    let schema = translate_json(
        r##"{
            "openapi": "3.0.3",
            "info": {"title": "Orders", "version": "1"},
            "paths": {
                "/orders": {"get": {"responses": {"200": {"description": "ok", "content": {"application/json": {"schema": {
                    "type": "object",
                    "properties": {"status": {"$ref": "#/components/schemas/Status"}}
                }}}}}}},
                "/shipments": {"get": {"responses": {"200": {"description": "ok", "content": {"application/json": {"schema": {
                    "type": "object",
                    "properties": {"status": {"title": "Status", "type": "string", "enum": ["in-transit", "delivered"]}}
                }}}}}}}
            },
            "components": {"schemas": {"Status": {"type": "string", "enum": ["open", "closed"]}}}
        }"##,
    )
    .unwrap();

    let first = schema.type_by_name("Status").and_then(TypeDefinition::as_enum).unwrap();
    let second = schema.type_by_name("Status2").and_then(TypeDefinition::as_enum).unwrap();
    assert_eq!(first.values[0].name, "open");
    assert_eq!(second.values[0].name, "in_transit");
}

#[test]
fn test_result_is_referentially_closed() {
    let schema = translate_json(
        r##"{
            "openapi": "3.0.3",
            "info": {"title": "Shop", "version": "1"},
            "paths": {"/orders": {"post": {
                "requestBody": {"required": true, "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Order"}}}},
                "responses": {"201": {"description": "created", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Order"}}}}}
            }}},
            "components": {"schemas": {
                "Order": {"type": "object", "required": ["items"], "properties": {
                    "id": {"type": "string", "format": "uuid", "readOnly": true},
                    "placedAt": {"type": "string", "format": "date-time"},
                    "items": {"type": "array", "items": {"$ref": "#/components/schemas/Line"}},
                    "meta": {"type": "object", "additionalProperties": true}
                }},
                "Line": {"type": "object", "properties": {
                    "sku": {"type": "string"},
                    "order": {"$ref": "#/components/schemas/Order"}
                }}
            }}
        }"##,
    )
    .unwrap();

    schema.validate().unwrap();
    for name in ["Order", "OrderInput", "Line", "LineInput", "UUID", "DateTime", "JSON"] {
        assert!(schema.type_by_name(name).is_some(), "missing {}", name);
    }
    assert_eq!(schema.query_fields()[0].name, "_empty");

    let create = &schema.mutation_fields()[0];
    assert_eq!(create.name, "postOrders");
    assert_eq!(schema.display_type(&create.argument("input").unwrap().ty), "OrderInput!");

    let order_input = schema
        .type_by_name("OrderInput")
        .and_then(TypeDefinition::as_input_object)
        .unwrap();
    assert!(order_input.field("id").is_none());
    assert_eq!(
        schema.display_type(&order_input.field("items").unwrap().ty),
        "[LineInput]!"
    );
}

#[test]
fn test_translation_is_deterministic() {
    let json = r##"{
        "openapi": "3.0.3",
        "info": {"title": "Pets", "version": "1"},
        "paths": {"/pets": {"get": {"responses": {"200": {"description": "ok",
            "content": {"application/json": {"schema": {"type": "array", "items": {"$ref": "#/components/schemas/Pet"}}}}}}}}},
        "components": {"schemas": {"Pet": {"type": "object", "properties": {"a": {"type": "string"}, "b": {"type": "integer"}}}}}
    }"##;
    assert_eq!(translate_json(json).unwrap(), translate_json(json).unwrap());
}
