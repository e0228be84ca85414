//! Integration test for SDL generation from OpenAPI documents

use openapi_graphql_common::TranslatorConfig;
use openapi_graphql_generator::{generate_schema_file, print_schema};
use openapi_graphql_parser::{load_graphql_schema, translate, OpenApiParser};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn petstore() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../parser/tests/fixtures/petstore.yaml")
}

#[test]
fn test_generate_petstore_schema() {
    let schema =
        load_graphql_schema("petstore", &petstore(), &TranslatorConfig::default()).unwrap();

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("schema/petstore.graphql");
    let result = generate_schema_file(&schema, &output);
    assert!(result.is_ok(), "Failed to generate schema: {:?}", result);

    let sdl = fs::read_to_string(&output).unwrap();
    println!("Generated SDL:\n{}", sdl);

    assert!(sdl.starts_with("type Query {\n"));
    assert!(sdl.contains("  \"List all pets\"\n  listPets(\n"));
    assert!(sdl.contains("    limit: Int = 20\n    status: Status\n  ): [Pet]!\n"));
    assert!(sdl.contains("    petId: String!\n  ): Pet!\n"));
    assert!(sdl.contains("\ntype Mutation {\n"));
    assert!(sdl.contains("createPets(input: PetInput!): Void"));
    assert!(sdl.contains(
        "deletePetByPetId(\n    \"The id of the pet to retrieve\"\n    petId: String!\n  ): Void @deprecated(reason: \"No longer supported\")\n"
    ));
    assert!(sdl.contains(
        "\"Adoption status\"\nenum Status {\n  available\n  pending\n  sold\n}\n"
    ));
    assert!(sdl.contains("\ninput PetInput {\n"));
    assert!(sdl.contains("\nscalar BigInt\n"));
    assert!(sdl.contains(
        "scalar Date @specifiedBy(url: \"https://datatracker.ietf.org/doc/html/rfc3339#section-5.6\")"
    ));
    assert!(!sdl.ends_with("\n\n"));
    assert!(!sdl.contains("scalar String"));
}

#[test]
fn test_query_precedes_mutation() {
    let schema =
        load_graphql_schema("petstore", &petstore(), &TranslatorConfig::default()).unwrap();
    let sdl = print_schema(&schema).unwrap();

    let query = sdl.find("type Query {").unwrap();
    let mutation = sdl.find("type Mutation {").unwrap();
    let pet = sdl.find("type Pet {").unwrap();
    assert!(query < mutation);
    assert!(mutation < pet);
}

#[test]
fn test_generate_from_inline_json() {
    let doc = OpenApiParser::from_json(
        r#"{
          "openapi": "3.0.0",
          "info": {"title": "Users", "version": "1"},
          "paths": {
            "/users/{id}": {
              "get": {
                "parameters": [
                  {"name": "id", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}
                ],
                "responses": {
                  "200": {
                    "description": "ok",
                    "content": {"application/json": {"schema": {
                      "type": "object",
                      "properties": {
                        "id": {"type": "string", "format": "uuid"},
                        "tags": {"type": "array", "items": {"type": "string"}},
                        "meta": {"type": "object"}
                      }
                    }}}
                  }
                }
              }
            }
          }
        }"#,
    )
    .unwrap()
    .parse()
    .unwrap();

    let schema = translate(&doc, &TranslatorConfig::default()).unwrap();
    let sdl = print_schema(&schema).unwrap();

    assert!(sdl.starts_with("type Query {\n  getUserById(id: UUID!): GetUserByIdResponse!\n}\n"));
    assert!(sdl.contains(
        "type GetUserByIdResponse {\n  id: UUID\n  tags: [String]\n  meta: JSON\n}\n"
    ));
    assert!(sdl.contains(
        "scalar UUID @specifiedBy(url: \"https://datatracker.ietf.org/doc/html/rfc4122\")"
    ));
    assert!(!sdl.contains("type Mutation"));
}
