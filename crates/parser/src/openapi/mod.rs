//! OpenAPI 3.x document loading
//!
//! Parses OpenAPI 3.0 and 3.1 documents (JSON or YAML) and resolves them
//! into a [`Document`]: every local `$ref` is replaced by an arena id,
//! path-level parameters are merged into operations, and one media type is
//! selected per request and response body.
//!
//! Only local references (`#/components/...`) are supported. Swagger 2.0
//! documents are rejected.
//!
//! ## Usage
//! ```rust,ignore
//! use openapi_graphql_parser::openapi::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("openapi-spec.yaml")?;
//! let document = parser.parse()?;
//! ```

mod document;
mod parser;
mod resolver;
mod types;

pub use document::*;
pub use parser::OpenApiParser;
pub use types::{
    local_component_name, AdditionalProperties, Components, Info, MediaType, OpenApiSpec,
    ReferenceOr, Schema, SchemaType, Server,
};
