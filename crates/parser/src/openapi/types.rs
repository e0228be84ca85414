//! OpenAPI 3.x type definitions
//!
//! Raw serde representation of the parts of an OpenAPI document the
//! translator reads. Maps are `IndexMap`s so declaration order survives
//! parsing; it drives naming precedence later on.

use indexmap::IndexMap;
use openapi_graphql_common::{HttpMethod, ParameterLocation, Result};
use serde::{Deserialize, Serialize};

/// OpenAPI document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// OpenAPI version (e.g., "3.0.3")
    #[serde(default, deserialize_with = "optional_version")]
    pub openapi: Option<String>,

    /// Set by Swagger 2.0 documents, which are rejected
    #[serde(default)]
    pub swagger: Option<String>,

    /// API metadata
    pub info: Info,

    /// API paths (endpoints)
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    /// Reusable components
    #[serde(default)]
    pub components: Option<Components>,

    /// Servers
    #[serde(default)]
    pub servers: Vec<Server>,
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    #[serde(deserialize_with = "version")]
    pub version: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub url: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Either a `$ref` pointer or an inline item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceOr<T> {
    Reference {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Item(T),
}

/// Path item (operations for a path)
///
/// Operations are kept as raw values keyed by method so that they come
/// out in the order the document declares them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Parameters shared by every operation of this path
    #[serde(default)]
    pub parameters: Vec<ReferenceOr<Parameter>>,

    #[serde(flatten)]
    pub entries: IndexMap<String, serde_json::Value>,
}

impl PathItem {
    /// Operations of this path in declaration order
    pub fn operations(&self) -> Result<Vec<(HttpMethod, Operation)>> {
        let mut operations = Vec::new();
        for (key, value) in &self.entries {
            if let Some(method) = HttpMethod::parse(key) {
                let operation: Operation = serde_json::from_value(value.clone())?;
                operations.push((method, operation));
            }
        }
        Ok(operations)
    }
}

/// HTTP operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Operation ID (unique identifier)
    #[serde(rename = "operationId")]
    #[serde(default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<ReferenceOr<Parameter>>,

    #[serde(rename = "requestBody")]
    #[serde(default)]
    pub request_body: Option<ReferenceOr<RequestBody>>,

    /// Responses keyed by status code ("200", "2XX", "default")
    #[serde(default)]
    pub responses: IndexMap<String, ReferenceOr<Response>>,

    #[serde(default)]
    pub deprecated: bool,

    /// Tags (for grouping)
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Parameter definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub schema: Option<ReferenceOr<Schema>>,

    /// Alternative to `schema` for complex serializations
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

/// Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Media type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<ReferenceOr<Schema>>,
}

/// `type` keyword: a single name, or a list in OpenAPI 3.1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

/// `additionalProperties` keyword
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<ReferenceOr<Schema>>),
}

/// Schema definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    #[serde(default)]
    pub schema_type: Option<SchemaType>,

    /// Format (e.g., int32, int64, date-time)
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub properties: IndexMap<String, ReferenceOr<Schema>>,

    #[serde(default)]
    pub required: Vec<String>,

    #[serde(default)]
    pub items: Option<Box<ReferenceOr<Schema>>>,

    #[serde(rename = "additionalProperties")]
    #[serde(default)]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(rename = "enum")]
    #[serde(default)]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(rename = "oneOf")]
    #[serde(default)]
    pub one_of: Vec<ReferenceOr<Schema>>,

    #[serde(rename = "anyOf")]
    #[serde(default)]
    pub any_of: Vec<ReferenceOr<Schema>>,

    #[serde(rename = "allOf")]
    #[serde(default)]
    pub all_of: Vec<ReferenceOr<Schema>>,

    #[serde(default)]
    pub nullable: bool,

    #[serde(rename = "readOnly")]
    #[serde(default)]
    pub read_only: bool,

    #[serde(rename = "writeOnly")]
    #[serde(default)]
    pub write_only: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

impl Schema {
    /// Type names listed by the `type` keyword
    pub fn type_names(&self) -> Vec<&str> {
        match &self.schema_type {
            Some(SchemaType::Single(name)) => vec![name.as_str()],
            Some(SchemaType::Multiple(names)) => names.iter().map(String::as_str).collect(),
            None => Vec::new(),
        }
    }

    /// `{type: "null"}`, used as a nullability marker inside `oneOf`/`anyOf`
    pub fn is_null_type(&self) -> bool {
        self.type_names() == ["null"]
            && self.properties.is_empty()
            && self.one_of.is_empty()
            && self.any_of.is_empty()
            && self.all_of.is_empty()
    }
}

/// Unquoted YAML versions such as `1.0` arrive as numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum Version {
    Text(String),
    Number(serde_json::Number),
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        match v {
            Version::Text(s) => s,
            Version::Number(n) => n.to_string(),
        }
    }
}

fn version<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Version::deserialize(deserializer).map(String::from)
}

fn optional_version<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Option::<Version>::deserialize(deserializer).map(|v| v.map(String::from))
}

/// Reusable components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, ReferenceOr<Schema>>,

    #[serde(default)]
    pub parameters: IndexMap<String, ReferenceOr<Parameter>>,

    #[serde(rename = "requestBodies")]
    #[serde(default)]
    pub request_bodies: IndexMap<String, ReferenceOr<RequestBody>>,

    #[serde(default)]
    pub responses: IndexMap<String, ReferenceOr<Response>>,
}

/// Component name addressed by a local reference
/// e.g., ("#/components/schemas/Pet", "schemas") -> "Pet"
pub fn local_component_name(ref_path: &str, section: &str) -> Option<String> {
    let prefix = format!("#/components/{}/", section);
    let name = ref_path.strip_prefix(&prefix)?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    // JSON pointer escapes
    Some(name.replace("~1", "/").replace("~0", "~"))
}

/// Escape a path or key for use inside a JSON pointer
pub fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
