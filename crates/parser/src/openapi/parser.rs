//! OpenAPI spec file parser

use super::document::Document;
use super::resolver::resolve_document;
use super::types::OpenApiSpec;
use openapi_graphql_common::{Result, TranslationError};
use std::fs;
use std::path::Path;
use tracing::debug;

/// OpenAPI specification parser
///
/// Reads OpenAPI 3.0/3.1 documents in JSON or YAML form and resolves them
/// into a [`Document`] for the translator.
pub struct OpenApiParser {
    /// Loaded OpenAPI spec
    spec: OpenApiSpec,
}

impl OpenApiParser {
    /// Load OpenAPI spec from file path
    ///
    /// `.json` files are parsed as JSON, `.yaml`/`.yml` as YAML; any other
    /// extension is sniffed from the content.
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiParser::from_file("openapi-spec.yaml")?;
    /// let document = parser.parse()?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TranslationError::Parse(format!(
                "Failed to read OpenAPI file {}: {}",
                path.display(),
                e
            ))
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        debug!(path = %path.display(), "loading OpenAPI document");

        match extension.as_deref() {
            Some("json") => Self::from_json(&content),
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_str(&content),
        }
    }

    /// Parse OpenAPI spec from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: OpenApiSpec = serde_json::from_str(json).map_err(|e| {
            TranslationError::Parse(format!("Failed to parse OpenAPI JSON: {}", e))
        })?;

        Ok(Self { spec })
    }

    /// Parse OpenAPI spec from YAML string
    ///
    /// YAML goes through `serde_json::Value` first so that unquoted status
    /// codes such as `200:` become string keys.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: serde_json::Value = serde_yaml::from_str(yaml).map_err(|e| {
            TranslationError::Parse(format!("Failed to parse OpenAPI YAML: {}", e))
        })?;
        let spec: OpenApiSpec = serde_json::from_value(value).map_err(|e| {
            TranslationError::Parse(format!("Invalid OpenAPI document: {}", e))
        })?;

        Ok(Self { spec })
    }

    /// Parse OpenAPI spec from JSON or YAML, deciding by the first character
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        if content.trim_start().starts_with('{') {
            Self::from_json(content)
        } else {
            Self::from_yaml(content)
        }
    }

    /// Resolve references and build the translator Document
    pub fn parse(&self) -> Result<Document> {
        resolve_document(&self.spec)
    }

    /// Get reference to the underlying OpenAPI spec
    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_openapi() {
        let openapi_json = r#"{
            "openapi": "3.0.0",
            "info": {
                "title": "Test API",
                "version": "1.0.0"
            },
            "paths": {}
        }"#;

        let parser = OpenApiParser::from_json(openapi_json);
        assert!(parser.is_ok());

        let parser = parser.unwrap();
        assert_eq!(parser.spec.openapi.as_deref(), Some("3.0.0"));
        assert_eq!(parser.spec.info.title, "Test API");

        let document = parser.parse().unwrap();
        assert_eq!(document.operation_count(), 0);
    }

    #[test]
    fn test_parse_yaml_with_numeric_status_codes() {
        let yaml = r#"
openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        200:
          description: OK
          content:
            application/json:
              schema:
                type: array
                items:
                  type: string
"#;
        let parser = OpenApiParser::from_str(yaml).unwrap();
        let document = parser.parse().unwrap();
        let op = &document.paths[0].operations[0];
        assert_eq!(op.responses[0].status, "200");
        assert!(op.responses[0].schema.is_some());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let result = OpenApiParser::from_json("{ not json");
        assert!(matches!(result, Err(TranslationError::Parse(_))));
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.yml");
        fs::write(
            &path,
            "openapi: 3.1.0\ninfo:\n  title: T\n  version: '1'\npaths: {}\n",
        )
        .unwrap();

        let parser = OpenApiParser::from_file(&path).unwrap();
        assert_eq!(parser.spec().info.title, "T");
    }
}
