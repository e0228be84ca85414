//! Template loading and management

use openapi_graphql_common::{Result, TranslationError};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Name the SDL template is registered under
pub const SCHEMA_TEMPLATE: &str = "schema.graphql";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    // Register custom filters
    tera.register_filter("description", description_filter);
    tera.register_filter("graphql_string", graphql_string_filter);

    tera.add_raw_template(SCHEMA_TEMPLATE, include_str!("../templates/schema.graphql.tera"))
        .map_err(|e| {
            TranslationError::Generation(format!("Failed to load schema.graphql template: {}", e))
        })?;

    Ok(tera)
}

/// Filter to render a description, indented by the `indent` argument
///
/// Single-line text becomes a quoted string, multi-line text a block string.
fn description_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("description filter expects a string"))?;
    let indent = args.get("indent").and_then(Value::as_str).unwrap_or("");

    Ok(Value::String(format_description(text, indent)))
}

/// Filter to quote a value as a GraphQL string literal
fn graphql_string_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("graphql_string filter expects a string"))?;

    Ok(Value::String(quote(s)))
}

pub(crate) fn format_description(text: &str, indent: &str) -> String {
    let text = text.trim_end();
    if !text.contains('\n') {
        return format!("{}{}", indent, quote(text));
    }

    let mut out = format!("{}\"\"\"\n", indent);
    for line in text.lines() {
        let line = line.trim_end();
        if !line.is_empty() {
            out.push_str(indent);
            out.push_str(&line.replace("\"\"\"", "\\\"\"\""));
        }
        out.push('\n');
    }
    out.push_str(indent);
    out.push_str("\"\"\"");
    out
}

/// JSON string escapes are valid GraphQL string escapes
pub(crate) fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}
