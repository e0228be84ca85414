//! GraphQL identifier assignment
//!
//! Every name the translator emits passes through a [`NamingResolver`]. It
//! sanitizes raw candidates into `/[_A-Za-z][_0-9A-Za-z]*/` and keeps one
//! table of assigned names per [`Namespace`], so that type names are unique
//! across the schema while field, argument and enum value names only need to
//! be unique within their parent.

use heck::ToUpperCamelCase;
use openapi_graphql_common::{
    CollisionPolicy, HttpMethod, Result, TranslationError, RESERVED_TYPE_NAMES,
};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// Scope inside which assigned names must be unique
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Type names, global to the schema
    Types,
    /// Field names of one object or input object type
    Fields(String),
    /// Argument names of one field, keyed as `Parent.field`
    Arguments(String),
    /// Values of one enum type
    EnumValues(String),
}

impl Namespace {
    /// Stand-in for candidates that sanitize to nothing
    fn placeholder(&self) -> &'static str {
        match self {
            Namespace::Types => "Unnamed",
            Namespace::Fields(_) | Namespace::Arguments(_) => "unnamed",
            Namespace::EnumValues(_) => "EMPTY",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Types => write!(f, "type names"),
            Namespace::Fields(parent) => write!(f, "fields of {}", parent),
            Namespace::Arguments(field) => write!(f, "arguments of {}", field),
            Namespace::EnumValues(parent) => write!(f, "values of enum {}", parent),
        }
    }
}

/// Assigns valid, unique GraphQL names
///
/// First come, first served: the first candidate to claim a name gets the
/// bare form and later ones receive the lowest free numeric suffix starting
/// at 2, unless the policy is [`CollisionPolicy::Fail`].
#[derive(Debug)]
pub struct NamingResolver {
    policy: CollisionPolicy,
    tables: HashMap<Namespace, HashSet<String>>,
}

impl NamingResolver {
    pub fn new(policy: CollisionPolicy) -> Self {
        let mut resolver = Self {
            policy,
            tables: HashMap::new(),
        };
        for name in RESERVED_TYPE_NAMES {
            resolver.reserve(&Namespace::Types, name);
        }
        resolver
    }

    /// Mark a name as taken without sanitizing it
    pub fn reserve(&mut self, namespace: &Namespace, name: &str) {
        self.tables
            .entry(namespace.clone())
            .or_default()
            .insert(name.to_string());
    }

    pub fn is_assigned(&self, namespace: &Namespace, name: &str) -> bool {
        self.tables
            .get(namespace)
            .is_some_and(|names| names.contains(name))
    }

    /// Sanitize `candidate` and claim a unique name for it in `namespace`
    pub fn assign(&mut self, namespace: &Namespace, candidate: &str) -> Result<String> {
        let base = sanitize(candidate, namespace);
        let taken = self.tables.entry(namespace.clone()).or_default();

        let name = if !taken.contains(&base) {
            base
        } else if self.policy == CollisionPolicy::Fail {
            return Err(TranslationError::NameCollision {
                namespace: namespace.to_string(),
                name: base,
            });
        } else {
            (2..)
                .map(|n| format!("{}{}", base, n))
                .find(|suffixed| !taken.contains(suffixed))
                .unwrap_or_default()
        };

        if name != candidate {
            debug!(%namespace, candidate, assigned = %name, "renamed identifier");
        }
        taken.insert(name.clone());
        Ok(name)
    }
}

impl Default for NamingResolver {
    fn default() -> Self {
        Self::new(CollisionPolicy::default())
    }
}

/// Rewrite a raw candidate into a valid GraphQL name
///
/// # Examples
/// ```
/// use openapi_graphql_parser::naming::{sanitize, Namespace};
///
/// assert_eq!(sanitize("pet-store", &Namespace::Types), "pet_store");
/// assert_eq!(sanitize("1", &Namespace::EnumValues("Size".into())), "_1");
/// assert_eq!(sanitize("__typename", &Namespace::Types), "_typename");
/// ```
pub fn sanitize(candidate: &str, namespace: &Namespace) -> String {
    let mut name: String = candidate
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if name.is_empty() {
        return namespace.placeholder().to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    // `__` prefixes belong to introspection
    while name.starts_with("__") {
        name.remove(0);
    }
    if matches!(namespace, Namespace::EnumValues(_))
        && matches!(name.as_str(), "true" | "false" | "null")
    {
        name.insert(0, '_');
    }
    name
}

/// Field name for an operation without a usable operationId
///
/// Static segments are Pascal-cased, a static segment directly followed by
/// a parameter is singularized, and parameters are appended as `ByXAndY`.
///
/// # Examples
/// ```
/// use openapi_graphql_parser::naming::derive_field_name;
/// use openapi_graphql_common::HttpMethod;
///
/// assert_eq!(derive_field_name(HttpMethod::Get, "/pets/{id}"), "getPetById");
/// assert_eq!(derive_field_name(HttpMethod::Post, "/pets"), "postPets");
/// ```
pub fn derive_field_name(method: HttpMethod, path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut name = method.as_str().to_string();
    let mut params = Vec::new();
    for (i, segment) in segments.iter().enumerate() {
        if let Some(param) = path_parameter(segment) {
            params.push(param.to_upper_camel_case());
            continue;
        }
        let followed_by_param = segments
            .get(i + 1)
            .is_some_and(|next| path_parameter(next).is_some());
        if followed_by_param {
            name.push_str(&singularize(segment).to_upper_camel_case());
        } else {
            name.push_str(&segment.to_upper_camel_case());
        }
    }

    if !params.is_empty() {
        name.push_str("By");
        name.push_str(&params.join("And"));
    }
    name
}

fn path_parameter(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// Naive English singular, enough for REST collection names
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies").filter(|s| !s.is_empty()) {
        format!("{}y", stem)
    } else if let Some(stem) = word.strip_suffix("sses") {
        format!("{}ss", stem)
    } else if word.ends_with("ss") || word.ends_with("us") {
        word.to_string()
    } else if let Some(stem) = word.strip_suffix('s').filter(|s| !s.is_empty()) {
        stem.to_string()
    } else {
        word.to_string()
    }
}
