//! GraphQL schema model
//!
//! The translator produces a [`GraphQLSchema`]: a flat list of type
//! definitions addressed by [`TypeId`], plus the ids of the root operation
//! types. Type references point at ids rather than names, which keeps
//! mutually recursive types free of shared pointers and makes referential
//! closure a simple range check.

use crate::{Result, TranslationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Index of a type definition inside [`GraphQLSchema::types`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub usize);

impl TypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Reference to a type, with list and non-null wrappers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    Named(TypeId),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(id: TypeId) -> Self {
        TypeRef::Named(id)
    }

    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    /// Wrap in a non-null marker (no-op if already non-null)
    pub fn non_null(self) -> Self {
        match self {
            TypeRef::NonNull(_) => self,
            other => TypeRef::NonNull(Box::new(other)),
        }
    }

    /// Wrap in a non-null marker when `required` holds
    pub fn required_if(self, required: bool) -> Self {
        if required {
            self.non_null()
        } else {
            self
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    pub fn is_list(&self) -> bool {
        match self {
            TypeRef::List(_) => true,
            TypeRef::NonNull(inner) => inner.is_list(),
            TypeRef::Named(_) => false,
        }
    }

    /// The innermost named type
    pub fn named_type(&self) -> TypeId {
        match self {
            TypeRef::Named(id) => *id,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.named_type(),
        }
    }
}

/// Kind of a GraphQL type definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Object,
    InputObject,
    Enum,
    Scalar,
    Union,
}

impl TypeKind {
    /// Whether values of this kind may appear in field results
    pub fn is_output(self) -> bool {
        !matches!(self, TypeKind::InputObject)
    }

    /// Whether values of this kind may appear in arguments and input fields
    pub fn is_input(self) -> bool {
        matches!(
            self,
            TypeKind::InputObject | TypeKind::Enum | TypeKind::Scalar
        )
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Object => write!(f, "type"),
            TypeKind::InputObject => write!(f, "input"),
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::Scalar => write!(f, "scalar"),
            TypeKind::Union => write!(f, "union"),
        }
    }
}

/// A named GraphQL type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeDefinition {
    Object(ObjectType),
    InputObject(InputObjectType),
    Enum(EnumType),
    Scalar(ScalarType),
    Union(UnionType),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Object(t) => &t.name,
            TypeDefinition::InputObject(t) => &t.name,
            TypeDefinition::Enum(t) => &t.name,
            TypeDefinition::Scalar(t) => &t.name,
            TypeDefinition::Union(t) => &t.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            TypeDefinition::Object(t) => t.description.as_deref(),
            TypeDefinition::InputObject(t) => t.description.as_deref(),
            TypeDefinition::Enum(t) => t.description.as_deref(),
            TypeDefinition::Scalar(t) => t.description.as_deref(),
            TypeDefinition::Union(t) => t.description.as_deref(),
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDefinition::Object(_) => TypeKind::Object,
            TypeDefinition::InputObject(_) => TypeKind::InputObject,
            TypeDefinition::Enum(_) => TypeKind::Enum,
            TypeDefinition::Scalar(_) => TypeKind::Scalar,
            TypeDefinition::Union(_) => TypeKind::Union,
        }
    }

    /// Built-in scalars exist in the model but are never printed
    pub fn is_builtin(&self) -> bool {
        matches!(self, TypeDefinition::Scalar(s) if s.builtin)
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            TypeDefinition::Object(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        match self {
            TypeDefinition::InputObject(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            TypeDefinition::Enum(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&UnionType> {
        match self {
            TypeDefinition::Union(t) => Some(t),
            _ => None,
        }
    }
}

/// Object type (`type Foo { ... }`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldNode>,
}

impl ObjectType {
    pub fn field(&self, name: &str) -> Option<&FieldNode> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Input object type (`input Foo { ... }`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<InputValue>,
}

impl InputObjectType {
    pub fn field(&self, name: &str) -> Option<&InputValue> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Enum type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<EnumValue>,
}

/// One enum value, with the literal it stands for in the HTTP API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub value: serde_json::Value,
    pub description: Option<String>,
}

/// Scalar type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    pub specified_by: Option<String>,
    pub builtin: bool,
}

/// Union type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<TypeId>,
}

/// Field of an object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    pub name: String,
    /// Property name in the HTTP payload when sanitization changed it
    pub source_name: Option<String>,
    pub description: Option<String>,
    pub ty: TypeRef,
    pub arguments: Vec<InputValue>,
    pub deprecation: Option<String>,
    /// Present on root fields only
    pub resolver: Option<ResolverBinding>,
}

impl FieldNode {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            source_name: None,
            description: None,
            ty,
            arguments: Vec::new(),
            deprecation: None,
            resolver: None,
        }
    }

    pub fn argument(&self, name: &str) -> Option<&InputValue> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

/// Argument or input object field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputValue {
    pub name: String,
    pub source_name: Option<String>,
    pub description: Option<String>,
    pub ty: TypeRef,
    pub default_value: Option<ConstValue>,
}

impl InputValue {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            source_name: None,
            description: None,
            ty,
            default_value: None,
        }
    }
}

/// Constant GraphQL value, used for argument defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstValue {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    Enum(String),
    List(Vec<ConstValue>),
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Null => write!(f, "null"),
            ConstValue::Boolean(b) => write!(f, "{}", b),
            ConstValue::Int(i) => write!(f, "{}", i),
            ConstValue::Float(x) => write!(f, "{}", x),
            // JSON string escaping is a subset of GraphQL string escaping
            ConstValue::String(s) => match serde_json::to_string(s) {
                Ok(quoted) => write!(f, "{}", quoted),
                Err(_) => Err(fmt::Error),
            },
            ConstValue::Enum(name) => write!(f, "{}", name),
            ConstValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// HTTP method of an OpenAPI operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Parse a path item key (case-insensitive)
    pub fn parse(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "put" => Some(HttpMethod::Put),
            "post" => Some(HttpMethod::Post),
            "delete" => Some(HttpMethod::Delete),
            "options" => Some(HttpMethod::Options),
            "head" => Some(HttpMethod::Head),
            "patch" => Some(HttpMethod::Patch),
            "trace" => Some(HttpMethod::Trace),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }

    /// GET and HEAD are safe and become queries; everything else is a mutation
    pub fn root_kind(self) -> RootKind {
        match self {
            HttpMethod::Get | HttpMethod::Head => RootKind::Query,
            _ => RootKind::Mutation,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_ascii_uppercase())
    }
}

/// Root operation type a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RootKind {
    Query,
    Mutation,
}

impl RootKind {
    pub fn type_name(self) -> &'static str {
        match self {
            RootKind::Query => "Query",
            RootKind::Mutation => "Mutation",
        }
    }
}

/// Where an OpenAPI parameter is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Cookie => write!(f, "cookie"),
        }
    }
}

/// How a root field maps back onto an HTTP call
///
/// Consumed by an execution layer; the translator only records it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverBinding {
    pub method: HttpMethod,
    /// Path template, e.g. `/pets/{id}`
    pub path: String,
    pub arguments: Vec<ArgumentBinding>,
    /// Status code whose body feeds the field's return type
    pub response_status: Option<String>,
    pub response_content_type: Option<String>,
}

impl ResolverBinding {
    pub fn binding_for(&self, argument: &str) -> Option<&ArgumentBinding> {
        self.arguments.iter().find(|a| a.argument == argument)
    }
}

/// One argument of a root field and the request part it fills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentBinding {
    pub argument: String,
    pub target: BindingTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingTarget {
    Parameter {
        location: ParameterLocation,
        name: String,
    },
    Body {
        content_type: String,
    },
}

/// A complete GraphQL schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLSchema {
    types: Vec<TypeDefinition>,
    query: TypeId,
    mutation: Option<TypeId>,
}

impl GraphQLSchema {
    /// Build a schema from its parts without validating it
    pub fn new(types: Vec<TypeDefinition>, query: TypeId, mutation: Option<TypeId>) -> Self {
        Self {
            types,
            query,
            mutation,
        }
    }

    pub fn types(&self) -> &[TypeDefinition] {
        &self.types
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeDefinition> {
        self.types.get(id.index())
    }

    pub fn type_by_name(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.name() == name)
    }

    pub fn type_id(&self, name: &str) -> Option<TypeId> {
        self.types.iter().position(|t| t.name() == name).map(TypeId)
    }

    pub fn query_type_id(&self) -> TypeId {
        self.query
    }

    pub fn mutation_type_id(&self) -> Option<TypeId> {
        self.mutation
    }

    pub fn root_type(&self, kind: RootKind) -> Option<&ObjectType> {
        let id = match kind {
            RootKind::Query => Some(self.query),
            RootKind::Mutation => self.mutation,
        }?;
        self.get(id).and_then(TypeDefinition::as_object)
    }

    pub fn root_fields(&self, kind: RootKind) -> &[FieldNode] {
        self.root_type(kind)
            .map(|t| t.fields.as_slice())
            .unwrap_or(&[])
    }

    pub fn query_fields(&self) -> &[FieldNode] {
        self.root_fields(RootKind::Query)
    }

    pub fn mutation_fields(&self) -> &[FieldNode] {
        self.root_fields(RootKind::Mutation)
    }

    /// Every resolver binding registered on a root field
    pub fn resolver_bindings(
        &self,
    ) -> impl Iterator<Item = (RootKind, &FieldNode, &ResolverBinding)> + '_ {
        [RootKind::Query, RootKind::Mutation]
            .into_iter()
            .flat_map(move |kind| {
                self.root_fields(kind)
                    .iter()
                    .filter_map(move |f| f.resolver.as_ref().map(|b| (kind, f, b)))
            })
    }

    /// Render a type reference in SDL notation, e.g. `[Pet]!`
    pub fn display_type(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Named(id) => self
                .get(*id)
                .map(|t| t.name().to_string())
                .unwrap_or_else(|| format!("<unknown #{}>", id.index())),
            TypeRef::List(inner) => format!("[{}]", self.display_type(inner)),
            TypeRef::NonNull(inner) => format!("{}!", self.display_type(inner)),
        }
    }

    /// Check the GraphQL type-system rules the translator guarantees:
    /// unique names, closed references, correct input/output usage and
    /// non-empty root operation types.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for ty in &self.types {
            if !names.insert(ty.name()) {
                return Err(TranslationError::InvalidSchema(format!(
                    "type name '{}' is defined more than once",
                    ty.name()
                )));
            }
        }

        for ty in &self.types {
            match ty {
                TypeDefinition::Object(object) => {
                    if object.fields.is_empty() {
                        return Err(TranslationError::InvalidSchema(format!(
                            "object type '{}' has no fields",
                            object.name
                        )));
                    }
                    for field in &object.fields {
                        let owner = format!("{}.{}", object.name, field.name);
                        self.check_ref(&owner, &field.ty, TypeKind::is_output)?;
                        for arg in &field.arguments {
                            let owner = format!("{}({}:)", owner, arg.name);
                            self.check_ref(&owner, &arg.ty, TypeKind::is_input)?;
                        }
                    }
                },
                TypeDefinition::InputObject(input) => {
                    if input.fields.is_empty() {
                        return Err(TranslationError::InvalidSchema(format!(
                            "input type '{}' has no fields",
                            input.name
                        )));
                    }
                    for field in &input.fields {
                        let owner = format!("{}.{}", input.name, field.name);
                        self.check_ref(&owner, &field.ty, TypeKind::is_input)?;
                    }
                },
                TypeDefinition::Union(union) => {
                    for member in &union.members {
                        match self.get(*member) {
                            Some(TypeDefinition::Object(_)) => {}
                            Some(other) => {
                                return Err(TranslationError::InvalidSchema(format!(
                                    "union '{}' member '{}' is not an object type",
                                    union.name,
                                    other.name()
                                )))
                            },
                            None => {
                                return Err(TranslationError::InvalidSchema(format!(
                                    "union '{}' references undefined type #{}",
                                    union.name,
                                    member.index()
                                )))
                            },
                        }
                    }
                },
                TypeDefinition::Enum(e) if e.values.is_empty() => {
                    return Err(TranslationError::InvalidSchema(format!(
                        "enum '{}' has no values",
                        e.name
                    )));
                },
                TypeDefinition::Enum(_) | TypeDefinition::Scalar(_) => {}
            }
        }

        match self.root_type(RootKind::Query) {
            Some(query) if !query.fields.is_empty() => {}
            _ => {
                return Err(TranslationError::InvalidSchema(
                    "query root type is missing or empty".to_string(),
                ))
            },
        }
        if self.mutation.is_some() && self.root_type(RootKind::Mutation).is_none() {
            return Err(TranslationError::InvalidSchema(
                "mutation root is not an object type".to_string(),
            ));
        }

        Ok(())
    }

    fn check_ref(&self, owner: &str, ty: &TypeRef, allowed: fn(TypeKind) -> bool) -> Result<()> {
        let id = ty.named_type();
        match self.get(id) {
            Some(target) if allowed(target.kind()) => Ok(()),
            Some(target) => Err(TranslationError::InvalidSchema(format!(
                "{} cannot use {} '{}' here",
                owner,
                target.kind(),
                target.name()
            ))),
            None => Err(TranslationError::InvalidSchema(format!(
                "{} references undefined type #{}",
                owner,
                id.index()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(name: &str, builtin: bool) -> TypeDefinition {
        TypeDefinition::Scalar(ScalarType {
            name: name.to_string(),
            description: None,
            specified_by: None,
            builtin,
        })
    }

    fn query_with(fields: Vec<FieldNode>) -> TypeDefinition {
        TypeDefinition::Object(ObjectType {
            name: "Query".to_string(),
            description: None,
            fields,
        })
    }

    #[test]
    fn test_type_ref_wrappers() {
        let ty = TypeRef::list(TypeRef::named(TypeId(3))).non_null();
        assert!(ty.is_non_null());
        assert!(ty.is_list());
        assert_eq!(ty.named_type(), TypeId(3));
        // non_null is idempotent
        assert_eq!(ty.clone().non_null(), ty);
    }

    #[test]
    fn test_display_type() {
        let schema = GraphQLSchema::new(
            vec![
                scalar("String", true),
                query_with(vec![FieldNode::new("a", TypeRef::named(TypeId(0)))]),
            ],
            TypeId(1),
            None,
        );
        let ty = TypeRef::list(TypeRef::named(TypeId(0)).non_null()).non_null();
        assert_eq!(schema.display_type(&ty), "[String!]!");
    }

    #[test]
    fn test_http_method_classification() {
        assert_eq!(HttpMethod::Get.root_kind(), RootKind::Query);
        assert_eq!(HttpMethod::Head.root_kind(), RootKind::Query);
        for method in [
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
            HttpMethod::Options,
            HttpMethod::Trace,
        ] {
            assert_eq!(method.root_kind(), RootKind::Mutation);
        }
        assert_eq!(HttpMethod::parse("GET"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::parse("parameters"), None);
    }

    #[test]
    fn test_const_value_display() {
        assert_eq!(ConstValue::String("a\"b".to_string()).to_string(), "\"a\\\"b\"");
        assert_eq!(ConstValue::Enum("ACTIVE".to_string()).to_string(), "ACTIVE");
        assert_eq!(
            ConstValue::List(vec![ConstValue::Int(1), ConstValue::Int(2)]).to_string(),
            "[1, 2]"
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let schema = GraphQLSchema::new(
            vec![
                scalar("String", true),
                scalar("String", false),
                query_with(vec![FieldNode::new("a", TypeRef::named(TypeId(0)))]),
            ],
            TypeId(2),
            None,
        );
        assert!(matches!(
            schema.validate(),
            Err(TranslationError::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_validate_rejects_dangling_reference() {
        let schema = GraphQLSchema::new(
            vec![query_with(vec![FieldNode::new(
                "a",
                TypeRef::named(TypeId(7)),
            )])],
            TypeId(0),
            None,
        );
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("undefined type #7"));
    }

    #[test]
    fn test_validate_rejects_empty_query() {
        let schema = GraphQLSchema::new(vec![query_with(vec![])], TypeId(0), None);
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_input_in_output_position() {
        let schema = GraphQLSchema::new(
            vec![
                scalar("String", true),
                TypeDefinition::InputObject(InputObjectType {
                    name: "PetInput".to_string(),
                    description: None,
                    fields: vec![InputValue::new("name", TypeRef::named(TypeId(0)))],
                }),
                query_with(vec![FieldNode::new("pet", TypeRef::named(TypeId(1)))]),
            ],
            TypeId(2),
            None,
        );
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("PetInput"));
    }

    #[test]
    fn test_resolver_bindings_iteration() {
        let mut field = FieldNode::new("listPets", TypeRef::named(TypeId(0)));
        field.resolver = Some(ResolverBinding {
            method: HttpMethod::Get,
            path: "/pets".to_string(),
            arguments: vec![],
            response_status: Some("200".to_string()),
            response_content_type: Some("application/json".to_string()),
        });
        let schema = GraphQLSchema::new(
            vec![scalar("String", true), query_with(vec![field])],
            TypeId(1),
            None,
        );
        assert!(schema.validate().is_ok());

        let bindings: Vec<_> = schema.resolver_bindings().collect();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].0, RootKind::Query);
        assert_eq!(bindings[0].2.path, "/pets");
    }
}
