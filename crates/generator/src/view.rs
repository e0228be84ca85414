//! Template context for SDL rendering
//!
//! Flattens a [`GraphQLSchema`] into plain serializable records: type
//! references are already rendered (`[Pet]!`) and default values are
//! GraphQL literals, so the template only has to lay them out.

use openapi_graphql_common::{FieldNode, GraphQLSchema, InputValue, TypeDefinition, TypeId};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TypeView {
    /// SDL keyword: type, input, enum, scalar, union
    pub kind: String,
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldView>,
    pub values: Vec<EnumValueView>,
    pub members: Vec<String>,
    pub specified_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FieldView {
    pub name: String,
    pub description: Option<String>,
    pub ty: String,
    pub arguments: Vec<ArgumentView>,
    /// One argument per line, needed as soon as any argument is described
    pub multiline_arguments: bool,
    pub default: Option<String>,
    pub deprecation: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArgumentView {
    pub name: String,
    pub description: Option<String>,
    pub ty: String,
    pub default: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EnumValueView {
    pub name: String,
    pub description: Option<String>,
}

/// Printable types in output order: Query, Mutation, then the rest in
/// creation order. Built-in scalars are skipped.
pub fn type_views(schema: &GraphQLSchema) -> Vec<TypeView> {
    let roots: Vec<TypeId> = std::iter::once(schema.query_type_id())
        .chain(schema.mutation_type_id())
        .collect();
    let rest = (0..schema.types().len())
        .map(TypeId)
        .filter(|id| !roots.contains(id));

    roots
        .iter()
        .copied()
        .chain(rest)
        .filter_map(|id| schema.get(id))
        .filter(|def| !def.is_builtin())
        .map(|def| type_view(schema, def))
        .collect()
}

fn type_view(schema: &GraphQLSchema, def: &TypeDefinition) -> TypeView {
    let mut view = TypeView {
        kind: def.kind().to_string(),
        name: def.name().to_string(),
        description: def.description().map(str::to_string),
        fields: Vec::new(),
        values: Vec::new(),
        members: Vec::new(),
        specified_by: None,
    };

    match def {
        TypeDefinition::Object(object) => {
            view.fields = object.fields.iter().map(|f| field_view(schema, f)).collect();
        },
        TypeDefinition::InputObject(input) => {
            view.fields = input
                .fields
                .iter()
                .map(|f| input_field_view(schema, f))
                .collect();
        },
        TypeDefinition::Enum(enum_type) => {
            view.values = enum_type
                .values
                .iter()
                .map(|v| EnumValueView {
                    name: v.name.clone(),
                    description: v.description.clone(),
                })
                .collect();
        },
        TypeDefinition::Scalar(scalar) => {
            view.specified_by = scalar.specified_by.clone();
        },
        TypeDefinition::Union(union) => {
            view.members = union
                .members
                .iter()
                .filter_map(|id| schema.get(*id))
                .map(|member| member.name().to_string())
                .collect();
        },
    }
    view
}

fn field_view(schema: &GraphQLSchema, field: &FieldNode) -> FieldView {
    let arguments: Vec<ArgumentView> = field
        .arguments
        .iter()
        .map(|arg| argument_view(schema, arg))
        .collect();

    FieldView {
        name: field.name.clone(),
        description: field.description.clone(),
        ty: schema.display_type(&field.ty),
        multiline_arguments: arguments.iter().any(|a| a.description.is_some()),
        arguments,
        default: None,
        deprecation: field.deprecation.clone(),
    }
}

fn input_field_view(schema: &GraphQLSchema, field: &InputValue) -> FieldView {
    FieldView {
        name: field.name.clone(),
        description: field.description.clone(),
        ty: schema.display_type(&field.ty),
        arguments: Vec::new(),
        multiline_arguments: false,
        default: field.default_value.as_ref().map(ToString::to_string),
        deprecation: None,
    }
}

fn argument_view(schema: &GraphQLSchema, arg: &InputValue) -> ArgumentView {
    ArgumentView {
        name: arg.name.clone(),
        description: arg.description.clone(),
        ty: schema.display_type(&arg.ty),
        default: arg.default_value.as_ref().map(ToString::to_string),
    }
}
