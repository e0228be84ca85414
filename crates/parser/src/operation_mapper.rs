//! Operation classification and root field mapping
//!
//! Maps OpenAPI operations to fields of the Query or Mutation type, with an
//! argument per parameter, one for the request body, and a
//! [`ResolverBinding`] describing the HTTP call behind the field.

use crate::context::{ScalarKind, TranslationContext, TypeCategory};
use crate::naming::{derive_field_name, Namespace};
use crate::openapi::{Operation, PathItem, Response};
use crate::type_mapper::{TypeMapper, DEFAULT_DEPRECATION_REASON};
use heck::ToUpperCamelCase;
use openapi_graphql_common::{
    ArgumentBinding, BindingTarget, FieldNode, HttpMethod, InputValue, ResolverBinding, Result,
    RootKind, TypeRef,
};
use tracing::debug;

/// A mapped operation and the root type it belongs to
#[derive(Debug, Clone)]
pub struct RootField {
    pub kind: RootKind,
    pub field: FieldNode,
}

/// Maps OpenAPI operations to GraphQL root fields
pub struct OperationMapper;

impl OperationMapper {
    /// Classify an HTTP method into a root operation type
    ///
    /// # Examples
    /// ```
    /// use openapi_graphql_parser::OperationMapper;
    /// use openapi_graphql_common::{HttpMethod, RootKind};
    ///
    /// assert_eq!(OperationMapper::classify(HttpMethod::Get), RootKind::Query);
    /// assert_eq!(OperationMapper::classify(HttpMethod::Head), RootKind::Query);
    /// assert_eq!(OperationMapper::classify(HttpMethod::Delete), RootKind::Mutation);
    /// ```
    pub fn classify(method: HttpMethod) -> RootKind {
        method.root_kind()
    }

    /// Raw field name: the operationId when it is unique in the document,
    /// otherwise derived from method and path
    pub fn candidate_name(ctx: &TranslationContext<'_>, path: &PathItem, op: &Operation) -> String {
        if let Some(id) = op.operation_id.as_deref().filter(|id| !id.is_empty()) {
            if ctx.operation_id_count(id) == 1 {
                return id.to_string();
            }
            debug!(
                operation_id = id,
                path = %path.path,
                "operationId is not unique, deriving name from path"
            );
        }
        derive_field_name(op.method, &path.path)
    }

    /// Map one operation to a root field
    pub fn map_operation(
        ctx: &mut TranslationContext<'_>,
        path: &PathItem,
        op: &Operation,
    ) -> Result<RootField> {
        let doc = ctx.doc;
        let config = ctx.config;
        let kind = Self::classify(op.method);
        let parent = kind.type_name();

        let candidate = Self::candidate_name(ctx, path, op);
        let name = ctx
            .naming
            .assign(&Namespace::Fields(parent.to_string()), &candidate)?;
        let type_hint = name.to_upper_camel_case();
        let arguments_ns = Namespace::Arguments(format!("{}.{}", parent, name));

        let mut arguments = Vec::new();
        let mut bindings = Vec::new();

        for param in &op.parameters {
            let arg_name = ctx.naming.assign(&arguments_ns, &param.name)?;
            let hint = format!("{}{}", type_hint, param.name.to_upper_camel_case());
            let ty = TypeMapper::map_schema(ctx, param.schema, TypeCategory::Input, &hint)?
                .required_if(param.required);

            let mut argument = InputValue::new(arg_name, ty);
            if argument.name != param.name {
                argument.source_name = Some(param.name.clone());
            }
            argument.description = param.description.clone();
            argument.default_value = match doc.schema(param.schema).default {
                Some(ref value) => TypeMapper::default_value(ctx, &argument.ty, value),
                None => None,
            };

            bindings.push(ArgumentBinding {
                argument: argument.name.clone(),
                target: BindingTarget::Parameter {
                    location: param.location,
                    name: param.name.clone(),
                },
            });
            arguments.push(argument);
        }

        if let Some(ref body) = op.request_body {
            let arg_name = ctx
                .naming
                .assign(&arguments_ns, &config.body_argument_name)?;
            let hint = format!("{}Input", type_hint);
            let ty = TypeMapper::map_schema(ctx, body.schema, TypeCategory::Input, &hint)?
                .required_if(body.required);

            let mut argument = InputValue::new(arg_name, ty);
            argument.description = body.description.clone();

            bindings.push(ArgumentBinding {
                argument: argument.name.clone(),
                target: BindingTarget::Body {
                    content_type: body.content_type.clone(),
                },
            });
            arguments.push(argument);
        }

        let selected = Self::select_response(op);
        let ty = match selected.and_then(|r| r.schema.map(|s| (r, s))) {
            Some((_, schema)) => {
                let hint = format!("{}Response", type_hint);
                let nullable = doc.schema(schema).nullable;
                TypeMapper::map_schema(ctx, schema, TypeCategory::Output, &hint)?
                    .required_if(!nullable)
            },
            None => TypeRef::named(ctx.scalar(ScalarKind::Success)),
        };
        let status_source = selected.or_else(|| Self::success_responses(op).into_iter().next());

        let mut field = FieldNode::new(name, ty);
        field.arguments = arguments;
        field.description = op.description.clone().or_else(|| op.summary.clone());
        if op.deprecated {
            field.deprecation = Some(DEFAULT_DEPRECATION_REASON.to_string());
        }
        field.resolver = Some(ResolverBinding {
            method: op.method,
            path: path.path.clone(),
            arguments: bindings,
            response_status: status_source.map(|r| r.status.clone()),
            response_content_type: selected.and_then(|r| r.content_type.clone()),
        });

        debug!(
            method = %op.method,
            path = %path.path,
            field = %field.name,
            root = parent,
            "mapped operation"
        );
        Ok(RootField { kind, field })
    }

    /// The success response whose body becomes the field's type
    ///
    /// Lowest explicit 2xx code with a body schema first, then `2XX`;
    /// `default` never counts as success.
    pub fn select_response(op: &Operation) -> Option<&Response> {
        Self::success_responses(op)
            .into_iter()
            .find(|r| r.schema.is_some())
    }

    /// 2xx responses, explicit codes ascending, then the `2XX` range
    fn success_responses(op: &Operation) -> Vec<&Response> {
        let mut ranked: Vec<((u8, u16), &Response)> = op
            .responses
            .iter()
            .filter_map(|r| Self::success_rank(&r.status).map(|rank| (rank, r)))
            .collect();
        ranked.sort_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, r)| r).collect()
    }

    fn success_rank(status: &str) -> Option<(u8, u16)> {
        if status.eq_ignore_ascii_case("2XX") {
            return Some((1, 200));
        }
        match status.parse::<u16>() {
            Ok(code) if (200..300).contains(&code) => Some((0, code)),
            _ => None,
        }
    }
}
