//! Wire format → typed tree.
//!
//! Parsers hand us JSON shaped like `{"type": "TypeUnion", "elements": [...]}`.
//! Decoding is permissive: every field is optional, unknown keys are ignored,
//! and unknown tags survive as [`TypeKind::Other`].
use serde::Deserialize;
use serde_json::Value;

use crate::error::DecodeError;
use crate::ir::{FieldType, Signature, TypeKind, TypeNode};

// Variant tags emitted by the grammar.
pub const ALL_LITERAL: &str = "AllLiteral";
pub const FUNCTION_TYPE: &str = "FunctionType";
pub const NAME_EXPRESSION: &str = "NameExpression";
pub const NULL_LITERAL: &str = "NullLiteral";
pub const RECORD_TYPE: &str = "RecordType";
pub const TYPE_APPLICATION: &str = "TypeApplication";
pub const TYPE_UNION: &str = "TypeUnion";
pub const UNDEFINED_LITERAL: &str = "UndefinedLiteral";
pub const UNKNOWN_LITERAL: &str = "UnknownLiteral";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawNode {
    #[serde(rename = "type")]
    pub tag: Option<String>,
    pub name: Option<String>,
    pub inner: Option<Box<RawNode>>,
    pub expression: Option<Box<RawNode>>,
    pub applications: Option<Vec<RawNode>>,
    pub elements: Option<Vec<RawNode>>,
    pub fields: Option<Vec<RawField>>,
    pub new: Option<Box<RawNode>>,
    pub this: Option<Box<RawNode>>,
    pub params: Option<Vec<RawNode>>,
    pub result: Option<Box<RawNode>>,
    pub optional: Option<bool>,
    pub nullable: Option<bool>,
    pub repeatable: Option<bool>,
}

/// A record entry (`FieldType` upstream). Its tag carries no information.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawField {
    pub key: Option<RawNode>,
    pub value: Option<RawNode>,
}

pub fn lower_node(raw: RawNode) -> TypeNode {
    let RawNode {
        tag,
        name,
        inner,
        expression,
        applications,
        elements,
        fields,
        new,
        this,
        params,
        result,
        optional,
        nullable,
        repeatable,
    } = raw;

    let kind = match tag.as_deref() {
        Some(ALL_LITERAL) => TypeKind::AllLiteral,
        Some(NULL_LITERAL) => TypeKind::NullLiteral,
        Some(UNDEFINED_LITERAL) => TypeKind::UndefinedLiteral,
        Some(UNKNOWN_LITERAL) => TypeKind::UnknownLiteral,
        Some(NAME_EXPRESSION) => TypeKind::NameExpression,
        Some(TYPE_UNION) => TypeKind::TypeUnion(lower_all(elements)),
        Some(RECORD_TYPE) => TypeKind::RecordType(
            fields.unwrap_or_default().into_iter().map(lower_field).collect(),
        ),
        Some(TYPE_APPLICATION) => TypeKind::TypeApplication {
            // missing base renders as an empty name
            expression: lower_boxed(expression).unwrap_or_default(),
            applications: applications.map(|xs| xs.into_iter().map(lower_node).collect()),
        },
        Some(FUNCTION_TYPE) => TypeKind::FunctionType(Signature {
            new: lower_boxed(new),
            this: lower_boxed(this),
            params: lower_all(params),
            result: lower_boxed(result),
        }),
        Some(other) => TypeKind::Other(other.to_string()),
        None => TypeKind::Other(String::new()),
    };

    TypeNode {
        kind,
        name,
        inner: lower_boxed(inner),
        optional,
        nullable: nullable.into(),
        repeatable,
    }
}

fn lower_boxed(raw: Option<Box<RawNode>>) -> Option<Box<TypeNode>> {
    raw.map(|n| Box::new(lower_node(*n)))
}

fn lower_all(raw: Option<Vec<RawNode>>) -> Vec<TypeNode> {
    raw.unwrap_or_default().into_iter().map(lower_node).collect()
}

fn lower_field(raw: RawField) -> FieldType {
    FieldType {
        key: raw.key.map(lower_node).unwrap_or_default(),
        value: raw.value.map(lower_node),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ENTRY POINTS
// ————————————————————————————————————————————————————————————————————————————

pub fn from_str(src: &str) -> Result<TypeNode, DecodeError> {
    crate::path_de::from_str_with_path::<RawNode>(src).map(lower_node)
}

pub fn from_json_value(value: &Value) -> Result<TypeNode, DecodeError> {
    crate::path_de::from_value_with_path::<RawNode>(value).map(lower_node)
}

/// Decode the subnode at `pointer` (RFC 6901), e.g. `/returns/0/type`.
pub fn from_json_pointer(value: &Value, pointer: &str) -> Result<TypeNode, DecodeError> {
    let sub = value
        .pointer(pointer)
        .ok_or_else(|| DecodeError::Pointer(pointer.to_string()))?;
    from_json_value(sub)
}
