// Strongly-typed type-expression tree. No serde_json::Value here.

/// One node of a parsed Closure/JSDoc type expression.
///
/// Modifier flags are orthogonal to `kind`; they decorate the rendered body
/// of any variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeNode {
    pub kind: TypeKind,
    pub name: Option<String>,
    /// Payload type carried by a leaf under its name (`foo:goog.ui.Menu`).
    pub inner: Option<Box<TypeNode>>,
    pub optional: Option<bool>,
    pub nullable: Nullability,
    pub repeatable: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeKind {
    AllLiteral,              // `*`
    NullLiteral,             // `null`
    UndefinedLiteral,        // `undefined`
    UnknownLiteral,          // `?`
    #[default]
    NameExpression,          // plain or qualified identifier
    TypeUnion(Vec<TypeNode>),          // order is significant
    RecordType(Vec<FieldType>),        // order is significant
    TypeApplication {
        expression: Box<TypeNode>,
        applications: Option<Vec<TypeNode>>,
    },
    FunctionType(Signature),
    /// Tag not known to this grammar version; renders like a name expression.
    Other(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldType {
    pub key: TypeNode,
    pub value: Option<TypeNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub new: Option<Box<TypeNode>>,
    pub this: Option<Box<TypeNode>>,
    pub params: Vec<TypeNode>,
    pub result: Option<Box<TypeNode>>,
}

/// Three-valued nullable flag: `?`, `!`, or nothing at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Nullability {
    #[default]
    Unspecified,
    Nullable,
    NonNull,
}

impl From<Option<bool>> for Nullability {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            None => Nullability::Unspecified,
            Some(true) => Nullability::Nullable,
            Some(false) => Nullability::NonNull,
        }
    }
}

impl From<Nullability> for Option<bool> {
    fn from(n: Nullability) -> Self {
        match n {
            Nullability::Unspecified => None,
            Nullability::Nullable => Some(true),
            Nullability::NonNull => Some(false),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONSTRUCTORS
// ————————————————————————————————————————————————————————————————————————————

impl TypeNode {
    pub fn of_kind(kind: TypeKind) -> Self {
        Self { kind, ..Self::default() }
    }

    /// Plain identifier such as `string` or `goog.ui.Menu`.
    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn all() -> Self { Self::of_kind(TypeKind::AllLiteral) }
    pub fn null() -> Self { Self::of_kind(TypeKind::NullLiteral) }
    pub fn undefined() -> Self { Self::of_kind(TypeKind::UndefinedLiteral) }
    pub fn unknown() -> Self { Self::of_kind(TypeKind::UnknownLiteral) }

    pub fn union(members: impl IntoIterator<Item = TypeNode>) -> Self {
        Self::of_kind(TypeKind::TypeUnion(members.into_iter().collect()))
    }

    pub fn record(fields: impl IntoIterator<Item = FieldType>) -> Self {
        Self::of_kind(TypeKind::RecordType(fields.into_iter().collect()))
    }

    pub fn application(base: TypeNode, args: impl IntoIterator<Item = TypeNode>) -> Self {
        Self::of_kind(TypeKind::TypeApplication {
            expression: Box::new(base),
            applications: Some(args.into_iter().collect()),
        })
    }

    pub fn function(signature: Signature) -> Self {
        Self::of_kind(TypeKind::FunctionType(signature))
    }

    /// Named parameter shape: `name:inner`.
    pub fn named(name: impl Into<String>, inner: TypeNode) -> Self {
        Self::name(name).with_inner(inner)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_inner(mut self, inner: TypeNode) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = Some(true);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = Nullability::Nullable;
        self
    }

    pub fn non_nullable(mut self) -> Self {
        self.nullable = Nullability::NonNull;
        self
    }

    pub fn repeatable(mut self) -> Self {
        self.repeatable = Some(true);
        self
    }
}

impl FieldType {
    pub fn new(key: TypeNode, value: Option<TypeNode>) -> Self {
        Self { key, value }
    }

    /// Bare key, no value: `{a}`.
    pub fn key(key: impl Into<String>) -> Self {
        Self::new(TypeNode::name(key), None)
    }

    pub fn entry(key: impl Into<String>, value: TypeNode) -> Self {
        Self::new(TypeNode::name(key), Some(value))
    }
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_new(mut self, target: TypeNode) -> Self {
        self.new = Some(Box::new(target));
        self
    }

    pub fn with_this(mut self, target: TypeNode) -> Self {
        self.this = Some(Box::new(target));
        self
    }

    pub fn param(mut self, param: TypeNode) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, result: TypeNode) -> Self {
        self.result = Some(Box::new(result));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullability_is_three_valued() {
        assert_eq!(Nullability::from(None), Nullability::Unspecified);
        assert_eq!(Nullability::from(Some(true)), Nullability::Nullable);
        assert_eq!(Nullability::from(Some(false)), Nullability::NonNull);
        assert_eq!(Option::<bool>::from(Nullability::NonNull), Some(false));
    }

    #[test]
    fn default_node_is_an_unnamed_name_expression() {
        let node = TypeNode::default();
        assert_eq!(node.kind, TypeKind::NameExpression);
        assert!(node.name.is_none());
        assert_eq!(node.nullable, Nullability::Unspecified);
    }

    #[test]
    fn signature_builder_keeps_param_order() {
        let sig = Signature::new()
            .param(TypeNode::name("a"))
            .param(TypeNode::name("b"));
        let names: Vec<_> = sig.params.iter().filter_map(|p| p.name.as_deref()).collect();
        assert_eq!(names, ["a", "b"]);
    }
}
