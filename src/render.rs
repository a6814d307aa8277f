//! Type tree → canonical Closure/JSDoc type-expression text.
//!
//! Rendering is a pure function of the node and the [`RenderConfig`]: the
//! renderer holds no per-call state, so one instance can be shared across
//! threads.
//!
//! Output forms:
//! - union `(A|B)`, record `{a, b: T}`, application `Base<A, B>`
//! - function `function(new:T, this:U, p1, p2): R`
//! - modifiers `...` (repeatable) `?`/`!` (nullable) `=` (optional)
use std::fmt;

use crate::config::{Options, RenderConfig};
use crate::ir::{FieldType, Nullability, Signature, TypeKind, TypeNode};

/// `name:type`, with the colon only when both sides are non-empty.
pub fn combine_name_and_type(name: &str, ty: &str) -> String {
    let separator = if !name.is_empty() && !ty.is_empty() { ":" } else { "" };
    format!("{name}{separator}{ty}")
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render-or-empty: an absent node contributes `""`.
    pub fn render(&self, node: Option<&TypeNode>) -> String {
        node.map(|n| self.stringify(n)).unwrap_or_default()
    }

    pub fn stringify(&self, node: &TypeNode) -> String {
        let body = match &node.kind {
            TypeKind::AllLiteral => self.format_name_and_type(node, Some("*")),
            TypeKind::NullLiteral => self.format_name_and_type(node, Some("null")),
            TypeKind::UndefinedLiteral => self.format_name_and_type(node, Some("undefined")),
            TypeKind::UnknownLiteral => self.format_name_and_type(node, Some("?")),
            TypeKind::NameExpression => self.format_name_and_type(node, None),
            TypeKind::TypeUnion(members) => self.elements(members),
            TypeKind::RecordType(fields) => self.record(fields),
            TypeKind::TypeApplication { expression, applications } => {
                let mut out = self.stringify(expression);
                out.push_str(&self.applications(applications.as_deref()));
                out
            }
            TypeKind::FunctionType(signature) => self.signature(signature),
            TypeKind::Other(tag) => {
                log::debug!("unrecognized type tag {tag:?}; rendering as a name expression");
                self.format_name_and_type(node, None)
            }
        };

        if self.config.suppress_modifiers() {
            body
        } else {
            self.add_modifiers(node, &body)
        }
    }

    // ————————————————————————————————————————————————————————————————————————
    // GRAMMAR PIECES
    // ————————————————————————————————————————————————————————————————————————

    /// `<A, B>`; absent arguments render as nothing at all.
    pub fn applications(&self, applications: Option<&[TypeNode]>) -> String {
        let Some(applications) = applications else {
            return String::new();
        };
        let inner = self.join(applications, ", ");
        if self.config.html_safe() {
            format!("&lt;{inner}&gt;")
        } else {
            format!("<{inner}>")
        }
    }

    /// `(A|B|C)`; no members renders as nothing.
    pub fn elements(&self, members: &[TypeNode]) -> String {
        if members.is_empty() {
            return String::new();
        }
        format!("({})", self.join(members, "|"))
    }

    pub fn key(&self, key: &TypeNode) -> String {
        self.stringify(key)
    }

    pub fn new_role(&self, target: Option<&TypeNode>) -> String {
        self.render_prefixed("new:", target)
    }

    pub fn this_role(&self, target: Option<&TypeNode>) -> String {
        self.render_prefixed("this:", target)
    }

    pub fn params(&self, params: &[TypeNode]) -> String {
        self.join(params, ", ")
    }

    pub fn result(&self, result: Option<&TypeNode>) -> String {
        self.render_prefixed(": ", result)
    }

    pub fn nullable(&self, nullable: Nullability) -> &'static str {
        match nullable {
            Nullability::Nullable => "?",
            Nullability::NonNull => "!",
            Nullability::Unspecified => "",
        }
    }

    pub fn optional(&self, optional: Option<bool>) -> &'static str {
        if optional == Some(true) { "=" } else { "" }
    }

    /// Repeatable prefix, nullable symbol, body, optional suffix. In that order.
    pub fn add_modifiers(&self, node: &TypeNode, body: &str) -> String {
        let repeatable = if node.repeatable == Some(true) { "..." } else { "" };
        format!(
            "{repeatable}{}{}{}",
            self.nullable(node.nullable),
            combine_name_and_type("", body),
            self.optional(node.optional),
        )
    }

    /// Wraps `name` in an anchor when the link table knows it.
    pub fn add_links(&self, name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }
        let Some(href) = self.config.href(name) else {
            return name.to_string();
        };
        log::trace!("linking {name:?} to {href:?}");
        match self.config.link_class() {
            Some(class) => format!(r#"<a href="{href}" class="{class}">{name}</a>"#),
            None => format!(r#"<a href="{href}">{name}</a>"#),
        }
    }

    /// Leaf rule: the node's name (or the literal spelling) joined to its payload.
    pub fn format_name_and_type(&self, node: &TypeNode, literal: Option<&str>) -> String {
        let name = node
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(literal)
            .unwrap_or_default();
        let payload = self.render(node.inner.as_deref());
        combine_name_and_type(&self.add_links(name), &payload)
    }

    // ————————————————————————————————————————————————————————————————————————
    // COMPOSITES
    // ————————————————————————————————————————————————————————————————————————

    fn record(&self, fields: &[FieldType]) -> String {
        let fields = fields
            .iter()
            .map(|field| {
                let mut entry = self.key(&field.key);
                entry.push_str(&self.render_prefixed(": ", field.value.as_ref()));
                entry
            })
            .collect::<Vec<_>>();
        format!("{{{}}}", fields.join(", "))
    }

    fn signature(&self, signature: &Signature) -> String {
        // fixed order inside the parens; empty roles leave no separator behind
        let roles = [
            self.new_role(signature.new.as_deref()),
            self.this_role(signature.this.as_deref()),
            self.params(&signature.params),
        ];
        let roles = roles.into_iter().filter(|r| !r.is_empty()).collect::<Vec<_>>();
        format!(
            "function({}){}",
            roles.join(", "),
            self.result(signature.result.as_deref())
        )
    }

    /// `prefix` + rendered child when the child is present, else nothing.
    /// A present child keeps its prefix even if it renders empty (`new:`).
    fn render_prefixed(&self, prefix: &str, node: Option<&TypeNode>) -> String {
        if node.is_none() {
            return String::new();
        }
        format!("{prefix}{}", self.render(node))
    }

    fn join(&self, nodes: &[TypeNode], separator: &str) -> String {
        nodes
            .iter()
            .map(|n| self.stringify(n))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// One-shot rendering with a caller-supplied option bag.
pub fn stringify(node: &TypeNode, options: &Options) -> String {
    Renderer::new(options.clone().into_config()).stringify(node)
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Renderer::default().stringify(self))
    }
}
