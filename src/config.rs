//! Renderer options: the user-facing option bag and its normalized form.
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::OptionsError;

// ————————————————————————————————————————————————————————————————————————————
// LINK TABLES
// ————————————————————————————————————————————————————————————————————————————

/// Name → URL lookup. Exact string match only.
pub trait LinkLookup: fmt::Debug + Send + Sync {
    fn href(&self, name: &str) -> Option<&str>;
}

impl LinkLookup for HashMap<String, String> {
    fn href(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl LinkLookup for BTreeMap<String, String> {
    fn href(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl LinkLookup for IndexMap<String, String> {
    fn href(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Plain JSON object; entries whose value is not a string are ignored.
impl LinkLookup for serde_json::Map<String, Value> {
    fn href(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// OPTIONS
// ————————————————————————————————————————————————————————————————————————————

/// Option bag as callers spell it (`{"links": {...}, "htmlSafe": true}`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub links: Option<serde_json::Map<String, Value>>,
    pub link_class: Option<String>,
    /// Deprecated spelling of `link_class`.
    pub css_class: Option<String>,
    pub html_safe: bool,
    pub suppress_modifiers: bool,
}

impl Options {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        crate::path_de::from_slice_with_path(&bytes).map_err(|source| OptionsError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn into_config(self) -> RenderConfig {
        let mut builder = RenderConfig::builder()
            .html_safe(self.html_safe)
            .suppress_modifiers(self.suppress_modifiers);
        if let Some(links) = self.links {
            builder = builder.links(links);
        }
        // the alias only counts when the primary name is unset
        if let Some(class) = non_empty(self.link_class).or_else(|| non_empty(self.css_class)) {
            builder = builder.link_class(class);
        }
        builder.build()
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

// ————————————————————————————————————————————————————————————————————————————
// NORMALIZED CONFIG
// ————————————————————————————————————————————————————————————————————————————

/// Immutable renderer configuration. Cheap to clone; the link table is shared.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    links: Option<Arc<dyn LinkLookup>>,
    link_class: Option<String>,
    html_safe: bool,
    suppress_modifiers: bool,
}

impl RenderConfig {
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    /// URL for `name`. Empty URLs count as no link.
    pub fn href(&self, name: &str) -> Option<&str> {
        self.links
            .as_deref()
            .and_then(|links| links.href(name))
            .filter(|href| !href.is_empty())
    }

    pub fn link_class(&self) -> Option<&str> {
        self.link_class.as_deref()
    }

    pub fn html_safe(&self) -> bool {
        self.html_safe
    }

    pub fn suppress_modifiers(&self) -> bool {
        self.suppress_modifiers
    }

    /// Same configuration with modifier decoration turned off.
    pub fn without_modifiers(&self) -> Self {
        Self { suppress_modifiers: true, ..self.clone() }
    }
}

#[derive(Debug, Default)]
pub struct RenderConfigBuilder {
    inner: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn links(mut self, table: impl LinkLookup + 'static) -> Self {
        self.inner.links = Some(Arc::new(table));
        self
    }

    pub fn link_class(mut self, class: impl Into<String>) -> Self {
        self.inner.link_class = non_empty(Some(class.into()));
        self
    }

    pub fn html_safe(mut self, on: bool) -> Self {
        self.inner.html_safe = on;
        self
    }

    pub fn suppress_modifiers(mut self, on: bool) -> Self {
        self.inner.suppress_modifiers = on;
        self
    }

    pub fn build(self) -> RenderConfig {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn css_class_is_a_fallback_for_link_class() {
        let opts: Options = serde_json::from_value(json!({"cssClass": "old"})).unwrap();
        assert_eq!(opts.into_config().link_class(), Some("old"));

        let opts: Options = serde_json::from_value(json!({"cssClass": "old", "linkClass": "new"})).unwrap();
        assert_eq!(opts.into_config().link_class(), Some("new"));

        let opts: Options = serde_json::from_value(json!({"cssClass": "old", "linkClass": ""})).unwrap();
        assert_eq!(opts.into_config().link_class(), Some("old"));
    }

    #[test]
    fn defaults_are_off() {
        let config = Options::default().into_config();
        assert!(!config.html_safe());
        assert!(!config.suppress_modifiers());
        assert_eq!(config.link_class(), None);
        assert_eq!(config.href("anything"), None);
    }

    #[test]
    fn object_and_map_tables_resolve_the_same() {
        let object: Options = serde_json::from_value(json!({"links": {"goog.ui.Menu": "MyClass.html", "bad": 3}})).unwrap();
        let object = object.into_config();

        let mut map = HashMap::new();
        map.insert("goog.ui.Menu".to_string(), "MyClass.html".to_string());
        let map = RenderConfig::builder().links(map).build();

        for config in [&object, &map] {
            assert_eq!(config.href("goog.ui.Menu"), Some("MyClass.html"));
            assert_eq!(config.href("goog.ui"), None);
            assert_eq!(config.href("bad"), None);
        }
    }

    #[test]
    fn empty_href_is_not_a_link() {
        let mut table = BTreeMap::new();
        table.insert("Foo".to_string(), String::new());
        let config = RenderConfig::builder().links(table).build();
        assert_eq!(config.href("Foo"), None);
    }

    #[test]
    fn without_modifiers_keeps_everything_else() {
        let config = RenderConfig::builder().html_safe(true).link_class("x").build();
        let quiet = config.without_modifiers();
        assert!(quiet.suppress_modifiers());
        assert!(quiet.html_safe());
        assert_eq!(quiet.link_class(), Some("x"));
    }
}
