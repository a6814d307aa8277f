//! Render parsed Closure/JSDoc type-expression trees back to text.
//!
//! ```
//! use jsdoc_type_render::{Renderer, Signature, TypeNode};
//!
//! let f = TypeNode::function(
//!     Signature::new()
//!         .with_this(TypeNode::name("goog.ui.Menu"))
//!         .param(TypeNode::name("string")),
//! );
//! assert_eq!(Renderer::default().stringify(&f), "function(this:goog.ui.Menu, string)");
//! ```
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod jq_exec;
pub mod lower;
pub mod path_de;
pub mod render;

pub use config::{LinkLookup, Options, RenderConfig, RenderConfigBuilder};
pub use error::{DecodeError, OptionsError};
pub use ir::{FieldType, Nullability, Signature, TypeKind, TypeNode};
pub use render::{combine_name_and_type, stringify, Renderer};
