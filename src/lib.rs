//! # jsonschema-core
//!
//! Reference resolution and recursive validation dispatch for a JSON
//! Schema validator: compiles a schema document into a `SchemaNode` tree,
//! resolves the `$ref`s in it on demand while validating, and reports
//! every violation found rather than stopping at the first one.
//!
//! ## Usage
//! ```rust
//! # use jsonschema_core::CompiledSchema;
//! # use serde_json::json;
//! let schema = json!({"type": "object", "required": ["name"]});
//! let compiled = CompiledSchema::compile(&schema).unwrap();
//! assert!(compiled.validate(&json!({"name": "a"})).is_ok());
//! assert!(compiled.validate(&json!({})).is_err());
//! ```
#![warn(
    clippy::doc_markdown,
    clippy::needless_pass_by_value,
    clippy::redundant_closure,
    clippy::trivially_copy_pass_by_ref,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]
pub mod cache;
pub mod dispatcher;
pub mod error;
pub mod fragment;
mod keywords;
pub mod node;
pub mod options;
pub mod paths;
pub mod primitive_type;
pub mod resolver;
pub mod scope;
pub mod uri;

pub use error::{CompilationError, DecodeError, Error, ValidationError, ValidationErrors};
pub use node::{IdKeyword, SchemaNode};
pub use options::ValidationOptions;
pub use resolver::{SchemaResolver, SchemaResolverError};

use scope::Scope;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// A schema compiled into a `SchemaNode` tree, ready to validate
/// instances against. Keeps the raw document around too, since a `$ref`
/// landing back in this document (`#/...`, or a remote document whose own
/// `$ref` eventually points at `#` again, §8 "root ref in ref in remote
/// ref") needs it for pointer traversal.
pub struct CompiledSchema {
    node: SchemaNode,
    document: Arc<Value>,
    options: ValidationOptions,
}

impl std::fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledSchema").field("node", &self.node).finish_non_exhaustive()
    }
}

impl CompiledSchema {
    /// Compile `schema` with default options (`$id`-dialect scope
    /// refinement, the default HTTP/file resolver).
    pub fn compile(schema: &Value) -> Result<Self, CompilationError> {
        CompiledSchema::compile_with(schema, ValidationOptions::default())
    }

    /// Compile `schema` with caller-chosen options (§6 external
    /// interfaces: a custom `SchemaResolver`, or the `id` dialect).
    pub fn compile_with(schema: &Value, options: ValidationOptions) -> Result<Self, CompilationError> {
        let node = SchemaNode::compile(schema, options.id_keyword())?;
        Ok(CompiledSchema {
            node,
            document: Arc::new(schema.clone()),
            options,
        })
    }

    /// Entry point 1: validate a raw instance, returning every violation
    /// found rather than stopping at the first one (§4.7, §7).
    pub fn validate(&self, instance: &Value) -> Result<(), ValidationErrors> {
        let resolver = self.options.build_resolver(&self.document);
        let scope = Scope::root(Arc::clone(&self.document));
        let errors = dispatcher::process(&self.node, instance, &scope, &resolver);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    #[must_use]
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validate(instance).is_ok()
    }

    /// Entry point 2: validate a raw instance, then decode it into `T`.
    /// Only reachable once validation has already succeeded, so a
    /// `Decode` error here means the schema under-constrains what it
    /// claims to describe, not that the instance itself is invalid.
    pub fn validate_into<T: DeserializeOwned>(&self, instance: Value) -> Result<T, Error> {
        self.validate(&instance)?;
        serde_json::from_value(instance).map_err(|error| {
            Error::Decode(error::DecodeError {
                path: paths::Path::new(),
                message: error.to_string(),
            })
        })
    }

    /// Entry point 3: encode `value` to a raw instance and validate the
    /// result, returning the raw `Value` on success (e.g. to hand to a
    /// serializer that expects `serde_json::Value`).
    pub fn validate_typed<T: Serialize>(&self, value: &T) -> Result<Value, Error> {
        let instance = serde_json::to_value(value).map_err(|error| {
            Error::Decode(error::DecodeError {
                path: paths::Path::new(),
                message: error.to_string(),
            })
        })?;
        self.validate(&instance)?;
        Ok(instance)
    }

    /// Entry point 4: the round trip of 2 and 3 - encode `T`, validate,
    /// decode back into `T`. Useful for asserting that a value survives a
    /// schema unchanged (e.g. in property-based tests).
    pub fn validate_round_trip<T: Serialize + DeserializeOwned>(&self, value: &T) -> Result<T, Error> {
        let instance = self.validate_typed(value)?;
        serde_json::from_value(instance).map_err(|error| {
            Error::Decode(error::DecodeError {
                path: paths::Path::new(),
                message: error.to_string(),
            })
        })
    }
}

/// A shortcut for validating `instance` against `schema` in one call.
/// Draft dialect is the default (`$id`). Panics if `schema` does not
/// compile.
#[must_use]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    let compiled = CompiledSchema::compile(schema).expect("invalid schema");
    compiled.is_valid(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    fn point_schema() -> Value {
        json!({
            "type": "object",
            "required": ["x", "y"],
            "properties": {"x": {"type": "integer"}, "y": {"type": "integer"}}
        })
    }

    #[test]
    fn raw_to_raw_entry_point() {
        let compiled = CompiledSchema::compile(&point_schema()).unwrap();
        assert!(compiled.validate(&json!({"x": 1, "y": 2})).is_ok());
        assert!(compiled.validate(&json!({"x": 1})).is_err());
    }

    #[test]
    fn raw_to_typed_entry_point() {
        let compiled = CompiledSchema::compile(&point_schema()).unwrap();
        let point: Point = compiled.validate_into(json!({"x": 1, "y": 2})).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn typed_to_raw_entry_point() {
        let compiled = CompiledSchema::compile(&point_schema()).unwrap();
        let instance = compiled.validate_typed(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(instance, json!({"x": 1, "y": 2}));
    }

    #[test]
    fn round_trip_entry_point() {
        let compiled = CompiledSchema::compile(&point_schema()).unwrap();
        let point = compiled.validate_round_trip(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn is_valid_shortcut() {
        assert!(is_valid(&json!({"type": "string"}), &json!("hi")));
        assert!(!is_valid(&json!({"type": "string"}), &json!(1)));
    }
}
