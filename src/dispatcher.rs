//! Validation dispatcher (§4.6): `process` recursively matches an
//! instance against a compiled `SchemaNode`, switching on the pair of
//! (instance kind, schema kind) the way the dispatch table describes.
//!
//! The "key subtlety" the table calls out for Object applies uniformly to
//! every kind here, not just Object: a node's own `declared_type` field is
//! what decides whether a kind mismatch is an error (the schema said
//! `"type": "..."`) or simply means none of this node's keywords apply
//! (the schema only happens to carry keywords representative of one
//! kind - e.g. `pattern` alone infers `String` but never requires it).
use crate::{
    error::{ValidationError, ValidationErrors},
    keywords::{additional_properties, combinators, dependencies, items, pattern, properties, required},
    node::{ArrayNode, LeafNode, ObjectNode, SchemaNode, StringNode, TupleNode},
    primitive_type::PrimitiveType,
    resolver::Resolver,
    scope::Scope,
};
use serde_json::Value;

/// Validate `instance` against `node` at `scope`, resolving any `$ref`
/// before running the keywords of the node it points to (Ordering
/// Guarantee: `$ref` expansion happens before any sibling keyword would
/// run - moot here since the data model never lets a `Ref` node carry
/// sibling keywords, but the ordering still matters for the chain of
/// `$ref`s a `Ref` can point through).
pub fn process(node: &SchemaNode, instance: &Value, scope: &Scope, resolver: &Resolver) -> ValidationErrors {
    let scope = &scope.refined_by_id(node.id());
    match node {
        SchemaNode::Always => Vec::new(),
        SchemaNode::Never => vec![ValidationError::keyword(
            scope.instance_path().clone(),
            scope.schema_path().clone(),
            instance.clone(),
            "false",
            "the schema rejects every instance",
        )],
        SchemaNode::Ref(reference) => match resolver.resolve(&reference.reference, scope) {
            // Resolution failures abort the branch as a single error rather
            // than accumulating alongside keyword violations (§7).
            Err(error) => vec![error],
            Ok((resolved, next_scope)) => process(&resolved, instance, &next_scope, resolver),
        },
        SchemaNode::Compound(compound) => {
            combinators::validate(compound.combinator, &compound.branches, instance, scope, resolver)
        }
        SchemaNode::Object(object) => process_object(object, instance, scope, resolver),
        SchemaNode::Array(array) => process_array(array, instance, scope, resolver),
        SchemaNode::Tuple(tuple) => process_tuple(tuple, instance, scope, resolver),
        SchemaNode::String(string) => process_string(string, instance, scope),
        SchemaNode::Number(leaf) => process_leaf(leaf, PrimitiveType::Number, instance, scope),
        SchemaNode::Integer(leaf) => process_leaf(leaf, PrimitiveType::Integer, instance, scope),
        SchemaNode::Boolean(leaf) => process_leaf(leaf, PrimitiveType::Boolean, instance, scope),
        SchemaNode::Null(leaf) => process_leaf(leaf, PrimitiveType::Null, instance, scope),
    }
}

fn process_object(object: &ObjectNode, instance: &Value, scope: &Scope, resolver: &Resolver) -> ValidationErrors {
    let Value::Object(map) = instance else {
        return wrong_kind_or_pass(object.declared_type, PrimitiveType::Object, instance, scope);
    };
    let mut errors = Vec::new();
    if let Some(req) = &object.required {
        errors.extend(required::validate(req, map, scope));
    }
    if let Some(deps) = &object.dependencies {
        errors.extend(dependencies::validate(deps, map, scope, resolver));
    }
    if let Some(props) = &object.properties {
        errors.extend(properties::validate(props, map, scope, resolver));
    }
    if object.additional_properties.is_some() || object.pattern_properties.is_some() {
        errors.extend(additional_properties::validate(
            object.additional_properties.as_ref(),
            object.properties.as_ref(),
            object.pattern_properties.as_deref(),
            map,
            scope,
            resolver,
        ));
    }
    errors
}

fn process_array(array: &ArrayNode, instance: &Value, scope: &Scope, resolver: &Resolver) -> ValidationErrors {
    let Value::Array(items) = instance else {
        return wrong_kind_or_pass(array.declared_type, PrimitiveType::Array, instance, scope);
    };
    match &array.items {
        Some(item_schema) => items::validate_array(item_schema, items, scope, resolver),
        None => Vec::new(),
    }
}

fn process_tuple(tuple: &TupleNode, instance: &Value, scope: &Scope, resolver: &Resolver) -> ValidationErrors {
    let Value::Array(values) = instance else {
        return wrong_kind_or_pass(tuple.declared_type, PrimitiveType::Array, instance, scope);
    };
    items::validate_tuple(&tuple.items, tuple.additional_items.as_ref(), values, scope, resolver)
}

fn process_string(string: &StringNode, instance: &Value, scope: &Scope) -> ValidationErrors {
    let Value::String(value) = instance else {
        return wrong_kind_or_pass(string.declared_type, PrimitiveType::String, instance, scope);
    };
    match &string.pattern {
        Some(regex) => pattern::validate(regex, value, scope),
        None => Vec::new(),
    }
}

fn process_leaf(leaf: &LeafNode, expected: PrimitiveType, instance: &Value, scope: &Scope) -> ValidationErrors {
    let actual = PrimitiveType::of_instance(instance);
    let matches = actual == expected || (expected == PrimitiveType::Number && actual == PrimitiveType::Integer);
    if matches {
        Vec::new()
    } else {
        wrong_kind_or_pass(leaf.declared_type, expected, instance, scope)
    }
}

/// The generalized "key subtlety": a declared type mismatch is always an
/// error; an inferred (undeclared) one just means this node's keywords
/// don't apply to an instance of the kind it turned out to be (§4.6 row 1
/// vs row 2, applied to every kind rather than only Object).
fn wrong_kind_or_pass(declared_type: bool, expected: PrimitiveType, instance: &Value, scope: &Scope) -> ValidationErrors {
    if declared_type {
        vec![ValidationError::wrong_type(
            scope.instance_path().clone(),
            scope.schema_path().clone(),
            instance.clone(),
            expected,
        )]
    } else {
        Vec::new()
    }
}
