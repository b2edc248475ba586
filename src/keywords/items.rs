//! `items`, in both its shapes: a single schema every array element must
//! satisfy, or (for a tuple-typed node) a positional list of schemas plus
//! `additionalItems` for anything past the end of that list.
use crate::{dispatcher::process, error::ValidationError, node::{Additional, SchemaNode}, resolver::Resolver, scope::Scope};
use serde_json::Value;

pub fn validate_array(item_schema: &SchemaNode, instance: &[Value], scope: &Scope, resolver: &Resolver) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (index, value) in instance.iter().enumerate() {
        let child_scope = scope.descend_schema("items").descend_instance(index);
        errors.extend(process(item_schema, value, &child_scope, resolver));
    }
    errors
}

pub fn validate_tuple(
    items: &[SchemaNode],
    additional: Option<&Additional>,
    instance: &[Value],
    scope: &Scope,
    resolver: &Resolver,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (index, value) in instance.iter().enumerate() {
        if let Some(subschema) = items.get(index) {
            let child_scope = scope.descend_schema("items").descend_schema(index).descend_instance(index);
            errors.extend(process(subschema, value, &child_scope, resolver));
        } else {
            match additional {
                None | Some(Additional::Allowed) => {}
                Some(Additional::Forbidden) => {
                    errors.push(ValidationError::keyword(
                        scope.instance_path().pushed(index),
                        scope.schema_path().pushed("additionalItems"),
                        value.clone(),
                        "additionalItems",
                        format!("unexpected item at index {index}"),
                    ));
                }
                Some(Additional::Schema(subschema)) => {
                    let child_scope = scope.descend_schema("additionalItems").descend_instance(index);
                    errors.extend(process(subschema, value, &child_scope, resolver));
                }
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{node::IdKeyword, resolver::DefaultResolver};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn array_items_validate_every_element() {
        let schema = json!({"type": "array", "items": {"type": "integer"}});
        let node = SchemaNode::compile(&schema, IdKeyword::DollarId).unwrap();
        let SchemaNode::Array(array) = &node else { unreachable!() };
        let resolver = Resolver::new(Arc::new(DefaultResolver), IdKeyword::DollarId, &Value::Null);
        let scope = Scope::root(Arc::new(schema.clone()));
        let instance = json!([1, "two", 3]);
        let Value::Array(items) = instance else { unreachable!() };
        let errors = validate_array(array.items.as_ref().unwrap(), &items, &scope, &resolver);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn tuple_forbids_items_past_declared_positions() {
        let schema = json!({"items": [{"type": "integer"}], "additionalItems": false});
        let node = SchemaNode::compile(&schema, IdKeyword::DollarId).unwrap();
        let SchemaNode::Tuple(tuple) = &node else { unreachable!() };
        let resolver = Resolver::new(Arc::new(DefaultResolver), IdKeyword::DollarId, &Value::Null);
        let scope = Scope::root(Arc::new(schema.clone()));
        let instance = json!([1, 2]);
        let Value::Array(items) = instance else { unreachable!() };
        let errors = validate_tuple(&tuple.items, tuple.additional_items.as_ref(), &items, &scope, &resolver);
        assert_eq!(errors.len(), 1);
    }
}
