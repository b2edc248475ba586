//! `properties`: each named sub-schema validates the instance value under
//! the matching property, when that property is present (§8 "recursive
//! $ref tree" and "$id-as-property-name" both exercise this).
use crate::{dispatcher::process, error::ValidationError, node::SchemaNode, resolver::Resolver, scope::Scope};
use serde_json::{Map, Value};

pub fn validate(
    properties: &Map<String, SchemaNode>,
    instance: &Map<String, Value>,
    scope: &Scope,
    resolver: &Resolver,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (name, subschema) in properties {
        if let Some(value) = instance.get(name) {
            let child_scope = scope
                .descend_schema("properties")
                .descend_schema(name.as_str())
                .descend_instance(name.as_str());
            errors.extend(process(subschema, value, &child_scope, resolver));
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
    fn id_used_as_a_plain_property_name_does_not_refine_scope() {
        // A property literally named "id" must be compiled and validated
        // like any other property, never mistaken for a scope-refining
        // `id` keyword on the enclosing schema.
        let schema = json!({
            "type": "object",
            "properties": {"id": {"type": "string"}}
        });
        let node = SchemaNode::compile(&schema, IdKeyword::DollarId).unwrap();
        let SchemaNode::Object(object) = &node else { unreachable!() };
        assert!(object.id.is_none());
        let resolver = Resolver::new(Arc::new(DefaultResolver), IdKeyword::DollarId, &Value::Null);
        let scope = Scope::root(Arc::new(schema.clone()));
        let instance = json!({"id": 42});
        let Value::Object(map) = instance else { unreachable!() };
        let errors = validate(object.properties.as_ref().unwrap(), &map, &scope, &resolver);
        assert_eq!(errors.len(), 1);
    }
}
