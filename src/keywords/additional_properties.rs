//! `additionalProperties` (and, incidentally, `patternProperties`):
//! restricts or validates whatever properties `properties` didn't already
//! claim by name and `patternProperties` didn't claim by pattern.
use crate::{
    dispatcher::process,
    error::ValidationError,
    node::{Additional, SchemaNode},
    resolver::Resolver,
    scope::Scope,
};
use regex::Regex;
use serde_json::{Map, Value};

pub fn validate(
    additional: Option<&Additional>,
    properties: Option<&Map<String, SchemaNode>>,
    pattern_properties: Option<&[(Regex, SchemaNode)]>,
    instance: &Map<String, Value>,
    scope: &Scope,
    resolver: &Resolver,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (name, value) in instance {
        let matched_by_pattern: Vec<&SchemaNode> = pattern_properties
            .into_iter()
            .flatten()
            .filter(|(regex, _)| regex.is_match(name))
            .map(|(_, subschema)| subschema)
            .collect();
        for subschema in &matched_by_pattern {
            let child_scope = scope.descend_schema("patternProperties").descend_instance(name.as_str());
            errors.extend(process(subschema, value, &child_scope, resolver));
        }

        let named = properties.is_some_and(|props| props.contains_key(name));
        if named || !matched_by_pattern.is_empty() {
            continue;
        }

        match additional {
            None | Some(Additional::Allowed) => {}
            Some(Additional::Forbidden) => {
                errors.push(ValidationError::keyword(
                    scope.instance_path().pushed(name.as_str()),
                    scope.schema_path().pushed("additionalProperties"),
                    value.clone(),
                    "additionalProperties",
                    format!("additional property '{name}' is not allowed"),
                ));
            }
            Some(Additional::Schema(subschema)) => {
                let child_scope = scope.descend_schema("additionalProperties").descend_instance(name.as_str());
                errors.extend(process(subschema, value, &child_scope, resolver));
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

    fn resolver() -> Resolver {
        Resolver::new(Arc::new(DefaultResolver), IdKeyword::DollarId, &Value::Null)
    }

    #[test]
    fn forbidden_additional_property_is_reported() {
        let schema = json!({"type": "object", "properties": {"a": true}, "additionalProperties": false});
        let node = SchemaNode::compile(&schema, IdKeyword::DollarId).unwrap();
        let SchemaNode::Object(object) = &node else { unreachable!() };
        let instance = json!({"a": 1, "b": 2});
        let Value::Object(map) = instance else { unreachable!() };
        let scope = Scope::root(Arc::new(schema.clone()));
        let errors = validate(
            object.additional_properties.as_ref(),
            object.properties.as_ref(),
            None,
            &map,
            &scope,
            &resolver(),
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn pattern_matched_property_is_not_additional() {
        let schema = json!({
            "type": "object",
            "patternProperties": {"^x-": {"type": "string"}},
            "additionalProperties": false
        });
        let node = SchemaNode::compile(&schema, IdKeyword::DollarId).unwrap();
        let SchemaNode::Object(object) = &node else { unreachable!() };
        let instance = json!({"x-custom": "value"});
        let Value::Object(map) = instance else { unreachable!() };
        let scope = Scope::root(Arc::new(schema.clone()));
        let errors = validate(
            object.additional_properties.as_ref(),
            object.properties.as_ref(),
            object.pattern_properties.as_deref(),
            &map,
            &scope,
            &resolver(),
        );
        assert!(errors.is_empty());
    }
}
