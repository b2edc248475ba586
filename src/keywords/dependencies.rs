//! `dependencies`: a property's presence can require other properties
//! (§8 "dependencies failure") or require the whole instance to satisfy a
//! sub-schema.
use crate::{
    dispatcher::process,
    error::ValidationError,
    node::Dependency,
    resolver::Resolver,
    scope::Scope,
};
use serde_json::{Map, Value};

pub fn validate(
    dependencies: &[(String, Dependency)],
    instance: &Map<String, Value>,
    scope: &Scope,
    resolver: &Resolver,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (property, dependency) in dependencies {
        if !instance.contains_key(property) {
            continue;
        }
        match dependency {
            Dependency::Required(required) => {
                for name in required {
                    if !instance.contains_key(name) {
                        errors.push(ValidationError::keyword(
                            scope.instance_path().clone(),
                            scope.schema_path().pushed("dependencies").pushed(property.as_str()),
                            Value::Object(instance.clone()),
                            "dependencies",
                            format!("'{property}' requires '{name}' to also be present"),
                        ));
                    }
                }
            }
            Dependency::Schema(subschema) => {
                let child_scope = scope.descend_schema("dependencies").descend_schema(property.as_str());
                errors.extend(process(subschema, &Value::Object(instance.clone()), &child_scope, resolver));
            }
        }
    }
    errors
}
