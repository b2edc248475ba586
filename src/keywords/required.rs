//! `required`: every listed property name must be present on an object
//! instance (§4.4, §8 "required-many-properties"). Non-object instances
//! trivially satisfy it - the dispatcher only calls this once it already
//! knows the instance is an object.
use crate::{error::ValidationError, scope::Scope};
use serde_json::{Map, Value};

pub fn validate(required: &[String], instance: &Map<String, Value>, scope: &Scope) -> Vec<ValidationError> {
    required
        .iter()
        .filter(|name| !instance.contains_key(name.as_str()))
        .map(|name| {
            ValidationError::keyword(
                scope.instance_path().clone(),
                scope.schema_path().pushed("required"),
                Value::Object(instance.clone()),
                "required",
                format!("'{name}' is a required property"),
            )
        })
        .collect()
}
