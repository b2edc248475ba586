//! `pattern`: a string instance must match a regular expression (§8
//! "pattern-error escaping" exercises the message carrying the original,
//! unescaped pattern text so callers can surface it verbatim).
use crate::{error::ValidationError, scope::Scope};
use regex::Regex;
use serde_json::Value;

pub fn validate(pattern: &Regex, instance: &str, scope: &Scope) -> Vec<ValidationError> {
    if pattern.is_match(instance) {
        Vec::new()
    } else {
        vec![ValidationError::keyword(
            scope.instance_path().clone(),
            scope.schema_path().pushed("pattern"),
            Value::String(instance.to_string()),
            "pattern",
            format!("'{instance}' does not match '{pattern}'", pattern = pattern.as_str()),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use test_case::test_case;

    #[test]
    fn rejects_non_matching_string() {
        let pattern = Regex::new("^abc$").unwrap();
        let errors = validate(&pattern, "xyz", &Scope::root(Arc::new(json!({}))));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("xyz"));
    }

    #[test]
    fn accepts_matching_string() {
        let pattern = Regex::new("^abc$").unwrap();
        let errors = validate(&pattern, "abc", &Scope::root(Arc::new(json!({}))));
        assert!(errors.is_empty());
    }

    #[test_case(r"^[\w\-\.\+]+$", "CC-BY-4.0", true)]
    #[test_case(r"^[\w\-\.\+]+$", "CC-BY-!", false)]
    #[test_case(r"^\W+$", "1_0", false)]
    fn regex_matches(pattern: &str, text: &str, is_matching: bool) {
        let compiled = Regex::new(pattern).unwrap();
        let errors = validate(&compiled, text, &Scope::root(Arc::new(json!({}))));
        assert_eq!(errors.is_empty(), is_matching);
    }
}
