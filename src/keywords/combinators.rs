//! `anyOf` / `allOf` / `oneOf` / `not`: the four combinators, collapsed
//! onto a single `Combinator` field because a schema using more than one
//! of them is rare in practice and the data model only needs to carry the
//! representative case (§ SPEC_FULL "Supplemented features").
//!
//! Combinators aggregate their branches' errors rather than aborting on
//! the first failing branch (§7): a caller sees every branch's complaint
//! when none of them accept the instance.
use crate::{dispatcher::process, error::ValidationError, node::{Combinator, SchemaNode}, resolver::Resolver, scope::Scope};
use serde_json::Value;

pub fn validate(
    combinator: Combinator,
    branches: &[SchemaNode],
    instance: &Value,
    scope: &Scope,
    resolver: &Resolver,
) -> Vec<ValidationError> {
    match combinator {
        Combinator::AllOf => branches
            .iter()
            .enumerate()
            .flat_map(|(index, branch)| process(branch, instance, &scope.descend_schema("allOf").descend_schema(index), resolver))
            .collect(),
        Combinator::AnyOf => {
            let per_branch: Vec<Vec<ValidationError>> = branches
                .iter()
                .enumerate()
                .map(|(index, branch)| process(branch, instance, &scope.descend_schema("anyOf").descend_schema(index), resolver))
                .collect();
            if per_branch.iter().any(Vec::is_empty) {
                Vec::new()
            } else {
                per_branch.into_iter().flatten().collect()
            }
        }
        Combinator::OneOf => {
            let per_branch: Vec<Vec<ValidationError>> = branches
                .iter()
                .enumerate()
                .map(|(index, branch)| process(branch, instance, &scope.descend_schema("oneOf").descend_schema(index), resolver))
                .collect();
            let matching = per_branch.iter().filter(|errors| errors.is_empty()).count();
            if matching == 1 {
                Vec::new()
            } else if matching == 0 {
                per_branch.into_iter().flatten().collect()
            } else {
                vec![ValidationError::keyword(
                    scope.instance_path().clone(),
                    scope.schema_path().pushed("oneOf"),
                    instance.clone(),
                    "oneOf",
                    format!("{matching} subschemas matched, expected exactly one"),
                )]
            }
        }
        Combinator::Not => {
            let inner = &branches[0];
            let inner_errors = process(inner, instance, &scope.descend_schema("not"), resolver);
            if inner_errors.is_empty() {
                vec![ValidationError::keyword(
                    scope.instance_path().clone(),
                    scope.schema_path().pushed("not"),
                    instance.clone(),
                    "not",
                    "instance must not match the given subschema",
                )]
            } else {
                Vec::new()
            }
        }
    }
}
