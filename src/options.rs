//! The configuration surface (ambient stack, SPEC_FULL): lets a caller
//! install a custom `SchemaResolver` (§6's scheme handler registry) and
//! pick which keyword spells a scope-refining identifier. Mirrors
//! `jsonschema::compilation::options::CompilationOptions`, trimmed to the
//! two knobs this core actually has.
use crate::{
    node::IdKeyword,
    resolver::{DefaultResolver, Resolver, SchemaResolver},
};
use serde_json::Value;
use std::sync::Arc;

/// Builds a `Resolver` with whatever scheme handler and `id` dialect a
/// caller wants, defaulting to the same choices `SchemaNode::compile` and
/// `Resolver::new` would make on their own.
#[derive(Clone)]
pub struct ValidationOptions {
    resolver: Arc<dyn SchemaResolver>,
    id_keyword: IdKeyword,
}

impl std::fmt::Debug for ValidationOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationOptions")
            .field("id_keyword", &self.id_keyword)
            .finish_non_exhaustive()
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            resolver: Arc::new(DefaultResolver),
            id_keyword: IdKeyword::DollarId,
        }
    }
}

impl ValidationOptions {
    #[must_use]
    pub fn new() -> Self {
        ValidationOptions::default()
    }

    /// Install a resolver for fetching external (absolute-URI) references,
    /// replacing the default HTTP/file opener (§6).
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl SchemaResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Honor `id` instead of `$id` as the scope-refining keyword (draft-4
    /// schemas use the former; draft-6 and later use the latter).
    #[must_use]
    pub fn with_id_keyword(mut self, id_keyword: IdKeyword) -> Self {
        self.id_keyword = id_keyword;
        self
    }

    #[must_use]
    pub fn id_keyword(&self) -> IdKeyword {
        self.id_keyword
    }

    pub(crate) fn build_resolver(&self, root_document: &Value) -> Resolver {
        Resolver::new(Arc::clone(&self.resolver), self.id_keyword, root_document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dialect_is_dollar_id() {
        assert_eq!(ValidationOptions::new().id_keyword(), IdKeyword::DollarId);
    }

    #[test]
    fn with_id_keyword_overrides_the_dialect() {
        let options = ValidationOptions::new().with_id_keyword(IdKeyword::Id);
        assert_eq!(options.id_keyword(), IdKeyword::Id);
    }
}
