//! The `Scope` value type (§3): everything the resolver and dispatcher
//! thread through a recursive `process`/`resolve` call. A `Scope` is never
//! mutated in place - every method that "changes" one returns a new value,
//! which is how the core restores a caller's scope on return without any
//! explicit push/pop bookkeeping (mirrors `jsonschema::compilation::context::CompilationContext`,
//! generalized to also carry the cycle-detection set from `resolver.rs`).
use crate::paths::{Path, PathChunk};
use serde_json::Value;
use std::{collections::HashSet, sync::Arc};

/// Everything needed to resolve a `$ref` or report an error at the current
/// position in a schema/instance pair.
///
/// `document_root` holds the *raw* document a `$ref` pointer is resolved
/// against, not a compiled `SchemaNode` - a pointer such as
/// `#/definitions/node` targets a position with no keywords of its own, so
/// resolution has to walk the original JSON and only compile the node the
/// pointer actually lands on (§4.2, §4.5).
#[derive(Clone, Debug)]
pub struct Scope {
    document_root: Arc<Value>,
    /// The base URI against which a relative `$ref` in the current position
    /// is resolved; refined by any `id`/`$id` seen on the way down.
    base_uri: Option<String>,
    schema_path: Path,
    instance_path: Path,
    /// Reference strings already followed on the current branch, reset at
    /// the top of every top-level `validate` call. Prevents infinite loops
    /// on cyclic `$ref` graphs (§4.5 "cycle policy").
    visited: Arc<HashSet<String>>,
}

impl Scope {
    /// The scope a top-level `validate` call starts with: the schema's own
    /// root, no base URI, empty paths, nothing visited yet.
    #[must_use]
    pub fn root(document_root: Arc<Value>) -> Self {
        Scope {
            document_root,
            base_uri: None,
            schema_path: Path::new(),
            instance_path: Path::new(),
            visited: Arc::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn document_root(&self) -> &Arc<Value> {
        &self.document_root
    }

    #[must_use]
    pub fn base_uri(&self) -> Option<&str> {
        self.base_uri.as_deref()
    }

    #[must_use]
    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    #[must_use]
    pub fn instance_path(&self) -> &Path {
        &self.instance_path
    }

    #[must_use]
    pub fn has_visited(&self, reference: &str) -> bool {
        self.visited.contains(reference)
    }

    /// A copy of this scope descending into `chunk` of the schema tree.
    #[must_use]
    pub fn descend_schema(&self, chunk: impl Into<PathChunk>) -> Self {
        Scope {
            schema_path: self.schema_path.pushed(chunk),
            ..self.clone()
        }
    }

    /// A copy of this scope descending into `chunk` of the instance.
    ///
    /// This also clears `visited`: the cycle guard only needs to stop a
    /// `$ref` chain that chases its own tail without ever consuming any of
    /// the instance (§4.5 "cycle policy") - once validation actually steps
    /// into a child value, a schema may legitimately revisit the very same
    /// `$ref` again (a recursive tree schema validates every child with the
    /// same reference it used for its parent).
    #[must_use]
    pub fn descend_instance(&self, chunk: impl Into<PathChunk>) -> Self {
        Scope {
            instance_path: self.instance_path.pushed(chunk),
            visited: Arc::new(HashSet::new()),
            ..self.clone()
        }
    }

    /// A copy refined by a node's own `id`/`$id`, if it has one (§4.1). A
    /// node with no `id` leaves the base URI unchanged.
    #[must_use]
    pub fn refined_by_id(&self, id: Option<&str>) -> Self {
        match id {
            None => self.clone(),
            Some(id) => Scope {
                base_uri: Some(crate::uri::resolve_against(self.base_uri.as_deref(), id)),
                ..self.clone()
            },
        }
    }

    /// A copy with `document_root` substituted for a fetched document's own
    /// root, its base URI reset to that document's own identity, and the
    /// reference string recorded as visited. Used while descending into a
    /// resolved remote (or root) document; the original `self` this was
    /// called on is what the caller still holds once `resolve` returns,
    /// which is the whole of the "restore" mechanism (§4.5, "restoring root
    /// after resolve").
    #[must_use]
    pub fn entering_document(
        &self,
        document_root: Arc<Value>,
        base_uri: Option<String>,
        reference: String,
    ) -> Self {
        let mut visited = (*self.visited).clone();
        visited.insert(reference);
        Scope {
            document_root,
            base_uri,
            schema_path: Path::new(),
            visited: Arc::new(visited),
            ..self.clone()
        }
    }

    /// A copy with the base URI set to exactly `base_uri` (already resolved
    /// to an absolute form by the caller, unlike `refined_by_id` which
    /// still has to resolve a raw `id` value against the current base).
    #[must_use]
    pub fn with_base_uri(&self, base_uri: String) -> Self {
        Scope {
            base_uri: Some(base_uri),
            ..self.clone()
        }
    }

    /// A copy with just the visited set extended and the base URI refined,
    /// used when a resolution stays within the same document (no root
    /// substitution needed, e.g. a `#/...` pointer into the current root).
    #[must_use]
    pub fn visiting(&self, reference: String, base_uri: Option<String>) -> Self {
        let mut visited = (*self.visited).clone();
        visited.insert(reference);
        Scope {
            base_uri: base_uri.or_else(|| self.base_uri.clone()),
            visited: Arc::new(visited),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn descend_does_not_affect_sibling_scopes() {
        let root = Arc::new(json!({"type": "object"}));
        let base = Scope::root(root);
        let a = base.descend_instance("a");
        let b = base.descend_instance("b");
        assert_eq!(a.instance_path().to_pointer(), "/a");
        assert_eq!(b.instance_path().to_pointer(), "/b");
        assert!(base.instance_path().is_empty());
    }

    #[test]
    fn entering_document_restores_on_the_way_back() {
        let root = Arc::new(json!({"type": "object"}));
        let remote = Arc::new(json!({"type": "string"}));
        let outer = Scope::root(Arc::clone(&root));
        let inner = outer.entering_document(
            Arc::clone(&remote),
            Some("https://example.com/b".into()),
            "https://example.com/b".into(),
        );
        assert!(inner.has_visited("https://example.com/b"));
        assert!(!outer.has_visited("https://example.com/b"));
        assert_eq!(**outer.document_root(), json!({"type": "object"}));
        assert_eq!(**inner.document_root(), json!({"type": "string"}));
    }
}
