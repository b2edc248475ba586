//! Reference resolver (§4.5): implements `$ref` resolution, including
//! fetching remote documents via a pluggable `SchemaResolver`. Internal
//! references (`#/...`, bare fragments) and "location-independent
//! identifiers" (a `$ref` to an `$id` embedded somewhere else in the same
//! document) never leave this process; only a reference to a document
//! genuinely not present anywhere in the root document goes through the
//! cache and then the external resolver, mirroring
//! `jsonschema::resolver::Resolver`.
use crate::{
    cache::DocumentCache,
    error::{ResolutionErrorKind, ValidationError},
    fragment,
    node::{IdKeyword, SchemaNode},
    scope::Scope,
    uri,
};
use ahash::AHashMap;
use serde_json::Value;
use std::sync::Arc;

/// An opaque error type returned by resolvers on fetch failures.
pub type SchemaResolverError = anyhow::Error;

/// Fetches the document an external (absolute-URI) `$ref` points to, when
/// it isn't already the current document, a location-independent
/// identifier embedded in it, or a previously-fetched one.
pub trait SchemaResolver: Send + Sync {
    /// Fetch the document identified by `uri` (with no fragment). The
    /// original reference string is also passed since it carries
    /// information (e.g. the exact relative path used) that the resolved
    /// absolute URI alone does not.
    fn resolve(&self, uri: &str, original_reference: &str) -> Result<Arc<Value>, SchemaResolverError>;
}

/// The resolver used when a caller installs none of their own: supports
/// `http(s)://` (behind `resolve-http`) and `file://` (behind
/// `resolve-file`), refusing every other scheme.
pub struct DefaultResolver;

impl SchemaResolver for DefaultResolver {
    fn resolve(&self, uri: &str, _original_reference: &str) -> Result<Arc<Value>, SchemaResolverError> {
        let parsed = url::Url::parse(uri)?;
        match parsed.scheme() {
            "http" | "https" => {
                #[cfg(feature = "resolve-http")]
                {
                    let response = reqwest::blocking::get(parsed.as_str())?;
                    let document: Value = response.json()?;
                    Ok(Arc::new(document))
                }
                #[cfg(not(feature = "resolve-http"))]
                {
                    Err(anyhow::anyhow!(
                        "`resolve-http` feature or a custom resolver is required to resolve external schemas via HTTP"
                    ))
                }
            }
            "file" => {
                #[cfg(feature = "resolve-file")]
                {
                    let path = parsed
                        .to_file_path()
                        .map_err(|()| anyhow::anyhow!("invalid file path in '{uri}'"))?;
                    let file = std::fs::File::open(path)?;
                    let document: Value = serde_json::from_reader(file)?;
                    Ok(Arc::new(document))
                }
                #[cfg(not(feature = "resolve-file"))]
                {
                    Err(anyhow::anyhow!(
                        "`resolve-file` feature or a custom resolver is required to resolve external schemas via files"
                    ))
                }
            }
            "json-schema" => Err(anyhow::anyhow!(
                "cannot resolve a relative external schema without a root schema id"
            )),
            other => Err(anyhow::anyhow!("unsupported scheme '{other}'")),
        }
    }
}

/// Resolves `$ref` strings against the root document's own embedded `$id`s,
/// a document cache, and an external fetcher, producing a compiled
/// `SchemaNode` and the `Scope` validation should continue with.
pub struct Resolver {
    external: Arc<dyn SchemaResolver>,
    cache: DocumentCache,
    id_keyword: IdKeyword,
    /// Every `$id` found anywhere in the root document, mapped to the
    /// sub-document it was found on, keyed by its canonical (absolute)
    /// URI. Built once, up front, so a `$ref` to an embedded `$id` never
    /// has to go through the external resolver at all (§4.5).
    embedded: AHashMap<String, Arc<Value>>,
}

impl Resolver {
    #[must_use]
    pub fn new(external: Arc<dyn SchemaResolver>, id_keyword: IdKeyword, root_document: &Value) -> Self {
        let mut embedded = AHashMap::default();
        find_embedded_ids(root_document, uri::DEFAULT_ROOT_URI.as_str(), id_keyword, &mut embedded);
        Resolver {
            external,
            cache: DocumentCache::new(),
            id_keyword,
            embedded,
        }
    }

    /// Resolve `reference` relative to `scope`, returning the compiled
    /// target node and the scope that should be used to validate against
    /// it. Follows chained `$ref`s (a node whose *entire* shape is a
    /// `$ref`, per the data model, so a resolved node that is itself a
    /// `Ref` is simply resolved again) until a non-`Ref` node is reached,
    /// guarding against cycles with `scope.has_visited`.
    pub fn resolve(
        &self,
        reference: &str,
        scope: &Scope,
    ) -> Result<(SchemaNode, Scope), ValidationError> {
        let (node, scope) = self.resolve_once(reference, scope)?;
        match node {
            SchemaNode::Ref(inner) => self.resolve(&inner.reference, &scope),
            node => Ok((node, scope)),
        }
    }

    fn resolve_once(&self, reference: &str, scope: &Scope) -> Result<(SchemaNode, Scope), ValidationError> {
        let base = scope.base_uri().unwrap_or_else(|| uri::DEFAULT_ROOT_URI.as_str());
        let full = uri::resolve_against(Some(base), reference);
        if scope.has_visited(&full) {
            return Err(ValidationError::resolution(
                scope.instance_path().clone(),
                scope.schema_path().clone(),
                Value::Null,
                reference.to_string(),
                ResolutionErrorKind::Cycle,
            ));
        }

        let (document_uri, raw_fragment) = uri::split_fragment(&full);
        let fragment = raw_fragment.map(fragment::percent_decode).unwrap_or_default();
        let tokens = fragment::tokenize(&fragment);

        let same_document = document_uri == base || (document_uri.is_empty() && scope.base_uri().is_none());

        let (document, next_scope) = if same_document {
            (Arc::clone(scope.document_root()), scope.visiting(full.clone(), None))
        } else if let Some(embedded) = self.embedded.get(document_uri) {
            (
                Arc::clone(embedded),
                scope.entering_document(Arc::clone(embedded), Some(document_uri.to_string()), full.clone()),
            )
        } else {
            let document = self.load(document_uri, reference, scope)?;
            (
                Arc::clone(&document),
                scope.entering_document(document, Some(document_uri.to_string()), full.clone()),
            )
        };

        let (folders, target) = fragment::walk(&document, &tokens, self.id_keyword).ok_or_else(|| {
            ValidationError::resolution(
                scope.instance_path().clone(),
                scope.schema_path().clone(),
                Value::Null,
                reference.to_string(),
                ResolutionErrorKind::PointerNotFound,
            )
        })?;

        // Each `id`/`$id` crossed while walking the pointer narrows the
        // base URI for anything nested under it, the same way compiling a
        // sub-schema with its own `$id` does (§4.1).
        let mut resolved_base = next_scope
            .base_uri()
            .map_or_else(|| document_uri.to_string(), str::to_string);
        for folder in folders {
            resolved_base = uri::resolve_against(Some(&resolved_base), folder);
        }
        let next_scope = next_scope.with_base_uri(resolved_base);

        let node = SchemaNode::compile(target, self.id_keyword).map_err(|_| {
            ValidationError::resolution(
                scope.instance_path().clone(),
                scope.schema_path().clone(),
                Value::Null,
                reference.to_string(),
                ResolutionErrorKind::Unparseable,
            )
        })?;

        Ok((node, next_scope))
    }

    fn load(&self, document_uri: &str, reference: &str, scope: &Scope) -> Result<Arc<Value>, ValidationError> {
        if let Some(cached) = self.cache.get(document_uri) {
            return Ok(cached);
        }
        let fetched = self.external.resolve(document_uri, reference).map_err(|_| {
            ValidationError::resolution(
                scope.instance_path().clone(),
                scope.schema_path().clone(),
                Value::Null,
                reference.to_string(),
                ResolutionErrorKind::Unreachable,
            )
        })?;
        self.cache.put(document_uri.to_string(), Arc::clone(&fetched));
        Ok(fetched)
    }
}

/// Walk the whole document once, recording every embedded `$id` under its
/// canonical URI (resolved against the base in effect at that point, the
/// way nested `$id`s narrow the scope during compilation). `enum`/`const`
/// values are skipped since their contents are data, not schemas, and
/// could otherwise be mistaken for a sub-schema carrying its own `$id`.
fn find_embedded_ids(value: &Value, base: &str, id_keyword: IdKeyword, out: &mut AHashMap<String, Arc<Value>>) {
    match value {
        Value::Object(map) => {
            let mut scope_base = base.to_string();
            if let Some(id) = map.get(id_keyword.as_str()).and_then(Value::as_str) {
                scope_base = uri::resolve_against(Some(base), id);
                out.insert(scope_base.clone(), Arc::new(value.clone()));
            }
            for (key, sub) in map {
                if key == "enum" || key == "const" {
                    continue;
                }
                find_embedded_ids(sub, &scope_base, id_keyword, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                find_embedded_ids(item, base, id_keyword, out);
            }
        }
        _ => {}
    }
}
