//! JSON Pointer fragment tokenizing and traversal over a raw schema
//! document (§4.2). Traversal happens against `serde_json::Value` rather
//! than a compiled `SchemaNode`, because a pointer may target a position
//! that holds no recognized keyword of its own (`#/definitions/foo` is not
//! itself dispatchable, only a container for one) - the teacher's
//! `resolver::pointer` does the same thing for the same reason.
use crate::node::IdKeyword;
use serde_json::Value;

/// Split a (percent-decoded) JSON Pointer fragment into its tokens,
/// unescaping `~1` to `/` and `~0` to `~` (RFC 6901). An empty fragment or
/// a lone `/` both yield a single empty token, matching a pointer to the
/// document root.
#[must_use]
pub fn tokenize(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    let pointer = pointer.strip_prefix('/').unwrap_or(pointer);
    pointer
        .split('/')
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Percent-decode a fragment as carried inside a URI (e.g. a space encoded
/// as `%20` inside `#/a%20b`).
#[must_use]
pub fn percent_decode(fragment: &str) -> String {
    percent_encoding::percent_decode_str(fragment)
        .decode_utf8_lossy()
        .into_owned()
}

/// Walk `tokens` into `document`, returning the value found and every
/// `id`/`$id` seen strictly between the document root and that value (in
/// descent order) so the caller can fold them into the resolved scope's
/// base URI, mirroring how a sub-folder's own `$id` changes the base URI
/// for anything nested under it.
#[must_use]
pub fn walk<'a>(
    document: &'a Value,
    tokens: &[String],
    id_keyword: IdKeyword,
) -> Option<(Vec<&'a str>, &'a Value)> {
    let mut target = document;
    let mut folders = Vec::new();
    for token in tokens {
        if let Value::Object(map) = target {
            if let Some(id) = map.get(id_keyword.as_str()).and_then(Value::as_str) {
                folders.push(id);
            }
        }
        target = match target {
            Value::Object(map) => map.get(token.as_str())?,
            Value::Array(items) => items.get(parse_index(token)?)?,
            _ => return None,
        };
    }
    Some((folders, target))
}

fn parse_index(token: &str) -> Option<usize> {
    if token.starts_with('+') || (token.starts_with('0') && token.len() != 1) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unescapes_tilde_and_slash() {
        assert_eq!(tokenize("/a~1b/c~0d"), vec!["a/b", "c~d"]);
    }

    #[test]
    fn empty_pointer_targets_root() {
        assert_eq!(tokenize(""), Vec::<String>::new());
    }

    #[test]
    fn walks_into_nested_definitions() {
        let document = json!({
            "definitions": {
                "node": {"type": "integer"}
            }
        });
        let tokens = tokenize("/definitions/node");
        let (folders, found) = walk(&document, &tokens, IdKeyword::DollarId).unwrap();
        assert!(folders.is_empty());
        assert_eq!(found, &json!({"type": "integer"}));
    }

    #[test]
    fn collects_folders_along_the_way() {
        let document = json!({
            "$id": "http://example.com/",
            "definitions": {
                "node": {"$id": "folder/", "items": {"$ref": "child.json"}}
            }
        });
        let tokens = tokenize("/definitions/node");
        let (folders, _found) = walk(&document, &tokens, IdKeyword::DollarId).unwrap();
        assert_eq!(folders, vec!["http://example.com/"]);
    }

    #[test]
    fn missing_property_returns_none() {
        let document = json!({"type": "object"});
        let tokens = tokenize("/definitions/missing");
        assert!(walk(&document, &tokens, IdKeyword::DollarId).is_none());
    }
}
