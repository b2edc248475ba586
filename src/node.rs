//! The schema node data model (§3): a tagged variant whose tag selects
//! which keyword-validator set applies, plus the handful of representative
//! keyword fields the core needs to exercise the resolver and dispatcher
//! end to end (§ SPEC_FULL "Supplemented features").
use crate::error::CompilationError;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

/// Which keyword spells a scope-refining identifier: draft-4 schemas use a
/// plain `id`, draft-6 and later use `$id`. Mirrors `jsonschema::schemas::Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKeyword {
    Id,
    DollarId,
}

impl IdKeyword {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            IdKeyword::Id => "id",
            IdKeyword::DollarId => "$id",
        }
    }
}

/// How `additionalProperties` / `additionalItems` restrict what isn't
/// otherwise matched.
#[derive(Debug)]
pub enum Additional {
    Allowed,
    Forbidden,
    Schema(Box<SchemaNode>),
}

/// A `dependencies` entry: either a schema the whole instance must satisfy,
/// or a plain list of co-required property names.
#[derive(Debug)]
pub enum Dependency {
    Schema(SchemaNode),
    Required(Vec<String>),
}

#[derive(Debug)]
pub struct ObjectNode {
    pub id: Option<String>,
    /// Whether the schema declared an explicit `"type": "object"` (§4.6's
    /// "key subtlety": without it, this node's keywords apply but do not
    /// require the instance to be an object).
    pub declared_type: bool,
    pub properties: Option<Map<String, SchemaNode>>,
    pub required: Option<Vec<String>>,
    pub dependencies: Option<Vec<(String, Dependency)>>,
    pub additional_properties: Option<Additional>,
    pub pattern_properties: Option<Vec<(Regex, SchemaNode)>>,
}

#[derive(Debug)]
pub struct ArrayNode {
    pub id: Option<String>,
    pub declared_type: bool,
    pub items: Option<Box<SchemaNode>>,
}

#[derive(Debug)]
pub struct TupleNode {
    pub id: Option<String>,
    pub declared_type: bool,
    pub items: Vec<SchemaNode>,
    pub additional_items: Option<Additional>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    AnyOf,
    AllOf,
    OneOf,
    Not,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::AnyOf => write!(f, "anyOf"),
            Combinator::AllOf => write!(f, "allOf"),
            Combinator::OneOf => write!(f, "oneOf"),
            Combinator::Not => write!(f, "not"),
        }
    }
}

#[derive(Debug)]
pub struct CompoundNode {
    pub id: Option<String>,
    pub combinator: Combinator,
    pub branches: Vec<SchemaNode>,
}

#[derive(Debug)]
pub struct RefNode {
    pub reference: String,
}

/// A leaf, type-only node: carries just the scope-refining `id`, since none
/// of the representative keyword set adds constraints on numbers, booleans
/// or nulls. `declared_type` is always `true` for these — they only exist
/// because an explicit `type` keyword (or a heuristically-recognized
/// keyword) selected them.
#[derive(Debug, Default)]
pub struct LeafNode {
    pub id: Option<String>,
    pub declared_type: bool,
}

/// The schema node, tagged by the kind that determines which
/// keyword-validators the dispatcher invokes (§3).
#[derive(Debug)]
pub enum SchemaNode {
    Object(ObjectNode),
    Array(ArrayNode),
    Tuple(TupleNode),
    Number(LeafNode),
    Integer(LeafNode),
    String(StringNode),
    Boolean(LeafNode),
    Null(LeafNode),
    Compound(CompoundNode),
    Ref(RefNode),
    /// The boolean schema literal `true`: every instance passes.
    Always,
    /// The boolean schema literal `false`: every instance fails.
    Never,
}

#[derive(Debug)]
pub struct StringNode {
    pub id: Option<String>,
    pub declared_type: bool,
    pub pattern: Option<Regex>,
}

impl SchemaNode {
    /// The node's own scope-refining `id`, if it carries one. Returns
    /// `None` for `Ref`, `Always` and `Never`, which never refine scope.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            SchemaNode::Object(node) => node.id.as_deref(),
            SchemaNode::Array(node) => node.id.as_deref(),
            SchemaNode::Tuple(node) => node.id.as_deref(),
            SchemaNode::Number(node) | SchemaNode::Integer(node) | SchemaNode::Boolean(node) | SchemaNode::Null(node) => {
                node.id.as_deref()
            }
            SchemaNode::String(node) => node.id.as_deref(),
            SchemaNode::Compound(node) => node.id.as_deref(),
            SchemaNode::Ref(_) | SchemaNode::Always | SchemaNode::Never => None,
        }
    }

    /// Build a schema node from a parsed JSON document (§6: the schema is
    /// accepted as a parsed value; every sub-object whose keys are all
    /// schema keywords is a schema node, and a `$ref` key turns the node
    /// into a `Ref` regardless of any sibling keyword).
    pub fn compile(schema: &Value, id_keyword: IdKeyword) -> Result<SchemaNode, CompilationError> {
        match schema {
            Value::Bool(true) => Ok(SchemaNode::Always),
            Value::Bool(false) => Ok(SchemaNode::Never),
            Value::Object(map) => Self::compile_object(map, id_keyword),
            other => Err(CompilationError::SchemaError(format!(
                "schema must be a JSON object or boolean, got {other}"
            ))),
        }
    }

    fn compile_object(
        map: &Map<String, Value>,
        id_keyword: IdKeyword,
    ) -> Result<SchemaNode, CompilationError> {
        if let Some(reference) = map.get("$ref") {
            return match reference {
                Value::String(reference) => Ok(SchemaNode::Ref(RefNode {
                    reference: reference.clone(),
                })),
                other => Err(CompilationError::SchemaError(format!(
                    "$ref must be a string, got {other}"
                ))),
            };
        }

        let id = map
            .get(id_keyword.as_str())
            .and_then(Value::as_str)
            .map(str::to_string);

        if let Some((combinator, branches)) = Self::compile_combinator(map, id_keyword)? {
            return Ok(SchemaNode::Compound(CompoundNode {
                id,
                combinator,
                branches,
            }));
        }

        let declared_type = map.get("type").and_then(Value::as_str);
        let has_array_items = matches!(map.get("items"), Some(Value::Array(_)));
        let kind = match declared_type {
            Some("object") => Kind::Object,
            Some("array") => {
                if has_array_items {
                    Kind::Tuple
                } else {
                    Kind::Array
                }
            }
            Some("number") => Kind::Number,
            Some("integer") => Kind::Integer,
            Some("string") => Kind::String,
            Some("boolean") => Kind::Boolean,
            Some("null") => Kind::Null,
            Some(other) => {
                return Err(CompilationError::SchemaError(format!(
                    "unknown type '{other}'"
                )))
            }
            None => Self::infer_kind(map, has_array_items),
        };
        let declared_type = declared_type.is_some();

        match kind {
            Kind::Object => Ok(SchemaNode::Object(Self::compile_object_node(
                map,
                id,
                declared_type,
                id_keyword,
            )?)),
            Kind::Array => Ok(SchemaNode::Array(ArrayNode {
                id,
                declared_type,
                items: match map.get("items") {
                    Some(items) => Some(Box::new(SchemaNode::compile(items, id_keyword)?)),
                    None => None,
                },
            })),
            Kind::Tuple => {
                let items = match map.get("items") {
                    Some(Value::Array(items)) => items
                        .iter()
                        .map(|item| SchemaNode::compile(item, id_keyword))
                        .collect::<Result<Vec<_>, _>>()?,
                    _ => Vec::new(),
                };
                let additional_items = Self::compile_additional(map.get("additionalItems"), id_keyword)?;
                Ok(SchemaNode::Tuple(TupleNode {
                    id,
                    declared_type,
                    items,
                    additional_items,
                }))
            }
            Kind::Number => Ok(SchemaNode::Number(LeafNode { id, declared_type })),
            Kind::Integer => Ok(SchemaNode::Integer(LeafNode { id, declared_type })),
            Kind::String => Ok(SchemaNode::String(StringNode {
                id,
                declared_type,
                pattern: match map.get("pattern") {
                    Some(Value::String(pattern)) => Some(Regex::new(pattern)?),
                    Some(other) => {
                        return Err(CompilationError::SchemaError(format!(
                            "pattern must be a string, got {other}"
                        )))
                    }
                    None => None,
                },
            })),
            Kind::Boolean => Ok(SchemaNode::Boolean(LeafNode { id, declared_type })),
            Kind::Null => Ok(SchemaNode::Null(LeafNode { id, declared_type })),
        }
    }

    fn compile_object_node(
        map: &Map<String, Value>,
        id: Option<String>,
        declared_type: bool,
        id_keyword: IdKeyword,
    ) -> Result<ObjectNode, CompilationError> {
        let properties = match map.get("properties") {
            Some(Value::Object(props)) => {
                let mut compiled = Map::new();
                for (name, subschema) in props {
                    compiled.insert(name.clone(), SchemaNode::compile(subschema, id_keyword)?);
                }
                Some(compiled)
            }
            Some(other) => {
                return Err(CompilationError::SchemaError(format!(
                    "properties must be an object, got {other}"
                )))
            }
            None => None,
        };
        let required = match map.get("required") {
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .map(|item| {
                        item.as_str().map(str::to_string).ok_or_else(|| {
                            CompilationError::SchemaError(
                                "required items must be strings".to_string(),
                            )
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Some(other) => {
                return Err(CompilationError::SchemaError(format!(
                    "required must be an array, got {other}"
                )))
            }
            None => None,
        };
        let dependencies = match map.get("dependencies") {
            Some(Value::Object(deps)) => {
                let mut compiled = Vec::with_capacity(deps.len());
                for (name, value) in deps {
                    let dependency = match value {
                        Value::Array(items) => Dependency::Required(
                            items
                                .iter()
                                .map(|item| {
                                    item.as_str().map(str::to_string).ok_or_else(|| {
                                        CompilationError::SchemaError(
                                            "dependency list entries must be strings".to_string(),
                                        )
                                    })
                                })
                                .collect::<Result<Vec<_>, _>>()?,
                        ),
                        schema => Dependency::Schema(SchemaNode::compile(schema, id_keyword)?),
                    };
                    compiled.push((name.clone(), dependency));
                }
                Some(compiled)
            }
            Some(other) => {
                return Err(CompilationError::SchemaError(format!(
                    "dependencies must be an object, got {other}"
                )))
            }
            None => None,
        };
        let additional_properties = Self::compile_additional(map.get("additionalProperties"), id_keyword)?;
        let pattern_properties = match map.get("patternProperties") {
            Some(Value::Object(patterns)) => {
                let mut compiled = Vec::with_capacity(patterns.len());
                for (pattern, subschema) in patterns {
                    compiled.push((Regex::new(pattern)?, SchemaNode::compile(subschema, id_keyword)?));
                }
                Some(compiled)
            }
            Some(other) => {
                return Err(CompilationError::SchemaError(format!(
                    "patternProperties must be an object, got {other}"
                )))
            }
            None => None,
        };
        Ok(ObjectNode {
            id,
            declared_type,
            properties,
            required,
            dependencies,
            additional_properties,
            pattern_properties,
        })
    }

    fn compile_additional(
        value: Option<&Value>,
        id_keyword: IdKeyword,
    ) -> Result<Option<Additional>, CompilationError> {
        Ok(match value {
            None => None,
            Some(Value::Bool(true)) => Some(Additional::Allowed),
            Some(Value::Bool(false)) => Some(Additional::Forbidden),
            Some(schema) => Some(Additional::Schema(Box::new(SchemaNode::compile(
                schema, id_keyword,
            )?))),
        })
    }

    fn compile_combinator(
        map: &Map<String, Value>,
        id_keyword: IdKeyword,
    ) -> Result<Option<(Combinator, Vec<SchemaNode>)>, CompilationError> {
        for (keyword, combinator) in [
            ("anyOf", Combinator::AnyOf),
            ("allOf", Combinator::AllOf),
            ("oneOf", Combinator::OneOf),
        ] {
            if let Some(value) = map.get(keyword) {
                let items = match value {
                    Value::Array(items) => items,
                    other => {
                        return Err(CompilationError::SchemaError(format!(
                            "{keyword} must be an array, got {other}"
                        )))
                    }
                };
                let branches = items
                    .iter()
                    .map(|item| SchemaNode::compile(item, id_keyword))
                    .collect::<Result<Vec<_>, _>>()?;
                return Ok(Some((combinator, branches)));
            }
        }
        if let Some(value) = map.get("not") {
            return Ok(Some((
                Combinator::Not,
                vec![SchemaNode::compile(value, id_keyword)?],
            )));
        }
        Ok(None)
    }

    fn infer_kind(map: &Map<String, Value>, has_array_items: bool) -> Kind {
        if map.contains_key("items")
            || map.contains_key("additionalItems")
            || map.contains_key("minItems")
            || map.contains_key("maxItems")
            || map.contains_key("uniqueItems")
        {
            return if has_array_items { Kind::Tuple } else { Kind::Array };
        }
        if map.contains_key("properties")
            || map.contains_key("required")
            || map.contains_key("dependencies")
            || map.contains_key("additionalProperties")
            || map.contains_key("patternProperties")
        {
            return Kind::Object;
        }
        if map.contains_key("pattern") {
            return Kind::String;
        }
        // An empty schema, or one whose only keywords are outside the
        // representative set (e.g. `enum`), is treated as an open object
        // schema: it imposes no constraints of its own but is not
        // tied to any particular instance kind (§4.6, row 1).
        Kind::Object
    }
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Object,
    Array,
    Tuple,
    Number,
    Integer,
    String,
    Boolean,
    Null,
}
