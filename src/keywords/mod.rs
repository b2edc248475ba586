//! The small, representative set of keywords needed to exercise the
//! resolver and dispatcher end to end (§4.4, § SPEC_FULL "Supplemented
//! features"). Each submodule owns one keyword's compiled representation
//! (already produced by `node::SchemaNode::compile`) and a `validate`
//! function with the same shape a third-party keyword author would
//! implement: given an instance and the scope it sits at, produce every
//! violation found (an empty `Vec` is success - violations never
//! short-circuit each other within one keyword, only across keywords does
//! the dispatcher decide whether to keep going, mirroring
//! `jsonschema::keywords`'s per-validator `ErrorIterator`).

pub mod additional_properties;
pub mod combinators;
pub mod dependencies;
pub mod items;
pub mod pattern;
pub mod properties;
pub mod required;
