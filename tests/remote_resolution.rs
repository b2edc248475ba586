//! Exercises the default HTTP resolver's external-fetch path end to end,
//! the way `jsonschema`'s own remote-ref suites stand up a mock server
//! rather than hitting the network.
use jsonschema_core::CompiledSchema;
use serde_json::json;

#[test]
fn ref_to_a_genuinely_remote_document_is_fetched_over_http() {
    let _mock = mockito::mock("GET", "/positiveInteger.json")
        .with_body(json!({"type": "integer"}).to_string())
        .create();

    let schema = json!({
        "$id": format!("http://{}/root.json", mockito::server_address()),
        "allOf": [
            {"$ref": format!("http://{}/positiveInteger.json", mockito::server_address())}
        ]
    });
    let compiled = CompiledSchema::compile(&schema).unwrap();
    assert!(compiled.validate(&json!(5)).is_ok());
    assert!(compiled.validate(&json!("not an integer")).is_err());
}

#[test]
fn an_unreachable_remote_document_is_reported_as_a_resolution_error() {
    let schema = json!({"$ref": "http://127.0.0.1:1/does-not-exist.json"});
    let compiled = CompiledSchema::compile(&schema).unwrap();
    let errors = compiled.validate(&json!(1)).unwrap_err();
    assert_eq!(errors.len(), 1);
}
