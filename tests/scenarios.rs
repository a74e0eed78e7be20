//! End-to-end patch scenarios
//!
//! Each test runs a full pass: parse, resolve, expand, write.

use confpatch::{
    DocumentError, JsonHostConfig, PatchError, Patcher, ReplacementRule, Resolution, ValueType,
};
use serde_json::{json, Value};

fn docker_host() -> JsonHostConfig {
    JsonHostConfig::from_value(&json!({
        "Docker": {
            "Port": 25566,
            "Interface": "172.18.0.1",
            "Network": {"InterfaceName": "pterodactyl0"}
        },
        "Api": {"Ssl": {"Enabled": true}}
    }))
}

fn patch(host: &JsonHostConfig, input: &str, rules: &[ReplacementRule]) -> Value {
    Patcher::new(host)
        .patch_bytes(input.as_bytes(), rules)
        .unwrap()
        .document
        .into_value()
}

// =============================================================================
// Placeholder resolution
// =============================================================================

#[test]
fn test_port_from_host_config() {
    let rules = [ReplacementRule::new(
        "server.port",
        "{{ config.docker.port }}",
        ValueType::Number,
    )];
    let out = patch(&docker_host(), r#"{"server":{"port":25565}}"#, &rules);
    assert_eq!(out, json!({"server": {"port": 25566}}));
}

#[test]
fn test_missing_host_key_coerces_placeholder_to_zero() {
    // The unresolved placeholder text is fed through Number coercion, so the
    // port becomes 0 rather than keeping its old value.
    let host = JsonHostConfig::from_value(&json!({"Docker": {}}));
    let rules = [ReplacementRule::new(
        "server.port",
        "{{ config.docker.port }}",
        ValueType::Number,
    )];
    let patched = Patcher::new(&host)
        .patch_bytes(br#"{"server":{"port":25565}}"#, &rules)
        .unwrap();

    assert_eq!(patched.document.as_value(), &json!({"server": {"port": 0}}));
    assert_eq!(patched.outcomes[0].resolution, Resolution::Unresolved);
    assert_eq!(patched.outcomes[0].value, "{{ config.docker.port }}");
}

#[test]
fn test_missing_host_key_string_keeps_placeholder_visible() {
    let host = JsonHostConfig::empty();
    let rules = [ReplacementRule::new(
        "listeners.0.host",
        "{{config.docker.interface}}",
        ValueType::String,
    )];
    let out = patch(&host, r#"{"listeners":[{"host":"0.0.0.0"}]}"#, &rules);
    assert_eq!(out, json!({"listeners": [{"host": "{{config.docker.interface}}"}]}));
}

#[test]
fn test_snake_case_placeholder_maps_to_camel_case_key() {
    let rules = [ReplacementRule::new(
        "network.nic",
        "{{ config.docker.network.interface_name }}",
        ValueType::String,
    )];
    let out = patch(&docker_host(), r#"{"network":{}}"#, &rules);
    assert_eq!(out, json!({"network": {"nic": "pterodactyl0"}}));
}

#[test]
fn test_embedded_placeholder() {
    let rules = [ReplacementRule::new(
        "proxy.address",
        "tcp://{{config.docker.interface}}:8080",
        ValueType::String,
    )];
    let out = patch(&docker_host(), r#"{"proxy":{"address":""}}"#, &rules);
    assert_eq!(out, json!({"proxy": {"address": "tcp://172.18.0.1:8080"}}));
}

#[test]
fn test_host_boolean_with_declared_boolean() {
    let rules = [ReplacementRule::new(
        "ssl",
        "{{ config.api.ssl.enabled }}",
        ValueType::Boolean,
    )];
    let out = patch(&docker_host(), r#"{"ssl":false}"#, &rules);
    assert_eq!(out, json!({"ssl": true}));
}

#[test]
fn test_declared_string_wins_over_host_number() {
    let rules = [ReplacementRule::new(
        "server.port",
        "{{ config.docker.port }}",
        ValueType::String,
    )];
    let out = patch(&docker_host(), r#"{"server":{"port":25565}}"#, &rules);
    assert_eq!(out, json!({"server": {"port": "25566"}}));
}

// =============================================================================
// Wildcards
// =============================================================================

#[test]
fn test_wildcard_bind_for_every_world() {
    let rules = [ReplacementRule::new("worlds.*.bind", "127.0.0.1", ValueType::String)];
    let out = patch(
        &docker_host(),
        r#"{"worlds":{"world1":{"bind":"0.0.0.0"},"world2":{"bind":"0.0.0.0"}}}"#,
        &rules,
    );
    assert_eq!(
        out,
        json!({"worlds": {"world1": {"bind": "127.0.0.1"}, "world2": {"bind": "127.0.0.1"}}})
    );
}

#[test]
fn test_wildcard_over_array_creates_missing_keys() {
    let rules = [ReplacementRule::new(
        "listeners.*.host",
        "{{ config.docker.interface }}",
        ValueType::String,
    )];
    let out = patch(&docker_host(), r#"{"listeners":[{"port":1},{"host":"x"}]}"#, &rules);
    assert_eq!(
        out,
        json!({"listeners": [
            {"port": 1, "host": "172.18.0.1"},
            {"host": "172.18.0.1"}
        ]})
    );
}

#[test]
fn test_wildcard_on_missing_root_is_noop() {
    let rules = [ReplacementRule::new("worlds.*.bind", "127.0.0.1", ValueType::String)];
    let patched = Patcher::new(&docker_host())
        .patch_bytes(br#"{"server":{}}"#, &rules)
        .unwrap();
    assert_eq!(patched.document.as_value(), &json!({"server": {}}));
    assert!(patched.outcomes[0].written.is_empty());
}

#[test]
fn test_wildcard_on_null_root_is_noop() {
    let rules = [ReplacementRule::new("worlds.*.bind", "127.0.0.1", ValueType::String)];
    let out = patch(&docker_host(), r#"{"worlds":null}"#, &rules);
    assert_eq!(out, json!({"worlds": null}));
}

#[test]
fn test_nested_wildcard_is_not_expanded() {
    // Only the first marker fans out; the second is a literal "*" key.
    let rules = [ReplacementRule::new(
        "worlds.*.listeners.*.bind",
        "127.0.0.1",
        ValueType::String,
    )];
    let out = patch(
        &docker_host(),
        r#"{"worlds":{"a":{"listeners":{"l1":{"bind":"0.0.0.0"}}}}}"#,
        &rules,
    );
    assert_eq!(
        out,
        json!({"worlds": {"a": {"listeners": {
            "l1": {"bind": "0.0.0.0"},
            "*": {"bind": "127.0.0.1"}
        }}}})
    );
}

#[test]
fn test_wildcard_into_scalar_child_fails() {
    let rules = [ReplacementRule::new("worlds.*.bind", "127.0.0.1", ValueType::String)];
    let err = Patcher::new(&docker_host())
        .patch_bytes(br#"{"worlds":{"a":{"bind":"x"},"b":"flat"}}"#, &rules)
        .unwrap_err();
    match err {
        PatchError::Write { path, source, .. } => {
            assert_eq!(path, "worlds.b.bind");
            assert!(matches!(source, DocumentError::PathCollision { found: "string", .. }));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_wildcard_skips_null_children() {
    let rules = [ReplacementRule::new("worlds.*.bind", "127.0.0.1", ValueType::String)];
    let patched = Patcher::new(&docker_host())
        .patch_bytes(br#"{"worlds":{"a":null,"b":{"bind":"0.0.0.0"}}}"#, &rules)
        .unwrap();
    assert_eq!(
        patched.document.as_value(),
        &json!({"worlds": {"a": null, "b": {"bind": "127.0.0.1"}}})
    );
    assert_eq!(patched.outcomes[0].written.len(), 1);
    assert_eq!(patched.outcomes[0].written[0].to_string(), "worlds.b.bind");
}

#[test]
fn test_empty_match_writes_empty_key() {
    let rules = [ReplacementRule::new("", "x", ValueType::String)];
    let out = patch(&docker_host(), r#"{"server":{"port":1}}"#, &rules);
    assert_eq!(out, json!({"server": {"port": 1}, "": "x"}));
}

#[test]
fn test_empty_wildcard_prefix_searches_empty_key() {
    let rules = [ReplacementRule::new(".*.bind", "127.0.0.1", ValueType::String)];
    let patched = Patcher::new(&docker_host())
        .patch_bytes(br#"{"server":{"port":1},"name":"flat"}"#, &rules)
        .unwrap();
    assert_eq!(
        patched.document.as_value(),
        &json!({"server": {"port": 1}, "name": "flat"})
    );
    assert!(patched.outcomes[0].written.is_empty());
}

#[test]
fn test_empty_wildcard_suffix_writes_empty_key_in_each_child() {
    let rules = [ReplacementRule::new("worlds.*", "v", ValueType::String)];
    let out = patch(
        &docker_host(),
        r#"{"worlds":{"a":{"bind":"x"},"b":{}}}"#,
        &rules,
    );
    assert_eq!(
        out,
        json!({"worlds": {"a": {"bind": "x", "": "v"}, "b": {"": "v"}}})
    );
}

// =============================================================================
// Coercion
// =============================================================================

#[test]
fn test_literal_number_is_integer() {
    let rules = [ReplacementRule::new("server.port", "25565", ValueType::Number)];
    let out = patch(&docker_host(), r#"{"server":{"port":"1"}}"#, &rules);
    assert_eq!(out["server"]["port"], json!(25565));
    assert!(out["server"]["port"].is_i64());
}

#[test]
fn test_non_numeric_number_is_zero() {
    let rules = [ReplacementRule::new("server.port", "not-a-port", ValueType::Number)];
    let out = patch(&docker_host(), r#"{"server":{"port":25565}}"#, &rules);
    assert_eq!(out, json!({"server": {"port": 0}}));
}

#[test]
fn test_overwrites_object_with_scalar() {
    let rules = [ReplacementRule::new("server", "off", ValueType::String)];
    let out = patch(&docker_host(), r#"{"server":{"port":25565}}"#, &rules);
    assert_eq!(out, json!({"server": "off"}));
}

#[test]
fn test_malformed_input_runs_no_rules() {
    let err = Patcher::new(&JsonHostConfig::new(b"garbage".to_vec()))
        .patch_bytes(
            b"server: 1",
            &[ReplacementRule::new("a", "{{ config.x }}", ValueType::String)],
        )
        .unwrap_err();
    assert!(matches!(err, PatchError::Document(DocumentError::Malformed(_))));
}
