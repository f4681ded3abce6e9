#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

#[test]
fn test_defaults_when_nothing_set() {
    let config = ServerConfig::from_lookup(lookup_from(&[])).expect("defaults should parse");

    assert_eq!(config.port, 8080);
    assert_eq!(config.kubectl, "kubectl");
    assert_eq!(config.docker, "docker");
    assert!(config.command_timeout.is_none(), "no timeout by default");
    assert_eq!(config.platform.registry, "localhost:5000");
    assert_eq!(config.platform.owner, "Temitayo Charles");
}

#[test]
fn test_overrides_are_applied() {
    let config = ServerConfig::from_lookup(lookup_from(&[
        ("INFRAFORGE_PORT", "9090"),
        ("INFRAFORGE_REGISTRY", "registry.internal:5000"),
        ("INFRAFORGE_KUBECTL", "/opt/bin/kubectl"),
        ("INFRAFORGE_DOCKER", "podman"),
        ("INFRAFORGE_COMMAND_TIMEOUT_SECS", "15"),
    ]))
    .expect("overrides should parse");

    assert_eq!(config.port, 9090);
    assert_eq!(config.platform.registry, "registry.internal:5000");
    assert_eq!(config.kubectl, "/opt/bin/kubectl");
    assert_eq!(config.docker, "podman");
    assert_eq!(config.command_timeout, Some(Duration::from_secs(15)));
}

#[test]
fn test_empty_values_fall_back_to_defaults() {
    let config = ServerConfig::from_lookup(lookup_from(&[
        ("INFRAFORGE_PORT", ""),
        ("INFRAFORGE_KUBECTL", "  "),
    ]))
    .expect("empty values should be ignored");

    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.kubectl, "kubectl");
}

#[test]
fn test_invalid_port_is_rejected() {
    let err = ServerConfig::from_lookup(lookup_from(&[("INFRAFORGE_PORT", "eighty")]))
        .expect_err("non-numeric port must fail");

    assert!(err.to_string().contains("INFRAFORGE_PORT"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    let err = ServerConfig::from_lookup(lookup_from(&[(
        "INFRAFORGE_COMMAND_TIMEOUT_SECS",
        "0",
    )]))
    .expect_err("zero timeout must fail");

    assert!(err.to_string().contains("greater than zero"));
}
