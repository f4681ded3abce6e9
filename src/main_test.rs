use infraforge::config::ServerConfig;
use std::time::Duration;

#[test]
fn test_build_state_uses_configured_platform() {
    let mut config = ServerConfig::default();
    config.platform.registry = "registry.internal:5000".to_string();
    config.command_timeout = Some(Duration::from_secs(30));

    let state = crate::build_state(&config).expect("state should build");

    assert_eq!(
        state.service.platform().registry,
        "registry.internal:5000"
    );
    assert_eq!(
        state.service.platform_info().domain,
        "temitayocharles.online"
    );
}
