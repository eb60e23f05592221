//! Integration tests for booting applications from config files

use std::path::Path;

use pretty_assertions::assert_eq;

use podium::template::TEMPLATING_SERVICE;
use podium::{App, AppConfig, Application, ConfigError, PodiumError, TemplatingConfig};

#[test]
fn test_fixture_config() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/app.toml");
    let config = AppConfig::from_file(&path).expect("Should parse");

    let expected = AppConfig::new()
        .with_name("fixture")
        .with_debug(true)
        .with_templating(TemplatingConfig::new("templates"))
        .with_parameter("greeting", "Hello");
    assert_eq!(config, expected);
}

#[test]
fn test_app_from_config() {
    let config = AppConfig::new()
        .with_name("shop")
        .with_templating(TemplatingConfig::new("views").with_extension("html"))
        .with_parameter("currency", "EUR")
        .with_parameter("locale", "fr_FR");
    let app = App::from_config(&config, Path::new("/srv/shop")).unwrap();

    assert_eq!(app.name(), "shop");
    let container = app.service_container().expect("container is bound");
    for id in [TEMPLATING_SERVICE, "param.currency", "param.locale"] {
        assert!(container.has(id), "missing service {}", id);
    }
    assert!(!container.has("param.missing"));
}

#[test]
fn test_config_errors_convert_to_framework_errors() {
    let err: PodiumError = AppConfig::from_str("[app]\nname = 42\n").unwrap_err().into();
    assert!(matches!(err, PodiumError::Config(ConfigError::ParseError(_))));
    assert!(err.to_string().starts_with("config error: Failed to parse config TOML"));
}
