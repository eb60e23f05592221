//! Integration tests for service resolution and rendering through controllers

use std::error::Error as _;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serde_json::json;

use podium::container::{LookupError, Service, ServiceContainer};
use podium::template::{TemplateError, TEMPLATING_SERVICE};
use podium::{
    App, AppAware, AppConfig, Application, BaseController, Controller, PodiumError,
    TemplateEngine, Variables,
};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_app() -> App {
    let path = fixtures().join("app.toml");
    let config = AppConfig::from_file(&path).expect("Fixture config should parse");
    App::from_config(&config, &fixtures()).expect("Fixture app should build")
}

fn vars(value: serde_json::Value) -> Variables {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("variables must be an object"),
    }
}

/// Engine echoing its arguments, so delegation can be checked exactly
struct Recorder;

impl TemplateEngine for Recorder {
    fn render(&self, name: &str, variables: &Variables) -> Result<String, TemplateError> {
        Ok(format!("{}|{}", name, serde_json::Value::Object(variables.clone())))
    }
}

struct UserController<'app> {
    app: &'app dyn Application,
}

impl<'app> AppAware<'app> for UserController<'app> {
    fn app(&self) -> &'app dyn Application {
        self.app
    }
}

impl<'app> Controller<'app> for UserController<'app> {}

impl UserController<'_> {
    fn show(&self, name: &str, posts: u32) -> podium::Result<String> {
        self.render("users/show", &vars(json!({"user": {"name": name, "posts": posts}})))
    }
}

#[test]
fn test_no_container_is_configuration_error() {
    let app = App::new("bare");
    let controller = BaseController::new(&app);

    for id in ["templating", "db", ""] {
        let err = controller.get_service(id).unwrap_err();
        assert!(matches!(err, PodiumError::Configuration(_)));
        assert_eq!(err.to_string(), "No service container defined in application");
    }
}

#[test]
fn test_missing_service_is_container_error() {
    let app = App::new("wired").with_container(ServiceContainer::new());
    let controller = BaseController::new(&app);

    let err = controller.get_service("db").unwrap_err();
    match &err {
        PodiumError::Container { id, source } => {
            assert_eq!(id, "db");
            assert!(matches!(source, LookupError::NotFound { id } if id == "db"));
        }
        other => panic!("expected container error, got {:?}", other),
    }
    let cause = err.source().expect("cause is chained");
    assert_eq!(cause.to_string(), "service not found: db");
}

#[test]
fn test_construction_failure_is_chained() {
    let mut container = ServiceContainer::new();
    container
        .register_factory("db", |_| {
            Err(LookupError::construction("db", "connection refused"))
        })
        .unwrap();
    let app = App::new("wired").with_container(container);
    let controller = BaseController::new(&app);

    let err = controller.get_service("db").unwrap_err();
    let lookup = err.lookup_error().expect("container error");
    assert!(matches!(lookup, LookupError::Construction { .. }));
    let root = lookup.source().expect("factory failure is kept");
    assert_eq!(root.to_string(), "connection refused");
}

#[test]
fn test_circular_factories_are_container_errors() {
    let mut container = ServiceContainer::new();
    container
        .register_factory("mailer", |r| r.get("transport"))
        .unwrap();
    container
        .register_factory("transport", |r| r.get("mailer"))
        .unwrap();
    let app = App::new("wired").with_container(container);
    let controller = BaseController::new(&app);

    let err = controller.get_service("mailer").unwrap_err();
    assert!(matches!(
        err.lookup_error(),
        Some(LookupError::CircularDependency { chain }) if chain == "mailer -> transport -> mailer"
    ));
}

#[test]
fn test_lazy_service_identity_is_stable() {
    let mut container = ServiceContainer::new();
    container
        .register_factory("clock", |_| Ok(Service::new(1_700_000_000u64)))
        .unwrap();
    let app = App::new("wired").with_container(container);

    let first = BaseController::new(&app).get_service("clock").unwrap();
    let second = BaseController::new(&app).get_service("clock").unwrap();
    assert!(first.ptr_eq(&second));
}

#[test]
fn test_render_returns_engine_output_verbatim() {
    let mut container = ServiceContainer::new();
    container
        .register(TEMPLATING_SERVICE, Service::template_engine(Recorder))
        .unwrap();
    let app = App::new("wired").with_container(container);
    let controller = BaseController::new(&app);

    assert_eq!(
        controller
            .render("home.tpl", &vars(json!({"user": "Alice"})))
            .unwrap(),
        r#"home.tpl|{"user":"Alice"}"#
    );
    assert_eq!(controller.render_empty("home.tpl").unwrap(), "home.tpl|{}");
}

#[test]
fn test_render_with_wrong_service_type() {
    let mut container = ServiceContainer::new();
    container
        .register(TEMPLATING_SERVICE, Service::new(String::from("not an engine")))
        .unwrap();
    let app = App::new("wired").with_container(container);
    let controller = BaseController::new(&app);

    let err = controller.render_empty("home").unwrap_err();
    assert!(err.is_configuration());
    let message = err.to_string();
    assert!(message.starts_with(r#"Service "templating" must implement the TemplateEngine capability"#));
    assert!(message.contains("String"));
}

#[test]
fn test_render_fixture_templates() {
    let app = fixture_app();
    let controller = BaseController::new(&app);

    let output = controller
        .render("home", &vars(json!({"user": "Alice"})))
        .unwrap();
    assert_eq!(output, "Hello Alice!\n");
}

#[test]
fn test_concrete_controller_renders_nested_template() {
    let app = fixture_app();
    let controller = UserController { app: &app };

    assert_eq!(
        controller.show("Bob", 12).unwrap(),
        "<h1>Bob</h1><p>12 posts</p>\n"
    );
}

#[test]
fn test_template_failures_surface_as_template_errors() {
    let app = fixture_app();
    let controller = BaseController::new(&app);

    let missing = controller.render_empty("nowhere").unwrap_err();
    assert!(matches!(
        missing,
        PodiumError::Template(TemplateError::NotFound { .. })
    ));

    let broken = controller.render_empty("broken").unwrap_err();
    assert!(matches!(
        broken,
        PodiumError::Template(TemplateError::Syntax { .. })
    ));

    let unbound = controller.render_empty("home").unwrap_err();
    assert!(matches!(
        unbound,
        PodiumError::Template(TemplateError::MissingVariable { .. })
    ));
}

#[test]
fn test_fixture_parameters_are_services() {
    let app = fixture_app();
    let controller = BaseController::new(&app);

    let greeting = controller.get_service("param.greeting").unwrap();
    assert_eq!(greeting.downcast_ref::<String>().map(String::as_str), Some("Hello"));
}

#[test]
fn test_controllers_refuse_snapshots() {
    let app = fixture_app();
    let controller = BaseController::new(&app);

    let json_err = serde_json::to_string(&controller).unwrap_err();
    assert!(json_err.to_string().contains("Unable to serialize a Controller object"));

    let toml_err = toml::to_string(&controller).unwrap_err();
    assert!(toml_err.to_string().contains("Unable to serialize a Controller object"));

    assert!(UserController { app: &app }.snapshot().unwrap_err().is_usage());
}
