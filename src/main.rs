//! Podium CLI
//!
//! Boots an application from its config and renders one template through a
//! controller.
//!
//! Usage:
//!   podium [OPTIONS] <TEMPLATE>
//!
//! Options:
//!   -c, --config <FILE>     Application config (TOML format)
//!   -t, --templates <DIR>   Template directory, overrides the config
//!       --var <KEY=VALUE>   Template variable, value parsed as JSON when possible
//!   -v, --verbose           Log resolution and rendering details
//!   -h, --help              Print help

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use podium::{
    forbid_snapshot, App, AppAware, AppConfig, Application, Controller, PodiumError,
    TemplatingConfig, Variables,
};

#[derive(Parser)]
#[command(name = "podium")]
#[command(about = "Render a template through an application's controller")]
struct Cli {
    /// Template name
    template: String,

    /// Application config (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Template directory, overrides the config
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Template variable as KEY=VALUE (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_variable)]
    vars: Vec<(String, Value)>,

    /// Log resolution and rendering details
    #[arg(short, long)]
    verbose: bool,
}

/// Controller rendering a single page
struct PageController<'app> {
    app: &'app dyn Application,
}

impl<'app> PageController<'app> {
    fn new(app: &'app dyn Application) -> Self {
        Self { app }
    }

    fn show(&self, template: &str, variables: &Variables) -> podium::Result<String> {
        self.render(template, variables)
    }
}

impl<'app> AppAware<'app> for PageController<'app> {
    fn app(&self) -> &'app dyn Application {
        self.app
    }
}

impl<'app> Controller<'app> for PageController<'app> {}

impl Serialize for PageController<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        forbid_snapshot(serializer)
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (config, base_dir) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    };

    let app = match App::from_config(&config, &base_dir) {
        Ok(app) => app,
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    };

    let variables: Variables = cli.vars.into_iter().collect();
    let controller = PageController::new(&app);
    match controller.show(&cli.template, &variables) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load the config and the directory relative template paths resolve against
fn load_config(cli: &Cli) -> Result<(AppConfig, PathBuf), PodiumError> {
    let (mut config, mut base_dir) = match &cli.config {
        Some(path) => (
            AppConfig::from_file(path)?,
            path.parent().map(Path::to_path_buf).unwrap_or_default(),
        ),
        None => (AppConfig::default(), PathBuf::new()),
    };

    if let Some(dir) = &cli.templates {
        let extension = config
            .templating
            .as_ref()
            .map(|t| t.extension.clone())
            .unwrap_or_else(|| podium::template::DEFAULT_EXTENSION.to_string());
        config = config.with_templating(TemplatingConfig::new(dir).with_extension(extension));
        base_dir = PathBuf::new();
    }

    Ok((config, base_dir))
}

/// Parse a `KEY=VALUE` argument; values that are not valid JSON become strings
fn parse_variable(arg: &str) -> Result<(String, Value), String> {
    let (key, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", arg))?;
    if key.is_empty() {
        return Err(format!("empty variable name in '{}'", arg));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

fn report(error: &PodiumError) {
    eprintln!("Error: {}", error);
    let mut source = error.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}
