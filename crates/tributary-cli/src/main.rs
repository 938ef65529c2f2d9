use std::{env, fs, process::Command, sync::PoisonError, time::Duration};

use clap::Parser;
use cli::{Args, Commands};
use context::CliContext;
use deps::show_dependencies;
use error::{CliError, CliResult, ErrorContext};
use list::list_packages;
use logging::setup_logging;
use sources::list_sources;
use tracing::{info, warn};
use tributary_config::{
    config::{self, config_path, generate_default_config, get_config, Config, CONFIG_PATH},
    error::ConfigError,
    utils::resolve_path,
};
use tributary_registry::{http_client::configure_http_client, RegistryError};
use ureq::Proxy;
use utils::disable_color;

mod cli;
mod context;
mod deps;
mod error;
mod list;
mod logging;
mod sources;
mod utils;

fn print_config(edit: Option<Option<String>>) -> CliResult<()> {
    let config_path = config_path();
    match edit {
        Some(editor) => {
            let editor = editor
                .or_else(|| env::var("EDITOR").ok())
                .unwrap_or_else(|| "vi".to_string());
            Command::new(&editor)
                .arg(&config_path)
                .status()
                .with_context(|| {
                    format!("executing command {} {}", editor, config_path.display())
                })?;
        }
        None => {
            let content = match fs::read_to_string(&config_path) {
                Ok(v) => v,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    warn!("Config file {} not found", config_path.display());
                    toml::to_string_pretty(&Config::default_config()).map_err(ConfigError::from)?
                }
                Err(err) => {
                    return Err(CliError::IoError {
                        action: "reading config".to_string(),
                        source: err,
                    });
                }
            };
            info!("{}", content);
        }
    }
    Ok(())
}

/// Loads the configuration and sets up the HTTP client for commands that
/// read package sources.
fn browse_context(proxy: Option<&str>, user_agent: Option<String>) -> CliResult<CliContext> {
    config::init()?;
    let config = get_config();

    let proxy = proxy.map(Proxy::new).transpose().map_err(RegistryError::from)?;
    let timeout = config.fetch_timeout.map(Duration::from_secs);

    configure_http_client(|client| {
        if proxy.is_some() {
            client.proxy = proxy;
        }
        if let Some(user_agent) = user_agent {
            client.user_agent = user_agent;
        }
        client.timeout = timeout;
    });

    Ok(CliContext::new(config))
}

fn handle_cli() -> CliResult<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        disable_color();
    }

    if let Some(ref c) = args.config {
        let path = resolve_path(c)?;
        *CONFIG_PATH.write().unwrap_or_else(PoisonError::into_inner) = path;
    }

    let Args {
        command,
        proxy,
        user_agent,
        ..
    } = args;
    let browse = || browse_context(proxy.as_deref(), user_agent.clone());

    match command {
        Commands::DefConfig => generate_default_config()?,
        Commands::Config {
            edit,
        } => print_config(edit)?,
        Commands::Env => {
            info!("TRIBUTARY_CONFIG={}", config_path().display());
        }
        Commands::Sources => list_sources(&browse()?)?,
        Commands::List {
            source,
        } => list_packages(&browse()?, source)?,
        Commands::Deps {
            id,
            source,
            no_fallback,
        } => show_dependencies(&browse()?, id, source, no_fallback)?,
    }

    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
