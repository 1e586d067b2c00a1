use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use cli::{Args, Commands};
use list::list_sources;
use logging::setup_logging;
use sourcectl_config::{
    config::{self, generate_default_config, get_config, Config, CONFIG_PATH},
    error::ConfigError,
};
use sourcectl_core::{SourceManager, SourceResult};
use sourcectl_utils::path::resolve_path;
use tracing::{debug, info, warn};
use utils::COLOR;

mod cli;
mod list;
mod logging;
mod utils;

/// Applies the `--executable` flag on top of the loaded configuration.
fn effective_config(executable: Option<String>) -> SourceResult<Config> {
    let mut config = get_config();

    if let Some(executable) = executable {
        if executable.trim().is_empty() {
            return Err(ConfigError::EmptyExecutable.into());
        }
        config.executable = Some(executable);
    }

    Ok(config)
}

/// Picks the file `export -o` writes to: the given path, else `export_path`
/// from the config.
fn export_target(output: Option<String>, config: &Config) -> SourceResult<PathBuf> {
    match output {
        Some(path) => Ok(resolve_path(&path)?),
        None => {
            Ok(config
                .get_export_path()?
                .ok_or(ConfigError::MissingExportPath)?)
        }
    }
}

fn handle_cli() -> SourceResult<ExitCode> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        let mut color = COLOR.write()?;
        *color = false;
    }

    if let Some(ref c) = args.config {
        let mut config_path = CONFIG_PATH.write()?;
        *config_path = resolve_path(c)?;
    }

    if let Commands::DefConfig = args.command {
        generate_default_config()?;
        return Ok(ExitCode::SUCCESS);
    }

    config::init()?;
    let config = effective_config(args.executable)?;
    debug!("using package manager `{}`", config.executable());

    let manager = SourceManager::from_config(&config);

    match args.command {
        Commands::List => list_sources(&manager, args.json)?,
        Commands::Add {
            name,
            locator,
            source_type,
        } => {
            let source_type = source_type.or_else(|| config.default_source_type.clone());
            if !manager.add_source(&name, &locator, source_type.as_deref())? {
                warn!("Failed to add source {name}");
                return Ok(ExitCode::FAILURE);
            }
            info!("Added source {name}");
        }
        Commands::Update => {
            info!("Updating sources...");
            if !manager.update_sources()? {
                warn!("Failed to update sources");
                return Ok(ExitCode::FAILURE);
            }
            info!("Sources updated");
        }
        Commands::Export {
            name,
            output: None,
        } => {
            let exported = manager.export_sources(name.as_deref())?;
            if exported.is_empty() {
                warn!("Nothing was exported");
                return Ok(ExitCode::FAILURE);
            }
            println!("{exported}");
        }
        Commands::Export {
            name,
            output: Some(output),
        } => {
            let path = export_target(output, &config)?;
            if !manager.export_sources_to_file(&path, name.as_deref())? {
                warn!("Nothing was exported");
                return Ok(ExitCode::FAILURE);
            }
            info!("Exported sources to {}", path.display());
        }
        Commands::Config => {
            let content = toml::to_string_pretty(&config).map_err(ConfigError::from)?;
            info!(
                "# {}\n{}",
                CONFIG_PATH.read()?.display(),
                content.trim_end()
            );
        }
        Commands::DefConfig => unreachable!(),
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
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

    match handle_cli() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::FAILURE
        }
    }
}
