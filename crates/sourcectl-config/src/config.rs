use std::{
    fs,
    path::PathBuf,
    sync::{LazyLock, RwLock},
};

use documented::{Documented, DocumentedFields};
use serde::{Deserialize, Serialize};
use sourcectl_utils::path::{resolve_path, xdg_config_home};
use toml_edit::DocumentMut;
use tracing::{debug, info};

use crate::{
    annotations::annotate_toml_table,
    error::{ConfigError, Result},
};

pub const DEFAULT_EXECUTABLE: &str = "winget";

/// Application's configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct Config {
    /// Name or path of the package-manager executable used for `source` commands.
    /// Can be overridden with the SOURCECTL_EXECUTABLE environment variable.
    /// Default: "winget"
    pub executable: Option<String>,

    /// Source type passed to `add` when none is given on the command line
    /// (e.g. "Microsoft.PreIndexed.Package" or "Microsoft.Rest").
    pub default_source_type: Option<String>,

    /// File written by `export --output` when no explicit path is given.
    /// Supports `~`, `$VAR` and `${VAR}` expansion.
    pub export_path: Option<String>,
}

pub static CONFIG: LazyLock<RwLock<Option<Config>>> = LazyLock::new(|| RwLock::new(None));

pub static CONFIG_PATH: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| {
    RwLock::new(match std::env::var("SOURCECTL_CONFIG") {
        Ok(path_str) => PathBuf::from(path_str),
        Err(_) => xdg_config_home().join("sourcectl").join("config.toml"),
    })
});

pub fn init() -> Result<()> {
    let config = Config::new()?;
    let mut global_config = CONFIG.write().unwrap();
    *global_config = Some(config);
    Ok(())
}

pub fn get_config() -> Config {
    let config_guard = CONFIG.read().unwrap();
    config_guard.clone().unwrap_or_else(Config::default_config)
}

impl Config {
    pub fn default_config() -> Self {
        Self {
            executable: Some(DEFAULT_EXECUTABLE.to_string()),
            default_source_type: None,
            export_path: None,
        }
    }

    /// Creates a new configuration by loading it from the configuration file.
    /// If the configuration file is not found, it uses the default configuration.
    pub fn new() -> Result<Self> {
        let config_path = CONFIG_PATH.read().unwrap().to_path_buf();
        Self::load_from(config_path)
    }

    pub fn load_from(config_path: PathBuf) -> Result<Self> {
        let mut config = match fs::read_to_string(&config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    "config file {} not found, using defaults",
                    config_path.display()
                );
                Self::default_config()
            }
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.resolve()?;

        Ok(config)
    }

    pub fn resolve(&mut self) -> Result<()> {
        if let Ok(executable) = std::env::var("SOURCECTL_EXECUTABLE") {
            self.executable = Some(executable);
        }

        match self.executable.as_deref().map(str::trim) {
            Some("") => return Err(ConfigError::EmptyExecutable),
            Some(_) => {}
            None => self.executable = Some(DEFAULT_EXECUTABLE.to_string()),
        }

        Ok(())
    }

    pub fn executable(&self) -> &str {
        self.executable
            .as_deref()
            .map(str::trim)
            .unwrap_or(DEFAULT_EXECUTABLE)
    }

    pub fn get_export_path(&self) -> Result<Option<PathBuf>> {
        self.export_path
            .as_deref()
            .map(|path| resolve_path(path).map_err(ConfigError::from))
            .transpose()
    }

    pub fn to_annotated_document(&self) -> Result<DocumentMut> {
        let toml_string = toml::to_string_pretty(self)?;
        let mut doc = toml_string.parse::<DocumentMut>()?;

        annotate_toml_table::<Config>(doc.as_table_mut())?;

        Ok(doc)
    }
}

pub fn generate_default_config() -> Result<()> {
    let config_path = CONFIG_PATH.read().unwrap().to_path_buf();
    generate_default_config_at(config_path)
}

pub fn generate_default_config_at(config_path: PathBuf) -> Result<()> {
    if config_path.exists() {
        return Err(ConfigError::ConfigAlreadyExists);
    }

    let annotated_doc = Config::default_config().to_annotated_document()?;
    sourcectl_utils::fs::write_file(&config_path, &annotated_doc.to_string())?;

    info!(
        "Default configuration file generated with documentation at: {}",
        config_path.display()
    );
    Ok(())
}
