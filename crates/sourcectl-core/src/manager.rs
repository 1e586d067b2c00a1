use std::path::Path;

use sourcectl_config::config::Config;
use tracing::{debug, warn};

use crate::{
    command::SourceCommand,
    error::SourceError,
    runner::{CommandRunner, ProcessOutput, RunnerError, SystemCommandRunner},
    source::Source,
    table::{FixedWidthTableParser, SourceTableParser},
    SourceResult,
};

const LIST_FAILED: &str = "Getting installed sources failed.";
const ADD_FAILED: &str = "Adding source failed.";
const UPDATE_FAILED: &str = "Updating sources failed.";
const EXPORT_FAILED: &str = "Exporting sources failed.";

/// Manages the sources registered with the package manager.
///
/// Every call launches a fresh process through the [`CommandRunner`]; nothing
/// is cached between calls. A tool that runs but exits with a non-zero code is
/// reported through the return value (`false`, an empty string or an empty
/// list), whereas a tool that cannot be started is an error.
pub struct SourceManager<R, P = FixedWidthTableParser> {
    runner: R,
    parser: P,
}

impl SourceManager<SystemCommandRunner> {
    /// Creates a manager that runs the executable named in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(SystemCommandRunner::new(config.executable()))
    }
}

impl<R: CommandRunner> SourceManager<R> {
    pub fn new(runner: R) -> Self {
        Self::with_parser(runner, FixedWidthTableParser)
    }
}

impl<R: CommandRunner, P: SourceTableParser> SourceManager<R, P> {
    pub fn with_parser(runner: R, parser: P) -> Self {
        Self {
            runner,
            parser,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Lists the installed sources in the order the package manager prints them.
    ///
    /// # Errors
    ///
    /// * [`SourceError::ToolNotInstalled`] if the package manager cannot be started
    /// * [`SourceError::Parse`] if the output is not a recognizable source table
    /// * [`SourceError::ActionFailed`] for any other invocation failure
    pub fn list_sources(&self) -> SourceResult<Vec<Source>> {
        let output = self.execute(&SourceCommand::List, LIST_FAILED)?;
        if !output.success() {
            return Ok(Vec::new());
        }

        let sources = self.parser.parse(&output.stdout)?;
        debug!(count = sources.len(), "listed sources");
        Ok(sources)
    }

    /// Adds a new source. Usually requires administrator rights.
    ///
    /// Some sources, like `msstore`, can only be added with an explicit
    /// `source_type`.
    pub fn add_source(
        &self,
        name: &str,
        locator: &str,
        source_type: Option<&str>,
    ) -> SourceResult<bool> {
        let command = SourceCommand::Add {
            name: name.to_string(),
            locator: locator.to_string(),
            source_type: source_type.map(String::from),
        };
        let output = self.execute(&command, ADD_FAILED)?;
        Ok(output.success())
    }

    /// Updates all installed sources. This may take a while.
    pub fn update_sources(&self) -> SourceResult<bool> {
        let output = self.execute(&SourceCommand::Update, UPDATE_FAILED)?;
        Ok(output.success())
    }

    /// Exports all sources, or only `name`, as the package manager's JSON text.
    ///
    /// The text is returned as-is after trimming; it is not parsed or
    /// validated. An empty string means the export reported failure.
    pub fn export_sources(&self, name: Option<&str>) -> SourceResult<String> {
        let command = SourceCommand::Export {
            name: name.map(String::from),
        };
        let output = self.execute(&command, EXPORT_FAILED)?;
        if !output.success() {
            return Ok(String::new());
        }

        Ok(output.joined_stdout())
    }

    /// Exports sources like [`export_sources`](Self::export_sources) and writes
    /// the text to `path`, replacing any existing file.
    ///
    /// Returns `false` without touching `path` when the export failed or
    /// produced no output.
    pub fn export_sources_to_file(
        &self,
        path: impl AsRef<Path>,
        name: Option<&str>,
    ) -> SourceResult<bool> {
        let path = path.as_ref();
        let exported = self.export_sources(name)?;
        if exported.is_empty() {
            warn!("nothing exported, leaving {} untouched", path.display());
            return Ok(false);
        }

        sourcectl_utils::fs::write_file(path, &exported)
            .map_err(|err| SourceError::action_failed(EXPORT_FAILED, err))?;
        debug!("exported sources to {}", path.display());
        Ok(true)
    }

    fn execute(&self, command: &SourceCommand, action: &str) -> SourceResult<ProcessOutput> {
        let output = self.runner.run(&command.args()).map_err(|err| {
            match err {
                RunnerError::Launch {
                    program,
                    source,
                } => {
                    debug!("failed to launch {}: {}", program, source);
                    SourceError::ToolNotInstalled {
                        program,
                    }
                }
                other => SourceError::action_failed(action, other),
            }
        })?;

        if !output.success() {
            warn!(
                "`{} {}` exited with code {}",
                self.runner.program(),
                command,
                output.exit_code
            );
        }

        Ok(output)
    }
}
