use std::process::{Command, Stdio};

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, trace};

/// Exit status and captured standard output of a finished process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code reported by the process, `-1` if it was killed by a signal.
    pub exit_code: i32,

    /// Standard output split into lines, without line terminators.
    pub stdout: Vec<String>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Concatenates all stdout lines without separators and trims the result.
    pub fn joined_stdout(&self) -> String {
        self.stdout.concat().trim().to_string()
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum RunnerError {
    #[error("Failed to launch `{program}`: {source}")]
    #[diagnostic(code(sourcectl::runner::launch))]
    Launch {
        program: String,
        source: std::io::Error,
    },

    #[error("Failed to collect output of `{program}`: {source}")]
    #[diagnostic(code(sourcectl::runner::io))]
    Io {
        program: String,
        source: std::io::Error,
    },
}

/// Executes the package manager with a list of arguments.
pub trait CommandRunner: Send + Sync {
    /// Program this runner launches, used in diagnostics.
    fn program(&self) -> &str;

    fn run(&self, args: &[String]) -> Result<ProcessOutput, RunnerError>;
}

/// [`CommandRunner`] backed by [`std::process::Command`].
#[derive(Clone, Debug)]
pub struct SystemCommandRunner {
    program: String,
}

impl SystemCommandRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[String]) -> Result<ProcessOutput, RunnerError> {
        debug!("running {} {}", self.program, args.join(" "));

        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| {
                RunnerError::Launch {
                    program: self.program.clone(),
                    source: err,
                }
            })?;

        let output = child.wait_with_output().map_err(|err| {
            RunnerError::Io {
                program: self.program.clone(),
                source: err,
            }
        })?;

        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = split_lines(&String::from_utf8_lossy(&output.stdout));
        trace!(exit_code, lines = stdout.len(), "{} finished", self.program);

        Ok(ProcessOutput {
            exit_code,
            stdout,
        })
    }
}

/// Splits captured output into lines, dropping `\r\n` terminators.
fn split_lines(output: &str) -> Vec<String> {
    output.lines().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_handles_crlf() {
        assert_eq!(
            split_lines("Name   URL\r\n----  ----\r\nfoo   http://a\r\n"),
            ["Name   URL", "----  ----", "foo   http://a"]
        );
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_joined_stdout_concatenates_and_trims() {
        let output = ProcessOutput {
            exit_code: 0,
            stdout: vec!["  {\"Sources\":".into(), "[]}  ".into(), "".into()],
        };
        assert!(output.success());
        assert_eq!(output.joined_stdout(), "{\"Sources\":[]}");
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let runner = SystemCommandRunner::new("sourcectl-definitely-not-a-real-program");
        let result = runner.run(&["source".into(), "list".into()]);
        assert!(matches!(result, Err(RunnerError::Launch { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout_and_exit_code() {
        let runner = SystemCommandRunner::new("sh");
        let output = runner
            .run(&["-c".into(), "printf 'a\\nb\\n'; exit 3".into()])
            .unwrap();
        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stdout, ["a", "b"]);
        assert!(!output.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_stderr_is_not_captured() {
        let runner = SystemCommandRunner::new("sh");
        let output = runner
            .run(&["-c".into(), "echo visible; echo hidden >&2".into()])
            .unwrap();
        assert_eq!(output.stdout, ["visible"]);
        assert!(output.success());
    }
}
