use std::{io, sync::Mutex};

use crate::runner::{CommandRunner, ProcessOutput, RunnerError};

/// Scripted reply of a [`MockRunner`].
#[derive(Clone)]
pub enum MockReply {
    Output(ProcessOutput),
    LaunchFailure,
    IoFailure,
}

/// Runner double that records its invocations and returns a fixed reply.
pub struct MockRunner {
    reply: MockReply,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockRunner {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn output(exit_code: i32, stdout: &[&str]) -> Self {
        Self::new(MockReply::Output(ProcessOutput {
            exit_code,
            stdout: stdout.iter().map(|l| l.to_string()).collect(),
        }))
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for MockRunner {
    fn program(&self) -> &str {
        "winget"
    }

    fn run(&self, args: &[String]) -> Result<ProcessOutput, RunnerError> {
        self.calls.lock().unwrap().push(args.to_vec());

        match &self.reply {
            MockReply::Output(output) => Ok(output.clone()),
            MockReply::LaunchFailure => {
                Err(RunnerError::Launch {
                    program: self.program().to_string(),
                    source: io::Error::new(io::ErrorKind::NotFound, "program not found"),
                })
            }
            MockReply::IoFailure => {
                Err(RunnerError::Io {
                    program: self.program().to_string(),
                    source: io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
                })
            }
        }
    }
}
