use std::fmt;

/// A `source` subcommand understood by the package manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceCommand {
    List,
    Add {
        name: String,
        locator: String,
        source_type: Option<String>,
    },
    Update,
    Export {
        name: Option<String>,
    },
}

impl SourceCommand {
    /// Renders the command as an argument vector for the package manager.
    ///
    /// Values are passed as separate arguments and never through a shell.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["source".to_string()];

        match self {
            SourceCommand::List => args.push("list".into()),
            SourceCommand::Add {
                name,
                locator,
                source_type,
            } => {
                args.extend(["add".into(), "-n".into(), name.clone(), "-a".into(), locator.clone()]);
                if let Some(source_type) = source_type {
                    args.extend(["-t".into(), source_type.clone()]);
                }
                args.push("--accept-source-agreements".into());
            }
            SourceCommand::Update => args.push("update".into()),
            SourceCommand::Export {
                name,
            } => {
                args.push("export".into());
                if let Some(name) = name {
                    args.extend(["-n".into(), name.clone()]);
                }
            }
        }

        args
    }
}

impl fmt::Display for SourceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args().join(" "))
    }
}
