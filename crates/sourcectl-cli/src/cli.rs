use clap::{ArgAction, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<String>,

    /// Package manager executable to run instead of the configured one
    #[arg(short, long, global = true, value_hint = ValueHint::CommandName)]
    pub executable: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the configuration file to stdout
    Config,

    /// List installed sources
    #[clap(name = "list", visible_alias = "ls")]
    List,

    /// Add a new source
    ///
    /// Usually requires administrator rights.
    #[command(arg_required_else_help = true)]
    #[clap(name = "add")]
    Add {
        /// Name to register the source under
        #[arg(required = true)]
        name: String,

        /// Locator of the source, usually a URL
        #[arg(required = true)]
        locator: String,

        /// Source type, e.g. Microsoft.Rest
        ///
        /// Falls back to `default_source_type` from the config
        #[arg(required = false, short = 't', long = "type")]
        source_type: Option<String>,
    },

    /// Update all sources
    #[clap(name = "update")]
    Update,

    /// Export sources as JSON
    #[clap(name = "export")]
    Export {
        /// Export only the source with this name
        #[arg(required = false, short, long)]
        name: Option<String>,

        /// Write the export to a file instead of stdout
        ///
        /// Without a value, `export_path` from the config is used
        #[arg(required = false, short, long, num_args = 0..=1, value_hint = ValueHint::FilePath)]
        output: Option<Option<String>>,
    },

    /// Generate default config
    #[clap(name = "defconfig")]
    DefConfig,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_type() {
        let args = Args::parse_from([
            "sourcectl",
            "add",
            "msstore",
            "https://storeedgefd.dsx.mp.microsoft.com/v9.0",
            "-t",
            "Microsoft.Rest",
        ]);

        match args.command {
            Commands::Add {
                name,
                locator,
                source_type,
            } => {
                assert_eq!(name, "msstore");
                assert_eq!(locator, "https://storeedgefd.dsx.mp.microsoft.com/v9.0");
                assert_eq!(source_type.as_deref(), Some("Microsoft.Rest"));
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn test_parse_export_output_without_value() {
        let args = Args::parse_from(["sourcectl", "export", "-o"]);
        assert!(matches!(
            args.command,
            Commands::Export {
                name: None,
                output: Some(None)
            }
        ));

        let args = Args::parse_from(["sourcectl", "export", "-n", "winget", "-o", "out.json"]);
        match args.command {
            Commands::Export {
                name,
                output,
            } => {
                assert_eq!(name.as_deref(), Some("winget"));
                assert_eq!(output, Some(Some("out.json".to_string())));
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::parse_from(["sourcectl", "ls", "-vv", "--json", "-e", "wingetcreate"]);
        assert!(matches!(args.command, Commands::List));
        assert_eq!(args.verbose, 2);
        assert!(args.json);
        assert_eq!(args.executable.as_deref(), Some("wingetcreate"));
    }
}
