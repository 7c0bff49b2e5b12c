use clap::{crate_version, ArgEnum, Parser, Subcommand};

#[derive(Clone, Parser)]
#[clap(name = "papyrus")]
#[clap(bin_name = "papyrus")]
#[clap(version = crate_version!())]
pub struct PapyrusArgs {
    #[clap(long, arg_enum, global = true, default_value = "auto")]
    pub colors: Colors,
    /// Enable a verbose (debug-level) logging format.
    #[clap(long, global = true)]
    pub verbose: bool,
    /// Enable logging spans.
    #[clap(long, global = true)]
    pub log_spans: bool,
    #[clap(subcommand)]
    pub cmd: RootCommand,
}

#[derive(Clone, Subcommand)]
pub enum RootCommand {
    /// Format one or more Papyrus scripts.
    Format(FormatCommand),
    /// Configuration file operations.
    Config {
        #[clap(subcommand)]
        cmd: ConfigCommand,
    },
    /// Print the CLI's version.
    Version,
}

#[derive(Clone, clap::Args)]
pub struct FormatCommand {
    /// Files to format.
    #[clap(required = true)]
    pub files: Vec<String>,
    /// Use tabs for indentation instead of spaces.
    #[clap(short = 't', long, conflicts_with = "indent")]
    pub tabs: bool,
    /// Emit LF line endings instead of CRLF.
    #[clap(short = 'u', long)]
    pub unix: bool,
    /// Spaces per indentation level.
    #[clap(short = 'i', long, conflicts_with = "tabs")]
    pub indent: Option<u64>,
    /// Exit nonzero instead of writing if a file would change.
    #[clap(long)]
    pub check: bool,
}

#[derive(Clone, Subcommand)]
pub enum ConfigCommand {
    /// Print the configuration file's JSON schema.
    Schema,
    /// Write a starter configuration file.
    Init {
        #[clap(long, default_value = "papyrus.toml")]
        output: String,
    },
}

#[derive(Clone, Copy, ArgEnum)]
pub enum Colors {
    /// Determine whether to colorize output automatically.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_files_and_flags() {
        let args = PapyrusArgs::parse_from(["papyrus", "format", "-t", "--check", "a.psc", "b.psc"]);
        match args.cmd {
            RootCommand::Format(cmd) => {
                assert_eq!(cmd.files, vec!["a.psc", "b.psc"]);
                assert!(cmd.tabs);
                assert!(cmd.check);
                assert!(cmd.indent.is_none());
            }
            _ => panic!("expected Format, got a different command"),
        }
    }

    #[test]
    fn tabs_and_indent_conflict() {
        let result = PapyrusArgs::try_parse_from(["papyrus", "format", "-t", "-i", "4", "a.psc"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_init_defaults_output_path() {
        let args = PapyrusArgs::parse_from(["papyrus", "config", "init"]);
        match args.cmd {
            RootCommand::Config {
                cmd: ConfigCommand::Init { output },
            } => assert_eq!(output, "papyrus.toml"),
            _ => panic!("expected Config Init"),
        }
    }

    #[test]
    fn version_subcommand_parses() {
        let args = PapyrusArgs::parse_from(["papyrus", "version"]);
        assert!(matches!(args.cmd, RootCommand::Version));
    }
}
