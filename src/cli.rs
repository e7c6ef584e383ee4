use crate::kiosk::RedactProfile;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kioskforge")]
#[command(author = "The KioskForge Team")]
#[command(version)]
#[command(about = "Create kiosk definitions and forge Linux kiosk machines from them", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Do not copy progress to the system log
    #[arg(long, global = true, env = "KIOSKFORGE_NO_SYSLOG")]
    pub no_syslog: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new kiosk file with default settings and a random password
    Create {
        /// Kiosk file to create (must end in .kiosk)
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a kiosk file and report consistency warnings
    Check {
        /// Kiosk file to check
        path: PathBuf,
    },

    /// Show the settings of a kiosk file
    Show {
        /// Kiosk file to show
        path: PathBuf,

        /// Print the settings as JSON
        #[arg(long)]
        json: bool,

        /// Show passwords instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// Change settings in a kiosk file
    Set {
        /// Kiosk file to change
        path: PathBuf,

        /// Assignments of the form name=value
        #[arg(required = true, value_name = "NAME=VALUE")]
        assignments: Vec<String>,
    },

    /// Edit a kiosk file interactively
    Edit {
        /// Kiosk file to edit
        path: PathBuf,
    },

    /// Write a copy of a kiosk file with sensitive settings hidden
    Redact {
        /// Kiosk file to read
        path: PathBuf,

        /// Redacted copy to write
        output: PathBuf,

        /// Which settings to hide
        #[arg(short, long, value_enum, default_value = "report")]
        profile: RedactProfile,
    },

    /// List the provisioning steps a kiosk file produces
    Steps {
        /// Kiosk file to plan for
        path: PathBuf,

        /// Home folder of the kiosk user
        #[arg(long, default_value = "/home/kiosk")]
        home: PathBuf,
    },

    /// Forge this machine into a kiosk (Linux, root only)
    Setup {
        /// Kiosk file to forge from
        path: PathBuf,

        /// Step to resume from, as printed by an aborted run
        resume: Option<usize>,

        /// Do not reboot when done
        #[arg(long)]
        no_reboot: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_setup_with_resume() {
        let cli = Cli::parse_from(["kioskforge", "setup", "lobby.kiosk", "17"]);
        match cli.command {
            Command::Setup {
                path,
                resume,
                no_reboot,
            } => {
                assert_eq!(path, PathBuf::from("lobby.kiosk"));
                assert_eq!(resume, Some(17));
                assert!(!no_reboot);
            }
            _ => panic!("expected setup"),
        }
    }

    #[test]
    fn test_parse_redact_profile() {
        let cli = Cli::parse_from(["kioskforge", "redact", "a.kiosk", "b.kiosk", "-p", "prepare"]);
        assert!(matches!(
            cli.command,
            Command::Redact {
                profile: RedactProfile::Prepare,
                ..
            }
        ));
    }

    #[test]
    fn test_set_requires_assignments() {
        assert!(Cli::try_parse_from(["kioskforge", "set", "a.kiosk"]).is_err());
    }
}
