use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "kinephase CLI - kinematic thresholds, phase-space limits and allowed-region checks for lepton-nucleon and lepton-nucleus scattering.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the energy threshold of the interaction.
    Threshold(QueryArgs),
    /// Print the limits of W, Q2, q2, x, y and t for the interaction.
    Limits(QueryArgs),
    /// Check whether the running kinematics lie inside the allowed region.
    Allowed(QueryArgs),
}

/// Arguments shared by every query subcommand.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Path to the TOML file describing the interaction.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Override the probe energy (GeV) from the config file.
    #[arg(short, long, value_name = "GEV")]
    pub energy: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn limits_accepts_an_energy_override() {
        let cli = Cli::try_parse_from([
            "kinephase", "-vv", "limits", "--config", "numu.toml", "--energy", "2.5",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Limits(args) => {
                assert_eq!(args.config, PathBuf::from("numu.toml"));
                assert_eq!(args.energy, Some(2.5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["kinephase", "-q", "-v", "threshold", "-c", "a.toml"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_is_required() {
        assert!(Cli::try_parse_from(["kinephase", "allowed"]).is_err());
    }
}
