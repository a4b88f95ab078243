//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

/// Track points for the things you do.
#[derive(Debug, Parser)]
#[command(name = "tally")]
#[command(about = "Track points for the things you do, with boosts and a daily log")]
#[command(version)]
pub struct Cli {
    /// Config file; `tally.yaml` in the working directory is used when present
    #[arg(long, global = true, env = "TALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the data directory from the config
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// What to do; shows today's dashboard when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show today's points, categories, boosts and actions
    Today,

    /// Show the daily log, newest first
    Log,

    /// Record one activation of an action
    Tap {
        /// Action id or name
        action: String,
    },

    /// Manage actions
    Action {
        /// Action subcommand
        #[command(subcommand)]
        command: ActionCommand,
    },

    /// Manage boosts (multipliers)
    Boost {
        /// Boost subcommand
        #[command(subcommand)]
        command: BoostCommand,
    },

    /// Restore the demo actions or boosts; daily scores are kept
    Reset {
        /// Which sequence to reset
        #[arg(value_enum)]
        target: ResetTarget,

        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Delete all actions, boosts and daily scores
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Check that every day's total matches its categories
    Verify,
}

/// Action subcommands.
#[derive(Debug, Subcommand)]
pub enum ActionCommand {
    /// List actions in display order
    List,

    /// Add an action at the end of the list
    Add {
        /// Display name
        name: String,

        /// Points per activation
        #[arg(short, long)]
        points: Decimal,

        /// Category; "Uncategorized" when omitted
        #[arg(short, long, default_value = "")]
        category: String,

        /// Colour as a CSS hex value
        #[arg(long, default_value = "")]
        color: String,
    },

    /// Change an action; omitted fields keep their value
    Edit {
        /// Action id or name
        action: String,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New points per activation
        #[arg(short, long)]
        points: Option<Decimal>,

        /// New category; past days keep the old one
        #[arg(short, long)]
        category: Option<String>,

        /// New colour
        #[arg(long)]
        color: Option<String>,
    },

    /// Remove an action; past days are kept
    Rm {
        /// Action id or name
        action: String,

        /// Confirm the removal
        #[arg(long)]
        yes: bool,
    },

    /// Move an action to a 1-based position
    Move {
        /// Action id or name
        action: String,

        /// Target position, starting at 1
        position: usize,
    },
}

/// Boost subcommands.
#[derive(Debug, Subcommand)]
pub enum BoostCommand {
    /// List boosts in display order
    List,

    /// Switch a boost on or off
    Toggle {
        /// Boost id or name
        multiplier: String,
    },

    /// Add an inactive boost at the end of the list
    Add {
        /// Display name
        name: String,

        /// Factor applied while active
        #[arg(short, long)]
        value: Decimal,

        /// Colour as a CSS hex value
        #[arg(long, default_value = "")]
        color: String,
    },

    /// Change a boost; omitted fields keep their value
    Edit {
        /// Boost id or name
        multiplier: String,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New factor
        #[arg(short, long)]
        value: Option<Decimal>,

        /// New colour
        #[arg(long)]
        color: Option<String>,
    },

    /// Remove a boost
    Rm {
        /// Boost id or name
        multiplier: String,

        /// Confirm the removal
        #[arg(long)]
        yes: bool,
    },

    /// Move a boost to a 1-based position
    Move {
        /// Boost id or name
        multiplier: String,

        /// Target position, starting at 1
        position: usize,
    },
}

/// Sequences that can be reset to the demo defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResetTarget {
    /// The action list
    Actions,
    /// The boost list
    Boosts,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::panic)]

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tally").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn no_subcommand_means_today() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn action_add_parses_decimal_points() {
        let cli = parse(&["action", "add", "Stretch", "--points", "2.5", "-c", "Health"]);
        let Some(Command::Action {
            command: ActionCommand::Add { name, points, category, .. },
        }) = cli.command
        else {
            panic!("expected action add");
        };
        assert_eq!(name, "Stretch");
        assert_eq!(points, Decimal::new(25, 1));
        assert_eq!(category, "Health");
    }

    #[test]
    fn reset_requires_known_target() {
        let cli = parse(&["reset", "boosts", "--yes"]);
        assert!(matches!(
            cli.command,
            Some(Command::Reset {
                target: ResetTarget::Boosts,
                yes: true
            })
        ));
        assert!(Cli::try_parse_from(["tally", "reset", "everything"]).is_err());
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = parse(&["log", "--data-dir", "/tmp/tally"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/tally")));
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
