//! Command-line surface of the `tikpublish` binary.

mod commands;
mod output;

pub use commands::run;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

use tikpublish::application::{AccountBookError, VerificationError};
use tikpublish::config::ConfigError;
use tikpublish::domain::foundation::ValidationError;
use tikpublish::domain::publish::{JobError, PublishError};
use tikpublish::ports::{ApiError, MediaReadError};

/// Publish videos to several TikTok accounts through the Content Posting API.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage stored creator accounts
    #[command(subcommand)]
    Account(AccountCommand),

    /// OAuth helpers
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Publish one job per --file / --url
    Publish(PublishArgs),
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Store a new account
    Add {
        /// Bearer token issued for the creator
        #[arg(long)]
        token: String,

        /// Display label
        #[arg(long, default_value = "")]
        label: String,

        /// Query creator info right away
        #[arg(long)]
        verify: bool,
    },

    /// List stored accounts
    List {
        /// Print the stored records as JSON (tokens redacted)
        #[arg(long)]
        json: bool,
    },

    /// Rename an account
    SetLabel { id: String, label: String },

    /// Replace an account's token; clears its verification
    SetToken { id: String, token: String },

    /// Delete an account
    Remove { id: String },

    /// Query creator info for one account, or all with --all
    Verify {
        #[arg(required_unless_present = "all")]
        id: Option<String>,

        #[arg(long, conflicts_with = "id")]
        all: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Exchange an authorization code for a bearer token
    Exchange {
        /// Code from the OAuth callback
        #[arg(long)]
        code: String,

        #[arg(long, env = "TIKPUBLISH__OAUTH__CLIENT_KEY")]
        client_key: Option<String>,

        #[arg(long, env = "TIKPUBLISH__OAUTH__CLIENT_SECRET", hide_env_values = true)]
        client_secret: Option<String>,

        #[arg(long, env = "TIKPUBLISH__OAUTH__REDIRECT_URI")]
        redirect_uri: Option<String>,

        /// Store the token as a new account with this label
        #[arg(long)]
        store_as: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Caption for every job
    #[arg(long)]
    pub title: String,

    /// Account id; defaults to the first stored account
    #[arg(long)]
    pub account: Option<String>,

    /// Local video to upload (repeatable)
    #[arg(long = "file")]
    pub files: Vec<PathBuf>,

    /// Public video URL for TikTok to pull (repeatable)
    #[arg(long = "url")]
    pub urls: Vec<String>,

    /// Privacy level; defaults to the account's first option
    #[arg(long)]
    pub privacy: Option<String>,

    #[arg(long)]
    pub disable_comment: bool,

    #[arg(long)]
    pub disable_duet: bool,

    #[arg(long)]
    pub disable_stitch: bool,

    /// Cover frame offset in milliseconds
    #[arg(long)]
    pub cover_ms: Option<u64>,
}

/// Errors surfaced by the binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Accounts(#[from] AccountBookError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Media(#[from] MediaReadError),

    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    #[error("{0}")]
    Usage(String),

    #[error("{failed} of {total} jobs failed")]
    JobsFailed { failed: usize, total: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn publish_accepts_repeated_sources() {
        let cli = Cli::parse_from([
            "tikpublish", "publish", "--title", "Hi", "--file", "a.mp4", "--url",
            "https://x/b.mp4", "--url", "https://x/c.mp4",
        ]);
        match cli.command {
            Command::Publish(args) => {
                assert_eq!(args.files.len(), 1);
                assert_eq!(args.urls.len(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn verify_requires_id_or_all() {
        assert!(Cli::try_parse_from(["tikpublish", "account", "verify"]).is_err());
        assert!(Cli::try_parse_from(["tikpublish", "account", "verify", "--all"]).is_ok());
    }
}
