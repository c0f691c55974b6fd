//! Command-line arguments.
//!
//! Commands:
//! - gitsap profile
//! - gitsap login (--username <NAME> | --email <EMAIL>) --password <PASSWORD>
//! - gitsap convert [--to camel|snake] [FILE]
//!
//! Connection options are global and fall back to `GITSAP_*` environment
//! variables.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use client::{ClientConfig, ClientError, KeyCase, DEFAULT_BASE_URL};

/// Command-line client for the Gitsap API
#[derive(Parser, Debug)]
#[command(name = "gitsap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// API root URL
    #[arg(long, global = true, env = "GITSAP_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// CSRF token to place in the cookie jar before the first request
    #[arg(long, global = true, env = "GITSAP_CSRF_TOKEN", hide_env_values = true)]
    pub csrf_token: Option<String>,

    /// Request timeout in seconds; requests never time out when unset
    #[arg(long, global = true, env = "GITSAP_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Log output format
    #[arg(
        long,
        global = true,
        env = "GITSAP_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,

    /// Do not draw the loading spinner
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the current user's profile
    Profile,

    /// Log in with a username or an email address
    Login {
        /// Account username
        #[arg(long, conflicts_with = "email", required_unless_present = "email")]
        username: Option<String>,

        /// Account email address
        #[arg(long)]
        email: Option<String>,

        /// Account password
        #[arg(long, env = "GITSAP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Rewrite the keys of a JSON document (reads stdin when FILE is omitted)
    Convert {
        /// Target key case
        #[arg(long, value_enum, default_value_t = CaseArg::Camel)]
        to: CaseArg,

        /// JSON file to convert
        file: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseArg {
    Camel,
    Snake,
}

impl From<CaseArg> for KeyCase {
    fn from(case: CaseArg) -> Self {
        match case {
            CaseArg::Camel => KeyCase::Camel,
            CaseArg::Snake => KeyCase::Snake,
        }
    }
}

impl Cli {
    /// Builds the validated client configuration from the connection options.
    pub fn client_config(&self) -> Result<ClientConfig, ClientError> {
        let config = ClientConfig::new(self.api_url.as_str())?;
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => Ok(config),
        }
    }
}
