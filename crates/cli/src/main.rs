//! Gitsap CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration** — connection options from arguments and
//!    `GITSAP_*` environment variables, validated into a `ClientConfig`.
//! 2. **Wire observability** — `tracing-subscriber` with a text or JSON layer
//!    and an optional OpenTelemetry OTLP exporter (see [`telemetry`]).
//! 3. **Construct infrastructure** — the reqwest transport, its cookie jar, and
//!    a progress tracker driving the terminal spinner, injected into an
//!    `EnvelopeClient` with the standard interceptors.
//! 4. **Run the command** — print the resulting envelope as JSON and exit with
//!    status 0 when it reports success, 1 otherwise.

mod args;
mod convert;
mod indicator;
mod telemetry;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use client::{
    Envelope, EnvelopeClient, KeyCase, LoggingIndicator, ProgressIndicator, ProgressTracker,
};
use serde::Serialize;
use tracing::{debug, error};
use transport::{connect, ReqwestTransport};

use args::{Cli, Command};
use indicator::SpinnerIndicator;

/// Body of `POST /users/login`; the server accepts a username or an email.
#[derive(Debug, Serialize)]
struct Credentials<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    password: &'a str,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = match telemetry::init(cli.log_format) {
        Ok(telemetry) => telemetry,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    };

    telemetry.shutdown();
    code
}

async fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Command::Profile => {
            let client = build_client(cli)?;
            report(&client.user_profile().await)
        }
        Command::Login {
            username,
            email,
            password,
        } => {
            let credentials = serde_json::to_value(Credentials {
                username: username.as_deref(),
                email: email.as_deref(),
                password,
            })
            .context("failed to encode credentials")?;
            let client = build_client(cli)?;
            report(&client.login(credentials).await)
        }
        Command::Convert { to, file } => {
            let text = convert::read_input(file.as_deref())?;
            println!("{}", convert::convert_document(&text, KeyCase::from(*to))?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_client(cli: &Cli) -> anyhow::Result<EnvelopeClient<ReqwestTransport>> {
    let config = cli.client_config().context("invalid client configuration")?;
    let (transport, cookies) = connect(config.clone()).context("failed to connect")?;
    if let Some(token) = &cli.csrf_token {
        cookies.seed(config.csrf_cookie(), token);
    }

    let indicator: Arc<dyn ProgressIndicator> = if cli.quiet {
        Arc::new(LoggingIndicator)
    } else {
        Arc::new(SpinnerIndicator::new())
    };
    let tracker = Arc::new(ProgressTracker::new(indicator));

    debug!(base_url = config.base_url(), "Client configured");
    let client = EnvelopeClient::standard(transport, &config, cookies, tracker);
    Ok(client)
}

fn report(envelope: &Envelope) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(if envelope.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
