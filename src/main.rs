use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use unresolved_threads::config::{EnvInputs, InputSource};
use unresolved_threads::context::build_context;
use unresolved_threads::event::EventSnapshot;
use unresolved_threads::github::OctocrabClient;
use unresolved_threads::runner::{self, Outcome};

const TOKEN_INPUT: &str = "token";

#[tokio::main]
async fn main() -> ExitCode {
    let debug = std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");
    let default_filter = if debug {
        "unresolved_threads=debug"
    } else {
        "unresolved_threads=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match check().await {
        Ok(outcome) => {
            info!(?outcome, "Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            // Surfaces the failure as an annotation on the workflow run.
            println!("::error::{}", escape_command_data(&format!("{e:#}")));
            ExitCode::FAILURE
        }
    }
}

async fn check() -> Result<Outcome> {
    let inputs = EnvInputs::from_env();
    let event = EventSnapshot::from_env().context("reading the workflow event")?;

    let token = match inputs
        .input(TOKEN_INPUT)
        .or_else(|| std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()))
    {
        Some(token) => token,
        None => bail!("no GitHub token: set the `token` input or GITHUB_TOKEN"),
    };

    let github = OctocrabClient::from_token(token, event.run.repo.clone())
        .context("building the GitHub client")?;

    let ctx = build_context(&inputs, &event, &github)
        .await
        .context("building the action context")?;
    let outcome = runner::run(&github, &ctx)
        .await
        .context("checking review threads")?;
    Ok(outcome)
}

/// Escapes a workflow command message so the runner reads it back verbatim.
fn escape_command_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
