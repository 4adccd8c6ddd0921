use std::io::{self, Read, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};

use release_resource::check::CheckCommand;
use release_resource::config::CheckRequest;
use release_resource::logging::{self, LogFormat};

#[derive(Parser)]
#[command(name = "release-resource")]
#[command(version, about = "Reports new GitHub release versions for a CI pipeline")]
struct Cli {
    /// Log line format (written to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read a check request from stdin and print new versions as JSON
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_format).context("initialising logging")?;

    match cli.command {
        Command::Check => tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?
            .block_on(check()),
    }
}

async fn check() -> anyhow::Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("reading request from stdin")?;
    let request: CheckRequest =
        serde_json::from_str(&input).context("parsing request from stdin")?;

    let command = CheckCommand::for_github(&request.source).context("constructing github client")?;
    let versions = command.run(&request).await.context("running command")?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &versions).context("writing response to stdout")?;
    writeln!(stdout)?;

    Ok(())
}
