mod containers;
mod stages;

use clap::{Parser, Subcommand};
use dagger_sdk::{Directory, HostDirectoryOpts, Query};

use stages::gates::Gate;

#[derive(Parser)]
#[command(name = "zisodb-ci", about = "ZisoDB CI Pipeline")]
struct Cli {
    /// Workspace root to run against
    #[arg(long, global = true, default_value = ".")]
    source: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile every target in the workspace
    Check,
    /// Format check
    Fmt,
    /// Clippy with warnings denied
    Lint,
    /// Unit tests and the in-memory HTTP suite
    Test,
    /// Postgres suite, then the release binary driven with curl
    #[command(name = "integration-test")]
    IntegrationTest,
    /// Dependency audit for the server
    #[command(name = "security-audit")]
    SecurityAudit,
    /// Gates, tests, then integration
    All,
}

fn host_directory(client: &Query, source: &str) -> Directory {
    client.host().directory_opts(
        source,
        HostDirectoryOpts {
            exclude: Some(vec!["target/", ".git/", "media/", "examples/"]),
            include: None,
            gitignore: None,
            no_cache: None,
        },
    )
}

async fn run(client: &Query, src: Directory, command: Command) -> eyre::Result<String> {
    match command {
        Command::Check => stages::gates::run(client, src, Gate::Check).await,
        Command::Fmt => stages::gates::run(client, src, Gate::Fmt).await,
        Command::Lint => stages::gates::run(client, src, Gate::Lint).await,
        Command::Test => stages::test::run(client, src).await,
        Command::IntegrationTest => stages::integration::run(client, src).await,
        Command::SecurityAudit => stages::security::run(client, src).await,
        Command::All => {
            println!("=== Phase 1: Gates ===");
            println!("{}", stages::gates::run_all(client, src.clone()).await?);

            println!("=== Phase 2: Tests ===");
            println!("{}", stages::test::run(client, src.clone()).await?);

            println!("=== Phase 3: Integration ===");
            let out = stages::integration::run(client, src).await?;
            Ok(format!("{out}\n=== Full CI Pipeline Complete ==="))
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let Cli { source, command } = Cli::parse();

    dagger_sdk::connect(|client| async move {
        let src = host_directory(&client, &source);
        let out = run(&client, src, command).await?;
        println!("{out}");
        Ok(())
    })
    .await?;

    Ok(())
}
