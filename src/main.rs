use clap::Parser;
use paw_identify::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Classify(args) => cli::classify::run(args).await,
        Command::Ask(args) => cli::ask::run(args).await,
        Command::Chat(args) => cli::chat::run(args).await,
    }
}
