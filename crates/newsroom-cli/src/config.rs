use clap::{Parser, Subcommand};

use crate::commands::seed::SeedCmd;

#[derive(Parser)]
#[command(
    version,
    about,
    long_about = "CLI for newsroom - provides commands to manage the newsroom backend database."
)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Seed(SeedCmd),
}

impl crate::commands::Executor for Command {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Seed(cmd) => cmd.run().await,
        }
    }
}
