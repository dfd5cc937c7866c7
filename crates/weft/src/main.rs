//! Weft command-line client.

mod cli;

use clap::Parser;
use cli::{Cli, Commands, handle_prefs_command, handle_search_command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    weft::init_tracing(cli.log_format.into())?;
    weft::init_observability("weft", 60)?;

    let result = match cli.command {
        Commands::Search(args) => handle_search_command(args, cli.config.as_deref()).await,
        Commands::Prefs { dir, command } => handle_prefs_command(dir, command),
    };

    weft::shutdown_observability();
    result
}
