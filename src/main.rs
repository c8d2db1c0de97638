//! # Dataset Chat
//!
//! Command-line client for a dataset analysis server: upload a CSV, Excel or
//! JSON file, ask questions about it, and render the answers from their
//! markdown-like markup into safe HTML or wrapped terminal text.

mod cli;
mod core;
mod format;
mod run;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);
    log::debug!("{} {} starting", core::app::NAME, core::app::VERSION);

    let server = args.server.as_deref();
    match args.command {
        Commands::Chat {
            dataset,
            prompt,
            html,
            width,
            transcript,
        } => {
            run::run_chat(
                server,
                run::ChatArgs {
                    dataset,
                    prompt,
                    html,
                    width,
                    transcript,
                },
            )
            .await?
        }
        Commands::Format { ref input } => run::run_format(input)?,
        Commands::Datasets => core::cli::run_datasets(server).await,
        Commands::Health => core::cli::run_health(server).await,
        Commands::Config => core::cli::run_config(server),
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            let name = cmd.get_name().to_string();
            cli::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }
    Ok(())
}
