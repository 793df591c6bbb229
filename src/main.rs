// main.rs
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            data,
            model,
            seed,
            holdout,
        } => cli::handle_train(data, model, seed, holdout),
        Commands::Predict {
            input,
            model,
            show_base,
        } => cli::handle_predict(input, model, show_base),
        Commands::Inspect { model } => cli::handle_inspect(model),
    }
}
