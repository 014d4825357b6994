use clap::Parser as _;
use stratus_core::{config::Config, transfer, transfer::Transfer};

mod cli;
mod commands;

async fn load_config(args: &cli::Cli) -> eyre::Result<Config> {
    let config = if let Some(config_string) = &args.config_string {
        Config::parse(config_string)?
    } else {
        Config::parse_file(args.config_file.path()?).await?
    };
    Ok(config)
}

fn transfer_config(args: &cli::Cli) -> transfer::Config {
    let mut config = transfer::Config::default();
    if let Some(cp_binary) = &args.cp_binary {
        config.cp_binary = cp_binary.clone();
    }
    if let Some(rsync_binary) = &args.rsync_binary {
        config.rsync_binary = rsync_binary.clone();
    }
    config
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let args = cli::Cli::parse();
    let transfer = Transfer::new(transfer_config(&args));
    let maybe_config = load_config(&args).await;

    match args.subcommand {
        cli::Cmd::Sync(cmd_args) => commands::sync::run(transfer, &maybe_config?, cmd_args).await,
        cli::Cmd::Config => commands::config(&maybe_config?),
        cli::Cmd::Version => commands::version(&transfer).await,
    }
}
