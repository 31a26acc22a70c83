mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use ogaget_format::CreditFormat;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    let cli = Cli::parse_from(wild::args_os());

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.inline_keys.is_empty() {
        CreditFormat::default()
    } else {
        CreditFormat::default().with_inline_keys(cli.inline_keys)
    };

    match cli.command {
        Commands::Keys => commands::keys(),
        Commands::Show(args) => commands::show(args, &format)?,
        Commands::Normalize(args) => commands::normalize(args, &format)?,
        Commands::List(args) => commands::list(args)?,
        Commands::Extract(args) => commands::extract(args)?,
        Commands::Unpack(args) => commands::unpack(args, &format)?,
    };

    Ok(())
}
