//! Coffer CLI - a keyed flat-file container for account credentials.
//!
//! This is the command-line interface for Coffer. It provides a
//! user-friendly interface to the core library functionality, including the
//! interactive session that edits a container.

mod cli;
mod clipboard;
mod commands;
mod config;
mod constants;
mod errors;
mod input;
mod session;

use clap::Parser;

use coffer_core::VERSION;

use cli::{Cli, Commands};
use errors::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            eprintln!("Error: {}", cli_err);
            std::process::exit(cli_err.exit_code());
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => commands::handle_init(cli, args),
        Some(Commands::Open(args)) => commands::handle_open(cli, args),
        Some(Commands::Generate(args)) => commands::handle_generate(cli, args),
        Some(Commands::Export(args)) => commands::handle_export(cli, args),
        Some(Commands::Completions(args)) => commands::handle_completions(args.shell),
        None => {
            println!("Coffer v{}", VERSION);
            println!();
            println!("Quickstart:");
            println!("  coffer init          create an empty container");
            println!("  coffer open          start an interactive session");
            println!("  coffer generate 20   print a random password");
            println!();
            println!("Run `coffer --help` for the full command list.");
            Ok(())
        }
    }
}
