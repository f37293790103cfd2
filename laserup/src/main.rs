mod cli;
mod commands;
mod exit_codes;
mod observability;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    observability::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            input,
            out,
            python,
            venv,
            manifest,
            entry,
            sync,
            no_pause,
        } => commands::run::cmd_run(input, out, python, venv, manifest, entry, sync, no_pause),
        Commands::Setup {
            python,
            venv,
            manifest,
            input,
            sync,
        } => commands::setup::cmd_setup(python, venv, manifest, input, sync),
        Commands::Doctor {
            json,
            python,
            venv,
            manifest,
            input,
            out,
            entry,
        } => commands::doctor::cmd_doctor(json, python, venv, manifest, input, out, entry),
        Commands::Clean { venv, dry_run, force } => commands::clean::cmd_clean(venv, dry_run, force),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::FAILURE);
        }
    }
}
