mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use harness::exit_codes;
use harness::io::config::{DEFAULT_CONFIG_PATH, load_config};

#[derive(Parser)]
#[command(name = "practice", version, about = "Evaluate solutions to small coding exercises")]
struct Cli {
    /// Harness configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List discovered exercises with category and completion.
    List,
    /// Print an exercise's prompt and metadata.
    Show { id: String },
    /// Print the current code for an exercise (saved source or skeleton).
    Code { id: String },
    /// Save a file as the user source for an exercise.
    Save { id: String, file: PathBuf },
    /// Evaluate the compiled implementation of an exercise.
    Run {
        id: String,
        /// Seed the input generator for a reproducible run.
        #[arg(long)]
        seed: Option<u64>,
        /// Print the evaluation as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    harness::logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    match cli.command {
        Command::List => cli::list_exercises(config),
        Command::Show { id } => cli::show_exercise(config, &id),
        Command::Code { id } => cli::print_code(config, &id),
        Command::Save { id, file } => cli::save_code(config, &id, &file),
        Command::Run { id, seed, json } => cli::run_exercise(config, &id, seed, json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_run_with_seed() {
        let cli = Cli::parse_from(["practice", "run", "HasTriple", "--seed", "9"]);
        assert!(matches!(
            cli.command,
            Command::Run { ref id, seed: Some(9), json: false } if id == "HasTriple"
        ));
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn parse_global_config_after_subcommand() {
        let cli = Cli::parse_from(["practice", "list", "--config", "other.toml"]);
        assert!(matches!(cli.command, Command::List));
        assert_eq!(cli.config, PathBuf::from("other.toml"));
    }
}
