pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "ampquote",
    about = "Ampquote operator CLI",
    long_about = "Generate priced electrical-work quotes from drafted job files, \
                  inspect supported job types, and review effective configuration.",
    after_help = "Examples:\n  ampquote generate --input draft.toml\n  ampquote generate --input draft.toml --remote\n  ampquote job-types\n  ampquote config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Assemble a priced quote from a drafted job file")]
    Generate {
        #[arg(long, help = "Path to the drafted quote TOML file")]
        input: PathBuf,
        #[arg(long, help = "Ask the configured remote composer before falling back to defaults")]
        remote: bool,
        #[arg(long, help = "Pin the pricing jitter to a fixed seed for reproducible output")]
        seed: Option<u64>,
    },
    #[command(about = "List supported job types with their base labour assumptions")]
    JobTypes,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate { input, remote, seed } => commands::generate::run(&input, remote, seed),
        Command::JobTypes => commands::job_types::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
