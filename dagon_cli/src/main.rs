use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dagon_cli::commands::config::ConfigCommand;
use dagon_cli::commands::crack::CrackArgs;
use dagon_cli::commands::hash::HashArgs;
use dagon_cli::commands::list::ListArgs;
use dagon_cli::commands::verify::VerifyArgs;
use dagon_cli::commands::{config, crack, hash, list, verify};
use dagon_cli::config::{AppConfig, ConfigManager, get_config};
use dagon_cli::error::{ExitCode, exit_code, format_for_user};
use dagon_core::AlgorithmRegistry;

#[derive(Parser)]
#[command(name = "dagon")]
#[command(author, version, about = "Dagon - Hash identification and plaintext recovery", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify the algorithms that could have produced a digest
    Verify(VerifyArgs),

    /// Recover the plaintext of a digest from a wordlist or keyspace
    Crack(CrackArgs),

    /// Hash a plaintext with a chosen algorithm
    Hash(HashArgs),

    /// List known algorithms and their identification codes
    List(ListArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("dagon_core", log::LevelFilter::Debug)
            .filter_module("dagon_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let code = match run(cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", format_for_user(&error, cli.debug));
            exit_code(&error)
        }
    };

    std::process::exit(code.code());
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        // Config edits must work even when the current file fails to load
        Commands::Config { command } => config::execute(command, &mut ConfigManager::new()),
        Commands::Verify(args) => {
            let (config, registry) = context()?;
            verify::execute(args, &config, &registry)
        }
        Commands::Crack(args) => {
            let (config, registry) = context()?;
            crack::execute(args, &config, &registry)
        }
        Commands::Hash(args) => {
            let (config, registry) = context()?;
            hash::execute(args, &config, &registry)
        }
        Commands::List(args) => {
            let (config, registry) = context()?;
            list::execute(args, &config, &registry)
        }
    }
}

fn context() -> Result<(AppConfig, AlgorithmRegistry)> {
    let config = get_config().context("Failed to load configuration")?;
    let registry = AlgorithmRegistry::with_builtins();
    log::debug!("Registry holds {} algorithms", registry.len());
    Ok((config, registry))
}
