//! `dagon config`: inspect and edit the configuration file

use crate::config::ConfigManager;
use crate::error::{CliError, ExitCode};
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use std::collections::BTreeMap;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., recovery.workers)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., recovery.workers)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,

    /// Print the configuration file location
    Path,
}

pub fn execute(command: ConfigCommand, manager: &mut ConfigManager) -> Result<ExitCode> {
    match command {
        ConfigCommand::Get { key } => {
            let value = manager
                .get(&key)
                .map_err(|e| CliError::misuse(&format!("{e:#}")))?;
            println!("{value}");
        }
        ConfigCommand::Set { key, value } => {
            manager
                .set(&key, &value)
                .map_err(|e| CliError::misuse(&format!("{e:#}")))?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!("Configuration saved to: {}", manager.config_path().display());
        }
        ConfigCommand::List => {
            let items = manager.list()?;
            eprintln!("{}", "Configuration:".bold().blue());
            eprintln!("Config file: {}", manager.config_path().display());
            eprintln!();

            for (section, entries) in group_by_section(items) {
                println!("[{}]", section.yellow());
                for (key, value) in entries {
                    println!("  {} = {}", key.cyan(), value);
                }
                println!();
            }
        }
        ConfigCommand::Path => {
            println!("{}", manager.config_path().display());
        }
    }

    Ok(ExitCode::Success)
}

/// Split dotted keys into their section and the rest
fn group_by_section(items: Vec<(String, String)>) -> BTreeMap<String, Vec<(String, String)>> {
    let mut sections: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
    for (key, value) in items {
        let (section, field) = key
            .split_once('.')
            .map(|(section, field)| (section.to_string(), field.to_string()))
            .unwrap_or_else(|| ("general".to_string(), key.clone()));
        sections.entry(section).or_default().push((field, value));
    }
    for entries in sections.values_mut() {
        entries.sort();
    }
    sections
}
