use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "crud_service_sample", version, about = "Generic CRUD services over SQLite")]
pub struct Cli {
    /// Store location: a path, `Data Source=<path>`, or `:memory:`
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Path to the JSON config file (default: $CRUD_SAMPLE_CONFIG, then ~/.config/crud-sample/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seed categories and todos, then print them (default)
    Demo,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print a config value
    Get { key: String },
    /// Set a config value
    Set { key: String, value: String },
    /// Remove a config value
    Unset { key: String },
    /// List all config values
    List,
}
