use clap::Parser;
use crud_service_sample::cli::{Cli, Command, ConfigAction};
use crud_service_sample::config::ConfigManager;
use crud_service_sample::demo::run_demo;
use crud_service_sample::logging::init_logging;
use crud_service_sample::{AppError, DataContext};
use log::error;
use std::io;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        error!("event=run status=error error={err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut manager = ConfigManager::load(cli.config.as_deref())?;
    let level = cli
        .log_level
        .as_deref()
        .or(manager.config().log_level.as_deref());
    init_logging(level)?;

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => {
            let location = manager.store_location(cli.database.as_deref())?;
            let context = DataContext::from_location(&location)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            run_demo(&context, &mut out)?;
        }
        Command::Config { action } => match action {
            ConfigAction::Get { key } => match manager.get(&key) {
                Some(value) => println!("{value}"),
                None => println!("{key} is not set"),
            },
            ConfigAction::Set { key, value } => {
                manager.set(&key, &value)?;
                println!("Set {key} = {value}");
            }
            ConfigAction::Unset { key } => {
                manager.unset(&key)?;
                println!("Unset {key}");
            }
            ConfigAction::List => {
                for (key, value, is_default) in manager.list() {
                    if is_default {
                        println!("{key} = {value} (default)");
                    } else {
                        println!("{key} = {value}");
                    }
                }
            }
        },
    }

    Ok(())
}
