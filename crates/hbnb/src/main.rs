//! `hbnb` - serve the listing site and inspect its storage.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::str::FromStr;

use clap::Parser;
use serde_json::{Map, Value};

use hbnb::cli::{Cli, Command, ConfigCommand, ServeCommand, StorageCommand};
use hbnb::{init_logging, storage, web, Config, ModelKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(config, serve_cmd).await,
        Command::Storage(storage_cmd) => handle_storage(&config, storage_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

async fn handle_serve(mut config: Config, cmd: ServeCommand) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(host) = cmd.host {
        config.server.host = host;
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    config.validate()?;

    web::serve(&config.bind_address()).await?;
    Ok(())
}

fn handle_storage(config: &Config, cmd: StorageCommand) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = storage::open(config)?;

    match cmd {
        StorageCommand::Stats { json } => {
            let stats = store.stats()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Storage Statistics");
                println!("==================");
                println!("Mode:      {}", stats.mode);
                match stats.mode {
                    storage::StorageMode::Db => {
                        println!("Database:  {}", config.database_path().display());
                    }
                    storage::StorageMode::File => {
                        println!("File:      {}", config.file_path().display());
                    }
                }
                println!();
                for (kind, count) in &stats.counts {
                    println!("  {:<10} {count}", kind.class_name());
                }
                println!("  {:<10} {}", "Total", stats.total());
            }
        }
        StorageCommand::List { class, json } => {
            let kind = class.as_deref().map(ModelKind::from_str).transpose()?;
            let objects = store.all(kind)?;
            if json {
                let mut document = Map::new();
                for (key, model) in &objects {
                    document.insert(key.clone(), Value::Object(model.to_map()?));
                }
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else if objects.is_empty() {
                println!("No objects stored.");
            } else {
                for model in objects.values() {
                    println!(
                        "[{}] ({}) {}",
                        model.kind(),
                        model.id(),
                        serde_json::to_string(&model.to_map()?)?
                    );
                }
            }
        }
    }

    store.close()?;
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Type:               {}", config.storage.kind);
                println!("  Mode:               {}", config.storage_mode());
                println!("  Environment:        {}", config.storage.env);
                println!("  Database path:      {}", config.database_path().display());
                println!("  File path:          {}", config.file_path().display());
                println!();
                println!("[Server]");
                println!("  Address:            {}", config.bind_address());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
