//! Catalog command-line entry point.
//!
//! # Responsibility
//! - Wire config, logging, storage and `CatalogService` together.
//! - Print products as one JSON document per line.
//!
//! Usage:
//! `catalog [--config <path>] <list | create <name> [price_cents] [description] | ping | version>`

use catalog_core::db::{open_db, open_db_in_memory, schema_version, DbError};
use catalog_core::{
    init_logging, CatalogConfig, CatalogService, ConfigError, LoggingError, Product,
    SqliteProductStore, StoreError, VERSION,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

const USAGE: &str = "usage: catalog [--config <path>] <list | create <name> [price_cents] [description] | ping | version>";

#[derive(Debug)]
enum CliError {
    Usage(String),
    Config(ConfigError),
    Logging(LoggingError),
    Db(DbError),
    Store(StoreError),
    Output(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage(message) => write!(f, "{message}\n{USAGE}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "database open failed: {err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to encode output: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Output(err) => Some(err),
            Self::Usage(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    Create(Product),
    Ping,
    Version,
}

fn main() -> ExitCode {
    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("catalog: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), CliError> {
    let (config_path, command) = parse_args(args)?;
    if command == Command::Version {
        println!("catalog {VERSION}");
        return Ok(());
    }

    let config = match config_path {
        Some(path) => CatalogConfig::load(path)?,
        None => CatalogConfig::default(),
    };
    if let Some(dir) = &config.log_dir {
        init_logging(config.effective_log_level(), dir)?;
        info!("event=cli_start module=cli status=ok version={VERSION}");
    }

    let conn = match &config.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let service = CatalogService::new(SqliteProductStore::try_new(&conn)?);

    match command {
        Command::List => {
            for product in service.list_all_products()? {
                println!("{}", serde_json::to_string(&product)?);
            }
        }
        Command::Create(product) => {
            let saved = service.create_product(&product)?;
            println!("{}", serde_json::to_string(&saved)?);
        }
        Command::Ping => println!("ok schema_version={}", schema_version(&conn)?),
        Command::Version => {}
    }

    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<(Option<String>, Command), CliError> {
    let mut args = args.into_iter();
    let mut config_path = None;

    let command = loop {
        match args.next().as_deref() {
            Some("--config") => {
                let path = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--config requires a path".to_string()))?;
                config_path = Some(path);
            }
            Some(word) => break word.to_string(),
            None => return Err(CliError::Usage("missing command".to_string())),
        }
    };

    let rest: Vec<String> = args.collect();
    let command = match (command.as_str(), rest.as_slice()) {
        ("list", []) => Command::List,
        ("ping", []) => Command::Ping,
        ("version", []) => Command::Version,
        ("create", [name, extra @ ..]) if extra.len() <= 2 => {
            let mut product = Product::new(name.as_str());
            if let Some(price) = extra.first() {
                product.price_cents = price.parse().map_err(|_| {
                    CliError::Usage(format!("price_cents must be an integer, got `{price}`"))
                })?;
            }
            product.description = extra.get(1).cloned();
            Command::Create(product)
        }
        (other, _) => {
            return Err(CliError::Usage(format!(
                "unrecognized command or arguments: `{other}`"
            )))
        }
    };

    Ok((config_path, command))
}
