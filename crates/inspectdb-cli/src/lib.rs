mod utility;

pub use utility::redact_url_password;

use anyhow::Result;
use clap::Parser;
use inspectdb::Options;
use inspectdb_core::{Driver, Error};
use inspectdb_driver_postgresql::PostgreSQL;
use inspectdb_driver_sqlite::Sqlite;
use std::io::Write;

const NOT_SUPPORTED: &str =
    "Database inspection isn't supported for the currently selected database backend.";

#[derive(Parser, Debug)]
#[command(name = "inspectdb")]
#[command(about = "Introspects the tables in a database and outputs a Django model module")]
#[command(version)]
pub struct Cli {
    /// Selects what tables or views should be introspected
    #[arg(value_name = "TABLE")]
    pub tables: Vec<String>,

    /// Connection URL of the database to introspect
    #[arg(long, env = "DATABASE_URL")]
    pub database: String,

    /// Also output models for database views
    #[arg(long)]
    pub include_views: bool,
}

impl Cli {
    /// Generation options selected by the command-line arguments
    pub fn options(&self) -> Options {
        Options::new()
            .tables(self.tables.iter().cloned())
            .include_views(self.include_views)
    }
}

/// Parse command-line arguments and write the generated module to stdout
pub fn parse_and_run() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}

/// Introspect the database selected by `cli`, writing one line at a time to
/// `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    log::info!("introspecting {}", redact_url_password(&cli.database));

    let lines = driver_for_url(&cli.database)
        .and_then(|driver| inspectdb::inspect(driver.as_ref(), &cli.options()))
        .map_err(|err| {
            if err.root().is_not_supported() {
                anyhow::anyhow!(NOT_SUPPORTED)
            } else {
                anyhow::Error::from(err)
            }
        })?;

    for line in &lines {
        writeln!(out, "{line}")?;
    }

    out.flush()?;
    Ok(())
}

/// Selects a driver by the scheme of `url`.
pub fn driver_for_url(url: &str) -> inspectdb_core::Result<Box<dyn Driver>> {
    let scheme = url::Url::parse(url)
        .map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={}", redact_url_password(url)))
        })?
        .scheme()
        .to_string();

    match scheme.as_str() {
        "sqlite" => Ok(Box::new(Sqlite::new(url)?)),
        "postgres" | "postgresql" => Ok(Box::new(PostgreSQL::new(url)?)),
        _ => Err(Error::not_supported(format!("`{scheme}` databases"))),
    }
}
