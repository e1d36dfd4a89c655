use clap::Parser;
use inspectdb_cli::{driver_for_url, run, Cli};
use inspectdb_core::Driver as _;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Creates `app.sqlite3` with `schema` in a fresh temporary directory and
/// returns its `sqlite:` URL. The directory is removed when dropped.
fn database(schema: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("app.sqlite3");

    let connection = rusqlite::Connection::open(&path).expect("should create database");
    connection
        .execute_batch(schema)
        .expect("schema should be valid");

    (dir, url)
}

fn output(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("inspectdb").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    run(&cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn parses_arguments() {
    let cli = Cli::try_parse_from([
        "inspectdb",
        "--database",
        "sqlite::memory:",
        "--include-views",
        "users",
        "groups",
    ])
    .unwrap();

    assert_eq!(cli.database, "sqlite::memory:");
    assert_eq!(cli.tables, ["users", "groups"]);
    assert!(cli.include_views);

    let options = cli.options();
    assert_eq!(options.tables, ["users", "groups"]);
    assert!(options.include_views);
}

#[test]
fn writes_models_for_requested_tables() {
    let (_dir, url) = database(
        "
        CREATE TABLE users (id INTEGER PRIMARY KEY, email VARCHAR(254) NOT NULL UNIQUE);
        CREATE TABLE groups (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
        ",
    );

    let out = output(&["--database", &url, "users"]).unwrap();
    let lines: Vec<_> = out.lines().collect();

    assert_eq!(lines[0], "# This is an auto-generated Django model module.");
    assert_eq!(lines[7], "from django.db import models");
    assert_eq!(
        lines[8..],
        [
            "",
            "",
            "class Users(models.Model):",
            "    email = models.CharField(unique=True, max_length=254)",
            "",
            "    class Meta:",
            "        managed = False",
            "        db_table = 'users'",
        ]
    );
}

#[test]
fn unknown_backend_is_not_supported() {
    let err = output(&["--database", "oracle://localhost/app"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Database inspection isn't supported for the currently selected database backend."
    );
}

#[test]
fn selects_driver_by_scheme() {
    assert_eq!(driver_for_url("sqlite::memory:").unwrap().url(), "sqlite::memory:");
    assert_eq!(
        driver_for_url("postgres://localhost/app").unwrap().url(),
        "postgres://localhost/app"
    );

    let err = driver_for_url("localhost/app").unwrap_err();
    assert!(err.is_invalid_connection_url());
}

#[test]
fn missing_database_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.sqlite3");
    let err = output(&["--database", &format!("sqlite:{}", path.display())]).unwrap_err();
    assert!(err.downcast_ref::<inspectdb_core::Error>().is_some());
}
