//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for all map and card data; the repository
//! holds no in-memory copy between calls.

mod repository;

pub use repository::*;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::errors::AppError;
use crate::models::{Card, Country, State, UpsertCardRequest};

/// Store operations the API handlers and the seed loader depend on.
///
/// Implemented by [`Repository`]; a test double can stand in for the real
/// store without touching calling code.
#[async_trait]
pub trait Database: Send + Sync {
    /// Unconditional insert; fails with a duplicate-key error if the
    /// country id already exists.
    async fn insert_country(&self, country: &Country) -> Result<(), AppError>;

    /// Unconditional insert; fails with a duplicate-key error if the
    /// state id already exists.
    async fn insert_state(&self, state: &State) -> Result<(), AppError>;

    /// Upsert keyed on `(country_id, title)`; see [`Repository::update_card`].
    async fn update_card(&self, card: &UpsertCardRequest) -> Result<Card, AppError>;

    /// All countries in the store's natural scan order. An empty table
    /// yields an empty vec, not an error.
    async fn get_countries(&self) -> Result<Vec<Country>, AppError>;

    /// All states, restricted to one country when `country` is non-empty.
    async fn get_states(&self, country: &str) -> Result<Vec<State>, AppError>;

    /// All cards that have not been soft-deleted.
    async fn get_cards(&self) -> Result<Vec<Card>, AppError>;
}

/// Open the connection pool without touching the schema.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Open the pool and apply the schema, the common startup path.
pub async fn init_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = connect(database_url).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Apply the schema inside a single transaction.
///
/// Idempotent: existing tables and indexes are left untouched, so it is
/// safe against an already-initialized store. Any failure rolls back the
/// whole schema change.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS countries (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            latitude INTEGER NOT NULL,
            longitude INTEGER NOT NULL
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS states (
            id TEXT PRIMARY KEY,
            country_id TEXT NOT NULL REFERENCES countries(id),
            name TEXT NOT NULL
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            deleted_at TEXT,
            country_id TEXT NOT NULL,
            state_id TEXT,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            start_date TEXT,
            end_date TEXT,
            img_folder_path TEXT NOT NULL DEFAULT '',
            link TEXT NOT NULL DEFAULT '',
            github TEXT NOT NULL DEFAULT '',
            type TEXT NOT NULL DEFAULT ''
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Natural key for the card upsert; states are filtered by country.
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_cards_country_title ON cards(country_id, title)")
        .execute(&mut *tx)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_states_country_id ON states(country_id)")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}
