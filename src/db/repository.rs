//! Database repository for reads, inserts, and the card upsert.
//!
//! Uses prepared statements; the upsert runs its lookup and write in one
//! transaction.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use super::Database;
use crate::errors::AppError;
use crate::models::{Card, Country, State, UpsertCardRequest};

/// SQLite-backed implementation of [`Database`].
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Database for Repository {
    async fn insert_country(&self, country: &Country) -> Result<(), AppError> {
        sqlx::query("INSERT INTO countries (id, name, latitude, longitude) VALUES (?, ?, ?, ?)")
            .bind(&country.id)
            .bind(&country.name)
            .bind(country.latitude)
            .bind(country.longitude)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert_state(&self, state: &State) -> Result<(), AppError> {
        sqlx::query("INSERT INTO states (id, country_id, name) VALUES (?, ?, ?)")
            .bind(&state.id)
            .bind(&state.country_id)
            .bind(&state.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Upsert keyed on `(country_id, title)`.
    ///
    /// Looks the card up by its natural key and either updates the mutable
    /// fields in place (surrogate id and `created_at` preserved,
    /// `updated_at` refreshed) or inserts a new row. Both steps run inside
    /// one transaction: a lookup failure aborts before any write, a write
    /// failure rolls back, and concurrent upserts on the same key cannot
    /// lose an update.
    async fn update_card(&self, card: &UpsertCardRequest) -> Result<Card, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query(
            "SELECT id, created_at FROM cards WHERE country_id = ? AND title = ? AND deleted_at IS NULL",
        )
        .bind(&card.country_id)
        .bind(&card.title)
        .fetch_optional(&mut *tx)
        .await?;

        let now = Utc::now().to_rfc3339();

        let stored = match existing {
            Some(row) => {
                let id: i64 = row.get("id");
                let created_at: String = row.get("created_at");

                sqlx::query(
                    r#"UPDATE cards SET
                        state_id = ?, title = ?, description = ?,
                        start_date = ?, end_date = ?, img_folder_path = ?,
                        link = ?, github = ?, type = ?, updated_at = ?
                    WHERE id = ?"#,
                )
                .bind(&card.state_id)
                .bind(&card.title)
                .bind(&card.description)
                .bind(&card.start_date)
                .bind(&card.end_date)
                .bind(&card.img_folder_path)
                .bind(&card.link)
                .bind(&card.github)
                .bind(&card.card_type)
                .bind(&now)
                .bind(id)
                .execute(&mut *tx)
                .await?;

                card_from_request(card, id, created_at, now)
            }
            None => {
                let result = sqlx::query(
                    r#"INSERT INTO cards (
                        created_at, updated_at, country_id, state_id, title,
                        description, start_date, end_date, img_folder_path,
                        link, github, type
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
                )
                .bind(&now)
                .bind(&now)
                .bind(&card.country_id)
                .bind(&card.state_id)
                .bind(&card.title)
                .bind(&card.description)
                .bind(&card.start_date)
                .bind(&card.end_date)
                .bind(&card.img_folder_path)
                .bind(&card.link)
                .bind(&card.github)
                .bind(&card.card_type)
                .execute(&mut *tx)
                .await?;

                card_from_request(card, result.last_insert_rowid(), now.clone(), now)
            }
        };

        tx.commit().await?;

        Ok(stored)
    }

    async fn get_countries(&self) -> Result<Vec<Country>, AppError> {
        let rows = sqlx::query("SELECT id, name, latitude, longitude FROM countries")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(country_from_row).collect())
    }

    async fn get_states(&self, country: &str) -> Result<Vec<State>, AppError> {
        // An empty filter means no WHERE clause at all, not a match on "".
        let rows = if country.is_empty() {
            sqlx::query("SELECT id, country_id, name FROM states")
                .fetch_all(&self.pool)
                .await?
        } else {
            sqlx::query("SELECT id, country_id, name FROM states WHERE country_id = ?")
                .bind(country)
                .fetch_all(&self.pool)
                .await?
        };

        Ok(rows.iter().map(state_from_row).collect())
    }

    async fn get_cards(&self) -> Result<Vec<Card>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, created_at, updated_at, deleted_at, country_id, state_id,
                      title, description, start_date, end_date, img_folder_path,
                      link, github, type
               FROM cards WHERE deleted_at IS NULL"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(card_from_row).collect())
    }
}

// Helper functions for row conversion

fn country_from_row(row: &sqlx::sqlite::SqliteRow) -> Country {
    Country {
        id: row.get("id"),
        name: row.get("name"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
    }
}

fn state_from_row(row: &sqlx::sqlite::SqliteRow) -> State {
    State {
        id: row.get("id"),
        country_id: row.get("country_id"),
        name: row.get("name"),
    }
}

fn card_from_row(row: &sqlx::sqlite::SqliteRow) -> Card {
    Card {
        id: row.get("id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deleted_at: row.get("deleted_at"),
        country_id: row.get("country_id"),
        state_id: row.get("state_id"),
        title: row.get("title"),
        description: row.get("description"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        img_folder_path: row.get("img_folder_path"),
        link: row.get("link"),
        github: row.get("github"),
        card_type: row.get("type"),
    }
}

fn card_from_request(card: &UpsertCardRequest, id: i64, created_at: String, now: String) -> Card {
    Card {
        id,
        created_at,
        updated_at: now,
        deleted_at: None,
        country_id: card.country_id.clone(),
        state_id: card.state_id.clone(),
        title: card.title.clone(),
        description: card.description.clone(),
        start_date: card.start_date.clone(),
        end_date: card.end_date.clone(),
        img_folder_path: card.img_folder_path.clone(),
        link: card.link.clone(),
        github: card.github.clone(),
        card_type: card.card_type.clone(),
    }
}
