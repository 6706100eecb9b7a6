//! Seed loader that populates the store from CSV reference files.
//!
//! Per-row insert failures (typically duplicate keys when a load is
//! re-run) are logged and skipped; the load continues with the next row.
//! CSV read errors are fatal and abort the load.

use std::path::Path;

use crate::db::Database;
use crate::errors::AppError;
use crate::models::{Country, State};

/// Load countries, then states, from their CSV files.
pub async fn run<D: Database + ?Sized>(
    db: &D,
    countries_path: &Path,
    states_path: &Path,
) -> Result<(), AppError> {
    load_countries(db, countries_path).await?;
    load_states(db, states_path).await
}

/// Load country rows from a CSV with columns [id, name, latitude, longitude].
pub async fn load_countries<D: Database + ?Sized>(db: &D, path: &Path) -> Result<(), AppError> {
    let mut reader = csv::Reader::from_path(path)?;
    tracing::debug!("Country CSV headers: {:?}", reader.headers()?);

    for record in reader.records() {
        let record = record?;
        let country = Country {
            id: record.get(0).unwrap_or_default().to_string(),
            name: record.get(1).unwrap_or_default().to_string(),
            latitude: parse_degrees(record.get(2).unwrap_or_default(), "Latitude", &record),
            longitude: parse_degrees(record.get(3).unwrap_or_default(), "Longitude", &record),
        };

        match db.insert_country(&country).await {
            Ok(()) => tracing::info!("Inserted country: {}", country.id),
            // Most likely a duplicate key on a re-run; keep loading.
            Err(e) => tracing::warn!("Insert country {} failed: {}", country.id, e),
        }
    }

    Ok(())
}

/// Load state rows from a CSV with columns [id, country_id, name].
pub async fn load_states<D: Database + ?Sized>(db: &D, path: &Path) -> Result<(), AppError> {
    let mut reader = csv::Reader::from_path(path)?;
    tracing::debug!("State CSV headers: {:?}", reader.headers()?);

    for record in reader.records() {
        let record = record?;
        let state = State {
            id: record.get(0).unwrap_or_default().to_string(),
            country_id: record.get(1).unwrap_or_default().to_string(),
            name: record.get(2).unwrap_or_default().to_string(),
        };

        match db.insert_state(&state).await {
            Ok(()) => tracing::info!("Inserted state: {}", state.id),
            Err(e) => tracing::warn!("Insert state {} failed: {}", state.id, e),
        }
    }

    Ok(())
}

/// Malformed degree fields are coerced to zero so the row still loads.
fn parse_degrees(raw: &str, field: &str, record: &csv::StringRecord) -> i64 {
    match raw.parse::<i64>() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("{} cannot be parsed for country {:?}: {}", field, record, e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_database, Repository};
    use crate::models::{Card, UpsertCardRequest};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    async fn test_repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_url = format!(
            "sqlite:{}?mode=rwc",
            temp_dir.path().join("test.sqlite").display()
        );
        let pool = init_database(&db_url).await.expect("Failed to init DB");
        (Repository::new(pool), temp_dir)
    }

    fn write_fixture_csvs(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
        let countries = dir.path().join("countries.csv");
        let states = dir.path().join("states.csv");
        std::fs::write(&countries, "id,name,latitude,longitude\nUS,United States,38,-97\n").unwrap();
        std::fs::write(&states, "id,country_id,name\nCA,US,California\n").unwrap();
        (countries, states)
    }

    #[tokio::test]
    async fn test_load_countries_and_states() {
        let (repo, dir) = test_repo().await;
        let (countries_csv, states_csv) = write_fixture_csvs(&dir);

        run(&repo, &countries_csv, &states_csv).await.unwrap();

        let countries = repo.get_countries().await.unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].id, "US");
        assert_eq!(countries[0].name, "United States");
        assert_eq!(countries[0].latitude, 38);
        assert_eq!(countries[0].longitude, -97);

        let states = repo.get_states("US").await.unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].id, "CA");
        assert_eq!(states[0].country_id, "US");
        assert_eq!(states[0].name, "California");
    }

    #[tokio::test]
    async fn test_reload_tolerates_duplicates() {
        let (repo, dir) = test_repo().await;
        let (countries_csv, states_csv) = write_fixture_csvs(&dir);

        run(&repo, &countries_csv, &states_csv).await.unwrap();
        // Second run hits duplicate keys on every row but must not fail.
        run(&repo, &countries_csv, &states_csv).await.unwrap();

        assert_eq!(repo.get_countries().await.unwrap().len(), 1);
        assert_eq!(repo.get_states("").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_degrees_coerced_to_zero() {
        let (repo, dir) = test_repo().await;
        let countries_csv = dir.path().join("countries.csv");
        std::fs::write(
            &countries_csv,
            "id,name,latitude,longitude\nXX,Nowhere,not-a-number,12\n",
        )
        .unwrap();

        load_countries(&repo, &countries_csv).await.unwrap();

        let countries = repo.get_countries().await.unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].latitude, 0);
        assert_eq!(countries[0].longitude, 12);
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal() {
        let (repo, dir) = test_repo().await;
        let missing = dir.path().join("does-not-exist.csv");

        let err = load_countries(&repo, &missing).await.unwrap_err();
        assert!(matches!(err, AppError::Csv(_)));
    }

    /// Test double that rejects every insert with a store error.
    struct FailingDb {
        attempts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Database for FailingDb {
        async fn insert_country(&self, country: &Country) -> Result<(), AppError> {
            self.attempts.lock().unwrap().push(country.id.clone());
            Err(AppError::Database("connection reset".to_string()))
        }

        async fn insert_state(&self, state: &State) -> Result<(), AppError> {
            self.attempts.lock().unwrap().push(state.id.clone());
            Err(AppError::Database("connection reset".to_string()))
        }

        async fn update_card(&self, _card: &UpsertCardRequest) -> Result<Card, AppError> {
            unimplemented!("not exercised by the seed loader")
        }

        async fn get_countries(&self) -> Result<Vec<Country>, AppError> {
            unimplemented!("not exercised by the seed loader")
        }

        async fn get_states(&self, _country: &str) -> Result<Vec<State>, AppError> {
            unimplemented!("not exercised by the seed loader")
        }

        async fn get_cards(&self) -> Result<Vec<Card>, AppError> {
            unimplemented!("not exercised by the seed loader")
        }
    }

    #[tokio::test]
    async fn test_insert_failures_do_not_abort_load() {
        let dir = TempDir::new().unwrap();
        let countries_csv = dir.path().join("countries.csv");
        std::fs::write(
            &countries_csv,
            "id,name,latitude,longitude\nUS,United States,38,-97\nIN,India,21,78\n",
        )
        .unwrap();

        let db = FailingDb {
            attempts: Mutex::new(Vec::new()),
        };

        // Every insert fails, but the loader still visits every row.
        load_countries(&db, &countries_csv).await.unwrap();
        assert_eq!(*db.attempts.lock().unwrap(), vec!["US", "IN"]);
    }
}
