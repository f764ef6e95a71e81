#![allow(dead_code)]

use chrono::{Months, NaiveDate, Utc};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use customers_api::db::{DbPool, SqliteSettings, establish_connection_pool};
use customers_api::repository::DieselRepository;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(file_name: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join(file_name);
        let pool = establish_connection_pool(
            path.to_str().expect("non UTF-8 temp path"),
            &SqliteSettings::default(),
        )
        .expect("failed to create connection pool");

        {
            let mut pooled = pool.get().expect("failed to get connection");
            let conn: &mut SqliteConnection = &mut pooled;
            conn.run_pending_migrations(MIGRATIONS)
                .expect("failed to run migrations");
        }

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repository(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}

/// Date `years` calendar years before today.
pub fn years_ago(years: u32) -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_sub_months(Months::new(years * 12))
        .expect("date out of range")
}
