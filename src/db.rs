//! SQLite pool backing the customer store.
//!
//! Every pooled connection is tuned with the pragmas derived from
//! [`SqliteSettings`], which is read from the `sqlite` section of the server
//! configuration.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool, PoolError};
use diesel::sqlite::SqliteConnection;
use serde::Deserialize;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SqliteSettings {
    /// Switch the journal to write-ahead logging.
    pub wal: bool,
    /// Milliseconds a writer waits on a locked database before failing.
    pub busy_timeout_ms: u64,
    pub max_connections: u32,
}

impl Default for SqliteSettings {
    fn default() -> Self {
        Self {
            wal: true,
            busy_timeout_ms: 30_000,
            max_connections: 8,
        }
    }
}

impl SqliteSettings {
    /// Pragma batch executed on each checkout.
    fn pragmas(&self) -> String {
        // busy_timeout goes first so the journal switch can wait for a lock.
        let mut sql = format!("PRAGMA busy_timeout = {};", self.busy_timeout_ms);
        if self.wal {
            sql.push_str(" PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        sql
    }
}

#[derive(Debug)]
struct Pragmas(String);

impl CustomizeConnection<SqliteConnection, r2d2::Error> for Pragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&self.0).map_err(r2d2::Error::QueryError)
    }
}

/// Opens a pool over `database_url` applying `settings` to every connection.
pub fn establish_connection_pool(
    database_url: &str,
    settings: &SqliteSettings,
) -> Result<DbPool, PoolError> {
    log::debug!("Opening customer database {database_url} with {settings:?}");

    Pool::builder()
        .max_size(settings.max_connections.max(1))
        .connection_customizer(Box::new(Pragmas(settings.pragmas())))
        .build(ConnectionManager::<SqliteConnection>::new(database_url))
}
