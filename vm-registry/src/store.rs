//! Transient SQLite store backing the registry.
//!
//! The store lives in a temporary file for one supervisor session. The
//! supervisor opens a connection only for the duration of a migration or a
//! drain; the registry process opens its own connection in between.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{Connection, SqliteConnection};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, instrument};
use vm_config::ServerRecord;

use crate::error::Result;

const CREATE_SERVERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS servers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        server_id TEXT NOT NULL UNIQUE,
        settings TEXT NOT NULL
    )
"#;

/// A temporary file-backed store, deleted on [`TransientStore::release`]
/// or when dropped.
#[derive(Debug)]
pub struct TransientStore {
    file: NamedTempFile,
    url: String,
}

impl TransientStore {
    /// Allocate a fresh, empty store file.
    pub fn allocate() -> Result<Self> {
        let file = vm_core::temp_dir::create_temp_file("openstack_registry_db", "")?;
        let url = format!("sqlite://{}", file.path().display());
        debug!("Allocated registry store at {}", file.path().display());
        Ok(Self { file, url })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Connection string handed to the registry process.
    pub fn connection_url(&self) -> &str {
        &self.url
    }

    pub async fn connect(&self) -> Result<SqliteConnection> {
        let options = SqliteConnectOptions::new()
            .filename(self.file.path())
            .create_if_missing(true)
            // Rollback journal keeps everything in the one temp file.
            .journal_mode(SqliteJournalMode::Delete);

        Ok(SqliteConnection::connect_with(&options).await?)
    }

    /// Delete the backing file.
    pub fn release(self) -> Result<()> {
        let path = self.file.path().to_path_buf();
        self.file.close()?;
        debug!("Released registry store {}", path.display());
        Ok(())
    }
}

/// Create the servers table if it does not exist yet.
#[instrument(skip(conn))]
pub async fn migrate(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(CREATE_SERVERS_TABLE).execute(&mut *conn).await?;
    Ok(())
}

/// Insert `records` in one transaction. Fails without inserting anything if
/// a server id is already present.
#[instrument(skip(conn, records), fields(count = records.len()))]
pub async fn seed(conn: &mut SqliteConnection, records: &[ServerRecord]) -> Result<()> {
    let mut tx = conn.begin().await?;
    for record in records {
        sqlx::query("INSERT INTO servers (server_id, settings) VALUES (?, ?)")
            .bind(&record.server_id)
            .bind(&record.settings)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// Read every server record in insertion order.
#[instrument(skip(conn))]
pub async fn read_all(conn: &mut SqliteConnection) -> Result<Vec<ServerRecord>> {
    let rows = sqlx::query_as::<_, (String, String)>(
        "SELECT server_id, settings FROM servers ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(server_id, settings)| ServerRecord {
            server_id,
            settings,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;

    fn records() -> Vec<ServerRecord> {
        vec![
            ServerRecord::new("vm-b", r#"{"agent_id":"b"}"#),
            ServerRecord::new("vm-a", r#"{"agent_id":"a"}"#),
        ]
    }

    #[tokio::test]
    async fn test_seed_and_read_back_in_order() {
        let store = TransientStore::allocate().unwrap();
        let mut conn = store.connect().await.unwrap();

        migrate(&mut conn).await.unwrap();
        seed(&mut conn, &records()).await.unwrap();
        assert_eq!(read_all(&mut conn).await.unwrap(), records());

        conn.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let store = TransientStore::allocate().unwrap();
        let mut conn = store.connect().await.unwrap();

        migrate(&mut conn).await.unwrap();
        seed(&mut conn, &records()).await.unwrap();
        migrate(&mut conn).await.unwrap();

        assert_eq!(read_all(&mut conn).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_server_id_rejected_atomically() {
        let store = TransientStore::allocate().unwrap();
        let mut conn = store.connect().await.unwrap();
        migrate(&mut conn).await.unwrap();

        let duplicated = vec![
            ServerRecord::new("vm-a", "{}"),
            ServerRecord::new("vm-a", r#"{"other":true}"#),
        ];
        let err = seed(&mut conn, &duplicated).await.unwrap_err();
        assert!(matches!(err, RegistryError::Store(_)));
        assert!(read_all(&mut conn).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_data_survives_reconnect() {
        let store = TransientStore::allocate().unwrap();

        let mut conn = store.connect().await.unwrap();
        migrate(&mut conn).await.unwrap();
        seed(&mut conn, &records()).await.unwrap();
        conn.close().await.unwrap();

        let mut conn = SqliteConnection::connect(store.connection_url())
            .await
            .unwrap();
        assert_eq!(read_all(&mut conn).await.unwrap(), records());
        conn.close().await.unwrap();
    }

    #[test]
    fn test_release_deletes_file() {
        let store = TransientStore::allocate().unwrap();
        let path = store.path().to_path_buf();
        assert!(store.connection_url().starts_with("sqlite://"));
        assert!(path.exists());

        store.release().unwrap();
        assert!(!path.exists());
    }
}
