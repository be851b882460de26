//! SQLite-backed feature store.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::{debug, info};

use crate::error::{FlagError, Result};
use crate::models::{Feature, NewFeature};
use crate::store::{schema, FeatureStore};

const FEATURE_COLUMNS: &str = "name, enabled, description, created_at, updated_at";

/// Durable [`FeatureStore`] on a single SQLite connection.
///
/// Queries run on the blocking thread pool; the connection is serialized
/// behind a mutex.
#[derive(Debug, Clone)]
pub struct SqliteFeatureStore {
    path: PathBuf,
    conn: Arc<Mutex<Connection>>,
}

impl SqliteFeatureStore {
    /// Open or create a feature database at the given path.
    ///
    /// Creates parent directories as needed and initializes the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    FlagError::BackendUnavailable(format!(
                        "cannot create {}: {}",
                        parent.display(),
                        err
                    ))
                })?;
            }
        }

        debug!("Opening feature database at {}", path.display());
        let conn = Connection::open(&path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        schema::initialize_schema(&conn)?;

        info!("Feature database opened at {}", path.display());
        Ok(Self {
            path,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| {
                FlagError::BackendUnavailable("feature database connection poisoned".to_string())
            })?;
            f(&guard)
        })
        .await?
    }
}

fn row_to_feature(row: &rusqlite::Row) -> rusqlite::Result<Feature> {
    Ok(Feature {
        name: row.get(0)?,
        enabled: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

#[async_trait]
impl FeatureStore for SqliteFeatureStore {
    async fn get(&self, name: &str) -> Result<Option<Feature>> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let sql = format!("SELECT {} FROM features WHERE name = ?1", FEATURE_COLUMNS);
            Ok(conn.query_row(&sql, [&name], row_to_feature).optional()?)
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Feature>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {} FROM features ORDER BY name", FEATURE_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let features = stmt
                .query_map([], row_to_feature)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(features)
        })
        .await
    }

    async fn insert(&self, new: NewFeature) -> Result<Feature> {
        self.with_conn(move |conn| {
            let sql = format!(
                "INSERT INTO features (name, enabled, description, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?4) RETURNING {}",
                FEATURE_COLUMNS
            );
            conn.query_row(
                &sql,
                params![new.name, new.enabled, new.description, Utc::now()],
                row_to_feature,
            )
            .map_err(|err| match err {
                rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
                    FlagError::Conflict(new.name.clone())
                }
                other => other.into(),
            })
        })
        .await
    }

    async fn set_enabled(&self, name: &str, enabled: bool) -> Result<Option<Feature>> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let sql = format!(
                "UPDATE features SET enabled = ?1, updated_at = ?2 WHERE name = ?3 RETURNING {}",
                FEATURE_COLUMNS
            );
            Ok(conn
                .query_row(&sql, params![enabled, Utc::now(), name], row_to_feature)
                .optional()?)
        })
        .await
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let removed = conn.execute("DELETE FROM features WHERE name = ?1", [&name])?;
            Ok(removed > 0)
        })
        .await
    }
}
