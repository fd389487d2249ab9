//! PostgreSQL content store.
//!
//! Content lives in a single row of the `portfolio_content` table:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS portfolio_content (
//!   id SMALLINT PRIMARY KEY CHECK (id = 1),
//!   content JSONB NOT NULL DEFAULT '{}'::jsonb,
//!   updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
//!
//! The schema is created lazily on first use. Writes lock the row with
//! `SELECT ... FOR UPDATE` inside a transaction, so concurrent saves from
//! several server instances merge instead of clobbering each other.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_core::{Document, document_from_stored, merge};
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use sqlx::types::Json;
use tokio::sync::OnceCell;

use crate::filesystem::FileStore;
use crate::traits::{ContentStore, OverwriteGuard, Snapshot};
use crate::{Error, Result};

/// Primary key of the only content row.
pub const CONTENT_ROW_ID: i16 = 1;

const CREATE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS portfolio_content (
  id SMALLINT PRIMARY KEY CHECK (id = 1),
  content JSONB NOT NULL DEFAULT '{}'::jsonb,
  updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

const INSERT_EMPTY_ROW: &str =
    "INSERT INTO portfolio_content (id, content) VALUES ($1, '{}'::jsonb) ON CONFLICT (id) DO NOTHING";

const SELECT_CONTENT: &str = "SELECT content FROM portfolio_content WHERE id = $1 LIMIT 1";

const SELECT_SNAPSHOT: &str =
    "SELECT content, updated_at FROM portfolio_content WHERE id = $1 LIMIT 1";

const SELECT_FOR_UPDATE: &str = "SELECT content FROM portfolio_content WHERE id = $1 FOR UPDATE";

const UPDATE_CONTENT: &str =
    "UPDATE portfolio_content SET content = $1, updated_at = NOW() WHERE id = $2";

const UPSERT_CONTENT: &str = r"
INSERT INTO portfolio_content (id, content, updated_at)
VALUES ($1, $2, NOW())
ON CONFLICT (id)
DO UPDATE SET content = EXCLUDED.content, updated_at = NOW()";

/// Content store backed by a PostgreSQL row.
pub struct PostgresStore {
    pool: PgPool,
    schema: OnceCell<()>,
    seed: Option<FileStore>,
}

impl PostgresStore {
    /// Build a store for `url` without connecting yet.
    ///
    /// `ssl` overrides the URL: `Some(true)` requires TLS (without certificate
    /// verification), `Some(false)` disables it, `None` keeps the URL's
    /// `sslmode`.
    pub fn connect_lazy(url: &str, ssl: Option<bool>) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::NotConfigured(
                "Database connection is not configured.".to_string(),
            ));
        }

        let mut options = PgConnectOptions::from_str(url)?;
        match ssl {
            Some(true) => options = options.ssl_mode(PgSslMode::Require),
            Some(false) => options = options.ssl_mode(PgSslMode::Disable),
            None => {}
        }

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy_with(options);
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            schema: OnceCell::new(),
            seed: None,
        }
    }

    /// Seed an empty row from this file the first time content is read.
    pub fn with_seed(mut self, seed: FileStore) -> Self {
        self.seed = Some(seed);
        self
    }

    async fn ensure_schema(&self) -> Result<()> {
        // A failed attempt leaves the cell empty, so the next call retries.
        self.schema
            .get_or_try_init(|| async {
                sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
                sqlx::query(INSERT_EMPTY_ROW)
                    .bind(CONTENT_ROW_ID)
                    .execute(&self.pool)
                    .await?;
                log::info!("Ensured portfolio_content table");
                Ok::<(), Error>(())
            })
            .await?;
        Ok(())
    }

    async fn seed_if_empty(&self, current: Document) -> Result<Document> {
        if !current.is_empty() {
            return Ok(current);
        }
        let Some(seed_store) = &self.seed else {
            return Ok(current);
        };
        let seed = seed_store.read().await?;
        if seed.is_empty() {
            return Ok(current);
        }

        sqlx::query(UPDATE_CONTENT)
            .bind(Json(&seed))
            .bind(CONTENT_ROW_ID)
            .execute(&self.pool)
            .await?;
        log::info!(
            "Seeded portfolio_content from {}",
            seed_store.path().display()
        );
        Ok(seed)
    }
}

#[async_trait]
impl ContentStore for PostgresStore {
    async fn read(&self) -> Result<Document> {
        self.ensure_schema().await?;
        let row: Option<Value> = sqlx::query_scalar(SELECT_CONTENT)
            .bind(CONTENT_ROW_ID)
            .fetch_optional(&self.pool)
            .await?;
        let current = row.map(document_from_stored).unwrap_or_default();
        self.seed_if_empty(current).await
    }

    async fn write(&self, patch: Document) -> Result<Document> {
        self.ensure_schema().await?;
        // Dropping the transaction on an early return rolls it back.
        let mut tx = self.pool.begin().await?;
        let row: Option<Value> = sqlx::query_scalar(SELECT_FOR_UPDATE)
            .bind(CONTENT_ROW_ID)
            .fetch_optional(&mut *tx)
            .await?;
        let current = row.map(document_from_stored).unwrap_or_default();
        let next = merge(current, patch);

        sqlx::query(UPSERT_CONTENT)
            .bind(CONTENT_ROW_ID)
            .bind(Json(&next))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(next)
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        self.ensure_schema().await?;
        let row: Option<(Value, DateTime<Utc>)> = sqlx::query_as(SELECT_SNAPSHOT)
            .bind(CONTENT_ROW_ID)
            .fetch_optional(&self.pool)
            .await?;
        Ok(match row {
            Some((content, updated_at)) => Snapshot {
                content: document_from_stored(content),
                updated_at: Some(updated_at),
            },
            None => Snapshot::default(),
        })
    }

    async fn replace(&self, next: Document, guard: &dyn OverwriteGuard) -> Result<()> {
        self.ensure_schema().await?;
        let mut tx = self.pool.begin().await?;
        let row: Option<Value> = sqlx::query_scalar(SELECT_FOR_UPDATE)
            .bind(CONTENT_ROW_ID)
            .fetch_optional(&mut *tx)
            .await?;
        let current = row.map(document_from_stored).unwrap_or_default();

        guard.before_overwrite(&current).await?;

        sqlx::query(UPSERT_CONTENT)
            .bind(CONTENT_ROW_ID)
            .bind(Json(&next))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

impl std::fmt::Debug for PostgresStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStore")
            .field("schema_ready", &self.schema.initialized())
            .field("seed", &self.seed.as_ref().map(FileStore::path))
            .finish()
    }
}
