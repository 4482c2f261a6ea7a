use crate::defaults::DEFAULT_SYMBOLS;
use async_trait::async_trait;
use reversal_core::{StoreError, SymbolStore};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::collections::BTreeSet;

/// Universe stored in a `symbols` table keyed by ticker.
pub struct PgSymbolStore {
    pool: PgPool,
    seed_defaults: bool,
}

impl PgSymbolStore {
    /// Connects to `PostgreSQL` and makes sure the `symbols` table exists.
    ///
    /// # Errors
    /// Returns an error if the connection cannot be established or the table
    /// cannot be created.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        seed_defaults: bool,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(db_error)?;

        let store = Self::from_pool(pool, seed_defaults);
        store.ensure_schema().await?;
        Ok(store)
    }

    #[must_use]
    pub const fn from_pool(pool: PgPool, seed_defaults: bool) -> Self {
        Self {
            pool,
            seed_defaults,
        }
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS symbols (
                symbol TEXT PRIMARY KEY,
                added_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    async fn seed(&self) -> Result<BTreeSet<String>, StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        for symbol in DEFAULT_SYMBOLS {
            sqlx::query("INSERT INTO symbols (symbol) VALUES ($1) ON CONFLICT (symbol) DO NOTHING")
                .bind(*symbol)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        tracing::info!("Initialized symbols table with {} default symbols", DEFAULT_SYMBOLS.len());

        Ok(DEFAULT_SYMBOLS.iter().map(|s| (*s).to_string()).collect())
    }
}

fn db_error(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

#[async_trait]
impl SymbolStore for PgSymbolStore {
    async fn list(&self) -> Result<BTreeSet<String>, StoreError> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT symbol FROM symbols ORDER BY symbol")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        if rows.is_empty() && self.seed_defaults {
            return self.seed().await;
        }

        Ok(rows.into_iter().map(|(symbol,)| symbol).collect())
    }

    async fn add(&self, symbol: &str) -> Result<(), StoreError> {
        let result = sqlx::query("INSERT INTO symbols (symbol) VALUES ($1) ON CONFLICT (symbol) DO NOTHING")
            .bind(symbol)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists(symbol.to_string()));
        }
        Ok(())
    }

    async fn remove(&self, symbol: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM symbols WHERE symbol = $1")
            .bind(symbol)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(symbol.to_string()));
        }
        Ok(())
    }
}
