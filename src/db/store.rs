//! SQLite-backed [`KeyValueStore`]: JSON values in `kv`, audit lines in `log`.

use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{self, LogRow};
use crate::errors::AppResult;
use crate::storage::{KeyValueStore, StoreResult};
use serde_json::Value;
use std::collections::HashMap;

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Opens the database and brings its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn log_rows(&self) -> AppResult<Vec<LogRow>> {
        Ok(queries::load_log(&self.pool.conn)?)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, keys: &[&str]) -> StoreResult<HashMap<String, Option<Value>>> {
        let mut out = HashMap::with_capacity(keys.len());
        for key in keys {
            let value = match queries::kv_get(&self.pool.conn, key)? {
                Some(raw) => match serde_json::from_str::<Value>(&raw) {
                    Ok(v) => Some(v),
                    Err(e) => {
                        tracing::warn!(key, error = %e, "stored value is not valid JSON, ignoring");
                        None
                    }
                },
                None => None,
            };
            out.insert(key.to_string(), value);
        }
        Ok(out)
    }

    fn set(&mut self, items: Vec<(String, Value)>) -> StoreResult<()> {
        self.pool.with_conn(|conn| {
            let tx = conn.transaction()?;
            for (key, value) in &items {
                queries::kv_set(&tx, key, &value.to_string())?;
            }
            tx.commit()
        })?;
        Ok(())
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> StoreResult<()> {
        ttlog(&self.pool.conn, operation, target, message)
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
