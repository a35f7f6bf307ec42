// src/db/mod.rs

use std::str::FromStr;

use async_trait::async_trait;
use serde_json::{Number, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Executor, Row, Statement, TypeInfo, ValueRef};

use crate::{error::AppError, models::QueryResult};

/// Single entry point every endpoint funnels its SQL through.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Runs one complete statement. `args` bind positionally to `?` placeholders.
    async fn execute(&self, sql: &str, args: &[String]) -> Result<QueryResult, AppError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Connection provider
// ─────────────────────────────────────────────────────────────────────────────

/// Opens a fresh connection to the store on every call. No pool, no retry.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    options: SqliteConnectOptions,
}

impl ConnectionProvider {
    /// The store is owned elsewhere: opened read-only, and a missing file is an error.
    pub fn new(database_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(false)
            .read_only(true);
        Ok(Self { options })
    }

    pub async fn open(&self) -> Result<SqliteConnection, AppError> {
        self.options
            .connect()
            .await
            .map_err(|e| AppError::Connectivity(e.to_string()))
    }

    /// Opens and closes one connection so startup can report an unreachable store early.
    pub async fn ping(&self) -> Result<(), AppError> {
        let conn = self.open().await?;
        conn.close().await.map_err(|e| AppError::Connectivity(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite executor
// ─────────────────────────────────────────────────────────────────────────────

pub struct SqliteExecutor {
    provider: ConnectionProvider,
}

impl SqliteExecutor {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl QueryExecutor for SqliteExecutor {
    async fn execute(&self, sql: &str, args: &[String]) -> Result<QueryResult, AppError> {
        let mut conn = self.provider.open().await?;

        let result = run(&mut conn, sql, args).await;

        // released on the error path too
        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, "failed to close store connection");
        }

        result.map_err(|e| AppError::Query(e.to_string()))
    }
}

async fn run(
    conn: &mut SqliteConnection,
    sql: &str,
    args: &[String],
) -> Result<QueryResult, sqlx::Error> {
    // columns come from the prepared statement so empty results keep their shape
    let statement = (&mut *conn).prepare(sql).await?;
    let columns: Vec<String> = statement
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let mut query = statement.query();
    for arg in args {
        query = query.bind(arg.as_str());
    }
    let rows = query.fetch_all(&mut *conn).await?;

    let rows = rows.iter().map(decode_row).collect::<Result<Vec<_>, _>>()?;
    Ok(QueryResult { columns, rows })
}

fn decode_row(row: &SqliteRow) -> Result<Vec<Value>, sqlx::Error> {
    (0..row.len()).map(|i| decode_column(row, i)).collect()
}

/// Maps a value by its runtime storage class, not the declared column type.
fn decode_column(row: &SqliteRow, index: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let value = match raw.type_info().name() {
        "INTEGER" => Value::from(row.try_get::<i64, _>(index)?),
        "REAL" => Number::from_f64(row.try_get::<f64, _>(index)?)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "BLOB" => {
            let bytes: Vec<u8> = row.try_get(index)?;
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        }
        _ => Value::String(row.try_get::<String, _>(index)?),
    };
    Ok(value)
}
