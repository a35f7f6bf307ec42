// src/test_support.rs
//
// Throwaway SQLite stores with the shop schema, one file per test.

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, Executor};
use tempfile::TempDir;

use crate::clock::{Clock, FixedClock};
use crate::db::{ConnectionProvider, QueryExecutor, SqliteExecutor};
use crate::AppState;

const SCHEMA: &str = r#"
CREATE TABLE users (
    user_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    first_order_date TEXT
);
CREATE TABLE orders (
    order_id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    order_date TEXT NOT NULL,
    order_value REAL NOT NULL,
    discount_amount REAL
);
CREATE TABLE payments (
    payment_id INTEGER PRIMARY KEY,
    order_id INTEGER NOT NULL,
    amount REAL NOT NULL,
    status TEXT NOT NULL
);
CREATE TABLE order_items (
    order_item_id INTEGER PRIMARY KEY,
    order_id INTEGER NOT NULL,
    product_id INTEGER NOT NULL
);
CREATE TABLE products (
    product_id INTEGER PRIMARY KEY,
    brand TEXT NOT NULL,
    sustainability_score REAL NOT NULL
);
"#;

/// `ecom.db` inside a temp dir; the dir goes away with the store.
pub struct TestStore {
    _dir: TempDir,
    path: PathBuf,
}

impl TestStore {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("ecom.db");

        let store = Self { _dir: dir, path };
        store.seed(SCHEMA).await;
        store
    }

    fn write_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new().filename(&self.path).create_if_missing(true)
    }

    /// Runs one or more `;`-separated statements on a short-lived writer connection.
    pub async fn seed(&self, sql: &str) {
        let mut conn = self.write_options().connect().await.expect("open test store");
        conn.execute(sql).await.expect("seed test store");
        conn.close().await.expect("close test store");
    }

    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }

    pub fn executor(&self) -> SqliteExecutor {
        let provider = ConnectionProvider::new(&self.url()).expect("valid store url");
        SqliteExecutor::new(provider)
    }

    pub fn state_at(&self, now: &str) -> AppState {
        state_with(Arc::new(self.executor()), FixedClock::at(now))
    }
}

pub fn state_with(executor: Arc<dyn QueryExecutor>, clock: impl Clock + 'static) -> AppState {
    AppState { executor, clock: Arc::new(clock) }
}

// ─────────────────────────────────────────────────────────────────────────────
// Seed helpers (SQL text for TestStore::seed)
// ─────────────────────────────────────────────────────────────────────────────

pub fn user(id: i64, first_order_date: Option<&str>) -> String {
    let first = first_order_date.map(|d| format!("'{d}'")).unwrap_or_else(|| "NULL".into());
    format!(
        "INSERT INTO users VALUES ({id}, 'User {id}', 'user{id}@shop.test', {first});"
    )
}

pub fn order(id: i64, user_id: i64, date: &str, value: f64, discount: Option<f64>) -> String {
    let discount = discount.map(|d| d.to_string()).unwrap_or_else(|| "NULL".into());
    format!("INSERT INTO orders VALUES ({id}, {user_id}, '{date}', {value}, {discount});")
}

pub fn payment(order_id: i64, amount: f64, status: &str) -> String {
    format!(
        "INSERT INTO payments (order_id, amount, status) VALUES ({order_id}, {amount}, '{status}');"
    )
}

pub fn item(order_id: i64, product_id: i64) -> String {
    format!("INSERT INTO order_items (order_id, product_id) VALUES ({order_id}, {product_id});")
}

pub fn product(id: i64, brand: &str, score: f64) -> String {
    format!("INSERT INTO products VALUES ({id}, '{brand}', {score});")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_lives_in_its_own_temp_dir() {
        let a = TestStore::new().await;
        let b = TestStore::new().await;
        assert_ne!(a.path, b.path);
        assert!(a.path.exists());

        let dir = a.path.parent().unwrap().to_path_buf();
        drop(a);
        assert!(!dir.exists());
    }
}
