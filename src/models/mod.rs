// src/models/mod.rs

use serde::Serialize;
use serde_json::{Map, Value};

// ───────────────────────────────────────
// Raw executor output
// ───────────────────────────────────────

/// Columns in projection order plus fully materialized, positional rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// First column of the first row, if any.
    pub fn scalar(&self) -> Option<&Value> {
        self.rows.first().and_then(|r| r.first())
    }

    pub fn into_table(self) -> TableResponse {
        let QueryResult { columns, rows } = self;
        let rows = rows
            .into_iter()
            .map(|values| columns.iter().cloned().zip(values).collect::<Map<_, _>>())
            .collect();
        TableResponse { columns, rows }
    }
}

// ───────────────────────────────────────
// Response envelopes
// ───────────────────────────────────────

/// `{columns, rows}`; each row is keyed by column name.
#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

/// Flat scalar metrics served by `/api/stats`.
#[derive(Debug, Serialize, PartialEq)]
pub struct StatsResponse {
    pub total_users: i64,
    pub total_orders: i64,
    pub total_revenue: f64,
    pub total_products: i64,
}
