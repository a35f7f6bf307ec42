// src/queries.rs
//
// Fixed aggregation statements. Monetary totals only ever count payments with
// status = 'paid'.

/// A fixed statement plus the shape it is expected to produce.
#[derive(Debug, Clone, Copy)]
pub struct NamedQuery {
    pub name: &'static str,
    pub sql: &'static str,
    pub columns: &'static [&'static str],
    pub row_cap: Option<usize>,
}

pub const USER_SPENDING: NamedQuery = NamedQuery {
    name: "user_spending",
    sql: r#"
        SELECT u.user_id, u.name, u.email,
               COUNT(DISTINCT pr.brand) AS distinct_brands,
               SUM(p.amount) AS total_spent
        FROM users u
        JOIN orders o ON u.user_id = o.user_id
        JOIN payments p ON o.order_id = p.order_id AND p.status = 'paid'
        JOIN order_items oi ON o.order_id = oi.order_id
        JOIN products pr ON oi.product_id = pr.product_id
        GROUP BY u.user_id
        ORDER BY total_spent DESC, u.user_id
        LIMIT 50
    "#,
    columns: &["user_id", "name", "email", "distinct_brands", "total_spent"],
    row_cap: Some(50),
};

/// Binds one argument: "now" as `YYYY-MM-DD HH:MM:SS`.
pub const RFM_ANALYSIS: NamedQuery = NamedQuery {
    name: "rfm_analysis",
    sql: r#"
        WITH last_order AS (
          SELECT user_id, MAX(order_date) AS last_order_date
          FROM orders
          GROUP BY user_id
        ),
        freq AS (
          SELECT user_id, COUNT(*) AS order_count
          FROM orders
          GROUP BY user_id
        ),
        monetary AS (
          SELECT o.user_id, SUM(p.amount) AS total_spent
          FROM orders o
          JOIN payments p ON o.order_id = p.order_id
          WHERE p.status = 'paid'
          GROUP BY o.user_id
        )
        SELECT
          u.user_id,
          u.name,
          u.email,
          ROUND(julianday(?) - julianday(last_order.last_order_date), 1) AS recency_days,
          freq.order_count,
          ROUND(COALESCE(monetary.total_spent, 0), 2) AS total_spent
        FROM users u
        LEFT JOIN last_order ON u.user_id = last_order.user_id
        LEFT JOIN freq ON u.user_id = freq.user_id
        LEFT JOIN monetary ON u.user_id = monetary.user_id
        ORDER BY total_spent DESC, u.user_id
        LIMIT 20
    "#,
    columns: &["user_id", "name", "email", "recency_days", "order_count", "total_spent"],
    row_cap: Some(20),
};

/// `pct_high_sustainability` is NULL when nothing has been paid.
pub const SUSTAINABILITY: NamedQuery = NamedQuery {
    name: "sustainability",
    sql: r#"
        SELECT
          ROUND(COALESCE(SUM(p.amount), 0), 2) AS total_paid,
          ROUND(COALESCE(SUM(CASE WHEN pr.sustainability_score >= 0.7 THEN p.amount ELSE 0 END), 0), 2)
            AS high_sustainability_revenue,
          CASE
            WHEN COALESCE(SUM(p.amount), 0) = 0 THEN NULL
            ELSE ROUND(100.0 * SUM(CASE WHEN pr.sustainability_score >= 0.7 THEN p.amount ELSE 0 END)
                       / SUM(p.amount), 2)
          END AS pct_high_sustainability
        FROM payments p
        JOIN orders o ON p.order_id = o.order_id
        JOIN order_items oi ON oi.order_id = o.order_id
        JOIN products pr ON pr.product_id = oi.product_id
        WHERE p.status = 'paid'
    "#,
    columns: &["total_paid", "high_sustainability_revenue", "pct_high_sustainability"],
    row_cap: Some(1),
};

pub const COHORT: NamedQuery = NamedQuery {
    name: "cohort",
    sql: r#"
        WITH user_cohort AS (
          SELECT user_id, substr(first_order_date, 1, 7) AS cohort_month
          FROM users
          WHERE first_order_date IS NOT NULL
        ),
        orders_month AS (
          SELECT user_id,
                 substr(order_date, 1, 7) AS order_month,
                 SUM(order_value - COALESCE(discount_amount, 0)) AS revenue
          FROM orders
          GROUP BY user_id, order_month
        )
        SELECT c.cohort_month, o.order_month,
               COUNT(DISTINCT o.user_id) AS active_users,
               ROUND(SUM(o.revenue), 2) AS revenue
        FROM user_cohort c
        JOIN orders_month o ON c.user_id = o.user_id
        GROUP BY c.cohort_month, o.order_month
        ORDER BY c.cohort_month, o.order_month
        LIMIT 50
    "#,
    columns: &["cohort_month", "order_month", "active_users", "revenue"],
    row_cap: Some(50),
};

// ─────────────────────────────────────────────────────────────────────────────
// Stats scalars (one round-trip each)
// ─────────────────────────────────────────────────────────────────────────────

pub const STATS_TOTAL_USERS: NamedQuery = NamedQuery {
    name: "stats_total_users",
    sql: "SELECT COUNT(*) AS count FROM users",
    columns: &["count"],
    row_cap: Some(1),
};

pub const STATS_TOTAL_ORDERS: NamedQuery = NamedQuery {
    name: "stats_total_orders",
    sql: "SELECT COUNT(*) AS count FROM orders",
    columns: &["count"],
    row_cap: Some(1),
};

pub const STATS_TOTAL_REVENUE: NamedQuery = NamedQuery {
    name: "stats_total_revenue",
    sql: "SELECT ROUND(COALESCE(SUM(amount), 0), 2) AS total FROM payments WHERE status = 'paid'",
    columns: &["total"],
    row_cap: Some(1),
};

pub const STATS_TOTAL_PRODUCTS: NamedQuery = NamedQuery {
    name: "stats_total_products",
    sql: "SELECT COUNT(*) AS count FROM products",
    columns: &["count"],
    row_cap: Some(1),
};

/// Liveness check for `/health`.
pub const HEALTH_PROBE: NamedQuery = NamedQuery {
    name: "health_probe",
    sql: "SELECT 1 AS ok",
    columns: &["ok"],
    row_cap: Some(1),
};
