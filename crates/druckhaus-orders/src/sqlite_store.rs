// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Durable order store backed by SQLite.
//
// Proves the `OrderStore` seam with a persistent backend: orders survive
// process restarts, the code-uniqueness invariant is carried by a UNIQUE
// constraint, and print options travel as a JSON column. Document bytes
// are NOT stored here — they live in the blob store and are referenced
// by key.

use std::str::FromStr;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use druckhaus_core::error::{DruckhausError, Result};
use druckhaus_core::{NewOrder, NewOrderFile, Order, OrderFile, OrderId, OrderStatus, PrintOptions};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::store::OrderStore;

/// SQLite schema for the order tables.
const CREATE_TABLES_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        code TEXT NOT NULL UNIQUE,
        customer_name TEXT NOT NULL,
        customer_email TEXT NOT NULL,
        customer_phone TEXT NOT NULL,
        delivery_address TEXT NOT NULL,
        status TEXT NOT NULL,
        total_amount TEXT NOT NULL,
        total_pages INTEGER NOT NULL,
        options TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS order_files (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_id INTEGER NOT NULL REFERENCES orders(id),
        file_name TEXT NOT NULL,
        file_size TEXT NOT NULL,
        file_key TEXT NOT NULL,
        file_type TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
"#;

const ORDER_COLUMNS: &str = "id, code, customer_name, customer_email, customer_phone,
     delivery_address, status, total_amount, total_pages, options,
     created_at, updated_at";

/// Durable order store backed by a SQLite database.
///
/// `rusqlite::Connection` is `Send` but not `Sync`, so the connection sits
/// behind a mutex; every operation is a sub-millisecond query, so
/// contention is negligible.
pub struct SqliteOrderStore {
    conn: Mutex<Connection>,
}

impl SqliteOrderStore {
    /// Open (or create) the order database at the given path.
    ///
    /// Applies WAL journal mode for better concurrent-read behaviour and
    /// creates the tables if they do not exist.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| DruckhausError::Database(format!("open: {e}")))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DruckhausError::Database(format!("WAL pragma: {e}")))?;

        conn.execute_batch(CREATE_TABLES_SQL)
            .map_err(|e| DruckhausError::Database(format!("create tables: {e}")))?;

        info!("order database opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DruckhausError::Database(format!("open in-memory: {e}")))?;

        conn.execute_batch(CREATE_TABLES_SQL)
            .map_err(|e| DruckhausError::Database(format!("create tables: {e}")))?;

        debug!("in-memory order database opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn fetch_order(conn: &Connection, id: i64) -> Result<Option<Order>> {
        let mut stmt = conn
            .prepare(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"))
            .map_err(|e| DruckhausError::Database(format!("prepare fetch_order: {e}")))?;

        let mut rows = stmt
            .query_map(params![id], row_to_order)
            .map_err(|e| DruckhausError::Database(format!("query fetch_order: {e}")))?;

        match rows.next() {
            Some(Ok(order)) => Ok(Some(order)),
            Some(Err(e)) => Err(DruckhausError::Database(format!("row parse: {e}"))),
            None => Ok(None),
        }
    }
}

impl OrderStore for SqliteOrderStore {
    #[instrument(skip(self, new_order), fields(code = %new_order.code))]
    fn create_order(&self, new_order: NewOrder) -> Result<Order> {
        let conn = self.conn.lock().expect("connection lock poisoned");

        let status = new_order.status.unwrap_or(OrderStatus::Pending);
        let options_json = serde_json::to_string(&new_order.options)?;
        let now = Utc::now();

        let insert = conn.execute(
            "INSERT INTO orders (code, customer_name, customer_email, customer_phone,
             delivery_address, status, total_amount, total_pages, options,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                new_order.code,
                new_order.customer_name,
                new_order.customer_email,
                new_order.customer_phone,
                new_order.delivery_address,
                status.as_str(),
                new_order.total_amount.to_string(),
                new_order.total_pages,
                options_json,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        );

        match insert {
            Ok(_) => {}
            // The UNIQUE constraint on `code` carries the duplicate check.
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(DruckhausError::DuplicateOrderCode {
                    code: new_order.code,
                });
            }
            Err(e) => {
                return Err(DruckhausError::Database(format!("insert order: {e}")));
            }
        }

        let id = OrderId(conn.last_insert_rowid());
        info!(id = %id, "order created");

        Ok(Order {
            id,
            code: new_order.code,
            customer_name: new_order.customer_name,
            customer_email: new_order.customer_email,
            customer_phone: new_order.customer_phone,
            delivery_address: new_order.delivery_address,
            status,
            total_amount: new_order.total_amount,
            total_pages: new_order.total_pages,
            options: new_order.options,
            created_at: now,
            updated_at: now,
        })
    }

    fn order(&self, id: OrderId) -> Result<Option<Order>> {
        let conn = self.conn.lock().expect("connection lock poisoned");
        Self::fetch_order(&conn, id.0)
    }

    fn order_by_code(&self, code: &str) -> Result<Option<Order>> {
        let conn = self.conn.lock().expect("connection lock poisoned");

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders WHERE code = ?1"
            ))
            .map_err(|e| DruckhausError::Database(format!("prepare order_by_code: {e}")))?;

        let mut rows = stmt
            .query_map(params![code], row_to_order)
            .map_err(|e| DruckhausError::Database(format!("query order_by_code: {e}")))?;

        match rows.next() {
            Some(Ok(order)) => Ok(Some(order)),
            Some(Err(e)) => Err(DruckhausError::Database(format!("row parse: {e}"))),
            None => Ok(None),
        }
    }

    fn orders(&self) -> Result<Vec<Order>> {
        let conn = self.conn.lock().expect("connection lock poisoned");

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders ORDER BY id ASC"
            ))
            .map_err(|e| DruckhausError::Database(format!("prepare orders: {e}")))?;

        let orders = stmt
            .query_map([], row_to_order)
            .map_err(|e| DruckhausError::Database(format!("query orders: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| DruckhausError::Database(format!("collect rows: {e}")))?;

        debug!(count = orders.len(), "retrieved all orders");
        Ok(orders)
    }

    #[instrument(skip(self), fields(id = %id, status = %status))]
    fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Option<Order>> {
        let conn = self.conn.lock().expect("connection lock poisoned");

        let rows = conn
            .execute(
                "UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3",
                params![status.as_str(), Utc::now().to_rfc3339(), id.0],
            )
            .map_err(|e| DruckhausError::Database(format!("update status: {e}")))?;

        if rows == 0 {
            debug!("status update for unknown order");
            return Ok(None);
        }

        debug!("order status updated");
        Self::fetch_order(&conn, id.0)
    }

    #[instrument(skip(self, new_file), fields(order_id = %new_file.order_id))]
    fn create_file(&self, new_file: NewOrderFile) -> Result<OrderFile> {
        let conn = self.conn.lock().expect("connection lock poisoned");

        // Parent check and insert happen under the same connection lock.
        let parent_exists = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM orders WHERE id = ?1)",
                params![new_file.order_id.0],
                |row| row.get::<_, bool>(0),
            )
            .map_err(|e| DruckhausError::Database(format!("check parent order: {e}")))?;

        if !parent_exists {
            return Err(DruckhausError::OrderNotFound(new_file.order_id.to_string()));
        }

        let now = Utc::now();
        conn.execute(
            "INSERT INTO order_files (order_id, file_name, file_size, file_key,
             file_type, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new_file.order_id.0,
                new_file.file_name,
                new_file.file_size,
                new_file.file_key,
                new_file.file_type,
                now.to_rfc3339(),
            ],
        )
        .map_err(|e| DruckhausError::Database(format!("insert order file: {e}")))?;

        let file = OrderFile {
            id: conn.last_insert_rowid(),
            order_id: new_file.order_id,
            file_name: new_file.file_name,
            file_size: new_file.file_size,
            file_key: new_file.file_key,
            file_type: new_file.file_type,
            created_at: now,
        };

        info!(file_id = file.id, "order file attached");
        Ok(file)
    }

    fn files_for_order(&self, order_id: OrderId) -> Result<Vec<OrderFile>> {
        let conn = self.conn.lock().expect("connection lock poisoned");

        let mut stmt = conn
            .prepare(
                "SELECT id, order_id, file_name, file_size, file_key, file_type, created_at
                 FROM order_files WHERE order_id = ?1 ORDER BY id ASC",
            )
            .map_err(|e| DruckhausError::Database(format!("prepare files_for_order: {e}")))?;

        let files = stmt
            .query_map(params![order_id.0], row_to_order_file)
            .map_err(|e| DruckhausError::Database(format!("query files_for_order: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| DruckhausError::Database(format!("collect rows: {e}")))?;

        Ok(files)
    }
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn parse_timestamp(column: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Map a SQLite row to an `Order`.
///
/// Column indices must match `ORDER_COLUMNS`.
fn row_to_order(row: &rusqlite::Row<'_>) -> rusqlite::Result<Order> {
    let status_str: String = row.get(6)?;
    let amount_str: String = row.get(7)?;
    let options_json: String = row.get(9)?;
    let created_at_str: String = row.get(10)?;
    let updated_at_str: String = row.get(11)?;

    let status = OrderStatus::from_str(&status_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let total_amount = Decimal::from_str(&amount_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let options: PrintOptions = serde_json::from_str(&options_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Order {
        id: OrderId(row.get(0)?),
        code: row.get(1)?,
        customer_name: row.get(2)?,
        customer_email: row.get(3)?,
        customer_phone: row.get(4)?,
        delivery_address: row.get(5)?,
        status,
        total_amount,
        total_pages: row.get(8)?,
        options,
        created_at: parse_timestamp(10, &created_at_str)?,
        updated_at: parse_timestamp(11, &updated_at_str)?,
    })
}

fn row_to_order_file(row: &rusqlite::Row<'_>) -> rusqlite::Result<OrderFile> {
    let created_at_str: String = row.get(6)?;

    Ok(OrderFile {
        id: row.get(0)?,
        order_id: OrderId(row.get(1)?),
        file_name: row.get(2)?,
        file_size: row.get(3)?,
        file_key: row.get(4)?,
        file_type: row.get(5)?,
        created_at: parse_timestamp(6, &created_at_str)?,
    })
}
