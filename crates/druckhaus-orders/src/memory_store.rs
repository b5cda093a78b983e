// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory order store — the default backend for development and tests.
//
// Orders and files live in two independently locked tables so that file
// reads never contend with order writes. Where an operation touches both
// (file creation checks its parent order), the orders lock is always
// taken first.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use chrono::Utc;
use druckhaus_core::error::{DruckhausError, Result};
use druckhaus_core::{NewOrder, NewOrderFile, Order, OrderFile, OrderId, OrderStatus};
use tracing::{debug, info, instrument};

use crate::store::OrderStore;

#[derive(Default)]
struct OrderTable {
    /// Last assigned id; the first order gets id 1.
    last_id: i64,
    /// Keyed by id — iteration yields creation order.
    by_id: BTreeMap<i64, Order>,
    /// Code → id index backing the uniqueness invariant.
    id_by_code: HashMap<String, i64>,
}

#[derive(Default)]
struct FileTable {
    last_id: i64,
    /// Files grouped by owning order id, in attachment order.
    by_order: HashMap<i64, Vec<OrderFile>>,
}

/// Order store holding everything in process memory.
///
/// Construct one at startup and share it (`Arc<MemoryOrderStore>`); there
/// is deliberately no ambient singleton, so tests get isolation from a
/// fresh instance each.
#[derive(Default)]
pub struct MemoryOrderStore {
    orders: Mutex<OrderTable>,
    files: Mutex<FileTable>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for MemoryOrderStore {
    #[instrument(skip(self, new_order), fields(code = %new_order.code))]
    fn create_order(&self, new_order: NewOrder) -> Result<Order> {
        // Uniqueness check, id assignment, and insert all happen under
        // the one lock — concurrent creates cannot race the check.
        let mut orders = self.orders.lock().expect("orders lock poisoned");

        if orders.id_by_code.contains_key(&new_order.code) {
            return Err(DruckhausError::DuplicateOrderCode {
                code: new_order.code,
            });
        }

        orders.last_id += 1;
        let id = OrderId(orders.last_id);
        let now = Utc::now();

        let order = Order {
            id,
            code: new_order.code,
            customer_name: new_order.customer_name,
            customer_email: new_order.customer_email,
            customer_phone: new_order.customer_phone,
            delivery_address: new_order.delivery_address,
            status: new_order.status.unwrap_or(OrderStatus::Pending),
            total_amount: new_order.total_amount,
            total_pages: new_order.total_pages,
            options: new_order.options,
            created_at: now,
            updated_at: now,
        };

        orders.id_by_code.insert(order.code.clone(), id.0);
        orders.by_id.insert(id.0, order.clone());

        info!(%id, "order created");
        Ok(order)
    }

    fn order(&self, id: OrderId) -> Result<Option<Order>> {
        let orders = self.orders.lock().expect("orders lock poisoned");
        Ok(orders.by_id.get(&id.0).cloned())
    }

    fn order_by_code(&self, code: &str) -> Result<Option<Order>> {
        let orders = self.orders.lock().expect("orders lock poisoned");
        let id = orders.id_by_code.get(code);
        Ok(id.and_then(|id| orders.by_id.get(id)).cloned())
    }

    fn orders(&self) -> Result<Vec<Order>> {
        let orders = self.orders.lock().expect("orders lock poisoned");
        Ok(orders.by_id.values().cloned().collect())
    }

    #[instrument(skip(self), fields(id = %id, status = %status))]
    fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Option<Order>> {
        let mut orders = self.orders.lock().expect("orders lock poisoned");

        let Some(order) = orders.by_id.get_mut(&id.0) else {
            debug!("status update for unknown order");
            return Ok(None);
        };

        order.status = status;
        order.updated_at = Utc::now();

        debug!("order status updated");
        Ok(Some(order.clone()))
    }

    #[instrument(skip(self, new_file), fields(order_id = %new_file.order_id))]
    fn create_file(&self, new_file: NewOrderFile) -> Result<OrderFile> {
        // Orders lock first, held across the files insert so the parent
        // check and the attach form one unit.
        let orders = self.orders.lock().expect("orders lock poisoned");
        if !orders.by_id.contains_key(&new_file.order_id.0) {
            return Err(DruckhausError::OrderNotFound(new_file.order_id.to_string()));
        }

        let mut files = self.files.lock().expect("files lock poisoned");
        files.last_id += 1;

        let file = OrderFile {
            id: files.last_id,
            order_id: new_file.order_id,
            file_name: new_file.file_name,
            file_size: new_file.file_size,
            file_key: new_file.file_key,
            file_type: new_file.file_type,
            created_at: Utc::now(),
        };

        files
            .by_order
            .entry(file.order_id.0)
            .or_default()
            .push(file.clone());

        info!(file_id = file.id, "order file attached");
        Ok(file)
    }

    fn files_for_order(&self, order_id: OrderId) -> Result<Vec<OrderFile>> {
        let files = self.files.lock().expect("files lock poisoned");
        Ok(files.by_order.get(&order_id.0).cloned().unwrap_or_default())
    }
}
