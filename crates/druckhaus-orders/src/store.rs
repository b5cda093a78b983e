// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The storage contract for orders and their attached files.

use druckhaus_core::error::Result;
use druckhaus_core::{NewOrder, NewOrderFile, Order, OrderFile, OrderId, OrderStatus};

/// Persistence contract for the order engine.
///
/// Implementations own all `Order` and `OrderFile` records exclusively and
/// must be safe under concurrent invocation: id assignment is atomically
/// unique, the code-uniqueness check and insert happen as one unit, and
/// readers never observe a partially written record.
///
/// Absence is not an error — lookups and `update_status` return `Ok(None)`
/// for unknown ids/codes. Errors are reserved for constraint violations
/// (`DuplicateOrderCode`, `OrderNotFound` on file creation) and backend
/// failures.
pub trait OrderStore: Send + Sync {
    /// Assign the next sequential id, stamp both timestamps with the
    /// current time, and store the order. The status defaults to
    /// `Pending` when the payload omits it. Fails with
    /// `DuplicateOrderCode` if the code is already taken.
    fn create_order(&self, new_order: NewOrder) -> Result<Order>;

    /// Look up an order by its store-assigned id.
    fn order(&self, id: OrderId) -> Result<Option<Order>>;

    /// Look up an order by its customer-facing code.
    fn order_by_code(&self, code: &str) -> Result<Option<Order>>;

    /// All orders, in creation (id) order.
    fn orders(&self) -> Result<Vec<Order>>;

    /// Set the order's status and refresh `updated_at`. Transition
    /// legality is the caller's concern (see the `status` module); this
    /// only persists. Returns the updated order, or `None` for an
    /// unknown id.
    fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Option<Order>>;

    /// Attach a file record to an existing order. Fails with
    /// `OrderNotFound` when `order_id` does not reference a stored order.
    fn create_file(&self, new_file: NewOrderFile) -> Result<OrderFile>;

    /// All files attached to the given order, in attachment order. An
    /// unknown order id simply has no files.
    fn files_for_order(&self, order_id: OrderId) -> Result<Vec<OrderFile>>;
}
