// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckhaus Orders — the order processing engine. Evaluates page-range
// selections, prices print jobs, persists orders and their attached files
// behind the `OrderStore` trait, and exposes the whole flow to the routing
// layer through `OrderService`.

pub mod memory_store;
pub mod pages;
pub mod pricing;
pub mod service;
pub mod sqlite_store;
pub mod status;
pub mod store;

pub use memory_store::MemoryOrderStore;
pub use service::{OrderRequest, OrderService};
pub use sqlite_store::SqliteOrderStore;
pub use store::OrderStore;
