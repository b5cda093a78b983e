// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service facade — the surface the routing/presentation layer talks to.
// Wires the page evaluator, the price calculator, the order store, and
// the blob collaborator into the customer-visible operations.

use std::sync::Arc;

use druckhaus_blob::{BlobStore, format_file_size, object_key};
use druckhaus_core::error::{DruckhausError, Result};
use druckhaus_core::{
    NewOrder, NewOrderFile, Order, OrderFile, OrderId, OrderStatus, PriceList, PrintOptions,
};
use tracing::{info, instrument};

use crate::store::OrderStore;
use crate::{pages, pricing, status};

/// Order intake payload from the caller.
///
/// The total amount is deliberately absent: it is derived here, once, from
/// the options and the evaluated page count, and then frozen on the record.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub code: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    /// Real page count of the uploaded document.
    pub total_pages: u32,
    pub options: PrintOptions,
}

/// The order engine's public face.
///
/// Constructed once at process start with its collaborators injected;
/// tests get isolation by building a fresh service over a fresh store.
/// Cheap to clone and share across request handlers.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    blobs: Arc<dyn BlobStore>,
    prices: PriceList,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>, blobs: Arc<dyn BlobStore>, prices: PriceList) -> Self {
        Self {
            store,
            blobs,
            prices,
        }
    }

    /// Create an order: evaluate the page selection, price it, validate,
    /// and persist. Fails with `DuplicateOrderCode` when the code is
    /// taken and `InvalidInput` on required-field violations.
    #[instrument(skip(self, request), fields(code = %request.code))]
    pub fn place_order(&self, request: OrderRequest) -> Result<Order> {
        let billable = pages::billable_pages(&request.options.pages, request.total_pages);
        let total = pricing::order_total(&self.prices, &request.options, billable);

        let new_order = NewOrder {
            code: request.code,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            customer_phone: request.customer_phone,
            delivery_address: request.delivery_address,
            status: None,
            total_amount: total,
            total_pages: request.total_pages,
            options: request.options,
        };
        new_order.validate()?;

        let order = self.store.create_order(new_order)?;
        info!(id = %order.id, total = %order.total_amount, billable, "order placed");
        Ok(order)
    }

    /// All orders, in creation order.
    pub fn orders(&self) -> Result<Vec<Order>> {
        self.store.orders()
    }

    /// An order and its attached files, looked up by customer-facing code.
    pub fn order_with_files(&self, code: &str) -> Result<Option<(Order, Vec<OrderFile>)>> {
        let Some(order) = self.store.order_by_code(code)? else {
            return Ok(None);
        };
        let files = self.store.files_for_order(order.id)?;
        Ok(Some((order, files)))
    }

    /// Apply an operator's status update. The raw string comes straight
    /// from the caller; unknown statuses are `InvalidInput`, unknown ids
    /// are `None`.
    #[instrument(skip(self), fields(id = %id, status = new_status))]
    pub fn update_status(&self, id: OrderId, new_status: &str) -> Result<Option<Order>> {
        let new_status: OrderStatus = new_status.parse()?;

        let Some(current) = self.store.order(id)? else {
            return Ok(None);
        };
        status::validate_transition(current.status, new_status)?;

        self.store.update_status(id, new_status)
    }

    /// Record a file already uploaded to the blob store against an order.
    pub fn attach_file(&self, new_file: NewOrderFile) -> Result<OrderFile> {
        new_file.validate()?;
        self.store.create_file(new_file)
    }

    /// Files attached to the order with the given code, or `None` when
    /// the code is unknown.
    pub fn files_for_code(&self, code: &str) -> Result<Option<Vec<OrderFile>>> {
        let Some(order) = self.store.order_by_code(code)? else {
            return Ok(None);
        };
        Ok(Some(self.store.files_for_order(order.id)?))
    }

    /// Full upload flow: push the document bytes to the blob store under
    /// a fresh key, then record the file against the order.
    #[instrument(skip(self, bytes), fields(code, file_name, len = bytes.len()))]
    pub fn upload_and_attach(
        &self,
        code: &str,
        file_name: &str,
        file_type: &str,
        bytes: &[u8],
    ) -> Result<OrderFile> {
        let Some(order) = self.store.order_by_code(code)? else {
            return Err(DruckhausError::OrderNotFound(code.to_owned()));
        };

        let key = self.blobs.store(bytes, &object_key(code, file_name))?;

        self.attach_file(NewOrderFile {
            order_id: order.id,
            file_name: file_name.to_owned(),
            file_size: format_file_size(bytes.len() as u64),
            file_key: key,
            file_type: file_type.to_owned(),
        })
    }

    /// Resolve a stored file key to a URL the caller can hand out.
    pub fn file_url(&self, key: &str) -> Result<String> {
        self.blobs.resolve_url(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::MemoryOrderStore;
    use druckhaus_blob::FsBlobStore;
    use druckhaus_core::{ColorMode, PageSelection, Sides};
    use rust_decimal::Decimal;

    fn service(dir: &std::path::Path) -> OrderService {
        OrderService::new(
            Arc::new(MemoryOrderStore::new()),
            Arc::new(FsBlobStore::new(dir)),
            PriceList::default(),
        )
    }

    fn request(code: &str) -> OrderRequest {
        OrderRequest {
            code: code.into(),
            customer_name: "Ada".into(),
            customer_email: "ada@example.com".into(),
            customer_phone: "555-0101".into(),
            delivery_address: "1 Engine Row".into(),
            total_pages: 10,
            options: PrintOptions::default(),
        }
    }

    #[test]
    fn placing_an_order_prices_the_selected_pages() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = service(dir.path());

        let mut req = request("DH-1");
        req.options.pages = PageSelection::Custom {
            ranges: "1-2,3-4,5".into(),
        };

        let order = service.place_order(req).expect("place");
        // 5 billable pages × 1.50 bw single × 1 copy.
        assert_eq!(order.total_amount, Decimal::new(750, 2));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_pages, 10);
    }

    #[test]
    fn colour_double_sided_request_prices_out() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = service(dir.path());

        let mut req = request("DH-1");
        req.total_pages = 3;
        req.options.color = ColorMode::Color;
        req.options.sides = Sides::Double;
        req.options.copies = 2;

        let order = service.place_order(req).expect("place");
        assert_eq!(order.total_amount, Decimal::new(3900, 2));
    }

    #[test]
    fn duplicate_code_surfaces_to_the_caller() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = service(dir.path());

        service.place_order(request("DH-1")).expect("place");
        let result = service.place_order(request("DH-1"));
        assert!(matches!(
            result,
            Err(DruckhausError::DuplicateOrderCode { .. })
        ));
        assert_eq!(service.orders().expect("list").len(), 1);
    }

    #[test]
    fn blank_required_field_is_invalid_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = service(dir.path());

        let mut req = request("DH-1");
        req.customer_email = "".into();
        let result = service.place_order(req);
        assert!(matches!(result, Err(DruckhausError::InvalidInput(_))));
    }

    #[test]
    fn status_updates_parse_validate_and_persist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = service(dir.path());
        let order = service.place_order(request("DH-1")).expect("place");

        let updated = service
            .update_status(order.id, "printing")
            .expect("update")
            .expect("found");
        assert_eq!(updated.status, OrderStatus::Printing);

        // Walking backwards is permitted (operator correction).
        let reverted = service
            .update_status(order.id, "pending")
            .expect("update")
            .expect("found");
        assert_eq!(reverted.status, OrderStatus::Pending);

        assert!(matches!(
            service.update_status(order.id, "exploded"),
            Err(DruckhausError::InvalidInput(_))
        ));
        assert!(
            service
                .update_status(OrderId(99), "printing")
                .expect("update")
                .is_none()
        );
    }

    #[test]
    fn upload_and_attach_stores_bytes_and_records_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = service(dir.path());
        service.place_order(request("DH-1")).expect("place");

        let bytes = vec![0x25u8; 1536]; // 1.5 KB
        let file = service
            .upload_and_attach("DH-1", "flyer.pdf", "application/pdf", &bytes)
            .expect("upload");

        assert_eq!(file.file_size, "1.5 KB");
        assert!(file.file_key.starts_with("orders/DH-1/"));

        let url = service.file_url(&file.file_key).expect("resolve");
        assert!(url.starts_with("file://"));

        let (_, files) = service
            .order_with_files("DH-1")
            .expect("get")
            .expect("found");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "flyer.pdf");
    }

    #[test]
    fn upload_to_unknown_code_is_order_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = service(dir.path());

        let result = service.upload_and_attach("DH-404", "flyer.pdf", "application/pdf", b"x");
        assert!(matches!(result, Err(DruckhausError::OrderNotFound(_))));
    }

    #[test]
    fn file_listing_by_code_distinguishes_empty_from_unknown() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = service(dir.path());
        service.place_order(request("DH-1")).expect("place");

        let files = service.files_for_code("DH-1").expect("list");
        assert!(files.expect("known code").is_empty());

        let unknown = service.files_for_code("DH-404").expect("list");
        assert!(unknown.is_none());
    }

    #[test]
    fn the_sqlite_backend_drops_in_behind_the_same_service() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = OrderService::new(
            Arc::new(crate::sqlite_store::SqliteOrderStore::open_in_memory().expect("open")),
            Arc::new(FsBlobStore::new(dir.path())),
            PriceList::default(),
        );

        let order = service.place_order(request("DH-1")).expect("place");
        let updated = service
            .update_status(order.id, "delivered")
            .expect("update")
            .expect("found");
        assert!(updated.status.is_terminal());
    }
}
