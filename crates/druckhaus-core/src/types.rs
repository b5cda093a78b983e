// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Druckhaus order engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DruckhausError, Result};

/// Store-assigned numeric identifier for an order.
///
/// Distinct from the caller-supplied [`Order::code`], which is the
/// human-readable identifier customers use to track their order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub i64);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle states of an order.
///
/// The expected progression is pending → printing → shipped → delivered,
/// but the transition policy is deliberately permissive — see
/// `druckhaus-orders::status` for the validation seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Received, awaiting the print room.
    Pending,
    /// Currently on a press.
    Printing,
    /// Handed to the courier.
    Shipped,
    /// Confirmed received by the customer.
    Delivered,
}

impl OrderStatus {
    /// Wire/display form, matching the stored lowercase strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Printing => "printing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        }
    }

    /// Whether this status ends the expected progression.
    ///
    /// Descriptive only — further transitions are not blocked.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = DruckhausError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(Self::Pending),
            "printing" => Ok(Self::Printing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            other => Err(DruckhausError::InvalidInput(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

/// Paper stock options offered by the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperType {
    Standard,
    Premium,
    Glossy,
}

/// Colour mode. Drives the per-page base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Bw,
    Color,
}

/// Single- or double-sided printing. Double-sided carries a per-page surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sides {
    Single,
    Double,
}

/// Which pages of the document to print.
///
/// The custom expression is kept verbatim as entered by the customer;
/// evaluation (and its clamp to the document's real extent) happens in
/// `druckhaus-orders::pages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PageSelection {
    /// Print the whole document.
    All,
    /// Comma-separated page numbers and/or hyphenated ranges, e.g. "1-3,5".
    Custom { ranges: String },
}

/// Print options for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintOptions {
    pub paper: PaperType,
    pub color: ColorMode,
    pub sides: Sides,
    pub pages: PageSelection,
    pub copies: u32,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            paper: PaperType::Standard,
            color: ColorMode::Bw,
            sides: Sides::Single,
            pages: PageSelection::All,
            copies: 1,
        }
    }
}

/// A complete order record as held by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Caller-supplied human-readable code. Unique across the store's
    /// lifetime and immutable once created.
    pub code: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub status: OrderStatus,
    /// Fixed at creation from the price calculator; never recomputed on read.
    pub total_amount: Decimal,
    pub total_pages: u32,
    pub options: PrintOptions,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for an order — everything except the store-assigned
/// id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub code: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    /// Defaults to [`OrderStatus::Pending`] when omitted.
    pub status: Option<OrderStatus>,
    pub total_amount: Decimal,
    pub total_pages: u32,
    pub options: PrintOptions,
}

impl NewOrder {
    /// Check the required-field and range invariants before storage.
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(DruckhausError::InvalidInput("order code is empty".into()));
        }
        if self.customer_name.trim().is_empty() {
            return Err(DruckhausError::InvalidInput(
                "customer name is empty".into(),
            ));
        }
        if self.customer_email.trim().is_empty() {
            return Err(DruckhausError::InvalidInput(
                "customer email is empty".into(),
            ));
        }
        if self.customer_phone.trim().is_empty() {
            return Err(DruckhausError::InvalidInput(
                "customer phone is empty".into(),
            ));
        }
        if self.total_pages == 0 {
            return Err(DruckhausError::InvalidInput(
                "total pages must be at least 1".into(),
            ));
        }
        if self.options.copies == 0 {
            return Err(DruckhausError::InvalidInput(
                "copies must be at least 1".into(),
            ));
        }
        if self.total_amount < Decimal::ZERO {
            return Err(DruckhausError::InvalidInput(
                "total amount must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// A file attached to an order.
///
/// Weak reference: `order_id` must point at an existing order when the
/// record is created, but files are never mutated or deleted in-scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderFile {
    pub id: i64,
    pub order_id: OrderId,
    pub file_name: String,
    /// Human-readable size string (e.g. "2.5 MB"), as supplied by the
    /// upload flow.
    pub file_size: String,
    /// Opaque key from the blob store.
    pub file_key: String,
    /// MIME-ish type string, not validated against the file content.
    pub file_type: String,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for an order file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderFile {
    pub order_id: OrderId,
    pub file_name: String,
    pub file_size: String,
    pub file_key: String,
    pub file_type: String,
}

impl NewOrderFile {
    pub fn validate(&self) -> Result<()> {
        if self.file_name.trim().is_empty() {
            return Err(DruckhausError::InvalidInput("file name is empty".into()));
        }
        if self.file_key.trim().is_empty() {
            return Err(DruckhausError::InvalidInput("file key is empty".into()));
        }
        Ok(())
    }
}
