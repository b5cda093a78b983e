// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Druckhaus.

use thiserror::Error;

/// Top-level error type for all Druckhaus operations.
///
/// Every variant is a local, recoverable condition reported back to the
/// caller; nothing here is process-fatal. Lookups that merely miss signal
/// absence with `Ok(None)` rather than an error.
#[derive(Debug, Error)]
pub enum DruckhausError {
    // -- Order engine errors --
    #[error("order code already taken: {code}")]
    DuplicateOrderCode { code: String },

    /// The referenced order does not exist. Carries the id or code the
    /// caller used, for the error message only.
    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // -- Storage / persistence --
    #[error("database error: {0}")]
    Database(String),

    // -- Blob store --
    #[error("blob store error: {0}")]
    Blob(String),

    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DruckhausError>;
