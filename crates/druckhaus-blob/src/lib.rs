// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckhaus Blob — boundary to the object store that holds uploaded
// document bytes. The order engine only ever sees opaque keys; whichever
// backend sits behind the trait (S3, local disk, ...) owns durability.

pub mod fs;
pub mod integrity;

pub use fs::FsBlobStore;
pub use integrity::{hash_bytes, verify_hash};

use druckhaus_core::error::Result;
use uuid::Uuid;

/// External object-storage collaborator.
///
/// A key uniquely and durably identifies the stored bytes; the engine
/// assumes nothing else about the backend's semantics.
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key` and return the key the backend settled on.
    fn store(&self, bytes: &[u8], key: &str) -> Result<String>;

    /// Resolve a previously returned key to a URL the caller can hand out.
    fn resolve_url(&self, key: &str) -> Result<String>;
}

/// Build a destination key for an uploaded document.
///
/// Keys are grouped per order (`orders/{code}/...`) and salted with a v4
/// UUID so that re-uploads of the same file name never collide.
pub fn object_key(order_code: &str, file_name: &str) -> String {
    format!(
        "orders/{}/{}-{}",
        order_code,
        Uuid::new_v4().simple(),
        sanitize_file_name(file_name)
    )
}

/// Replace anything outside `[A-Za-z0-9._-]` so the name is safe to embed
/// in a storage key or filesystem path.
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Human-readable size string for an uploaded file ("0 Bytes", "1 KB",
/// "2.5 MB"). Base 1024, at most two decimals, trailing zeros trimmed.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".into();
    }

    let exp = ((bytes.ilog2() / 10) as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);

    let mut formatted = format!("{value:.2}");
    while formatted.ends_with('0') {
        formatted.pop();
    }
    if formatted.ends_with('.') {
        formatted.pop();
    }

    format!("{formatted} {}", UNITS[exp])
}
