// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filesystem blob backend — development stand-in for the shop's real
// object store. Keys map directly to paths under a root directory, so
// every component of a key must be a plain path segment.

use std::path::{Component, Path, PathBuf};

use druckhaus_core::error::{DruckhausError, Result};
use tracing::{debug, instrument};

use crate::{BlobStore, integrity::hash_bytes};

/// Blob store backed by a local directory.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a key to a path under the root, rejecting anything that
    /// would escape it (absolute keys, `.`/`..` components).
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() {
            return Err(DruckhausError::Blob("empty blob key".into()));
        }

        let rel = Path::new(key);
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(DruckhausError::Blob(format!("invalid blob key: {key}")));
        }

        Ok(self.root.join(rel))
    }
}

impl BlobStore for FsBlobStore {
    #[instrument(skip(self, bytes), fields(key, len = bytes.len()))]
    fn store(&self, bytes: &[u8], key: &str) -> Result<String> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, bytes)?;

        debug!(digest = %hash_bytes(bytes), "blob written");
        Ok(key.to_owned())
    }

    #[instrument(skip(self), fields(key))]
    fn resolve_url(&self, key: &str) -> Result<String> {
        let path = self.path_for(key)?;
        if !path.is_file() {
            return Err(DruckhausError::Blob(format!(
                "no blob stored under key: {key}"
            )));
        }
        Ok(format!("file://{}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_then_resolve_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsBlobStore::new(dir.path());

        let key = store
            .store(b"%PDF-1.7 fake document", "orders/DH-1/abc-flyer.pdf")
            .expect("store");
        assert_eq!(key, "orders/DH-1/abc-flyer.pdf");

        let url = store.resolve_url(&key).expect("resolve");
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("abc-flyer.pdf"));

        let on_disk = std::fs::read(dir.path().join(&key)).expect("read back");
        assert_eq!(on_disk, b"%PDF-1.7 fake document");
    }

    #[test]
    fn resolve_unknown_key_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsBlobStore::new(dir.path());

        let result = store.resolve_url("orders/DH-1/missing.pdf");
        assert!(matches!(result, Err(DruckhausError::Blob(_))));
    }

    #[test]
    fn traversal_keys_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsBlobStore::new(dir.path());

        for key in ["../escape.pdf", "/etc/passwd", "orders/../../escape", ""] {
            let result = store.store(b"x", key);
            assert!(
                matches!(result, Err(DruckhausError::Blob(_))),
                "key {key:?} must be rejected"
            );
        }
    }
}
