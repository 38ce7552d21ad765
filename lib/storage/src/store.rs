use crate::catalog::Catalog;
use parking_lot::RwLock;
use pigment_core::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Holds the current catalog snapshot.
///
/// Readers take a cheap `Arc` clone and keep working on it even if a reload
/// swaps in a newer catalog underneath them.
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
    source: Option<PathBuf>,
}

impl CatalogStore {
    /// Load the catalog file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = path.as_ref().to_path_buf();
        let catalog = Catalog::load(&source)?;
        info!(
            path = %source.display(),
            paints = catalog.len(),
            tags = catalog.masters().tags.len(),
            "Catalog loaded"
        );

        Ok(Self {
            current: RwLock::new(Arc::new(catalog)),
            source: Some(source),
        })
    }

    /// Wrap an in-memory catalog; such a store cannot be reloaded
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
            source: None,
        }
    }

    #[inline]
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().clone()
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Re-read the source file and swap it in.
    ///
    /// On failure the previous snapshot stays in place.
    pub fn reload(&self) -> Result<Arc<Catalog>> {
        let Some(source) = &self.source else {
            return Err(Error::Storage("catalog has no backing file".to_string()));
        };

        let catalog = match Catalog::load(source) {
            Ok(catalog) => Arc::new(catalog),
            Err(e) => {
                warn!(path = %source.display(), error = %e, "Catalog reload failed, keeping previous snapshot");
                return Err(e);
            }
        };

        *self.current.write() = catalog.clone();
        info!(path = %source.display(), paints = catalog.len(), "Catalog reloaded");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_catalog(path: &Path, paints: &[(&str, &str)]) {
        let paints: Vec<_> = paints
            .iter()
            .map(|(id, hex)| {
                json!({
                    "id": id, "name": format!("Paint {id}"), "modelNumber": format!("M-{id}"),
                    "brandId": "b", "paintTypeId": "t", "glossId": "g", "hex": hex
                })
            })
            .collect();
        let doc = json!({
            "brands": [{"id": "b", "name": "Brand"}],
            "paintTypes": [{"id": "t", "name": "Type"}],
            "glosses": [{"id": "g", "name": "Gloss"}],
            "paints": paints
        });
        std::fs::write(path, doc.to_string()).unwrap();
    }

    #[test]
    fn test_open_and_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        write_catalog(&path, &[("1", "#FF0000"), ("2", "#00FF00")]);

        let store = CatalogStore::open(&path).unwrap();
        assert_eq!(store.snapshot().len(), 2);
        assert_eq!(store.source(), Some(path.as_path()));
    }

    #[test]
    fn test_reload_swaps_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        write_catalog(&path, &[("1", "#FF0000")]);

        let store = CatalogStore::open(&path).unwrap();
        let before = store.snapshot();

        write_catalog(&path, &[("1", "#FF0000"), ("2", "#0000FF"), ("3", "#FFFFFF")]);
        store.reload().unwrap();

        // snapshots taken earlier are unaffected
        assert_eq!(before.len(), 1);
        assert_eq!(store.snapshot().len(), 3);
    }

    #[test]
    fn test_failed_reload_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        write_catalog(&path, &[("1", "#FF0000")]);
        let store = CatalogStore::open(&path).unwrap();

        std::fs::write(&path, "{ broken").unwrap();
        assert!(store.reload().is_err());
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_in_memory_store_cannot_reload() {
        let store = CatalogStore::from_catalog(Catalog::empty());
        assert!(store.snapshot().is_empty());
        assert!(matches!(store.reload(), Err(Error::Storage(_))));
    }
}
