use crate::loader::load_str;
use crate::types::CuCatalog;
use crate::Result;
use std::sync::{Arc, PoisonError, RwLock};

/// Hands a fully built catalog from a loader to any number of readers.
///
/// Readers see either nothing or a complete catalog. Publishing replaces the whole snapshot;
/// readers holding the previous `Arc` keep using it until they drop it.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    current: RwLock<Option<Arc<CuCatalog>>>,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, catalog: CuCatalog) -> Arc<CuCatalog> {
        let catalog = Arc::new(catalog);
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::clone(&catalog));
        log::debug!("Published CU catalog with {} table(s)", catalog.len());
        catalog
    }

    /// Loads `json` and publishes the result. A failed load leaves the current snapshot as is.
    pub fn publish_json(&self, json: &str) -> Result<Arc<CuCatalog>> {
        let catalog = load_str(json)?;
        Ok(self.publish(catalog))
    }

    #[must_use]
    pub fn current(&self) -> Option<Arc<CuCatalog>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_published(&self) -> bool {
        self.current().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundled::bundled;

    #[test]
    fn starts_empty() {
        let snapshot = CatalogSnapshot::new();
        assert!(!snapshot.is_published());
        assert!(snapshot.current().is_none());
    }

    #[test]
    fn failed_load_keeps_previous_catalog() {
        let snapshot = CatalogSnapshot::new();
        let published = snapshot.publish(bundled("troffer-2x4").unwrap());

        let bad = r#"{"tables": [
            {"ceilingReflectance": 80, "wallReflectance": 50, "floorReflectance": 20,
             "cuValues": [{"rcr": 0, "cu": 0.9}]},
            {"ceilingReflectance": 80, "wallReflectance": 50, "floorReflectance": 20,
             "cuValues": [{"rcr": 0, "cu": 0.8}]}
        ]}"#;
        assert!(snapshot.publish_json(bad).is_err());

        let current = snapshot.current().expect("still published");
        assert!(Arc::ptr_eq(&current, &published));
    }

    #[test]
    fn republishing_does_not_disturb_held_readers() {
        let snapshot = CatalogSnapshot::new();
        let first = snapshot.publish(bundled("troffer-2x4").unwrap());
        let held = snapshot.current().unwrap();

        snapshot
            .publish_json(r#"{"tables": []}"#)
            .expect("empty catalog loads");

        assert!(Arc::ptr_eq(&held, &first));
        assert_eq!(held.len(), first.len());
        assert!(snapshot.current().unwrap().is_empty());
    }
}
