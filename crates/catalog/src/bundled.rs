use crate::loader::load_str;
use crate::types::CuCatalog;
use crate::{CatalogError, Result};

const BUILTIN_TROFFER_2X4: &str = include_str!("../../../data/catalogs/troffer-2x4.json");

/// Names accepted by [`bundled`].
pub const BUNDLED_CATALOGS: &[&str] = &["troffer-2x4"];

/// Loads a catalog shipped inside the binary.
pub fn bundled(name: &str) -> Result<CuCatalog> {
    match name {
        "troffer-2x4" => load_str(BUILTIN_TROFFER_2X4),
        _ => Err(CatalogError::UnknownBundled(name.to_string())),
    }
}
