//! # Lumen Catalog
//!
//! Coefficient-of-utilization (CU) charts for zonal cavity lighting layouts.
//!
//! ## Features
//!
//! - **Validated loading** of manufacturer CU chart documents
//! - **Exact lookup** of a chart by its (ceiling, wall, floor) reflectance triple
//! - **Versioned storage form** for a chart's sample list
//! - **Snapshot handoff** from a background loader to concurrent readers
//!
//! ## Architecture
//!
//! ```text
//! CU chart document (JSON)
//!     │
//!     ├──> Loader
//!     │      ├─ Reflectances on the 0..90 step 10 scale
//!     │      ├─ RCR strictly ascending, CU within [0, 1]
//!     │      └─ One chart per reflectance triple
//!     │
//!     └──> CuCatalog (immutable, indexed by triple)
//!            └─> CatalogSnapshot (publish once, read anywhere)
//! ```
//!
//! ## Example
//!
//! ```
//! use lumen_catalog::{load_str, ReflectanceTriple};
//!
//! let catalog = load_str(r#"{"tables": [{
//!     "description": null,
//!     "ceilingReflectance": 70, "wallReflectance": 50, "floorReflectance": 20,
//!     "cuValues": [{"rcr": 1, "cu": 0.65}, {"rcr": 2, "cu": 0.55}]
//! }]}"#)?;
//!
//! let triple = ReflectanceTriple::from_percents(70, 50, 20).unwrap();
//! assert_eq!(catalog.get(&triple).unwrap().values().len(), 2);
//! # Ok::<(), lumen_catalog::CatalogError>(())
//! ```

mod bundled;
mod codec;
mod error;
mod loader;
mod snapshot;
mod types;

pub use bundled::{bundled, BUNDLED_CATALOGS};
pub use codec::{decode_cu_values, encode_cu_values, CU_VALUES_CODEC_VERSION};
pub use error::{CatalogError, Result};
pub use loader::{load, load_file, load_slice, load_str, RawCatalog, RawCuTable, RawCuValue};
pub use snapshot::CatalogSnapshot;
pub use types::{CuCatalog, CuTable, CuValue, Reflectance, ReflectanceTriple};
