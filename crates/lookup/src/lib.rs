//! # Lumen Lookup
//!
//! Coefficient-of-utilization lookup for zonal cavity layouts.
//!
//! ## Architecture
//!
//! ```text
//! (ceiling %, wall %, floor %, RCR)
//!     │
//!     ├──> Reflectance resolution
//!     │      ├─ Exact chart for the triple
//!     │      └─ Otherwise nearest chart (summed difference, deterministic ties)
//!     │
//!     ├──> RCR placement on the chart rows
//!     │      ├─ Exact row
//!     │      ├─ Linear between bracketing rows
//!     │      └─ Clamped to the boundary row (extrapolated)
//!     │
//!     └──> CuResult (CU, chart used, annotations)
//! ```
//!
//! ## Example
//!
//! ```
//! use lumen_lookup::{lookup, LookupFlag};
//!
//! let catalog = lumen_catalog::bundled("troffer-2x4")?;
//! let result = lookup(&catalog, 80, 50, 20, 2.0)?;
//! assert_eq!(result.flag(), LookupFlag::Exact);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cavity;
mod engine;
mod error;
mod interpolate;
mod resolve;
mod types;

pub use cavity::room_cavity_ratio;
pub use engine::{lookup, lookup_requested};
pub use error::{LookupError, Result};
pub use interpolate::interpolate_cu;
pub use resolve::resolve_table;
pub use types::{
    CuResult, LookupFlag, RcrResolution, ReflectanceResolution, RequestedReflectance,
};
