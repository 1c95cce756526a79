use crate::interpolate::interpolate_cu;
use crate::resolve::resolve_table;
use crate::types::{CuResult, RequestedReflectance};
use crate::Result;
use lumen_catalog::CuCatalog;

/// CU for a room with the given reflectances (percent) and room cavity ratio.
///
/// Pure: the catalog is only borrowed and nothing is retained between calls.
pub fn lookup(
    catalog: &CuCatalog,
    ceiling: u8,
    wall: u8,
    floor: u8,
    rcr: f64,
) -> Result<CuResult> {
    lookup_requested(catalog, RequestedReflectance::new(ceiling, wall, floor)?, rcr)
}

pub fn lookup_requested(
    catalog: &CuCatalog,
    requested: RequestedReflectance,
    rcr: f64,
) -> Result<CuResult> {
    let (table, reflectance_resolution) = resolve_table(catalog, requested)?;
    let (cu, rcr_resolution) = interpolate_cu(table.values(), rcr)?;

    let result = CuResult {
        cu,
        rcr,
        requested,
        table: table.reflectance(),
        rcr_resolution,
        reflectance_resolution,
        non_monotonic_table: !table.is_monotonic(),
    };
    if result.is_extrapolated() {
        let (first, last) = table.rcr_range();
        log::warn!(
            "RCR {rcr} is outside the {} chart rows {first}..={last}; CU clamped to {cu}",
            result.table
        );
    }
    Ok(result)
}
