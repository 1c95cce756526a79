use crate::types::{ReflectanceResolution, RequestedReflectance};
use crate::{LookupError, Result};
use lumen_catalog::{CuCatalog, CuTable, ReflectanceTriple};

/// Picks the chart for `requested`: the exact triple when published, otherwise the nearest.
///
/// Nearest means the smallest summed difference over ceiling, wall and floor. Ties go to the
/// chart closest in ceiling, then wall, then floor, and finally to the lower triple.
pub fn resolve_table<'a>(
    catalog: &'a CuCatalog,
    requested: RequestedReflectance,
) -> Result<(&'a CuTable, ReflectanceResolution)> {
    if let Some(triple) = ReflectanceTriple::from_percents(
        i64::from(requested.ceiling),
        i64::from(requested.wall),
        i64::from(requested.floor),
    ) {
        if let Some(table) = catalog.get(&triple) {
            return Ok((table, ReflectanceResolution::Exact));
        }
    }

    let (table, key) = catalog
        .tables()
        .iter()
        .map(|table| (table, NearestKey::new(requested, table.reflectance())))
        .min_by_key(|&(_, key)| key)
        .ok_or(LookupError::NoReflectanceMatch)?;

    log::debug!(
        "No CU chart for {requested}; using {} (distance {})",
        table.reflectance(),
        key.distance
    );
    Ok((
        table,
        ReflectanceResolution::Approximated {
            distance: key.distance,
        },
    ))
}

/// Field order is the comparison order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct NearestKey {
    distance: u32,
    ceiling: u8,
    wall: u8,
    floor: u8,
    triple: ReflectanceTriple,
}

impl NearestKey {
    fn new(requested: RequestedReflectance, triple: ReflectanceTriple) -> Self {
        let ceiling = requested.ceiling.abs_diff(triple.ceiling.percent());
        let wall = requested.wall.abs_diff(triple.wall.percent());
        let floor = requested.floor.abs_diff(triple.floor.percent());
        Self {
            distance: u32::from(ceiling) + u32::from(wall) + u32::from(floor),
            ceiling,
            wall,
            floor,
            triple,
        }
    }
}
