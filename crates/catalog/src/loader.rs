use crate::types::{CuCatalog, CuTable, CuValue, Reflectance, ReflectanceTriple};
use crate::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// CU chart document as produced by the photometric data source.
///
/// Fields are kept wide (`i64`) so out-of-range values reach validation and are reported as
/// malformed tables instead of opaque deserialization errors.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawCatalog {
    #[serde(default)]
    pub fixture: Option<String>,
    #[serde(alias = "necCuTables", alias = "cuTables")]
    pub tables: Vec<RawCuTable>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCuTable {
    #[serde(default)]
    pub description: Option<String>,
    pub ceiling_reflectance: i64,
    pub wall_reflectance: i64,
    pub floor_reflectance: i64,
    pub cu_values: Vec<RawCuValue>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RawCuValue {
    pub rcr: i64,
    pub cu: f64,
}

/// Validates a raw document into a catalog. Either every table is valid or no catalog is built.
pub fn load(raw: RawCatalog) -> Result<CuCatalog> {
    let mut seen: HashMap<ReflectanceTriple, usize> = HashMap::with_capacity(raw.tables.len());
    let mut tables = Vec::with_capacity(raw.tables.len());

    for (idx, raw_table) in raw.tables.into_iter().enumerate() {
        let table = validate_table(idx, raw_table)?;
        let triple = table.reflectance();
        if let Some(first) = seen.insert(triple, idx) {
            return Err(CatalogError::malformed(
                idx,
                format!("duplicate reflectance triple {triple} (already defined by table #{first})"),
            ));
        }

        let violations = table.monotonic_violations();
        if !violations.is_empty() {
            log::warn!(
                "CU table {triple} rises with RCR at {} pair(s): {violations:?}",
                violations.len()
            );
        }
        tables.push(table);
    }

    log::debug!(
        "Loaded CU catalog {:?} with {} table(s)",
        raw.fixture.as_deref().unwrap_or("<unnamed>"),
        tables.len()
    );
    Ok(CuCatalog::from_tables(raw.fixture, tables))
}

pub fn load_slice(bytes: &[u8]) -> Result<CuCatalog> {
    let raw: RawCatalog = serde_json::from_slice(bytes)?;
    load(raw)
}

pub fn load_str(json: &str) -> Result<CuCatalog> {
    load_slice(json.as_bytes())
}

pub fn load_file(path: &Path) -> Result<CuCatalog> {
    let bytes = std::fs::read(path)?;
    load_slice(&bytes)
}

fn validate_table(idx: usize, raw: RawCuTable) -> Result<CuTable> {
    let reflectance = ReflectanceTriple::new(
        parse_reflectance(idx, "ceilingReflectance", raw.ceiling_reflectance)?,
        parse_reflectance(idx, "wallReflectance", raw.wall_reflectance)?,
        parse_reflectance(idx, "floorReflectance", raw.floor_reflectance)?,
    );

    if raw.cu_values.is_empty() {
        return Err(CatalogError::malformed(idx, "cuValues is empty"));
    }

    let mut values: Vec<CuValue> = Vec::with_capacity(raw.cu_values.len());
    for (pos, sample) in raw.cu_values.iter().enumerate() {
        let rcr = u32::try_from(sample.rcr).map_err(|_| {
            CatalogError::malformed(
                idx,
                format!("cuValues[{pos}].rcr {} is out of range", sample.rcr),
            )
        })?;
        if let Some(prev) = values.last() {
            if rcr <= prev.rcr {
                return Err(CatalogError::malformed(
                    idx,
                    format!(
                        "cuValues[{pos}].rcr {rcr} does not follow {}; RCR must be strictly ascending",
                        prev.rcr
                    ),
                ));
            }
        }
        if !(0.0..=1.0).contains(&sample.cu) {
            return Err(CatalogError::malformed(
                idx,
                format!("cuValues[{pos}].cu {} is outside [0, 1]", sample.cu),
            ));
        }
        values.push(CuValue::new(rcr, sample.cu));
    }

    Ok(CuTable::new(reflectance, raw.description, values))
}

fn parse_reflectance(idx: usize, field: &str, percent: i64) -> Result<Reflectance> {
    Reflectance::new(percent).ok_or_else(|| {
        CatalogError::malformed(
            idx,
            format!("{field} {percent} is not one of 0, 10, ..., 90"),
        )
    })
}
