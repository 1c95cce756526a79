use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Surface reflectance as published on CU charts: a percentage in `{0, 10, ..., 90}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Reflectance(u8);

impl Reflectance {
    pub const STEP: u8 = 10;
    pub const MAX: u8 = 90;

    /// Returns `None` unless `percent` is a multiple of 10 between 0 and 90.
    #[must_use]
    pub fn new(percent: i64) -> Option<Self> {
        let percent = u8::try_from(percent).ok()?;
        (percent <= Self::MAX && percent % Self::STEP == 0).then_some(Self(percent))
    }

    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// The reflectance choices a chart can carry, ascending.
    pub fn choices() -> impl Iterator<Item = Self> {
        (0..=Self::MAX).step_by(usize::from(Self::STEP)).map(Self)
    }
}

impl fmt::Display for Reflectance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Identifies one CU chart: ceiling, wall and floor cavity reflectances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ReflectanceTriple {
    pub ceiling: Reflectance,
    pub wall: Reflectance,
    pub floor: Reflectance,
}

impl ReflectanceTriple {
    #[must_use]
    pub const fn new(ceiling: Reflectance, wall: Reflectance, floor: Reflectance) -> Self {
        Self {
            ceiling,
            wall,
            floor,
        }
    }

    /// Builds a triple from raw percentages, `None` if any component is not a chart value.
    #[must_use]
    pub fn from_percents(ceiling: i64, wall: i64, floor: i64) -> Option<Self> {
        Some(Self::new(
            Reflectance::new(ceiling)?,
            Reflectance::new(wall)?,
            Reflectance::new(floor)?,
        ))
    }
}

impl fmt::Display for ReflectanceTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.ceiling.percent(),
            self.wall.percent(),
            self.floor.percent()
        )
    }
}

/// One chart sample: the coefficient of utilization at an integer room cavity ratio.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CuValue {
    pub rcr: u32,
    pub cu: f64,
}

impl CuValue {
    #[must_use]
    pub const fn new(rcr: u32, cu: f64) -> Self {
        Self { rcr, cu }
    }
}

/// A validated CU chart. Samples are strictly ascending in RCR and never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct CuTable {
    reflectance: ReflectanceTriple,
    description: Option<String>,
    values: Vec<CuValue>,
}

impl CuTable {
    pub(crate) fn new(
        reflectance: ReflectanceTriple,
        description: Option<String>,
        values: Vec<CuValue>,
    ) -> Self {
        debug_assert!(!values.is_empty());
        Self {
            reflectance,
            description,
            values,
        }
    }

    #[must_use]
    pub const fn reflectance(&self) -> ReflectanceTriple {
        self.reflectance
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn values(&self) -> &[CuValue] {
        &self.values
    }

    /// Smallest and largest tabulated RCR.
    #[must_use]
    pub fn rcr_range(&self) -> (u32, u32) {
        let first = self.values.first().map_or(0, |v| v.rcr);
        let last = self.values.last().map_or(0, |v| v.rcr);
        (first, last)
    }

    /// RCR pairs `(lower, upper)` of adjacent samples where CU rises with RCR.
    ///
    /// A physically consistent chart has none; such tables still load and look up.
    #[must_use]
    pub fn monotonic_violations(&self) -> Vec<(u32, u32)> {
        self.values
            .windows(2)
            .filter(|pair| pair[1].cu > pair[0].cu)
            .map(|pair| (pair[0].rcr, pair[1].rcr))
            .collect()
    }

    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.values.windows(2).all(|pair| pair[1].cu <= pair[0].cu)
    }
}

/// Every CU chart published for one luminaire, indexed by reflectance triple.
///
/// Only the loader builds catalogs and nothing mutates one afterwards, so a catalog can be
/// shared across threads freely. Replacing data means building a new catalog.
#[derive(Clone, Debug, Default)]
pub struct CuCatalog {
    fixture: Option<String>,
    tables: Vec<CuTable>,
    index: HashMap<ReflectanceTriple, usize>,
}

impl CuCatalog {
    /// Callers guarantee the triples are unique.
    pub(crate) fn from_tables(fixture: Option<String>, tables: Vec<CuTable>) -> Self {
        let index = tables
            .iter()
            .enumerate()
            .map(|(idx, table)| (table.reflectance(), idx))
            .collect();
        Self {
            fixture,
            tables,
            index,
        }
    }

    #[must_use]
    pub fn fixture(&self) -> Option<&str> {
        self.fixture.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Tables in document order.
    #[must_use]
    pub fn tables(&self) -> &[CuTable] {
        &self.tables
    }

    #[must_use]
    pub fn get(&self, reflectance: &ReflectanceTriple) -> Option<&CuTable> {
        self.index.get(reflectance).map(|&idx| &self.tables[idx])
    }

    pub fn triples(&self) -> impl Iterator<Item = ReflectanceTriple> + '_ {
        self.tables.iter().map(CuTable::reflectance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflectance_accepts_only_chart_steps() {
        assert_eq!(Reflectance::new(0).map(Reflectance::percent), Some(0));
        assert_eq!(Reflectance::new(90).map(Reflectance::percent), Some(90));
        assert!(Reflectance::new(100).is_none());
        assert!(Reflectance::new(55).is_none());
        assert!(Reflectance::new(-10).is_none());
        assert!(Reflectance::new(1_000).is_none());
    }

    #[test]
    fn reflectance_choices_cover_the_chart_scale() {
        let choices: Vec<u8> = Reflectance::choices().map(Reflectance::percent).collect();
        assert_eq!(choices, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);
    }

    #[test]
    fn triple_displays_as_chart_heading() {
        let triple = ReflectanceTriple::from_percents(80, 50, 20).unwrap();
        assert_eq!(triple.to_string(), "80/50/20");
    }

    #[test]
    fn reports_rising_cu_pairs() {
        let table = CuTable::new(
            ReflectanceTriple::from_percents(70, 50, 20).unwrap(),
            None,
            vec![
                CuValue::new(0, 0.80),
                CuValue::new(1, 0.70),
                CuValue::new(2, 0.72),
                CuValue::new(3, 0.60),
            ],
        );
        assert!(!table.is_monotonic());
        assert_eq!(table.monotonic_violations(), vec![(1, 2)]);
        assert_eq!(table.rcr_range(), (0, 3));
    }

    #[test]
    fn catalog_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CuCatalog>();
    }
}
