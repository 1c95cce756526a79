use crate::{LookupError, Result};
use lumen_catalog::ReflectanceTriple;
use serde::Serialize;
use std::fmt;

/// Reflectances as entered for a room. Any percentage is accepted; charts only carry steps of 10.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RequestedReflectance {
    pub ceiling: u8,
    pub wall: u8,
    pub floor: u8,
}

impl RequestedReflectance {
    pub fn new(ceiling: u8, wall: u8, floor: u8) -> Result<Self> {
        for (surface, percent) in [("ceiling", ceiling), ("wall", wall), ("floor", floor)] {
            if percent > 100 {
                return Err(LookupError::InvalidReflectance { surface, percent });
            }
        }
        Ok(Self {
            ceiling,
            wall,
            floor,
        })
    }

    #[must_use]
    pub fn matches(&self, triple: &ReflectanceTriple) -> bool {
        self.ceiling == triple.ceiling.percent()
            && self.wall == triple.wall.percent()
            && self.floor == triple.floor.percent()
    }
}

impl fmt::Display for RequestedReflectance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.ceiling, self.wall, self.floor)
    }
}

/// How the requested RCR was placed on the chart's sample rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RcrResolution {
    /// The RCR is a tabulated row.
    Exact { rcr: u32 },
    /// Linear between the two bracketing rows.
    Interpolated { lower: u32, upper: u32 },
    /// Outside the tabulated rows; the CU of the nearest boundary row is used.
    Extrapolated { boundary: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReflectanceResolution {
    Exact,
    /// The nearest published chart was used; `distance` is the summed percentage difference.
    Approximated { distance: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupFlag {
    Exact,
    Interpolated,
    Extrapolated,
    ReflectanceApproximated,
}

impl LookupFlag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Interpolated => "interpolated",
            Self::Extrapolated => "extrapolated",
            Self::ReflectanceApproximated => "reflectance-approximated",
        }
    }
}

impl fmt::Display for LookupFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CuResult {
    pub cu: f64,
    pub rcr: f64,
    pub requested: RequestedReflectance,
    /// Chart actually used; differs from `requested` when approximated.
    pub table: ReflectanceTriple,
    pub rcr_resolution: RcrResolution,
    pub reflectance_resolution: ReflectanceResolution,
    /// The chart's CU rises with RCR somewhere.
    pub non_monotonic_table: bool,
}

impl CuResult {
    /// All annotations that apply: the RCR placement first, then reflectance approximation.
    #[must_use]
    pub fn flags(&self) -> Vec<LookupFlag> {
        let mut flags = vec![match self.rcr_resolution {
            RcrResolution::Exact { .. } => LookupFlag::Exact,
            RcrResolution::Interpolated { .. } => LookupFlag::Interpolated,
            RcrResolution::Extrapolated { .. } => LookupFlag::Extrapolated,
        }];
        if self.is_reflectance_approximated() {
            flags.push(LookupFlag::ReflectanceApproximated);
        }
        flags
    }

    /// The most significant annotation, for callers that show a single badge.
    #[must_use]
    pub fn flag(&self) -> LookupFlag {
        self.flags()
            .into_iter()
            .max()
            .unwrap_or(LookupFlag::Exact)
    }

    #[must_use]
    pub const fn is_extrapolated(&self) -> bool {
        matches!(self.rcr_resolution, RcrResolution::Extrapolated { .. })
    }

    #[must_use]
    pub const fn is_reflectance_approximated(&self) -> bool {
        matches!(
            self.reflectance_resolution,
            ReflectanceResolution::Approximated { .. }
        )
    }
}
