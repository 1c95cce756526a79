use crate::types::RcrResolution;
use crate::{LookupError, Result};
use lumen_catalog::CuValue;

/// CU at `rcr` on one chart's samples.
///
/// Between rows the value is linear; outside the tabulated rows it is clamped to the boundary
/// row and reported as extrapolated. The rows must be non-empty and strictly ascending in RCR;
/// anything else is an error rather than a guess.
pub fn interpolate_cu(values: &[CuValue], rcr: f64) -> Result<(f64, RcrResolution)> {
    if !rcr.is_finite() {
        return Err(LookupError::InvalidRcr(rcr));
    }
    let (Some(first), Some(last)) = (values.first(), values.last()) else {
        return Err(LookupError::EmptyTable);
    };
    if let Some(pair) = values.windows(2).find(|pair| pair[1].rcr <= pair[0].rcr) {
        return Err(LookupError::UnorderedTable {
            rcr: pair[1].rcr,
            previous: pair[0].rcr,
        });
    }

    let idx = values.partition_point(|v| f64::from(v.rcr) < rcr);
    if let Some(hit) = values.get(idx).filter(|v| f64::from(v.rcr) == rcr) {
        return Ok((hit.cu, RcrResolution::Exact { rcr: hit.rcr }));
    }
    if idx == 0 {
        return Ok((
            first.cu,
            RcrResolution::Extrapolated {
                boundary: first.rcr,
            },
        ));
    }
    if idx == values.len() {
        return Ok((last.cu, RcrResolution::Extrapolated { boundary: last.rcr }));
    }

    let lo = values[idx - 1];
    let hi = values[idx];
    let frac = (rcr - f64::from(lo.rcr)) / f64::from(hi.rcr - lo.rcr);
    let cu = lo.cu + (hi.cu - lo.cu) * frac;
    Ok((
        cu,
        RcrResolution::Interpolated {
            lower: lo.rcr,
            upper: hi.rcr,
        },
    ))
}
