//! Storage form for a CU value sequence.
//!
//! Room and fixture records persist a chart's samples as a single string. The shape is a
//! versioned JSON envelope, `{"v":1,"values":[[rcr,cu],...]}`, so the stored form stays a
//! stable contract independent of how `CuValue` is laid out in memory.

use crate::types::CuValue;
use crate::{CatalogError, Result};
use serde::{Deserialize, Serialize};

pub const CU_VALUES_CODEC_VERSION: u32 = 1;

#[derive(Serialize)]
struct EncodedCuValues {
    v: u32,
    values: Vec<(u32, f64)>,
}

#[derive(Deserialize)]
struct EncodedEnvelope {
    v: u32,
    #[serde(default)]
    values: Option<serde_json::Value>,
}

/// Encodes a chart's samples. Sequences the decoder would refuse (unordered RCR, CU outside
/// `[0, 1]` or NaN) are rejected here instead of being stored.
pub fn encode_cu_values(values: &[CuValue]) -> Result<String> {
    check_sequence(values)?;
    let encoded = EncodedCuValues {
        v: CU_VALUES_CODEC_VERSION,
        values: values.iter().map(|v| (v.rcr, v.cu)).collect(),
    };
    Ok(serde_json::to_string(&encoded)?)
}

/// Reverses [`encode_cu_values`]. The decoded sequence must satisfy the same ordering and
/// range rules a loaded table does.
pub fn decode_cu_values(encoded: &str) -> Result<Vec<CuValue>> {
    let envelope: EncodedEnvelope = serde_json::from_str(encoded)
        .map_err(|err| CatalogError::Codec(format!("not a CU values envelope: {err}")))?;
    if envelope.v != CU_VALUES_CODEC_VERSION {
        return Err(CatalogError::UnsupportedCodecVersion {
            found: envelope.v,
            expected: CU_VALUES_CODEC_VERSION,
        });
    }

    let values = envelope
        .values
        .ok_or_else(|| CatalogError::Codec("missing values".to_string()))?;
    let pairs: Vec<(u32, f64)> = serde_json::from_value(values)
        .map_err(|err| CatalogError::Codec(format!("values must be [rcr, cu] pairs: {err}")))?;

    let decoded: Vec<CuValue> = pairs
        .into_iter()
        .map(|(rcr, cu)| CuValue::new(rcr, cu))
        .collect();
    check_sequence(&decoded)?;
    Ok(decoded)
}

fn check_sequence(values: &[CuValue]) -> Result<()> {
    for pair in values.windows(2) {
        if pair[1].rcr <= pair[0].rcr {
            return Err(CatalogError::Codec(format!(
                "rcr {} does not follow {}",
                pair[1].rcr, pair[0].rcr
            )));
        }
    }
    if let Some(value) = values.iter().find(|v| !(0.0..=1.0).contains(&v.cu)) {
        return Err(CatalogError::Codec(format!(
            "cu {} at rcr {} is outside [0, 1]",
            value.cu, value.rcr
        )));
    }
    Ok(())
}
