use crate::{LookupError, Result};

/// Room cavity ratio of a rectangular room: `5 * h * (L + W) / (L * W)`.
///
/// `cavity_height` is the distance from the luminaire plane to the work plane, in the same unit
/// as `length` and `width`.
pub fn room_cavity_ratio(length: f64, width: f64, cavity_height: f64) -> Result<f64> {
    for (name, value) in [("length", length), ("width", width)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(LookupError::InvalidRoomDimensions(format!(
                "{name} must be a positive number, got {value}"
            )));
        }
    }
    if !cavity_height.is_finite() || cavity_height < 0.0 {
        return Err(LookupError::InvalidRoomDimensions(format!(
            "cavity height must be zero or positive, got {cavity_height}"
        )));
    }

    Ok(5.0 * cavity_height * (length + width) / (length * width))
}
