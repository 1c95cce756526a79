use thiserror::Error;

pub type Result<T> = std::result::Result<T, LookupError>;

#[derive(Error, Debug, PartialEq)]
pub enum LookupError {
    #[error("No CU table matches the requested reflectances: the catalog is empty")]
    NoReflectanceMatch,

    #[error("Invalid {surface} reflectance: {percent}% (expected 0..=100)")]
    InvalidReflectance { surface: &'static str, percent: u8 },

    #[error("Invalid room cavity ratio: {0}")]
    InvalidRcr(f64),

    #[error("CU table has no rows")]
    EmptyTable,

    #[error("CU table rows are not in ascending RCR order: {rcr} follows {previous}")]
    UnorderedTable { rcr: u32, previous: u32 },

    #[error("Invalid room dimensions: {0}")]
    InvalidRoomDimensions(String),
}
