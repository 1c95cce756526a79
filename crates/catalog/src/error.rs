use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Malformed CU table #{table}: {reason}")]
    MalformedTable { table: usize, reason: String },

    #[error("CU catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoded CU values are invalid: {0}")]
    Codec(String),

    #[error("Unsupported CU values encoding version: expected {expected}, got {found}")]
    UnsupportedCodecVersion { found: u32, expected: u32 },

    #[error("Unknown bundled catalog: {0}")]
    UnknownBundled(String),
}

impl CatalogError {
    pub(crate) fn malformed(table: usize, reason: impl Into<String>) -> Self {
        Self::MalformedTable {
            table,
            reason: reason.into(),
        }
    }
}
