pub type Result<T> = std::result::Result<T, NunchukError>;

/// Errors reported by the native library or while mapping its enumerations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NunchukError {
    #[error("Invalid {kind} ordinal: {ordinal}")]
    InvalidOrdinal { kind: &'static str, ordinal: i32 },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Wallet not found: {0}")]
    WalletNotFound(String),
    #[error("Signer not found: {0}")]
    SignerNotFound(String),
    #[error("Signer already exists: {0}")]
    SignerExists(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("{0}")]
    Generic(String),
}

impl NunchukError {
    pub fn invalid_ordinal(kind: &'static str, ordinal: i32) -> Self {
        NunchukError::InvalidOrdinal { kind, ordinal }
    }
}
