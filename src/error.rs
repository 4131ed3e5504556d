use nunchuk_support::NunchukError;

pub type BridgeResult<T> = std::result::Result<T, BridgeError>;

/// Failures raised while crossing the JNI boundary.
///
/// Every variant ends up as the message of the exception thrown back to the
/// managed caller.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("JNI error: {0}")]
    Jni(#[from] jni::errors::Error),
    #[error("Managed runtime error: {0}")]
    Managed(String),
    /// A managed call threw. Carries the throwable's `toString()`.
    #[error("{0}")]
    JavaException(String),
    #[error("Failed to convert {record}: {reason}")]
    Conversion { record: &'static str, reason: String },
    #[error("Class not found: {0}")]
    ClassNotFound(String),
    #[error("Nunchuk is not initialized")]
    NotInitialized,
    #[error("No nunchuk factory registered")]
    NoFactory,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Native(#[from] NunchukError),
}

impl BridgeError {
    /// Error for a throwable caught on the managed side. `description` is
    /// `None` when the throwable could not be described.
    pub fn java_exception(description: Option<String>) -> Self {
        match description {
            Some(description) if !description.is_empty() => BridgeError::JavaException(description),
            _ => BridgeError::JavaException("Java exception was thrown".to_string()),
        }
    }

    pub fn conversion(record: &'static str, source: BridgeError) -> Self {
        match source {
            // keep the innermost record name
            err @ BridgeError::Conversion { .. } => err,
            other => BridgeError::Conversion {
                record,
                reason: other.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Config(err.to_string())
    }
}
