//! Bridge configuration: managed class names and logging defaults.
//!
//! Loaded once per process. `NUNCHUK_BRIDGE_CONFIG` may point at a JSON file
//! overriding any subset of the defaults.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::BridgeResult;
use crate::logging::LOG_TARGET;

pub const CONFIG_ENV: &str = "NUNCHUK_BRIDGE_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub classes: ClassNames,
    pub log_filter: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            classes: ClassNames::default(),
            log_filter: "debug".to_string(),
        }
    }
}

/// Binary names (`a/b/C`) of the managed classes the bridge touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub single_signer: String,
    pub wallet: String,
    pub app_settings: String,
    pub address_type: String,
    pub address_type_helper: String,
    pub chain: String,
    pub backend_type: String,
    pub list: String,
    pub array_list: String,
    pub string: String,
    pub exception: String,
    pub fallback_exception: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            single_signer: "com/nunchuk/android/model/SingleSigner".to_string(),
            wallet: "com/nunchuk/android/model/Wallet".to_string(),
            app_settings: "com/nunchuk/android/model/AppSettings".to_string(),
            address_type: "com/nunchuk/android/type/AddressType".to_string(),
            address_type_helper: "com/nunchuk/android/type/AddressTypeHelper".to_string(),
            chain: "com/nunchuk/android/type/Chain".to_string(),
            backend_type: "com/nunchuk/android/type/BackendType".to_string(),
            list: "java/util/List".to_string(),
            array_list: "java/util/ArrayList".to_string(),
            string: "java/lang/String".to_string(),
            exception: "com/nunchuk/android/exception/NunchukNativeException".to_string(),
            fallback_exception: "java/lang/RuntimeException".to_string(),
        }
    }
}

impl BridgeConfig {
    pub fn from_json(json: &str) -> BridgeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> BridgeResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| {
            crate::BridgeError::Config(format!("{}: {err}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Reads the file named by `NUNCHUK_BRIDGE_CONFIG`. Defaults when the
    /// variable is unset.
    pub fn load() -> BridgeResult<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Unwrap a [`load`](Self::load) result, falling back to the defaults.
    /// Installs logging with the resulting filter before reporting a bad file.
    pub fn or_default_logged(loaded: BridgeResult<Self>) -> Self {
        match loaded {
            Ok(config) => {
                crate::logging::init(&config.log_filter);
                config
            }
            Err(err) => {
                let config = Self::default();
                crate::logging::init(&config.log_filter);
                warn!(target: LOG_TARGET, "ignoring {CONFIG_ENV}: {err}");
                config
            }
        }
    }
}
