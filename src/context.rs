use std::sync::{Arc, PoisonError, RwLock};

use log::info;
use nunchuk_support::{AppSettings, Nunchuk, NunchukFactory};
use once_cell::sync::OnceCell;

use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::logging::LOG_TARGET;

/// State shared by every entry point: configuration, the factory used by
/// `initNunchuk` and the current library instance.
pub struct NativeContext {
    config: BridgeConfig,
    factory: OnceCell<Box<dyn NunchukFactory>>,
    nunchuk: RwLock<Option<Arc<dyn Nunchuk>>>,
}

impl NativeContext {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            factory: OnceCell::new(),
            nunchuk: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Set the factory used by `init`. Only the first registration wins.
    pub fn register_factory<F>(&self, factory: F) -> BridgeResult<()>
    where
        F: NunchukFactory + 'static,
    {
        self.factory
            .set(Box::new(factory))
            .map_err(|_| BridgeError::Config("nunchuk factory already registered".to_string()))
    }

    /// Replace the library instance.
    pub fn install(&self, nunchuk: Arc<dyn Nunchuk>) {
        *self.nunchuk.write().unwrap_or_else(PoisonError::into_inner) = Some(nunchuk);
    }

    /// Build a library instance through the registered factory and install it.
    pub fn init(&self, settings: &AppSettings, passphrase: &str) -> BridgeResult<()> {
        let factory = self.factory.get().ok_or(BridgeError::NoFactory)?;
        let nunchuk = factory.make(settings, passphrase)?;
        info!(
            target: LOG_TARGET,
            "nunchuk initialized on {} with {} servers",
            settings.network(),
            settings.servers().len()
        );
        self.install(nunchuk);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.nunchuk
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Current library instance. The lock is released before returning.
    pub fn nunchuk(&self) -> BridgeResult<Arc<dyn Nunchuk>> {
        self.nunchuk
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(BridgeError::NotInitialized)
    }
}

impl Default for NativeContext {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nunchuk_support::memory::MemoryNunchuk;
    use nunchuk_support::{Chain, NunchukError};

    #[test]
    fn uninitialized_context_reports_it() {
        let context = NativeContext::default();
        assert!(!context.is_initialized());
        assert!(matches!(context.nunchuk(), Err(BridgeError::NotInitialized)));
    }

    #[test]
    fn init_without_factory_fails() {
        let context = NativeContext::default();
        let err = context.init(&AppSettings::default(), "").unwrap_err();
        assert!(matches!(err, BridgeError::NoFactory));
    }

    #[test]
    fn init_installs_factory_instance() -> anyhow::Result<()> {
        let context = NativeContext::default();
        context.register_factory(
            |settings: &AppSettings, _passphrase: &str| -> nunchuk_support::Result<Arc<dyn Nunchuk>> {
                Ok(Arc::new(MemoryNunchuk::new(settings.chain)))
            },
        )?;
        context.init(&AppSettings::default(), "secret")?;
        assert!(context.is_initialized());
        assert!(context.nunchuk()?.get_wallets()?.is_empty());
        Ok(())
    }

    #[test]
    fn factory_errors_propagate() -> anyhow::Result<()> {
        let context = NativeContext::default();
        context.register_factory(
            |_: &AppSettings, passphrase: &str| -> nunchuk_support::Result<Arc<dyn Nunchuk>> {
                Err(NunchukError::InvalidParameter(format!("bad passphrase '{passphrase}'")))
            },
        )?;
        let err = context.init(&AppSettings::default(), "x").unwrap_err();
        assert!(matches!(err, BridgeError::Native(NunchukError::InvalidParameter(_))));
        assert!(!context.is_initialized());
        Ok(())
    }

    #[test]
    fn second_factory_is_rejected() -> anyhow::Result<()> {
        let context = NativeContext::default();
        let factory = |_: &AppSettings, _: &str| -> nunchuk_support::Result<Arc<dyn Nunchuk>> {
            Ok(Arc::new(MemoryNunchuk::new(Chain::Main)))
        };
        context.register_factory(factory)?;
        assert!(context.register_factory(factory).is_err());
        Ok(())
    }
}
