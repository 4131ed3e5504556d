use std::sync::Arc;

use crate::types::{AppSettings, CreateWalletRequest, SingleSigner, Wallet};
use crate::Result;

/// Operations of the native wallet library reachable from the JNI bridge.
///
/// Implementations own all wallet logic and storage. The bridge never
/// inspects results beyond copying their fields.
pub trait Nunchuk: Send + Sync {
    fn get_wallets(&self) -> Result<Vec<Wallet>>;

    fn get_wallet(&self, wallet_id: &str) -> Result<Wallet>;

    fn create_wallet(&self, request: CreateWalletRequest) -> Result<Wallet>;

    fn create_signer(
        &self,
        name: &str,
        xpub: &str,
        public_key: &str,
        derivation_path: &str,
        master_fingerprint: &str,
    ) -> Result<SingleSigner>;

    fn get_remote_signers(&self) -> Result<Vec<SingleSigner>>;

    fn get_remote_signer(&self, master_fingerprint: &str, derivation_path: &str)
        -> Result<SingleSigner>;

    fn update_remote_signer(&self, signer: SingleSigner) -> Result<()>;

    fn delete_remote_signer(&self, master_fingerprint: &str, derivation_path: &str) -> Result<()>;
}

/// Builds a library instance from app settings.
pub trait NunchukFactory: Send + Sync {
    fn make(&self, settings: &AppSettings, passphrase: &str) -> Result<Arc<dyn Nunchuk>>;
}

impl<F> NunchukFactory for F
where
    F: Fn(&AppSettings, &str) -> Result<Arc<dyn Nunchuk>> + Send + Sync,
{
    fn make(&self, settings: &AppSettings, passphrase: &str) -> Result<Arc<dyn Nunchuk>> {
        self(settings, passphrase)
    }
}
