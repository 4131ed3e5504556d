use std::sync::{Mutex, MutexGuard};

use bitcoin::hashes::{sha256, Hash};
use log::debug;

use crate::types::{CreateWalletRequest, SingleSigner, Wallet};
use crate::{Chain, Nunchuk, NunchukError, Result};

#[derive(Debug, Default)]
struct MemoryState {
    wallets: Vec<Wallet>,
    signers: Vec<SingleSigner>,
    create_requests: Vec<CreateWalletRequest>,
    clock: i64,
}

/// In-memory library for testing
///
/// Records every wallet creation request so callers can check what crossed
/// the bridge. Performs no validation of its own.
#[derive(Debug)]
pub struct MemoryNunchuk {
    network: bitcoin::Network,
    state: Mutex<MemoryState>,
}

impl Default for MemoryNunchuk {
    fn default() -> Self {
        Self::new(Chain::Regtest)
    }
}

impl MemoryNunchuk {
    pub fn new(chain: Chain) -> Self {
        Self {
            network: chain.into(),
            state: Mutex::new(MemoryState {
                clock: 1_600_000_000,
                ..MemoryState::default()
            }),
        }
    }

    pub fn with_wallets(self, wallets: Vec<Wallet>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.wallets = wallets;
        }
        self
    }

    pub fn with_signers(self, signers: Vec<SingleSigner>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.signers = signers;
        }
        self
    }

    pub fn network(&self) -> bitcoin::Network {
        self.network
    }

    pub fn last_create_request(&self) -> Option<CreateWalletRequest> {
        self.state().ok()?.create_requests.last().cloned()
    }

    pub fn remote_signers(&self) -> Vec<SingleSigner> {
        self.state()
            .map(|state| state.signers.clone())
            .unwrap_or_default()
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| NunchukError::Storage("memory state poisoned".to_string()))
    }

    fn wallet_id(&self, request: &CreateWalletRequest, nonce: i64) -> String {
        let mut preimage = Vec::new();
        preimage.extend_from_slice(request.name.as_bytes());
        preimage.extend_from_slice(self.network.to_string().as_bytes());
        for signer in &request.signers {
            preimage.extend_from_slice(signer.xpub.as_bytes());
            preimage.extend_from_slice(signer.derivation_path.as_bytes());
        }
        preimage.extend_from_slice(&request.required_signs.to_le_bytes());
        preimage.extend_from_slice(&nonce.to_le_bytes());
        let digest = sha256::Hash::hash(&preimage);
        hex::encode(&digest.to_byte_array()[..8])
    }
}

fn signer_key(master_fingerprint: &str, derivation_path: &str) -> String {
    format!("[{master_fingerprint}]{derivation_path}")
}

impl Nunchuk for MemoryNunchuk {
    fn get_wallets(&self) -> Result<Vec<Wallet>> {
        Ok(self.state()?.wallets.clone())
    }

    fn get_wallet(&self, wallet_id: &str) -> Result<Wallet> {
        self.state()?
            .wallets
            .iter()
            .find(|wallet| wallet.id == wallet_id)
            .cloned()
            .ok_or_else(|| NunchukError::WalletNotFound(wallet_id.to_string()))
    }

    fn create_wallet(&self, request: CreateWalletRequest) -> Result<Wallet> {
        let mut state = self.state()?;
        state.clock += 1;
        let create_date = state.clock;
        let wallet = Wallet {
            id: self.wallet_id(&request, create_date),
            name: request.name.clone(),
            required_signs: request.required_signs,
            signers: request.signers.clone(),
            address_type: request.address_type,
            escrow: request.is_escrow,
            balance: 0,
            create_date,
            description: request.description.clone(),
        };
        debug!("memory wallet {} created with {} signers", wallet.id, request.total_signers);
        state.create_requests.push(request);
        state.wallets.push(wallet.clone());
        Ok(wallet)
    }

    fn create_signer(
        &self,
        name: &str,
        xpub: &str,
        public_key: &str,
        derivation_path: &str,
        master_fingerprint: &str,
    ) -> Result<SingleSigner> {
        let mut state = self.state()?;
        let key = signer_key(master_fingerprint, derivation_path);
        if state
            .signers
            .iter()
            .any(|s| signer_key(&s.master_fingerprint, &s.derivation_path) == key)
        {
            return Err(NunchukError::SignerExists(key));
        }
        let signer = SingleSigner {
            name: name.to_string(),
            xpub: xpub.to_string(),
            public_key: public_key.to_string(),
            derivation_path: derivation_path.to_string(),
            master_fingerprint: master_fingerprint.to_string(),
            master_signer_id: String::new(),
            last_health_check: state.clock,
            used: false,
        };
        state.signers.push(signer.clone());
        Ok(signer)
    }

    fn get_remote_signers(&self) -> Result<Vec<SingleSigner>> {
        Ok(self.state()?.signers.clone())
    }

    fn get_remote_signer(
        &self,
        master_fingerprint: &str,
        derivation_path: &str,
    ) -> Result<SingleSigner> {
        self.state()?
            .signers
            .iter()
            .find(|s| s.master_fingerprint == master_fingerprint && s.derivation_path == derivation_path)
            .cloned()
            .ok_or_else(|| NunchukError::SignerNotFound(signer_key(master_fingerprint, derivation_path)))
    }

    fn update_remote_signer(&self, signer: SingleSigner) -> Result<()> {
        let mut state = self.state()?;
        let existing = state
            .signers
            .iter_mut()
            .find(|s| {
                s.master_fingerprint == signer.master_fingerprint
                    && s.derivation_path == signer.derivation_path
            })
            .ok_or_else(|| {
                NunchukError::SignerNotFound(signer_key(
                    &signer.master_fingerprint,
                    &signer.derivation_path,
                ))
            })?;
        *existing = signer;
        Ok(())
    }

    fn delete_remote_signer(&self, master_fingerprint: &str, derivation_path: &str) -> Result<()> {
        let mut state = self.state()?;
        let before = state.signers.len();
        state
            .signers
            .retain(|s| !(s.master_fingerprint == master_fingerprint && s.derivation_path == derivation_path));
        if state.signers.len() == before {
            return Err(NunchukError::SignerNotFound(signer_key(
                master_fingerprint,
                derivation_path,
            )));
        }
        Ok(())
    }
}
