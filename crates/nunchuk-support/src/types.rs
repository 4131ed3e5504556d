use crate::{NunchukError, Result};

// ============================================================================
// Enums (ordinals are shared with the managed side)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressType {
    Any,
    Legacy,
    NestedSegwit,
    NativeSegwit,
    Taproot,
}

impl AddressType {
    pub const ALL: [AddressType; 5] = [
        AddressType::Any,
        AddressType::Legacy,
        AddressType::NestedSegwit,
        AddressType::NativeSegwit,
        AddressType::Taproot,
    ];

    pub fn ordinal(self) -> i32 {
        match self {
            AddressType::Any => 0,
            AddressType::Legacy => 1,
            AddressType::NestedSegwit => 2,
            AddressType::NativeSegwit => 3,
            AddressType::Taproot => 4,
        }
    }
}

impl TryFrom<i32> for AddressType {
    type Error = NunchukError;

    fn try_from(ordinal: i32) -> Result<Self> {
        match ordinal {
            0 => Ok(AddressType::Any),
            1 => Ok(AddressType::Legacy),
            2 => Ok(AddressType::NestedSegwit),
            3 => Ok(AddressType::NativeSegwit),
            4 => Ok(AddressType::Taproot),
            _ => Err(NunchukError::invalid_ordinal("AddressType", ordinal)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Main,
    Testnet,
    Regtest,
    Signet,
}

impl Chain {
    pub fn ordinal(self) -> i32 {
        match self {
            Chain::Main => 0,
            Chain::Testnet => 1,
            Chain::Regtest => 2,
            Chain::Signet => 3,
        }
    }
}

impl TryFrom<i32> for Chain {
    type Error = NunchukError;

    fn try_from(ordinal: i32) -> Result<Self> {
        match ordinal {
            0 => Ok(Chain::Main),
            1 => Ok(Chain::Testnet),
            2 => Ok(Chain::Regtest),
            3 => Ok(Chain::Signet),
            _ => Err(NunchukError::invalid_ordinal("Chain", ordinal)),
        }
    }
}

impl From<Chain> for bitcoin::Network {
    fn from(chain: Chain) -> Self {
        match chain {
            Chain::Main => bitcoin::Network::Bitcoin,
            Chain::Testnet => bitcoin::Network::Testnet,
            Chain::Regtest => bitcoin::Network::Regtest,
            Chain::Signet => bitcoin::Network::Signet,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendType {
    Electrum,
    CoreRpc,
}

impl BackendType {
    pub fn ordinal(self) -> i32 {
        match self {
            BackendType::Electrum => 0,
            BackendType::CoreRpc => 1,
        }
    }
}

impl TryFrom<i32> for BackendType {
    type Error = NunchukError;

    fn try_from(ordinal: i32) -> Result<Self> {
        match ordinal {
            0 => Ok(BackendType::Electrum),
            1 => Ok(BackendType::CoreRpc),
            _ => Err(NunchukError::invalid_ordinal("BackendType", ordinal)),
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// One key participating in a wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleSigner {
    pub name: String,
    pub xpub: String,
    pub public_key: String,
    pub derivation_path: String,
    pub master_fingerprint: String,
    pub master_signer_id: String,
    /// Unix timestamp in seconds
    pub last_health_check: i64,
    pub used: bool,
}

/// Multisig wallet configuration as held by the library.
#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    pub id: String,
    pub name: String,
    /// Number of signatures needed to spend (m)
    pub required_signs: i32,
    pub signers: Vec<SingleSigner>,
    pub address_type: AddressType,
    pub escrow: bool,
    /// Confirmed balance in satoshis. Never forwarded to the managed side.
    pub balance: i64,
    pub create_date: i64,
    pub description: String,
}

impl Wallet {
    /// Number of keys in the wallet (n)
    pub fn total_signers(&self) -> usize {
        self.signers.len()
    }
}

/// Settings the library is initialised with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub chain: Chain,
    pub backend_type: BackendType,
    pub mainnet_servers: Vec<String>,
    pub testnet_servers: Vec<String>,
    pub hwi_path: String,
    pub storage_path: String,
    pub use_proxy: bool,
    pub proxy_host: String,
    pub proxy_port: i32,
}

impl AppSettings {
    pub fn network(&self) -> bitcoin::Network {
        self.chain.into()
    }

    /// Servers matching the configured chain
    pub fn servers(&self) -> &[String] {
        match self.chain {
            Chain::Main => &self.mainnet_servers,
            _ => &self.testnet_servers,
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            chain: Chain::Testnet,
            backend_type: BackendType::Electrum,
            mainnet_servers: Vec::new(),
            testnet_servers: Vec::new(),
            hwi_path: String::new(),
            storage_path: String::new(),
            use_proxy: false,
            proxy_host: String::new(),
            proxy_port: 0,
        }
    }
}

/// Arguments of the library's wallet creation call.
///
/// Both signer counts are carried explicitly: `total_signers` is always the
/// length of `signers`, `required_signs` is whatever the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateWalletRequest {
    pub name: String,
    pub total_signers: usize,
    pub required_signs: i32,
    pub signers: Vec<SingleSigner>,
    pub address_type: AddressType,
    pub is_escrow: bool,
    pub description: String,
}

impl CreateWalletRequest {
    pub fn new(
        name: String,
        required_signs: i32,
        signers: Vec<SingleSigner>,
        address_type: AddressType,
        is_escrow: bool,
        description: String,
    ) -> Self {
        Self {
            name,
            total_signers: signers.len(),
            required_signs,
            signers,
            address_type,
            is_escrow,
            description,
        }
    }
}
