// Bridge logging
//
// All messages go through the `log` facade under the `nunchuk::jni` target.
// `init` installs env_logger once per process; `RUST_LOG` overrides the
// configured filter.

use log::debug;
use nunchuk_support::Wallet;

pub const LOG_TARGET: &str = "nunchuk::jni";

/// Install the env_logger backend. Later calls are no-ops.
pub fn init(default_filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
}

/// Summary line for a wallet handed back by the library
pub fn log_wallet_summary(wallet: &Wallet) {
    debug!(target: LOG_TARGET, "[wallet]name::{}", wallet.name);
    debug!(target: LOG_TARGET, "[wallet]address_type::{}", wallet.address_type.ordinal());
    debug!(target: LOG_TARGET, "[wallet]signers::{}", wallet.signers.len());
}
