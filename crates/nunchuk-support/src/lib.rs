//! # Nunchuk Support
//!
//! Native-side value model of the nunchuk wallet library, as seen by the JNI
//! bridge. The library itself is opaque: this crate only describes the records
//! it exchanges (`Wallet`, `SingleSigner`, `AppSettings`, ...) and the
//! operations the bridge is allowed to call, through the [`Nunchuk`] trait.
//!
//! A concrete implementation linking the C++ engine lives outside of this
//! workspace and is handed to the bridge through a [`NunchukFactory`]. The
//! `test-utils` feature adds [`memory::MemoryNunchuk`], an in-memory backend
//! used by tests.

pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod nunchuk;
pub mod types;

pub use error::{NunchukError, Result};
pub use nunchuk::{Nunchuk, NunchukFactory};
pub use types::{
    AddressType, AppSettings, BackendType, Chain, CreateWalletRequest, SingleSigner, Wallet,
};

/// Get the version of the support crate
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
