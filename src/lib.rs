//! JNI bridge between the Nunchuk Android app and the native `nunchuk`
//! wallet library.
//!
//! The exported `LibNunchukAndroid` methods live in [`jvm::exports`]. They
//! convert managed arguments with [`serializer`], call the library held by the
//! process-wide [`NativeContext`], and convert results back with
//! [`deserializer`]. Any failure becomes a managed exception.

pub mod bridge;
pub mod config;
pub mod context;
pub mod deserializer;
pub mod error;
pub mod jvm;
pub mod logging;
pub mod managed;
pub mod serializer;
#[cfg(any(test, feature = "test-utils"))]
pub mod tests;

pub use config::{BridgeConfig, ClassNames};
pub use context::NativeContext;
pub use error::{BridgeError, BridgeResult};
pub use jvm::native_context;
pub use managed::{ManagedClass, ManagedEnv, Value};

/// Register the factory `initNunchuk` uses to build the library instance.
///
/// The embedding build calls this once, before the app calls `initNunchuk`.
pub fn register_nunchuk_factory<F>(factory: F) -> BridgeResult<()>
where
    F: nunchuk_support::NunchukFactory + 'static,
{
    native_context().register_factory(factory)
}
