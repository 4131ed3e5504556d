//! JNI bridge for Android
//!
//! - `env`: [`ManagedEnv`](crate::managed::ManagedEnv) over a live `JNIEnv`,
//!   plus the class cache resolved at load time
//! - `exports`: the `Java_com_nunchuk_android_nativelib_LibNunchukAndroid_*`
//!   native methods
//!
//! The process-wide [`NativeContext`] is created lazily. The embedding build
//! registers its library factory on it before `initNunchuk` is called.

pub mod env;
pub mod exports;

use std::ffi::c_void;

use jni::sys::{jint, JNI_VERSION_1_6};
use jni::{JNIEnv, JavaVM};
use log::{error, info};
use once_cell::sync::{Lazy, OnceCell};

use crate::config::BridgeConfig;
use crate::context::NativeContext;
use crate::error::BridgeResult;
use crate::logging::LOG_TARGET;

pub use env::{ClassCache, JniEnv};

// Building the context installs logging, so config errors are reported.
static CONTEXT: Lazy<NativeContext> =
    Lazy::new(|| NativeContext::new(BridgeConfig::or_default_logged(BridgeConfig::load())));
static CLASSES: OnceCell<ClassCache> = OnceCell::new();

/// Process-wide context used by the exported methods
pub fn native_context() -> &'static NativeContext {
    &CONTEXT
}

/// Class cache, resolved on first use when `JNI_OnLoad` could not.
pub fn classes(env: &mut JNIEnv) -> BridgeResult<&'static ClassCache> {
    CLASSES.get_or_try_init(|| ClassCache::load(env, native_context().config()))
}

#[no_mangle]
pub extern "system" fn JNI_OnLoad(vm: JavaVM, _reserved: *mut c_void) -> jint {
    Lazy::force(&CONTEXT);
    match vm.get_env() {
        Ok(mut env) => match classes(&mut env) {
            Ok(_) => info!(
                target: LOG_TARGET,
                "nunchuk native bridge loaded (support {})",
                nunchuk_support::version()
            ),
            Err(err) => error!(target: LOG_TARGET, "class cache not ready: {err}"),
        },
        Err(err) => error!(target: LOG_TARGET, "JNI_OnLoad without env: {err}"),
    }
    JNI_VERSION_1_6
}
