//! Native methods of `com.nunchuk.android.nativelib.LibNunchukAndroid`.

use jni::objects::{JObject, JString};
use jni::sys::{jboolean, jint, jobject, JNI_FALSE};
use jni::JNIEnv;
use log::error;

use crate::bridge::{self, CreateSignerArgs, CreateWalletArgs};
use crate::context::NativeContext;
use crate::error::BridgeResult;
use crate::logging::LOG_TARGET;

use super::{classes, native_context, JniEnv};

/// Resolve the class cache and context, then run `call` under
/// [`bridge::dispatch`]. `None` means an exception is pending.
fn with_bridge<'local, T, F>(env: &mut JNIEnv<'local>, operation: &str, call: F) -> Option<T>
where
    F: FnOnce(&mut JniEnv<'_, 'local>, &NativeContext) -> BridgeResult<T>,
{
    let context = native_context();
    let classes = match classes(env) {
        Ok(classes) => classes,
        Err(err) => {
            error!(target: LOG_TARGET, "{operation}: {err}");
            let _ = env.exception_clear();
            let fallback = context.config().classes.fallback_exception.as_str();
            if let Err(throw_err) = env.throw_new(fallback, err.to_string()) {
                error!(target: LOG_TARGET, "{operation}: unable to raise exception: {throw_err}");
            }
            return None;
        }
    };
    let mut managed = JniEnv::new(env, classes, context.config());
    bridge::dispatch(&mut managed, operation, |managed| call(managed, context))
}

fn into_raw(object: Option<JObject>) -> jobject {
    object.map_or(std::ptr::null_mut(), JObject::into_raw)
}

#[no_mangle]
pub extern "system" fn Java_com_nunchuk_android_nativelib_LibNunchukAndroid_initNunchuk<'local>(
    mut env: JNIEnv<'local>,
    _thiz: JObject<'local>,
    app_settings: JObject<'local>,
    passphrase: JString<'local>,
) {
    let passphrase = JObject::from(passphrase);
    with_bridge(&mut env, "initNunchuk", |managed, context| {
        bridge::init_nunchuk(managed, context, &app_settings, &passphrase)
    });
}

#[no_mangle]
pub extern "system" fn Java_com_nunchuk_android_nativelib_LibNunchukAndroid_getWallets<'local>(
    mut env: JNIEnv<'local>,
    _thiz: JObject<'local>,
) -> jobject {
    into_raw(with_bridge(&mut env, "getWallets", |managed, context| {
        bridge::get_wallets(managed, context)
    }))
}

#[no_mangle]
pub extern "system" fn Java_com_nunchuk_android_nativelib_LibNunchukAndroid_getWallet<'local>(
    mut env: JNIEnv<'local>,
    _thiz: JObject<'local>,
    wallet_id: JString<'local>,
) -> jobject {
    let wallet_id = JObject::from(wallet_id);
    into_raw(with_bridge(&mut env, "getWallet", |managed, context| {
        bridge::get_wallet(managed, context, &wallet_id)
    }))
}

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "system" fn Java_com_nunchuk_android_nativelib_LibNunchukAndroid_createWallet<'local>(
    mut env: JNIEnv<'local>,
    _thiz: JObject<'local>,
    name: JString<'local>,
    total_require_signs: jint,
    signers: JObject<'local>,
    address_type: jint,
    is_escrow: jboolean,
    description: JString<'local>,
) -> jobject {
    let name = JObject::from(name);
    let description = JObject::from(description);
    into_raw(with_bridge(&mut env, "createWallet", |managed, context| {
        let args = CreateWalletArgs {
            name: &name,
            total_require_signs,
            signers: &signers,
            address_type,
            is_escrow: is_escrow != JNI_FALSE,
            description: &description,
        };
        bridge::create_wallet(managed, context, args)
    }))
}

#[no_mangle]
pub extern "system" fn Java_com_nunchuk_android_nativelib_LibNunchukAndroid_createSigner<'local>(
    mut env: JNIEnv<'local>,
    _thiz: JObject<'local>,
    name: JString<'local>,
    xpub: JString<'local>,
    public_key: JString<'local>,
    derivation_path: JString<'local>,
    master_fingerprint: JString<'local>,
) -> jobject {
    let name = JObject::from(name);
    let xpub = JObject::from(xpub);
    let public_key = JObject::from(public_key);
    let derivation_path = JObject::from(derivation_path);
    let master_fingerprint = JObject::from(master_fingerprint);
    into_raw(with_bridge(&mut env, "createSigner", |managed, context| {
        let args = CreateSignerArgs {
            name: &name,
            xpub: &xpub,
            public_key: &public_key,
            derivation_path: &derivation_path,
            master_fingerprint: &master_fingerprint,
        };
        bridge::create_signer(managed, context, args)
    }))
}

#[no_mangle]
pub extern "system" fn Java_com_nunchuk_android_nativelib_LibNunchukAndroid_getRemoteSigners<'local>(
    mut env: JNIEnv<'local>,
    _thiz: JObject<'local>,
) -> jobject {
    into_raw(with_bridge(&mut env, "getRemoteSigners", |managed, context| {
        bridge::get_remote_signers(managed, context)
    }))
}

#[no_mangle]
pub extern "system" fn Java_com_nunchuk_android_nativelib_LibNunchukAndroid_getRemoteSigner<'local>(
    mut env: JNIEnv<'local>,
    _thiz: JObject<'local>,
    master_fingerprint: JString<'local>,
    derivation_path: JString<'local>,
) -> jobject {
    let master_fingerprint = JObject::from(master_fingerprint);
    let derivation_path = JObject::from(derivation_path);
    into_raw(with_bridge(&mut env, "getRemoteSigner", |managed, context| {
        bridge::get_remote_signer(managed, context, &master_fingerprint, &derivation_path)
    }))
}

#[no_mangle]
pub extern "system" fn Java_com_nunchuk_android_nativelib_LibNunchukAndroid_updateRemoteSigner<'local>(
    mut env: JNIEnv<'local>,
    _thiz: JObject<'local>,
    signer: JObject<'local>,
) {
    with_bridge(&mut env, "updateRemoteSigner", |managed, context| {
        bridge::update_remote_signer(managed, context, &signer)
    });
}

#[no_mangle]
pub extern "system" fn Java_com_nunchuk_android_nativelib_LibNunchukAndroid_deleteRemoteSigner<'local>(
    mut env: JNIEnv<'local>,
    _thiz: JObject<'local>,
    master_fingerprint: JString<'local>,
    derivation_path: JString<'local>,
) {
    let master_fingerprint = JObject::from(master_fingerprint);
    let derivation_path = JObject::from(derivation_path);
    with_bridge(&mut env, "deleteRemoteSigner", |managed, context| {
        bridge::delete_remote_signer(managed, context, &master_fingerprint, &derivation_path)
    });
}
