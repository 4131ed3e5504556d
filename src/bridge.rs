//! Request/response operations behind the exported JNI methods.
//!
//! Every operation resolves the library from the context, converts its
//! arguments, makes exactly one library call and converts the result. Errors
//! are turned into managed exceptions by [`dispatch`].

use log::{debug, error};
use nunchuk_support::CreateWalletRequest;

use crate::context::NativeContext;
use crate::deserializer;
use crate::error::BridgeResult;
use crate::logging::{log_wallet_summary, LOG_TARGET};
use crate::managed::ManagedEnv;
use crate::serializer;

/// Arguments of `createWallet` as received from the managed caller.
pub struct CreateWalletArgs<'a, O> {
    pub name: &'a O,
    pub total_require_signs: i32,
    pub signers: &'a O,
    pub address_type: i32,
    pub is_escrow: bool,
    pub description: &'a O,
}

/// Arguments of `createSigner`, all managed strings.
pub struct CreateSignerArgs<'a, O> {
    pub name: &'a O,
    pub xpub: &'a O,
    pub public_key: &'a O,
    pub derivation_path: &'a O,
    pub master_fingerprint: &'a O,
}

/// Run `operation`, raising any error as the bridge exception.
///
/// Returns `None` when an exception was raised; the caller then hands `null`
/// back to the managed runtime.
pub fn dispatch<E, T, F>(env: &mut E, operation: &str, call: F) -> Option<T>
where
    E: ManagedEnv,
    F: FnOnce(&mut E) -> BridgeResult<T>,
{
    debug!(target: LOG_TARGET, "{operation}()");
    match call(env) {
        Ok(value) => Some(value),
        Err(err) => {
            error!(target: LOG_TARGET, "{operation} failed: {err}");
            if let Err(throw_err) = deserializer::raise_exception(env, &err.to_string()) {
                error!(target: LOG_TARGET, "{operation}: unable to raise exception: {throw_err}");
            }
            None
        }
    }
}

pub fn init_nunchuk<E: ManagedEnv>(
    env: &mut E,
    context: &NativeContext,
    settings: &E::Object,
    passphrase: &E::Object,
) -> BridgeResult<()> {
    let settings = serializer::to_native_app_settings(env, settings)?;
    let passphrase = env.read_string(passphrase)?;
    context.init(&settings, &passphrase)
}

pub fn get_wallets<E: ManagedEnv>(env: &mut E, context: &NativeContext) -> BridgeResult<E::Object> {
    let wallets = context.nunchuk()?.get_wallets()?;
    debug!(target: LOG_TARGET, "wallets::{}", wallets.len());
    deserializer::to_managed_wallets(env, &wallets)
}

pub fn get_wallet<E: ManagedEnv>(
    env: &mut E,
    context: &NativeContext,
    wallet_id: &E::Object,
) -> BridgeResult<E::Object> {
    let wallet_id = env.read_string(wallet_id)?;
    let wallet = context.nunchuk()?.get_wallet(&wallet_id)?;
    deserializer::to_managed_wallet(env, &wallet)
}

pub fn create_wallet<E: ManagedEnv>(
    env: &mut E,
    context: &NativeContext,
    args: CreateWalletArgs<'_, E::Object>,
) -> BridgeResult<E::Object> {
    let nunchuk = context.nunchuk()?;
    let signers = serializer::to_native_signers(env, args.signers)?;
    let address_type = serializer::to_native_address_type(args.address_type)?;
    let request = CreateWalletRequest::new(
        env.read_string(args.name)?,
        args.total_require_signs,
        signers,
        address_type,
        args.is_escrow,
        env.read_string(args.description)?,
    );
    debug!(
        target: LOG_TARGET,
        "create_wallet total_signers::{} required_signs::{}",
        request.total_signers,
        request.required_signs
    );
    let wallet = nunchuk.create_wallet(request)?;
    log_wallet_summary(&wallet);
    deserializer::to_managed_wallet(env, &wallet)
}

pub fn create_signer<E: ManagedEnv>(
    env: &mut E,
    context: &NativeContext,
    args: CreateSignerArgs<'_, E::Object>,
) -> BridgeResult<E::Object> {
    let nunchuk = context.nunchuk()?;
    let name = env.read_string(args.name)?;
    let xpub = env.read_string(args.xpub)?;
    let public_key = env.read_string(args.public_key)?;
    let derivation_path = env.read_string(args.derivation_path)?;
    let master_fingerprint = env.read_string(args.master_fingerprint)?;
    let signer = nunchuk.create_signer(
        &name,
        &xpub,
        &public_key,
        &derivation_path,
        &master_fingerprint,
    )?;
    deserializer::to_managed_signer(env, &signer)
}

pub fn get_remote_signers<E: ManagedEnv>(
    env: &mut E,
    context: &NativeContext,
) -> BridgeResult<E::Object> {
    let signers = context.nunchuk()?.get_remote_signers()?;
    debug!(target: LOG_TARGET, "remote signers::{}", signers.len());
    deserializer::to_managed_signers(env, &signers)
}

pub fn get_remote_signer<E: ManagedEnv>(
    env: &mut E,
    context: &NativeContext,
    master_fingerprint: &E::Object,
    derivation_path: &E::Object,
) -> BridgeResult<E::Object> {
    let master_fingerprint = env.read_string(master_fingerprint)?;
    let derivation_path = env.read_string(derivation_path)?;
    let signer = context
        .nunchuk()?
        .get_remote_signer(&master_fingerprint, &derivation_path)?;
    deserializer::to_managed_signer(env, &signer)
}

pub fn update_remote_signer<E: ManagedEnv>(
    env: &mut E,
    context: &NativeContext,
    signer: &E::Object,
) -> BridgeResult<()> {
    let signer = serializer::to_native_signer(env, signer)?;
    context.nunchuk()?.update_remote_signer(signer)?;
    Ok(())
}

pub fn delete_remote_signer<E: ManagedEnv>(
    env: &mut E,
    context: &NativeContext,
    master_fingerprint: &E::Object,
    derivation_path: &E::Object,
) -> BridgeResult<()> {
    let master_fingerprint = env.read_string(master_fingerprint)?;
    let derivation_path = env.read_string(derivation_path)?;
    context
        .nunchuk()?
        .delete_remote_signer(&master_fingerprint, &derivation_path)?;
    Ok(())
}
