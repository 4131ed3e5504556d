//! Native -> managed conversions.
//!
//! Each function allocates fresh managed objects and copies fields through
//! their setters. Nothing is validated or derived, with one exception: the
//! managed wallet balance is always `0.0`.

use log::{debug, error, warn};
use nunchuk_support::{AddressType, SingleSigner, Wallet};

use crate::error::{BridgeError, BridgeResult};
use crate::logging::LOG_TARGET;
use crate::managed::{ManagedClass, ManagedEnv, Value};

pub fn to_managed_address_type<E: ManagedEnv>(
    env: &mut E,
    address_type: AddressType,
) -> BridgeResult<E::Object> {
    env.address_type(address_type.ordinal())
}

pub fn to_managed_signer<E: ManagedEnv>(
    env: &mut E,
    signer: &SingleSigner,
) -> BridgeResult<E::Object> {
    debug!(target: LOG_TARGET, "to_managed_signer()");
    let instance = env.new_object(ManagedClass::SingleSigner)?;
    if let Err(err) = fill_signer(env, &instance, signer) {
        error!(target: LOG_TARGET, "to_managed_signer error::{err}");
        discard(env, instance);
        return Err(BridgeError::conversion("SingleSigner", err));
    }
    Ok(instance)
}

fn fill_signer<E: ManagedEnv>(
    env: &mut E,
    instance: &E::Object,
    signer: &SingleSigner,
) -> BridgeResult<()> {
    env.set(instance, "setName", Value::Str(&signer.name))?;
    env.set(instance, "setXpub", Value::Str(&signer.xpub))?;
    env.set(instance, "setDerivationPath", Value::Str(&signer.derivation_path))?;
    env.set(instance, "setMasterFingerprint", Value::Str(&signer.master_fingerprint))?;
    env.set(instance, "setPublicKey", Value::Str(&signer.public_key))?;
    env.set(instance, "setMasterSignerId", Value::Str(&signer.master_signer_id))?;
    env.set(instance, "setLastHealthCheck", Value::Long(signer.last_health_check))?;
    env.set(instance, "setUsed", Value::Bool(signer.used))?;
    Ok(())
}

/// Release a half-filled object. Failures are logged only, the conversion
/// error is what reaches the caller.
fn discard<E: ManagedEnv>(env: &mut E, instance: E::Object) {
    if let Err(err) = env.release(instance) {
        error!(target: LOG_TARGET, "release failed::{err}");
    }
}

pub fn to_managed_signers<E: ManagedEnv>(
    env: &mut E,
    signers: &[SingleSigner],
) -> BridgeResult<E::Object> {
    debug!(target: LOG_TARGET, "to_managed_signers()");
    let list = env.new_list()?;
    for signer in signers {
        let element = to_managed_signer(env, signer)?;
        env.list_add(&list, &element)?;
        env.release(element)?;
    }
    Ok(list)
}

pub fn to_managed_wallet<E: ManagedEnv>(env: &mut E, wallet: &Wallet) -> BridgeResult<E::Object> {
    let instance = env.new_object(ManagedClass::Wallet)?;
    if let Err(err) = fill_wallet(env, &instance, wallet) {
        error!(target: LOG_TARGET, "to_managed_wallet error::{err}");
        discard(env, instance);
        return Err(BridgeError::conversion("Wallet", err));
    }
    Ok(instance)
}

fn fill_wallet<E: ManagedEnv>(
    env: &mut E,
    instance: &E::Object,
    wallet: &Wallet,
) -> BridgeResult<()> {
    let signers = to_managed_signers(env, &wallet.signers)?;
    env.set(instance, "setId", Value::Str(&wallet.id))?;
    env.set(instance, "setName", Value::Str(&wallet.name))?;
    env.set(instance, "setTotalRequireSigns", Value::Int(wallet.required_signs))?;
    env.set(instance, "setSigners", Value::Object(ManagedClass::List, &signers))?;
    env.release(signers)?;
    env.set(instance, "setEscrow", Value::Bool(wallet.escrow))?;
    env.set(instance, "setBalance", Value::Double(0.0))?;
    let address_type = to_managed_address_type(env, wallet.address_type)?;
    env.set(
        instance,
        "setAddressType",
        Value::Object(ManagedClass::AddressType, &address_type),
    )?;
    env.release(address_type)?;
    env.set(instance, "setCreateDate", Value::Long(wallet.create_date))?;
    env.set(instance, "setDescription", Value::Str(&wallet.description))?;
    Ok(())
}

pub fn to_managed_wallets<E: ManagedEnv>(
    env: &mut E,
    wallets: &[Wallet],
) -> BridgeResult<E::Object> {
    debug!(target: LOG_TARGET, "to_managed_wallets()");
    let list = env.new_list()?;
    if wallets.is_empty() {
        debug!(target: LOG_TARGET, "wallets empty");
        return Ok(list);
    }
    debug!(target: LOG_TARGET, "wallets size:: {}", wallets.len());
    for wallet in wallets {
        let element = to_managed_wallet(env, wallet)?;
        env.list_add(&list, &element)?;
        env.release(element)?;
    }
    Ok(list)
}

/// Throw the bridge exception carrying `message`.
///
/// Uses the configured domain exception, or the generic fallback class when
/// the runtime does not know the domain one.
pub fn raise_exception<E: ManagedEnv>(env: &mut E, message: &str) -> BridgeResult<()> {
    let classes = &env.config().classes;
    let exception = classes.exception.clone();
    let fallback = classes.fallback_exception.clone();
    if env.class_available(&exception) {
        env.throw(&exception, message)
    } else {
        warn!(target: LOG_TARGET, "{exception} unavailable, throwing {fallback}");
        env.throw(&fallback, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BridgeConfig;
    use crate::tests::helpers::{sample_signer, sample_wallet};
    use crate::tests::mock_env::{MockEnv, MockValue};
    use pretty_assertions::assert_eq;

    #[test]
    fn signer_fields_are_copied_verbatim() -> anyhow::Result<()> {
        let mut env = MockEnv::new();
        let signer = sample_signer(1);
        let object = to_managed_signer(&mut env, &signer)?;

        assert_eq!(env.class_of(object), Some(ManagedClass::SingleSigner));
        assert_eq!(env.field(object, "name"), Some(MockValue::Str(signer.name.clone())));
        assert_eq!(env.field(object, "xpub"), Some(MockValue::Str(signer.xpub.clone())));
        assert_eq!(
            env.field(object, "derivationPath"),
            Some(MockValue::Str(signer.derivation_path.clone()))
        );
        assert_eq!(
            env.field(object, "masterFingerprint"),
            Some(MockValue::Str(signer.master_fingerprint.clone()))
        );
        assert_eq!(
            env.field(object, "publicKey"),
            Some(MockValue::Str(signer.public_key.clone()))
        );
        assert_eq!(
            env.field(object, "masterSignerId"),
            Some(MockValue::Str(signer.master_signer_id.clone()))
        );
        assert_eq!(
            env.field(object, "lastHealthCheck"),
            Some(MockValue::Long(signer.last_health_check))
        );
        assert_eq!(env.field(object, "used"), Some(MockValue::Bool(true)));
        Ok(())
    }

    #[test]
    fn empty_signer_list_is_an_empty_list() -> anyhow::Result<()> {
        let mut env = MockEnv::new();
        let list = to_managed_signers(&mut env, &[])?;
        assert_eq!(env.list_items(list), Some(vec![]));
        Ok(())
    }

    #[test]
    fn signer_list_keeps_order_and_releases_elements() -> anyhow::Result<()> {
        let mut env = MockEnv::new();
        let signers = vec![sample_signer(1), sample_signer(2), sample_signer(3)];
        let list = to_managed_signers(&mut env, &signers)?;
        let items = env.list_items(list).unwrap_or_default();
        let names: Vec<_> = items.iter().map(|item| env.field(*item, "name")).collect();
        assert_eq!(
            names,
            signers
                .iter()
                .map(|s| Some(MockValue::Str(s.name.clone())))
                .collect::<Vec<_>>()
        );
        assert_eq!(env.released(), 3);
        Ok(())
    }

    #[test]
    fn wallet_balance_is_always_zero() -> anyhow::Result<()> {
        let mut env = MockEnv::new();
        let mut wallet = sample_wallet("w1", 2);
        wallet.balance = 150_000_000;
        let object = to_managed_wallet(&mut env, &wallet)?;
        assert_eq!(env.field(object, "balance"), Some(MockValue::Double(0.0)));
        Ok(())
    }

    #[test]
    fn wallet_fields_are_copied() -> anyhow::Result<()> {
        let mut env = MockEnv::new();
        let wallet = sample_wallet("w1", 3);
        let object = to_managed_wallet(&mut env, &wallet)?;

        assert_eq!(env.field(object, "id"), Some(MockValue::Str("w1".to_string())));
        assert_eq!(env.field(object, "name"), Some(MockValue::Str(wallet.name.clone())));
        assert_eq!(
            env.field(object, "totalRequireSigns"),
            Some(MockValue::Int(wallet.required_signs))
        );
        assert_eq!(env.field(object, "escrow"), Some(MockValue::Bool(wallet.escrow)));
        assert_eq!(
            env.field(object, "createDate"),
            Some(MockValue::Long(wallet.create_date))
        );
        assert_eq!(
            env.field(object, "description"),
            Some(MockValue::Str(wallet.description.clone()))
        );
        let Some(MockValue::Object(address_type)) = env.field(object, "addressType") else {
            panic!("address type not set");
        };
        assert_eq!(env.enum_constant(address_type), Some(wallet.address_type.ordinal()));
        let Some(MockValue::Object(signers)) = env.field(object, "signers") else {
            panic!("signers not set");
        };
        assert_eq!(env.list_items(signers).map(|items| items.len()), Some(3));
        Ok(())
    }

    #[test]
    fn empty_wallet_list_is_an_empty_list() -> anyhow::Result<()> {
        let mut env = MockEnv::new();
        let list = to_managed_wallets(&mut env, &[])?;
        assert_eq!(env.list_items(list), Some(vec![]));
        Ok(())
    }

    #[test]
    fn failing_signer_stops_the_list() {
        // second signer fails on its xpub setter
        let mut env = MockEnv::new().fail_setter("setXpub", 2);
        let signers = vec![sample_signer(1), sample_signer(2), sample_signer(3)];
        let err = to_managed_signers(&mut env, &signers).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Conversion {
                record: "SingleSigner",
                ..
            }
        ));
        assert_eq!(env.setter_calls("setXpub"), 2);
    }

    #[test]
    fn unknown_managed_address_type_is_an_error() {
        let mut env = MockEnv::new().with_address_type_count(3);
        assert!(to_managed_address_type(&mut env, AddressType::NativeSegwit).is_err());
        assert!(to_managed_address_type(&mut env, AddressType::NestedSegwit).is_ok());
    }

    #[test]
    fn raise_prefers_domain_exception() -> anyhow::Result<()> {
        let mut env = MockEnv::new();
        raise_exception(&mut env, "boom")?;
        let thrown = env.thrown();
        assert_eq!(thrown.len(), 1);
        assert_eq!(thrown[0].class, "com/nunchuk/android/exception/NunchukNativeException");
        assert_eq!(thrown[0].message, "boom");
        Ok(())
    }

    #[test]
    fn raise_falls_back_to_runtime_exception() -> anyhow::Result<()> {
        let mut env = MockEnv::new().without_class("com/nunchuk/android/exception/NunchukNativeException");
        raise_exception(&mut env, "boom")?;
        assert_eq!(env.thrown()[0].class, "java/lang/RuntimeException");
        assert_eq!(env.thrown()[0].message, "boom");
        Ok(())
    }

    #[test]
    fn raise_follows_configured_class_names() -> anyhow::Result<()> {
        let mut config = BridgeConfig::default();
        config.classes.exception = "org/example/BridgeException".to_string();
        config.classes.fallback_exception = "java/lang/IllegalStateException".to_string();

        let mut env = MockEnv::with_config(config.clone());
        raise_exception(&mut env, "boom")?;
        assert_eq!(env.thrown()[0].class, "org/example/BridgeException");

        let mut env = MockEnv::with_config(config).without_class("org/example/BridgeException");
        raise_exception(&mut env, "boom")?;
        assert_eq!(env.thrown()[0].class, "java/lang/IllegalStateException");
        Ok(())
    }

    #[test]
    fn failed_release_keeps_the_conversion_error() {
        let mut env = MockEnv::new().fail_setter("setName", 1).fail_releases();
        let err = to_managed_signer(&mut env, &sample_signer(1)).unwrap_err();
        let BridgeError::Conversion { record, reason } = err else {
            panic!("expected a conversion error, got {err:?}");
        };
        assert_eq!(record, "SingleSigner");
        assert!(reason.contains("setName threw"), "{reason}");
    }

    #[test]
    fn java_exception_text_reaches_the_caller() {
        let mut env = MockEnv::new().fail_setter_with(
            "setXpub",
            1,
            "java.lang.IllegalArgumentException: xpub too long",
        );
        let message = to_managed_signer(&mut env, &sample_signer(1))
            .unwrap_err()
            .to_string();
        assert_eq!(
            message,
            "Failed to convert SingleSigner: java.lang.IllegalArgumentException: xpub too long"
        );
    }
}
