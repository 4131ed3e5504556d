//! Managed -> native conversions for entry point arguments.

use log::debug;
use nunchuk_support::{AddressType, AppSettings, BackendType, Chain, SingleSigner};

use crate::error::{BridgeError, BridgeResult};
use crate::logging::LOG_TARGET;
use crate::managed::{ManagedClass, ManagedEnv};

pub fn to_native_address_type(ordinal: i32) -> BridgeResult<AddressType> {
    Ok(AddressType::try_from(ordinal)?)
}

pub fn to_native_signer<E: ManagedEnv>(
    env: &mut E,
    signer: &E::Object,
) -> BridgeResult<SingleSigner> {
    read_signer(env, signer).map_err(|err| BridgeError::conversion("SingleSigner", err))
}

fn read_signer<E: ManagedEnv>(env: &mut E, signer: &E::Object) -> BridgeResult<SingleSigner> {
    Ok(SingleSigner {
        name: env.get_string(signer, "getName")?,
        xpub: env.get_string(signer, "getXpub")?,
        public_key: env.get_string(signer, "getPublicKey")?,
        derivation_path: env.get_string(signer, "getDerivationPath")?,
        master_fingerprint: env.get_string(signer, "getMasterFingerprint")?,
        master_signer_id: env.get_string(signer, "getMasterSignerId")?,
        last_health_check: env.get_long(signer, "getLastHealthCheck")?,
        used: env.get_bool(signer, "getUsed")?,
    })
}

pub fn to_native_signers<E: ManagedEnv>(
    env: &mut E,
    signers: &E::Object,
) -> BridgeResult<Vec<SingleSigner>> {
    let len = env.list_len(signers)?;
    debug!(target: LOG_TARGET, "to_native_signers() size:: {len}");
    let mut result = Vec::with_capacity(len);
    for index in 0..len {
        let element = env.list_get(signers, index)?;
        let signer = to_native_signer(env, &element)?;
        env.release(element)?;
        result.push(signer);
    }
    Ok(result)
}

fn to_native_strings<E: ManagedEnv>(env: &mut E, list: &E::Object) -> BridgeResult<Vec<String>> {
    let len = env.list_len(list)?;
    let mut result = Vec::with_capacity(len);
    for index in 0..len {
        let element = env.list_get(list, index)?;
        result.push(env.read_string(&element)?);
        env.release(element)?;
    }
    Ok(result)
}

pub fn to_native_app_settings<E: ManagedEnv>(
    env: &mut E,
    settings: &E::Object,
) -> BridgeResult<AppSettings> {
    read_app_settings(env, settings).map_err(|err| BridgeError::conversion("AppSettings", err))
}

fn read_app_settings<E: ManagedEnv>(env: &mut E, settings: &E::Object) -> BridgeResult<AppSettings> {
    let chain = env.get_object(settings, "getChain", ManagedClass::Chain)?;
    let chain_ordinal = env.enum_ordinal(&chain)?;
    env.release(chain)?;

    let backend_type = env.get_object(settings, "getBackendType", ManagedClass::BackendType)?;
    let backend_ordinal = env.enum_ordinal(&backend_type)?;
    env.release(backend_type)?;

    let mainnet = env.get_object(settings, "getMainnetServers", ManagedClass::List)?;
    let mainnet_servers = to_native_strings(env, &mainnet)?;
    env.release(mainnet)?;

    let testnet = env.get_object(settings, "getTestnetServers", ManagedClass::List)?;
    let testnet_servers = to_native_strings(env, &testnet)?;
    env.release(testnet)?;

    Ok(AppSettings {
        chain: Chain::try_from(chain_ordinal)?,
        backend_type: BackendType::try_from(backend_ordinal)?,
        mainnet_servers,
        testnet_servers,
        hwi_path: env.get_string(settings, "getHwiPath")?,
        storage_path: env.get_string(settings, "getStoragePath")?,
        use_proxy: env.get_bool(settings, "getUseProxy")?,
        proxy_host: env.get_string(settings, "getProxyHost")?,
        proxy_port: env.get_int(settings, "getProxyPort")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deserializer::to_managed_signers;
    use crate::tests::helpers::{managed_app_settings, sample_signer};
    use crate::tests::mock_env::{MockEnv, MockValue};
    use nunchuk_support::NunchukError;
    use pretty_assertions::assert_eq;

    #[test]
    fn signers_read_back_unchanged() -> anyhow::Result<()> {
        let mut env = MockEnv::new();
        let signers = vec![sample_signer(1), sample_signer(2)];
        let list = to_managed_signers(&mut env, &signers)?;
        assert_eq!(to_native_signers(&mut env, &list)?, signers);
        Ok(())
    }

    #[test]
    fn empty_managed_list_is_an_empty_vec() -> anyhow::Result<()> {
        let mut env = MockEnv::new();
        let list = env.new_list()?;
        assert!(to_native_signers(&mut env, &list)?.is_empty());
        Ok(())
    }

    #[test]
    fn missing_signer_field_is_a_conversion_error() -> anyhow::Result<()> {
        let mut env = MockEnv::new();
        let signer = env.new_object(ManagedClass::SingleSigner)?;
        let err = to_native_signer(&mut env, &signer).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Conversion {
                record: "SingleSigner",
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn used_flag_comes_from_the_kotlin_property_getter() -> anyhow::Result<()> {
        let mut env = MockEnv::new();
        let signer = env.new_object(ManagedClass::SingleSigner)?;
        for (field, value) in [
            ("name", "cold"),
            ("xpub", "tpubD6Nz"),
            ("publicKey", "02ab"),
            ("derivationPath", "m/48'/1'/0'/2'"),
            ("masterFingerprint", "deadbeef"),
            ("masterSignerId", ""),
        ] {
            env.put(&signer, field, MockValue::Str(value.to_string()));
        }
        env.put(&signer, "lastHealthCheck", MockValue::Long(0));
        env.put(&signer, "used", MockValue::Bool(true));
        assert!(to_native_signer(&mut env, &signer)?.used);
        Ok(())
    }

    #[test]
    fn address_type_ordinals() {
        assert_eq!(to_native_address_type(4).ok(), Some(AddressType::Taproot));
        assert!(matches!(
            to_native_address_type(5),
            Err(BridgeError::Native(NunchukError::InvalidOrdinal { ordinal: 5, .. }))
        ));
        assert!(to_native_address_type(-1).is_err());
    }

    #[test]
    fn app_settings_are_read_field_by_field() -> anyhow::Result<()> {
        let mut env = MockEnv::new();
        let expected = AppSettings {
            chain: Chain::Signet,
            backend_type: BackendType::CoreRpc,
            mainnet_servers: vec!["ssl://mainnet.nunchuk.io:52002".to_string()],
            testnet_servers: vec![
                "ssl://testnet.nunchuk.io:50002".to_string(),
                "tcp://testnet.example:50001".to_string(),
            ],
            hwi_path: "/data/bin/hwi".to_string(),
            storage_path: "/data/nunchuk".to_string(),
            use_proxy: true,
            proxy_host: "127.0.0.1".to_string(),
            proxy_port: 9050,
        };
        let managed = managed_app_settings(&mut env, &expected);
        assert_eq!(to_native_app_settings(&mut env, &managed)?, expected);
        Ok(())
    }

    #[test]
    fn unknown_chain_ordinal_is_rejected() {
        let mut env = MockEnv::new();
        let managed = managed_app_settings(&mut env, &AppSettings::default());
        env.set_enum_ordinal(&managed, "chain", 7);
        let err = to_native_app_settings(&mut env, &managed).unwrap_err();
        assert!(err.to_string().contains("Chain"));
    }
}
