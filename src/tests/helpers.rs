use nunchuk_support::{AddressType, AppSettings, SingleSigner, Wallet};

use crate::managed::{ManagedClass, ManagedEnv};
use crate::tests::mock_env::{MockEnv, MockRef, MockValue};

pub fn sample_signer(index: u32) -> SingleSigner {
    SingleSigner {
        name: format!("signer-{index}"),
        xpub: format!("tpubD6NzVbkrYhZ4XgiXtGrdW5XDAPFCL9h7we1vwNCpn8tGbBcgfVYjXyhWo4E1xkh56hjod1RhGjxbaTLV3X4FyWuejifB9jusQ46QzG87VK{index}"),
        public_key: format!("02{index:064x}"),
        derivation_path: format!("m/48'/1'/{index}'/2'"),
        master_fingerprint: format!("{index:08x}"),
        master_signer_id: format!("ms-{index}"),
        last_health_check: 1_650_000_000 + i64::from(index),
        used: true,
    }
}

pub fn sample_wallet(id: &str, signers: u32) -> Wallet {
    Wallet {
        id: id.to_string(),
        name: format!("wallet {id}"),
        required_signs: signers.min(2) as i32,
        signers: (1..=signers).map(sample_signer).collect(),
        address_type: AddressType::NativeSegwit,
        escrow: false,
        balance: 0,
        create_date: 1_650_000_000,
        description: format!("{signers}-key wallet"),
    }
}

fn managed_strings(env: &mut MockEnv, values: &[String]) -> MockRef {
    let list = env.new_list().expect("list");
    for value in values {
        let item = env.new_string(value).expect("string");
        env.list_add(&list, &item).expect("list add");
    }
    list
}

/// Managed `AppSettings` as the app would pass it to `initNunchuk`.
pub fn managed_app_settings(env: &mut MockEnv, settings: &AppSettings) -> MockRef {
    let object = env.new_object(ManagedClass::AppSettings).expect("record");
    let chain = env.new_enum(ManagedClass::Chain, settings.chain.ordinal());
    let backend_type = env.new_enum(ManagedClass::BackendType, settings.backend_type.ordinal());
    let mainnet = managed_strings(env, &settings.mainnet_servers);
    let testnet = managed_strings(env, &settings.testnet_servers);
    env.put(&object, "chain", MockValue::Object(chain));
    env.put(&object, "backendType", MockValue::Object(backend_type));
    env.put(&object, "mainnetServers", MockValue::Object(mainnet));
    env.put(&object, "testnetServers", MockValue::Object(testnet));
    env.put(&object, "hwiPath", MockValue::Str(settings.hwi_path.clone()));
    env.put(&object, "storagePath", MockValue::Str(settings.storage_path.clone()));
    env.put(&object, "useProxy", MockValue::Bool(settings.use_proxy));
    env.put(&object, "proxyHost", MockValue::Str(settings.proxy_host.clone()));
    env.put(&object, "proxyPort", MockValue::Int(settings.proxy_port));
    object
}
