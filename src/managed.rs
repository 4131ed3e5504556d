//! Managed-runtime seam.
//!
//! The serializer and deserializer only talk to the JVM through
//! [`ManagedEnv`]. The JNI implementation lives in [`crate::jvm`]; tests use
//! an in-memory heap instead.

use crate::config::{BridgeConfig, ClassNames};
use crate::error::BridgeResult;

/// Managed classes known to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagedClass {
    SingleSigner,
    Wallet,
    AppSettings,
    AddressType,
    Chain,
    BackendType,
    List,
    String,
}

impl ManagedClass {
    pub fn name(self, classes: &ClassNames) -> &str {
        match self {
            ManagedClass::SingleSigner => &classes.single_signer,
            ManagedClass::Wallet => &classes.wallet,
            ManagedClass::AppSettings => &classes.app_settings,
            ManagedClass::AddressType => &classes.address_type,
            ManagedClass::Chain => &classes.chain,
            ManagedClass::BackendType => &classes.backend_type,
            ManagedClass::List => &classes.list,
            ManagedClass::String => &classes.string,
        }
    }

    /// Field descriptor, e.g. `Ljava/util/List;`
    pub fn descriptor(self, classes: &ClassNames) -> String {
        format!("L{};", self.name(classes))
    }
}

/// Argument of a managed setter call.
#[derive(Debug)]
pub enum Value<'a, O> {
    Str(&'a str),
    Int(i32),
    Long(i64),
    Bool(bool),
    Double(f64),
    Object(ManagedClass, &'a O),
}

/// Operations the bridge needs from the managed runtime.
///
/// Accessors are named exactly like the managed methods (`setName`,
/// `getXpub`, `getUsed`). Objects are local handles valid for the current call.
pub trait ManagedEnv {
    type Object;

    fn config(&self) -> &BridgeConfig;

    /// Instantiate `class` through its no-arg constructor.
    fn new_object(&mut self, class: ManagedClass) -> BridgeResult<Self::Object>;

    fn new_string(&mut self, value: &str) -> BridgeResult<Self::Object>;

    fn read_string(&mut self, string: &Self::Object) -> BridgeResult<String>;

    /// Empty `java.util.ArrayList`
    fn new_list(&mut self) -> BridgeResult<Self::Object>;

    fn list_add(&mut self, list: &Self::Object, item: &Self::Object) -> BridgeResult<()>;

    fn list_len(&mut self, list: &Self::Object) -> BridgeResult<usize>;

    fn list_get(&mut self, list: &Self::Object, index: usize) -> BridgeResult<Self::Object>;

    /// Drop a local handle once the managed side holds its own reference.
    fn release(&mut self, object: Self::Object) -> BridgeResult<()>;

    fn set(&mut self, object: &Self::Object, setter: &str, value: Value<'_, Self::Object>)
        -> BridgeResult<()>;

    fn get_string(&mut self, object: &Self::Object, getter: &str) -> BridgeResult<String>;

    fn get_int(&mut self, object: &Self::Object, getter: &str) -> BridgeResult<i32>;

    fn get_long(&mut self, object: &Self::Object, getter: &str) -> BridgeResult<i64>;

    fn get_bool(&mut self, object: &Self::Object, getter: &str) -> BridgeResult<bool>;

    fn get_object(
        &mut self,
        object: &Self::Object,
        getter: &str,
        class: ManagedClass,
    ) -> BridgeResult<Self::Object>;

    /// Managed `AddressType` constant for `ordinal`, via the helper factory.
    fn address_type(&mut self, ordinal: i32) -> BridgeResult<Self::Object>;

    /// `ordinal()` of a managed enum constant
    fn enum_ordinal(&mut self, constant: &Self::Object) -> BridgeResult<i32>;

    /// Whether the throwable class `name` can be thrown in this runtime.
    fn class_available(&mut self, name: &str) -> bool;

    /// Throw a new instance of `class` with `message`. Pending exceptions are
    /// cleared first.
    fn throw(&mut self, class: &str, message: &str) -> BridgeResult<()>;
}
