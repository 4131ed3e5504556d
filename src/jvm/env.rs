use std::collections::HashMap;

use jni::errors::Error as JniError;
use jni::objects::{GlobalRef, JClass, JList, JObject, JString, JValue};
use jni::JNIEnv;
use log::{error, warn};

use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::logging::LOG_TARGET;
use crate::managed::{ManagedClass, ManagedEnv, Value};

/// Global references to the classes the bridge instantiates, calls
/// statically or throws. Resolved once, on a thread that sees the app class
/// loader.
pub struct ClassCache {
    array_list: GlobalRef,
    single_signer: GlobalRef,
    wallet: GlobalRef,
    app_settings: GlobalRef,
    address_type_helper: GlobalRef,
    throwables: HashMap<String, GlobalRef>,
}

impl ClassCache {
    /// Every class is required except the domain exception, which may be
    /// missing from older app builds.
    pub fn load(env: &mut JNIEnv, config: &BridgeConfig) -> BridgeResult<Self> {
        let classes = &config.classes;
        let mut throwables = HashMap::new();
        match global_class(env, &classes.exception) {
            Ok(class) => {
                throwables.insert(classes.exception.clone(), class);
            }
            Err(err) => warn!(target: LOG_TARGET, "{err}, falling back to {}", classes.fallback_exception),
        }
        throwables.insert(
            classes.fallback_exception.clone(),
            global_class(env, &classes.fallback_exception)?,
        );
        Ok(Self {
            array_list: global_class(env, &classes.array_list)?,
            single_signer: global_class(env, &classes.single_signer)?,
            wallet: global_class(env, &classes.wallet)?,
            app_settings: global_class(env, &classes.app_settings)?,
            address_type_helper: global_class(env, &classes.address_type_helper)?,
            throwables,
        })
    }

    fn constructible(&self, class: ManagedClass) -> BridgeResult<&JClass<'static>> {
        let global = match class {
            ManagedClass::SingleSigner => &self.single_signer,
            ManagedClass::Wallet => &self.wallet,
            ManagedClass::AppSettings => &self.app_settings,
            ManagedClass::List => &self.array_list,
            other => return Err(BridgeError::ClassNotFound(format!("{other:?} is not constructible"))),
        };
        Ok(as_class(global))
    }

    /// Resolved throwable class named `name`
    pub fn throwable(&self, name: &str) -> Option<&JClass<'static>> {
        self.throwables.get(name).map(as_class)
    }
}

fn as_class(global: &GlobalRef) -> &JClass<'static> {
    <&JClass>::from(global.as_obj())
}

fn global_class(env: &mut JNIEnv, name: &str) -> BridgeResult<GlobalRef> {
    let class = match env.find_class(name) {
        Ok(class) => class,
        Err(_) => {
            // FindClass leaves a NoClassDefFoundError pending
            env.exception_clear()?;
            return Err(BridgeError::ClassNotFound(name.to_string()));
        }
    };
    let global = env.new_global_ref(&class)?;
    env.delete_local_ref(class)?;
    Ok(global)
}

/// Clear the pending throwable and describe it with `toString()`.
fn take_pending_exception(env: &mut JNIEnv) -> Option<String> {
    let throwable = env.exception_occurred().ok()?;
    env.exception_clear().ok()?;
    if throwable.is_null() {
        return None;
    }
    let description = env
        .call_method(&throwable, "toString", "()Ljava/lang/String;", &[])
        .and_then(|value| value.l());
    let description = match description {
        Ok(description) if !description.is_null() => description,
        Ok(_) => return None,
        Err(err) => {
            error!(target: LOG_TARGET, "unable to describe exception: {err}");
            let _ = env.exception_clear();
            return None;
        }
    };
    let description = JString::from(description);
    let text = env.get_string(&description).map(String::from).ok();
    let _ = env.delete_local_ref(description);
    let _ = env.delete_local_ref(throwable);
    text
}

/// [`ManagedEnv`] backed by a live `JNIEnv`.
pub struct JniEnv<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
    classes: &'a ClassCache,
    config: &'a BridgeConfig,
}

impl<'a, 'local> JniEnv<'a, 'local> {
    pub fn new(env: &'a mut JNIEnv<'local>, classes: &'a ClassCache, config: &'a BridgeConfig) -> Self {
        Self {
            env,
            classes,
            config,
        }
    }

    fn descriptor(&self, class: ManagedClass) -> String {
        class.descriptor(&self.config.classes)
    }

    /// Run a JNI call. A throwable raised by the managed side is cleared and
    /// returned as [`BridgeError::JavaException`] carrying its description.
    fn guarded<T>(&mut self, call: impl FnOnce(&mut JNIEnv<'local>) -> Result<T, JniError>) -> BridgeResult<T> {
        match call(self.env) {
            Ok(value) => Ok(value),
            Err(JniError::JavaException) => Err(BridgeError::java_exception(take_pending_exception(self.env))),
            Err(err) => Err(err.into()),
        }
    }

    fn call_setter(&mut self, object: &JObject<'local>, setter: &str, sig: &str, arg: JValue) -> BridgeResult<()> {
        self.guarded(|env| env.call_method(object, setter, sig, &[arg]))?;
        Ok(())
    }

    fn non_null(value: JObject<'local>, getter: &str) -> BridgeResult<JObject<'local>> {
        if value.is_null() {
            return Err(BridgeError::Managed(format!("{getter} returned null")));
        }
        Ok(value)
    }
}

impl<'a, 'local> ManagedEnv for JniEnv<'a, 'local> {
    type Object = JObject<'local>;

    fn config(&self) -> &BridgeConfig {
        self.config
    }

    fn new_object(&mut self, class: ManagedClass) -> BridgeResult<JObject<'local>> {
        let class = self.classes.constructible(class)?;
        self.guarded(|env| env.new_object(class, "()V", &[]))
    }

    fn new_string(&mut self, value: &str) -> BridgeResult<JObject<'local>> {
        Ok(self.guarded(|env| env.new_string(value))?.into())
    }

    fn read_string(&mut self, string: &JObject<'local>) -> BridgeResult<String> {
        let string = <&JString>::from(string);
        self.guarded(|env| env.get_string(string).map(String::from))
    }

    fn new_list(&mut self) -> BridgeResult<JObject<'local>> {
        self.new_object(ManagedClass::List)
    }

    fn list_add(&mut self, list: &JObject<'local>, item: &JObject<'local>) -> BridgeResult<()> {
        self.guarded(|env| {
            let list = JList::from_env(env, list)?;
            list.add(env, item)
        })
    }

    fn list_len(&mut self, list: &JObject<'local>) -> BridgeResult<usize> {
        let size = self.guarded(|env| {
            let list = JList::from_env(env, list)?;
            list.size(env)
        })?;
        usize::try_from(size).map_err(|_| BridgeError::Managed(format!("negative list size {size}")))
    }

    fn list_get(&mut self, list: &JObject<'local>, index: usize) -> BridgeResult<JObject<'local>> {
        let position = i32::try_from(index)
            .map_err(|_| BridgeError::Managed(format!("list index {index} out of range")))?;
        self.guarded(|env| {
            let list = JList::from_env(env, list)?;
            list.get(env, position)
        })?
        .ok_or_else(|| BridgeError::Managed(format!("no list element at {index}")))
    }

    fn release(&mut self, object: JObject<'local>) -> BridgeResult<()> {
        self.guarded(|env| env.delete_local_ref(object))
    }

    fn set(&mut self, object: &JObject<'local>, setter: &str, value: Value<'_, JObject<'local>>) -> BridgeResult<()> {
        match value {
            Value::Str(value) => {
                let string = self.guarded(|env| env.new_string(value))?;
                let result = self.call_setter(object, setter, "(Ljava/lang/String;)V", JValue::Object(&string));
                self.guarded(|env| env.delete_local_ref(string))?;
                result?;
            }
            Value::Int(value) => self.call_setter(object, setter, "(I)V", JValue::Int(value))?,
            Value::Long(value) => self.call_setter(object, setter, "(J)V", JValue::Long(value))?,
            Value::Bool(value) => self.call_setter(object, setter, "(Z)V", JValue::Bool(u8::from(value)))?,
            Value::Double(value) => self.call_setter(object, setter, "(D)V", JValue::Double(value))?,
            Value::Object(class, value) => {
                let sig = format!("({})V", self.descriptor(class));
                self.call_setter(object, setter, &sig, JValue::Object(value))?;
            }
        }
        Ok(())
    }

    fn get_string(&mut self, object: &JObject<'local>, getter: &str) -> BridgeResult<String> {
        let value = self.guarded(|env| env.call_method(object, getter, "()Ljava/lang/String;", &[])?.l())?;
        let string = JString::from(Self::non_null(value, getter)?);
        let result = self.guarded(|env| env.get_string(&string).map(String::from));
        self.guarded(|env| env.delete_local_ref(string))?;
        result
    }

    fn get_int(&mut self, object: &JObject<'local>, getter: &str) -> BridgeResult<i32> {
        self.guarded(|env| env.call_method(object, getter, "()I", &[])?.i())
    }

    fn get_long(&mut self, object: &JObject<'local>, getter: &str) -> BridgeResult<i64> {
        self.guarded(|env| env.call_method(object, getter, "()J", &[])?.j())
    }

    fn get_bool(&mut self, object: &JObject<'local>, getter: &str) -> BridgeResult<bool> {
        self.guarded(|env| env.call_method(object, getter, "()Z", &[])?.z())
    }

    fn get_object(
        &mut self,
        object: &JObject<'local>,
        getter: &str,
        class: ManagedClass,
    ) -> BridgeResult<JObject<'local>> {
        let sig = format!("(){}", self.descriptor(class));
        let value = self.guarded(|env| env.call_method(object, getter, sig, &[])?.l())?;
        Self::non_null(value, getter)
    }

    fn address_type(&mut self, ordinal: i32) -> BridgeResult<JObject<'local>> {
        let helper = as_class(&self.classes.address_type_helper);
        let sig = format!("(I){}", self.descriptor(ManagedClass::AddressType));
        let value = self.guarded(|env| {
            env.call_static_method(helper, "from", sig, &[JValue::Int(ordinal)])?
                .l()
        })?;
        if value.is_null() {
            return Err(BridgeError::Managed(format!("no AddressType with ordinal {ordinal}")));
        }
        Ok(value)
    }

    fn enum_ordinal(&mut self, constant: &JObject<'local>) -> BridgeResult<i32> {
        self.guarded(|env| env.call_method(constant, "ordinal", "()I", &[])?.i())
    }

    fn class_available(&mut self, name: &str) -> bool {
        self.classes.throwable(name).is_some()
    }

    fn throw(&mut self, class: &str, message: &str) -> BridgeResult<()> {
        if self.env.exception_check()? {
            self.env.exception_clear()?;
        }
        match self.classes.throwable(class) {
            Some(cached) => self.env.throw_new(cached, message)?,
            None => self.env.throw_new(class, message)?,
        }
        Ok(())
    }
}
