//! Gateway contract and the parameters every gateway carries.

use std::fmt;

use argentum_core::helper::camel_case;
use argentum_core::{Params, Value};

use crate::error::{GatewayError, GatewayResult};
use crate::message::SignRequest;
use crate::naming::{DEFAULT_ROOT_NAMESPACE, gateway_short_name};

/// Keys every gateway accepts regardless of its defaults.
const COMMON_KEYS: [&str; 2] = ["testMode", "currency"];

/// Gateway configuration values, keyed in camelCase (`testMode`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GatewayParameters {
    values: Params,
}

impl GatewayParameters {
    /// Seed from declared defaults; a list value defaults to its first
    /// element.
    pub fn from_defaults(defaults: &Params) -> Self {
        let values = defaults
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::List(options) => options.first().cloned().unwrap_or_default(),
                    other => other.clone(),
                };
                (camel_case(key), value)
            })
            .collect();
        Self { values }
    }

    /// Apply `params`, keeping only keys the gateway knows about.
    pub fn apply(&mut self, params: Params) {
        for (key, value) in params {
            let key = camel_case(&key);
            if self.values.contains_key(&key) || COMMON_KEYS.contains(&key.as_str()) {
                self.values.insert(key, value);
            } else {
                tracing::trace!(key = %key, "ignoring unknown gateway parameter");
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(&camel_case(key))
    }

    pub fn set(&mut self, key: &str, value: Value) -> &mut Self {
        self.values.insert(camel_case(key), value);
        self
    }

    pub fn all(&self) -> &Params {
        &self.values
    }

    pub fn test_mode(&self) -> bool {
        self.get("testMode").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn set_test_mode(&mut self, enabled: bool) -> &mut Self {
        self.set("testMode", Value::Bool(enabled))
    }

    pub fn currency(&self) -> Option<String> {
        self.get("currency")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase)
    }

    pub fn set_currency(&mut self, code: &str) -> &mut Self {
        self.set("currency", Value::from(code))
    }

    /// These parameters overlaid with `overrides`; overrides win.
    pub fn merged(&self, overrides: Params) -> Params {
        let mut merged = self.values.clone();
        for (key, value) in overrides {
            merged.insert(camel_case(&key), value);
        }
        merged
    }
}

/// A fiscal gateway.
pub trait Gateway: fmt::Debug + Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &str;

    /// Fully qualified class identifier the gateway is registered under.
    fn class_name(&self) -> &str;

    /// Short name under the default root; gateways living under another
    /// root override this.
    fn short_name(&self) -> String {
        gateway_short_name(self.class_name(), DEFAULT_ROOT_NAMESPACE)
    }

    fn default_parameters(&self) -> Params {
        Params::new()
    }

    fn parameters(&self) -> &GatewayParameters;

    fn parameters_mut(&mut self) -> &mut GatewayParameters;

    /// Reset to the defaults, then apply `params`.
    fn initialize(&mut self, params: Params) {
        let mut parameters = GatewayParameters::from_defaults(&self.default_parameters());
        parameters.apply(params);
        *self.parameters_mut() = parameters;
    }

    fn supports_sign(&self) -> bool {
        false
    }

    /// Build a sign request from the gateway parameters overlaid with
    /// `params`.
    fn sign(&self, _params: Params) -> GatewayResult<SignRequest> {
        Err(GatewayError::unsupported(self.name(), "sign"))
    }
}
