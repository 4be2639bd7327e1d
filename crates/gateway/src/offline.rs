//! Built-in gateway that signs documents locally.

use argentum_core::{Params, params_from_json};
use serde_json::json;

use crate::error::GatewayResult;
use crate::gateway::{Gateway, GatewayParameters};
use crate::message::SignRequest;
use crate::naming::{DEFAULT_ROOT_NAMESPACE, gateway_class_name, gateway_short_name};

pub const OFFLINE_SHORT_NAME: &str = "Offline";

#[derive(Debug, Clone)]
pub struct OfflineGateway {
    root: String,
    class_name: String,
    parameters: GatewayParameters,
}

impl OfflineGateway {
    pub fn new() -> Self {
        Self::under_root(DEFAULT_ROOT_NAMESPACE)
    }

    /// Offline gateway registered under another root namespace.
    pub fn under_root(root: &str) -> Self {
        let mut gateway = Self {
            root: root.to_string(),
            class_name: gateway_class_name(OFFLINE_SHORT_NAME, root),
            parameters: GatewayParameters::default(),
        };
        gateway.initialize(Params::new());
        gateway
    }
}

impl Default for OfflineGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl Gateway for OfflineGateway {
    fn name(&self) -> &str {
        "Offline"
    }

    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn short_name(&self) -> String {
        gateway_short_name(&self.class_name, &self.root)
    }

    fn default_parameters(&self) -> Params {
        params_from_json(json!({
            "testMode": false,
            "currency": ["MXN", "USD"],
            "countryCode": ["MX"]
        }))
    }

    fn parameters(&self) -> &GatewayParameters {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut GatewayParameters {
        &mut self.parameters
    }

    fn supports_sign(&self) -> bool {
        true
    }

    fn sign(&self, params: Params) -> GatewayResult<SignRequest> {
        Ok(SignRequest::new(self.parameters.merged(params)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argentum_core::Value;

    #[test]
    fn defaults_and_names() {
        let gateway = OfflineGateway::new();
        assert_eq!(gateway.class_name(), "\\Argentum\\Offline\\Gateway");
        assert_eq!(gateway.short_name(), "Offline");
        assert!(gateway.supports_sign());
        assert_eq!(gateway.parameters().currency().as_deref(), Some("MXN"));
        assert_eq!(gateway.parameters().get("countryCode"), Some(&Value::from("MX")));
    }

    #[test]
    fn sign_overlays_caller_parameters() {
        let gateway = OfflineGateway::new();
        let request = gateway
            .sign(params_from_json(json!({ "country_code": "AR" })))
            .unwrap();
        assert_eq!(request.country_code(), Some("AR"));
        assert!(!request.test_mode());
    }

    #[test]
    fn custom_root_changes_class_name_but_not_short_name() {
        let gateway = OfflineGateway::under_root("Fiscal");
        assert_eq!(gateway.class_name(), "\\Fiscal\\Offline\\Gateway");
        assert_eq!(gateway.short_name(), "Offline");
    }
}
