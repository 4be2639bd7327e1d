//! Registry resolving short names to gateway and document constructors.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use argentum_core::{ArgentumError, ArgentumResult, Params};
use argentum_invoicing::{Document, DocumentKind, DocumentModel};

use crate::config::RegistryConfig;
use crate::error::GatewayResult;
use crate::gateway::Gateway;
use crate::naming;
use crate::offline::{OFFLINE_SHORT_NAME, OfflineGateway};

/// Builds a fresh, uninitialized gateway.
pub type GatewayConstructor = Arc<dyn Fn() -> Box<dyn Gateway> + Send + Sync>;

/// Builds a document from construction parameters.
pub type DocumentConstructor =
    Arc<dyn Fn(Params) -> ArgentumResult<Box<dyn DocumentModel>> + Send + Sync>;

/// Gateway registry.
///
/// Class identifiers map to constructors; `all()` lists the short names
/// registered so far.
pub struct GatewayFactory {
    config: RegistryConfig,
    gateways: Vec<String>,
    gateway_classes: HashMap<String, GatewayConstructor>,
    document_classes: HashMap<String, DocumentConstructor>,
}

impl GatewayFactory {
    /// Registry knowing only the core documents.
    pub fn new(config: RegistryConfig) -> Self {
        let mut factory = Self {
            config,
            gateways: Vec::new(),
            gateway_classes: HashMap::new(),
            document_classes: HashMap::new(),
        };

        for kind in DocumentKind::ALL {
            let class = naming::core_document_class_name(kind.class_name(), factory.root());
            factory.define_document(class, move |params| {
                Ok(Box::new(Document::new(kind, params)?) as Box<dyn DocumentModel>)
            });
        }

        factory
    }

    /// Registry with the core documents and the offline gateway.
    pub fn with_builtin(config: RegistryConfig) -> Self {
        let mut factory = Self::new(config);
        let root = factory.root().to_string();
        let class = factory.gateway_class_name(OFFLINE_SHORT_NAME);
        factory.define_gateway(class, move || {
            Box::new(OfflineGateway::under_root(&root)) as Box<dyn Gateway>
        });
        factory
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn root(&self) -> &str {
        &self.config.root_namespace
    }

    pub fn define_gateway<F>(&mut self, class_name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn Gateway> + Send + Sync + 'static,
    {
        let class_name = class_name.into();
        tracing::debug!(class = %class_name, "gateway class defined");
        self.gateway_classes.insert(class_name, Arc::new(constructor));
    }

    pub fn define_document<F>(&mut self, class_name: impl Into<String>, constructor: F)
    where
        F: Fn(Params) -> ArgentumResult<Box<dyn DocumentModel>> + Send + Sync + 'static,
    {
        let class_name = class_name.into();
        tracing::debug!(class = %class_name, "document class defined");
        self.document_classes.insert(class_name, Arc::new(constructor));
    }

    pub fn class_exists(&self, class_name: &str) -> bool {
        self.gateway_classes.contains_key(class_name) || self.document_classes.contains_key(class_name)
    }

    /// Registered short names.
    pub fn all(&self) -> &[String] {
        &self.gateways
    }

    pub fn replace(&mut self, gateways: Vec<String>) {
        self.gateways = gateways;
    }

    /// Add `name` unless it is already registered.
    pub fn register(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.gateways.contains(&name) {
            tracing::debug!(gateway = %name, "gateway registered");
            self.gateways.push(name);
        }
    }

    /// Register every supported gateway whose class is defined and return
    /// the registered names sorted.
    pub fn find(&mut self) -> &[String] {
        let candidates = self.config.supported_gateways.clone();
        for name in candidates {
            let class = self.gateway_class_name(&name);
            if self.gateway_classes.contains_key(&class) {
                self.register(name);
            } else {
                tracing::debug!(gateway = %name, class = %class, "supported gateway not available");
            }
        }

        self.gateways.sort();
        tracing::info!(gateways = ?self.gateways, "gateways discovered");
        &self.gateways
    }

    pub fn supported_gateways(&self) -> &[String] {
        &self.config.supported_gateways
    }

    pub fn gateway_class_name(&self, name: &str) -> String {
        naming::gateway_class_name(name, self.root())
    }

    pub fn short_name_of(&self, gateway: &dyn Gateway) -> String {
        naming::gateway_short_name(gateway.class_name(), self.root())
    }

    /// Resolve and build an initialized gateway.
    pub fn create(&self, name: &str) -> GatewayResult<Box<dyn Gateway>> {
        let class = self.gateway_class_name(name);
        let Some(constructor) = self.gateway_classes.get(&class) else {
            tracing::warn!(gateway = name, class = %class, "gateway class not found");
            return Err(ArgentumError::class_not_found(class).into());
        };

        let mut gateway = constructor();
        gateway.initialize(Params::new());
        tracing::debug!(gateway = name, class = %class, "gateway created");
        Ok(gateway)
    }

    /// Class a document name resolves to for `gateway` (short name).
    pub fn document_class_name(&self, name: &str, gateway: &str) -> String {
        naming::document_class_name(name, gateway, self.root(), |class| {
            self.document_classes.contains_key(class)
        })
    }

    /// Build a document through `gateway`, seeded with the gateway
    /// parameters; `params` win on conflicts.
    pub fn create_document(
        &self,
        gateway: &dyn Gateway,
        name: &str,
        params: Params,
    ) -> GatewayResult<Box<dyn DocumentModel>> {
        let class = self.document_class_name(name, &self.short_name_of(gateway));
        let Some(constructor) = self.document_classes.get(&class) else {
            tracing::warn!(document = name, class = %class, "document class not found");
            return Err(ArgentumError::class_not_found(class).into());
        };

        let merged = gateway.parameters().merged(params);
        Ok(constructor(merged)?)
    }
}

impl Default for GatewayFactory {
    fn default() -> Self {
        Self::with_builtin(RegistryConfig::default())
    }
}

impl fmt::Debug for GatewayFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut gateway_classes: Vec<&String> = self.gateway_classes.keys().collect();
        gateway_classes.sort();
        let mut document_classes: Vec<&String> = self.document_classes.keys().collect();
        document_classes.sort();

        f.debug_struct("GatewayFactory")
            .field("config", &self.config)
            .field("gateways", &self.gateways)
            .field("gateway_classes", &gateway_classes)
            .field("document_classes", &document_classes)
            .finish()
    }
}
