//! `argentum-gateway`: gateway contract, name resolution and the registry
//! that builds gateways and documents from short names.

pub mod config;
pub mod error;
pub mod factory;
pub mod gateway;
pub mod message;
pub mod naming;
pub mod offline;

use std::sync::{OnceLock, RwLock};

pub use config::RegistryConfig;
pub use error::{GatewayError, GatewayResult};
pub use factory::{DocumentConstructor, GatewayConstructor, GatewayFactory};
pub use gateway::{Gateway, GatewayParameters};
pub use message::{SignRequest, SignResponse};
pub use offline::OfflineGateway;

static SHARED: OnceLock<RwLock<GatewayFactory>> = OnceLock::new();

/// Process-wide registry for callers that opt into one.
///
/// Initialized on first access with the built-in gateways and configuration
/// read from the environment, unless [`install_shared`] ran first.
pub fn shared() -> &'static RwLock<GatewayFactory> {
    SHARED.get_or_init(|| RwLock::new(GatewayFactory::with_builtin(RegistryConfig::from_env())))
}

/// Install `factory` as the shared registry.
///
/// Hands the factory back when the shared registry already exists.
pub fn install_shared(factory: GatewayFactory) -> Result<(), GatewayFactory> {
    SHARED
        .set(RwLock::new(factory))
        .map_err(|lock| lock.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner()))
}
