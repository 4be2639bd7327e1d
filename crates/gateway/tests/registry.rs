use argentum_core::{ArgentumError, Params, params_from_json};
use argentum_gateway::{
    Gateway, GatewayFactory, GatewayParameters, GatewayResult, OfflineGateway, RegistryConfig,
    SignRequest,
};
use argentum_invoicing::{Document, DocumentModel, DocumentView};
use serde_json::json;

/// Gateway shipping its own invoice rendering.
#[derive(Debug, Default)]
struct AcmeGateway {
    parameters: GatewayParameters,
}

impl Gateway for AcmeGateway {
    fn name(&self) -> &str {
        "Acme Facturación"
    }

    fn class_name(&self) -> &str {
        "\\Argentum\\Acme\\Gateway"
    }

    fn default_parameters(&self) -> Params {
        params_from_json(json!({ "username": "", "currency": ["MXN"] }))
    }

    fn parameters(&self) -> &GatewayParameters {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut GatewayParameters {
        &mut self.parameters
    }
}

#[derive(Debug)]
struct AcmeInvoice {
    inner: Document,
}

impl DocumentModel for AcmeInvoice {
    fn document_type(&self) -> &str {
        "invoice"
    }

    fn validate(&self) -> argentum_core::ArgentumResult<()> {
        self.inner.validate()
    }

    fn to_value(&self) -> argentum_core::Value {
        self.inner.to_value()
    }

    fn view(&self) -> DocumentView {
        let mut view = self.inner.view();
        view.document_type = "acme-invoice".to_string();
        view
    }

    fn as_document(&self) -> Option<&Document> {
        Some(&self.inner)
    }
}

fn factory() -> GatewayFactory {
    let config = RegistryConfig {
        supported_gateways: vec!["Offline".into(), "Acme".into(), "Ghost".into()],
        ..RegistryConfig::default()
    };
    let mut factory = GatewayFactory::with_builtin(config);
    factory.define_gateway("\\Argentum\\Acme\\Gateway", || {
        Box::new(AcmeGateway::default()) as Box<dyn Gateway>
    });
    factory.define_document("\\Argentum\\Acme\\Document\\Invoice", |params| {
        Ok(Box::new(AcmeInvoice {
            inner: Document::invoice(params)?,
        }) as Box<dyn DocumentModel>)
    });
    factory
}

#[test]
fn discovers_and_creates_gateways() -> anyhow::Result<()> {
    argentum_observability::init();

    let mut factory = factory();
    assert_eq!(factory.find(), ["Acme", "Offline"]);

    let acme = factory.create("Acme")?;
    assert_eq!(acme.name(), "Acme Facturación");
    assert_eq!(factory.short_name_of(acme.as_ref()), "Acme");
    assert_eq!(acme.parameters().currency().as_deref(), Some("MXN"));
    assert!(!acme.supports_sign());

    let qualified = factory.create("\\Argentum\\Offline\\Gateway")?;
    assert!(qualified.supports_sign());

    let err = factory.create("Ghost").unwrap_err();
    assert!(matches!(err.as_argentum(), Some(ArgentumError::ClassNotFound { .. })));

    Ok(())
}

#[test]
fn gateway_documents_override_core_documents() -> anyhow::Result<()> {
    let factory = factory();
    let acme = factory.create("Acme")?;
    let offline = factory.create("Offline")?;

    let params = json!({
        "from": { "id": "AAA010101AAA", "name": "Acme S.A." },
        "to": { "id": "XAXX010101000", "name": "Cliente" },
        "items": [{ "name": "Servicio", "price": 100, "quantity": 1, "taxes": [{ "type": "vat", "rate": 16 }] }]
    });

    let specific = factory.create_document(acme.as_ref(), "invoice", params_from_json(params.clone()))?;
    specific.validate()?;
    assert_eq!(specific.view().document_type, "acme-invoice");
    assert!((specific.view().total - 116.0).abs() < 1e-9);

    let generic = factory.create_document(offline.as_ref(), "invoice", params_from_json(params))?;
    assert_eq!(generic.view().document_type, "invoice");

    let note = factory.create_document(acme.as_ref(), "creditNote", Params::new())?;
    assert_eq!(note.document_type(), "creditNote");

    Ok(())
}

#[test]
fn offline_gateway_signs_documents_locally() -> anyhow::Result<()> {
    let factory = GatewayFactory::default();
    let gateway = factory.create("Offline")?;

    let ticket = factory.create_document(
        gateway.as_ref(),
        "ticket",
        params_from_json(json!({
            "from": { "id": "AAA010101AAA", "name": "Acme S.A." },
            "items": [{ "name": "Café", "price": 35, "quantity": 2 }]
        })),
    )?;

    let request: SignRequest = gateway.sign(Params::new())?.with_document(ticket);
    assert_eq!(request.country_code(), Some("MX"));

    let response = request.send()?;
    assert!(response.is_successful());

    let data = serde_json::to_value(response.data())?;
    assert_eq!(data["country_code"], "MX");
    assert_eq!(data["document"]["currency"], "MXN");
    assert_eq!(data["document"]["items"][0]["price"], 35.0);

    Ok(())
}

#[test]
fn sign_without_document_reports_missing_field() -> GatewayResult<()> {
    let gateway = OfflineGateway::new();
    let request = gateway.sign(Params::new())?;
    let err = request.send().unwrap_err();
    assert_eq!(err.to_string(), "The document parameter is required");
    Ok(())
}

#[test]
fn shared_registry_is_opt_in_and_lockable() {
    let shared = argentum_gateway::shared();
    {
        let mut factory = shared.write().unwrap();
        factory.register("Offline");
        factory.register("Offline");
    }
    let factory = shared.read().unwrap();
    assert_eq!(factory.all().iter().filter(|g| *g == "Offline").count(), 1);
    assert!(argentum_gateway::install_shared(GatewayFactory::default()).is_err());
}
