//! Sign request/response exchanged with a gateway.

use argentum_core::{ArgentumError, Params, Value};
use argentum_invoicing::DocumentModel;

use crate::error::GatewayResult;

/// Request to sign a document.
///
/// `data()` requires a document and validates it before anything is sent.
#[derive(Debug)]
pub struct SignRequest {
    parameters: Params,
    document: Option<Box<dyn DocumentModel>>,
}

impl SignRequest {
    pub fn new(parameters: Params) -> Self {
        Self {
            parameters,
            document: None,
        }
    }

    pub fn parameters(&self) -> &Params {
        &self.parameters
    }

    pub fn test_mode(&self) -> bool {
        self.parameters
            .get("testMode")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn country_code(&self) -> Option<&str> {
        self.parameters.get("countryCode").and_then(Value::as_str)
    }

    pub fn set_country_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.parameters
            .insert("countryCode".to_string(), Value::String(code.into()));
        self
    }

    pub fn document(&self) -> Option<&dyn DocumentModel> {
        self.document.as_deref()
    }

    pub fn set_document(&mut self, document: Box<dyn DocumentModel>) -> &mut Self {
        self.document = Some(document);
        self
    }

    pub fn with_document(mut self, document: Box<dyn DocumentModel>) -> Self {
        self.document = Some(document);
        self
    }

    /// Payload: `country_code` and the exported document.
    pub fn data(&self) -> GatewayResult<Value> {
        let document = self
            .document
            .as_deref()
            .ok_or_else(|| ArgentumError::missing("document"))?;
        document.validate()?;

        let mut data = Params::new();
        data.insert(
            "country_code".to_string(),
            self.country_code().map(Value::from).unwrap_or_default(),
        );
        data.insert("document".to_string(), document.to_value());
        Ok(Value::Map(data))
    }

    pub fn send_data(&self, data: Value) -> SignResponse {
        tracing::debug!(
            document_type = ?self.document().map(|d| d.document_type()),
            test_mode = self.test_mode(),
            "sign request sent"
        );
        SignResponse::new(true, data)
    }

    pub fn send(&self) -> GatewayResult<SignResponse> {
        let data = self.data()?;
        Ok(self.send_data(data))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignResponse {
    successful: bool,
    data: Value,
}

impl SignResponse {
    pub fn new(successful: bool, data: Value) -> Self {
        Self { successful, data }
    }

    pub fn is_successful(&self) -> bool {
        self.successful
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }
}
