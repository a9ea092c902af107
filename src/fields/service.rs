//! Service identity attached to reported errors

use crate::core::field::{Field, MarshalObject, ObjectValue};
use crate::core::keys::SERVICE_CONTEXT_KEY;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceContext {
    pub service: String,
    pub version: Option<String>,
}

impl ServiceContext {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            version: None,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl MarshalObject for ServiceContext {
    fn marshal_object(&self) -> ObjectValue {
        let obj = ObjectValue::new().with("service", self.service.as_str());
        match &self.version {
            Some(version) => obj.with("version", version.as_str()),
            None => obj,
        }
    }
}

pub fn service_context(name: impl Into<String>) -> Field {
    Field::object(SERVICE_CONTEXT_KEY, &ServiceContext::new(name))
}

pub fn service_context_versioned(name: impl Into<String>, version: impl Into<String>) -> Field {
    Field::object(
        SERVICE_CONTEXT_KEY,
        &ServiceContext::new(name).with_version(version),
    )
}
