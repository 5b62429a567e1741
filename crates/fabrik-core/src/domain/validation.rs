use crate::domain::{entities::Component, error::DomainError};

/// Centralized domain validation.
///
/// Services call this at their entry points, before any I/O happens.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_component(component: &Component) -> Result<(), DomainError> {
        component.validate()
    }
}
