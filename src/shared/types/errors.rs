use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    /// Missing mandatory field after all defaulting has been applied.
    pub fn missing_field(field: &str) -> Self {
        DomainError::Validation(format!("Missing required field: {}", field))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_embeds_entity_and_value() {
        let err = DomainError::not_found("Device", "id", 42);
        assert_eq!(err.to_string(), "Not found: Device with id=42");
    }

    #[test]
    fn missing_field_is_a_validation_error() {
        let err = DomainError::missing_field("cost");
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("cost")));
    }
}
