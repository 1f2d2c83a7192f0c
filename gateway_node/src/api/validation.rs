//! Request field validation.

use serde_json::Value;

use crate::api::errors::ApiError;

/// A single field that failed validation.
#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub value: Option<Value>,
}

impl ValidationError {
    pub fn into_api_error(self) -> ApiError {
        ApiError::with_details(
            400,
            self.message,
            serde_json::json!({
                "field": self.field,
                "value": self.value
            }),
        )
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        err.into_api_error()
    }
}

/// Validate EVM-style address format
pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    if address.is_empty() {
        return Err(ValidationError {
            field: "account".to_string(),
            message: "Address cannot be empty".to_string(),
            value: Some(Value::String(address.to_string())),
        });
    }

    if !address.starts_with("0x") {
        return Err(ValidationError {
            field: "account".to_string(),
            message: "Address must start with '0x'".to_string(),
            value: Some(Value::String(address.to_string())),
        });
    }

    if address.len() != 42 {
        return Err(ValidationError {
            field: "account".to_string(),
            message: "Address must be 42 characters long (including '0x')".to_string(),
            value: Some(Value::String(address.to_string())),
        });
    }

    if !is_valid_hex(&address[2..]) {
        return Err(ValidationError {
            field: "account".to_string(),
            message: "Address contains invalid hex characters".to_string(),
            value: Some(Value::String(address.to_string())),
        });
    }

    Ok(())
}

/// Validate hash format (64 hex characters, 0x prefix optional)
pub fn validate_hash(hash: &str) -> Result<[u8; 32], ValidationError> {
    let hash_str = hash.strip_prefix("0x").unwrap_or(hash);

    if hash_str.len() != 64 || !is_valid_hex(hash_str) {
        return Err(ValidationError {
            field: "hash".to_string(),
            message: "Hash must be 64 hex characters".to_string(),
            value: Some(Value::String(hash.to_string())),
        });
    }

    let mut out = [0u8; 32];
    // Length and alphabet were checked above.
    hex::decode_to_slice(hash_str, &mut out).map_err(|_| ValidationError {
        field: "hash".to_string(),
        message: "Hash contains invalid hex characters".to_string(),
        value: Some(Value::String(hash.to_string())),
    })?;
    Ok(out)
}

/// Validate a property street address (non-empty, bounded length)
pub fn validate_property_address(address: &str) -> Result<(), ValidationError> {
    if address.trim().is_empty() {
        return Err(ValidationError {
            field: "propertyAddress".to_string(),
            message: "Property address required".to_string(),
            value: Some(Value::String(address.to_string())),
        });
    }

    if address.len() > 256 {
        return Err(ValidationError {
            field: "propertyAddress".to_string(),
            message: "Property address is too long".to_string(),
            value: Some(Value::String(address.to_string())),
        });
    }

    Ok(())
}

fn is_valid_hex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_validation_covers_shape_and_alphabet() {
        assert!(validate_address("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").is_ok());
        assert!(validate_address("").is_err());
        assert!(validate_address("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266").is_err());
        assert!(validate_address("0x1234").is_err());
        assert!(validate_address("0xZZZZd6e51aad88F6F4ce6aB8827279cffFb92266").is_err());
    }

    #[test]
    fn hash_validation_accepts_optional_prefix() {
        let hex64 = "ab".repeat(32);
        assert!(validate_hash(&hex64).is_ok());
        assert!(validate_hash(&format!("0x{hex64}")).is_ok());
        assert!(validate_hash("0x1234").is_err());
        assert_eq!(validate_hash(&format!("0x{hex64}")).unwrap()[0], 0xab);
    }

    #[test]
    fn property_address_must_be_non_empty() {
        assert!(validate_property_address("123 Test Street").is_ok());
        assert!(validate_property_address("   ").is_err());
        assert!(validate_property_address(&"x".repeat(300)).is_err());
    }
}
