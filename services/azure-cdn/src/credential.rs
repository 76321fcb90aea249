use azurecdn_core::utils::Redact;
use azurecdn_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential that holds the key id and key value issued for the management api.
#[derive(Default, Clone)]
pub struct Credential {
    /// Key id, sent in clear inside the `Authorization` header.
    pub key_id: String,
    /// Key value, only used as HMAC key material.
    pub key_value: String,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("key_id", &Redact::from(&self.key_id))
            .field("key_value", &Redact::from(&self.key_value))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.key_id.is_empty() && !self.key_value.is_empty()
    }
}

impl Credential {
    /// Create a new credential.
    pub fn new(key_id: impl Into<String>, key_value: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_value: key_value.into(),
        }
    }
}
