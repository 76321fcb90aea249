use async_trait::async_trait;
use azurecdn_core::{Context, ProvideCredential, Result};

use crate::credential::Credential;

/// StaticCredentialProvider always returns the credential it was built with.
#[derive(Clone, Debug)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a provider from key id and key value.
    pub fn new(key_id: &str, key_value: &str) -> Self {
        Self {
            credential: Credential::new(key_id, key_value),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}
