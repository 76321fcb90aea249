use std::fmt::{Debug, Formatter};

use azurecdn_core::utils::Redact;
use azurecdn_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{CdnRequest, Client};

/// Body of [`Client::upload_https_certificate`].
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UploadCertificate {
    pub certificate_name: String,
    pub public_certificate: String,
    pub private_key: String,
    pub format: String,
}

impl UploadCertificate {
    /// Build an upload of a PEM encoded certificate chain and private key.
    pub fn pem(
        name: impl Into<String>,
        public_certificate: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            certificate_name: name.into(),
            public_certificate: public_certificate.into(),
            private_key: private_key.into(),
            format: "Pem".to_string(),
        }
    }
}

impl Debug for UploadCertificate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadCertificate")
            .field("certificate_name", &self.certificate_name)
            .field("public_certificate", &Redact::from(&self.public_certificate))
            .field("private_key", &Redact::from(&self.private_key))
            .field("format", &self.format)
            .finish()
    }
}

/// Certificate metadata returned after an upload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Certificate {
    #[serde(rename = "CertificateID")]
    pub certificate_id: String,
    pub certificate_name: String,
    #[serde(rename = "SubscriptionID")]
    pub subscription_id: String,
    #[serde(rename = "ClientCertificateID")]
    pub client_certificate_id: String,
    pub format: String,
    pub state: String,
    pub issuers: Vec<String>,
    pub subjects: Vec<String>,
    pub subject_alternative_names: Option<Value>,
    pub thumbprint: String,
    pub serial_number: String,
    pub valid_from: String,
    pub valid_to: String,
}

impl Client {
    /// Upload a certificate, it can be bound to endpoints with
    /// [`Client::create_https_binding`] afterwards.
    pub async fn upload_https_certificate(&self, body: &UploadCertificate) -> Result<Certificate> {
        self.send(CdnRequest::post("/https/certificates").with_json(body)?)
            .await
    }
}
