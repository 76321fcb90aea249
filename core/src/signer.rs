use crate::{Context, Error, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::Arc;

/// Signer is the main struct used to sign the request.
///
/// The credential is fetched from the loader on every call and never cached,
/// so a signer carries no mutable state and can be shared freely.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,
            loader: Arc::new(loader),
            builder: Arc::new(builder),
        }
    }

    /// Get the context used by this signer.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Signing request.
    pub async fn sign(&self, req: &mut http::request::Parts) -> Result<()> {
        let cred = self.loader.provide_credential(&self.ctx).await?;
        if !cred.is_valid() {
            return Err(Error::credential_invalid(
                "no valid credential provided for signing",
            ));
        }

        self.builder
            .sign_request(&self.ctx, req, cred.as_ref())
            .await
    }
}
