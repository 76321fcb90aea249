use async_trait::async_trait;
use azurecdn_core::Result;

use super::{endpoint_path, segment};
use crate::client::{CdnRequest, Client};
use crate::task::{Operation, PollOperation};

impl Client {
    /// Query the status of an asynchronous operation.
    ///
    /// `operation_id` is the task track id of the accepting call.
    pub async fn get_operation(&self, endpoint_id: &str, operation_id: &str) -> Result<Operation> {
        let path = endpoint_path(endpoint_id, &format!("/operations/{}", segment(operation_id)));
        self.send(CdnRequest::get(path)).await
    }
}

#[async_trait]
impl PollOperation for Client {
    async fn poll_operation(&self, endpoint_id: &str, operation_id: &str) -> Result<Operation> {
        self.get_operation(endpoint_id, operation_id).await
    }
}
