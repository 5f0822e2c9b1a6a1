//! Wallet lookups.

use std::sync::Arc;

use reqwest::Method;

use crate::error::Result;
use crate::transport::{HttpTransport, RequestOptions};
use crate::types::{Credits, Package};

/// `client.account()`.
#[derive(Debug, Clone)]
pub struct AccountClient {
    transport: Arc<HttpTransport>,
}

impl AccountClient {
    pub(crate) fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Remaining API credit.
    pub async fn get_credits(&self, options: Option<&RequestOptions>) -> Result<Credits> {
        let builder = self
            .transport
            .request(Method::GET, "/wallet/self/api-credit");
        let response = self.transport.execute(builder, options).await?;
        Ok(response.json().await?)
    }

    pub async fn get_package(&self, options: Option<&RequestOptions>) -> Result<Package> {
        let builder = self.transport.request(Method::GET, "/wallet/self/package");
        let response = self.transport.execute(builder, options).await?;
        Ok(response.json().await?)
    }
}
