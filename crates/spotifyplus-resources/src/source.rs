//! Seam through which intent handling obtains response text

use crate::catalog::ResponseCatalog;
use crate::resolver::{ResponseRequest, ResponseResolver};
use async_trait::async_trait;

/// Anything that can turn a [`ResponseRequest`] into display text
#[async_trait]
pub trait ResponseSource: Send + Sync {
    /// Resolve a request; never fails, failures come back as diagnostic text
    async fn response_text(&self, request: ResponseRequest) -> String;
}

#[async_trait]
impl ResponseSource for ResponseResolver {
    async fn response_text(&self, request: ResponseRequest) -> String {
        self.resolve_async(request).await
    }
}

#[async_trait]
impl ResponseSource for ResponseCatalog {
    async fn response_text(&self, request: ResponseRequest) -> String {
        self.resolve(request).await
    }
}
