//! HTTP implementation of the remote product store contract.
//!
//! REST surface:
//! - `GET /products` - full product list
//! - `POST /products` - create, body = draft fields, returns the product
//! - `PUT /products/{id}` - partial update, returns the product
//! - `DELETE /products/{id}` - no content

use serde::de::DeserializeOwned;
use tracing::{error, instrument};
use url::Url;

use sephyx_core::{DraftProduct, Product, ProductId, ProductPatch};

use super::{ProductStore, StoreError};

/// Maximum response-body length echoed into error messages.
const ERROR_SNIPPET_LEN: usize = 200;

/// `reqwest`-backed client for the remote product store.
#[derive(Debug, Clone)]
pub struct HttpProductStore {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpProductStore {
    /// Create a client against `base_url` (e.g. `https://store.sephyx.io/api`).
    ///
    /// `base_url` must be an http(s) URL. A URL that cannot serve as a
    /// base (e.g. `mailto:`) has no path segments to extend, so the
    /// product endpoints would be unaddressable.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        debug_assert!(
            !base_url.cannot_be_a_base(),
            "base_url must be a base URL"
        );
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn products_url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_or((), |mut segments| {
                segments.pop_if_empty().push("products");
            });
        url
    }

    fn product_url(&self, id: ProductId) -> Url {
        let mut url = self.products_url();
        url.path_segments_mut()
            .map_or((), |mut segments| {
                segments.push(&id.to_string());
            });
        url
    }

    /// Check the response status and parse the JSON body.
    ///
    /// Reads the body as text first so a rejection carries a useful
    /// message instead of a bare status code.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::rejection(status, &body));
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                error!(
                    status = %status,
                    body = %body.chars().take(500).collect::<String>(),
                    "failed to parse store response"
                );
                Err(StoreError::Parse(e))
            }
        }
    }

    fn rejection(status: reqwest::StatusCode, body: &str) -> StoreError {
        StoreError::Rejected {
            status: status.as_u16(),
            message: body.chars().take(ERROR_SNIPPET_LEN).collect(),
        }
    }
}

impl ProductStore for HttpProductStore {
    #[instrument(skip(self))]
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        let response = self.client.get(self.products_url()).send().await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create_product(&self, draft: &DraftProduct) -> Result<Product, StoreError> {
        let response = self
            .client
            .post(self.products_url())
            .json(draft)
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self, patch), fields(product_id = %id))]
    async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, StoreError> {
        let response = self
            .client
            .put(self.product_url(id))
            .json(patch)
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        let response = self.client.delete(self.product_url(id)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(Self::rejection(status, &body));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_url_construction() {
        let store = HttpProductStore::new(Url::parse("https://store.sephyx.io/api").unwrap());
        assert_eq!(
            store.products_url().as_str(),
            "https://store.sephyx.io/api/products"
        );
        assert_eq!(
            store.product_url(ProductId::new(12)).as_str(),
            "https://store.sephyx.io/api/products/12"
        );
    }

    #[test]
    fn test_url_construction_trailing_slash() {
        let store = HttpProductStore::new(Url::parse("https://store.sephyx.io/api/").unwrap());
        assert_eq!(
            store.products_url().as_str(),
            "https://store.sephyx.io/api/products"
        );
    }

    #[test]
    #[should_panic(expected = "base_url must be a base URL")]
    fn test_non_base_url_rejected() {
        let _ = HttpProductStore::new(Url::parse("mailto:ops@sephyx.io").unwrap());
    }

    #[test]
    fn test_rejection_snippet_truncated() {
        let body = "x".repeat(1000);
        let err = HttpProductStore::rejection(reqwest::StatusCode::BAD_REQUEST, &body);
        match err {
            StoreError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message.len(), ERROR_SNIPPET_LEN);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
