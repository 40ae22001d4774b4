//! REST endpoint paths.

use reqwest::Url;

use crate::domain::entities::ProductId;
use crate::domain::errors::ApiError;

/// Default shop API host.
pub const DEFAULT_BASE_URL: &str = "https://backend-ahjc.onrender.com";

/// URL builder rooted at the configured API host.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// # Errors
    /// Returns error if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base = Url::parse(&format!("{trimmed}/"))
            .map_err(|e| ApiError::invalid_request(format!("invalid API base URL {base_url:?}: {e}")))?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::invalid_request(format!(
                "API base URL must use http or https, got {}",
                base.scheme()
            )));
        }

        Ok(Self { base })
    }

    #[must_use]
    pub fn base(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Joins a path below the base, keeping any path prefix of the base.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base(), path.trim_start_matches('/'))
    }

    pub fn login(&self) -> String {
        self.url("/api/users/login")
    }

    pub fn register(&self) -> String {
        self.url("/api/users/register")
    }

    pub fn request_reset(&self) -> String {
        self.url("/api/users/request-reset")
    }

    pub fn reset_password(&self) -> String {
        self.url("/api/users/reset-password")
    }

    pub fn products(&self) -> String {
        self.url("/api/products/all")
    }

    pub fn product(&self, id: &ProductId) -> String {
        self.url(&format!("/api/products/{id}"))
    }

    /// Search URL with the query percent-encoded.
    pub fn search(&self, query: &str) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "products", "search"]);
        }
        url.query_pairs_mut().append_pair("query", query);
        url.into()
    }

    pub fn create_product(&self) -> String {
        self.url("/api/products/create")
    }

    pub fn update_product(&self, id: &ProductId) -> String {
        self.url(&format!("/api/products/update/{id}"))
    }

    pub fn delete_product(&self, id: &ProductId) -> String {
        self.url(&format!("/api/products/delete/{id}"))
    }

    pub fn my_cart(&self) -> String {
        self.url("/api/cart/my-cart")
    }

    pub fn add_to_cart(&self) -> String {
        self.url("/api/cart/add")
    }

    pub fn update_cart(&self) -> String {
        self.url("/api/cart/update")
    }

    pub fn remove_from_cart(&self, id: &ProductId) -> String {
        self.url(&format!("/api/cart/remove/{id}"))
    }

    pub fn orders(&self) -> String {
        self.url("/api/orders")
    }

    pub fn my_orders(&self) -> String {
        self.url("/api/orders/my")
    }

    pub fn create_order(&self) -> String {
        self.url("/api/orders/create")
    }

    pub fn order_status(&self, order_id: &str) -> String {
        self.url(&format!("/api/orders/{order_id}/status"))
    }

    pub fn categories(&self) -> String {
        self.url("/api/categories")
    }

    pub fn health(&self) -> String {
        self.url("/health")
    }
}
