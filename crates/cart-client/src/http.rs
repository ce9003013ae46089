//! HTTP implementation of the cart client.

use std::time::Duration;

use async_trait::async_trait;
use common::UserId;
use domain::Cart;
use reqwest::{Client, StatusCode};

use crate::{CartClient, CartClientError};

/// Cart client backed by the cart service's REST API.
///
/// Expects the outbound contract
/// `GET /api/carts/user/{userId} -> 200 Cart | 404` and
/// `DELETE /api/carts/user/{userId} -> 200`. Every request carries a hard
/// deadline configured at construction.
#[derive(Clone)]
pub struct HttpCartClient {
    client: Client,
    base_url: String,
}

impl HttpCartClient {
    /// Creates a client against `base_url` with the given per-request deadline.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CartClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CartClientError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn cart_url(&self, user: &UserId) -> String {
        format!("{}/api/carts/user/{}", self.base_url, user)
    }
}

fn send_error(e: reqwest::Error) -> CartClientError {
    if e.is_timeout() {
        CartClientError::Timeout
    } else {
        CartClientError::Transport(e.to_string())
    }
}

#[async_trait]
impl CartClient for HttpCartClient {
    async fn fetch_cart(&self, user: &UserId) -> Result<Cart, CartClientError> {
        let response = self
            .client
            .get(self.cart_url(user))
            .send()
            .await
            .map_err(send_error)?;

        match response.status() {
            StatusCode::OK => response
                .json::<Cart>()
                .await
                .map_err(|e| CartClientError::Transport(format!("malformed cart payload: {e}"))),
            StatusCode::NOT_FOUND => Err(CartClientError::NotFound(user.clone())),
            status => Err(CartClientError::Transport(format!(
                "cart service responded {status}"
            ))),
        }
    }

    async fn clear_cart(&self, user: &UserId) -> Result<(), CartClientError> {
        let response = self
            .client
            .delete(self.cart_url(user))
            .send()
            .await
            .map_err(send_error)?;

        // A 404 means there is nothing left to clear.
        if response.status().is_success() || response.status() == StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(CartClientError::Transport(format!(
                "cart service responded {}",
                response.status()
            )))
        }
    }
}
