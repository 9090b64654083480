//! Catalog API REST client implementation.
//!
//! Uses `reqwest` against the configured base URL. Dashboard calls carry the
//! client's default bearer token (set at login, cleared at logout); the
//! confirmation and reset flows pass their short-lived link tokens per call.

use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use tokio::sync::RwLock;
use tracing::instrument;
use url::Url;

use verdant_core::{ResetId, UserId};

use crate::config::CatalogApiConfig;

use super::CatalogError;
use super::types::{
    AuthSession, AuthenticateRequest, CompleteRegistrationRequest, ForgotPasswordRequest,
    ImageUpload, LinkTokenRequest, NewProduct, Product, ProductUpdate, RegisterRequest,
    Registration, ResetAuthorization, ResetPasswordRequest,
};

/// Client for the remote catalog API.
///
/// Cheaply cloneable via `Arc`. Holds one mutable default bearer token, the
/// way the console's session model works: the most recent login owns the
/// default credential, and link-scoped flows pass their own tokens.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &CatalogApiConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                token: RwLock::new(None),
            }),
        }
    }

    /// Set the default bearer token (after a successful login).
    pub async fn set_token(&self, token: String) {
        *self.inner.token.write().await = Some(token);
    }

    /// Clear the default bearer token (logout).
    pub async fn clear_token(&self) {
        *self.inner.token.write().await = None;
    }

    /// Join an endpoint path onto the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Attach the default bearer token, if one is set.
    async fn with_bearer(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.inner.token.read().await.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // =========================================================================
    // User authentication
    // =========================================================================

    /// Authenticate with email and password.
    ///
    /// The backend answers 201 with the user and a bearer token; any other
    /// sub-500 status means the credentials were rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidCredentials`] on rejection, or a
    /// transport/status error otherwise.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, CatalogError> {
        let url = self.endpoint("users/authenticate")?;
        let response = self
            .inner
            .client
            .post(url)
            .json(&AuthenticateRequest { email, password })
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(response.json().await?),
            status if status.is_server_error() => Err(CatalogError::Status(status)),
            _ => Err(CatalogError::InvalidCredentials),
        }
    }

    /// Check that a bearer token is still accepted by the backend.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unauthorized`] when the token is stale.
    #[instrument(skip(self, token))]
    pub async fn authenticated(&self, token: &str) -> Result<(), CatalogError> {
        let url = self.endpoint("users/authenticated")?;
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CatalogError::from_status(status, "session"))
        }
    }

    // =========================================================================
    // Registration and confirmation
    // =========================================================================

    /// Register a new account.
    ///
    /// The backend sends the confirmation email itself. 201 means a new
    /// account was created; any other 2xx means the address was already
    /// registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a non-2xx status is returned.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn register(&self, name: &str, email: &str) -> Result<Registration, CatalogError> {
        let url = self.endpoint("users")?;
        let response = self
            .inner
            .client
            .post(url)
            .json(&RegisterRequest { name, email })
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(Registration::Created),
            status if status.is_success() => Ok(Registration::AlreadyRegistered),
            status => Err(CatalogError::from_status(status, "registration")),
        }
    }

    /// Authorize a confirmation link's email/token pair.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::LinkRejected`] when the pair is unknown.
    #[instrument(skip(self, token), fields(email = %email))]
    pub async fn authorize_confirmation(
        &self,
        email: &str,
        token: &str,
    ) -> Result<AuthSession, CatalogError> {
        let url = self.endpoint("users/new/authenticate")?;
        let response = self
            .inner
            .client
            .post(url)
            .json(&LinkTokenRequest { email, token })
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(response.json().await?),
            status if status.is_server_error() => Err(CatalogError::Status(status)),
            _ => Err(CatalogError::LinkRejected),
        }
    }

    /// Complete a registration: set the chosen name and password.
    ///
    /// Authenticated with the confirmation token, not the default token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, password, token), fields(user_id = %user_id))]
    pub async fn complete_registration(
        &self,
        user_id: UserId,
        name: &str,
        password: &str,
        token: &str,
    ) -> Result<(), CatalogError> {
        let url = self.endpoint(&format!("users/{user_id}"))?;
        let response = self
            .inner
            .client
            .put(url)
            .bearer_auth(token)
            .json(&CompleteRegistrationRequest { name, password })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CatalogError::from_status(status, &format!("user {user_id}")))
        }
    }

    // =========================================================================
    // Password reset
    // =========================================================================

    /// Request a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; callers report success to the
    /// user regardless.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn request_password_reset(&self, email: &str) -> Result<(), CatalogError> {
        let url = self.endpoint("users/reset")?;
        let response = self
            .inner
            .client
            .post(url)
            .json(&ForgotPasswordRequest { email })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CatalogError::from_status(status, "password reset"))
        }
    }

    /// Authorize a reset link's email/token pair.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::LinkRejected`] when the pair is unknown.
    #[instrument(skip(self, token), fields(email = %email))]
    pub async fn authorize_reset(
        &self,
        email: &str,
        token: &str,
    ) -> Result<ResetAuthorization, CatalogError> {
        let url = self.endpoint("users/reset/authenticate")?;
        let response = self
            .inner
            .client
            .post(url)
            .json(&LinkTokenRequest { email, token })
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status if status.is_server_error() => Err(CatalogError::Status(status)),
            _ => Err(CatalogError::LinkRejected),
        }
    }

    /// Set a new password for a user, consuming the reset authorization.
    ///
    /// Authenticated with the reset token, not the default token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, password, token), fields(user_id = %user_id))]
    pub async fn reset_password(
        &self,
        user_id: UserId,
        reset_id: ResetId,
        password: &str,
        token: &str,
    ) -> Result<(), CatalogError> {
        let url = self.endpoint(&format!("users/reset/{user_id}"))?;
        let response = self
            .inner
            .client
            .put(url)
            .bearer_auth(token)
            .json(&ResetPasswordRequest { reset_id, password })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CatalogError::from_status(status, &format!("reset for user {user_id}")))
        }
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetch the full product snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unauthorized`] on a stale token, or a
    /// transport/status error otherwise.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint("products")?;
        let response = self
            .with_bearer(self.inner.client.get(url))
            .await
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(CatalogError::from_status(status, "products"))
        }
    }

    /// Create a product, forwarding any staged images in one multipart request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, product), fields(name = %product.name, images = product.images.len()))]
    pub async fn create_product(&self, product: NewProduct) -> Result<(), CatalogError> {
        let url = self.endpoint("products")?;

        let mut form = reqwest::multipart::Form::new()
            .text("name", product.name)
            .text("description", product.description)
            .text("price", product.price.to_string());

        for image in product.images {
            form = form.part("images", image_part(image)?);
        }

        let response = self
            .with_bearer(self.inner.client.post(url))
            .await
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CatalogError::from_status(status, "products"))
        }
    }

    /// Update a product's fields (including the paused flag).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, update), fields(product_id = %product_id))]
    pub async fn update_product(
        &self,
        product_id: &str,
        update: &ProductUpdate,
    ) -> Result<(), CatalogError> {
        let url = self.endpoint(&format!("products/{product_id}"))?;
        let response = self
            .with_bearer(self.inner.client.put(url))
            .await
            .json(update)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CatalogError::from_status(status, &format!("product {product_id}")))
        }
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn delete_product(&self, product_id: &str) -> Result<(), CatalogError> {
        let url = self.endpoint(&format!("products/{product_id}"))?;
        let response = self
            .with_bearer(self.inner.client.delete(url))
            .await
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CatalogError::from_status(status, &format!("product {product_id}")))
        }
    }

    // =========================================================================
    // Product images
    // =========================================================================

    /// Attach one image to an existing product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, image), fields(product_id = %product_id, filename = %image.filename))]
    pub async fn create_product_image(
        &self,
        product_id: &str,
        image: ImageUpload,
    ) -> Result<(), CatalogError> {
        let url = self.endpoint("product/images/")?;

        let form = reqwest::multipart::Form::new()
            .text("product", product_id.to_string())
            .part("image", image_part(image)?);

        let response = self
            .with_bearer(self.inner.client.post(url))
            .await
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CatalogError::from_status(status, &format!("product {product_id} images")))
        }
    }

    /// Delete one product image.
    ///
    /// The owning product's image list only changes on the next full product
    /// re-fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self), fields(image_id = %image_id))]
    pub async fn delete_product_image(&self, image_id: &str) -> Result<(), CatalogError> {
        let url = self.endpoint(&format!("product/images/{image_id}"))?;
        let response = self
            .with_bearer(self.inner.client.delete(url))
            .await
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CatalogError::from_status(status, &format!("image {image_id}")))
        }
    }
}

/// Build a multipart file part from an uploaded image.
fn image_part(image: ImageUpload) -> Result<reqwest::multipart::Part, CatalogError> {
    Ok(reqwest::multipart::Part::bytes(image.bytes)
        .file_name(image.filename)
        .mime_str(&image.content_type)?)
}
