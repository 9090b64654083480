//! Product creation route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use verdant_core::Price;

use crate::catalog::{CatalogError, ImageUpload, NewProduct};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::{error_message, refresh_after_mutation};

/// Create-form query parameters.
#[derive(Debug, Deserialize)]
pub struct NewProductQuery {
    pub error: Option<String>,
}

/// Create-product page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/new.html")]
pub struct NewProductTemplate {
    pub error: Option<String>,
}

/// Create-product page handler.
///
/// GET /dashboard/products/new
pub async fn new_page(
    RequireAuth(_user): RequireAuth,
    Query(query): Query<NewProductQuery>,
) -> impl IntoResponse {
    NewProductTemplate {
        error: query.error.as_deref().map(error_message),
    }
}

/// Create-product form handler.
///
/// POST /dashboard/products (multipart: name, description, price, images...)
///
/// Staged images ride along in the same request; the backend attaches them
/// to the new product.
#[instrument(skip(_user, state, multipart))]
pub async fn create(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut name = String::new();
    let mut description = String::new();
    let mut price_input = String::new();
    let mut images: Vec<ImageUpload> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or_default() {
            "name" => name = field.text().await?,
            "description" => description = field.text().await?,
            "price" => price_input = field.text().await?,
            "images" => {
                let filename = field
                    .file_name()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                let content_type = field.content_type().map_or_else(
                    || "application/octet-stream".to_string(),
                    ToString::to_string,
                );
                let bytes = field.bytes().await?;

                // Browsers submit an empty file part when nothing is chosen.
                if !filename.is_empty() && !bytes.is_empty() {
                    images.push(ImageUpload {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    if name.trim().is_empty() || description.trim().is_empty() {
        return Ok(Redirect::to("/dashboard/products/new?error=missing_fields").into_response());
    }

    let Ok(price) = Price::parse(&price_input) else {
        return Ok(Redirect::to("/dashboard/products/new?error=invalid_price").into_response());
    };

    let product = NewProduct {
        name: name.trim().to_string(),
        description: description.trim().to_string(),
        price: price.amount(),
        images,
    };

    match state.catalog().create_product(product).await {
        Ok(()) => {
            refresh_after_mutation(&state).await;
            Ok(Redirect::to("/dashboard/products?success=created").into_response())
        }
        Err(CatalogError::Unauthorized) => Err(CatalogError::Unauthorized.into()),
        Err(e) => {
            tracing::warn!("Failed to create product: {e}");
            Ok(Redirect::to("/dashboard/products/new?error=save").into_response())
        }
    }
}
