//! Product edit route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use verdant_core::Price;

use crate::catalog::{CatalogError, Product, ProductUpdate};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::{error_message, refresh_after_mutation};

/// Edit-form query parameters.
///
/// `confirm_image_delete` carries the armed state of the two-stage image
/// delete affordance across the render round trip.
#[derive(Debug, Deserialize)]
pub struct EditQuery {
    pub confirm_image_delete: Option<String>,
    pub error: Option<String>,
}

/// Update form data.
///
/// `paused` rides along as a hidden field so the full product travels back
/// to the backend unchanged apart from the edited fields.
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub paused: bool,
}

/// Image view for the edit template.
#[derive(Debug, Clone)]
pub struct ImageView {
    pub id: String,
    pub path: String,
    /// Delete affordance armed for this image.
    pub confirm_delete: bool,
}

/// Edit-product page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/edit.html")]
pub struct EditProductTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub paused: bool,
    pub images: Vec<ImageView>,
    pub error: Option<String>,
}

impl EditProductTemplate {
    fn from_product(product: Product, armed: Option<&str>, error: Option<String>) -> Self {
        let images = product
            .images
            .into_iter()
            .map(|image| ImageView {
                confirm_delete: armed == Some(image.id.as_str()),
                id: image.id,
                path: image.path,
            })
            .collect();

        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            paused: product.paused,
            images,
            error,
        }
    }
}

/// Edit-product page handler.
///
/// GET /dashboard/products/{id}/edit
#[instrument(skip(_user, state))]
pub async fn edit_page(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<EditQuery>,
) -> Result<Response, AppError> {
    let mut products = state.products().await;

    // The snapshot can be empty right after login; fetch once before giving up.
    if !products.iter().any(|product| product.id == id) {
        state.refresh_products().await?;
        products = state.products().await;
    }

    let Some(product) = products.into_iter().find(|product| product.id == id) else {
        return Ok(Redirect::to("/dashboard/products?error=missing").into_response());
    };

    let armed = query.confirm_image_delete.as_deref();
    let error = query.error.as_deref().map(error_message);

    Ok(EditProductTemplate::from_product(product, armed, error).into_response())
}

/// Update-product form handler.
///
/// POST /dashboard/products/{id}
#[instrument(skip(_user, state, form))]
pub async fn update(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UpdateForm>,
) -> Result<Response, AppError> {
    let edit_url = |error: &str| {
        format!(
            "/dashboard/products/{}/edit?error={error}",
            urlencoding::encode(&id)
        )
    };

    if form.name.trim().is_empty() || form.description.trim().is_empty() {
        return Ok(Redirect::to(&edit_url("missing_fields")).into_response());
    }

    let Ok(price) = Price::parse(&form.price) else {
        return Ok(Redirect::to(&edit_url("invalid_price")).into_response());
    };

    let update = ProductUpdate {
        name: form.name.trim().to_string(),
        description: form.description.trim().to_string(),
        price: price.amount(),
        paused: form.paused,
    };

    match state.catalog().update_product(&id, &update).await {
        Ok(()) => {
            refresh_after_mutation(&state).await;
            Ok(Redirect::to("/dashboard/products?success=saved").into_response())
        }
        Err(CatalogError::Unauthorized) => Err(CatalogError::Unauthorized.into()),
        Err(e) => {
            tracing::warn!("Failed to update product {id}: {e}");
            Ok(Redirect::to(&edit_url("save")).into_response())
        }
    }
}
