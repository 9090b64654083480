//! Products list route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::{CatalogError, Product};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::{error_message, success_message};

/// List query parameters.
///
/// `confirm_delete` carries the armed state of the two-stage delete
/// affordance across the render round trip.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub confirm_delete: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Product row view for the list template.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub paused: bool,
    pub published: String,
    pub image_count: usize,
    /// Delete affordance armed for this row.
    pub confirm_delete: bool,
}

impl ProductRow {
    fn from_product(product: &Product, armed: Option<&str>) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            paused: product.paused,
            published: product.published_at.format("%b %e, %Y").to_string(),
            image_count: product.images.len(),
            confirm_delete: armed == Some(product.id.as_str()),
        }
    }
}

/// Products list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub user_name: String,
    pub products: Vec<ProductRow>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Products list page handler.
///
/// GET /dashboard/products
///
/// Refreshes the snapshot on every render; a failed refresh (other than a
/// stale token) logs and renders the previous snapshot.
#[instrument(skip(user, state))]
pub async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<ProductsIndexTemplate, AppError> {
    match state.refresh_products().await {
        Ok(()) => {}
        Err(CatalogError::Unauthorized) => return Err(CatalogError::Unauthorized.into()),
        Err(e) => tracing::error!("Failed to fetch products: {e}"),
    }

    let armed = query.confirm_delete.as_deref();
    let products = state
        .products()
        .await
        .iter()
        .map(|product| ProductRow::from_product(product, armed))
        .collect();

    Ok(ProductsIndexTemplate {
        user_name: user.name,
        products,
        error: query.error.as_deref().map(error_message),
        success: query.success.as_deref().map(success_message),
    })
}
