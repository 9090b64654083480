//! Pause and delete actions for products.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use crate::catalog::{CatalogError, ProductUpdate};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::refresh_after_mutation;

/// Toggle a product's paused flag.
///
/// POST /dashboard/products/{id}/pause
///
/// Sends the product back in full with only the flag flipped, the way the
/// backend's update endpoint expects it.
#[instrument(skip(_user, state))]
pub async fn toggle_pause(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let products = state.products().await;

    let Some(product) = products.iter().find(|product| product.id == id) else {
        return Ok(Redirect::to("/dashboard/products?error=missing").into_response());
    };

    let update = ProductUpdate {
        name: product.name.clone(),
        description: product.description.clone(),
        price: product.price,
        paused: !product.paused,
    };

    match state.catalog().update_product(&id, &update).await {
        Ok(()) => {
            refresh_after_mutation(&state).await;
            Ok(Redirect::to("/dashboard/products").into_response())
        }
        Err(CatalogError::Unauthorized) => Err(CatalogError::Unauthorized.into()),
        Err(e) => {
            tracing::error!("Error to pause product: {e}");
            Ok(Redirect::to("/dashboard/products?error=pause").into_response())
        }
    }
}

/// Delete a product.
///
/// POST /dashboard/products/{id}/delete
///
/// Only reachable through the armed confirm affordance on the list screen.
#[instrument(skip(_user, state))]
pub async fn delete(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match state.catalog().delete_product(&id).await {
        Ok(()) => {
            refresh_after_mutation(&state).await;
            Ok(Redirect::to("/dashboard/products?success=deleted").into_response())
        }
        Err(CatalogError::Unauthorized) => Err(CatalogError::Unauthorized.into()),
        Err(e) => {
            tracing::error!("Error to delete product: {e}");
            Ok(Redirect::to("/dashboard/products?error=delete").into_response())
        }
    }
}
