//! Product image route handlers.
//!
//! Images are created and deleted through their own endpoints, but the
//! product's image list only changes with the next full snapshot refresh.

use axum::{
    Form,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::{CatalogError, ImageUpload};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::refresh_after_mutation;

/// Image delete form data: which product's edit screen to return to.
#[derive(Debug, Deserialize)]
pub struct ImageDeleteForm {
    pub product: String,
}

fn edit_url(product_id: &str) -> String {
    format!(
        "/dashboard/products/{}/edit",
        urlencoding::encode(product_id)
    )
}

/// Upload one image to an existing product.
///
/// POST /dashboard/products/{id}/images (multipart: image)
#[instrument(skip(_user, state, multipart))]
pub async fn upload(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut upload: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field
            .file_name()
            .map(ToString::to_string)
            .unwrap_or_default();
        let content_type = field.content_type().map_or_else(
            || "application/octet-stream".to_string(),
            ToString::to_string,
        );
        let bytes = field.bytes().await?;

        if !filename.is_empty() && !bytes.is_empty() {
            upload = Some(ImageUpload {
                filename,
                content_type,
                bytes: bytes.to_vec(),
            });
        }
    }

    let Some(image) = upload else {
        return Ok(Redirect::to(&format!("{}?error=image_save", edit_url(&product_id))).into_response());
    };

    match state.catalog().create_product_image(&product_id, image).await {
        Ok(()) => {
            refresh_after_mutation(&state).await;
            Ok(Redirect::to(&edit_url(&product_id)).into_response())
        }
        Err(CatalogError::Unauthorized) => Err(CatalogError::Unauthorized.into()),
        Err(e) => {
            tracing::error!("Error to create product image: {e}");
            Ok(Redirect::to(&format!("{}?error=image_save", edit_url(&product_id))).into_response())
        }
    }
}

/// Delete one product image.
///
/// POST /dashboard/products/images/{id}/delete
///
/// Only reachable through the armed confirm affordance on the edit screen.
#[instrument(skip(_user, state))]
pub async fn remove(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(image_id): Path<String>,
    Form(form): Form<ImageDeleteForm>,
) -> Result<Response, AppError> {
    match state.catalog().delete_product_image(&image_id).await {
        Ok(()) => {
            refresh_after_mutation(&state).await;
            Ok(Redirect::to(&edit_url(&form.product)).into_response())
        }
        Err(CatalogError::Unauthorized) => Err(CatalogError::Unauthorized.into()),
        Err(e) => {
            tracing::error!("Error to delete product image: {e}");
            Ok(
                Redirect::to(&format!("{}?error=image_delete", edit_url(&form.product)))
                    .into_response(),
            )
        }
    }
}
