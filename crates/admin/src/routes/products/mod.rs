//! Product dashboard route handlers.
//!
//! Every mutation follows the same cycle the screens were built around:
//! call the catalog endpoint, re-fetch the full product snapshot, then
//! redirect back to the list so it renders from fresh state.

pub mod actions;
pub mod create;
pub mod edit;
pub mod images;
pub mod list;

use crate::state::AppState;

/// Re-fetch the product snapshot after a mutation.
///
/// Refresh failures are logged, not surfaced: the screens fall back to the
/// previous snapshot rather than failing a mutation that already succeeded.
pub(crate) async fn refresh_after_mutation(state: &AppState) {
    if let Err(e) = state.refresh_products().await {
        tracing::error!("Failed to refresh products after mutation: {e}");
    }
}

/// Banner text for a product-screen error code.
pub(crate) fn error_message(code: &str) -> String {
    match code {
        "save" => "Error to save",
        "pause" => "Error to pause product",
        "delete" => "Error to delete product",
        "image_save" => "Error to create product image",
        "image_delete" => "Error to delete product image",
        "invalid_price" => "Price must be a decimal number.",
        "missing_fields" => "Name, description and price are required.",
        "missing" => "Product not found.",
        _ => "Something went wrong.",
    }
    .to_string()
}

/// Banner text for a product-screen success code.
pub(crate) fn success_message(code: &str) -> String {
    match code {
        "created" => "Product created.",
        "saved" => "Product saved.",
        "deleted" => "Product deleted.",
        _ => "Done.",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_screen_wording() {
        assert_eq!(error_message("save"), "Error to save");
        assert_eq!(error_message("pause"), "Error to pause product");
        assert_eq!(error_message("image_delete"), "Error to delete product image");
        assert_eq!(error_message("unknown-code"), "Something went wrong.");
    }

    #[test]
    fn test_success_messages() {
        assert_eq!(success_message("created"), "Product created.");
        assert_eq!(success_message("unknown-code"), "Done.");
    }
}
