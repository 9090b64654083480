//! Authentication route handlers.
//!
//! Handles login, registration, confirmation links, and password reset
//! against the catalog API's user endpoints. The backend sends all emails;
//! these handlers only relay tokens and render the outcome.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use verdant_core::{Email, ResetId, UserId};

use crate::catalog::CatalogError;
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
}

/// Finish-registration form data (confirmation link flow).
#[derive(Debug, Deserialize)]
pub struct ConfirmForm {
    pub user_id: i32,
    pub token: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub password_confirm: String,
}

/// New-password form data (reset link flow).
#[derive(Debug, Deserialize)]
pub struct ResetForm {
    pub user_id: i32,
    pub reset_id: i32,
    pub token: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub password_confirm: String,
}

/// Forgot password form data.
#[derive(Debug, Deserialize)]
pub struct ForgotForm {
    pub email: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Query parameters carried by emailed confirmation/reset links.
#[derive(Debug, Deserialize)]
pub struct LinkQuery {
    pub email: Option<String>,
    pub token: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

/// Registration success page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register_success.html")]
pub struct RegisterSuccessTemplate {
    pub email: String,
}

/// Finish-registration page template (valid confirmation link).
#[derive(Template, WebTemplate)]
#[template(path = "auth/confirm.html")]
pub struct ConfirmTemplate {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub token: String,
    pub error: Option<String>,
}

/// New-password page template (valid reset link).
#[derive(Template, WebTemplate)]
#[template(path = "auth/reset.html")]
pub struct ResetTemplate {
    pub user_id: i32,
    pub reset_id: i32,
    pub name: String,
    pub email: String,
    pub token: String,
    pub error: Option<String>,
}

/// Terminal success page with a return-to-login action.
#[derive(Template, WebTemplate)]
#[template(path = "auth/done.html")]
pub struct DoneTemplate {
    pub title: String,
    pub message: String,
}

/// Terminal error page for rejected confirmation/reset links.
#[derive(Template, WebTemplate)]
#[template(path = "auth/link_invalid.html")]
pub struct LinkInvalidTemplate;

// =============================================================================
// Flash messages
// =============================================================================

fn login_error_message(code: &str) -> String {
    match code {
        "credentials" => "Invalid e-mail or password.".to_string(),
        _ => "Something went wrong.".to_string(),
    }
}

fn login_success_message(code: &str) -> String {
    match code {
        "reset_sent" => "If the address exists, a reset e-mail is on its way.".to_string(),
        _ => "Done.".to_string(),
    }
}

fn register_error_message(code: &str) -> String {
    match code {
        "missing_name" => "Name is required.".to_string(),
        "invalid_email" => "Invalid e-mail.".to_string(),
        "email_taken" => "An account with this e-mail already exists.".to_string(),
        _ => "Something went wrong.".to_string(),
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
///
/// GET /
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(login_error_message),
        success: query.success.as_deref().map(login_success_message),
    }
}

/// Handle login form submission.
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match state
        .catalog()
        .authenticate(&form.email, &form.password)
        .await
    {
        Ok(auth) => {
            let current = CurrentUser::new(auth.user, auth.token.clone());

            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to set session: {e}");
                return Redirect::to("/?error=session").into_response();
            }

            // The default bearer token follows the most recent login.
            state.catalog().set_token(auth.token).await;

            Redirect::to("/dashboard/products").into_response()
        }
        Err(CatalogError::InvalidCredentials) => {
            Redirect::to("/?error=credentials").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            Redirect::to("/?error=failed").into_response()
        }
    }
}

/// Handle logout.
///
/// POST /auth/logout
pub async fn logout(State(state): State<AppState>, session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    state.catalog().clear_token().await;

    Redirect::to("/").into_response()
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
///
/// GET /register
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error.as_deref().map(register_error_message),
    }
}

/// Handle registration form submission.
///
/// The backend creates the account and sends the confirmation email itself.
///
/// POST /register
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    if form.name.trim().is_empty() {
        return Redirect::to("/register?error=missing_name").into_response();
    }

    if Email::parse(form.email.trim()).is_err() {
        return Redirect::to("/register?error=invalid_email").into_response();
    }

    match state
        .catalog()
        .register(form.name.trim(), form.email.trim())
        .await
    {
        Ok(crate::catalog::Registration::Created) => RegisterSuccessTemplate {
            email: form.email.trim().to_string(),
        }
        .into_response(),
        Ok(crate::catalog::Registration::AlreadyRegistered) => {
            Redirect::to("/register?error=email_taken").into_response()
        }
        Err(e) => {
            tracing::warn!("Registration failed: {e}");
            Redirect::to("/register?error=failed").into_response()
        }
    }
}

// =============================================================================
// Confirmation Routes
// =============================================================================

/// Display the finish-registration page.
///
/// Called when the user clicks the confirmation link in the backend's email.
///
/// GET /confirm?email=...&token=...
pub async fn confirm_page(
    State(state): State<AppState>,
    Query(query): Query<LinkQuery>,
) -> Response {
    let (Some(email), Some(token)) = (query.email, query.token) else {
        return Redirect::to("/").into_response();
    };

    match state.catalog().authorize_confirmation(&email, &token).await {
        Ok(auth) => ConfirmTemplate {
            user_id: auth.user.id.as_i32(),
            name: auth.user.name,
            email: auth.user.email.into_inner(),
            token: auth.token,
            error: None,
        }
        .into_response(),
        Err(CatalogError::LinkRejected) => LinkInvalidTemplate.into_response(),
        Err(e) => {
            tracing::warn!("Confirmation link authorization failed: {e}");
            LinkInvalidTemplate.into_response()
        }
    }
}

/// Handle finish-registration form submission.
///
/// POST /confirm
pub async fn confirm(State(state): State<AppState>, Form(form): Form<ConfirmForm>) -> Response {
    let rerender = |error: &str, form: &ConfirmForm| {
        ConfirmTemplate {
            user_id: form.user_id,
            name: form.name.clone(),
            email: form.email.clone(),
            token: form.token.clone(),
            error: Some(error.to_string()),
        }
        .into_response()
    };

    if form.name.trim().is_empty() {
        return rerender("Name is required.", &form);
    }

    if let Some(error) = password_error(&form.password, &form.password_confirm) {
        return rerender(error, &form);
    }

    match state
        .catalog()
        .complete_registration(
            UserId::new(form.user_id),
            form.name.trim(),
            &form.password,
            &form.token,
        )
        .await
    {
        Ok(()) => DoneTemplate {
            title: "Success!".to_string(),
            message: "Your profile has been successfully created.".to_string(),
        }
        .into_response(),
        Err(e) => {
            tracing::warn!("Finishing registration failed: {e}");
            rerender("Something went wrong.", &form)
        }
    }
}

// =============================================================================
// Password Reset Routes
// =============================================================================

/// Handle forgot-password form submission from the login screen.
///
/// Always reports success to prevent email enumeration.
///
/// POST /forgot
pub async fn forgot_password(
    State(state): State<AppState>,
    Form(form): Form<ForgotForm>,
) -> Response {
    if let Err(e) = state.catalog().request_password_reset(&form.email).await {
        tracing::warn!("Password reset request failed: {e}");
        // Still show success to prevent email enumeration
    }

    Redirect::to("/?success=reset_sent").into_response()
}

/// Display the new-password page.
///
/// Called when the user clicks the reset link in the backend's email.
///
/// GET /reset?email=...&token=...
pub async fn reset_page(State(state): State<AppState>, Query(query): Query<LinkQuery>) -> Response {
    let (Some(email), Some(token)) = (query.email, query.token) else {
        return Redirect::to("/").into_response();
    };

    match state.catalog().authorize_reset(&email, &token).await {
        Ok(authz) => ResetTemplate {
            user_id: authz.user.id.as_i32(),
            reset_id: authz.reset.id.as_i32(),
            name: authz.user.name,
            email: authz.user.email.into_inner(),
            token: authz.token,
            error: None,
        }
        .into_response(),
        Err(CatalogError::LinkRejected) => LinkInvalidTemplate.into_response(),
        Err(e) => {
            tracing::warn!("Reset link authorization failed: {e}");
            LinkInvalidTemplate.into_response()
        }
    }
}

/// Handle new-password form submission.
///
/// POST /reset
pub async fn reset(State(state): State<AppState>, Form(form): Form<ResetForm>) -> Response {
    let rerender = |error: &str, form: &ResetForm| {
        ResetTemplate {
            user_id: form.user_id,
            reset_id: form.reset_id,
            name: form.name.clone(),
            email: form.email.clone(),
            token: form.token.clone(),
            error: Some(error.to_string()),
        }
        .into_response()
    };

    if let Some(error) = password_error(&form.password, &form.password_confirm) {
        return rerender(error, &form);
    }

    match state
        .catalog()
        .reset_password(
            UserId::new(form.user_id),
            ResetId::new(form.reset_id),
            &form.password,
            &form.token,
        )
        .await
    {
        Ok(()) => DoneTemplate {
            title: "Success!".to_string(),
            message: "Your password has been successfully updated.".to_string(),
        }
        .into_response(),
        Err(e) => {
            tracing::warn!("Password reset failed: {e}");
            rerender("Something went wrong.", &form)
        }
    }
}

/// Validate a password pair, mirroring the form-level checks the screens
/// perform before submitting.
fn password_error(password: &str, password_confirm: &str) -> Option<&'static str> {
    if password.len() < 8 {
        return Some("Password must be at least 8 characters.");
    }
    if password != password_confirm {
        return Some("Passwords must be the same.");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_error_too_short() {
        assert_eq!(
            password_error("short", "short"),
            Some("Password must be at least 8 characters.")
        );
    }

    #[test]
    fn test_password_error_mismatch() {
        assert_eq!(
            password_error("longenough", "different"),
            Some("Passwords must be the same.")
        );
    }

    #[test]
    fn test_password_error_valid() {
        assert_eq!(password_error("longenough", "longenough"), None);
    }

    #[test]
    fn test_flash_messages() {
        assert_eq!(login_error_message("credentials"), "Invalid e-mail or password.");
        assert_eq!(login_error_message("anything-else"), "Something went wrong.");
        assert_eq!(
            register_error_message("email_taken"),
            "An account with this e-mail already exists."
        );
    }
}
