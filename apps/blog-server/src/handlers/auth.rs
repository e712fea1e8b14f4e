//! Registration, login and logout.

use actix_web::{HttpRequest, HttpResponse, web};

use inkwell_core::domain::{Registration, User, masked_email};
use inkwell_core::{CredentialError, DomainError};
use inkwell_shared::dto::{FormPage, LoginForm, RegisterForm};

use super::views::viewer;
use crate::middleware::auth::{CurrentIdentity, session_token};
use crate::middleware::error::AppResult;
use crate::middleware::flash::{
    Flash, IncomingFlash, redirect_setting, redirect_with_flash, render,
};
use crate::state::AppState;

fn form_page(identity: &CurrentIdentity, flash: &IncomingFlash) -> HttpResponse {
    render(
        &FormPage {
            flash: flash.message(),
            viewer: viewer(&identity.0),
        },
        flash,
    )
}

/// Open a session for `user` and send them home with the session cookie.
async fn start_session(state: &AppState, user: &User) -> AppResult<HttpResponse> {
    let token = state.sessions.login(user).await?;
    Ok(redirect_setting("/", state.cookies.issue(&token)))
}

/// GET /register
pub async fn register_page(identity: CurrentIdentity, flash: IncomingFlash) -> HttpResponse {
    form_page(&identity, &flash)
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    form: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    let RegisterForm {
        email,
        password,
        name,
    } = form.into_inner();

    let user = match state
        .accounts
        .register(Registration {
            email,
            password,
            name,
        })
        .await
    {
        Ok(user) => user,
        Err(DomainError::Duplicate(_)) => {
            tracing::info!("Registration rejected: email already registered");
            return Ok(redirect_with_flash("/register", Flash::EmailTaken));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = user.id, email = %masked_email(&user.email), "User registered");
    start_session(&state, &user).await
}

/// GET /login
pub async fn login_page(identity: CurrentIdentity, flash: IncomingFlash) -> HttpResponse {
    form_page(&identity, &flash)
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let LoginForm { email, password } = form.into_inner();

    let user = match state.accounts.authenticate(&email, &password).await {
        Ok(user) => user,
        Err(DomainError::InvalidCredentials(reason)) => {
            tracing::info!(email = %masked_email(&email), reason = %reason, "Login failed");
            let flash = match reason {
                CredentialError::UnknownEmail => Flash::UnknownEmail,
                CredentialError::WrongPassword => Flash::WrongPassword,
            };
            return Ok(redirect_with_flash("/login", flash));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = user.id, "User logged in");
    start_session(&state, &user).await
}

/// GET /logout
pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    if let Some(token) = session_token(&req, &state.cookies.name) {
        state.sessions.logout(&token).await?;
        tracing::info!("User logged out");
    }

    Ok(redirect_setting("/", state.cookies.clear()))
}
