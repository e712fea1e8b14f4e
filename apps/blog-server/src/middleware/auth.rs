//! Session cookie handling and identity extractors.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::{LocalBoxFuture, ready};

use inkwell_core::domain::{Identity, SessionToken, User, authorize_admin};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Attributes of the session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    pub name: String,
    pub secure: bool,
}

impl Default for SessionCookies {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: false,
        }
    }
}

impl SessionCookies {
    /// Cookie carrying a freshly issued session token.
    pub fn issue(&self, token: &SessionToken) -> Cookie<'static> {
        Cookie::build(self.name.clone(), token.value.clone())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(Duration::seconds(token.max_age_seconds))
            .finish()
    }

    /// Expired cookie that makes the browser drop the session.
    pub fn clear(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.name.clone(), "")
            .path("/")
            .http_only(true)
            .finish();
        cookie.make_removal();
        cookie
    }
}

/// The session token presented by the client: the session cookie first,
/// then an `Authorization: Bearer` header.
pub fn session_token(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = req.cookie(cookie_name).filter(|c| !c.value().is_empty()) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>().cloned().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AppError::Internal("Server configuration error".to_string())
    })
}

/// Who is making the request. Never fails on bad credentials; those
/// resolve to [`Identity::Anonymous`].
///
/// ```ignore
/// async fn index(CurrentIdentity(identity): CurrentIdentity) -> impl Responder { .. }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl FromRequest for CurrentIdentity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = match app_state(req) {
            Ok(state) => state,
            Err(e) => return Box::pin(ready(Err(e))),
        };
        let token = session_token(req, &state.cookies.name);

        Box::pin(async move {
            state
                .sessions
                .current_identity(token.as_deref())
                .await
                .map(CurrentIdentity)
                .map_err(AppError::from)
        })
    }
}

/// The administrator. Extraction fails with `403` for everyone else, so a
/// handler taking `Admin` never runs for them.
#[derive(Debug, Clone)]
pub struct Admin(Identity);

impl Admin {
    pub fn identity(&self) -> &Identity {
        &self.0
    }

    pub fn user(&self) -> Option<&User> {
        self.0.user()
    }
}

impl FromRequest for Admin {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = CurrentIdentity::from_request(req, payload);
        let path = req.path().to_string();

        Box::pin(async move {
            let CurrentIdentity(identity) = identity.await?;
            if let Err(e) = authorize_admin(&identity) {
                tracing::warn!(
                    path = %path,
                    user_id = ?identity.user().map(|u| u.id),
                    "Rejected non-admin access"
                );
                return Err(AppError::from(e));
            }
            Ok::<_, AppError>(Admin(identity))
        })
    }
}
