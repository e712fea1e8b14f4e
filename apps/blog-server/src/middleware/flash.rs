//! One-shot flash messages carried in a cookie between a redirect and the
//! next page view.

use std::future::{Ready, ready};

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use serde::Serialize;

pub const FLASH_COOKIE: &str = "flash";

/// Messages shown after a failed form submission. The cookie holds only
/// the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    EmailTaken,
    UnknownEmail,
    WrongPassword,
    LoginToComment,
    DuplicateTitle,
}

impl Flash {
    const ALL: [Flash; 5] = [
        Flash::EmailTaken,
        Flash::UnknownEmail,
        Flash::WrongPassword,
        Flash::LoginToComment,
        Flash::DuplicateTitle,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Flash::EmailTaken => "email-taken",
            Flash::UnknownEmail => "unknown-email",
            Flash::WrongPassword => "wrong-password",
            Flash::LoginToComment => "login-to-comment",
            Flash::DuplicateTitle => "duplicate-title",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flash| flash.code() == code)
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::EmailTaken => "The email you entered already exists, please enter it again",
            Flash::UnknownEmail => "The email you entered is incorrect or does not exist!",
            Flash::WrongPassword => "The password you entered is incorrect",
            Flash::LoginToComment => "Please login to comment",
            Flash::DuplicateTitle => "A post with that title already exists",
        }
    }
}

/// `303 See Other` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// `303 See Other` to `location` that also sets `cookie`.
pub fn redirect_setting(location: &str, cookie: Cookie<'_>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(cookie)
        .finish()
}

/// `303 See Other` to `location`, queueing `flash` for the next page.
pub fn redirect_with_flash(location: &str, flash: Flash) -> HttpResponse {
    let cookie = Cookie::build(FLASH_COOKIE, flash.code())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(5))
        .finish();

    redirect_setting(location, cookie)
}

/// The flash cookie on the incoming request, if any.
#[derive(Debug, Default)]
pub struct IncomingFlash {
    flash: Option<Flash>,
    present: bool,
}

impl IncomingFlash {
    pub fn message(&self) -> Option<String> {
        self.flash.map(|f| f.message().to_string())
    }
}

impl FromRequest for IncomingFlash {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let incoming = match req.cookie(FLASH_COOKIE) {
            Some(cookie) => IncomingFlash {
                flash: Flash::from_code(cookie.value()),
                present: true,
            },
            None => IncomingFlash::default(),
        };

        ready(Ok(incoming))
    }
}

/// `200` with `page` as JSON, clearing the flash cookie once it has been shown.
pub fn render<T: Serialize>(page: &T, flash: &IncomingFlash) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    if flash.present {
        let mut removal = Cookie::build(FLASH_COOKIE, "").path("/").finish();
        removal.make_removal();
        response.cookie(removal);
    }
    response.json(page)
}
