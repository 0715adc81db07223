use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse};
use maud::Markup;
use uuid::Uuid;

use crate::session::SESSION_COOKIE;

/// Session id from the request cookie, or a new one. The flag is true when
/// the id was just minted and the response must set the cookie.
#[must_use]
pub fn session_id(req: &HttpRequest) -> (Uuid, bool) {
    match req
        .cookie(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
    {
        Some(id) => (id, false),
        None => (Uuid::new_v4(), true),
    }
}

#[must_use]
pub fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

#[must_use]
pub fn html_response(markup: Markup, id: Uuid, fresh: bool) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    if fresh {
        builder.cookie(session_cookie(id));
    }
    builder
        .content_type("text/html; charset=utf-8")
        .body(markup.into_string())
}
